use charge_field::errors::Result;
use charge_field::fields::{ElectricField, PointCharge};
use charge_field::grid::{FieldMap, Grid, View};
use charge_field::math::R2;
use charge_field::render::{render_field, render_potential, TextStyle};
use charge_field::system::System;

fn main() -> Result<()> {
    // +1 nC and -1 nC, 2 m apart.
    let system = System::from_charges([
        PointCharge::new(1.0e-9, R2::new(-1.0, 0.0)),
        PointCharge::new(-1.0e-9, R2::new(1.0, 0.0)),
    ])?;

    println!("x(m), y(m), V(V), |E|(N/C), angle(deg)");
    for y in [0.0, 0.5, 1.0, 2.0] {
        let p = R2::new(0.0, y);
        let e = ElectricField::from_vector(system.field(p));
        println!(
            "{:.2}, {:.2}, {:.6e}, {:.6e}, {:.1}",
            p.x,
            p.y,
            system.potential(p),
            e.magnitude,
            e.angle.to_degrees()
        );
    }

    let view = View::new(R2::new(-3.0, -2.0), R2::new(3.0, 2.0))?;
    let potential = FieldMap::sample(&system, Grid::new(view, 48, 24)?);
    let field = FieldMap::sample(&system, Grid::new(view, 24, 12)?);
    print!("{}", render_potential(&potential, &TextStyle::default()));
    print!("{}", render_field(&field));
    Ok(())
}

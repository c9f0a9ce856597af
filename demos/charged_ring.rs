use charge_field::errors::Result;
use charge_field::fields::{trace_system, Charge, LineTracing, Structure};
use charge_field::grid::View;
use charge_field::math::R2;
use charge_field::system::System;

fn main() -> Result<()> {
    // 10 nC spread over a 1 m ring; the field at the center cancels as members grow.
    let center = R2::new(0.0, 0.0);
    for members in [4, 16, 64, 256] {
        let ring = Structure::circle("ring", 10.0e-9, center, 1.0, members)?;
        println!(
            "members={members:>3}  Q={:.3e} C  V(center)={:.6e} V  |E(center)|={:.3e} N/C  V(3,0)={:.6e} V",
            ring.net_charge(),
            ring.potential(center),
            ring.field(center).norm(),
            ring.potential(R2::new(3.0, 0.0)),
        );
    }

    let system = System::from_charges([Structure::circle("ring", 10.0e-9, center, 1.0, 32)?])?;
    let mut tracing = LineTracing::new(View::new(R2::new(-4.0, -4.0), R2::new(4.0, 4.0))?);
    tracing.seeds_per_charge = 1;
    let lines = trace_system(&system, &tracing);
    let escaping = lines.iter().filter(|l| !l.truncated).count();
    println!("{} field lines traced, {escaping} ended cleanly", lines.len());
    Ok(())
}

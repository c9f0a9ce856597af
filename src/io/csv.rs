//! CSV export of sampled field maps.

use std::io::{self, Write};

use crate::grid::FieldMap;

/// Writes one row per grid point in row-major order.
///
/// Columns are `x,y,potential,field_x,field_y`.
pub fn write_field_map_csv<W: Write>(mut w: W, map: &FieldMap) -> io::Result<()> {
    writeln!(w, "x,y,potential,field_x,field_y")?;
    let rows = map.grid().points().zip(map.potentials()).zip(map.fields());
    for ((p, v), e) in rows {
        writeln!(w, "{:.16e},{:.16e},{:.16e},{:.16e},{:.16e}", p.x, p.y, v, e.x, e.y)?;
    }
    Ok(())
}

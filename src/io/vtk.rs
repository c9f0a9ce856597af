//! Legacy ASCII VTK export.
//!
//! Field maps are written as `STRUCTURED_POINTS` datasets that ParaView and
//! VisIt open directly. The electric field is stored as a 3-vector with a
//! zero z component.

use std::io::{self, Write};

use crate::grid::FieldMap;
use crate::math::Scalar;

/// Writes the legacy VTK file header.
pub fn write_vtk_header<W: Write>(mut writer: W, title: &str) -> io::Result<()> {
    writeln!(writer, "# vtk DataFile Version 3.0")?;
    // the title line may not contain newlines
    writeln!(writer, "{}", title.replace(['\n', '\r'], " "))?;
    writeln!(writer, "ASCII")?;
    Ok(())
}

/// Writes `map` as a structured-points dataset with potential and field arrays.
pub fn write_field_map_vtk<W: Write>(mut writer: W, map: &FieldMap, title: &str) -> io::Result<()> {
    let grid = map.grid();
    let view = grid.view();
    let spacing_x = view.extent().x / (grid.columns() - 1) as Scalar;
    let spacing_y = view.extent().y / (grid.rows() - 1) as Scalar;

    write_vtk_header(&mut writer, title)?;
    writeln!(writer, "DATASET STRUCTURED_POINTS")?;
    writeln!(writer, "DIMENSIONS {} {} 1", grid.columns(), grid.rows())?;
    writeln!(writer, "ORIGIN {:.16e} {:.16e} 0", view.min.x, view.min.y)?;
    writeln!(writer, "SPACING {spacing_x:.16e} {spacing_y:.16e} 1")?;
    writeln!(writer, "POINT_DATA {}", grid.len())?;

    writeln!(writer, "SCALARS potential double 1")?;
    writeln!(writer, "LOOKUP_TABLE default")?;
    for v in map.potentials() {
        writeln!(writer, "{v:.16e}")?;
    }

    writeln!(writer, "VECTORS electric_field double")?;
    for e in map.fields() {
        writeln!(writer, "{:.16e} {:.16e} 0", e.x, e.y)?;
    }
    Ok(())
}

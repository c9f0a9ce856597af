//! I/O helpers for exporting sampled field maps.

pub mod csv;
pub mod vtk;

pub use self::csv::write_field_map_csv;
pub use self::vtk::{write_field_map_vtk, write_vtk_header};

//! Convenience re-exports for building charge configurations.

pub use crate::constants::*;
pub use crate::errors::{ChargeFieldError, Result};
pub use crate::fields::{
    circle_charges, path_charges, segment_charges, seeds_around, trace_field_line, trace_system,
    Charge, ElectricField, FieldLine, FieldSample, LineTracing, PointCharge, SharedCharge,
    Structure,
};
pub use crate::grid::{FieldMap, Grid, View, CONTOUR_PERCENTILES};
pub use crate::io::{write_field_map_csv, write_field_map_vtk};
pub use crate::math::{distance, direction, from_polar, lerp, to_polar, R2, Scalar};
pub use crate::render::{render_field, render_potential, TextStyle};
pub use crate::simulation::{
    write_trajectory_csv, Particle, ParticleEngine, ParticleSystem, SimulationConfig,
    SimulationEngine, SimulationError, TimeIntegrator, Trajectory,
};
pub use crate::system::System;

#[cfg(feature = "serde")]
pub use crate::config::{Discretization, GridSettings, PlotRequest, ScenarioConfig};
#[cfg(feature = "serde")]
pub use crate::service::{Plot, PlotId, PlotService};

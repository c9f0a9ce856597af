//! Charge sources and the quantities derived from them.

mod charge;
mod electric;
mod lines;
mod point;
mod structure;

pub use charge::{Charge, SharedCharge};
pub use electric::{ElectricField, FieldSample};
pub use lines::{seeds_around, trace_field_line, trace_system, FieldLine, LineTracing};
pub use point::PointCharge;
pub use structure::{circle_charges, path_charges, segment_charges, Structure};

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(clippy::all, clippy::cargo, clippy::nursery, missing_docs)]
#![doc = include_str!("../README.md")]

/// Fundamental physical constants used throughout the library.
pub mod constants;
/// Shared 2D vector helpers.
pub mod math;
/// Charge sources, field descriptors and field lines.
pub mod fields;
/// Superposition of charge sources.
pub mod system;
/// Rectangular sampling grids and field maps.
pub mod grid;
/// Terminal rendering of field maps.
pub mod render;
/// CSV and VTK export.
pub mod io;
/// Scenario files and plot requests.
#[cfg(feature = "serde")]
pub mod config;
/// In-memory plot registry.
#[cfg(feature = "serde")]
pub mod service;
/// Charged particle dynamics.
pub mod simulation;
/// Error types shared between modules.
pub mod errors;

/// Common exports for downstream crates.
pub mod prelude;

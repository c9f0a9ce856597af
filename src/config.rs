//! Serializable descriptions of charge configurations.
//!
//! [`PlotRequest`] mirrors the JSON body accepted by plotting front-ends;
//! [`ScenarioConfig`] wraps it with a name and sampling settings for files
//! read from disk.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{ChargeFieldError, Result};
use crate::fields::{PointCharge, SharedCharge, Structure};
use crate::grid::{Grid, View};
use crate::math::{R2, Scalar};
use crate::system::System;

/// A point given by its coordinates in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointData {
    /// Horizontal coordinate.
    pub x: Scalar,
    /// Vertical coordinate.
    pub y: Scalar,
}

impl From<PointData> for R2 {
    fn from(p: PointData) -> Self {
        Self::new(p.x, p.y)
    }
}

impl From<R2> for PointData {
    fn from(v: R2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

/// A point charge entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointChargeData {
    /// Charge in coulombs.
    pub charge: Scalar,
    /// Position.
    pub point: PointData,
}

/// A uniformly charged straight segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineChargeData {
    /// Total charge in coulombs.
    pub charge: Scalar,
    /// First endpoint.
    pub point_1: PointData,
    /// Second endpoint.
    pub point_2: PointData,
}

/// A uniformly charged ring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircleChargeData {
    /// Total charge in coulombs.
    pub charge: Scalar,
    /// Ring center.
    pub center: PointData,
    /// Ring radius in meters.
    pub radius: Scalar,
}

/// A uniformly charged closed polygon outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonChargeData {
    /// Total charge in coulombs.
    pub charge: Scalar,
    /// Polygon corners in order.
    pub vertices: Vec<PointData>,
}

/// Every charge of a request, grouped by kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChargesData {
    /// Bare point charges.
    #[serde(default)]
    pub point_charges: Vec<PointChargeData>,
    /// Finite line charges, discretised into segment structures.
    #[serde(default)]
    pub finite_line_charges: Vec<LineChargeData>,
    /// Rings, discretised into circle structures.
    #[serde(default)]
    pub circle_charges: Vec<CircleChargeData>,
    /// Polygon outlines, discretised into closed path structures.
    #[serde(default)]
    pub polygon_charges: Vec<PolygonChargeData>,
}

impl ChargesData {
    /// Number of entries across all kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.point_charges.len()
            + self.finite_line_charges.len()
            + self.circle_charges.len()
            + self.polygon_charges.len()
    }

    /// True when no charge of any kind is listed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The plotted rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewData {
    /// Lower-left corner.
    pub min: PointData,
    /// Upper-right corner.
    pub max: PointData,
}

impl ViewData {
    /// Validated [`View`].
    pub fn to_view(&self) -> Result<View> {
        View::new(self.min.into(), self.max.into())
    }
}

/// Member counts used when discretising extended charges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discretization {
    /// Point charges per finite line.
    #[serde(default = "default_line_members")]
    pub line_members: usize,
    /// Point charges per ring.
    #[serde(default = "default_circle_members")]
    pub circle_members: usize,
    /// Point charges per polygon outline.
    #[serde(default = "default_polygon_members")]
    pub polygon_members: usize,
}

fn default_line_members() -> usize {
    10
}

fn default_circle_members() -> usize {
    100
}

fn default_polygon_members() -> usize {
    100
}

impl Default for Discretization {
    fn default() -> Self {
        Self {
            line_members: default_line_members(),
            circle_members: default_circle_members(),
            polygon_members: default_polygon_members(),
        }
    }
}

/// Charges plus the view to plot them in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotRequest {
    /// Charges to superpose.
    pub charges: ChargesData,
    /// Plotted rectangle.
    pub view: ViewData,
}

impl PlotRequest {
    /// Parses a request from its JSON body.
    pub fn from_json(body: &str) -> Result<Self> {
        Ok(serde_json::from_str(body)?)
    }

    /// Builds the system described by the request.
    ///
    /// Point charges come first, then lines, circles and polygons, each in
    /// listed order.
    pub fn build_system(&self, discretization: &Discretization) -> Result<System> {
        let charges = &self.charges;
        if charges.is_empty() {
            return Err(ChargeFieldError::invalid("request lists no charges"));
        }

        let mut members: Vec<SharedCharge> = Vec::with_capacity(charges.len());
        for pc in &charges.point_charges {
            members.push(Arc::new(PointCharge::new(pc.charge, pc.point.into())));
        }
        for (i, line) in charges.finite_line_charges.iter().enumerate() {
            members.push(Arc::new(Structure::segment(
                format!("line_{i}"),
                line.charge,
                line.point_1.into(),
                line.point_2.into(),
                discretization.line_members,
            )?));
        }
        for (i, circle) in charges.circle_charges.iter().enumerate() {
            members.push(Arc::new(Structure::circle(
                format!("circle_{i}"),
                circle.charge,
                circle.center.into(),
                circle.radius,
                discretization.circle_members,
            )?));
        }
        for (i, polygon) in charges.polygon_charges.iter().enumerate() {
            let vertices: Vec<R2> = polygon.vertices.iter().map(|&v| v.into()).collect();
            members.push(Arc::new(Structure::polygon(
                format!("polygon_{i}"),
                polygon.charge,
                &vertices,
                discretization.polygon_members,
            )?));
        }
        debug!(entries = charges.len(), "built system from request");
        System::new(members)
    }

    /// Validated view rectangle.
    pub fn view(&self) -> Result<View> {
        self.view.to_view()
    }
}

/// Grid resolutions used when sampling a scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSettings {
    /// Points per axis for the potential map.
    #[serde(default = "default_potential_size")]
    pub potential_size: usize,
    /// Points per axis for the field-arrow map.
    #[serde(default = "default_field_size")]
    pub field_size: usize,
}

fn default_potential_size() -> usize {
    100
}

fn default_field_size() -> usize {
    20
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            potential_size: default_potential_size(),
            field_size: default_field_size(),
        }
    }
}

/// A named plot request read from a TOML or JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// Scenario identifier.
    pub name: String,
    /// Optional display title.
    #[serde(default)]
    pub title: Option<String>,
    /// Charges and view.
    #[serde(flatten)]
    pub plot: PlotRequest,
    /// Member counts for extended charges.
    #[serde(default)]
    pub discretization: Discretization,
    /// Sampling resolutions.
    #[serde(default)]
    pub grid: GridSettings,
}

impl ScenarioConfig {
    /// Loads a scenario, picking the format from the `.toml` or `.json` extension.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
        let scenario = match extension {
            "toml" => Self::from_toml_str(&content)?,
            "json" => Self::from_json_str(&content)?,
            other => {
                return Err(ChargeFieldError::invalid(format!(
                    "unsupported scenario extension `{other}` for {}",
                    path.display()
                )))
            }
        };
        debug!(scenario = %scenario.name, path = %path.display(), "loaded scenario");
        Ok(scenario)
    }

    /// Parses a TOML scenario.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Parses a JSON scenario.
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Title if set, otherwise the name.
    #[must_use]
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }

    /// Builds the scenario's system.
    pub fn build_system(&self) -> Result<System> {
        self.plot.build_system(&self.discretization)
    }

    /// Grid for the potential map.
    pub fn potential_grid(&self) -> Result<Grid> {
        Grid::square(self.plot.view()?, self.grid.potential_size)
    }

    /// Grid for the field-arrow map.
    pub fn field_grid(&self) -> Result<Grid> {
        Grid::square(self.plot.view()?, self.grid.field_size)
    }
}

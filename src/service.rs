//! In-memory registry of sampled plots.
//!
//! A front-end hands over a [`PlotRequest`], receives an opaque [`PlotId`] and
//! later fetches the exported artifact for that identifier.

use std::collections::HashMap;
use std::fmt;

use tracing::info;

use crate::config::{Discretization, GridSettings, PlotRequest};
use crate::errors::{ChargeFieldError, Result};
use crate::grid::{FieldMap, Grid};
use crate::io::write_field_map_vtk;
use crate::math::Scalar;
use crate::system::System;

/// Hex digits following the `P` prefix of a plot identifier.
const ID_DIGITS: u32 = 9;

/// Opaque plot identifier: `P` followed by nine uppercase hex digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlotId(String);

impl PlotId {
    fn random(rng: &mut fastrand::Rng) -> Self {
        let value = rng.u64(..1u64 << (4 * ID_DIGITS));
        Self(format!("P{value:0width$X}", width = ID_DIGITS as usize))
    }

    /// The identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlotId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// A request together with its sampled maps.
#[derive(Debug, Clone)]
pub struct Plot {
    /// Registry identifier.
    pub id: PlotId,
    /// The request as received.
    pub request: PlotRequest,
    /// System built from the request.
    pub system: System,
    /// Fine potential and field sampling.
    pub potential_map: FieldMap,
    /// Coarse sampling for field arrows.
    pub field_map: FieldMap,
    /// Potential contour levels of the fine map.
    pub contour_levels: Vec<Scalar>,
}

/// Stores plots by identifier.
#[derive(Debug)]
pub struct PlotService {
    plots: HashMap<PlotId, Plot>,
    order: Vec<PlotId>,
    rng: fastrand::Rng,
    discretization: Discretization,
    grid: GridSettings,
}

impl Default for PlotService {
    fn default() -> Self {
        Self::new(Discretization::default(), GridSettings::default())
    }
}

impl PlotService {
    /// Creates an empty registry with the given sampling settings.
    #[must_use]
    pub fn new(discretization: Discretization, grid: GridSettings) -> Self {
        Self::with_rng(discretization, grid, fastrand::Rng::new())
    }

    /// Same as [`new`](Self::new) with identifiers drawn from a fixed seed.
    #[must_use]
    pub fn with_seed(discretization: Discretization, grid: GridSettings, seed: u64) -> Self {
        Self::with_rng(discretization, grid, fastrand::Rng::with_seed(seed))
    }

    fn with_rng(discretization: Discretization, grid: GridSettings, rng: fastrand::Rng) -> Self {
        Self {
            plots: HashMap::new(),
            order: Vec::new(),
            rng,
            discretization,
            grid,
        }
    }

    /// Builds and samples `request`, storing the result under a fresh identifier.
    pub fn create(&mut self, request: &PlotRequest) -> Result<PlotId> {
        let system = request.build_system(&self.discretization)?;
        let view = request.view()?;
        let potential_map = FieldMap::sample(&system, Grid::square(view, self.grid.potential_size)?);
        let field_map = FieldMap::sample(&system, Grid::square(view, self.grid.field_size)?);
        let contour_levels = potential_map.contour_levels();

        let mut id = PlotId::random(&mut self.rng);
        while self.plots.contains_key(&id) {
            id = PlotId::random(&mut self.rng);
        }
        info!(plot = %id, charges = system.len(), "created plot");

        self.order.push(id.clone());
        self.plots.insert(
            id.clone(),
            Plot {
                id: id.clone(),
                request: request.clone(),
                system,
                potential_map,
                field_map,
                contour_levels,
            },
        );
        Ok(id)
    }

    /// The stored plot, if any.
    #[must_use]
    pub fn view(&self, id: &PlotId) -> Option<&Plot> {
        self.plots.get(id)
    }

    /// The plot exported as legacy VTK.
    pub fn artifact(&self, id: &PlotId) -> Result<Vec<u8>> {
        let plot = self
            .view(id)
            .ok_or_else(|| ChargeFieldError::PlotNotFound(id.to_string()))?;
        let mut bytes = Vec::new();
        write_field_map_vtk(&mut bytes, &plot.potential_map, id.as_str())?;
        Ok(bytes)
    }

    /// Identifiers in creation order.
    #[must_use]
    pub fn list(&self) -> &[PlotId] {
        &self.order
    }

    /// Number of stored plots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True when nothing has been created yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

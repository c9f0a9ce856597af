use std::f64::consts::TAU;
use std::sync::Arc;

use tracing::debug;

use crate::errors::{ChargeFieldError, Result};
use crate::math::{from_polar, lerp, R2, Scalar};

use super::charge::{Charge, SharedCharge};
use super::point::PointCharge;

/// Named composite of charges treated as a single charge source.
///
/// Members live in a local frame; the structure answers a query at `p` by
/// asking every member about `p - origin`.
#[derive(Clone)]
pub struct Structure {
    name: String,
    origin: R2,
    members: Vec<SharedCharge>,
}

impl Structure {
    /// Creates a structure from arbitrary members expressed relative to `origin`.
    pub fn new(name: impl Into<String>, origin: R2, members: Vec<SharedCharge>) -> Result<Self> {
        let name = name.into();
        check_point("structure origin", &origin)?;
        if members.is_empty() {
            return Err(ChargeFieldError::invalid(format!(
                "structure `{name}` needs at least one member"
            )));
        }
        debug!(structure = %name, members = members.len(), "built structure");
        Ok(Self {
            name,
            origin,
            members,
        })
    }

    /// Creates a structure from point charges given in absolute coordinates.
    ///
    /// The charges are re-expressed relative to `origin`, so the structure
    /// reproduces their field exactly.
    pub fn from_point_charges<I>(name: impl Into<String>, origin: R2, charges: I) -> Result<Self>
    where
        I: IntoIterator<Item = PointCharge>,
    {
        let members = charges
            .into_iter()
            .map(|c| Arc::new(c.translated(-origin)) as SharedCharge)
            .collect();
        Self::new(name, origin, members)
    }

    /// Uniformly charged straight segment discretised into `members` point charges.
    ///
    /// The origin sits at the segment midpoint.
    pub fn segment(
        name: impl Into<String>,
        total_charge: Scalar,
        endpoint_1: R2,
        endpoint_2: R2,
        members: usize,
    ) -> Result<Self> {
        let charges = segment_charges(total_charge, endpoint_1, endpoint_2, members)?;
        Self::from_point_charges(name, lerp(&endpoint_1, &endpoint_2, 0.5), charges)
    }

    /// Uniformly charged ring discretised into `members` point charges.
    ///
    /// The origin sits at the ring center.
    pub fn circle(
        name: impl Into<String>,
        total_charge: Scalar,
        center: R2,
        radius: Scalar,
        members: usize,
    ) -> Result<Self> {
        let charges = circle_charges(total_charge, center, radius, members)?;
        Self::from_point_charges(name, center, charges)
    }

    /// Uniformly charged polyline discretised into `members` point charges.
    ///
    /// The origin sits at the first vertex.
    pub fn path(
        name: impl Into<String>,
        total_charge: Scalar,
        vertices: &[R2],
        closed: bool,
        members: usize,
    ) -> Result<Self> {
        let charges = path_charges(total_charge, vertices, closed, members)?;
        Self::from_point_charges(name, vertices[0], charges)
    }

    /// Uniformly charged closed polygon outline.
    pub fn polygon(
        name: impl Into<String>,
        total_charge: Scalar,
        vertices: &[R2],
        members: usize,
    ) -> Result<Self> {
        Self::path(name, total_charge, vertices, true, members)
    }

    /// Returns the same members placed at a different origin.
    #[must_use]
    pub fn with_origin(mut self, origin: R2) -> Self {
        self.origin = origin;
        self
    }

    /// Returns the name of the structure.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Position of the local frame in meters.
    #[must_use]
    pub const fn origin(&self) -> R2 {
        self.origin
    }

    /// Members in insertion order, in the local frame.
    #[must_use]
    pub fn members(&self) -> &[SharedCharge] {
        &self.members
    }

    /// Number of direct members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always false for a constructed structure.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl Charge for Structure {
    fn field(&self, point: R2) -> R2 {
        let local = point - self.origin;
        self.members
            .iter()
            .fold(R2::zeros(), |acc, member| acc + member.field(local))
    }

    fn potential(&self, point: R2) -> Scalar {
        let local = point - self.origin;
        self.members
            .iter()
            .fold(0.0, |acc, member| acc + member.potential(local))
    }

    fn net_charge(&self) -> Scalar {
        self.members.iter().map(|m| m.net_charge()).sum()
    }

    fn source_points(&self) -> Vec<R2> {
        self.members
            .iter()
            .flat_map(|m| m.source_points())
            .map(|p| p + self.origin)
            .collect()
    }
}

impl std::fmt::Debug for Structure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Structure")
            .field("name", &self.name)
            .field("origin", &self.origin)
            .field("members", &self.members.len())
            .field("net_charge", &self.net_charge())
            .finish()
    }
}

/// Point charges evenly spaced from `endpoint_1` to `endpoint_2`, each carrying `total_charge / members`.
///
/// Member `i` sits at `t = i / (members - 1)`; a single member sits on `endpoint_1`.
pub fn segment_charges(
    total_charge: Scalar,
    endpoint_1: R2,
    endpoint_2: R2,
    members: usize,
) -> Result<Vec<PointCharge>> {
    check_members(members)?;
    check_charge(total_charge)?;
    check_point("segment endpoint", &endpoint_1)?;
    check_point("segment endpoint", &endpoint_2)?;

    let share = total_charge / members as Scalar;
    let charges = (0..members)
        .map(|i| {
            let t = if members == 1 {
                0.0
            } else {
                i as Scalar / (members - 1) as Scalar
            };
            PointCharge::new(share, lerp(&endpoint_1, &endpoint_2, t))
        })
        .collect();
    Ok(charges)
}

/// Point charges evenly spaced by angle `2π i / members` on a circle around `center`.
pub fn circle_charges(
    total_charge: Scalar,
    center: R2,
    radius: Scalar,
    members: usize,
) -> Result<Vec<PointCharge>> {
    check_members(members)?;
    check_charge(total_charge)?;
    check_point("circle center", &center)?;
    if !radius.is_finite() || radius < 0.0 {
        return Err(ChargeFieldError::invalid(format!(
            "circle radius must be finite and non-negative, got {radius}"
        )));
    }

    let share = total_charge / members as Scalar;
    let charges = (0..members)
        .map(|i| {
            let angle = TAU * i as Scalar / members as Scalar;
            PointCharge::new(share, center + from_polar(radius, angle))
        })
        .collect();
    Ok(charges)
}

/// Point charges evenly spaced by arc length along a polyline.
///
/// Open paths place the first and last member on the end vertices; closed
/// paths wrap from the last vertex back to the first and never place two
/// members on the same spot. Every member carries `total_charge / members`,
/// so each edge collects charge in proportion to its share of the length.
pub fn path_charges(
    total_charge: Scalar,
    vertices: &[R2],
    closed: bool,
    members: usize,
) -> Result<Vec<PointCharge>> {
    check_members(members)?;
    check_charge(total_charge)?;
    let required = if closed { 3 } else { 2 };
    if vertices.len() < required {
        return Err(ChargeFieldError::invalid(format!(
            "path needs at least {required} vertices, got {}",
            vertices.len()
        )));
    }
    for v in vertices {
        check_point("path vertex", v)?;
    }

    let mut edges: Vec<(R2, R2)> = vertices.windows(2).map(|w| (w[0], w[1])).collect();
    if closed {
        edges.push((vertices[vertices.len() - 1], vertices[0]));
    }
    let lengths: Vec<Scalar> = edges.iter().map(|(a, b)| (b - a).norm()).collect();
    let perimeter: Scalar = lengths.iter().sum();
    if perimeter <= 0.0 {
        return Err(ChargeFieldError::invalid("path has zero length"));
    }

    let spacing = match (closed, members) {
        (true, _) => perimeter / members as Scalar,
        (false, 1) => 0.0,
        (false, _) => perimeter / (members - 1) as Scalar,
    };
    let share = total_charge / members as Scalar;

    let charges = (0..members)
        .map(|i| {
            let arc = (spacing * i as Scalar).min(perimeter);
            PointCharge::new(share, point_at_arc_length(&edges, &lengths, arc))
        })
        .collect();
    Ok(charges)
}

fn point_at_arc_length(edges: &[(R2, R2)], lengths: &[Scalar], arc: Scalar) -> R2 {
    let mut remaining = arc;
    for ((a, b), &len) in edges.iter().zip(lengths) {
        if remaining <= len {
            if len == 0.0 {
                return *a;
            }
            return lerp(a, b, remaining / len);
        }
        remaining -= len;
    }
    // floating-point leftovers past the final vertex
    edges.last().map_or_else(R2::zeros, |(_, b)| *b)
}

fn check_members(members: usize) -> Result<()> {
    if members == 0 {
        return Err(ChargeFieldError::invalid(
            "structure generators need at least one member",
        ));
    }
    Ok(())
}

fn check_charge(charge: Scalar) -> Result<()> {
    if !charge.is_finite() {
        return Err(ChargeFieldError::invalid(format!(
            "charge must be finite, got {charge}"
        )));
    }
    Ok(())
}

fn check_point(what: &str, point: &R2) -> Result<()> {
    if !(point.x.is_finite() && point.y.is_finite()) {
        return Err(ChargeFieldError::invalid(format!(
            "{what} must be finite, got ({}, {})",
            point.x, point.y
        )));
    }
    Ok(())
}

//! Electric field line tracing.
//!
//! Lines follow the unit field direction `dx/ds = E / |E|` with a classic
//! fourth-order Runge-Kutta step, walking both downstream and upstream from a
//! seed and joining the two halves into one polyline.

use std::f64::consts::TAU;

use tracing::warn;

use crate::grid::View;
use crate::math::{distance, from_polar, R2, Scalar};
use crate::system::System;

use super::charge::Charge;

/// Integration settings for field-line tracing.
#[derive(Debug, Clone, PartialEq)]
pub struct LineTracing {
    /// Region outside of which a walk stops.
    pub view: View,
    /// Arc-length step in meters.
    pub step: Scalar,
    /// Maximum number of steps per direction.
    pub max_steps: usize,
    /// Walks stop where the field magnitude drops below this value (N/C).
    pub min_field: Scalar,
    /// Walks stop within this distance of a point charge.
    pub stop_radius: Scalar,
    /// Seeds placed around each top-level point charge by [`trace_system`].
    pub seeds_per_charge: usize,
    /// Distance from a point charge at which seeds are placed.
    pub seed_radius: Scalar,
}

impl LineTracing {
    /// Settings scaled to the size of `view`.
    #[must_use]
    pub fn new(view: View) -> Self {
        let diagonal = view.extent().norm();
        Self {
            view,
            step: diagonal / 400.0,
            max_steps: 2_000,
            min_field: 0.0,
            stop_radius: diagonal / 400.0,
            seeds_per_charge: 16,
            seed_radius: diagonal / 100.0,
        }
    }
}

/// Polyline following the field, ordered from upstream to downstream.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldLine {
    /// Vertices in meters.
    pub points: Vec<R2>,
    /// True when either half stopped on the step limit.
    pub truncated: bool,
}

impl FieldLine {
    /// Number of vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when the seed itself was outside the view.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// `count` seeds evenly spaced by angle `2π i / count` around `center`.
#[must_use]
pub fn seeds_around(center: R2, radius: Scalar, count: usize) -> Vec<R2> {
    (0..count)
        .map(|i| center + from_polar(radius, TAU * i as Scalar / count as Scalar))
        .collect()
}

/// Traces the field line of `source` passing through `seed`.
pub fn trace_field_line<C>(source: &C, seed: R2, tracing: &LineTracing) -> FieldLine
where
    C: Charge + ?Sized,
{
    let sinks = source.source_points();
    let (mut upstream, up_truncated) = walk(source, &sinks, seed, -1.0, tracing);
    let (downstream, down_truncated) = walk(source, &sinks, seed, 1.0, tracing);

    // both halves start on the seed
    if !upstream.is_empty() {
        upstream.remove(0);
    }
    upstream.reverse();
    upstream.extend(downstream);

    FieldLine {
        points: upstream,
        truncated: up_truncated || down_truncated,
    }
}

/// Traces lines seeded around every top-level point charge of `system`.
///
/// Only members that reduce to a single source point are seeded. Members of a
/// structure act as sinks but get no seeds of their own.
#[must_use]
pub fn trace_system(system: &System, tracing: &LineTracing) -> Vec<FieldLine> {
    system
        .charges()
        .iter()
        .filter_map(|charge| match charge.source_points().as_slice() {
            [center] => Some(*center),
            _ => None,
        })
        .flat_map(|center| seeds_around(center, tracing.seed_radius, tracing.seeds_per_charge))
        .map(|seed| trace_field_line(system, seed, tracing))
        .filter(|line| !line.is_empty())
        .collect()
}

fn walk<C>(source: &C, sinks: &[R2], seed: R2, sign: Scalar, tracing: &LineTracing) -> (Vec<R2>, bool)
where
    C: Charge + ?Sized,
{
    let mut points = Vec::new();
    let mut x = seed;
    for _ in 0..tracing.max_steps {
        if !tracing.view.contains(&x) {
            return (points, false);
        }
        points.push(x);
        if points.len() > 1 && sinks.iter().any(|s| distance(s, &x) < tracing.stop_radius) {
            return (points, false);
        }
        match rk4_step(source, x, tracing.step, sign, tracing.min_field) {
            Some(next) => x = next,
            None => return (points, false),
        }
    }
    warn!(
        seed_x = seed.x,
        seed_y = seed.y,
        max_steps = tracing.max_steps,
        "field line hit the step limit"
    );
    (points, true)
}

fn unit_direction<C>(source: &C, x: R2, sign: Scalar, min_field: Scalar) -> Option<R2>
where
    C: Charge + ?Sized,
{
    let e = source.field(x);
    let magnitude = e.norm();
    if !magnitude.is_finite() || magnitude == 0.0 || magnitude < min_field {
        return None;
    }
    Some(e * (sign / magnitude))
}

fn rk4_step<C>(source: &C, x: R2, h: Scalar, sign: Scalar, min_field: Scalar) -> Option<R2>
where
    C: Charge + ?Sized,
{
    let k1 = unit_direction(source, x, sign, min_field)?;
    let k2 = unit_direction(source, x + k1 * (0.5 * h), sign, min_field)?;
    let k3 = unit_direction(source, x + k2 * (0.5 * h), sign, min_field)?;
    let k4 = unit_direction(source, x + k3 * h, sign, min_field)?;
    Some(x + (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (h / 6.0))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use approx::assert_relative_eq;

    use super::*;
    use crate::fields::{PointCharge, SharedCharge, Structure};

    fn view() -> View {
        View::new(R2::new(-5.0, -5.0), R2::new(5.0, 5.0)).unwrap()
    }

    #[test]
    fn seeds_sit_on_the_circle() {
        let seeds = seeds_around(R2::new(1.0, 1.0), 0.5, 4);
        assert_eq!(seeds.len(), 4);
        assert_relative_eq!(seeds[0].x, 1.5, epsilon = 1.0e-12);
        assert_relative_eq!(seeds[1].y, 1.5, epsilon = 1.0e-12);
    }

    #[test]
    fn single_charge_lines_are_radial() {
        let q = PointCharge::new(1.0e-9, R2::zeros());
        let tracing = LineTracing::new(view());
        let line = trace_field_line(&q, R2::new(0.5, 0.5), &tracing);
        assert!(!line.truncated);
        let last = line.points[line.len() - 1];
        // leaves the view along the diagonal
        assert_relative_eq!(last.x, last.y, epsilon = 1.0e-9);
        assert!(last.x > 4.9);
    }

    #[test]
    fn dipole_lines_run_from_positive_to_negative() {
        let system = System::from_charges([
            PointCharge::new(1.0e-9, R2::new(-1.0, 0.0)),
            PointCharge::new(-1.0e-9, R2::new(1.0, 0.0)),
        ])
        .unwrap();
        let tracing = LineTracing::new(view());
        let line = trace_field_line(&system, R2::new(-0.9, 0.05), &tracing);
        let first = line.points[0];
        let last = line.points[line.len() - 1];
        assert!(distance(&first, &R2::new(-1.0, 0.0)) < 0.2);
        assert!(distance(&last, &R2::new(1.0, 0.0)) < 0.2);
    }

    #[test]
    fn seed_outside_view_gives_empty_line() {
        let q = PointCharge::new(1.0, R2::zeros());
        let line = trace_field_line(&q, R2::new(50.0, 0.0), &LineTracing::new(view()));
        assert!(line.is_empty());
    }

    #[test]
    fn trace_system_seeds_every_point_charge() {
        let system = System::from_charges([
            PointCharge::new(1.0e-9, R2::new(-2.0, 0.0)),
            PointCharge::new(1.0e-9, R2::new(2.0, 0.0)),
        ])
        .unwrap();
        let mut tracing = LineTracing::new(view());
        tracing.seeds_per_charge = 6;
        assert_eq!(trace_system(&system, &tracing).len(), 12);
    }

    #[test]
    fn trace_system_skips_structure_members() {
        let system = System::new(vec![
            Arc::new(PointCharge::new(1.0e-9, R2::new(-3.0, 0.0))) as SharedCharge,
            Arc::new(Structure::circle("ring", -1.0e-9, R2::new(2.0, 0.0), 1.0, 100).unwrap()),
        ])
        .unwrap();
        let mut tracing = LineTracing::new(view());
        tracing.seeds_per_charge = 4;
        assert_eq!(trace_system(&system, &tracing).len(), 4);
    }

    #[test]
    fn step_limit_truncates_line() {
        let q = PointCharge::new(1.0e-9, R2::zeros());
        let mut tracing = LineTracing::new(view());
        tracing.max_steps = 3;
        let line = trace_field_line(&q, R2::new(1.0, 1.0), &tracing);
        assert!(line.truncated);
        // three vertices per half, sharing the seed
        assert_eq!(line.len(), 5);
    }

    #[test]
    fn weak_field_stops_at_seed() {
        let q = PointCharge::new(1.0e-9, R2::zeros());
        let mut tracing = LineTracing::new(view());
        tracing.min_field = 1.0e9;
        let line = trace_field_line(&q, R2::new(2.0, 0.0), &tracing);
        assert!(!line.truncated);
        assert_eq!(line.points, vec![R2::new(2.0, 0.0)]);
    }
}

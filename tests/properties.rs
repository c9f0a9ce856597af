use std::sync::Arc;

use approx::assert_relative_eq;

use charge_field::constants::{COULOMB_CONSTANT, ELEMENTARY_CHARGE};
use charge_field::fields::{
    circle_charges, segment_charges, Charge, PointCharge, SharedCharge, Structure,
};
use charge_field::math::{R2, Scalar};
use charge_field::system::System;

/// Query points away from every charge used below.
fn query_points() -> Vec<R2> {
    vec![
        R2::new(0.3, 0.7),
        R2::new(-4.0, 2.5),
        R2::new(10.0, -10.0),
        R2::new(0.0, -0.25),
        R2::new(1.0e-3, 2.0e-3),
    ]
}

fn assert_vec_close(a: R2, b: R2) {
    let scale = a.norm().max(b.norm());
    assert!(
        (a - b).norm() <= 1.0e-12 * scale,
        "vectors differ: {a:?} vs {b:?}"
    );
}

/// Totals may cancel, so tolerances scale with the summed magnitudes of the parts.
fn assert_total_close(system: &System, p: R2, field: R2, potential: Scalar) {
    let field_scale: Scalar = system.fields(p).map(|e| e.norm()).sum();
    let potential_scale: Scalar = system.potentials(p).map(Scalar::abs).sum();
    assert!(
        (system.field(p) - field).norm() <= 1.0e-12 * field_scale,
        "field at {p:?}: {:?} vs {field:?}",
        system.field(p)
    );
    assert!(
        (system.potential(p) - potential).abs() <= 1.0e-12 * potential_scale,
        "potential at {p:?}: {} vs {potential}",
        system.potential(p)
    );
}

fn charge_set_a() -> Vec<SharedCharge> {
    vec![
        Arc::new(PointCharge::new(2.0e-9, R2::new(1.0, 1.0))) as SharedCharge,
        Arc::new(PointCharge::new(-1.0e-9, R2::new(-2.0, 0.5))),
        Arc::new(Structure::circle("ring", 3.0e-9, R2::new(4.0, 4.0), 1.5, 24).unwrap()),
    ]
}

fn charge_set_b() -> Vec<SharedCharge> {
    vec![
        Arc::new(PointCharge::new(5.0e-10, R2::new(-3.0, -3.0))) as SharedCharge,
        Arc::new(
            Structure::segment("rod", -4.0e-9, R2::new(-1.0, 5.0), R2::new(3.0, 6.0), 10).unwrap(),
        ),
    ]
}

#[test]
fn superposition_is_linear() {
    let a = System::new(charge_set_a()).unwrap();
    let b = System::new(charge_set_b()).unwrap();
    let merged = a.merge(&b);
    for p in query_points() {
        assert_total_close(&merged, p, a.field(p) + b.field(p), a.potential(p) + b.potential(p));
    }
}

#[test]
fn charge_order_does_not_matter() {
    let mut charges = charge_set_a();
    charges.extend(charge_set_b());
    let forward = System::new(charges.clone()).unwrap();

    charges.reverse();
    charges.swap(0, 2);
    let shuffled = System::new(charges).unwrap();

    for p in query_points() {
        assert_total_close(&forward, p, shuffled.field(p), shuffled.potential(p));
    }
}

#[test]
fn discretisation_conserves_charge() {
    let total = -7.3e-9;
    for n in [2, 3, 10, 100] {
        let segment: Scalar = segment_charges(total, R2::new(0.0, 0.0), R2::new(2.0, 1.0), n)
            .unwrap()
            .iter()
            .map(|c| c.charge)
            .sum();
        let circle: Scalar = circle_charges(total, R2::new(1.0, 1.0), 0.5, n)
            .unwrap()
            .iter()
            .map(|c| c.charge)
            .sum();
        assert_relative_eq!(segment, total, max_relative = 1.0e-12);
        assert_relative_eq!(circle, total, max_relative = 1.0e-12);

        let structure = Structure::segment("rod", total, R2::zeros(), R2::new(0.0, 3.0), n).unwrap();
        assert_eq!(structure.len(), n);
        assert_relative_eq!(structure.net_charge(), total, max_relative = 1.0e-12);
    }
}

#[test]
fn coincident_point_gives_zero() {
    for q in [1.0, -1.0, 1.0e-19, -4.2e6] {
        let position = R2::new(3.5, -1.25);
        let charge = PointCharge::new(q, position);
        assert_eq!(charge.field(position), R2::zeros());
        assert_eq!(charge.potential(position), 0.0);
    }
}

#[test]
fn symmetric_dipole_has_zero_potential_at_midpoint() {
    for d in [0.5, 1.0, 3.0] {
        let system = System::from_charges([
            PointCharge::new(2.0e-9, R2::new(-d, 0.0)),
            PointCharge::new(-2.0e-9, R2::new(d, 0.0)),
        ])
        .unwrap();
        assert_eq!(system.potential(R2::zeros()), 0.0);
        let e = system.field(R2::zeros());
        assert!(e.x > 0.0);
        assert_eq!(e.y, 0.0);
    }
}

#[test]
fn single_charge_matches_closed_form() {
    let q = PointCharge::new(1.0, R2::zeros());
    let p = R2::new(3.0, 4.0);
    assert_relative_eq!(q.potential(p), COULOMB_CONSTANT / 5.0, max_relative = 1.0e-12);

    let e = q.field(p);
    assert_relative_eq!(e.norm(), COULOMB_CONSTANT / 25.0, max_relative = 1.0e-12);
    let unit = e / e.norm();
    assert_relative_eq!(unit.x, 0.6, max_relative = 1.0e-12);
    assert_relative_eq!(unit.y, 0.8, max_relative = 1.0e-12);
}

#[test]
fn single_member_structure_matches_bare_charge() {
    let bare = PointCharge::new(-3.0e-9, R2::new(0.5, -1.5));
    let at_origin =
        Structure::new("single", R2::zeros(), vec![Arc::new(bare) as SharedCharge]).unwrap();
    let shifted = Structure::from_point_charges("shifted", R2::new(2.0, 3.0), [bare]).unwrap();

    for p in query_points() {
        for structure in [&at_origin, &shifted] {
            assert_vec_close(structure.field(p), bare.field(p));
            assert_relative_eq!(structure.potential(p), bare.potential(p), max_relative = 1.0e-12);
        }
    }
}

#[test]
fn elementary_charge_end_to_end() {
    let system =
        System::from_charges([PointCharge::new(ELEMENTARY_CHARGE, R2::new(5.0, 5.0))]).unwrap();
    let v = system.potential(R2::new(5.0, 5.0 + 0.1));
    assert_relative_eq!(v, 8.987_551_792_3e9 * 1.602_176_634e-19 / 0.1, max_relative = 1.0e-6);
    assert_relative_eq!(v, 1.44e-8, max_relative = 1.0e-3);
}

#[test]
fn construction_errors_fail_fast() {
    assert!(System::new(Vec::new()).is_err());
    assert!(segment_charges(1.0, R2::zeros(), R2::new(1.0, 0.0), 0).is_err());
    assert!(circle_charges(1.0, R2::zeros(), -1.0, 10).is_err());
    assert!(Structure::polygon("flat", 1.0, &[R2::zeros(), R2::new(1.0, 0.0)], 10).is_err());
}

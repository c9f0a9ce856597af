use std::sync::Arc;

use crate::math::{R2, Scalar};

/// Trait implemented by every electric charge source.
///
/// A point charge and a structure of many point charges answer the same two
/// queries, so structures can hold other structures and a
/// [`System`](crate::system::System) never needs to know which kind it holds.
pub trait Charge: Send + Sync {
    /// Electric field in newtons per coulomb (N/C) at `point`.
    fn field(&self, point: R2) -> R2;

    /// Electric potential in volts (V) at `point`.
    fn potential(&self, point: R2) -> Scalar;

    /// Total charge carried by the source in coulombs (C).
    fn net_charge(&self) -> Scalar;

    /// Absolute positions of the point charges making up the source.
    ///
    /// Used to seed and terminate field lines; empty by default.
    fn source_points(&self) -> Vec<R2> {
        Vec::new()
    }
}

/// Reference-counted charge handle shared between systems and structures.
pub type SharedCharge = Arc<dyn Charge>;

impl<C: Charge + ?Sized> Charge for Arc<C> {
    fn field(&self, point: R2) -> R2 {
        (**self).field(point)
    }

    fn potential(&self, point: R2) -> Scalar {
        (**self).potential(point)
    }

    fn net_charge(&self) -> Scalar {
        (**self).net_charge()
    }

    fn source_points(&self) -> Vec<R2> {
        (**self).source_points()
    }
}

impl<C: Charge + ?Sized> Charge for Box<C> {
    fn field(&self, point: R2) -> R2 {
        (**self).field(point)
    }

    fn potential(&self, point: R2) -> Scalar {
        (**self).potential(point)
    }

    fn net_charge(&self) -> Scalar {
        (**self).net_charge()
    }

    fn source_points(&self) -> Vec<R2> {
        (**self).source_points()
    }
}

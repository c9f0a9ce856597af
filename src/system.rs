//! Superposition of heterogeneous charge sources.

use std::sync::Arc;

use tracing::debug;

use crate::errors::{ChargeFieldError, Result};
use crate::fields::{Charge, FieldSample, SharedCharge};
use crate::math::{R2, Scalar};

/// Ordered collection of charges whose contributions add linearly.
///
/// Order never changes [`field`](Self::field) or [`potential`](Self::potential);
/// it only fixes the order of the per-charge breakdowns.
#[derive(Clone)]
pub struct System {
    charges: Vec<SharedCharge>,
}

impl System {
    /// Creates a system from a non-empty list of charges.
    pub fn new(charges: Vec<SharedCharge>) -> Result<Self> {
        if charges.is_empty() {
            return Err(ChargeFieldError::invalid("a system needs at least one charge"));
        }
        debug!(charges = charges.len(), "built charge system");
        Ok(Self { charges })
    }

    /// Creates a system from charges of a single concrete type.
    pub fn from_charges<C, I>(charges: I) -> Result<Self>
    where
        C: Charge + 'static,
        I: IntoIterator<Item = C>,
    {
        Self::new(
            charges
                .into_iter()
                .map(|c| Arc::new(c) as SharedCharge)
                .collect(),
        )
    }

    /// Appends a charge.
    pub fn push<C>(&mut self, charge: C)
    where
        C: Charge + 'static,
    {
        self.charges.push(Arc::new(charge));
    }

    /// Appends an already shared charge.
    pub fn push_shared(&mut self, charge: SharedCharge) {
        self.charges.push(charge);
    }

    /// Builder-style [`push`](Self::push).
    #[must_use]
    pub fn with_charge<C>(mut self, charge: C) -> Self
    where
        C: Charge + 'static,
    {
        self.push(charge);
        self
    }

    /// New system holding the charges of `self` followed by those of `other`.
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        let mut charges = Vec::with_capacity(self.charges.len() + other.charges.len());
        charges.extend(self.charges.iter().cloned());
        charges.extend(other.charges.iter().cloned());
        Self { charges }
    }

    /// Total electric field at `point` in N/C.
    #[must_use]
    pub fn field(&self, point: R2) -> R2 {
        self.charges
            .iter()
            .fold(R2::zeros(), |acc, charge| acc + charge.field(point))
    }

    /// Total electric potential at `point` in volts.
    #[must_use]
    pub fn potential(&self, point: R2) -> Scalar {
        self.charges
            .iter()
            .fold(0.0, |acc, charge| acc + charge.potential(point))
    }

    /// Field contributed by each charge at `point`, in system order.
    pub fn fields(&self, point: R2) -> impl Iterator<Item = R2> + '_ {
        self.charges.iter().map(move |charge| charge.field(point))
    }

    /// Potential contributed by each charge at `point`, in system order.
    pub fn potentials(&self, point: R2) -> impl Iterator<Item = Scalar> + '_ {
        self.charges.iter().map(move |charge| charge.potential(point))
    }

    /// Field and potential at `point`.
    #[must_use]
    pub fn sample(&self, point: R2) -> FieldSample {
        FieldSample {
            position: point,
            field: self.field(point),
            potential: self.potential(point),
        }
    }

    /// Sum of the charges carried by every member, in coulombs.
    #[must_use]
    pub fn net_charge(&self) -> Scalar {
        self.charges.iter().map(|c| c.net_charge()).sum()
    }

    /// Absolute positions of every point charge in the system.
    #[must_use]
    pub fn source_points(&self) -> Vec<R2> {
        self.charges.iter().flat_map(|c| c.source_points()).collect()
    }

    /// Members in system order.
    #[must_use]
    pub fn charges(&self) -> &[SharedCharge] {
        &self.charges
    }

    /// Number of top-level charges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.charges.len()
    }

    /// Always false for a constructed system.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.charges.is_empty()
    }
}

impl Charge for System {
    fn field(&self, point: R2) -> R2 {
        Self::field(self, point)
    }

    fn potential(&self, point: R2) -> Scalar {
        Self::potential(self, point)
    }

    fn net_charge(&self) -> Scalar {
        Self::net_charge(self)
    }

    fn source_points(&self) -> Vec<R2> {
        Self::source_points(self)
    }
}

impl std::fmt::Debug for System {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("System")
            .field("charges", &self.charges.len())
            .field("net_charge", &self.net_charge())
            .finish()
    }
}

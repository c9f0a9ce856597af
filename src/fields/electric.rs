use crate::math::{direction, R2, Scalar};

/// Electric field descriptor capturing amplitude and orientation at one point.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElectricField {
    /// Field vector in newtons per coulomb (N/C).
    pub vector: R2,
    /// Magnitude in N/C.
    pub magnitude: Scalar,
    /// Unit direction vector; zero when the field vanishes.
    pub direction: R2,
    /// Direction angle in `[0, 2π)`; zero when the field vanishes.
    pub angle: Scalar,
}

impl ElectricField {
    /// Constructs a descriptor from a field vector.
    #[must_use]
    pub fn from_vector(vector: R2) -> Self {
        let magnitude = vector.norm();
        let unit = if magnitude == 0.0 {
            R2::zeros()
        } else {
            vector / magnitude
        };

        Self {
            vector,
            magnitude,
            direction: unit,
            angle: direction(&R2::zeros(), &vector),
        }
    }

    /// True when the field is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.magnitude == 0.0
    }
}

/// Field and potential sampled together at one point.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSample {
    /// Query point in meters.
    pub position: R2,
    /// Electric field in N/C.
    pub field: R2,
    /// Electric potential in volts.
    pub potential: Scalar,
}

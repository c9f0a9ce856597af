//! Time stepping of free charged particles.
//!
//! Particles are point charges with a mass and a velocity. Each one moves
//! under the Coulomb field of every other particle plus an optional fixed
//! background [`System`].

use std::io::{self, Write};

use tracing::{debug, info};

use crate::fields::{Charge, PointCharge};
use crate::math::{R2, Scalar};
use crate::system::System;

/// Explicit integrators for particle motion.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeIntegrator {
    /// First-order explicit Euler: positions advance with the old velocities,
    /// velocities with the old accelerations.
    ExplicitEuler,
    /// Second-order kick-drift-kick leapfrog.
    #[default]
    Leapfrog,
}

/// Metadata describing a particle run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Human-readable identifier.
    pub name: String,
    /// Total simulated time in seconds.
    pub duration: Option<Scalar>,
    /// Integration step in seconds.
    pub time_step: Option<Scalar>,
    /// Integrator used for every step.
    #[cfg_attr(feature = "serde", serde(default))]
    pub integrator: TimeIntegrator,
}

impl SimulationConfig {
    /// Creates a configuration running for `duration` seconds in steps of `time_step`.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        duration: Scalar,
        time_step: Scalar,
        integrator: TimeIntegrator,
    ) -> Self {
        Self {
            name: name.into(),
            duration: Some(duration),
            time_step: Some(time_step),
            integrator,
        }
    }
}

/// Trait for simulation engines.
pub trait SimulationEngine {
    /// Executes the simulation using the provided configuration.
    fn run(&mut self, config: &SimulationConfig) -> Result<(), SimulationError>;
}

/// Errors that can occur while configuring or executing simulations.
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    /// Raised when a required parameter is missing.
    #[error("missing parameter: {0}")]
    MissingParameter(&'static str),
    /// Raised when the configuration is internally inconsistent.
    #[error("configuration error: {0}")]
    InvalidConfig(String),
}

/// Charged particle free to move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Charge and current position.
    pub charge: PointCharge,
    /// Mass in kilograms.
    pub mass: Scalar,
    /// Velocity in meters per second.
    pub velocity: R2,
}

impl Particle {
    /// Creates a particle; the mass must be positive and finite.
    pub fn new(charge: PointCharge, mass: Scalar, velocity: R2) -> Result<Self, SimulationError> {
        let particle = Self {
            charge,
            mass,
            velocity,
        };
        particle.validate()?;
        Ok(particle)
    }

    /// Current position in meters.
    #[must_use]
    pub const fn position(&self) -> R2 {
        self.charge.position
    }

    /// Linear momentum `m v`.
    #[must_use]
    pub fn momentum(&self) -> R2 {
        self.velocity * self.mass
    }

    fn validate(&self) -> Result<(), SimulationError> {
        if !(self.mass.is_finite() && self.mass > 0.0) {
            return Err(SimulationError::InvalidConfig(format!(
                "particle mass must be positive and finite, got {}",
                self.mass
            )));
        }
        Ok(())
    }
}

/// Set of interacting particles and the simulated time.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    time: Scalar,
}

impl ParticleSystem {
    /// Creates a system at time zero from a non-empty list of particles.
    pub fn new(particles: Vec<Particle>) -> Result<Self, SimulationError> {
        if particles.is_empty() {
            return Err(SimulationError::InvalidConfig(
                "a particle system needs at least one particle".into(),
            ));
        }
        for p in &particles {
            p.validate()?;
        }
        Ok(Self {
            particles,
            time: 0.0,
        })
    }

    /// Particles in insertion order.
    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Simulated time in seconds.
    #[must_use]
    pub const fn time(&self) -> Scalar {
        self.time
    }

    /// Current particle positions.
    #[must_use]
    pub fn positions(&self) -> Vec<R2> {
        self.particles.iter().map(Particle::position).collect()
    }

    /// Sum of the particle momenta.
    #[must_use]
    pub fn total_momentum(&self) -> R2 {
        self.particles
            .iter()
            .fold(R2::zeros(), |acc, p| acc + p.momentum())
    }

    /// Acceleration `q E / m` of every particle.
    ///
    /// A particle never feels its own field.
    #[must_use]
    pub fn accelerations(&self, background: Option<&System>) -> Vec<R2> {
        self.particles
            .iter()
            .enumerate()
            .map(|(i, particle)| {
                let x = particle.position();
                let mut e = background.map_or_else(R2::zeros, |s| s.field(x));
                for (j, other) in self.particles.iter().enumerate() {
                    if i != j {
                        e += other.charge.field(x);
                    }
                }
                e * (particle.charge.charge / particle.mass)
            })
            .collect()
    }

    /// Advances every particle by `dt` seconds.
    pub fn step(&mut self, dt: Scalar, integrator: TimeIntegrator, background: Option<&System>) {
        let accelerations = self.accelerations(background);
        match integrator {
            TimeIntegrator::ExplicitEuler => {
                for (p, a) in self.particles.iter_mut().zip(&accelerations) {
                    p.charge.position += p.velocity * dt;
                    p.velocity += a * dt;
                }
            }
            TimeIntegrator::Leapfrog => {
                let half = 0.5 * dt;
                for (p, a) in self.particles.iter_mut().zip(&accelerations) {
                    p.velocity += a * half;
                    p.charge.position += p.velocity * dt;
                }
                let accelerations = self.accelerations(background);
                for (p, a) in self.particles.iter_mut().zip(&accelerations) {
                    p.velocity += a * half;
                }
            }
        }
        self.time += dt;
    }
}

/// Positions captured after every step of a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trajectory {
    /// Sample times in seconds, starting at the initial state.
    pub times: Vec<Scalar>,
    /// Particle positions per sample.
    pub positions: Vec<Vec<R2>>,
}

impl Trajectory {
    /// Total captured samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// True if no samples recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    fn record(&mut self, system: &ParticleSystem) {
        self.times.push(system.time());
        self.positions.push(system.positions());
    }
}

/// Engine stepping a [`ParticleSystem`] through a fixed background.
#[derive(Debug, Clone)]
pub struct ParticleEngine {
    system: ParticleSystem,
    background: Option<System>,
    trajectory: Trajectory,
}

impl ParticleEngine {
    /// Creates an engine for `system` with no background field.
    #[must_use]
    pub fn new(system: ParticleSystem) -> Self {
        Self {
            system,
            background: None,
            trajectory: Trajectory::default(),
        }
    }

    /// Adds a fixed background of charges that act on the particles.
    #[must_use]
    pub fn with_background(mut self, background: System) -> Self {
        self.background = Some(background);
        self
    }

    /// The particles in their current state.
    #[must_use]
    pub const fn system(&self) -> &ParticleSystem {
        &self.system
    }

    /// Returns a reference to the captured trajectory (populated after `run`).
    #[must_use]
    pub const fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    /// Consumes and returns the trajectory.
    #[must_use]
    pub fn into_trajectory(self) -> Trajectory {
        self.trajectory
    }
}

impl SimulationEngine for ParticleEngine {
    fn run(&mut self, config: &SimulationConfig) -> Result<(), SimulationError> {
        let duration = config
            .duration
            .ok_or(SimulationError::MissingParameter("duration"))?;
        let dt = config
            .time_step
            .ok_or(SimulationError::MissingParameter("time_step"))?;
        if !(dt.is_finite() && dt > 0.0) {
            return Err(SimulationError::InvalidConfig("time_step must be > 0".into()));
        }
        if !(duration.is_finite() && duration >= 0.0) {
            return Err(SimulationError::InvalidConfig("duration must be >= 0".into()));
        }

        // the epsilon absorbs rounding in `duration / dt`; a shorter tail is dropped
        let steps = (duration / dt + 1.0e-9).floor() as usize;
        info!(
            name = %config.name,
            particles = self.system.particles().len(),
            steps,
            integrator = ?config.integrator,
            "running particle simulation"
        );

        self.trajectory = Trajectory::default();
        self.trajectory.record(&self.system);
        for _ in 0..steps {
            self.system
                .step(dt, config.integrator, self.background.as_ref());
            self.trajectory.record(&self.system);
        }
        debug!(samples = self.trajectory.len(), "particle simulation finished");
        Ok(())
    }
}

/// Writes a CSV of one particle's position over time.
pub fn write_trajectory_csv<W: Write>(
    mut w: W,
    trajectory: &Trajectory,
    particle_index: usize,
) -> io::Result<()> {
    writeln!(w, "time,x,y")?;
    for (time, positions) in trajectory.times.iter().zip(&trajectory.positions) {
        let p = positions.get(particle_index).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("no particle at index {particle_index}"),
            )
        })?;
        writeln!(w, "{:.16e},{:.16e},{:.16e}", time, p.x, p.y)?;
    }
    Ok(())
}

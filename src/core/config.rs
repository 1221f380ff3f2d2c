use crate::error::PhysicsError;
use crate::math::Vector3;
use crate::Result;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// How a paired collision treats a static partner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum StaticResponse {
    /// Reflect the dynamic body's normal velocity using its own elasticity
    #[default]
    Reflect,

    /// Treat the static body as infinite mass in the shared impulse,
    /// which uses the averaged elasticity of both bodies
    Impulse,
}

/// Configuration parameters for the physics simulation
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct SimulationConfig {
    /// The fixed time step for the simulation
    pub fixed_time_step: f32,

    /// Upper bound on the steps run by a single `advance` call.
    /// Time that does not fit stays in the accumulator.
    pub max_substeps: Option<u32>,

    /// Gravitational acceleration, applied as `gravity * mass`
    pub gravity: Vector3,

    /// Force added to every dynamic body by `apply_global_force`
    pub global_force: Vector3,

    /// Collision response against static bodies in sphere and box pairs
    pub static_response: StaticResponse,

    /// Half size of the quad used to draw infinite planes
    pub plane_render_extent: f32,
}

impl SimulationConfig {
    /// Checks the configuration for values the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        if !(self.fixed_time_step > 0.0 && self.fixed_time_step.is_finite()) {
            return Err(PhysicsError::InvalidParameter(format!(
                "fixed time step must be positive and finite, got {}",
                self.fixed_time_step
            )));
        }

        if self.max_substeps == Some(0) {
            return Err(PhysicsError::InvalidParameter(
                "max substeps must allow at least one step".to_string(),
            ));
        }

        if !self.gravity.is_finite() || !self.global_force.is_finite() {
            return Err(PhysicsError::InvalidParameter(
                "gravity and global force must be finite".to_string(),
            ));
        }

        if !(self.plane_render_extent > 0.0 && self.plane_render_extent.is_finite()) {
            return Err(PhysicsError::InvalidParameter(format!(
                "plane render extent must be positive and finite, got {}",
                self.plane_render_extent
            )));
        }

        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            fixed_time_step: 0.01, // 100 steps per second
            max_substeps: None,
            gravity: Vector3::new(0.0, -9.8, 0.0),
            global_force: Vector3::zero(),
            static_response: StaticResponse::default(),
            plane_render_extent: 100.0,
        }
    }
}

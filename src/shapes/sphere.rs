use crate::error::PhysicsError;
use crate::math::{Vector3, Aabb};
use crate::Result;

/// A spherical collision shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    /// The radius of the sphere
    radius: f32,
}

impl Sphere {
    /// Creates a new sphere with the given radius.
    ///
    /// Fails if the radius is not a positive finite number.
    pub fn new(radius: f32) -> Result<Self> {
        validate_radius(radius)?;
        Ok(Self { radius })
    }

    /// Returns the radius of the sphere
    pub fn get_radius(&self) -> f32 {
        self.radius
    }

    /// Sets the radius of the sphere
    pub fn set_radius(&mut self, radius: f32) -> Result<()> {
        validate_radius(radius)?;
        self.radius = radius;
        Ok(())
    }

    /// Bounding box of the sphere centered at `position`
    pub fn world_bounds(&self, position: Vector3) -> Aabb {
        Aabb::from_center_half_extents(
            position,
            Vector3::new(self.radius, self.radius, self.radius),
        )
    }
}

fn validate_radius(radius: f32) -> Result<()> {
    if radius > 0.0 && radius.is_finite() {
        Ok(())
    } else {
        Err(PhysicsError::InvalidParameter(format!(
            "sphere radius must be positive and finite, got {}",
            radius
        )))
    }
}

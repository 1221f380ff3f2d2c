use crate::error::PhysicsError;
use crate::math::{Vector3, Aabb};
use crate::Result;

/// An axis-aligned box collision shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxShape {
    /// Half the size of the box along each axis
    half_extents: Vector3,
}

impl BoxShape {
    /// Creates a new box with the given half extents.
    ///
    /// Every component must be positive and finite.
    pub fn new(half_extents: Vector3) -> Result<Self> {
        validate_extents(half_extents)?;
        Ok(Self { half_extents })
    }

    /// Creates a new box with the given full dimensions
    pub fn new_with_dimensions(width: f32, height: f32, depth: f32) -> Result<Self> {
        Self::new(Vector3::new(width * 0.5, height * 0.5, depth * 0.5))
    }

    /// Returns the half extents of the box
    pub fn get_half_extents(&self) -> Vector3 {
        self.half_extents
    }

    /// Sets the half extents of the box
    pub fn set_half_extents(&mut self, half_extents: Vector3) -> Result<()> {
        validate_extents(half_extents)?;
        self.half_extents = half_extents;
        Ok(())
    }

    /// World space bounds of the box centered at `position`
    pub fn world_bounds(&self, position: Vector3) -> Aabb {
        Aabb::from_center_half_extents(position, self.half_extents)
    }

    /// Extent of the box projected onto `direction`, which should be unit length
    pub fn projected_extent(&self, direction: Vector3) -> f32 {
        self.half_extents.component_mul(&direction.abs()).dot(&Vector3::one())
    }
}

fn validate_extents(half_extents: Vector3) -> Result<()> {
    let valid = [half_extents.x, half_extents.y, half_extents.z]
        .iter()
        .all(|e| *e > 0.0 && e.is_finite());

    if valid {
        Ok(())
    } else {
        Err(PhysicsError::InvalidParameter(format!(
            "box half extents must be positive and finite, got {}",
            half_extents
        )))
    }
}

use crate::error::PhysicsError;
use crate::math::Vector3;
use crate::Result;

/// An infinite plane collision shape defined by a normal and distance from origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// The normal vector of the plane (always normalized)
    normal: Vector3,

    /// The signed distance from the origin to the plane along the normal
    distance: f32,
}

impl Plane {
    /// Creates a new plane with the given normal and distance.
    ///
    /// The normal is normalized; a zero or non-finite normal is rejected.
    pub fn new(normal: Vector3, distance: f32) -> Result<Self> {
        if !distance.is_finite() {
            return Err(PhysicsError::InvalidParameter(format!(
                "plane distance must be finite, got {}",
                distance
            )));
        }

        Ok(Self {
            normal: unit_normal(normal)?,
            distance,
        })
    }

    /// Returns the normal of the plane
    pub fn get_normal(&self) -> Vector3 {
        self.normal
    }

    /// Returns the distance of the plane from the origin
    pub fn get_distance(&self) -> f32 {
        self.distance
    }

    /// Sets the normal of the plane (will be normalized)
    pub fn set_normal(&mut self, normal: Vector3) -> Result<()> {
        self.normal = unit_normal(normal)?;
        Ok(())
    }

    /// The point of the plane closest to the origin, `normal * distance`
    pub fn origin(&self) -> Vector3 {
        self.normal * self.distance
    }

    /// Returns the signed distance from a point to the plane
    pub fn signed_distance_to(&self, point: Vector3) -> f32 {
        self.normal.dot(&point) - self.distance
    }
}

fn unit_normal(normal: Vector3) -> Result<Vector3> {
    normal.try_normalize().ok_or_else(|| {
        PhysicsError::InvalidParameter(format!("plane normal {} has no direction", normal))
    })
}

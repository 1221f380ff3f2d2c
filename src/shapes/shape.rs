use crate::math::{Vector3, Aabb};
use crate::shapes::{Sphere, Plane, BoxShape};

/// Tag identifying which kind of shape a body carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeType {
    Sphere,
    Plane,
    Box,
}

/// Collision shape of a body.
///
/// The set of shapes is closed: collision dispatch matches on this enum
/// exhaustively, so a new variant has to be handled at every pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Sphere(Sphere),
    Plane(Plane),
    Box(BoxShape),
}

impl Shape {
    /// Returns the tag of this shape
    pub fn shape_type(&self) -> ShapeType {
        match self {
            Shape::Sphere(_) => ShapeType::Sphere,
            Shape::Plane(_) => ShapeType::Plane,
            Shape::Box(_) => ShapeType::Box,
        }
    }

    /// World space bounds of the shape at `position`.
    /// Infinite planes have no bounds.
    pub fn world_bounds(&self, position: Vector3) -> Option<Aabb> {
        match self {
            Shape::Sphere(sphere) => Some(sphere.world_bounds(position)),
            Shape::Box(cuboid) => Some(cuboid.world_bounds(position)),
            Shape::Plane(_) => None,
        }
    }

    pub fn as_sphere(&self) -> Option<&Sphere> {
        match self {
            Shape::Sphere(sphere) => Some(sphere),
            _ => None,
        }
    }

    pub fn as_plane(&self) -> Option<&Plane> {
        match self {
            Shape::Plane(plane) => Some(plane),
            _ => None,
        }
    }

    pub fn as_box(&self) -> Option<&BoxShape> {
        match self {
            Shape::Box(cuboid) => Some(cuboid),
            _ => None,
        }
    }
}

impl From<Sphere> for Shape {
    fn from(sphere: Sphere) -> Self {
        Shape::Sphere(sphere)
    }
}

impl From<Plane> for Shape {
    fn from(plane: Plane) -> Self {
        Shape::Plane(plane)
    }
}

impl From<BoxShape> for Shape {
    fn from(cuboid: BoxShape) -> Self {
        Shape::Box(cuboid)
    }
}

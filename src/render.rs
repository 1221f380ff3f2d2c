//! Read-only description of the world for the host renderer.
//!
//! The simulation never draws anything. The host asks the world for its
//! renderables each frame and turns them into primitives however it likes.

use nalgebra as na;

use crate::bodies::RigidBody;
use crate::math::{Vector3, Vector4};
use crate::shapes::{Shape, ShapeType};

/// Colour used for constraint lines
pub const CONSTRAINT_COLOR: Vector4 = Vector4::one();

/// Geometry of a single drawable primitive
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    /// A sphere
    Sphere { center: Vector3, radius: f32 },

    /// A finite quad standing in for an infinite plane.
    /// Corners are in winding order around `center`.
    Plane { center: Vector3, normal: Vector3, corners: [Vector3; 4] },

    /// An axis-aligned box
    Box { center: Vector3, half_extents: Vector3 },

    /// A line segment, used for springs
    Line { start: Vector3, end: Vector3 },
}

/// A primitive the host should draw this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Renderable {
    pub geometry: Geometry,
    pub color: Vector4,
}

impl Renderable {
    /// Describes a body. `plane_extent` is the half size of plane quads.
    pub fn from_body(body: &RigidBody, plane_extent: f32) -> Self {
        let center = body.get_position();

        let geometry = match body.get_shape() {
            Shape::Sphere(sphere) => Geometry::Sphere {
                center,
                radius: sphere.get_radius(),
            },
            Shape::Plane(plane) => Geometry::Plane {
                center: plane.origin(),
                normal: plane.get_normal(),
                corners: plane_corners(plane.origin(), plane.get_normal(), plane_extent),
            },
            Shape::Box(cuboid) => Geometry::Box {
                center,
                half_extents: cuboid.get_half_extents(),
            },
        };

        Self {
            geometry,
            color: body.get_color(),
        }
    }

    /// A constraint line between two points
    pub fn line(start: Vector3, end: Vector3) -> Self {
        Self {
            geometry: Geometry::Line { start, end },
            color: CONSTRAINT_COLOR,
        }
    }

    /// Shape tag of the primitive, `None` for lines
    pub fn shape_type(&self) -> Option<ShapeType> {
        match self.geometry {
            Geometry::Sphere { .. } => Some(ShapeType::Sphere),
            Geometry::Plane { .. } => Some(ShapeType::Plane),
            Geometry::Box { .. } => Some(ShapeType::Box),
            Geometry::Line { .. } => None,
        }
    }
}

/// Corners of a square of half size `extent` lying in the plane.
///
/// The square is built in the XZ plane and rotated so +Y maps onto `normal`.
fn plane_corners(center: Vector3, normal: Vector3, extent: f32) -> [Vector3; 4] {
    let rotation = na::Rotation3::rotation_between(&na::Vector3::y(), &normal.to_nalgebra())
        // rotation_between has no answer for opposite vectors
        .unwrap_or_else(|| na::Rotation3::from_axis_angle(&na::Vector3::x_axis(), std::f32::consts::PI));

    [(extent, extent), (extent, -extent), (-extent, -extent), (-extent, extent)]
        .map(|(x, z)| center + Vector3::from_nalgebra(&(rotation * na::Vector3::new(x, 0.0, z))))
}

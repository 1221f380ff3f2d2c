//! Pairwise overlap tests, dispatched on the shapes of the two bodies.
//!
//! Every test here is pure: it reads positions and extents and reports
//! how the bodies overlap, leaving all mutation to the contact solver.

use crate::bodies::RigidBody;
use crate::collision::Contact;
use crate::core::BodyHandle;
use crate::math::{Vector3, EPSILON};
use crate::shapes::{Shape, ShapeType, Plane, BoxShape};

/// Normal used when two centres coincide and no direction can be derived
pub const FALLBACK_NORMAL: Vector3 = Vector3::unit_y();

/// How two shapes overlap
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Penetration {
    /// Unit normal pointing from the first shape toward the second
    pub normal: Vector3,

    /// Overlap depth along `normal`
    pub depth: f32,
}

/// Tests two bodies for overlap and builds a contact.
///
/// Returns `None` if either body has collisions disabled, if both are
/// static, or if the shapes do not overlap. A plane is always placed first.
pub fn collide(
    handle_a: BodyHandle,
    body_a: &RigidBody,
    handle_b: BodyHandle,
    body_b: &RigidBody,
) -> Option<Contact> {
    if !body_a.is_collidable() || !body_b.is_collidable() {
        return None;
    }

    if body_a.is_static() && body_b.is_static() {
        return None;
    }

    let swap = body_b.get_shape_type() == ShapeType::Plane
        && body_a.get_shape_type() != ShapeType::Plane;

    let (handle_a, body_a, handle_b, body_b) = if swap {
        (handle_b, body_b, handle_a, body_a)
    } else {
        (handle_a, body_a, handle_b, body_b)
    };

    let penetration = penetration(body_a, body_b)?;

    Some(Contact {
        body_a: handle_a,
        body_b: handle_b,
        shapes: (body_a.get_shape_type(), body_b.get_shape_type()),
        normal: penetration.normal,
        penetration: penetration.depth,
    })
}

/// Measures the overlap of two bodies in their current state, with the
/// normal pointing from `body_a` toward `body_b`.
///
/// Sphere–box pairs are not supported and never overlap, and neither do
/// two planes.
pub fn penetration(body_a: &RigidBody, body_b: &RigidBody) -> Option<Penetration> {
    let pos_a = body_a.get_position();
    let pos_b = body_b.get_position();

    match (body_a.get_shape(), body_b.get_shape()) {
        (Shape::Sphere(a), Shape::Sphere(b)) => {
            sphere_sphere(pos_a, a.get_radius(), pos_b, b.get_radius())
        }
        (Shape::Plane(plane), Shape::Sphere(sphere)) => {
            plane_sphere(plane, pos_b, sphere.get_radius())
        }
        (Shape::Sphere(sphere), Shape::Plane(plane)) => {
            plane_sphere(plane, pos_a, sphere.get_radius()).map(flip)
        }
        (Shape::Plane(plane), Shape::Box(cuboid)) => plane_box(plane, pos_b, cuboid),
        (Shape::Box(cuboid), Shape::Plane(plane)) => plane_box(plane, pos_a, cuboid).map(flip),
        (Shape::Box(a), Shape::Box(b)) => box_box(pos_a, a, pos_b, b),
        // Known gap: spheres and boxes pass through each other.
        (Shape::Sphere(_), Shape::Box(_)) | (Shape::Box(_), Shape::Sphere(_)) => None,
        (Shape::Plane(_), Shape::Plane(_)) => None,
    }
}

fn flip(penetration: Penetration) -> Penetration {
    Penetration {
        normal: -penetration.normal,
        depth: penetration.depth,
    }
}

/// Spheres overlap when their centres are closer than the sum of the radii
pub fn sphere_sphere(
    center_a: Vector3,
    radius_a: f32,
    center_b: Vector3,
    radius_b: f32,
) -> Option<Penetration> {
    let delta = center_b - center_a;
    let distance = delta.length();
    let radii = radius_a + radius_b;

    if distance >= radii {
        return None;
    }

    let normal = if distance > EPSILON {
        delta / distance
    } else {
        log::warn!("coincident sphere centres at {}, using fallback normal", center_a);
        FALLBACK_NORMAL
    };

    Some(Penetration {
        normal,
        depth: radii - distance,
    })
}

/// A sphere overlaps a plane when its centre is less than one radius
/// above it. The normal is the plane normal.
pub fn plane_sphere(plane: &Plane, center: Vector3, radius: f32) -> Option<Penetration> {
    let distance = plane.signed_distance_to(center);

    if distance < radius {
        Some(Penetration {
            normal: plane.get_normal(),
            depth: radius - distance,
        })
    } else {
        None
    }
}

/// Coarse plane–box test.
///
/// The signed distance of the box centre, scaled by each component of the
/// plane normal, must fit inside the half extent on that axis. This is exact
/// for axis-aligned planes and deliberately loose for tilted ones.
pub fn plane_box(plane: &Plane, center: Vector3, cuboid: &BoxShape) -> Option<Penetration> {
    let normal = plane.get_normal();
    let distance = plane.signed_distance_to(center);
    let extents = cuboid.get_half_extents();

    let inside = (0..3).all(|axis| (distance * normal.axis(axis)).abs() <= extents.axis(axis));
    if !inside {
        return None;
    }

    Some(Penetration {
        normal,
        depth: cuboid.projected_extent(normal) - distance,
    })
}

/// Separating axis test for two axis-aligned boxes.
///
/// The normal is the axis of least overlap, signed by the centre
/// displacement on that axis (minimum translation vector).
pub fn box_box(
    center_a: Vector3,
    a: &BoxShape,
    center_b: Vector3,
    b: &BoxShape,
) -> Option<Penetration> {
    if !a.world_bounds(center_a).intersects(&b.world_bounds(center_b)) {
        return None;
    }

    let delta = center_b - center_a;
    let reach = a.get_half_extents() + b.get_half_extents();

    let (axis, depth) = (0..3)
        .map(|axis| (axis, reach.axis(axis) - delta.axis(axis).abs()))
        .fold((0, f32::MAX), |best, candidate| {
            if candidate.1 < best.1 { candidate } else { best }
        });

    let sign = if delta.axis(axis) < 0.0 { -1.0 } else { 1.0 };

    Some(Penetration {
        normal: Vector3::basis(axis) * sign,
        depth,
    })
}

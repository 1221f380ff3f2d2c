use crate::bodies::{BodyFlags, Material, RigidBodyType};
use crate::core::BodyHandle;
use crate::error::PhysicsError;
use crate::math::{Vector3, Vector4, Aabb};
use crate::shapes::{Shape, ShapeType, Sphere, Plane, BoxShape};
use crate::Result;

/// Type alias for a handle to a rigid body
pub type RigidBodyHandle = BodyHandle;

/// A point-mass rigid body with a collision shape.
///
/// Only position and velocity carry over from one step to the next;
/// acceleration accumulates the forces applied since the last integration
/// and is cleared by it.
#[derive(Debug, Clone, PartialEq)]
pub struct RigidBody {
    /// The body's position in world space
    position: Vector3,

    /// The body's linear velocity
    velocity: Vector3,

    /// Acceleration accumulated from forces since the last integration
    acceleration: Vector3,

    /// The body's mass
    mass: f32,

    /// Inverse of the body's mass, zero for static bodies
    inv_mass: f32,

    /// The body's material properties
    material: Material,

    /// The body's collision shape
    shape: Shape,

    /// The body's type (dynamic or static)
    body_type: RigidBodyType,

    /// The body's flags
    flags: BodyFlags,

    /// RGBA colour handed to the renderer
    color: Vector4,
}

impl RigidBody {
    /// Creates a new rigid body.
    ///
    /// Dynamic bodies need a positive finite mass. Planes are always static
    /// and are placed at `normal * distance` whatever `position` says.
    pub fn new(shape: Shape, position: Vector3, mass: f32, body_type: RigidBodyType) -> Result<Self> {
        if !position.is_finite() {
            return Err(PhysicsError::InvalidParameter(format!(
                "body position must be finite, got {}",
                position
            )));
        }

        let (position, body_type) = match &shape {
            Shape::Plane(plane) => (plane.origin(), RigidBodyType::Static),
            _ => (position, body_type),
        };

        let mut body = Self {
            position,
            velocity: Vector3::zero(),
            acceleration: Vector3::zero(),
            mass: 0.0,
            inv_mass: 0.0,
            material: Material::default(),
            shape,
            body_type,
            flags: BodyFlags::default(),
            color: Vector4::one(),
        };

        body.set_mass(mass)?;

        Ok(body)
    }

    /// Creates a new dynamic rigid body with the given shape, position and mass
    pub fn new_dynamic(shape: impl Into<Shape>, position: Vector3, mass: f32) -> Result<Self> {
        Self::new(shape.into(), position, mass, RigidBodyType::Dynamic)
    }

    /// Creates a new static rigid body with the given shape and position
    pub fn new_static(shape: impl Into<Shape>, position: Vector3) -> Result<Self> {
        Self::new(shape.into(), position, 0.0, RigidBodyType::Static)
    }

    /// Creates a dynamic sphere
    pub fn sphere(position: Vector3, radius: f32, mass: f32) -> Result<Self> {
        Self::new_dynamic(Sphere::new(radius)?, position, mass)
    }

    /// Creates a dynamic axis-aligned box
    pub fn cuboid(position: Vector3, half_extents: Vector3, mass: f32) -> Result<Self> {
        Self::new_dynamic(BoxShape::new(half_extents)?, position, mass)
    }

    /// Creates an infinite static plane
    pub fn plane(normal: Vector3, distance: f32) -> Result<Self> {
        Self::new_static(Plane::new(normal, distance)?, Vector3::zero())
    }

    /// Replaces the material, builder style
    pub fn with_material(mut self, material: Material) -> Result<Self> {
        self.set_material(material)?;
        Ok(self)
    }

    /// Sets the render colour, builder style
    pub fn with_color(mut self, color: Vector4) -> Self {
        self.color = color;
        self
    }

    /// Sets the initial velocity, builder style
    pub fn with_velocity(mut self, velocity: Vector3) -> Self {
        self.velocity = velocity;
        self
    }

    /// Returns the body's position
    pub fn get_position(&self) -> Vector3 {
        self.position
    }

    /// Sets the body's position. Works on static bodies too.
    ///
    /// A plane is shifted along its normal so that it passes through
    /// `position`; its position stays at `normal * distance`.
    pub fn set_position(&mut self, position: Vector3) {
        match &mut self.shape {
            Shape::Plane(plane) => {
                let normal = plane.get_normal();
                // Normal is already unit length, so this cannot fail
                if let Ok(moved) = Plane::new(normal, normal.dot(&position)) {
                    *plane = moved;
                    self.position = plane.origin();
                }
            }
            _ => self.position = position,
        }
    }

    /// Returns the body's linear velocity
    pub fn get_velocity(&self) -> Vector3 {
        self.velocity
    }

    /// Sets the body's linear velocity. Works on static bodies too.
    pub fn set_velocity(&mut self, velocity: Vector3) {
        self.velocity = velocity;
    }

    /// Returns the acceleration accumulated since the last integration
    pub fn get_acceleration(&self) -> Vector3 {
        self.acceleration
    }

    /// Overwrites the accumulated acceleration
    pub fn set_acceleration(&mut self, acceleration: Vector3) {
        self.acceleration = acceleration;
    }

    /// Returns the body's mass
    pub fn get_mass(&self) -> f32 {
        self.mass
    }

    /// Sets the body's mass (and inverse mass).
    ///
    /// Dynamic bodies need a positive finite mass; static bodies accept any
    /// non-negative value and keep an inverse mass of zero.
    pub fn set_mass(&mut self, mass: f32) -> Result<()> {
        match self.body_type {
            RigidBodyType::Dynamic if mass > 0.0 && mass.is_finite() => {
                self.mass = mass;
                self.inv_mass = 1.0 / mass;
                Ok(())
            }
            RigidBodyType::Static if mass >= 0.0 && mass.is_finite() => {
                self.mass = mass;
                self.inv_mass = 0.0;
                Ok(())
            }
            body_type => Err(PhysicsError::InvalidParameter(format!(
                "invalid mass {} for {:?} body",
                mass, body_type
            ))),
        }
    }

    /// Returns the body's inverse mass, zero for static bodies
    pub fn get_inverse_mass(&self) -> f32 {
        self.inv_mass
    }

    /// Returns the body's material
    pub fn get_material(&self) -> &Material {
        &self.material
    }

    /// Sets the body's material
    pub fn set_material(&mut self, material: Material) -> Result<()> {
        material.validate()?;
        self.material = material;
        Ok(())
    }

    /// Returns the velocity damping coefficient
    pub fn get_friction(&self) -> f32 {
        self.material.friction
    }

    /// Sets the velocity damping coefficient, which must lie in [0, 1]
    pub fn set_friction(&mut self, friction: f32) -> Result<()> {
        self.set_material(Material { friction, ..self.material })
    }

    /// Returns the coefficient of restitution
    pub fn get_elasticity(&self) -> f32 {
        self.material.elasticity
    }

    /// Sets the coefficient of restitution, which must be non-negative
    pub fn set_elasticity(&mut self, elasticity: f32) -> Result<()> {
        self.set_material(Material { elasticity, ..self.material })
    }

    /// Returns a reference to the body's shape
    pub fn get_shape(&self) -> &Shape {
        &self.shape
    }

    /// Resizes a sphere body. Fails on other shapes.
    pub fn set_radius(&mut self, radius: f32) -> Result<()> {
        match &mut self.shape {
            Shape::Sphere(sphere) => sphere.set_radius(radius),
            other => Err(shape_mismatch("set_radius", other.shape_type())),
        }
    }

    /// Resizes a box body. Fails on other shapes.
    pub fn set_half_extents(&mut self, half_extents: Vector3) -> Result<()> {
        match &mut self.shape {
            Shape::Box(cuboid) => cuboid.set_half_extents(half_extents),
            other => Err(shape_mismatch("set_half_extents", other.shape_type())),
        }
    }

    /// Moves and reorients a plane body, keeping its position at
    /// `normal * distance`. Fails on other shapes.
    pub fn set_plane(&mut self, normal: Vector3, distance: f32) -> Result<()> {
        match &mut self.shape {
            Shape::Plane(plane) => {
                *plane = Plane::new(normal, distance)?;
                self.position = plane.origin();
                Ok(())
            }
            other => Err(shape_mismatch("set_plane", other.shape_type())),
        }
    }

    /// Returns the tag of the body's shape
    pub fn get_shape_type(&self) -> ShapeType {
        self.shape.shape_type()
    }

    /// Returns the body type
    pub fn get_body_type(&self) -> RigidBodyType {
        self.body_type
    }

    /// Returns true if the body is static
    pub fn is_static(&self) -> bool {
        self.body_type == RigidBodyType::Static
    }

    /// Returns the body's flags
    pub fn get_flags(&self) -> BodyFlags {
        self.flags
    }

    /// Sets the body's flags
    pub fn set_flags(&mut self, flags: BodyFlags) {
        self.flags = flags;
    }

    /// Returns whether the body is affected by gravity
    pub fn is_affected_by_gravity(&self) -> bool {
        self.flags.contains(BodyFlags::AFFECTED_BY_GRAVITY)
    }

    /// Sets whether the body is affected by gravity
    pub fn set_affected_by_gravity(&mut self, affected: bool) {
        self.flags.set(BodyFlags::AFFECTED_BY_GRAVITY, affected);
    }

    /// Returns whether the body takes part in collision detection
    pub fn is_collidable(&self) -> bool {
        self.flags.contains(BodyFlags::COLLIDES)
    }

    /// Sets whether the body takes part in collision detection
    pub fn set_collidable(&mut self, collidable: bool) {
        self.flags.set(BodyFlags::COLLIDES, collidable);
    }

    /// Returns the render colour
    pub fn get_color(&self) -> Vector4 {
        self.color
    }

    /// Sets the render colour
    pub fn set_color(&mut self, color: Vector4) {
        self.color = color;
    }

    /// World space bounds, `None` for planes
    pub fn world_bounds(&self) -> Option<Aabb> {
        self.shape.world_bounds(self.position)
    }

    /// Applies a force to the body: `acceleration += force / mass`.
    /// Static bodies ignore forces.
    pub fn apply_force(&mut self, force: Vector3) {
        if self.is_static() {
            return;
        }

        self.acceleration += force * self.inv_mass;
    }

    /// Adds an impulse directly to the velocity, bypassing mass and time.
    /// Callers scale by inverse mass themselves. Static bodies ignore impulses.
    pub fn apply_impulse(&mut self, impulse: Vector3) {
        if self.is_static() {
            return;
        }

        self.velocity += impulse;
    }

    /// Moves a dynamic body by `offset`; used for penetration correction
    pub fn translate(&mut self, offset: Vector3) {
        if self.is_static() {
            return;
        }

        self.position += offset;
    }

    /// Advances the body by `dt` with semi-implicit Euler.
    ///
    /// Friction is a damping force opposing the current velocity. The new
    /// velocity is used for the position update, then acceleration is cleared.
    pub fn integrate(&mut self, dt: f32) {
        if self.is_static() {
            return;
        }

        self.apply_force(-self.velocity * self.material.friction);

        self.velocity += self.acceleration * dt;
        self.position += self.velocity * dt;

        self.acceleration = Vector3::zero();
    }
}

fn shape_mismatch(operation: &str, shape: ShapeType) -> PhysicsError {
    PhysicsError::InvalidParameter(format!("{} does not apply to a {:?} body", operation, shape))
}

use crate::core::{
    BodyHandle, ConstraintHandle, SimulationConfig, EventQueue, BodyEvent,
    BodyEventType, CollisionEvent, BodyStorage, ConstraintStorage,
};
use crate::core::storage::Storage;
use crate::bodies::RigidBody;
use crate::collision::{self, Contact, ImpulseSolver};
use crate::constraints::{Constraint, Spring};
use crate::error::PhysicsError;
use crate::math::Vector3;
use crate::render::Renderable;
use crate::Result;

/// Fraction of a fixed step that the accumulator may fall short by and still
/// run the step. Absorbs rounding so that one long frame and several short
/// ones covering the same time run the same number of steps.
const STEP_TOLERANCE: f32 = 1.0e-3;

/// The physics world: owns every body and constraint and advances them
/// with a fixed time step.
pub struct PhysicsWorld {
    /// All rigid bodies in the world
    bodies: BodyStorage<RigidBody>,

    /// All constraints in the world
    constraints: ConstraintStorage<Box<dyn Constraint>>,

    /// Configuration for the simulation
    config: SimulationConfig,

    /// Queue of physics events
    events: EventQueue,

    /// Contacts found in the current step, drained by the solver
    contacts: Vec<Contact>,

    /// Wall-clock time not yet consumed by fixed steps
    accumulated_time: f32,

    /// The total simulated time
    time: f32,

    /// Number of fixed steps run so far
    step_count: u64,
}

impl PhysicsWorld {
    /// Creates a new physics world with default settings
    pub fn new() -> Self {
        Self::from_valid_config(SimulationConfig::default())
    }

    /// Creates a new physics world with the given configuration
    pub fn with_config(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: SimulationConfig) -> Self {
        Self {
            bodies: BodyStorage::new(),
            constraints: ConstraintStorage::new(),
            config,
            events: EventQueue::new(),
            contacts: Vec::new(),
            accumulated_time: 0.0,
            time: 0.0,
            step_count: 0,
        }
    }

    /// Returns the total simulated time
    pub fn get_time(&self) -> f32 {
        self.time
    }

    /// Returns the number of fixed steps run so far
    pub fn get_step_count(&self) -> u64 {
        self.step_count
    }

    /// Returns the time waiting in the accumulator for the next fixed step
    pub fn get_accumulated_time(&self) -> f32 {
        self.accumulated_time
    }

    /// Returns the fixed step size
    pub fn get_fixed_time_step(&self) -> f32 {
        self.config.fixed_time_step
    }

    /// Sets the gravitational acceleration
    pub fn set_gravity(&mut self, gravity: Vector3) {
        self.config.gravity = gravity;
    }

    /// Gets the current gravity
    pub fn get_gravity(&self) -> Vector3 {
        self.config.gravity
    }

    /// Sets the force applied by `apply_global_force`
    pub fn set_global_force(&mut self, force: Vector3) {
        self.config.global_force = force;
    }

    /// Gets the global force
    pub fn get_global_force(&self) -> Vector3 {
        self.config.global_force
    }

    /// Returns a reference to the simulation configuration
    pub fn get_config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Replaces the configuration. Accumulated time is kept.
    pub fn set_config(&mut self, config: SimulationConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Adds a rigid body to the world and returns its handle.
    ///
    /// The world owns the body until it is removed again.
    pub fn add_body(&mut self, body: RigidBody) -> Result<BodyHandle> {
        validate_body(&body)?;

        let shape = body.get_shape_type();
        let handle = self.bodies.add(body);

        log::debug!("added {:?} body {:?}", shape, handle);

        self.events.add_body_event(BodyEvent {
            event_type: BodyEventType::Added,
            body: handle,
        });

        Ok(handle)
    }

    /// Removes a rigid body from the world and hands it back to the caller.
    ///
    /// Constraints attached to the body are removed and dropped with it.
    pub fn remove_body(&mut self, handle: BodyHandle) -> Result<RigidBody> {
        self.bodies.get_body(handle)?;

        let attached: Vec<ConstraintHandle> = self.constraints
            .iter()
            .filter(|(_, constraint)| constraint.involves_body(handle))
            .map(|(c_handle, _)| c_handle)
            .collect();

        for c_handle in attached {
            if let Some(constraint) = self.constraints.remove(c_handle) {
                log::debug!(
                    "dropped {} {:?} attached to removed body {:?}",
                    constraint.constraint_type(), c_handle, handle
                );
            }
        }

        let body = self.bodies.remove(handle)
            .ok_or_else(|| PhysicsError::ResourceNotFound(format!("Body with handle {:?} not found", handle)))?;

        log::debug!("removed body {:?}", handle);

        self.events.add_body_event(BodyEvent {
            event_type: BodyEventType::Removed,
            body: handle,
        });

        Ok(body)
    }

    /// Gets a reference to a rigid body by its handle
    pub fn get_body(&self, handle: BodyHandle) -> Result<&RigidBody> {
        self.bodies.get_body(handle)
    }

    /// Gets a mutable reference to a rigid body by its handle
    pub fn get_body_mut(&mut self, handle: BodyHandle) -> Result<&mut RigidBody> {
        self.bodies.get_body_mut(handle)
    }

    /// Iterates over all bodies in insertion slot order
    pub fn bodies(&self) -> impl Iterator<Item = (BodyHandle, &RigidBody)> {
        self.bodies.iter()
    }

    /// Adds a constraint to the world and returns its handle.
    ///
    /// Every body the constraint refers to must already be in the world.
    pub fn add_constraint<C: Constraint>(&mut self, constraint: C) -> Result<ConstraintHandle> {
        for &body in constraint.get_bodies() {
            self.bodies.get_body(body)?;
        }

        let kind = constraint.constraint_type();
        let handle = self.constraints.add(Box::new(constraint));

        log::debug!("added {} constraint {:?}", kind, handle);

        Ok(handle)
    }

    /// Removes a constraint from the world and hands it back to the caller
    pub fn remove_constraint(&mut self, handle: ConstraintHandle) -> Result<Box<dyn Constraint>> {
        let constraint = self.constraints.remove(handle)
            .ok_or_else(|| PhysicsError::ResourceNotFound(format!("Constraint with handle {:?} not found", handle)))?;

        log::debug!("removed {} constraint {:?}", constraint.constraint_type(), handle);

        Ok(constraint)
    }

    /// Gets a reference to a constraint by its handle
    pub fn get_constraint(&self, handle: ConstraintHandle) -> Result<&Box<dyn Constraint>> {
        self.constraints.get_constraint(handle)
    }

    /// Gets a mutable reference to a constraint by its handle
    pub fn get_constraint_mut(&mut self, handle: ConstraintHandle) -> Result<&mut Box<dyn Constraint>> {
        self.constraints.get_constraint_mut(handle)
    }

    /// Gets a spring by its handle, failing if the constraint is something else
    pub fn get_spring(&self, handle: ConstraintHandle) -> Result<&Spring> {
        self.get_constraint(handle)?
            .as_any()
            .downcast_ref::<Spring>()
            .ok_or_else(|| PhysicsError::InvalidParameter(format!("Constraint {:?} is not a spring", handle)))
    }

    /// Gets a mutable spring by its handle, failing if the constraint is something else
    pub fn get_spring_mut(&mut self, handle: ConstraintHandle) -> Result<&mut Spring> {
        self.get_constraint_mut(handle)?
            .as_any_mut()
            .downcast_mut::<Spring>()
            .ok_or_else(|| PhysicsError::InvalidParameter(format!("Constraint {:?} is not a spring", handle)))
    }

    /// Iterates over all constraints
    pub fn constraints(&self) -> impl Iterator<Item = (ConstraintHandle, &Box<dyn Constraint>)> {
        self.constraints.iter()
    }

    /// Adds the global force to every dynamic body.
    /// The force is consumed by the next fixed step.
    pub fn apply_global_force(&mut self) {
        let force = self.config.global_force;
        for (_, body) in self.bodies.iter_mut() {
            body.apply_force(force);
        }
    }

    /// Advances the simulation by `delta_time` seconds of wall-clock time.
    ///
    /// Runs as many whole fixed steps as fit into the accumulated time and
    /// carries the remainder over to the next call. Returns the number of
    /// steps run. Negative or non-finite input is ignored, and a zero
    /// frame time never steps, whatever is waiting in the accumulator.
    pub fn advance(&mut self, delta_time: f32) -> u32 {
        if !(delta_time >= 0.0 && delta_time.is_finite()) {
            log::warn!("ignoring invalid frame time {}", delta_time);
            return 0;
        }

        if delta_time == 0.0 {
            return 0;
        }

        self.events.clear_collision_events();
        self.accumulated_time += delta_time;

        let fixed_step = self.config.fixed_time_step;
        let tolerance = fixed_step * STEP_TOLERANCE;
        let mut steps = 0;

        while self.accumulated_time + tolerance >= fixed_step {
            if self.config.max_substeps.map_or(false, |max| steps >= max) {
                log::debug!(
                    "step limit reached, carrying {}s to the next frame",
                    self.accumulated_time
                );
                break;
            }

            self.step_simulation(fixed_step);
            self.accumulated_time -= fixed_step;
            steps += 1;
        }

        log::trace!("advanced {} steps, {}s left over", steps, self.accumulated_time);

        steps
    }

    /// Runs exactly one fixed step, leaving the accumulator untouched
    pub fn step(&mut self) {
        self.events.clear_collision_events();
        self.step_simulation(self.config.fixed_time_step);
    }

    /// Performs a single step of the physics simulation
    fn step_simulation(&mut self, dt: f32) {
        self.apply_gravity();

        for (_, body) in self.bodies.iter_mut() {
            body.integrate(dt);
        }

        for (_, constraint) in self.constraints.iter_mut() {
            constraint.update(dt, &mut self.bodies);
        }

        self.detect_collisions();

        ImpulseSolver::new(self.config.static_response)
            .resolve(&mut self.contacts, &mut self.bodies);

        self.time += dt;
        self.step_count += 1;
    }

    /// Applies `gravity * mass` to every dynamic body that opts into gravity
    fn apply_gravity(&mut self) {
        let gravity = self.config.gravity;
        for (_, body) in self.bodies.iter_mut() {
            if body.is_affected_by_gravity() {
                let weight = gravity * body.get_mass();
                body.apply_force(weight);
            }
        }
    }

    /// Tests every pair of bodies once and records the contacts
    fn detect_collisions(&mut self) {
        self.contacts.clear();

        let handles = self.bodies.handles();

        for (i, &handle_a) in handles.iter().enumerate() {
            let body_a = match self.bodies.get(handle_a) {
                Some(body) => body,
                None => continue,
            };

            for &handle_b in &handles[i + 1..] {
                let body_b = match self.bodies.get(handle_b) {
                    Some(body) => body,
                    None => continue,
                };

                if let Some(contact) = collision::collide(handle_a, body_a, handle_b, body_b) {
                    self.contacts.push(contact);
                }
            }
        }

        for contact in &self.contacts {
            self.events.add_collision_event(CollisionEvent::from(contact));
        }
    }

    /// Everything the host should draw: one entry per body followed by
    /// one line per constraint.
    ///
    /// The iterator is lazy and borrows the world; call again for a fresh pass.
    pub fn renderables(&self) -> impl Iterator<Item = Renderable> + '_ {
        let plane_extent = self.config.plane_render_extent;

        let bodies = self.bodies
            .iter()
            .map(move |(_, body)| Renderable::from_body(body, plane_extent));

        let lines = self.constraints
            .iter()
            .filter_map(move |(_, constraint)| constraint.render_segment(&self.bodies))
            .map(|(start, end)| Renderable::line(start, end));

        bodies.chain(lines)
    }

    /// Collision events of the last `advance` call and body events
    /// since the queue was last cleared
    pub fn events(&self) -> &EventQueue {
        &self.events
    }

    /// Returns a mutable reference to the event queue
    pub fn events_mut(&mut self) -> &mut EventQueue {
        &mut self.events
    }

    /// Drops every body and constraint and resets the clock
    pub fn clear(&mut self) {
        self.bodies.clear();
        self.constraints.clear();
        self.contacts.clear();
        self.events.clear();
        self.accumulated_time = 0.0;
        self.time = 0.0;
        self.step_count = 0;
    }

    /// Returns the number of bodies in the world
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Returns the number of constraints in the world
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Catches state that setters do not guard, so no NaN enters the step loop
fn validate_body(body: &RigidBody) -> Result<()> {
    if !body.get_position().is_finite() || !body.get_velocity().is_finite() {
        return Err(PhysicsError::InvalidParameter(format!(
            "body state must be finite, got position {} velocity {}",
            body.get_position(),
            body.get_velocity()
        )));
    }

    body.get_material().validate()
}

use crate::bodies::RigidBody;
use crate::collision::{narrow_phase, Contact};
use crate::core::{BodyStorage, StaticResponse};
use crate::shapes::ShapeType;
use crate::Result;

/// Single-pass impulse solver.
///
/// Every contact is resolved exactly once per step, in detection order,
/// with no iteration between contacts.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImpulseSolver {
    static_response: StaticResponse,
}

impl ImpulseSolver {
    /// Creates a solver with the given response against static bodies
    pub fn new(static_response: StaticResponse) -> Self {
        Self { static_response }
    }

    /// Returns how the solver treats static partners
    pub fn static_response(&self) -> StaticResponse {
        self.static_response
    }

    /// Resolves and drains every contact
    pub fn resolve(&self, contacts: &mut Vec<Contact>, bodies: &mut BodyStorage<RigidBody>) {
        for contact in contacts.drain(..) {
            if let Err(err) = self.resolve_contact(&contact, bodies) {
                log::warn!("skipping contact {:?}: {}", contact, err);
            }
        }
    }

    /// Resolves a single contact
    pub fn resolve_contact(&self, contact: &Contact, bodies: &mut BodyStorage<RigidBody>) -> Result<()> {
        let (body_a, body_b) = bodies.get_pair_mut(contact.body_a, contact.body_b)?;

        if body_a.is_static() && body_b.is_static() {
            return Ok(());
        }

        if contact.involves_plane() {
            resolve_plane(body_a, body_b, contact);
        } else {
            self.resolve_pair(body_a, body_b, contact);
        }

        Ok(())
    }

    /// Sphere–sphere and box–box: impulse exchange followed by splitting
    /// the remaining overlap between the two bodies.
    fn resolve_pair(&self, body_a: &mut RigidBody, body_b: &mut RigidBody, contact: &Contact) {
        let normal = contact.normal;
        let inv_mass_a = body_a.get_inverse_mass();
        let inv_mass_b = body_b.get_inverse_mass();

        let relative_velocity = (body_b.get_velocity() - body_a.get_velocity()).dot(&normal);

        // Separating pairs keep their velocity
        if relative_velocity < 0.0 {
            let elasticity = (body_a.get_elasticity() + body_b.get_elasticity()) * 0.5;
            let impulse = -(1.0 + elasticity) * relative_velocity / (inv_mass_a + inv_mass_b);

            match self.static_response {
                StaticResponse::Reflect if body_a.is_static() => {
                    let reflected = body_b.get_velocity().reflect(&normal, body_b.get_elasticity());
                    body_b.set_velocity(reflected);
                }
                StaticResponse::Reflect if body_b.is_static() => {
                    let reflected = body_a.get_velocity().reflect(&normal, body_a.get_elasticity());
                    body_a.set_velocity(reflected);
                }
                _ => {
                    body_b.apply_impulse(normal * (impulse * inv_mass_b));
                    body_a.apply_impulse(-normal * (impulse * inv_mass_a));
                }
            }
        }

        // A box pair may now overlap least on another axis; that depth does
        // not apply along this contact's normal.
        let depth = match narrow_phase::penetration(body_a, body_b) {
            Some(penetration) if contact.shapes != (ShapeType::Box, ShapeType::Box)
                || penetration.normal == normal => penetration.depth.max(0.0),
            Some(_) => contact.penetration,
            None => 0.0,
        };

        let half = normal * (depth * 0.5);
        body_b.translate(half);
        body_a.translate(-half);
    }
}

/// Plane contacts: reflect the body's normal velocity with its own
/// elasticity and push it back onto the plane.
fn resolve_plane(plane: &RigidBody, body: &mut RigidBody, contact: &Contact) {
    if body.is_static() {
        return;
    }

    let normal = contact.normal;

    if body.get_velocity().dot(&normal) < 0.0 {
        let reflected = body.get_velocity().reflect(&normal, body.get_elasticity());
        body.set_velocity(reflected);
    }

    if let Some(penetration) = narrow_phase::penetration(plane, body) {
        body.translate(normal * penetration.depth.max(0.0));
    }
}

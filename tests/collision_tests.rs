use impulse_physics::{
    PhysicsWorld, SimulationConfig, StaticResponse, RigidBody, Material,
    collision::{narrow_phase::{self, FALLBACK_NORMAL}, Contact, ImpulseSolver},
    core::{BodyStorage, Storage},
    shapes::{Sphere, BoxShape, Plane, ShapeType},
    math::Vector3,
};
use approx::assert_relative_eq;

fn weightless_world() -> PhysicsWorld {
    let config = SimulationConfig {
        gravity: Vector3::zero(),
        ..SimulationConfig::default()
    };
    PhysicsWorld::with_config(config).unwrap()
}

fn ground() -> RigidBody {
    RigidBody::plane(Vector3::unit_y(), 0.0).unwrap()
}

#[test]
fn test_sphere_sphere_overlap() {
    // Radius 1 spheres 1.5 apart overlap by 0.5
    let hit = narrow_phase::sphere_sphere(Vector3::zero(), 1.0, Vector3::new(1.5, 0.0, 0.0), 1.0).unwrap();
    assert_relative_eq!(hit.normal, Vector3::unit_x());
    assert_relative_eq!(hit.depth, 0.5);

    // 3 apart they do not
    assert!(narrow_phase::sphere_sphere(Vector3::zero(), 1.0, Vector3::new(3.0, 0.0, 0.0), 1.0).is_none());

    // Touching exactly is not an overlap
    assert!(narrow_phase::sphere_sphere(Vector3::zero(), 1.0, Vector3::new(2.0, 0.0, 0.0), 1.0).is_none());
}

#[test]
fn test_coincident_spheres_use_fallback_normal() {
    let hit = narrow_phase::sphere_sphere(Vector3::one(), 1.0, Vector3::one(), 0.5).unwrap();
    assert_eq!(hit.normal, FALLBACK_NORMAL);
    assert_relative_eq!(hit.depth, 1.5);
}

#[test]
fn test_plane_sphere_overlap() {
    let plane = Plane::new(Vector3::unit_y(), 0.0).unwrap();

    let hit = narrow_phase::plane_sphere(&plane, Vector3::new(0.0, 0.5, 0.0), 1.0).unwrap();
    assert_relative_eq!(hit.normal, Vector3::unit_y());
    assert_relative_eq!(hit.depth, 0.5);

    assert!(narrow_phase::plane_sphere(&plane, Vector3::new(0.0, 1.5, 0.0), 1.0).is_none());
}

#[test]
fn test_plane_box_overlap() {
    let plane = Plane::new(Vector3::unit_y(), 0.0).unwrap();
    let cuboid = BoxShape::new(Vector3::one()).unwrap();

    let hit = narrow_phase::plane_box(&plane, Vector3::new(0.0, 0.5, 0.0), &cuboid).unwrap();
    assert_relative_eq!(hit.normal, Vector3::unit_y());
    assert_relative_eq!(hit.depth, 0.5);

    // Centre farther than the half extent along the normal
    assert!(narrow_phase::plane_box(&plane, Vector3::new(0.0, 2.0, 0.0), &cuboid).is_none());
}

#[test]
fn test_tilted_plane_box() {
    let plane = Plane::new(Vector3::new(1.0, 1.0, 0.0), 0.0).unwrap();
    let cuboid = BoxShape::new(Vector3::one()).unwrap();
    let normal = Vector3::new(1.0, 1.0, 0.0).normalize();

    // Centre 1/sqrt(2) above the plane, corner reaches sqrt(2) along it
    let hit = narrow_phase::plane_box(&plane, Vector3::new(1.0, 0.0, 0.0), &cuboid).unwrap();
    assert_relative_eq!(hit.normal, normal, epsilon = 1e-6);
    assert_relative_eq!(hit.depth, 2.0f32.sqrt() - 0.5f32.sqrt(), epsilon = 1e-5);

    assert!(narrow_phase::plane_box(&plane, Vector3::new(1.5, 1.5, 0.0), &cuboid).is_none());

    // The projected extent alone would call this an overlap
    let flat = BoxShape::new(Vector3::new(2.0, 0.5, 1.0)).unwrap();
    let center = Vector3::new(2.0f32.sqrt(), 0.0, 0.0);
    assert!(flat.projected_extent(normal) > plane.signed_distance_to(center));
    assert!(narrow_phase::plane_box(&plane, center, &flat).is_none());
}

#[test]
fn test_box_box_minimum_translation() {
    let cuboid = BoxShape::new(Vector3::one()).unwrap();

    // Least overlap is along x, pointing from A to B
    let hit = narrow_phase::box_box(Vector3::zero(), &cuboid, Vector3::new(1.5, 0.2, 0.0), &cuboid).unwrap();
    assert_eq!(hit.normal, Vector3::unit_x());
    assert_relative_eq!(hit.depth, 0.5);

    let hit = narrow_phase::box_box(Vector3::zero(), &cuboid, Vector3::new(-0.1, -1.8, 0.3), &cuboid).unwrap();
    assert_eq!(hit.normal, -Vector3::unit_y());
    assert_relative_eq!(hit.depth, 0.2, epsilon = 1e-6);

    assert!(narrow_phase::box_box(Vector3::zero(), &cuboid, Vector3::new(0.0, 0.0, 2.5), &cuboid).is_none());
}

#[test]
fn test_sphere_box_never_collides() {
    let sphere = RigidBody::sphere(Vector3::zero(), 1.0, 1.0).unwrap();
    let cuboid = RigidBody::cuboid(Vector3::zero(), Vector3::one(), 1.0).unwrap();

    assert!(narrow_phase::penetration(&sphere, &cuboid).is_none());
    assert!(narrow_phase::penetration(&cuboid, &sphere).is_none());

    let mut world = weightless_world();
    world.add_body(sphere).unwrap();
    world.add_body(cuboid).unwrap();
    world.step();

    assert_eq!(world.events().collision_events().count(), 0);
}

#[test]
fn test_penetration_is_symmetric_for_planes() {
    let plane = ground();
    let sphere = RigidBody::sphere(Vector3::new(0.0, 0.5, 0.0), 1.0, 1.0).unwrap();

    let forward = narrow_phase::penetration(&plane, &sphere).unwrap();
    let backward = narrow_phase::penetration(&sphere, &plane).unwrap();

    assert_relative_eq!(forward.normal, -backward.normal);
    assert_relative_eq!(forward.depth, backward.depth);
}

#[test]
fn test_plane_always_first_in_contact() {
    let mut world = weightless_world();

    // Sphere added before the plane
    let sphere = world.add_body(RigidBody::sphere(Vector3::new(0.0, 0.5, 0.0), 1.0, 1.0).unwrap()).unwrap();
    let plane = world.add_body(ground()).unwrap();

    world.step();

    let events: Vec<_> = world.events().collision_events().collect();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].body_a, plane);
    assert_eq!(events[0].body_b, sphere);
    assert_eq!(events[0].shapes, (ShapeType::Plane, ShapeType::Sphere));
    assert_relative_eq!(events[0].normal, Vector3::unit_y());
    assert_relative_eq!(events[0].penetration, 0.5);
}

#[test]
fn test_plane_sphere_resolution_lifts_sphere() {
    let mut world = weightless_world();
    world.add_body(ground()).unwrap();
    let sphere = world.add_body(RigidBody::sphere(Vector3::new(0.0, 0.5, 0.0), 1.0, 1.0).unwrap()).unwrap();

    world.step();

    // The bottom of the sphere rests on the plane
    let position = world.get_body(sphere).unwrap().get_position();
    assert_relative_eq!(position, Vector3::new(0.0, 1.0, 0.0), epsilon = 1e-6);
}

#[test]
fn test_plane_box_resolution_lifts_box() {
    let mut world = weightless_world();
    world.add_body(ground()).unwrap();
    let cuboid = world.add_body(RigidBody::cuboid(Vector3::new(0.0, 0.5, 0.0), Vector3::one(), 1.0).unwrap()).unwrap();

    world.step();

    let position = world.get_body(cuboid).unwrap().get_position();
    assert_relative_eq!(position, Vector3::new(0.0, 1.0, 0.0), epsilon = 1e-6);
}

#[test]
fn test_sphere_bounces_off_plane() {
    let mut world = weightless_world();
    world.add_body(ground()).unwrap();

    let ball = RigidBody::sphere(Vector3::new(0.0, 0.999, 0.0), 1.0, 1.0)
        .unwrap()
        .with_material(Material::new(0.0, 0.5).unwrap())
        .unwrap()
        .with_velocity(Vector3::new(1.0, -2.0, 0.0));
    let ball = world.add_body(ball).unwrap();

    world.step();

    // Normal velocity reflected with the ball's own elasticity, tangent kept
    let velocity = world.get_body(ball).unwrap().get_velocity();
    assert_relative_eq!(velocity, Vector3::new(1.0, 1.0, 0.0), epsilon = 1e-6);
}

#[test]
fn test_sphere_settles_on_plane_under_gravity() {
    let mut world = PhysicsWorld::new();
    world.add_body(ground()).unwrap();

    let ball = RigidBody::sphere(Vector3::new(0.0, 3.0, 0.0), 1.0, 1.0)
        .unwrap()
        .with_material(Material::inelastic())
        .unwrap();
    let ball = world.add_body(ball).unwrap();

    world.advance(5.0);

    let body = world.get_body(ball).unwrap();
    assert_relative_eq!(body.get_position().y, 1.0, epsilon = 1e-4);
    assert!(body.get_velocity().y.abs() < 0.1);
}

#[test]
fn test_elastic_head_on_spheres_exchange_velocities() {
    let mut world = weightless_world();

    let a = RigidBody::sphere(Vector3::new(-0.95, 0.0, 0.0), 1.0, 1.0)
        .unwrap()
        .with_material(Material::elastic())
        .unwrap()
        .with_velocity(Vector3::new(1.0, 0.0, 0.0));
    let b = RigidBody::sphere(Vector3::new(0.95, 0.0, 0.0), 1.0, 1.0)
        .unwrap()
        .with_material(Material::elastic())
        .unwrap()
        .with_velocity(Vector3::new(-1.0, 0.0, 0.0));

    let a = world.add_body(a).unwrap();
    let b = world.add_body(b).unwrap();

    world.step();

    assert_relative_eq!(world.get_body(a).unwrap().get_velocity(), Vector3::new(-1.0, 0.0, 0.0), epsilon = 1e-5);
    assert_relative_eq!(world.get_body(b).unwrap().get_velocity(), Vector3::new(1.0, 0.0, 0.0), epsilon = 1e-5);

    // Positional correction separated the pair
    let distance = world.get_body(a).unwrap().get_position()
        .distance(&world.get_body(b).unwrap().get_position());
    assert_relative_eq!(distance, 2.0, epsilon = 1e-5);
}

#[test]
fn test_separating_spheres_keep_velocity() {
    let mut world = weightless_world();

    let a = RigidBody::sphere(Vector3::new(-0.5, 0.0, 0.0), 1.0, 1.0)
        .unwrap()
        .with_material(Material::elastic())
        .unwrap()
        .with_velocity(Vector3::new(-1.0, 0.0, 0.0));
    let b = RigidBody::sphere(Vector3::new(0.5, 0.0, 0.0), 1.0, 1.0)
        .unwrap()
        .with_material(Material::elastic())
        .unwrap()
        .with_velocity(Vector3::new(1.0, 0.0, 0.0));

    let a = world.add_body(a).unwrap();
    let b = world.add_body(b).unwrap();

    world.step();

    assert_relative_eq!(world.get_body(a).unwrap().get_velocity(), Vector3::new(-1.0, 0.0, 0.0));
    assert_relative_eq!(world.get_body(b).unwrap().get_velocity(), Vector3::new(1.0, 0.0, 0.0));

    // Overlap is still pushed out
    let distance = world.get_body(a).unwrap().get_position()
        .distance(&world.get_body(b).unwrap().get_position());
    assert_relative_eq!(distance, 2.0, epsilon = 1e-5);
}

fn static_sphere_collision(response: StaticResponse) -> (RigidBody, RigidBody) {
    let config = SimulationConfig {
        gravity: Vector3::zero(),
        static_response: response,
        ..SimulationConfig::default()
    };
    let mut world = PhysicsWorld::with_config(config).unwrap();

    let anchor = RigidBody::new_static(Sphere::new(1.0).unwrap(), Vector3::zero()).unwrap();
    let anchor = world.add_body(anchor).unwrap();

    let ball = RigidBody::sphere(Vector3::new(1.9, 0.0, 0.0), 1.0, 1.0)
        .unwrap()
        .with_material(Material::new(0.0, 0.5).unwrap())
        .unwrap()
        .with_velocity(Vector3::new(-1.0, 0.0, 0.0));
    let ball = world.add_body(ball).unwrap();

    world.step();

    (world.get_body(anchor).unwrap().clone(), world.get_body(ball).unwrap().clone())
}

#[test]
fn test_static_partner_reflects_by_default() {
    let (anchor, ball) = static_sphere_collision(StaticResponse::Reflect);

    // Reflection uses the ball's elasticity alone: -1 -> 0.5
    assert_relative_eq!(ball.get_velocity().x, 0.5, epsilon = 1e-6);

    // Only the dynamic side is corrected, by half the overlap
    assert_relative_eq!(ball.get_position().x, 1.945, epsilon = 1e-5);
    assert_eq!(anchor.get_position(), Vector3::zero());
    assert_eq!(anchor.get_velocity(), Vector3::zero());
}

#[test]
fn test_static_partner_impulse_response() {
    let (anchor, ball) = static_sphere_collision(StaticResponse::Impulse);

    // Impulse uses the averaged elasticity (1.0 + 0.5) / 2
    assert_relative_eq!(ball.get_velocity().x, 0.75, epsilon = 1e-6);
    assert_eq!(anchor.get_position(), Vector3::zero());
    assert_eq!(anchor.get_velocity(), Vector3::zero());
}

#[test]
fn test_box_box_resolution() {
    let mut world = weightless_world();

    let a = world.add_body(RigidBody::cuboid(Vector3::zero(), Vector3::one(), 1.0).unwrap()).unwrap();
    let b = world.add_body(RigidBody::cuboid(Vector3::new(1.5, 0.0, 0.0), Vector3::one(), 1.0).unwrap()).unwrap();

    world.step();

    // Resting boxes are only pushed apart along the MTV
    assert_relative_eq!(world.get_body(a).unwrap().get_position(), Vector3::new(-0.25, 0.0, 0.0), epsilon = 1e-6);
    assert_relative_eq!(world.get_body(b).unwrap().get_position(), Vector3::new(1.75, 0.0, 0.0), epsilon = 1e-6);
}

#[test]
fn test_box_box_correction_stays_on_contact_normal() {
    let mut bodies: BodyStorage<RigidBody> = BodyStorage::new();
    let a = bodies.add(RigidBody::cuboid(Vector3::zero(), Vector3::one(), 1.0).unwrap());
    let b = bodies.add(RigidBody::cuboid(Vector3::new(1.5, 0.2, 0.0), Vector3::one(), 1.0).unwrap());

    // Current least overlap is along x, the contact says y
    let contact = Contact {
        body_a: a,
        body_b: b,
        shapes: (ShapeType::Box, ShapeType::Box),
        normal: Vector3::unit_y(),
        penetration: 0.3,
    };
    ImpulseSolver::default().resolve_contact(&contact, &mut bodies).unwrap();

    let body_a = bodies.get_body(a).unwrap();
    let body_b = bodies.get_body(b).unwrap();
    assert_relative_eq!(body_a.get_position(), Vector3::new(0.0, -0.15, 0.0), epsilon = 1e-6);
    assert_relative_eq!(body_b.get_position(), Vector3::new(1.5, 0.35, 0.0), epsilon = 1e-6);
}

#[test]
fn test_plane_contact_leaves_static_body_alone() {
    let mut bodies: BodyStorage<RigidBody> = BodyStorage::new();
    let plane = bodies.add(ground());
    let rock = RigidBody::new_static(Sphere::new(1.0).unwrap(), Vector3::new(0.0, 0.5, 0.0))
        .unwrap()
        .with_velocity(Vector3::new(0.0, -1.0, 0.0));
    let rock = bodies.add(rock);

    let contact = Contact {
        body_a: plane,
        body_b: rock,
        shapes: (ShapeType::Plane, ShapeType::Sphere),
        normal: Vector3::unit_y(),
        penetration: 0.5,
    };
    ImpulseSolver::default().resolve_contact(&contact, &mut bodies).unwrap();

    let rock = bodies.get_body(rock).unwrap();
    assert_eq!(rock.get_velocity(), Vector3::new(0.0, -1.0, 0.0));
    assert_eq!(rock.get_position(), Vector3::new(0.0, 0.5, 0.0));
}

#[test]
fn test_non_collidable_bodies_pass_through() {
    let mut world = weightless_world();

    let mut ghost = RigidBody::sphere(Vector3::zero(), 1.0, 1.0).unwrap();
    ghost.set_collidable(false);

    let ghost = world.add_body(ghost).unwrap();
    world.add_body(RigidBody::sphere(Vector3::new(0.5, 0.0, 0.0), 1.0, 1.0).unwrap()).unwrap();

    world.step();

    assert_eq!(world.events().collision_events().count(), 0);
    assert_eq!(world.get_body(ghost).unwrap().get_position(), Vector3::zero());
}

#[test]
fn test_static_pairs_produce_no_contact() {
    let mut world = weightless_world();

    world.add_body(ground()).unwrap();
    world.add_body(RigidBody::new_static(Sphere::new(1.0).unwrap(), Vector3::zero()).unwrap()).unwrap();

    world.step();

    assert_eq!(world.events().collision_events().count(), 0);
}

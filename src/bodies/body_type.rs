/// Type of rigid body, determining how it behaves in the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RigidBodyType {
    /// Dynamic bodies are integrated and respond to forces and collisions
    Dynamic,

    /// Static bodies are never moved by the simulation, only by explicit setters
    Static,
}

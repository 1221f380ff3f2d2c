mod rigid_body;
mod material;
mod body_type;

pub use self::rigid_body::{RigidBody, RigidBodyHandle};
pub use self::material::Material;
pub use self::body_type::RigidBodyType;
pub use self::body_flags::BodyFlags;

/// Flags for controlling body behavior
pub mod body_flags {
    use bitflags::bitflags;

    bitflags! {
        /// Flags for controlling the behavior of rigid bodies
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct BodyFlags: u32 {
            /// Body is affected by the world gravity
            const AFFECTED_BY_GRAVITY = 0x01;

            /// Body takes part in collision detection
            const COLLIDES = 0x02;
        }
    }

    impl Default for BodyFlags {
        fn default() -> Self {
            Self::AFFECTED_BY_GRAVITY | Self::COLLIDES
        }
    }
}

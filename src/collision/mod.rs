mod contact;
pub mod narrow_phase;
mod contact_solver;

pub use self::contact::Contact;
pub use self::narrow_phase::{collide, Penetration};
pub use self::contact_solver::ImpulseSolver;

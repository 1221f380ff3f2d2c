mod constraint;
mod spring;

pub use self::constraint::Constraint;
pub use self::spring::Spring;

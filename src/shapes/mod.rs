mod shape;
mod sphere;
mod plane;
pub mod box_shape;

pub use self::shape::{Shape, ShapeType};
pub use self::sphere::Sphere;
pub use self::plane::Plane;
pub use self::box_shape::BoxShape;

pub mod descend;
pub mod item_ops;

pub use descend::PathError;
pub use item_ops::{CreateError, create_child};

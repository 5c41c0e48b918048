pub mod role;
pub mod value_objects;

pub use role::Role;
pub use value_objects::Email;

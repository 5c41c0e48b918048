// Domain layer module exports
// Domain is independent of infrastructure concerns

pub mod course;
pub mod repositories;
pub mod reservation;
pub mod text;
pub mod user;

pub use text::{LongText, ShortText};

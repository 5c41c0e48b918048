//! Club Canin API Library
//!
//! REST API for a dog-training club: course catalog, member accounts and
//! course reservations, backed by MySQL.

pub mod api;
pub mod auth;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod testing;

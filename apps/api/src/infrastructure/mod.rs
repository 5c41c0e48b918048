// Infrastructure layer module
// Contains the MySQL pool and repository adapters

pub mod database;
pub mod repositories;

pub mod config;
pub mod sources;
pub mod sqlite;

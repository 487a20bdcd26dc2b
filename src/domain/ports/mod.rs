pub mod artifact_store;
pub mod profile_source;

pub mod run_id;
pub mod user_type;

pub mod entities;
pub mod error;
pub mod model;
pub mod ports;
pub mod values;

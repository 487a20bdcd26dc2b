pub mod recommend;
pub mod similar;
pub mod stats;
pub mod train;

pub mod championship;
pub mod common;
pub mod ranking;

pub mod config;
pub mod opportunity;
pub mod snapshot;

pub mod config;
pub mod core;
pub mod serve;

pub use config::Config;

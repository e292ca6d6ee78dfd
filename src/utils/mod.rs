/// Environment-driven process configuration.
pub mod config;

pub mod config;
pub mod errors;
pub mod learning;
pub mod providers;
pub mod resolver;
pub mod session;

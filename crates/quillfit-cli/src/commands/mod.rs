pub mod config;
pub mod poem;
pub mod session;
pub mod workout;

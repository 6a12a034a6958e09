pub mod combinations;
pub mod config;
pub mod error;
pub mod history;
pub mod models;
pub mod stats;
pub mod strategy;

pub use error::CoreError;

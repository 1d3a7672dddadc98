pub mod config;
pub mod error;
pub mod export;
pub mod grid;
pub mod models;
pub mod summary;

pub use error::{AppError, Result};

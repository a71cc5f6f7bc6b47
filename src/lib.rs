pub mod boundary;
pub mod config;
pub mod error;
pub mod model;
pub mod parsing;
pub mod preprocessing;
pub mod session;

pub use config::TrainingConfig;
pub use error::{Error, Result};

mod client;
mod config;
mod error;

pub use client::TfServingPredictor;
pub use config::ModelServerConfig;
pub use error::{ModelServerError, ModelServerResult};

//! Library crate for harmony-palette-back, exposing modules for binaries and integration tests.

pub mod color;
pub mod config;
pub mod dto;
pub mod error;
pub mod predictor;
pub mod routes;
pub mod services;
pub mod state;

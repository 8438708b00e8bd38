mod catalog;
mod client;
mod error;
mod image_payload;
mod models;
mod prediction;

#[cfg(test)]
mod test_support;

pub mod config;

pub use catalog::CatalogClient;
pub use client::{InferenceBackend, InferenceClient};
pub use error::{ClientError, ErrorKind};
pub use image_payload::ImagePayload;
pub use models::{AppDescriptor, PredictionResult};
pub use prediction::{validate_app_id, PredictionClient};

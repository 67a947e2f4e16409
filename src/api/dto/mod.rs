//! Request and response DTOs.

pub mod health;
pub mod links;

pub use health::HealthResponse;
pub use links::{CreateLinkRequest, LinkResponse};

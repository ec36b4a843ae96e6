//! REST surface: DTOs, extractors, handlers, routing and the OpenAPI document.

pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod openapi;
pub mod routes;

pub use openapi::document;
pub use routes::router;

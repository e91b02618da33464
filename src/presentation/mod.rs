// Presentation layer - HTTP routes, handlers and response bodies
pub mod app_state;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod mapper;
pub mod router;

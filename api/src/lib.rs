// Library exports for testing and external use

pub mod app;
pub mod config;
pub mod dto;
pub mod errors;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod routes;

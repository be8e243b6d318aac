//! HTTP front-end: server wiring, session handling and page rendering.

pub mod app;
pub mod config;
pub mod context;
pub mod middleware;

//! HTTP API: routing and request/response mapping over the domain operations.

pub mod app;

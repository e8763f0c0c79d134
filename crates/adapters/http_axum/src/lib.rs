//! # armplug-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a small **JSON API** for operators:
//!   - `GET /health`
//!   - `GET /api/trigger`: the persisted arm state
//!   - `GET /api/schedules`: every scheduled job, with the one this
//!     controller owns flagged
//!   - `POST /api/button/trigger`: inject a press of the virtual button
//! - Map application errors into HTTP responses
//!
//! ## Dependency rule
//! Depends on `armplug-app` (for port traits) and `armplug-domain` (for the
//! types serialized in responses). Never leaks axum types into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;

//! # classroom-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a **JSON API** for reading sensors and driving actuators
//!   (`/api/sensor_data`, `/api/devices`, `/api/control`, `/api/scene`, …)
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results into JSON responses carrying a `success` flag
//!
//! ## Dependency rule
//! Depends on `classroom-app` (for port traits and services) and
//! `classroom-domain` (for domain types used in request/response mapping).
//! Never leaks axum types into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;

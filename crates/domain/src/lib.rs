//! # classroom-domain
//!
//! Pure domain model for the smart-classroom monitor.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **sensor snapshots** (one timestamped reading per sensor kind)
//! - Define the **device registry** (the fixed sensors and actuators of the room)
//! - Define **modes** (automatic control and the lecture / exam / energy scenes)
//! - Define **directives** (typed actuator commands with a reason)
//! - Define **history records** (persisted readings, commands and daily summaries)
//! - Contain the control **policy**: snapshot + mode → directives
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod device;
pub mod directive;
pub mod history;
pub mod mode;
pub mod policy;
pub mod sensor;

//! # classroom-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `SensorSource`: produce one sensor snapshot per cycle
//!   - `SensorLog`: append & query sensor readings
//!   - `ControlLog`: append & query applied commands
//! - Own the shared **classroom state** (latest snapshot, mode, actuator states)
//! - Provide the use-case services:
//!   - `ControlService`: manual control, scene changes, directive preview
//!   - `HistoryService`: recent readings and commands, daily summaries
//! - Run the **monitor loop**: sample → persist → evaluate → apply
//!
//! ## Dependency rule
//! Depends on `classroom-domain` only (plus `tokio` for the loop and timers).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod monitor;
pub mod ports;
pub mod services;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

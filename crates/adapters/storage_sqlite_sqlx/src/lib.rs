//! # classroom-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the `SensorLog` and `ControlLog` port traits defined in `classroom-app::ports`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows
//!
//! ## Dependency rule
//! Depends on `classroom-app` (for port traits) and `classroom-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod control_log;
mod error;
mod pool;
mod sensor_log;

pub use control_log::SqliteControlLog;
pub use error::StorageError;
pub use pool::{Config, Database};
pub use sensor_log::SqliteSensorLog;

//! Sensor source port: where snapshots come from.

use std::future::Future;

use classroom_domain::error::ClassroomError;
use classroom_domain::sensor::SensorSnapshot;

/// Produces one [`SensorSnapshot`] per monitor cycle.
pub trait SensorSource {
    /// Take a fresh reading of every sensor the source knows about.
    fn sample(&self) -> impl Future<Output = Result<SensorSnapshot, ClassroomError>> + Send;
}

impl<T: SensorSource + Send + Sync> SensorSource for std::sync::Arc<T> {
    fn sample(&self) -> impl Future<Output = Result<SensorSnapshot, ClassroomError>> + Send {
        (**self).sample()
    }
}

//! Control log port: persistence for applied commands.

use std::future::Future;

use classroom_domain::error::ClassroomError;
use classroom_domain::history::ControlRecord;

/// Append-only store of [`ControlRecord`]s.
pub trait ControlLog {
    /// Persist a batch of records, in order.
    fn append(
        &self,
        records: Vec<ControlRecord>,
    ) -> impl Future<Output = Result<(), ClassroomError>> + Send;

    /// Get the most recent records, newest-first.
    fn recent(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<ControlRecord>, ClassroomError>> + Send;
}

impl<T: ControlLog + Send + Sync> ControlLog for std::sync::Arc<T> {
    fn append(
        &self,
        records: Vec<ControlRecord>,
    ) -> impl Future<Output = Result<(), ClassroomError>> + Send {
        (**self).append(records)
    }

    fn recent(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<ControlRecord>, ClassroomError>> + Send {
        (**self).recent(limit)
    }
}

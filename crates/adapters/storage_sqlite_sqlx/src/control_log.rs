//! `SQLite` implementation of [`ControlLog`].

use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use classroom_app::ports::ControlLog;
use classroom_domain::directive::Action;
use classroom_domain::error::ClassroomError;
use classroom_domain::history::ControlRecord;
use classroom_domain::id::{CommandId, DeviceId};
use classroom_domain::time::to_fixed_rfc3339;

use crate::error::{StorageError, decode_error};

struct Wrapper(ControlRecord);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: uuid::Uuid = row.try_get("id")?;
        let recorded_at: String = row.try_get("recorded_at")?;
        let device_id: String = row.try_get("device_id")?;
        let command: String = row.try_get("command")?;
        let parameter: Option<f64> = row.try_get("parameter")?;
        let reason: String = row.try_get("reason")?;

        Ok(Self(ControlRecord {
            id: CommandId::from_uuid(id),
            recorded_at: chrono::DateTime::parse_from_rfc3339(&recorded_at)
                .map_err(decode_error)?
                .to_utc(),
            device_id: DeviceId::from_str(&device_id).map_err(decode_error)?,
            command: Action::from_str(&command).map_err(decode_error)?,
            parameter,
            reason,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO control_history (id, recorded_at, device_id, command, parameter, reason)
    VALUES (?, ?, ?, ?, ?, ?)
";

const SELECT_RECENT: &str =
    "SELECT * FROM control_history ORDER BY recorded_at DESC, rowid DESC LIMIT ?";

/// `SQLite`-backed control history.
pub struct SqliteControlLog {
    pool: SqlitePool,
}

impl SqliteControlLog {
    /// Create a new control log using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl ControlLog for SqliteControlLog {
    async fn append(&self, records: Vec<ControlRecord>) -> Result<(), ClassroomError> {
        if records.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await.map_err(StorageError::from)?;
        for record in &records {
            sqlx::query(INSERT)
                .bind(record.id.as_uuid())
                .bind(to_fixed_rfc3339(record.recorded_at))
                .bind(record.device_id.as_str())
                .bind(record.command.as_str())
                .bind(record.parameter)
                .bind(&record.reason)
                .execute(&mut *tx)
                .await
                .map_err(StorageError::from)?;
        }
        tx.commit().await.map_err(StorageError::from)?;

        Ok(())
    }

    async fn recent(&self, limit: usize) -> Result<Vec<ControlRecord>, ClassroomError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_RECENT)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }
}

//! `SQLite` implementation of [`SensorLog`].

use std::str::FromStr;

use chrono::NaiveDate;
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use classroom_app::ports::SensorLog;
use classroom_domain::error::ClassroomError;
use classroom_domain::history::{SensorReading, SensorSummary};
use classroom_domain::id::{DeviceId, ReadingId};
use classroom_domain::sensor::SensorKind;
use classroom_domain::time::to_fixed_rfc3339;

use crate::error::{StorageError, decode_error};

struct Wrapper(SensorReading);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: uuid::Uuid = row.try_get("id")?;
        let recorded_at: String = row.try_get("recorded_at")?;
        let device_id: String = row.try_get("device_id")?;
        let sensor_type: String = row.try_get("sensor_type")?;
        let value: f64 = row.try_get("value")?;
        let unit: String = row.try_get("unit")?;

        let recorded_at = chrono::DateTime::parse_from_rfc3339(&recorded_at)
            .map_err(decode_error)?
            .to_utc();
        let device_id = DeviceId::from_str(&device_id).map_err(decode_error)?;
        let sensor = SensorKind::from_str(&sensor_type).map_err(decode_error)?;

        Ok(Self(
            SensorReading::builder(device_id, sensor, value)
                .id(ReadingId::from_uuid(id))
                .recorded_at(recorded_at)
                .unit(unit)
                .build(),
        ))
    }
}

struct SummaryRow {
    sensor: SensorKind,
    count: i64,
    avg: f64,
    min: f64,
    max: f64,
}

impl<'r> FromRow<'r, SqliteRow> for SummaryRow {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let sensor_type: String = row.try_get("sensor_type")?;
        Ok(Self {
            sensor: SensorKind::from_str(&sensor_type).map_err(decode_error)?,
            count: row.try_get("count")?,
            avg: row.try_get("avg")?,
            min: row.try_get("min")?,
            max: row.try_get("max")?,
        })
    }
}

const INSERT: &str = r"
    INSERT INTO sensor_data (id, recorded_at, device_id, sensor_type, value, unit)
    VALUES (?, ?, ?, ?, ?, ?)
";

const SELECT_RECENT: &str =
    "SELECT * FROM sensor_data ORDER BY recorded_at DESC, rowid DESC LIMIT ?";
const SELECT_RECENT_BY_SENSOR: &str =
    "SELECT * FROM sensor_data WHERE sensor_type = ? ORDER BY recorded_at DESC, rowid DESC LIMIT ?";

// Timestamps are stored as fixed-width RFC 3339, so the first ten
// characters are the UTC calendar date.
const SELECT_DAILY_SUMMARY: &str = r"
    SELECT sensor_type,
           COUNT(*)   AS count,
           AVG(value) AS avg,
           MIN(value) AS min,
           MAX(value) AS max
    FROM sensor_data
    WHERE substr(recorded_at, 1, 10) = ?
    GROUP BY sensor_type
";

/// `SQLite`-backed sensor log.
pub struct SqliteSensorLog {
    pool: SqlitePool,
}

impl SqliteSensorLog {
    /// Create a new sensor log using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl SensorLog for SqliteSensorLog {
    async fn append(&self, readings: Vec<SensorReading>) -> Result<(), ClassroomError> {
        if readings.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await.map_err(StorageError::from)?;
        for reading in &readings {
            sqlx::query(INSERT)
                .bind(reading.id.as_uuid())
                .bind(to_fixed_rfc3339(reading.recorded_at))
                .bind(reading.device_id.as_str())
                .bind(reading.sensor.as_str())
                .bind(reading.value)
                .bind(&reading.unit)
                .execute(&mut *tx)
                .await
                .map_err(StorageError::from)?;
        }
        tx.commit().await.map_err(StorageError::from)?;

        Ok(())
    }

    async fn recent(
        &self,
        sensor: Option<SensorKind>,
        limit: usize,
    ) -> Result<Vec<SensorReading>, ClassroomError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let query = match sensor {
            Some(kind) => {
                sqlx::query_as::<_, Wrapper>(SELECT_RECENT_BY_SENSOR).bind(kind.as_str())
            }
            None => sqlx::query_as::<_, Wrapper>(SELECT_RECENT),
        };
        let rows: Vec<Wrapper> = query
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn daily_summary(&self, date: NaiveDate) -> Result<Vec<SensorSummary>, ClassroomError> {
        let rows: Vec<SummaryRow> = sqlx::query_as(SELECT_DAILY_SUMMARY)
            .bind(date.format("%Y-%m-%d").to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        let mut summaries: Vec<SensorSummary> = rows
            .into_iter()
            .map(|row| SensorSummary {
                date,
                sensor: row.sensor,
                count: u64::try_from(row.count).unwrap_or_default(),
                avg: row.avg,
                min: row.min,
                max: row.max,
            })
            .collect();
        summaries.sort_by_key(|s| s.sensor);

        Ok(summaries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Config;
    use chrono::{Duration, TimeZone, Utc};

    async fn setup() -> SqliteSensorLog {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        SqliteSensorLog::new(db.pool().clone())
    }

    fn reading(kind: SensorKind, value: f64, at: chrono::DateTime<Utc>) -> SensorReading {
        SensorReading::builder(DeviceId::from_static("test"), kind, value)
            .recorded_at(at)
            .build()
    }

    #[tokio::test]
    async fn should_round_trip_reading_fields() {
        let log = setup().await;
        let at = Utc.with_ymd_and_hms(2024, 5, 2, 8, 30, 0).unwrap();
        let original = SensorReading::builder(
            DeviceId::from_static("co2_sensor1"),
            SensorKind::Co2,
            1234.0,
        )
        .recorded_at(at)
        .build();

        log.append(vec![original.clone()]).await.unwrap();

        let rows = log.recent(None, 10).await.unwrap();
        assert_eq!(rows, vec![original]);
    }

    #[tokio::test]
    async fn should_return_newest_first() {
        let log = setup().await;
        let t0 = Utc.with_ymd_and_hms(2024, 5, 2, 8, 0, 0).unwrap();
        log.append(vec![
            reading(SensorKind::Light, 100.0, t0),
            reading(SensorKind::Light, 300.0, t0 + Duration::seconds(10)),
            reading(SensorKind::Light, 200.0, t0 + Duration::seconds(5)),
        ])
        .await
        .unwrap();

        let values: Vec<f64> = log
            .recent(None, 10)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.value)
            .collect();
        assert_eq!(values, vec![300.0, 200.0, 100.0]);
    }

    #[tokio::test]
    async fn should_break_timestamp_ties_by_insertion_order() {
        let log = setup().await;
        let t0 = Utc.with_ymd_and_hms(2024, 5, 2, 8, 0, 0).unwrap();
        log.append(vec![
            reading(SensorKind::Co2, 1.0, t0),
            reading(SensorKind::Co2, 2.0, t0),
        ])
        .await
        .unwrap();

        let rows = log.recent(None, 1).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert!((rows[0].value - 2.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn should_filter_by_sensor_kind() {
        let log = setup().await;
        let now = Utc::now();
        log.append(vec![
            reading(SensorKind::Temperature, 23.4, now),
            reading(SensorKind::Humidity, 55.0, now),
            reading(SensorKind::Temperature, 23.9, now),
        ])
        .await
        .unwrap();

        let rows = log.recent(Some(SensorKind::Temperature), 10).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.sensor == SensorKind::Temperature));
        assert_eq!(rows[0].unit, "\u{b0}C");
    }

    #[tokio::test]
    async fn should_accept_empty_batch() {
        let log = setup().await;
        log.append(Vec::new()).await.unwrap();
        assert!(log.recent(None, 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_summarise_one_day_per_sensor() {
        let log = setup().await;
        let day = Utc.with_ymd_and_hms(2024, 5, 2, 0, 0, 1).unwrap();
        log.append(vec![
            reading(SensorKind::Temperature, 20.0, day),
            reading(SensorKind::Temperature, 26.0, day + Duration::hours(12)),
            reading(SensorKind::Co2, 900.0, day + Duration::hours(1)),
            reading(SensorKind::Temperature, 40.0, day + Duration::days(1)),
            reading(SensorKind::Temperature, -5.0, day - Duration::seconds(2)),
        ])
        .await
        .unwrap();

        let rows = log.daily_summary(day.date_naive()).await.unwrap();
        assert_eq!(rows.len(), 2);

        let temp = &rows[0];
        assert_eq!(temp.sensor, SensorKind::Temperature);
        assert_eq!(temp.count, 2);
        assert!((temp.avg - 23.0).abs() < 1e-9);
        assert!((temp.min - 20.0).abs() < f64::EPSILON);
        assert!((temp.max - 26.0).abs() < f64::EPSILON);

        assert_eq!(rows[1].sensor, SensorKind::Co2);
        assert_eq!(rows[1].count, 1);
    }

    #[tokio::test]
    async fn should_return_empty_summary_for_day_without_data() {
        let log = setup().await;
        let date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        assert!(log.daily_summary(date).await.unwrap().is_empty());
    }
}

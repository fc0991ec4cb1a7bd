//! PostgreSQL attendance source
//!
//! Reads the eTimeTrackLite tables (`AttendanceLog`, `Employee`, `Device`).
//! Every call opens its own connection and tears it down before returning;
//! the connection driver task is joined on success and error paths alike, so
//! a long-running scheduler never accumulates sockets.

use super::traits::AttendanceSource;
use crate::config::DatabaseConfig;
use crate::domain::{
    collapse_to_first_in, AttendanceError, AttendanceRecord, EmployeeCode, ReportDate, Result,
};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use native_tls::TlsConnector;
use postgres_native_tls::MakeTlsConnector;
use secrecy::ExposeSecret;
use std::future::Future;
use std::str::FromStr;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_postgres::{Client, NoTls, Row};

/// First IN event per employee for one day and one terminal
///
/// `$1` is the report date, `$2` the device id.
pub const FIRST_IN_QUERY: &str = r#"
SELECT e."EmpCode"             AS emp_code,
       e."EmpName"             AS emp_name,
       e."Department"          AS department,
       MIN(a."AttendanceTime") AS first_in_time,
       d."DeviceName"          AS device_name
FROM "AttendanceLog" a
INNER JOIN "Employee" e ON a."EmpCode" = e."EmpCode"
INNER JOIN "Device" d ON a."DeviceId" = d."DeviceId"
WHERE CAST(a."AttendanceTime" AS DATE) = $1
  AND a."InOutFlag" = 'IN'
  AND a."DeviceId" = $2
GROUP BY e."EmpCode", e."EmpName", e."Department", d."DeviceName"
ORDER BY e."EmpCode"
"#;

/// Transport security of the store connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SslMode {
    /// Plain TCP
    Disable,
    /// TLS through native-tls, connection fails without it
    Require,
}

impl FromStr for SslMode {
    type Err = AttendanceError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "disable" => Ok(SslMode::Disable),
            "require" => Ok(SslMode::Require),
            other => Err(AttendanceError::Configuration(format!(
                "Unknown ssl mode '{other}', expected disable or require"
            ))),
        }
    }
}

/// One open connection plus its driver task
struct Session {
    client: Client,
    driver: JoinHandle<()>,
}

impl Session {
    /// Drops the client and waits for the driver to finish
    async fn close(self) {
        drop(self.client);
        if let Err(e) = self.driver.await {
            tracing::warn!(error = %e, "PostgreSQL connection task ended abnormally");
        }
    }
}

/// [`AttendanceSource`] over tokio-postgres, one connection per call
pub struct PostgresAttendanceSource {
    pg_config: tokio_postgres::Config,
    ssl_mode: SslMode,
    device_id: i32,
    endpoint: String,
}

impl PostgresAttendanceSource {
    /// Create a source from database configuration
    ///
    /// Does not connect; connections are opened per call.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an unknown ssl mode.
    pub fn new(config: &DatabaseConfig) -> Result<Self> {
        let ssl_mode = SslMode::from_str(&config.ssl_mode)?;
        let password: &str = config.password.expose_secret().as_ref();

        let mut pg_config = tokio_postgres::Config::new();
        pg_config
            .host(&config.host)
            .port(config.port)
            .dbname(&config.name)
            .user(&config.username)
            .password(password)
            .application_name("attendance-report")
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds));
        if ssl_mode == SslMode::Require {
            pg_config.ssl_mode(tokio_postgres::config::SslMode::Require);
        }

        Ok(Self {
            pg_config,
            ssl_mode,
            device_id: config.device_id,
            endpoint: config.endpoint_display(),
        })
    }

    /// Device id the query filters on
    pub fn device_id(&self) -> i32 {
        self.device_id
    }

    async fn connect(&self) -> Result<Session> {
        let (client, driver) = match self.ssl_mode {
            SslMode::Disable => {
                let (client, connection) = self
                    .pg_config
                    .connect(NoTls)
                    .await
                    .map_err(|e| self.connection_error(e))?;
                (client, tokio::spawn(drive(connection)))
            }
            SslMode::Require => {
                let connector = TlsConnector::builder().build().map_err(|e| {
                    AttendanceError::Connection(format!("Failed to initialise TLS: {e}"))
                })?;
                let (client, connection) = self
                    .pg_config
                    .connect(MakeTlsConnector::new(connector))
                    .await
                    .map_err(|e| self.connection_error(e))?;
                (client, tokio::spawn(drive(connection)))
            }
        };

        tracing::debug!(endpoint = %self.endpoint, "PostgreSQL connection opened");
        Ok(Session { client, driver })
    }

    fn connection_error(&self, e: tokio_postgres::Error) -> AttendanceError {
        AttendanceError::Connection(format!(
            "Failed to connect to {}: {}",
            self.endpoint, e
        ))
    }
}

/// Runs the connection until the client is dropped
async fn drive<F>(connection: F)
where
    F: Future<Output = std::result::Result<(), tokio_postgres::Error>>,
{
    if let Err(e) = connection.await {
        tracing::warn!(error = %e, "PostgreSQL connection error");
    }
}

fn record_from_row(row: &Row) -> Result<AttendanceRecord> {
    let decode = |column: &str, e: tokio_postgres::Error| {
        AttendanceError::Query(format!("Failed to decode column {column}: {e}"))
    };

    let code: String = row.try_get("emp_code").map_err(|e| decode("emp_code", e))?;
    let employee_code = EmployeeCode::new(code).map_err(AttendanceError::Query)?;
    let employee_name: Option<String> =
        row.try_get("emp_name").map_err(|e| decode("emp_name", e))?;
    let department: Option<String> = row
        .try_get("department")
        .map_err(|e| decode("department", e))?;
    let first_in: Option<NaiveDateTime> = row
        .try_get("first_in_time")
        .map_err(|e| decode("first_in_time", e))?;
    let device_name: Option<String> = row
        .try_get("device_name")
        .map_err(|e| decode("device_name", e))?;

    Ok(AttendanceRecord::new(
        employee_code,
        employee_name.unwrap_or_default(),
        department.filter(|d| !d.trim().is_empty()),
        first_in,
        device_name.unwrap_or_default(),
    ))
}

#[async_trait]
impl AttendanceSource for PostgresAttendanceSource {
    async fn test_connection(&self) -> Result<()> {
        let session = self.connect().await?;
        let result = session.client.query_one("SELECT 1", &[]).await;
        session.close().await;

        result.map_err(|e| AttendanceError::Connection(format!("Connection test failed: {e}")))?;

        tracing::info!(endpoint = %self.endpoint, "PostgreSQL connection test successful");
        Ok(())
    }

    async fn fetch(&self, date: ReportDate) -> Result<Vec<AttendanceRecord>> {
        let session = self.connect().await?;
        let result = session
            .client
            .query(FIRST_IN_QUERY, &[&date.date(), &self.device_id])
            .await;
        session.close().await;

        let rows = result.map_err(|e| {
            AttendanceError::Query(format!("Attendance query for {date} failed: {e}"))
        })?;

        let records = rows
            .iter()
            .map(record_from_row)
            .collect::<Result<Vec<_>>>()?;

        let (records, merged) = collapse_to_first_in(records);
        if merged > 0 {
            tracing::warn!(
                report_date = %date,
                merged,
                "Duplicate employee codes collapsed to earliest first-IN"
            );
        }

        tracing::debug!(
            report_date = %date,
            device_id = self.device_id,
            records = records.len(),
            "Attendance fetched"
        );
        Ok(records)
    }

    fn describe(&self) -> String {
        format!("postgresql://{} (device {})", self.endpoint, self.device_id)
    }
}

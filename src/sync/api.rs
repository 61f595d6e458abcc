use async_trait::async_trait;
use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use reqwest::Url;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::calendar::{
    Appointment, AppointmentId, Department, DepartmentId, Employee, EmployeeRef,
};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    #[error("Server responded with error code {status}: {body}")]
    StatusError { status: u16, body: String },
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Parse error: {0}")]
    ParseError(String),
}

#[derive(Debug, Deserialize)]
struct WireAppointment {
    id: AppointmentId,
    start: String,
    end: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    employee: Option<EmployeeRef>,
    #[serde(default)]
    participation: Option<Vec<EmployeeRef>>,
}

/// Read-only access to the scheduling backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SchedulingApi: Send + Sync {
    async fn fetch_appointments(&self) -> Result<Vec<Appointment>, ApiError>;

    async fn fetch_appointment(&self, id: AppointmentId) -> Result<Appointment, ApiError>;

    async fn fetch_departments(&self) -> Result<Vec<Department>, ApiError>;

    async fn fetch_department_employees(
        &self,
        department_id: DepartmentId,
    ) -> Result<Vec<Employee>, ApiError>;
}

pub struct HttpSchedulingClient {
    base_url: Url,
    client: reqwest::Client,
}

/// Parses an ISO-8601 timestamp into local time. Timestamps without an
/// offset are taken as local wall-clock time.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Local>, ApiError> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Local));
    }

    let naive = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
        .map_err(|e| ApiError::ParseError(format!("Invalid timestamp '{}': {}", value, e)))?;

    Local
        .from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| ApiError::ParseError(format!("Nonexistent local time '{}'", value)))
}

impl HttpSchedulingClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        // A trailing slash keeps any path prefix of the base when joining.
        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalized)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        Ok(Self {
            base_url,
            client: reqwest::Client::new(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", path, e)))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;

        tracing::debug!("GET {}", url);

        let response = self.client.get(url).send().await?;

        let status = response.status();
        tracing::info!("GET {} response status: {}", path, status);

        if status == 404 {
            tracing::error!("Resource not found: {}", path);
            return Err(ApiError::NotFound(path.to_string()));
        }

        if !status.is_success() {
            let body = response.text().await?;
            tracing::error!("Request to {} failed. Status: {}, Body: {}", path, status, body);
            return Err(ApiError::StatusError {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| ApiError::ParseError(format!("Malformed response from {}: {}", path, e)))
    }

    fn convert_appointment(wire: WireAppointment) -> Result<Appointment, ApiError> {
        Ok(Appointment {
            id: wire.id,
            start: parse_timestamp(&wire.start)?,
            end: parse_timestamp(&wire.end)?,
            title: wire.title,
            description: wire.description,
            employee: wire.employee,
            participation: wire.participation.unwrap_or_default(),
        })
    }
}

#[async_trait]
impl SchedulingApi for HttpSchedulingClient {
    async fn fetch_appointments(&self) -> Result<Vec<Appointment>, ApiError> {
        let wire: Vec<WireAppointment> = self.get_json("/appointments/").await?;
        let received = wire.len();

        let appointments: Vec<Appointment> = wire
            .into_iter()
            .filter_map(|item| {
                let id = item.id;
                Self::convert_appointment(item)
                    .map_err(|e| tracing::warn!("Skipping appointment {}: {}", id, e))
                    .ok()
            })
            .collect();

        tracing::info!("Fetched {} of {} appointments", appointments.len(), received);
        Ok(appointments)
    }

    async fn fetch_appointment(&self, id: AppointmentId) -> Result<Appointment, ApiError> {
        let wire: WireAppointment = self.get_json(&format!("/appointments/{}/", id)).await?;
        Self::convert_appointment(wire)
    }

    async fn fetch_departments(&self) -> Result<Vec<Department>, ApiError> {
        let departments: Vec<Department> = self.get_json("/departments/").await?;
        tracing::info!("Fetched {} departments", departments.len());
        Ok(departments)
    }

    async fn fetch_department_employees(
        &self,
        department_id: DepartmentId,
    ) -> Result<Vec<Employee>, ApiError> {
        let employees: Vec<Employee> = self
            .get_json(&format!("/departments/{}/employees/", department_id))
            .await?;
        tracing::info!("Fetched {} employees of department {}", employees.len(), department_id);
        Ok(employees)
    }
}

use std::sync::Arc;

use thiserror::Error;

use crate::calendar::{
    Appointment, AppointmentId, Department, DepartmentId, Employee, sort_by_start,
};
use crate::storage::config::Config;
use crate::sync::api::{ApiError, HttpSchedulingClient, SchedulingApi};
use crate::sync::requests::{FetchMessage, FetchOutcome, Request, RequestTicket};

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("API error: {0}")]
    ApiError(#[from] ApiError),
    #[error("No such appointment")]
    MissingIdentifier,
}

/// Everything the appointment dialog needs before it leaves its loading state.
#[derive(Debug, Clone, PartialEq)]
pub struct AppointmentDetails {
    pub appointment: Appointment,
    pub departments: Vec<Department>,
}

pub struct SyncEngine {
    api: Arc<dyn SchedulingApi>,
}

impl SyncEngine {
    pub fn new(config: &Config) -> Result<Self, SyncError> {
        let client = HttpSchedulingClient::new(&config.server.base_url)?;
        Ok(Self::with_api(Arc::new(client)))
    }

    pub fn with_api(api: Arc<dyn SchedulingApi>) -> Self {
        Self { api }
    }

    /// Fetches every appointment, sorted ascending by start time.
    pub async fn load_appointments(&self) -> Result<Vec<Appointment>, SyncError> {
        let mut appointments = self.api.fetch_appointments().await?;
        sort_by_start(&mut appointments);
        Ok(appointments)
    }

    /// Fetches the appointment and then the department list; both must succeed.
    pub async fn load_appointment_details(
        &self,
        id: AppointmentId,
    ) -> Result<AppointmentDetails, SyncError> {
        if id == 0 {
            return Err(SyncError::MissingIdentifier);
        }

        let appointment = self.api.fetch_appointment(id).await?;
        let departments = self.api.fetch_departments().await?;

        Ok(AppointmentDetails {
            appointment,
            departments,
        })
    }

    pub async fn load_department_employees(
        &self,
        department_id: DepartmentId,
    ) -> Result<Vec<Employee>, SyncError> {
        Ok(self.api.fetch_department_employees(department_id).await?)
    }

    pub async fn execute(&self, request: Request) -> Result<FetchOutcome, SyncError> {
        match request {
            Request::Appointments => self.load_appointments().await.map(FetchOutcome::Appointments),
            Request::AppointmentDetails(id) => {
                self.load_appointment_details(id).await.map(FetchOutcome::Details)
            }
            Request::DepartmentEmployees(id) => {
                self.load_department_employees(id).await.map(FetchOutcome::Employees)
            }
        }
    }

    /// Runs a request and packages the result with its ticket.
    pub async fn run(&self, ticket: RequestTicket, request: Request) -> FetchMessage {
        let result = self.execute(request).await;
        if let Err(e) = &result {
            tracing::error!("{:?} failed: {}", request, e);
        }
        FetchMessage { ticket, result }
    }
}

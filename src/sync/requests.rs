//! Bookkeeping for in-flight fetches.
//!
//! Every fetch is issued with a ticket carrying the generation of its kind at
//! the time it was started. Starting a newer fetch of the same kind, or
//! invalidating the kind when its view goes away, makes older tickets stale
//! and their results are dropped instead of applied.

use crate::calendar::{Appointment, AppointmentId, DepartmentId, Employee};
use crate::sync::sync_engine::{AppointmentDetails, SyncError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Appointments,
    AppointmentDetails,
    DepartmentEmployees,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    Appointments,
    AppointmentDetails(AppointmentId),
    DepartmentEmployees(DepartmentId),
}

impl Request {
    pub fn kind(&self) -> RequestKind {
        match self {
            Request::Appointments => RequestKind::Appointments,
            Request::AppointmentDetails(_) => RequestKind::AppointmentDetails,
            Request::DepartmentEmployees(_) => RequestKind::DepartmentEmployees,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    pub kind: RequestKind,
    pub generation: u64,
}

#[derive(Debug, Default)]
pub struct RequestTracker {
    appointments: u64,
    details: u64,
    employees: u64,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn counter(&mut self, kind: RequestKind) -> &mut u64 {
        match kind {
            RequestKind::Appointments => &mut self.appointments,
            RequestKind::AppointmentDetails => &mut self.details,
            RequestKind::DepartmentEmployees => &mut self.employees,
        }
    }

    fn current(&self, kind: RequestKind) -> u64 {
        match kind {
            RequestKind::Appointments => self.appointments,
            RequestKind::AppointmentDetails => self.details,
            RequestKind::DepartmentEmployees => self.employees,
        }
    }

    pub fn begin(&mut self, kind: RequestKind) -> RequestTicket {
        let counter = self.counter(kind);
        *counter += 1;
        RequestTicket {
            kind,
            generation: *counter,
        }
    }

    pub fn invalidate(&mut self, kind: RequestKind) {
        *self.counter(kind) += 1;
    }

    pub fn is_current(&self, ticket: &RequestTicket) -> bool {
        self.current(ticket.kind) == ticket.generation
    }
}

#[derive(Debug)]
pub enum FetchOutcome {
    Appointments(Vec<Appointment>),
    Details(AppointmentDetails),
    Employees(Vec<Employee>),
}

/// Result of a finished fetch, sent back to the UI loop.
#[derive(Debug)]
pub struct FetchMessage {
    pub ticket: RequestTicket,
    pub result: Result<FetchOutcome, SyncError>,
}

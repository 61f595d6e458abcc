use chrono::{DateTime, Local};

use crate::calendar::directory::EmployeeRef;

pub type AppointmentId = i64;

/// A scheduled appointment as held by the client for one fetch cycle.
///
/// Timestamps are kept in local time so that day matching and grid placement
/// work directly on the local calendar fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Appointment {
    pub id: AppointmentId,
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
    pub title: String,
    pub description: String,
    pub employee: Option<EmployeeRef>,
    pub participation: Vec<EmployeeRef>,
}

impl Appointment {
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Half-open interval test: touching endpoints do not overlap, and an
    /// empty interval (`end <= start`) overlaps nothing, itself included.
    pub fn overlaps(&self, other: &Appointment) -> bool {
        self.start < self.end
            && other.start < other.end
            && self.start < other.end
            && self.end > other.start
    }

    pub fn time_label(&self) -> String {
        format!("{}-{}", self.start.format("%H:%M"), self.end.format("%H:%M"))
    }
}

/// Stable sort by start time; appointments sharing a start keep their wire order.
pub fn sort_by_start(appointments: &mut [Appointment]) {
    appointments.sort_by_key(|appointment| appointment.start);
}

//! Overlap grouping and day filtering for the day view.
//!
//! Grouping is a single left-to-right scan over appointments sorted by start.
//! Each appointment is compared only against the most recently opened group;
//! groups that have already been closed are never revisited, so an
//! appointment overlapping an older group still opens a new one.

use chrono::NaiveDate;

use crate::calendar::Appointment;

/// An ordered, non-empty run of appointments laid out as one box.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlapGroup {
    members: Vec<Appointment>,
}

impl OverlapGroup {
    pub fn new(first: Appointment) -> Self {
        Self { members: vec![first] }
    }

    /// The first member, used for day filtering and primary rendering.
    pub fn representative(&self) -> &Appointment {
        &self.members[0]
    }

    pub fn members(&self) -> &[Appointment] {
        &self.members
    }

    /// Number of members hidden behind the "+N more" indicator.
    pub fn more_count(&self) -> usize {
        self.members.len() - 1
    }

    pub fn overlaps(&self, appointment: &Appointment) -> bool {
        self.members.iter().any(|member| appointment.overlaps(member))
    }

    fn push(&mut self, appointment: Appointment) {
        self.members.push(appointment);
    }

    pub fn into_members(self) -> Vec<Appointment> {
        self.members
    }
}

pub fn group_overlapping(sorted: &[Appointment]) -> Vec<OverlapGroup> {
    let mut groups: Vec<OverlapGroup> = Vec::new();

    for appointment in sorted {
        match groups.last_mut() {
            Some(current) if current.overlaps(appointment) => current.push(appointment.clone()),
            _ => groups.push(OverlapGroup::new(appointment.clone())),
        }
    }

    tracing::debug!("Grouped {} appointments into {} groups", sorted.len(), groups.len());
    groups
}

/// Keeps the groups whose representative starts on `day`, compared by local
/// year, month and day of month.
pub fn groups_on_day(groups: &[OverlapGroup], day: NaiveDate) -> Vec<&OverlapGroup> {
    groups
        .iter()
        .filter(|group| group.representative().start.date_naive() == day)
        .collect()
}

pub fn appointments_on_day(appointments: &[Appointment], day: NaiveDate) -> Vec<&Appointment> {
    appointments
        .iter()
        .filter(|appointment| appointment.start.date_naive() == day)
        .collect()
}

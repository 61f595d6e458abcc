pub mod appointment;
pub mod directory;
pub mod grouping;

pub use appointment::{Appointment, AppointmentId, sort_by_start};
pub use directory::{Department, DepartmentId, Employee, EmployeeId, EmployeeRef};
pub use grouping::{OverlapGroup, appointments_on_day, group_overlapping, groups_on_day};

use chrono::{DateTime, Days, Local, NaiveDate};

use crate::calendar::{
    Appointment, AppointmentId, Department, Employee, EmployeeRef, OverlapGroup,
    group_overlapping, groups_on_day, sort_by_start,
};
use crate::sync::requests::{
    FetchMessage, FetchOutcome, Request, RequestKind, RequestTicket, RequestTracker,
};
use crate::sync::sync_engine::AppointmentDetails;
use crate::ui::grid::GridConfig;
use crate::ui::theme::Theme;

#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Normal,
    Command,
    Dialog,
}

/// Actions the UI offers but the backend does not support yet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StubAction {
    NewAppointment,
    Save,
    Update,
    AddParticipant,
    RemoveParticipant,
}

impl StubAction {
    pub fn message(&self) -> &'static str {
        match self {
            StubAction::NewAppointment => "New appointment (not implemented)",
            StubAction::Save => "Save (not implemented)",
            StubAction::Update => "Update (not implemented)",
            StubAction::AddParticipant => "Adding participant (not implemented)",
            StubAction::RemoveParticipant => "Remove participant (not implemented)",
        }
    }
}

/// State of the appointment details dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct AppointmentDialog {
    pub appointment_id: AppointmentId,
    pub is_loading: bool,
    pub appointment: Option<Appointment>,
    pub departments: Vec<Department>,
    pub department_cursor: usize,
    pub selected_department: Option<Department>,
    pub department_employees: Vec<Employee>,
}

impl AppointmentDialog {
    pub fn loading(appointment_id: AppointmentId) -> Self {
        Self {
            appointment_id,
            is_loading: true,
            appointment: None,
            departments: Vec::new(),
            department_cursor: 0,
            selected_department: None,
            department_employees: Vec::new(),
        }
    }

    pub fn move_department_cursor_down(&mut self) {
        if !self.departments.is_empty() && self.department_cursor < self.departments.len() - 1 {
            self.department_cursor += 1;
        }
    }

    pub fn move_department_cursor_up(&mut self) {
        self.department_cursor = self.department_cursor.saturating_sub(1);
    }

    /// The appointment's assigned employee, joined against the loaded employees.
    pub fn assigned_employee(&self) -> Option<EmployeeRef> {
        let appointment = self.appointment.as_ref()?;
        appointment
            .employee
            .as_ref()
            .map(|employee| employee.resolve(&self.department_employees))
    }
}

pub struct AppState {
    pub mode: Mode,
    pub selected_date: NaiveDate,
    pub appointments: Vec<Appointment>,
    pub groups: Vec<OverlapGroup>,
    pub is_loading: bool,
    pub grid: GridConfig,
    pub rows_per_hour: u16,
    pub date_format: String,
    pub theme: Theme,
    pub command_buffer: String,
    pub show_help: bool,
    pub help_scroll: usize,
    pub selected_group_index: usize,
    pub grid_scroll: usize,
    pub dialog: Option<AppointmentDialog>,
    pub notice: Option<String>,
    requests: RequestTracker,
    pending_requests: Vec<(RequestTicket, Request)>,
}

/// The first appointment starting at or after `now`, else today.
pub fn initial_date(appointments: &[Appointment], now: DateTime<Local>) -> NaiveDate {
    appointments
        .iter()
        .find(|appointment| appointment.start >= now)
        .map(|appointment| appointment.start.date_naive())
        .unwrap_or_else(|| now.date_naive())
}

impl AppState {
    pub fn new() -> Self {
        Self {
            mode: Mode::Normal,
            selected_date: Local::now().date_naive(),
            appointments: Vec::new(),
            groups: Vec::new(),
            is_loading: true,
            grid: GridConfig::default(),
            rows_per_hour: 2,
            date_format: "%A, %B %d, %Y".to_string(),
            theme: Theme::default(),
            command_buffer: String::new(),
            show_help: false,
            help_scroll: 0,
            selected_group_index: 0,
            grid_scroll: 0,
            dialog: None,
            notice: None,
            requests: RequestTracker::new(),
            pending_requests: Vec::new(),
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_grid(mut self, grid: GridConfig, rows_per_hour: u16) -> Self {
        self.grid = grid;
        self.rows_per_hour = rows_per_hour.max(1);
        self
    }

    /// Replaces the cached appointments wholesale and regroups them.
    pub fn replace_appointments(&mut self, mut appointments: Vec<Appointment>, now: DateTime<Local>) {
        sort_by_start(&mut appointments);
        self.groups = group_overlapping(&appointments);
        self.selected_date = initial_date(&appointments, now);
        self.appointments = appointments;
        self.is_loading = false;
        self.reset_group_selection();
    }

    pub fn groups_for_selected_day(&self) -> Vec<&OverlapGroup> {
        groups_on_day(&self.groups, self.selected_date)
    }

    /// Groups of the selected day that the grid draws as a box. Selection
    /// indexes into this list.
    pub fn selectable_groups(&self) -> Vec<&OverlapGroup> {
        self.groups_for_selected_day()
            .into_iter()
            .filter(|group| self.grid.place(group.representative()).is_some())
            .collect()
    }

    pub fn selected_group(&self) -> Option<&OverlapGroup> {
        self.selectable_groups()
            .get(self.selected_group_index)
            .copied()
    }

    pub fn move_group_selection_down(&mut self) {
        let count = self.selectable_groups().len();
        if count > 0 && self.selected_group_index < count - 1 {
            self.selected_group_index += 1;
        }
    }

    pub fn move_group_selection_up(&mut self) {
        self.selected_group_index = self.selected_group_index.saturating_sub(1);
    }

    pub fn reset_group_selection(&mut self) {
        self.selected_group_index = 0;
    }

    pub fn go_to_date(&mut self, date: NaiveDate) {
        self.selected_date = date;
        self.reset_group_selection();
    }

    pub fn previous_day(&mut self) {
        if let Some(date) = self.selected_date.checked_sub_days(Days::new(1)) {
            self.go_to_date(date);
        }
    }

    pub fn next_day(&mut self) {
        if let Some(date) = self.selected_date.checked_add_days(Days::new(1)) {
            self.go_to_date(date);
        }
    }

    pub fn request_reload(&mut self) {
        self.enqueue(Request::Appointments);
    }

    /// Opens the details dialog for the selected group's representative.
    pub fn open_details(&mut self) {
        let Some(id) = self.selected_group().map(|group| group.representative().id) else {
            tracing::error!("No such appointment");
            return;
        };

        tracing::info!("Opening details for appointment {}", id);
        self.requests.invalidate(RequestKind::DepartmentEmployees);
        self.dialog = Some(AppointmentDialog::loading(id));
        self.mode = Mode::Dialog;
        self.enqueue(Request::AppointmentDetails(id));
    }

    /// Closes the dialog; responses still in flight for it are discarded.
    pub fn close_dialog(&mut self) {
        self.dialog = None;
        self.mode = Mode::Normal;
        self.requests.invalidate(RequestKind::AppointmentDetails);
        self.requests.invalidate(RequestKind::DepartmentEmployees);
    }

    pub fn choose_department(&mut self) {
        let Some(dialog) = self.dialog.as_mut() else { return };
        let Some(department) = dialog.departments.get(dialog.department_cursor).cloned() else {
            tracing::error!("No department selected");
            return;
        };

        let department_id = department.id;
        dialog.selected_department = Some(department);
        dialog.department_employees.clear();
        self.enqueue(Request::DepartmentEmployees(department_id));
    }

    pub fn notify_not_implemented(&mut self, action: StubAction) {
        tracing::info!("{}", action.message());
        self.notice = Some(action.message().to_string());
    }

    fn enqueue(&mut self, request: Request) {
        let ticket = self.requests.begin(request.kind());
        self.pending_requests.push((ticket, request));
    }

    pub fn take_pending_requests(&mut self) -> Vec<(RequestTicket, Request)> {
        std::mem::take(&mut self.pending_requests)
    }

    /// Applies a finished fetch. Stale results and failures leave the state
    /// untouched; failures are only logged.
    pub fn apply_fetch(&mut self, message: FetchMessage, now: DateTime<Local>) -> bool {
        if !self.requests.is_current(&message.ticket) {
            tracing::debug!("Discarding stale {:?} response", message.ticket.kind);
            return false;
        }

        let outcome = match message.result {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!("{:?} fetch failed: {}", message.ticket.kind, e);
                return false;
            }
        };

        match outcome {
            FetchOutcome::Appointments(appointments) => {
                self.replace_appointments(appointments, now);
                true
            }
            FetchOutcome::Details(details) => self.apply_details(details),
            FetchOutcome::Employees(employees) => match self.dialog.as_mut() {
                Some(dialog) => {
                    dialog.department_employees = employees;
                    true
                }
                None => false,
            },
        }
    }

    fn apply_details(&mut self, details: AppointmentDetails) -> bool {
        let Some(dialog) = self.dialog.as_mut() else { return false };
        if dialog.appointment_id != details.appointment.id {
            return false;
        }

        dialog.appointment = Some(details.appointment);
        dialog.departments = details.departments;
        dialog.department_cursor = 0;
        dialog.is_loading = false;
        true
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::appointment::test_support::{appointment, at, jan};
    use crate::sync::api::ApiError;
    use crate::sync::sync_engine::SyncError;
    use pretty_assertions::assert_eq;

    fn loaded_state() -> AppState {
        let mut state = AppState::new();
        state.replace_appointments(
            vec![
                appointment(3, jan(15), (12, 0), (13, 0)),
                appointment(1, jan(15), (9, 0), (10, 0)),
                appointment(2, jan(15), (9, 30), (11, 0)),
                appointment(4, jan(16), (9, 0), (10, 0)),
            ],
            at(jan(15), 8, 0),
        );
        state
    }

    fn department(id: i64, name: &str) -> Department {
        Department {
            id,
            name: name.to_string(),
            description: String::new(),
            manager: None,
        }
    }

    fn employee(id: i64, name: &str) -> Employee {
        Employee {
            id,
            name: name.to_string(),
            email: String::new(),
            position: None,
            department: Some(1),
        }
    }

    fn answer(state: &mut AppState, outcome: FetchOutcome) -> bool {
        let (ticket, _) = state.take_pending_requests().pop().unwrap();
        state.apply_fetch(FetchMessage { ticket, result: Ok(outcome) }, at(jan(15), 8, 0))
    }

    #[test]
    fn initial_date_is_first_upcoming_appointment() {
        let list = vec![
            appointment(1, jan(14), (9, 0), (10, 0)),
            appointment(2, jan(17), (9, 0), (10, 0)),
        ];

        assert_eq!(initial_date(&list, at(jan(15), 12, 0)), jan(17));
    }

    #[test]
    fn initial_date_falls_back_to_today() {
        let list = vec![appointment(1, jan(14), (9, 0), (10, 0))];

        assert_eq!(initial_date(&list, at(jan(15), 12, 0)), jan(15));
        assert_eq!(initial_date(&[], at(jan(15), 12, 0)), jan(15));
    }

    #[test]
    fn replacing_appointments_sorts_groups_and_selects_date() {
        let state = loaded_state();

        assert!(!state.is_loading);
        assert_eq!(state.selected_date, jan(15));
        assert_eq!(state.groups.len(), 3);
        let day_ids: Vec<_> = state
            .groups_for_selected_day()
            .iter()
            .map(|group| group.representative().id)
            .collect();
        assert_eq!(day_ids, vec![1, 3]);
    }

    #[test]
    fn group_selection_is_bounded_by_day() {
        let mut state = loaded_state();

        state.move_group_selection_down();
        state.move_group_selection_down();
        assert_eq!(state.selected_group_index, 1);

        state.move_group_selection_up();
        state.move_group_selection_up();
        assert_eq!(state.selected_group_index, 0);
    }

    #[test]
    fn off_grid_groups_cannot_be_selected() {
        let mut state = AppState::new();
        state.replace_appointments(
            vec![
                appointment(1, jan(15), (9, 0), (10, 0)),
                appointment(2, jan(15), (22, 30), (23, 30)),
            ],
            at(jan(15), 7, 0),
        );
        assert_eq!(state.groups_for_selected_day().len(), 2);

        state.move_group_selection_down();
        assert_eq!(state.selected_group_index, 0);

        state.open_details();
        let requests: Vec<_> = state.take_pending_requests().into_iter().map(|(_, r)| r).collect();
        assert_eq!(requests, vec![Request::AppointmentDetails(1)]);
    }

    #[test]
    fn day_navigation_resets_selection() {
        let mut state = loaded_state();
        state.move_group_selection_down();

        state.next_day();

        assert_eq!(state.selected_date, jan(16));
        assert_eq!(state.selected_group_index, 0);

        state.previous_day();
        assert_eq!(state.selected_date, jan(15));
    }

    #[test]
    fn opening_details_without_selection_does_nothing() {
        let mut state = AppState::new();

        state.open_details();

        assert_eq!(state.dialog, None);
        assert_eq!(state.mode, Mode::Normal);
        assert!(state.take_pending_requests().is_empty());
    }

    #[test]
    fn opening_details_requests_representative() {
        let mut state = loaded_state();

        state.open_details();

        assert_eq!(state.mode, Mode::Dialog);
        assert!(state.dialog.as_ref().unwrap().is_loading);
        let requests: Vec<_> = state.take_pending_requests().into_iter().map(|(_, r)| r).collect();
        assert_eq!(requests, vec![Request::AppointmentDetails(1)]);
    }

    #[test]
    fn details_response_fills_dialog() {
        let mut state = loaded_state();
        state.open_details();

        let applied = answer(
            &mut state,
            FetchOutcome::Details(AppointmentDetails {
                appointment: appointment(1, jan(15), (9, 0), (10, 0)),
                departments: vec![department(1, "Sales")],
            }),
        );

        assert!(applied);
        let dialog = state.dialog.as_ref().unwrap();
        assert!(!dialog.is_loading);
        assert_eq!(dialog.departments.len(), 1);
    }

    #[test]
    fn response_after_dialog_closed_is_discarded() {
        let mut state = loaded_state();
        state.open_details();
        let (ticket, _) = state.take_pending_requests().pop().unwrap();

        state.close_dialog();
        let applied = state.apply_fetch(
            FetchMessage {
                ticket,
                result: Ok(FetchOutcome::Details(AppointmentDetails {
                    appointment: appointment(1, jan(15), (9, 0), (10, 0)),
                    departments: vec![],
                })),
            },
            at(jan(15), 8, 0),
        );

        assert!(!applied);
        assert_eq!(state.dialog, None);
    }

    #[test]
    fn only_latest_department_selection_applies() {
        let mut state = loaded_state();
        state.open_details();
        answer(
            &mut state,
            FetchOutcome::Details(AppointmentDetails {
                appointment: appointment(1, jan(15), (9, 0), (10, 0)),
                departments: vec![department(1, "Sales"), department(2, "Support")],
            }),
        );

        state.choose_department();
        let (first, _) = state.take_pending_requests().pop().unwrap();
        state.dialog.as_mut().unwrap().move_department_cursor_down();
        state.choose_department();
        let (second, request) = state.take_pending_requests().pop().unwrap();

        assert_eq!(request, Request::DepartmentEmployees(2));
        let now = at(jan(15), 8, 0);
        let stale = state.apply_fetch(
            FetchMessage { ticket: first, result: Ok(FetchOutcome::Employees(vec![employee(1, "Ada")])) },
            now,
        );
        let fresh = state.apply_fetch(
            FetchMessage { ticket: second, result: Ok(FetchOutcome::Employees(vec![employee(2, "Grace")])) },
            now,
        );

        assert!(!stale);
        assert!(fresh);
        let dialog = state.dialog.as_ref().unwrap();
        assert_eq!(dialog.selected_department.as_ref().unwrap().name, "Support");
        assert_eq!(dialog.department_employees, vec![employee(2, "Grace")]);
    }

    #[test]
    fn failed_fetch_leaves_previous_state() {
        let mut state = loaded_state();
        state.request_reload();
        let (ticket, _) = state.take_pending_requests().pop().unwrap();

        let applied = state.apply_fetch(
            FetchMessage {
                ticket,
                result: Err(SyncError::ApiError(ApiError::NotFound("/appointments/".to_string()))),
            },
            at(jan(15), 8, 0),
        );

        assert!(!applied);
        assert_eq!(state.appointments.len(), 4);
    }

    #[test]
    fn failed_initial_fetch_stays_loading() {
        let mut state = AppState::new();
        state.request_reload();
        let (ticket, _) = state.take_pending_requests().pop().unwrap();

        state.apply_fetch(
            FetchMessage { ticket, result: Err(SyncError::MissingIdentifier) },
            at(jan(15), 8, 0),
        );

        assert!(state.is_loading);
    }

    #[test]
    fn assigned_employee_is_joined_by_id() {
        let mut dialog = AppointmentDialog::loading(1);
        let mut a = appointment(1, jan(15), (9, 0), (10, 0));
        a.employee = Some(EmployeeRef::Unresolved(2));
        dialog.appointment = Some(a);
        dialog.department_employees = vec![employee(2, "Grace")];

        assert_eq!(dialog.assigned_employee().unwrap().display_name(), "Grace");
    }

    #[test]
    fn stub_actions_set_notice() {
        let mut state = AppState::new();

        state.notify_not_implemented(StubAction::Save);

        assert_eq!(state.notice.as_deref(), Some("Save (not implemented)"));
    }
}

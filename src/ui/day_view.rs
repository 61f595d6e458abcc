use chrono::NaiveDate;

use crate::app::AppState;
use crate::calendar::{AppointmentId, OverlapGroup, groups_on_day};
use crate::ui::grid::{BoxGeometry, GridConfig};

#[derive(Debug, Clone, PartialEq)]
pub struct DayLayout {
    pub date: NaiveDate,
    pub is_today: bool,
    pub hour_labels: Vec<String>,
    pub boxes: Vec<GroupBox>,
    /// Groups on this day that the grid policy left out.
    pub off_grid: usize,
}

/// One rendered box: a group drawn at its representative's position.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupBox {
    /// Position among the drawn boxes, the same index as
    /// `AppState::selected_group_index`.
    pub group_index: usize,
    pub appointment_id: AppointmentId,
    pub title: String,
    pub time_label: String,
    pub geometry: BoxGeometry,
    pub more_count: usize,
}

impl GroupBox {
    pub fn more_label(&self) -> Option<String> {
        (self.more_count > 0).then(|| format!("+{} more", self.more_count))
    }
}

pub fn calculate_layout(state: &AppState) -> DayLayout {
    let today = chrono::Local::now().date_naive();
    layout_groups(&state.groups, state.selected_date, &state.grid, today)
}

pub fn layout_groups(
    groups: &[OverlapGroup],
    date: NaiveDate,
    grid: &GridConfig,
    today: NaiveDate,
) -> DayLayout {
    let day_groups = groups_on_day(groups, date);
    let mut boxes = Vec::new();
    let mut off_grid = 0;

    for group in &day_groups {
        let representative = group.representative();
        match grid.place(representative) {
            Some(geometry) => boxes.push(GroupBox {
                group_index: boxes.len(),
                appointment_id: representative.id,
                title: representative.title.clone(),
                time_label: representative.time_label(),
                geometry,
                more_count: group.more_count(),
            }),
            None => off_grid += 1,
        }
    }

    if off_grid > 0 {
        tracing::debug!("{} groups on {} fall outside the grid", off_grid, date);
    }

    DayLayout {
        date,
        is_today: date == today,
        hour_labels: grid.hour_labels(),
        boxes,
        off_grid,
    }
}

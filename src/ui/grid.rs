use chrono::{DateTime, Local, Timelike};
use serde::{Deserialize, Serialize};

use crate::calendar::Appointment;

const MINUTES_PER_DAY: i64 = 24 * 60;

/// What to do with boxes that fall partly or wholly outside the grid window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutOfRangePolicy {
    /// Clip boxes to the window and drop boxes entirely outside it.
    #[default]
    Clamp,
    /// Drop any box that is not fully inside the window.
    Reject,
    /// Keep the unclipped offsets, which may be negative or past the last row.
    Raw,
}

/// Fixed-hour coordinate system of the day view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub first_hour: u32,
    pub hour_rows: u32,
    pub pixels_per_hour: f64,
    /// Added to every box top for visual alignment with the hour lines.
    pub top_offset: f64,
    /// Added to every box height.
    pub height_offset: f64,
    pub out_of_range: OutOfRangePolicy,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxGeometry {
    pub top: f64,
    pub height: f64,
    pub clipped: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            first_hour: 6,
            hour_rows: 16,
            pixels_per_hour: 64.0,
            top_offset: 8.0,
            height_offset: 8.0,
            out_of_range: OutOfRangePolicy::Clamp,
        }
    }
}

impl GridConfig {
    pub fn without_offsets(mut self) -> Self {
        self.top_offset = 0.0;
        self.height_offset = 0.0;
        self
    }

    pub fn grid_height(&self) -> f64 {
        self.hour_rows as f64 * self.pixels_per_hour
    }

    pub fn hour_labels(&self) -> Vec<String> {
        (0..self.hour_rows)
            .map(|row| format!("{:02}:00", self.first_hour + row))
            .collect()
    }

    fn window_minutes(&self) -> i64 {
        self.hour_rows as i64 * 60
    }

    fn minutes_to_px(&self, minutes: i64) -> f64 {
        minutes as f64 / 60.0 * self.pixels_per_hour
    }

    fn minutes_from_grid_start(&self, time: &DateTime<Local>) -> i64 {
        time.hour() as i64 * 60 + time.minute() as i64 - self.first_hour as i64 * 60
    }

    // An end on a later calendar day than the start counts a full day per day elapsed.
    fn end_minutes_from_grid_start(&self, appointment: &Appointment) -> i64 {
        let days = (appointment.end.date_naive() - appointment.start.date_naive()).num_days();
        self.minutes_from_grid_start(&appointment.end) + days * MINUTES_PER_DAY
    }

    /// `(start.hour - first_hour) * pph + start.minute / 60 * pph + top_offset`
    pub fn raw_top(&self, appointment: &Appointment) -> f64 {
        self.minutes_to_px(self.minutes_from_grid_start(&appointment.start)) + self.top_offset
    }

    /// `(end.hour - start.hour) * pph + (end.minute - start.minute) / 60 * pph + height_offset`
    pub fn raw_height(&self, appointment: &Appointment) -> f64 {
        let start = self.minutes_from_grid_start(&appointment.start);
        let end = self.end_minutes_from_grid_start(appointment);
        self.minutes_to_px(end - start) + self.height_offset
    }

    /// Places an appointment on the grid according to the configured policy.
    /// Returns `None` when the policy drops the box.
    pub fn place(&self, appointment: &Appointment) -> Option<BoxGeometry> {
        let start = self.minutes_from_grid_start(&appointment.start);
        let end = self.end_minutes_from_grid_start(appointment);
        let window = self.window_minutes();

        match self.out_of_range {
            OutOfRangePolicy::Raw => Some(BoxGeometry {
                top: self.raw_top(appointment),
                height: self.raw_height(appointment),
                clipped: false,
            }),
            OutOfRangePolicy::Reject => {
                if start < 0 || start >= window || end > window {
                    None
                } else {
                    Some(BoxGeometry {
                        top: self.raw_top(appointment),
                        height: self.raw_height(appointment),
                        clipped: false,
                    })
                }
            }
            OutOfRangePolicy::Clamp => {
                let visible = if end <= start {
                    (0..window).contains(&start)
                } else {
                    start < window && end > 0
                };
                if !visible {
                    return None;
                }

                let clamped_start = start.clamp(0, window);
                let clamped_end = end.clamp(clamped_start, window);
                Some(BoxGeometry {
                    top: self.minutes_to_px(clamped_start) + self.top_offset,
                    height: self.minutes_to_px(clamped_end - clamped_start) + self.height_offset,
                    clipped: start < 0 || end > window,
                })
            }
        }
    }

    /// Converts a pixel offset to terminal rows. Rounds down so that the
    /// alignment offsets stay below one row at typical densities.
    pub fn px_to_rows(&self, px: f64, rows_per_hour: u16) -> i32 {
        (px / self.pixels_per_hour * rows_per_hour as f64).floor() as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::appointment::test_support::{appointment, at, jan};

    fn grid(policy: OutOfRangePolicy) -> GridConfig {
        GridConfig {
            out_of_range: policy,
            ..GridConfig::default()
        }
        .without_offsets()
    }

    #[test]
    fn nine_to_ten_sits_three_hours_down_one_hour_tall() {
        let a = appointment(1, jan(15), (9, 0), (10, 0));

        let geometry = grid(OutOfRangePolicy::Clamp).place(&a).unwrap();

        assert_eq!(geometry.top, 192.0);
        assert_eq!(geometry.height, 64.0);
        assert!(!geometry.clipped);
    }

    #[test]
    fn default_alignment_offsets_are_applied() {
        let a = appointment(1, jan(15), (9, 0), (10, 0));

        let geometry = GridConfig::default().place(&a).unwrap();

        assert_eq!(geometry.top, 200.0);
        assert_eq!(geometry.height, 72.0);
    }

    #[test]
    fn minutes_contribute_fractional_hours() {
        let a = appointment(1, jan(15), (9, 15), (9, 45));
        let grid = grid(OutOfRangePolicy::Raw);

        assert_eq!(grid.raw_top(&a), 208.0);
        assert_eq!(grid.raw_height(&a), 32.0);
    }

    #[test]
    fn raw_formula_goes_negative_before_grid_start() {
        let a = appointment(1, jan(15), (5, 0), (7, 0));

        let geometry = grid(OutOfRangePolicy::Raw).place(&a).unwrap();

        assert_eq!(geometry.top, -64.0);
        assert_eq!(geometry.height, 128.0);
    }

    #[test]
    fn clamp_clips_box_starting_before_grid() {
        let a = appointment(1, jan(15), (5, 0), (7, 0));

        let geometry = grid(OutOfRangePolicy::Clamp).place(&a).unwrap();

        assert_eq!(geometry.top, 0.0);
        assert_eq!(geometry.height, 64.0);
        assert!(geometry.clipped);
    }

    #[test]
    fn clamp_drops_box_entirely_after_grid() {
        let a = appointment(1, jan(15), (22, 0), (23, 0));

        assert_eq!(grid(OutOfRangePolicy::Clamp).place(&a), None);
    }

    #[test]
    fn clamp_drops_box_entirely_before_grid() {
        let a = appointment(1, jan(15), (4, 0), (6, 0));

        assert_eq!(grid(OutOfRangePolicy::Clamp).place(&a), None);
    }

    #[test]
    fn clamp_keeps_zero_length_box_inside_window() {
        let a = appointment(1, jan(15), (6, 0), (6, 0));

        let geometry = grid(OutOfRangePolicy::Clamp).place(&a).unwrap();

        assert_eq!(geometry.top, 0.0);
        assert_eq!(geometry.height, 0.0);
    }

    #[test]
    fn box_spanning_midnight_counts_the_extra_day() {
        let mut a = appointment(1, jan(15), (21, 0), (23, 0));
        a.end = at(jan(16), 1, 0);

        assert_eq!(grid(OutOfRangePolicy::Raw).raw_height(&a), 256.0);

        let clamped = grid(OutOfRangePolicy::Clamp).place(&a).unwrap();
        assert_eq!(clamped.top, 960.0);
        assert_eq!(clamped.height, 64.0);
        assert!(clamped.clipped);
    }

    #[test]
    fn reject_drops_partially_outside_box() {
        let a = appointment(1, jan(15), (21, 30), (22, 30));

        assert_eq!(grid(OutOfRangePolicy::Reject).place(&a), None);
    }

    #[test]
    fn reject_keeps_box_ending_at_grid_end() {
        let a = appointment(1, jan(15), (21, 0), (22, 0));

        let geometry = grid(OutOfRangePolicy::Reject).place(&a).unwrap();

        assert_eq!(geometry.top, 960.0);
        assert_eq!(geometry.height, 64.0);
    }

    #[test]
    fn hour_labels_cover_sixteen_rows_from_six() {
        let labels = GridConfig::default().hour_labels();

        assert_eq!(labels.len(), 16);
        assert_eq!(labels.first().map(String::as_str), Some("06:00"));
        assert_eq!(labels.last().map(String::as_str), Some("21:00"));
        assert_eq!(GridConfig::default().grid_height(), 1024.0);
    }

    #[test]
    fn pixel_offsets_convert_to_whole_rows() {
        let grid = GridConfig::default();

        assert_eq!(grid.px_to_rows(200.0, 4), 12);
        assert_eq!(grid.px_to_rows(72.0, 4), 4);
        assert_eq!(grid.px_to_rows(0.0, 2), 0);
    }

    #[test]
    fn policy_parses_from_lowercase_names() {
        let policy: OutOfRangePolicy = serde_json::from_str("\"reject\"").unwrap();

        assert_eq!(policy, OutOfRangePolicy::Reject);
    }
}

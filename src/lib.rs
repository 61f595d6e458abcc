pub mod calendar;
pub mod input;
pub mod ui;
pub mod sync;
pub mod storage;
pub mod app;

pub use calendar::{Appointment, OverlapGroup};
pub use app::{AppState, Mode, StubAction};

pub use input::{normal_mode, command_mode, dialog_mode};

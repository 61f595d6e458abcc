pub mod command_mode;
pub mod dialog_mode;
pub mod normal_mode;

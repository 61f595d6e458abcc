pub mod appointment;
pub mod help;

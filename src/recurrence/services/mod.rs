//! Application services for recurring task generation.

mod scheduler;

pub use scheduler::{RecurrenceScheduler, ScheduleError, should_generate};

mod business_hours;
mod errors;
pub mod espera;
pub mod status;
mod trajectory_step;

pub use business_hours::{day_key, is_open_now, BusinessHours, DaySchedule};
pub use errors::DomainError;
pub use espera::Espera;
pub use trajectory_step::{SourceStatus, TrajectoryStep, WILDCARD};

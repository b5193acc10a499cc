mod input_error;
mod request;
mod reserved;
mod task;

pub use input_error::InputError;
pub use request::ScheduleRequest;
pub use reserved::ReservedInterval;
pub use reserved::ReservedTagInterval;
pub use task::Task;
pub use task::TaskId;

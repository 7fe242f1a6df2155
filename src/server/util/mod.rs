//! Small helpers shared by services, tasks and controllers.

pub mod eve;
pub mod time;

//! Application repositories.
//!
//! - `application` - the application rows, their guarded status updates and admin listing
//! - `answer` - language and interest rows belonging to an application's questionnaire

pub mod answer;
pub mod application;

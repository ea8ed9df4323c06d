#![forbid(unsafe_code)]

pub mod error;
pub mod study_session;

pub use error::StudyError;
pub use study_session::{MasteryToggle, StudySession};

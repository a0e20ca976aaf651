pub mod submission;

pub use submission::{StoredSurveyRecord, SurveySubmission};

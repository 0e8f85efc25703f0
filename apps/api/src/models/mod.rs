pub mod job;
pub mod lenient;
pub mod resume;

pub use job::{JobMatch, ScrapedJob, UserPreferences};
pub use resume::ResumeRecord;

pub mod attempt_record;
pub mod attempt_result;
pub mod attempt_session;
pub mod chapter_summary;
pub mod level;
pub mod level_counter;
pub mod question;
pub use attempt_record::AttemptRecord;
pub use attempt_result::AttemptResult;
pub use attempt_session::{AttemptSession, SessionState};
pub use chapter_summary::{ChapterInfo, ChapterStatus, ChapterSummary};
pub use level::Level;
pub use level_counter::LevelOutcomeCounter;
pub use question::Question;

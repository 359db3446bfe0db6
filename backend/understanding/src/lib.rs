//! Exam page understanding: the extraction prompt, provider adapters and
//! cleanup of what comes back.

pub mod cleanup;
pub mod mime_detect;
pub mod prompt;
pub mod providers;
pub mod segment;

pub use cleanup::clean_completion;
pub use mime_detect::resolve_image_mime;
pub use prompt::build_prompt;
pub use providers::{build_provider, ProviderSettings};
pub use segment::{break_sub_questions, classify_question, segment_questions, QuestionKind};

//! Article-to-narration pipeline.
//!
//! Four stages run strictly one after another:
//! extract → translate title → translate content → synthesize.
//! The first failure ends the job.

pub mod orchestrator;
pub mod types;

pub use orchestrator::Pipeline;
pub use types::{JobReport, PipelineJob, TranslatedArticle};

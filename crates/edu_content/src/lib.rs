//! # edu_content
//!
//! Content-side views of EduPilot:
//!
//! - **Registry**: the catalog of reusable course content and its
//!   search/filter predicate
//! - **Pipeline**: the staged content generation pipeline (direction →
//!   curriculum → lessons → slides → practice templates → tool picks) with a
//!   simulated generation run
//! - **Versions**: semantic-versioned content releases moving through
//!   draft → review → approved → deployed, with rollback of archived releases

pub mod error;
pub mod pipeline;
pub mod registry;
pub mod versions;

pub use error::{ContentError, ContentResult};
pub use pipeline::{
    format_secs, practice_templates, sample_curriculum, slide_structure, ContentGenerator,
    Curriculum, CurriculumWeek, GenerationPipeline, PipelineStage, PracticeTemplate,
    SlideSection, StageStatus,
};
pub use registry::{
    filter_content, sample_catalog, ContentFilter, ContentItem, ContentRegistry, ContentStatus,
    Difficulty, Selection, CATEGORIES, POPULAR_REUSE_THRESHOLD,
};
pub use versions::{
    sample_release_notes, ChangeKind, ContentVersion, DeploymentStats, ReleaseChange,
    ReleaseNotes, VersionHistory, VersionStatus,
};

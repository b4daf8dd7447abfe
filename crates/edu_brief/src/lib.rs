//! # edu_brief
//!
//! The brief wizard: a four-step form that gathers information about a
//! training audience and then asks a generation service for a structured
//! brief (direction, personas, KPIs, risks, quality score).
//!
//! # States
//!
//! ```text
//! Step1 ⇄ Step2 ⇄ Step3 ⇄ Step4Review ──generate──▶ Generating ──ok──▶ Result
//!                              ▲                        │
//!                              └────────failed──────────┘
//! ```
//!
//! The wizard owns all of its state. The presentation layer reads it through
//! [`BriefWizard::state`] and changes it only through the transition methods.
//!
//! # Example
//!
//! ```rust,no_run
//! use edu_brief::{BriefField, BriefWizard, SimulatedBriefGenerator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), edu_brief::BriefError> {
//!     let mut wizard = BriefWizard::new();
//!     wizard.update_field(BriefField::TargetGroup, "Local seniors");
//!     wizard.advance();
//!     wizard.advance();
//!     wizard.advance();
//!
//!     let generator = SimulatedBriefGenerator::new();
//!     if let Some(brief) = wizard.generate(&generator).await? {
//!         println!("Quality score: {}", brief.quality_score);
//!     }
//!     Ok(())
//! }
//! ```

pub mod brief;
pub mod error;
pub mod fields;
pub mod generator;
pub mod wizard;

pub use brief::{BriefRequest, GeneratedBrief, KpiProposal, Persona, RiskItem, QUALITY_BAR};
pub use error::{BriefError, BriefResult};
pub use fields::{BriefField, BriefFields};
pub use generator::{canned_brief, BriefGenerator, SimulatedBriefGenerator};
pub use wizard::{BriefWizard, ReviewLine, StepProgress, WizardState, WizardStatus, WizardStep};

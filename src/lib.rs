//! Deterministic effort estimation and reality checks for project proposals.
//!
//! Given a [`ProjectContext`] extracted from a user request, the crate
//! classifies deliverables, estimates hours, cost and timeline, and flags
//! unrealistic budgets, timelines, scope comparisons and technology choices.
//!
//! ```
//! use reality_check::{ProjectContext, ThresholdConfig, estimate, check};
//!
//! let config = ThresholdConfig::default();
//! let context = ProjectContext::new("Online store like Amazon")
//!     .with_project_type("E-commerce")
//!     .with_deliverables(["Product catalog", "Checkout", "Admin dashboard"])
//!     .with_budget_hint("$5,000");
//!
//! let estimation = estimate(&context, &config);
//! let warnings = check(&context, Some(&estimation), &config);
//! assert!(!warnings.is_empty());
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod estimation;
pub mod extract;
pub mod keywords;
pub mod quality;
pub mod sanity;

pub use config::ThresholdConfig;
pub use context::ProjectContext;
pub use error::{CheckError, ConfigError};
pub use estimation::{
    ClassifiedDeliverable, ComplexityTier, EstimationResult, Estimator, estimate,
};
pub use quality::{InformationQuality, assess_quality};
pub use sanity::{SanityChecker, Warning, WarningCategory, check};

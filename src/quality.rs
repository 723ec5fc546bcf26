//! How much the extracted context supports a numeric estimate.

use serde::{Deserialize, Serialize};

use crate::context::ProjectContext;

/// Completeness grade of a [`ProjectContext`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InformationQuality {
    High,
    Medium,
    Low,
}

impl InformationQuality {
    /// Whether an hour estimate is meaningful at this grade.
    pub fn allows_estimate(self) -> bool {
        matches!(self, Self::High | Self::Medium)
    }
}

/// Grade a context by its project type and deliverable count.
pub fn assess_quality(context: &ProjectContext) -> InformationQuality {
    let has_type = context
        .project_type
        .as_deref()
        .is_some_and(|t| !t.trim().is_empty());

    match (has_type, context.deliverables.len()) {
        (true, n) if n >= 3 => InformationQuality::High,
        (true, n) if n >= 1 => InformationQuality::Medium,
        _ => InformationQuality::Low,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grades() {
        let base = ProjectContext::new("Build a shop").with_project_type("E-commerce");

        let high = base.clone().with_deliverables(["Catalog", "Cart", "Checkout"]);
        assert_eq!(assess_quality(&high), InformationQuality::High);

        let medium = base.clone().with_deliverables(["Catalog"]);
        assert_eq!(assess_quality(&medium), InformationQuality::Medium);

        assert_eq!(assess_quality(&base), InformationQuality::Low);
    }

    #[test]
    fn test_missing_project_type_is_low() {
        let context = ProjectContext::new("Build a shop")
            .with_deliverables(["Catalog", "Cart", "Checkout", "Reviews"]);
        assert_eq!(assess_quality(&context), InformationQuality::Low);

        let blank = context.with_project_type("  ");
        assert_eq!(assess_quality(&blank), InformationQuality::Low);
    }

    #[test]
    fn test_allows_estimate() {
        assert!(InformationQuality::High.allows_estimate());
        assert!(InformationQuality::Medium.allows_estimate());
        assert!(!InformationQuality::Low.allows_estimate());
    }
}

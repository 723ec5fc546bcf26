//! Deliverable complexity classification.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::ThresholdConfig;
use crate::keywords::KeywordSet;

/// Complexity tier of a single deliverable, ordered from least to most effort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplexityTier {
    Simple,
    Medium,
    Complex,
    VeryComplex,
}

impl ComplexityTier {
    /// One step down for MVP-scoped requests. Simple and Medium stay put.
    pub fn downgrade(self) -> Self {
        match self {
            Self::VeryComplex => Self::Complex,
            Self::Complex => Self::Medium,
            other => other,
        }
    }

    /// Upper-case name used in serialized output and logs.
    pub fn label(self) -> &'static str {
        match self {
            Self::Simple => "SIMPLE",
            Self::Medium => "MEDIUM",
            Self::Complex => "COMPLEX",
            Self::VeryComplex => "VERY_COMPLEX",
        }
    }
}

impl fmt::Display for ComplexityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A deliverable with its tier and the hours it contributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedDeliverable {
    pub text: String,
    pub tier: ComplexityTier,
    /// Keywords that decided the tier; empty when the default applied.
    pub matched_keywords: Vec<String>,
    pub hours: u32,
    /// Whether MVP context lowered the tier.
    pub downgraded: bool,
}

/// Keyword-table classifier built from a [`ThresholdConfig`].
pub struct DeliverableClassifier<'c> {
    config: &'c ThresholdConfig,
    simple: Option<KeywordSet<'c>>,
    medium: Option<KeywordSet<'c>>,
    complex: Option<KeywordSet<'c>>,
    markers: &'c [String],
    mvp: Option<KeywordSet<'c>>,
}

impl<'c> DeliverableClassifier<'c> {
    /// Create a new classifier, compiling the keyword tables once.
    pub fn new(config: &'c ThresholdConfig) -> Self {
        let tables = &config.tier_keywords;
        Self {
            config,
            simple: compile("simple", KeywordSet::word_prefixes(&tables.simple)),
            medium: compile("medium", KeywordSet::word_prefixes(&tables.medium)),
            complex: compile("complex", KeywordSet::word_prefixes(&tables.complex)),
            markers: &tables.very_complex_markers,
            mvp: compile("mvp", KeywordSet::new(&config.mvp_keywords)),
        }
    }

    /// Whether the request asks for an MVP-sized build.
    pub fn is_mvp_context(&self, request_text: &str) -> bool {
        self.mvp
            .as_ref()
            .is_some_and(|set| set.contains_any(request_text))
    }

    /// Tier from the keyword tables alone, before any MVP adjustment.
    ///
    /// Very complex wins when two distinct complex keywords appear, or one
    /// complex keyword appears in text containing a marker such as "system".
    pub fn base_tier(&self, text: &str) -> (ComplexityTier, Vec<&'c str>) {
        let complex = find(&self.complex, text);
        let lower = text.to_lowercase();
        let markers: Vec<&'c str> = self
            .markers
            .iter()
            .filter(|m| !m.is_empty() && lower.contains(&m.to_lowercase()))
            .map(String::as_str)
            .collect();

        if complex.len() >= 2 || (!markers.is_empty() && !complex.is_empty()) {
            let mut matched = complex;
            if matched.len() < 2 {
                matched.extend(markers);
            }
            return (ComplexityTier::VeryComplex, matched);
        }
        if !complex.is_empty() {
            return (ComplexityTier::Complex, complex);
        }

        let medium = find(&self.medium, text);
        if !medium.is_empty() {
            return (ComplexityTier::Medium, medium);
        }

        let simple = find(&self.simple, text);
        if !simple.is_empty() {
            return (ComplexityTier::Simple, simple);
        }

        (ComplexityTier::Medium, Vec::new())
    }

    /// Classify one deliverable. `mvp_context` downgrades the tier once.
    pub fn classify(&self, text: &str, mvp_context: bool) -> ClassifiedDeliverable {
        let (base, matched) = self.base_tier(text);
        let tier = if mvp_context { base.downgrade() } else { base };

        ClassifiedDeliverable {
            text: text.to_string(),
            tier,
            matched_keywords: matched.into_iter().map(str::to_string).collect(),
            hours: self.config.tier_hours.hours(tier),
            downgraded: tier != base,
        }
    }

    /// Classify every deliverable of a request.
    pub fn classify_all(
        &self,
        deliverables: &[String],
        request_text: &str,
    ) -> Vec<ClassifiedDeliverable> {
        let mvp_context = self.is_mvp_context(request_text);
        deliverables
            .iter()
            .map(|text| {
                let classified = self.classify(text, mvp_context);
                tracing::debug!(
                    deliverable = %classified.text,
                    tier = %classified.tier,
                    hours = classified.hours,
                    matched = ?classified.matched_keywords,
                    downgraded = classified.downgraded,
                    "Classified deliverable"
                );
                classified
            })
            .collect()
    }
}

fn compile<'c>(
    table: &str,
    built: Result<KeywordSet<'c>, aho_corasick::BuildError>,
) -> Option<KeywordSet<'c>> {
    match built {
        Ok(set) => Some(set),
        Err(e) => {
            tracing::warn!("Ignoring {} keyword table: {}", table, e);
            None
        }
    }
}

fn find<'c>(set: &Option<KeywordSet<'c>>, text: &str) -> Vec<&'c str> {
    set.as_ref().map(|s| s.find(text)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_TIERS: [ComplexityTier; 4] = [
        ComplexityTier::Simple,
        ComplexityTier::Medium,
        ComplexityTier::Complex,
        ComplexityTier::VeryComplex,
    ];

    fn tier_of(text: &str) -> ComplexityTier {
        let config = ThresholdConfig::default();
        DeliverableClassifier::new(&config).base_tier(text).0
    }

    #[test]
    fn test_two_complex_keywords_are_very_complex() {
        for text in [
            "ERP accounting",
            "Admin dashboard",
            "Real-time analytics",
            "Payroll and HR reporting",
            "Fraud detection with machine learning",
        ] {
            assert_eq!(tier_of(text), ComplexityTier::VeryComplex, "{}", text);
        }
    }

    #[test]
    fn test_marker_with_one_complex_keyword() {
        assert_eq!(tier_of("Analytics platform"), ComplexityTier::VeryComplex);
        assert_eq!(tier_of("Chat system"), ComplexityTier::VeryComplex);
        assert_eq!(tier_of("Notification system"), ComplexityTier::Medium);
        assert_eq!(tier_of("Booking platform"), ComplexityTier::Medium);
    }

    #[test]
    fn test_single_tables() {
        assert_eq!(tier_of("Video streaming"), ComplexityTier::Complex);
        assert_eq!(tier_of("Payment integration"), ComplexityTier::Medium);
        assert_eq!(tier_of("Contact form"), ComplexityTier::Simple);
        assert_eq!(tier_of("Feature A"), ComplexityTier::Medium);
        assert_eq!(tier_of(""), ComplexityTier::Medium);
    }

    #[test]
    fn test_overlapping_complex_keywords_are_distinct() {
        let config = ThresholdConfig::default();
        let (tier, matched) =
            DeliverableClassifier::new(&config).base_tier("Inventory management");
        assert_eq!(tier, ComplexityTier::VeryComplex);
        assert_eq!(matched, vec!["inventory", "inventory management"]);
    }

    #[test]
    fn test_plural_and_compound_forms() {
        assert_eq!(tier_of("Inventory systems"), ComplexityTier::VeryComplex);
        assert_eq!(tier_of("Admin dashboards"), ComplexityTier::VeryComplex);
        assert_eq!(tier_of("Analytics platforms"), ComplexityTier::VeryComplex);
        assert_eq!(tier_of("Ecosystem reporting"), ComplexityTier::VeryComplex);
        assert_eq!(tier_of("Chatbot support"), ComplexityTier::Complex);
        assert_eq!(tier_of("Contact forms"), ComplexityTier::Simple);
        // Acronyms stay whole words.
        assert_eq!(tier_of("Airline seat map"), ComplexityTier::Medium);
    }

    #[test]
    fn test_precedence_over_lower_tables() {
        // "login" is simple, "dashboard" is complex.
        assert_eq!(tier_of("Login dashboard"), ComplexityTier::Complex);
        // "api" is medium, "page" is simple.
        assert_eq!(tier_of("API docs page"), ComplexityTier::Medium);
    }

    #[test]
    fn test_matched_keywords_reported() {
        let config = ThresholdConfig::default();
        let classifier = DeliverableClassifier::new(&config);

        let classified = classifier.classify("Reporting dashboard system", false);
        assert_eq!(classified.tier, ComplexityTier::VeryComplex);
        assert_eq!(classified.matched_keywords, vec!["dashboard", "reporting"]);
        assert_eq!(classified.hours, 500);

        let classified = classifier.classify("Analytics platform", false);
        assert_eq!(classified.matched_keywords, vec!["analytics", "platform"]);

        let classified = classifier.classify("Feature A", false);
        assert!(classified.matched_keywords.is_empty());
        assert_eq!(classified.hours, 150);
    }

    #[test]
    fn test_downgrade_is_monotone_with_fixed_points() {
        for tier in ALL_TIERS {
            assert!(tier.downgrade() <= tier);
        }
        assert_eq!(ComplexityTier::Simple.downgrade(), ComplexityTier::Simple);
        assert_eq!(ComplexityTier::Medium.downgrade(), ComplexityTier::Medium);
        assert_eq!(
            ComplexityTier::VeryComplex.downgrade(),
            ComplexityTier::Complex
        );
        assert_eq!(ComplexityTier::Complex.downgrade(), ComplexityTier::Medium);
    }

    #[test]
    fn test_mvp_downgrade_applies_once() {
        let config = ThresholdConfig::default();
        let classifier = DeliverableClassifier::new(&config);
        let request = "Startup MVP for a small clinic";
        assert!(classifier.is_mvp_context(request));

        let classified =
            classifier.classify_all(&["ERP accounting system".to_string()], request);
        assert_eq!(classified[0].tier, ComplexityTier::Complex);
        assert_eq!(classified[0].hours, 300);
        assert!(classified[0].downgraded);

        let classified = classifier.classify_all(&["Contact form".to_string()], request);
        assert_eq!(classified[0].tier, ComplexityTier::Simple);
        assert!(!classified[0].downgraded);
    }

    #[test]
    fn test_no_mvp_context() {
        let config = ThresholdConfig::default();
        let classifier = DeliverableClassifier::new(&config);
        assert!(!classifier.is_mvp_context("Enterprise CRM rollout"));
        assert!(!classifier.is_mvp_context("Basically a rebuild"));
    }
}

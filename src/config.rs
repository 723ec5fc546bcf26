//! Threshold configuration for the estimator and the sanity checker.
//!
//! Every number and keyword table the engine consults lives in
//! [`ThresholdConfig`]. The defaults reproduce the calibrated values; callers
//! override them from JSON (partial documents are fine, missing keys keep
//! their default) or from `PROPOSAL_*` environment variables.

use std::path::Path;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::estimation::ComplexityTier;

/// Immutable configuration shared by every component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThresholdConfig {
    /// Average budget per deliverable below which a budget is unrealistic.
    pub per_deliverable_budget_floor: Decimal,
    /// Total budget below which any project with deliverables is unrealistic.
    pub absolute_budget_floor: Decimal,
    pub tier_hours: TierHours,
    pub hourly_rate: HourlyRate,
    pub hours_per_week: f64,
    pub weeks_per_month: f64,
    /// Ordered, first match wins.
    pub project_type_multipliers: Vec<ProjectTypeMultiplier>,
    /// Multiplier used when the project type is absent or unrecognized.
    pub default_project_multiplier: f64,
    /// Applied in order; every matching group compounds.
    pub context_multipliers: Vec<ContextMultiplier>,
    pub outdated_tech_table: Vec<OutdatedTech>,
    pub massive_platform_table: Vec<MassivePlatform>,
    pub conflicting_pairs: Vec<ConflictGroup>,
    pub mvp_keywords: Vec<String>,
    pub tier_keywords: TierKeywords,
    pub version_floors: Vec<VersionFloor>,
    pub budget_rules: BudgetRules,
    pub timeline_rules: TimelineRules,
}

/// Base hours per complexity tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TierHours {
    pub simple: u32,
    pub medium: u32,
    pub complex: u32,
    pub very_complex: u32,
}

impl TierHours {
    /// Base hours for a deliverable of the given tier.
    pub fn hours(&self, tier: ComplexityTier) -> u32 {
        match tier {
            ComplexityTier::Simple => self.simple,
            ComplexityTier::Medium => self.medium,
            ComplexityTier::Complex => self.complex,
            ComplexityTier::VeryComplex => self.very_complex,
        }
    }
}

impl Default for TierHours {
    fn default() -> Self {
        Self {
            simple: 50,
            medium: 150,
            complex: 300,
            very_complex: 500,
        }
    }
}

/// Hourly rate band in dollars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HourlyRate {
    pub low: Decimal,
    pub high: Decimal,
}

impl HourlyRate {
    /// Midpoint of the band, used to turn hours into an expected budget.
    pub fn mid(&self) -> Decimal {
        (self.low + self.high) / dec!(2)
    }
}

impl Default for HourlyRate {
    fn default() -> Self {
        Self {
            low: dec!(80),
            high: dec!(120),
        }
    }
}

/// Project-type base multiplier. Matches when the project type label
/// contains any of `keywords` (case-insensitive).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectTypeMultiplier {
    pub label: String,
    pub keywords: Vec<String>,
    pub factor: f64,
}

/// Contextual keyword group found in the raw request text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextMultiplier {
    pub name: String,
    pub keywords: Vec<String>,
    pub factor: f64,
}

/// A deprecated technology and what to use instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutdatedTech {
    /// Display name used in warnings.
    pub name: String,
    /// Spellings that identify the technology.
    pub aliases: Vec<String>,
    pub alternative: String,
}

/// A well-known product whose scale dwarfs a typical project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MassivePlatform {
    /// Lowercase name as it appears in requests ("amazon").
    pub name: String,
    /// "Amazon-scale".
    pub scale_label: String,
    /// "$500M-$1B+".
    pub typical_cost: String,
}

/// Two sides of a technology choice that should not both appear.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictGroup {
    pub category: String,
    pub left: Vec<String>,
    pub right: Vec<String>,
}

/// Minimum supported major version of a technology.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionFloor {
    pub name: String,
    /// Regex fragment matching the technology name; the version follows it.
    pub pattern: String,
    pub min_major: u32,
    pub recommended: String,
}

/// Keyword tables for deliverable classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TierKeywords {
    pub simple: Vec<String>,
    pub medium: Vec<String>,
    pub complex: Vec<String>,
    /// Words that promote a single complex keyword to very complex.
    pub very_complex_markers: Vec<String>,
}

/// Thresholds for the budget rule group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BudgetRules {
    /// "Few deliverables" means strictly fewer than this.
    pub few_deliverables: usize,
    pub high_budget: Decimal,
    /// "Many deliverables" means strictly more than this.
    pub many_deliverables: usize,
    pub low_budget: Decimal,
    /// Per-deliverable floor applies from this many deliverables on.
    pub per_deliverable_min_count: usize,
    pub suggested_per_feature_low: Decimal,
    pub suggested_per_feature_high: Decimal,
    pub mismatch_low_ratio: Decimal,
    pub mismatch_high_ratio: Decimal,
}

impl Default for BudgetRules {
    fn default() -> Self {
        Self {
            few_deliverables: 3,
            high_budget: dec!(80000),
            many_deliverables: 10,
            low_budget: dec!(30000),
            per_deliverable_min_count: 3,
            suggested_per_feature_low: dec!(10000),
            suggested_per_feature_high: dec!(20000),
            mismatch_low_ratio: dec!(0.6),
            mismatch_high_ratio: dec!(1.5),
        }
    }
}

/// Thresholds for the timeline rule group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimelineRules {
    /// Request words that mark an e-commerce or platform project.
    pub domain_keywords: Vec<String>,
    /// Domain projects at or below this many months are unrealistic.
    pub domain_max_months: f64,
    /// Any project below this many months with enough deliverables is aggressive.
    pub aggressive_months: f64,
    pub aggressive_min_deliverables: usize,
    pub weeks_per_deliverable: f64,
    /// "Many deliverables" means strictly more than this.
    pub many_deliverables: usize,
    pub tight_months: f64,
    pub heavy_hours: u32,
    pub light_hours: u32,
    pub long_months: f64,
    pub short_ratio: f64,
    pub long_ratio: f64,
}

impl Default for TimelineRules {
    fn default() -> Self {
        Self {
            domain_keywords: strings(&["e-commerce", "ecommerce", "platform", "marketplace"]),
            domain_max_months: 1.0,
            aggressive_months: 1.0,
            aggressive_min_deliverables: 3,
            weeks_per_deliverable: 2.0,
            many_deliverables: 5,
            tight_months: 2.0,
            heavy_hours: 800,
            light_hours: 200,
            long_months: 6.0,
            short_ratio: 0.4,
            long_ratio: 2.5,
        }
    }
}

impl Default for TierKeywords {
    fn default() -> Self {
        Self {
            simple: strings(&[
                "login", "signup", "form", "page", "button", "contact", "about", "landing",
                "static", "simple", "social",
            ]),
            medium: strings(&[
                "payment",
                "integration",
                "api",
                "search",
                "filter",
                "cart",
                "checkout",
                "authentication",
                "notification",
                "email",
                "upload",
                "download",
                "profile",
            ]),
            complex: strings(&[
                "dashboard",
                "admin",
                "analytics",
                "reporting",
                "real-time",
                "chat",
                "video",
                "ai",
                "machine learning",
                "recommendation",
                "inventory",
                "cms",
                "management system",
                "automation",
                "erp",
                "crm",
                "enterprise",
                "sap",
                "oracle",
                "inventory management",
                "accounting",
                "hr system",
                "payroll",
                "compliance",
                "hipaa",
                "gdpr",
                "sox",
                "pci",
                "multi-tenant",
                "multi-currency",
                "multi-language",
                "warehouse",
                "logistics",
                "supply chain",
                "fraud detection",
                "risk management",
                "migration",
                "legacy",
                "modernization",
                "refactor",
                "cloud architecture",
                "microservices",
                "infrastructure",
            ]),
            very_complex_markers: strings(&["system", "platform"]),
        }
    }
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            per_deliverable_budget_floor: dec!(3000),
            absolute_budget_floor: dec!(10000),
            tier_hours: TierHours::default(),
            hourly_rate: HourlyRate::default(),
            hours_per_week: 40.0,
            weeks_per_month: 4.0,
            project_type_multipliers: default_project_type_multipliers(),
            default_project_multiplier: 1.0,
            context_multipliers: default_context_multipliers(),
            outdated_tech_table: default_outdated_tech(),
            massive_platform_table: default_massive_platforms(),
            conflicting_pairs: default_conflicting_pairs(),
            mvp_keywords: strings(&[
                "mvp",
                "basic",
                "startup",
                "simple",
                "early-stage",
                "minimal",
            ]),
            tier_keywords: TierKeywords::default(),
            version_floors: default_version_floors(),
            budget_rules: BudgetRules::default(),
            timeline_rules: TimelineRules::default(),
        }
    }
}

impl ThresholdConfig {
    /// Parse a (possibly partial) JSON document and validate the result.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Apply `PROPOSAL_*` environment variable overrides.
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply scalar overrides from an arbitrary key lookup.
    ///
    /// Recognized keys: `PROPOSAL_HOURLY_RATE_LOW`, `PROPOSAL_HOURLY_RATE_HIGH`,
    /// `PROPOSAL_HOURS_PER_WEEK`, `PROPOSAL_WEEKS_PER_MONTH`,
    /// `PROPOSAL_PER_DELIVERABLE_BUDGET_FLOOR`, `PROPOSAL_ABSOLUTE_BUDGET_FLOOR`.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("PROPOSAL_HOURLY_RATE_LOW") {
            self.hourly_rate.low = parse_override("PROPOSAL_HOURLY_RATE_LOW", &v)?;
        }
        if let Some(v) = lookup("PROPOSAL_HOURLY_RATE_HIGH") {
            self.hourly_rate.high = parse_override("PROPOSAL_HOURLY_RATE_HIGH", &v)?;
        }
        if let Some(v) = lookup("PROPOSAL_HOURS_PER_WEEK") {
            self.hours_per_week = parse_override("PROPOSAL_HOURS_PER_WEEK", &v)?;
        }
        if let Some(v) = lookup("PROPOSAL_WEEKS_PER_MONTH") {
            self.weeks_per_month = parse_override("PROPOSAL_WEEKS_PER_MONTH", &v)?;
        }
        if let Some(v) = lookup("PROPOSAL_PER_DELIVERABLE_BUDGET_FLOOR") {
            self.per_deliverable_budget_floor =
                parse_override("PROPOSAL_PER_DELIVERABLE_BUDGET_FLOOR", &v)?;
        }
        if let Some(v) = lookup("PROPOSAL_ABSOLUTE_BUDGET_FLOOR") {
            self.absolute_budget_floor = parse_override("PROPOSAL_ABSOLUTE_BUDGET_FLOOR", &v)?;
        }
        self.validate()?;
        Ok(self)
    }

    /// Check the invariants the engine relies on.
    pub fn validate(&self) -> Result<()> {
        if self.hourly_rate.low <= Decimal::ZERO {
            return Err(ConfigError::invalid("hourlyRate.low", "must be positive"));
        }
        if self.hourly_rate.low > self.hourly_rate.high {
            return Err(ConfigError::invalid(
                "hourlyRate",
                format!(
                    "low ({}) must not exceed high ({})",
                    self.hourly_rate.low, self.hourly_rate.high
                ),
            ));
        }
        if !(self.hours_per_week > 0.0) {
            return Err(ConfigError::invalid("hoursPerWeek", "must be positive"));
        }
        if !(self.weeks_per_month > 0.0) {
            return Err(ConfigError::invalid("weeksPerMonth", "must be positive"));
        }

        let hours = &self.tier_hours;
        if hours.simple == 0 {
            return Err(ConfigError::invalid("tierHours.simple", "must be positive"));
        }
        if !(hours.simple <= hours.medium
            && hours.medium <= hours.complex
            && hours.complex <= hours.very_complex)
        {
            return Err(ConfigError::invalid(
                "tierHours",
                "must be non-decreasing from simple to veryComplex",
            ));
        }

        if !(self.default_project_multiplier > 0.0) {
            return Err(ConfigError::invalid(
                "defaultProjectMultiplier",
                "must be positive",
            ));
        }
        for entry in &self.project_type_multipliers {
            if !(entry.factor > 0.0) {
                return Err(ConfigError::invalid(
                    format!("projectTypeMultipliers.{}", entry.label),
                    "factor must be positive",
                ));
            }
        }
        for entry in &self.context_multipliers {
            if !(entry.factor > 0.0) {
                return Err(ConfigError::invalid(
                    format!("contextMultipliers.{}", entry.name),
                    "factor must be positive",
                ));
            }
        }

        let rules = &self.budget_rules;
        if rules.mismatch_low_ratio > rules.mismatch_high_ratio {
            return Err(ConfigError::invalid(
                "budgetRules",
                "mismatchLowRatio must not exceed mismatchHighRatio",
            ));
        }
        Ok(())
    }
}

fn parse_override<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::invalid(key, format!("cannot parse '{}'", value)))
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_project_type_multipliers() -> Vec<ProjectTypeMultiplier> {
    [
        ("E-commerce", &["e-commerce", "ecommerce"][..], 1.2),
        ("SaaS", &["saas"][..], 1.3),
        ("Mobile App", &["mobile", "app"][..], 1.1),
        ("Website", &["website"][..], 0.8),
        ("Custom Software", &["custom"][..], 1.0),
    ]
    .into_iter()
    .map(|(label, keywords, factor)| ProjectTypeMultiplier {
        label: label.to_string(),
        keywords: strings(keywords),
        factor,
    })
    .collect()
}

fn default_context_multipliers() -> Vec<ContextMultiplier> {
    [
        ("enterprise", &["enterprise"][..], 1.3),
        ("compliance", &["compliance", "hipaa", "gdpr", "sox", "pci"][..], 1.2),
        ("migration", &["migration", "legacy"][..], 1.4),
        ("international", &["multi-country", "international"][..], 1.2),
    ]
    .into_iter()
    .map(|(name, keywords, factor)| ContextMultiplier {
        name: name.to_string(),
        keywords: strings(keywords),
        factor,
    })
    .collect()
}

fn default_outdated_tech() -> Vec<OutdatedTech> {
    [
        ("Flash", &["flash"][..], "HTML5, WebGL, or modern web standards"),
        (
            "jQuery",
            &["jquery"][..],
            "Vanilla JavaScript, React, Vue, or Angular (for UI interactivity)",
        ),
        (
            "AngularJS",
            &["angularjs", "angular.js"][..],
            "Angular (modern version), React, or Vue",
        ),
        ("Bower", &["bower"][..], "npm or yarn (for package management)"),
        ("Grunt", &["grunt"][..], "webpack, Vite, or npm scripts"),
        ("Gulp", &["gulp"][..], "webpack, Vite, or npm scripts"),
        ("Backbone", &["backbone", "backbone.js"][..], "React, Vue, or Angular"),
        ("Knockout", &["knockout", "knockout.js"][..], "React, Vue, or Angular"),
        (
            "CoffeeScript",
            &["coffeescript"][..],
            "TypeScript or modern JavaScript (ES6+)",
        ),
        ("PHP 5", &["php 5", "php5"][..], "PHP 8+ or Node.js"),
        ("MySQL 5.5", &["mysql 5.5"][..], "MySQL 8.0+ or PostgreSQL"),
        ("Python 2", &["python 2", "python2"][..], "Python 3.10+"),
        (
            "IE 11",
            &["ie 11", "ie11", "internet explorer"][..],
            "Modern browsers (Edge, Chrome, Firefox, Safari)",
        ),
    ]
    .into_iter()
    .map(|(name, aliases, alternative)| OutdatedTech {
        name: name.to_string(),
        aliases: strings(aliases),
        alternative: alternative.to_string(),
    })
    .collect()
}

fn default_massive_platforms() -> Vec<MassivePlatform> {
    [
        ("amazon", "Amazon-scale", "$500M-$1B+"),
        ("facebook", "Facebook-scale", "$100M-$500M+"),
        ("netflix", "Netflix-scale", "$100M-$500M+"),
        ("uber", "Uber-scale", "$50M-$200M+"),
        ("airbnb", "Airbnb-scale", "$50M-$200M+"),
        ("twitter", "Twitter-scale", "$100M-$500M+"),
        ("instagram", "Instagram-scale", "$100M-$500M+"),
        ("youtube", "YouTube-scale", "$500M-$1B+"),
        ("spotify", "Spotify-scale", "$100M-$500M+"),
        ("linkedin", "LinkedIn-scale", "$100M-$500M+"),
    ]
    .into_iter()
    .map(|(name, scale_label, typical_cost)| MassivePlatform {
        name: name.to_string(),
        scale_label: scale_label.to_string(),
        typical_cost: typical_cost.to_string(),
    })
    .collect()
}

fn default_conflicting_pairs() -> Vec<ConflictGroup> {
    [
        (
            "frontend frameworks",
            &["react", "reactjs"][..],
            &["angular", "vue", "vuejs"][..],
        ),
        ("frontend frameworks", &["angular"][..], &["vue", "vuejs"][..]),
        (
            "relational databases",
            &["mysql", "mariadb"][..],
            &["postgresql", "postgres"][..],
        ),
        ("Python web frameworks", &["django"][..], &["flask", "fastapi"][..]),
        ("Node.js frameworks", &["express"][..], &["fastify", "koa"][..]),
    ]
    .into_iter()
    .map(|(category, left, right)| ConflictGroup {
        category: category.to_string(),
        left: strings(left),
        right: strings(right),
    })
    .collect()
}

fn default_version_floors() -> Vec<VersionFloor> {
    [
        ("Node.js", r"node(?:\.?js)?", 10, "Node.js 18+ or 20+ (LTS)"),
        ("React", r"react(?:\.?js)?", 16, "React 18+"),
        ("Angular", r"angular", 12, "Angular 15+"),
        ("Vue", r"vue(?:\.?js)?", 3, "Vue 3+"),
    ]
    .into_iter()
    .map(|(name, pattern, min_major, recommended)| VersionFloor {
        name: name.to_string(),
        pattern: pattern.to_string(),
        min_major,
        recommended: recommended.to_string(),
    })
    .collect()
}

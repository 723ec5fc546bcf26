//! End-to-end runs of the estimator and the sanity checker.

use pretty_assertions::assert_eq;
use reality_check::{
    InformationQuality, ProjectContext, ThresholdConfig, Warning, WarningCategory,
    assess_quality, check, estimate,
};

fn categories(warnings: &[Warning]) -> Vec<WarningCategory> {
    warnings.iter().map(|w| w.category).collect()
}

fn count(warnings: &[Warning], category: WarningCategory) -> usize {
    warnings.iter().filter(|w| w.category == category).count()
}

fn reasonable_project() -> ProjectContext {
    ProjectContext::new("Customer portal for a regional delivery company")
        .with_project_type("Custom Software")
        .with_deliverables([
            "Customer accounts",
            "Order history",
            "Invoice export",
            "Delivery scheduling",
            "Support tickets",
        ])
        .with_tech_hints(["React 18", "Node.js 20", "PostgreSQL"])
        .with_budget_hint("$60,000")
        .with_timeline_hint("4 months")
}

#[test]
fn amazon_clone_on_a_tiny_budget() {
    let config = ThresholdConfig::default();
    let context = ProjectContext::new("Full e-commerce platform like Amazon with $5k budget")
        .with_deliverables([
            "Feature 1",
            "Feature 2",
            "Feature 3",
            "Feature 4",
            "Feature 5",
            "Feature 6",
            "Feature 7",
        ])
        .with_budget_hint("$5,000");

    let warnings = check(&context, None, &config);

    assert!(warnings.len() >= 3);
    assert_eq!(warnings[0].category, WarningCategory::Scope);
    assert!(warnings[0].message.contains("Amazon"));
    assert!(count(&warnings, WarningCategory::Budget) >= 2);
    assert!(warnings.iter().any(|w| w.message.contains("per deliverable")));
    assert!(warnings.iter().any(|w| w.message.contains("extremely low")));
}

#[test]
fn ecommerce_in_two_weeks_gets_one_timeline_warning() {
    let config = ThresholdConfig::default();
    let context = ProjectContext::new("Need e-commerce site in 2 weeks")
        .with_deliverables(["Product catalog", "Cart", "Checkout"])
        .with_timeline_hint("2 weeks");

    let warnings = check(&context, None, &config);

    assert_eq!(categories(&warnings), vec![WarningCategory::Timeline]);
    assert!(warnings[0].message.contains("e-commerce/platform"));
}

#[test]
fn outdated_hints_name_modern_alternatives() {
    let config = ThresholdConfig::default();
    let context = ProjectContext::new("").with_tech_hints(["jQuery", "PHP 5"]);

    let warnings = check(&context, None, &config);

    assert_eq!(
        categories(&warnings),
        vec![WarningCategory::TechStack, WarningCategory::TechStack]
    );
    assert!(warnings[0].message.contains("Consider using"));
    assert!(warnings[1].message.contains("PHP 8+ or Node.js"));
}

#[test]
fn reasonable_project_has_no_warnings() {
    let config = ThresholdConfig::default();
    let context = reasonable_project();

    assert!(check(&context, None, &config).is_empty());

    let estimation = estimate(&context, &config);
    assert_eq!(estimation.total_hours, 750);
    assert_eq!(check(&context, Some(&estimation), &config), Vec::<Warning>::new());
}

#[test]
fn checker_runs_before_or_after_estimation() {
    let config = ThresholdConfig::default();
    let context = ProjectContext::new("Internal reporting tool")
        .with_deliverables(["Admin dashboard", "Analytics platform", "Export"])
        .with_budget_hint("$20,000")
        .with_timeline_hint("6 weeks");

    let before = check(&context, None, &config);
    let estimation = estimate(&context, &config);
    let after = check(&context, Some(&estimation), &config);

    // Hour-based rules only add warnings once an estimate exists.
    assert!(after.len() > before.len());
    assert!(after.iter().any(|w| w.message.contains("developers working in parallel")));
    assert!(after.iter().any(|w| w.message.contains("suggests ~")));
}

#[test]
fn estimation_is_idempotent() {
    let config = ThresholdConfig::default();
    let context = ProjectContext::new("Enterprise SaaS migration with HIPAA compliance")
        .with_project_type("SaaS")
        .with_deliverables(["Patient records system", "Billing integration", "Audit reporting"]);

    let first = estimate(&context, &config);
    let second = estimate(&context, &config);

    assert_eq!(first, second);
    assert_eq!(
        first.applied_multiplier.to_bits(),
        second.applied_multiplier.to_bits()
    );
    assert_eq!(first.timeline_months.to_bits(), second.timeline_months.to_bits());
}

#[test]
fn quality_gates_the_estimate() {
    assert_eq!(assess_quality(&reasonable_project()), InformationQuality::High);

    let vague = ProjectContext::new("Something like Uber but for dogs");
    assert!(!assess_quality(&vague).allows_estimate());

    // Checks still run without an estimate.
    let warnings = check(&vague, None, &ThresholdConfig::default());
    assert_eq!(categories(&warnings), vec![WarningCategory::Scope]);
}

#[test]
fn context_and_config_load_from_json() {
    let context: ProjectContext = serde_json::from_str(
        r#"{
            "rawRequestText": "Build a CRM",
            "deliverables": ["Contacts", "Pipeline"],
            "techHints": null,
            "budgetHint": "$100k"
        }"#,
    )
    .unwrap();
    assert!(context.tech_hints.is_empty());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("thresholds.json");
    std::fs::write(&path, r#"{ "budgetRules": { "highBudget": "200000" } }"#).unwrap();
    let config = ThresholdConfig::from_path(&path).unwrap();

    // Default config flags $100k for two deliverables; the override does not.
    assert_eq!(
        categories(&check(&context, None, &ThresholdConfig::default())),
        vec![WarningCategory::Budget]
    );
    assert!(check(&context, None, &config).is_empty());
}

use super::domain::{
    Action, ActionId, Answer, Category, CategoryId, Condition, Configuration, Priority, Rule,
    RuleId, Threshold, ThresholdId,
};

fn category(id: &str, name: &str, description: &str, weight: f64) -> Category {
    Category {
        id: CategoryId::from(id),
        name: name.to_string(),
        description: description.to_string(),
        weight,
    }
}

fn rule(
    id: &str,
    field: &str,
    condition: Condition,
    value: &str,
    category: &str,
    points: i32,
) -> Rule {
    Rule {
        id: RuleId::from(id),
        field: field.to_string(),
        condition,
        value: value.to_string(),
        category_id: CategoryId::from(category),
        points,
    }
}

fn threshold(id: &str, min_score: i32, max_score: i32, label: &str, color: &str) -> Threshold {
    Threshold {
        id: ThresholdId::from(id),
        category_id: CategoryId::from("category-1"),
        min_score,
        max_score,
        label: label.to_string(),
        color: color.to_string(),
    }
}

impl Configuration {
    /// Starter automation-readiness rubric used when nothing has been stored yet.
    pub fn sample() -> Self {
        Self {
            categories: vec![
                category(
                    "category-1",
                    "Technical Readiness",
                    "Existing automation experience and tooling",
                    1.0,
                ),
                category(
                    "category-2",
                    "Budget Alignment",
                    "Funding available for automation initiatives",
                    1.2,
                ),
                category(
                    "category-3",
                    "Timeline Urgency",
                    "How soon the organisation needs results",
                    0.8,
                ),
                category(
                    "category-4",
                    "Data Maturity",
                    "Quality and accessibility of operational data",
                    1.0,
                ),
                category(
                    "category-5",
                    "Team Capacity",
                    "People available to own automated workflows",
                    1.0,
                ),
            ],
            rules: vec![
                rule(
                    "rule-1",
                    "automation_experience",
                    Condition::Equals,
                    "Advanced",
                    "category-1",
                    10,
                ),
                rule(
                    "rule-2",
                    "current_tools",
                    Condition::Contains,
                    "CRM",
                    "category-1",
                    5,
                ),
                rule(
                    "rule-3",
                    "budget_range",
                    Condition::Equals,
                    "$50k+",
                    "category-2",
                    15,
                ),
                rule(
                    "rule-4",
                    "timeline",
                    Condition::Equals,
                    "Immediate",
                    "category-3",
                    10,
                ),
                rule(
                    "rule-5",
                    "data_quality",
                    Condition::Equals,
                    "Poor",
                    "category-4",
                    -5,
                ),
                rule(
                    "rule-6",
                    "team_size",
                    Condition::GreaterThan,
                    "10",
                    "category-5",
                    5,
                ),
            ],
            thresholds: vec![
                threshold("threshold-1", 0, 30, "Not Ready", "red"),
                threshold("threshold-2", 31, 70, "Partially Ready", "yellow"),
                threshold("threshold-3", 71, 100, "Fully Ready", "green"),
            ],
            actions: vec![
                Action {
                    id: ActionId::from("action-1"),
                    category_id: CategoryId::from("category-1"),
                    threshold_id: ThresholdId::from("threshold-1"),
                    action: "Start with automation fundamentals".to_string(),
                    description: "Map manual workflows and pick one low-risk process to automate"
                        .to_string(),
                    priority: Priority::High,
                },
                Action {
                    id: ActionId::from("action-2"),
                    category_id: CategoryId::from("category-1"),
                    threshold_id: ThresholdId::from("threshold-2"),
                    action: "Pilot a focused automation project".to_string(),
                    description: "Extend existing tooling with one measurable pilot".to_string(),
                    priority: Priority::Medium,
                },
            ],
        }
    }
}

/// Answers that exercise every rule in [`Configuration::sample`].
pub fn sample_answers() -> Vec<Answer> {
    vec![
        Answer::new("automation_experience", "Advanced"),
        Answer::new("current_tools", vec!["CRM", "ERP"]),
        Answer::new("budget_range", "$50k+"),
        Answer::new("timeline", "Immediate"),
        Answer::new("data_quality", "Good"),
        Answer::new("team_size", "25"),
    ]
}

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use super::super::domain::Configuration;
use super::audit::{audit, IntegrityIssue};

/// Top-level sections of an exported configuration document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Categories,
    Rules,
    Thresholds,
    Actions,
}

impl Section {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Categories,
            Self::Rules,
            Self::Thresholds,
            Self::Actions,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Categories => "categories",
            Self::Rules => "rules",
            Self::Thresholds => "thresholds",
            Self::Actions => "actions",
        }
    }
}

/// How one section of an imported document was handled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SectionStatus {
    /// The section replaced the in-memory collection wholesale.
    Applied { count: usize },
    Missing,
    NotAnArray,
    /// The section was an array but its entries did not match the entity shape.
    Rejected { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionReport {
    pub section: Section,
    #[serde(flatten)]
    pub status: SectionStatus,
}

/// Result of an import: the next configuration plus what happened to each section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportOutcome {
    pub configuration: Configuration,
    pub sections: Vec<SectionReport>,
    pub issues: Vec<IntegrityIssue>,
}

impl ImportOutcome {
    pub fn applied(&self) -> impl Iterator<Item = Section> + '_ {
        self.sections
            .iter()
            .filter(|report| matches!(report.status, SectionStatus::Applied { .. }))
            .map(|report| report.section)
    }

    pub fn rejected(&self) -> impl Iterator<Item = &SectionReport> + '_ {
        self.sections
            .iter()
            .filter(|report| matches!(report.status, SectionStatus::Rejected { .. }))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("configuration document is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("configuration document must be a JSON object")]
    NotAnObject,
}

pub fn export_value(configuration: &Configuration) -> Result<Value, serde_json::Error> {
    serde_json::to_value(configuration)
}

pub fn export_json(configuration: &Configuration) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(configuration)
}

pub fn import_str(current: &Configuration, raw: &str) -> Result<ImportOutcome, ImportError> {
    let document: Value = serde_json::from_str(raw)?;
    import_value(current, document)
}

/// Replace each collection whose section is present as an array; leave the others as they are.
pub fn import_value(
    current: &Configuration,
    document: Value,
) -> Result<ImportOutcome, ImportError> {
    let Value::Object(mut document) = document else {
        return Err(ImportError::NotAnObject);
    };

    let mut next = current.clone();
    let sections = Section::ordered()
        .into_iter()
        .map(|section| {
            let status = match section {
                Section::Categories => replace(&mut document, section, &mut next.categories),
                Section::Rules => replace(&mut document, section, &mut next.rules),
                Section::Thresholds => replace(&mut document, section, &mut next.thresholds),
                Section::Actions => replace(&mut document, section, &mut next.actions),
            };
            if let SectionStatus::Rejected { reason } = &status {
                tracing::warn!(
                    section = section.key(),
                    %reason,
                    "skipping malformed import section"
                );
            }
            SectionReport { section, status }
        })
        .collect();

    let issues = audit(&next);
    tracing::info!(
        categories = next.categories.len(),
        rules = next.rules.len(),
        thresholds = next.thresholds.len(),
        actions = next.actions.len(),
        issues = issues.len(),
        "imported assessment configuration"
    );

    Ok(ImportOutcome {
        configuration: next,
        sections,
        issues,
    })
}

fn replace<T: DeserializeOwned>(
    document: &mut Map<String, Value>,
    section: Section,
    target: &mut Vec<T>,
) -> SectionStatus {
    match document.remove(section.key()) {
        None => SectionStatus::Missing,
        Some(value @ Value::Array(_)) => match serde_json::from_value::<Vec<T>>(value) {
            Ok(items) => {
                let count = items.len();
                *target = items;
                SectionStatus::Applied { count }
            }
            Err(err) => SectionStatus::Rejected {
                reason: err.to_string(),
            },
        },
        Some(_) => SectionStatus::NotAnArray,
    }
}

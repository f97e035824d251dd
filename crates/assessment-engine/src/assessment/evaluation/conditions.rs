use super::super::domain::{AnswerValue, Condition, Rule};

/// Decide whether one answer value satisfies a rule's condition.
///
/// Field matching is the caller's concern; this only compares values. Numeric conditions
/// need both operands to be whole integers: `"10.5"` or `"10 people"` never match.
pub(crate) fn matches(value: &AnswerValue, rule: &Rule) -> bool {
    match value {
        AnswerValue::Sequence(values) => match rule.condition {
            Condition::Contains => values.iter().any(|value| value == &rule.value),
            // Only a single-element selection can equal a scalar rule value.
            Condition::Equals => values.len() == 1 && values[0] == rule.value,
            Condition::GreaterThan | Condition::LessThan => false,
        },
        AnswerValue::Scalar(value) => match rule.condition {
            Condition::Equals => value == &rule.value,
            Condition::Contains => value.contains(rule.value.as_str()),
            Condition::GreaterThan => compare_numeric(value, &rule.value)
                .map(|(answer, expected)| answer > expected)
                .unwrap_or(false),
            Condition::LessThan => compare_numeric(value, &rule.value)
                .map(|(answer, expected)| answer < expected)
                .unwrap_or(false),
        },
    }
}

fn compare_numeric(answer: &str, expected: &str) -> Option<(i64, i64)> {
    let answer = parse_integer(answer)?;
    let expected = parse_integer(expected)?;
    Some((answer, expected))
}

fn parse_integer(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

//! Value normalization operations.
//!
//! Text columns are cleaned by running a fixed chain of [`Operation`]s over the
//! raw cell. Categorical columns are recoded with [`binary`], and month tokens
//! are resolved with [`parse_month`].

use chrono::Month;

/// A single text rewrite step.
///
/// Operations pass `None` through untouched, so an empty cell stays empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Delete every occurrence of a character
    Remove(char),

    /// Replace every occurrence of a character
    Replace { from: char, to: char },

    /// Turn the value into a missing marker when it equals the token
    NullIf(&'static str),
}

/// `job`: strip periods, then hyphens become underscores.
pub const JOB_OPERATIONS: &[Operation] = &[
    Operation::Remove('.'),
    Operation::Replace { from: '-', to: '_' },
];

/// `education`: periods become underscores, then `unknown` is dropped.
///
/// The substitution runs before the comparison.
pub const EDUCATION_OPERATIONS: &[Operation] = &[
    Operation::Replace { from: '.', to: '_' },
    Operation::NullIf("unknown"),
];

/// Recognized month abbreviations, matched after lowercasing.
pub const MONTH_ABBREVIATIONS: [(&str, Month); 12] = [
    ("jan", Month::January),
    ("feb", Month::February),
    ("mar", Month::March),
    ("apr", Month::April),
    ("may", Month::May),
    ("jun", Month::June),
    ("jul", Month::July),
    ("aug", Month::August),
    ("sep", Month::September),
    ("oct", Month::October),
    ("nov", Month::November),
    ("dec", Month::December),
];

impl Operation {
    /// Apply this operation to a value
    pub fn apply(&self, value: Option<String>) -> Option<String> {
        let value = value?;
        match *self {
            Operation::Remove(c) => Some(value.chars().filter(|&ch| ch != c).collect()),
            Operation::Replace { from, to } => Some(
                value
                    .chars()
                    .map(|ch| if ch == from { to } else { ch })
                    .collect(),
            ),
            Operation::NullIf(token) => (value != token).then_some(value),
        }
    }
}

/// Run a chain of operations over a raw cell.
pub fn apply_all(operations: &[Operation], value: Option<&str>) -> Option<String> {
    operations
        .iter()
        .fold(value.map(str::to_string), |acc, op| op.apply(acc))
}

/// 1 when the value is exactly `positive` (case-sensitive), otherwise 0.
pub fn binary(value: Option<&str>, positive: &str) -> u8 {
    u8::from(value == Some(positive))
}

/// Resolve a three-letter month abbreviation, case-insensitively.
///
/// Full month names and anything else outside the table yield `None`.
pub fn parse_month(value: &str) -> Option<Month> {
    let lowered = value.to_lowercase();
    MONTH_ABBREVIATIONS
        .iter()
        .find(|(abbr, _)| *abbr == lowered)
        .map(|&(_, month)| month)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_normalization() {
        assert_eq!(
            apply_all(JOB_OPERATIONS, Some("blue-collar.")).as_deref(),
            Some("blue_collar")
        );
        assert_eq!(apply_all(JOB_OPERATIONS, Some("admin.")).as_deref(), Some("admin"));
        assert_eq!(
            apply_all(JOB_OPERATIONS, Some("self-employed")).as_deref(),
            Some("self_employed")
        );
        assert_eq!(apply_all(JOB_OPERATIONS, None), None);
    }

    #[test]
    fn test_job_normalization_idempotent() {
        for raw in ["blue-collar.", "admin.", "a.-.b--c..", "services", "-.-", ""] {
            let once = apply_all(JOB_OPERATIONS, Some(raw));
            let twice = apply_all(JOB_OPERATIONS, once.as_deref());
            assert_eq!(once, twice, "not idempotent for {raw:?}");
        }
    }

    #[test]
    fn test_education_normalization() {
        assert_eq!(
            apply_all(EDUCATION_OPERATIONS, Some("basic.4y")).as_deref(),
            Some("basic_4y")
        );
        assert_eq!(
            apply_all(EDUCATION_OPERATIONS, Some("university.degree")).as_deref(),
            Some("university_degree")
        );
        assert_eq!(apply_all(EDUCATION_OPERATIONS, Some("unknown")), None);
        // only the exact token is dropped
        assert_eq!(
            apply_all(EDUCATION_OPERATIONS, Some("Unknown")).as_deref(),
            Some("Unknown")
        );
        // substitution runs first, so this no longer matches
        assert_eq!(
            apply_all(EDUCATION_OPERATIONS, Some("unknown.")).as_deref(),
            Some("unknown_")
        );
    }

    #[test]
    fn test_binary_is_exact_match() {
        assert_eq!(binary(Some("yes"), "yes"), 1);
        assert_eq!(binary(Some("no"), "yes"), 0);
        assert_eq!(binary(Some("YES"), "yes"), 0);
        assert_eq!(binary(Some(" yes"), "yes"), 0);
        assert_eq!(binary(Some("unknown"), "yes"), 0);
        assert_eq!(binary(None, "yes"), 0);
        assert_eq!(binary(Some("success"), "success"), 1);
        assert_eq!(binary(Some("failure"), "success"), 0);
    }

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("jan"), Some(Month::January));
        assert_eq!(parse_month("JAN"), Some(Month::January));
        assert_eq!(parse_month("Dec"), Some(Month::December));
        assert_eq!(parse_month("sEp"), Some(Month::September));
        assert_eq!(parse_month(" jan"), None);
        assert_eq!(parse_month("january"), None);
        assert_eq!(parse_month("sept"), None);
        assert_eq!(parse_month(""), None);
    }

    #[test]
    fn test_month_table_is_ordered() {
        for (i, (_, month)) in MONTH_ABBREVIATIONS.iter().enumerate() {
            assert_eq!(month.number_from_month() as usize, i + 1);
        }
    }
}

//! Column filter criteria
//!
//! Parses spreadsheet criterion strings (`=*Rain*`, `<=80`, `<>Clear`) and
//! evaluates them against cell values the way a spreadsheet autofilter
//! does: text comparisons ignore case and support `*`/`?` wildcards,
//! relational operators only match numeric cells.

use std::cmp::Ordering;

use application::ports::{CustomFilter, FilterOperator, HostError, HostErrorCode};
use domain::CellValue;

/// Comparison operator of a criterion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

/// A parsed single criterion
#[derive(Debug, Clone, PartialEq)]
pub struct Criterion {
    operator: Operator,
    operand: String,
    number: Option<f64>,
}

impl Criterion {
    /// Parse a criterion string
    ///
    /// A bare value is treated as `=value`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` when a relational operator is followed by
    /// something that is not a number.
    pub fn parse(raw: &str) -> Result<Self, HostError> {
        let (operator, rest) = [
            ("<=", Operator::Le),
            (">=", Operator::Ge),
            ("<>", Operator::Ne),
            ("<", Operator::Lt),
            (">", Operator::Gt),
            ("=", Operator::Eq),
        ]
        .into_iter()
        .find_map(|(prefix, op)| raw.strip_prefix(prefix).map(|rest| (op, rest)))
        .unwrap_or((Operator::Eq, raw));

        let operand = rest.trim().to_string();
        let number = operand.parse::<f64>().ok();

        if matches!(
            operator,
            Operator::Lt | Operator::Le | Operator::Gt | Operator::Ge
        ) && number.is_none()
        {
            return Err(HostError::new(
                HostErrorCode::InvalidArgument,
                format!("Criterion '{raw}' needs a numeric operand"),
            ));
        }

        Ok(Self {
            operator,
            operand,
            number,
        })
    }

    /// Check a cell against the criterion
    #[must_use]
    pub fn matches(&self, cell: &CellValue) -> bool {
        match self.operator {
            Operator::Eq => self.equals(cell),
            Operator::Ne => !self.equals(cell),
            Operator::Lt => self.compare(cell, Ordering::is_lt),
            Operator::Le => self.compare(cell, Ordering::is_le),
            Operator::Gt => self.compare(cell, Ordering::is_gt),
            Operator::Ge => self.compare(cell, Ordering::is_ge),
        }
    }

    fn equals(&self, cell: &CellValue) -> bool {
        match (cell, self.number) {
            (CellValue::Number(value), Some(number)) => (value - number).abs() < f64::EPSILON,
            (CellValue::Number(value), None) => wildcard_match(&self.operand, &value.to_string()),
            (CellValue::Text(text), _) => wildcard_match(&self.operand, text),
            (CellValue::Empty, _) => self.operand.is_empty(),
        }
    }

    fn compare(&self, cell: &CellValue, accept: fn(Ordering) -> bool) -> bool {
        match (cell, self.number) {
            (CellValue::Number(value), Some(number)) => {
                value.partial_cmp(&number).is_some_and(accept)
            },
            _ => false,
        }
    }
}

/// A parsed custom filter
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledFilter {
    first: Criterion,
    second: Option<Criterion>,
    operator: FilterOperator,
}

impl CompiledFilter {
    /// Parse both criteria of a custom filter
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if either criterion is malformed.
    pub fn compile(filter: &CustomFilter) -> Result<Self, HostError> {
        Ok(Self {
            first: Criterion::parse(&filter.criterion1)?,
            second: filter
                .criterion2
                .as_deref()
                .map(Criterion::parse)
                .transpose()?,
            operator: filter.operator,
        })
    }

    /// Check a cell against the filter
    #[must_use]
    pub fn matches(&self, cell: &CellValue) -> bool {
        let first = self.first.matches(cell);
        match (&self.second, self.operator) {
            (None, _) => first,
            (Some(second), FilterOperator::And) => first && second.matches(cell),
            (Some(second), FilterOperator::Or) => first || second.matches(cell),
        }
    }
}

/// Case-insensitive glob match supporting `*` and `?`
#[must_use]
pub fn wildcard_match(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.to_lowercase().chars().collect();
    let text: Vec<char> = text.to_lowercase().chars().collect();

    let (mut p, mut t) = (0, 0);
    let mut backtrack: Option<(usize, usize)> = None;

    while t < text.len() {
        match pattern.get(p) {
            Some('*') => {
                backtrack = Some((p, t));
                p += 1;
            },
            Some(&c) if c == '?' || c == text[t] => {
                p += 1;
                t += 1;
            },
            _ => match backtrack {
                Some((star, matched)) => {
                    p = star + 1;
                    t = matched + 1;
                    backtrack = Some((star, matched + 1));
                },
                None => return false,
            },
        }
    }

    pattern[p..].iter().all(|&c| c == '*')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    #[test]
    fn wildcard_substring() {
        assert!(wildcard_match("*rain*", "Rain, Overcast"));
        assert!(wildcard_match("*Overcast*", "Rain, Overcast"));
        assert!(!wildcard_match("*Snow*", "Rain, Overcast"));
        assert!(wildcard_match("R?in", "rain"));
        assert!(wildcard_match("*", ""));
        assert!(!wildcard_match("Rain", "Rain, Overcast"));
    }

    #[test]
    fn condition_criterion_matches_substring() {
        let c = Criterion::parse("=*Partially cloudy*").unwrap();
        assert!(c.matches(&text("Snow, Partially cloudy")));
        assert!(!c.matches(&text("Clear")));
        assert!(!c.matches(&CellValue::Empty));
    }

    #[test]
    fn relational_criteria_need_numbers() {
        assert!(Criterion::parse("<=abc").is_err());
        assert!(Criterion::parse(">=").is_err());
        assert!(Criterion::parse("<>Clear").is_ok());
    }

    #[test]
    fn relational_criteria_skip_text_cells() {
        let c = Criterion::parse(">=20").unwrap();
        assert!(c.matches(&CellValue::Number(20.0)));
        assert!(c.matches(&CellValue::Number(97.4)));
        assert!(!c.matches(&CellValue::Number(19.9)));
        assert!(!c.matches(&text("50")));
        assert!(!c.matches(&CellValue::Empty));
    }

    #[test]
    fn bare_value_is_equality() {
        let c = Criterion::parse("Clear").unwrap();
        assert!(c.matches(&text("clear")));
        assert!(!c.matches(&text("Clear skies")));
    }

    #[test]
    fn not_equal_inverts() {
        let c = Criterion::parse("<>Clear").unwrap();
        assert!(!c.matches(&text("Clear")));
        assert!(c.matches(&text("Rain")));
    }

    #[test]
    fn combined_and_filter() {
        let filter = CompiledFilter::compile(&CustomFilter::combined(
            "<=80",
            ">=20",
            FilterOperator::And,
        ))
        .unwrap();
        assert!(filter.matches(&CellValue::Number(20.0)));
        assert!(filter.matches(&CellValue::Number(80.0)));
        assert!(!filter.matches(&CellValue::Number(80.5)));
        assert!(!filter.matches(&CellValue::Number(10.0)));
    }

    #[test]
    fn combined_or_filter() {
        let filter = CompiledFilter::compile(&CustomFilter::combined(
            "<10",
            ">90",
            FilterOperator::Or,
        ))
        .unwrap();
        assert!(filter.matches(&CellValue::Number(5.0)));
        assert!(filter.matches(&CellValue::Number(95.0)));
        assert!(!filter.matches(&CellValue::Number(50.0)));
    }

    #[test]
    fn full_range_keeps_every_number() {
        let filter = CompiledFilter::compile(&CustomFilter::combined(
            "<=100",
            ">=0",
            FilterOperator::And,
        ))
        .unwrap();
        for v in [0.0, 42.0, 100.0] {
            assert!(filter.matches(&CellValue::Number(v)));
        }
    }
}

#[cfg(test)]
mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn star_wrapped_text_matches_itself(text in "[A-Za-z ,]{0,30}") {
            let pattern = format!("*{text}*");
            prop_assert!(wildcard_match(&pattern, &text));
            prop_assert!(wildcard_match(&pattern, &text.to_uppercase()));
        }

        #[test]
        fn parse_never_panics(raw in "\\PC{0,20}") {
            let _ = Criterion::parse(&raw);
        }

        #[test]
        fn between_agrees_with_range(low in 0u8..=100, high in 0u8..=100, value in 0.0f64..=100.0) {
            let filter = CompiledFilter::compile(&CustomFilter::combined(
                format!("<={high}"),
                format!(">={low}"),
                FilterOperator::And,
            ))
            .unwrap();
            let expected = value >= f64::from(low) && value <= f64::from(high);
            prop_assert_eq!(filter.matches(&CellValue::Number(value)), expected);
        }
    }
}

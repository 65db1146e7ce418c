//! Declarative field validation
//!
//! Each entity lists its constraints as a slice of [`Rule`]s and hands them
//! to [`evaluate`] before anything touches the store. A failed rule never
//! interrupts evaluation of the remaining rules; all violation messages for
//! the request are joined into a single `Error::Validation`.

use chrono::{Local, NaiveDate};
use crate::{Error, Result};

/// A single field constraint with its user-facing violation message.
#[derive(Debug, Clone)]
pub enum Rule<'a> {
    /// Value must contain at least one non-whitespace character
    NonBlank { value: &'a str, message: &'static str },
    /// Character count must fall within `min..=max`
    CharsBetween { value: &'a str, min: usize, max: usize, message: &'static str },
    /// Character count must not exceed `max`
    MaxChars { value: &'a str, max: usize, message: &'static str },
    /// Integer lower bound (inclusive)
    AtLeast { value: i64, min: i64, message: &'static str },
    /// Float lower bound (inclusive)
    MinFloat { value: f64, min: f64, message: &'static str },
    /// Float upper bound (inclusive)
    MaxFloat { value: f64, max: f64, message: &'static str },
    /// Date, when present, must be strictly before today
    PastDate { value: Option<NaiveDate>, message: &'static str },
}

impl Rule<'_> {
    /// The violation message if this rule fails, `None` otherwise
    fn violation(&self) -> Option<&'static str> {
        match self {
            Rule::NonBlank { value, message } => value.trim().is_empty().then_some(*message),
            Rule::CharsBetween { value, min, max, message } => {
                let len = value.chars().count();
                (len < *min || len > *max).then_some(*message)
            }
            Rule::MaxChars { value, max, message } => {
                (value.chars().count() > *max).then_some(*message)
            }
            Rule::AtLeast { value, min, message } => (value < min).then_some(*message),
            Rule::MinFloat { value, min, message } => (value < min).then_some(*message),
            Rule::MaxFloat { value, max, message } => (value > max).then_some(*message),
            Rule::PastDate { value, message } => match value {
                Some(date) => (*date >= Local::now().date_naive()).then_some(*message),
                None => None,
            },
        }
    }
}

/// Evaluate every rule and collect the failures into one error.
pub fn evaluate(rules: &[Rule]) -> Result<()> {
    let failures: Vec<&'static str> = rules.iter().filter_map(Rule::violation).collect();
    if failures.is_empty() {
        Ok(())
    } else {
        Err(Error::Validation(failures.join("; ")))
    }
}

//! All-or-nothing conversions from string columns to typed columns.
//!
//! Every conversion runs in two phases: parse each non-null cell, then commit
//! only if every cell parsed. A single failure turns the attempt into
//! [`Coercion::Skipped`] with the reason; nothing is partially converted.

use crate::error::Result;
use crate::types::SkipReason;
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use polars::prelude::*;
use regex::Regex;

/// Offset between the proleptic Gregorian day count and the Unix epoch.
const EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Date-only layouts, in inference priority (month-first before day-first).
const DATE_LAYOUTS: [&str; 11] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%m-%d-%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %b %Y",
];

/// Date-time layouts. `%.f` also accepts values without a fraction.
const DATETIME_LAYOUTS: [&str; 10] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

// Canonical integer text: no sign other than `-`, no leading zeros.
static INTEGER_TEXT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^-?(?:0|[1-9][0-9]*)$").expect("Invalid regex: integer text")
});

// Canonical decimal text, optionally in scientific notation.
static DECIMAL_TEXT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^-?(?:0|[1-9][0-9]*)(?:\.[0-9]+)?(?:[eE][+-]?[0-9]+)?$")
        .expect("Invalid regex: decimal text")
});

// A clock time followed by `Z` or a numeric UTC offset.
static TZ_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d{1,2}:\d{2}(?::\d{2}(?:\.\d+)?)?\s*(?:Z|z|UTC|[+-]\d{2}(?::?\d{2})?)$")
        .expect("Invalid regex: timezone suffix")
});

/// Outcome of one reinterpretation attempt.
#[derive(Debug, Clone)]
pub enum Coercion {
    /// Every non-null cell parsed; the column in its new representation.
    Converted(Series),
    /// The attempt was abandoned; the column keeps its representation.
    Skipped(SkipReason),
}

/// Temporal layout inferred for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TemporalLayout {
    Date(&'static str),
    DateTime(&'static str),
}

impl TemporalLayout {
    /// Pick the first layout that parses `sample`.
    pub(crate) fn infer(sample: &str) -> Option<Self> {
        DATETIME_LAYOUTS
            .iter()
            .copied()
            .find(|layout| NaiveDateTime::parse_from_str(sample, layout).is_ok())
            .map(TemporalLayout::DateTime)
            .or_else(|| {
                DATE_LAYOUTS
                    .iter()
                    .copied()
                    .find(|layout| NaiveDate::parse_from_str(sample, layout).is_ok())
                    .map(TemporalLayout::Date)
            })
    }
}

/// Whether a value carries a timezone designator after its clock time.
pub(crate) fn has_timezone_suffix(value: &str) -> bool {
    TZ_SUFFIX.is_match(value.trim())
}

/// Parse canonical integer text as `i64`.
///
/// The value must render back to exactly `value`, so leading zeros, a `+`
/// sign, `-0` and surrounding whitespace are rejected.
pub(crate) fn parse_i64(value: &str) -> Option<i64> {
    if !INTEGER_TEXT.is_match(value) {
        return None;
    }
    let parsed = value.parse::<i64>().ok()?;
    (parsed.to_string() == value).then_some(parsed)
}

/// Parse canonical decimal text as a finite `f64`.
///
/// Integer-looking text must also be a valid `i64`, and the parsed value
/// must keep every significant digit of the text.
pub(crate) fn parse_finite_f64(value: &str) -> Option<f64> {
    if !DECIMAL_TEXT.is_match(value) {
        return None;
    }
    if INTEGER_TEXT.is_match(value) && parse_i64(value).is_none() {
        return None;
    }

    let parsed = value.parse::<f64>().ok().filter(|v| v.is_finite())?;
    (significant_digits(value) == significant_digits(&format!("{:e}", parsed))).then_some(parsed)
}

/// Digits of the mantissa without leading or trailing zeros.
fn significant_digits(text: &str) -> String {
    let mantissa = text.split(['e', 'E']).next().unwrap_or_default();
    let digits: String = mantissa.chars().filter(|c| c.is_ascii_digit()).collect();
    digits
        .trim_start_matches('0')
        .trim_end_matches('0')
        .to_string()
}

/// Parse every non-null cell; fail the whole attempt if any cell fails.
fn parse_all<T>(
    values: &StringChunked,
    target: &str,
    max_samples: usize,
    parse: impl Fn(&str) -> Option<T>,
) -> std::result::Result<Vec<Option<T>>, SkipReason> {
    let mut parsed = Vec::with_capacity(values.len());
    let mut first_row = None;
    let mut failed = 0usize;
    let mut samples = Vec::new();

    for (row, opt_val) in values.into_iter().enumerate() {
        match opt_val {
            Some(val) => match parse(val) {
                Some(v) => parsed.push(Some(v)),
                None => {
                    first_row.get_or_insert(row);
                    failed += 1;
                    if samples.len() < max_samples {
                        samples.push(val.to_string());
                    }
                    parsed.push(None);
                }
            },
            None => parsed.push(None),
        }
    }

    match first_row {
        None => Ok(parsed),
        Some(first_row) => Err(SkipReason::Unparseable {
            target: target.to_string(),
            first_row,
            failed,
            samples,
        }),
    }
}

/// Reinterpret a string column as numbers.
///
/// Integers are preferred: if every value parses as `i64` the result is
/// `Int64`, otherwise `Float64` if every value is a finite float.
pub(crate) fn string_to_numeric(series: &Series, max_samples: usize) -> Result<Coercion> {
    let str_series = series.str()?;
    if str_series.len() == str_series.null_count() {
        return Ok(Coercion::Skipped(SkipReason::NoValues));
    }

    if let Ok(ints) = parse_all(str_series, "integer", max_samples, parse_i64) {
        return Ok(Coercion::Converted(Series::new(series.name().clone(), ints)));
    }

    match parse_all(str_series, "number", max_samples, parse_finite_f64) {
        Ok(floats) => Ok(Coercion::Converted(Series::new(series.name().clone(), floats))),
        Err(reason) => Ok(Coercion::Skipped(reason)),
    }
}

/// Reinterpret a string column as dates or datetimes.
///
/// The layout is inferred once, from the first non-null value, and then
/// required of every value. Date-only layouts produce `Date`; layouts with a
/// clock time produce `Datetime(ns)`.
pub(crate) fn string_to_temporal(series: &Series, max_samples: usize) -> Result<Coercion> {
    let str_series = series.str()?;
    let Some(first) = str_series.into_iter().flatten().next() else {
        return Ok(Coercion::Skipped(SkipReason::NoValues));
    };
    let first = first.trim();

    if has_timezone_suffix(first) {
        return Ok(Coercion::Skipped(SkipReason::TimezoneAware {
            sample: first.to_string(),
        }));
    }

    let Some(layout) = TemporalLayout::infer(first) else {
        return Ok(Coercion::Skipped(SkipReason::NoTemporalFormat {
            sample: first.to_string(),
        }));
    };

    let name = series.name().clone();
    let converted = match layout {
        TemporalLayout::Date(fmt) => {
            let parsed = parse_all(str_series, "date", max_samples, |v| {
                NaiveDate::parse_from_str(v.trim(), fmt)
                    .ok()
                    .map(|d| d.num_days_from_ce() - EPOCH_DAYS_FROM_CE)
            });
            match parsed {
                Ok(days) => Series::new(name, days).cast(&DataType::Date)?,
                Err(reason) => return Ok(Coercion::Skipped(reason)),
            }
        }
        TemporalLayout::DateTime(fmt) => {
            let parsed = parse_all(str_series, "datetime", max_samples, |v| {
                NaiveDateTime::parse_from_str(v.trim(), fmt)
                    .ok()
                    .and_then(|dt| dt.and_utc().timestamp_nanos_opt())
            });
            match parsed {
                Ok(nanos) => Series::new(name, nanos)
                    .cast(&DataType::Datetime(TimeUnit::Nanoseconds, None))?,
                Err(reason) => return Ok(Coercion::Skipped(reason)),
            }
        }
    };

    Ok(Coercion::Converted(converted))
}

// Value normalization: raw upstream readings -> comparable values.
//
// Percentages arrive in several encodings depending on which layer of the
// provider produced them (0.454, 45.4, 454, 4540 all meaning 45.4%). They are
// all scaled to a decimal fraction here so every team is compared on the same
// footing.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

use crate::categories::Category;
use crate::stats::RawValue;

/// Upstream placeholder for "no value yet".
const EMPTY_PLACEHOLDER: &str = "/";

// ---------------------------------------------------------------------------
// StatValue
// ---------------------------------------------------------------------------

/// A normalized, comparable reading.
///
/// Non-numeric but non-empty readings are passed through as `Text`. Text only
/// compares against text; a number and a text value are incomparable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Number(f64),
    Text(String),
}

impl StatValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            StatValue::Number(v) => Some(*v),
            StatValue::Text(_) => None,
        }
    }

    /// Raw (polarity-free) ordering, `None` when the values are incomparable.
    pub fn partial_cmp_value(&self, other: &StatValue) -> Option<Ordering> {
        match (self, other) {
            (StatValue::Number(a), StatValue::Number(b)) => a.partial_cmp(b),
            (StatValue::Text(a), StatValue::Text(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

/// `None` means incomparable for this team/category: missing, empty or
/// unparseable. It is never coerced to zero.
pub type NormalizedValue = Option<StatValue>;

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Normalize one raw reading for the given category.
pub fn normalize(raw: Option<&RawValue>, category: &Category) -> NormalizedValue {
    let raw = raw?;

    if let RawValue::Text(text) = raw {
        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed == EMPTY_PLACEHOLDER {
            return None;
        }
    }

    if category.is_percentage {
        return parse_number(raw)
            .map(|v| StatValue::Number(scale_percentage(v, &category.id)));
    }

    match parse_number(raw) {
        Some(v) => Some(StatValue::Number(v)),
        None => match raw {
            // "NaN" and "inf" parse, just not to a finite value.
            RawValue::Text(text) if text.trim().parse::<f64>().is_err() => {
                Some(StatValue::Text(text.trim().to_string()))
            }
            _ => None,
        },
    }
}

/// Convert a percentage reading in any of the upstream encodings to a
/// decimal fraction (0.454 for 45.4%).
///
/// | reading          | treated as                  | example        |
/// |------------------|-----------------------------|----------------|
/// | `v < 1`          | already a fraction          | 0.454 -> 0.454 |
/// | `1 <= v < 100`   | percentage points (see below)| 45.4 -> 0.454 |
/// | `100 <= v < 1000`| tenths of a percent         | 454 -> 0.454   |
/// | `v >= 1000`      | hundredths of a percent     | 4540 -> 0.454  |
///
/// The `1 <= v < 100` band is inherently ambiguous upstream (45.4 could mean
/// 45.4% or 0.454%). It is read as percentage points.
pub fn normalize_percentage(v: f64) -> f64 {
    if v < 1.0 {
        v
    } else if v >= 1000.0 {
        (v / 100.0) / 100.0
    } else if v >= 100.0 {
        (v / 10.0) / 100.0
    } else {
        v / 100.0
    }
}

fn scale_percentage(v: f64, category_id: &str) -> f64 {
    if (1.0..100.0).contains(&v) {
        debug!(
            category = category_id,
            value = v,
            "ambiguous percentage encoding, reading as percentage points"
        );
    }
    normalize_percentage(v)
}

/// Parse a raw reading as a finite number. Surrounding whitespace is ignored;
/// NaN and infinities count as unparseable.
fn parse_number(raw: &RawValue) -> Option<f64> {
    let v = match raw {
        RawValue::Number(v) => *v,
        RawValue::Text(text) => text.trim().parse::<f64>().ok()?,
    };
    v.is_finite().then_some(v)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

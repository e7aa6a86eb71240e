//! Allowed-value ranges for gate parameters.
//!
//! A range is written as a list whose items are single values or inclusive
//! `[lo, hi]` intervals:
//!
//! ```json
//! { "p0": [0.5643], "p1": [0, [0, 6.283185307179586]] }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Absolute tolerance used when comparing against range bounds.
pub const RANGE_TOLERANCE: f64 = 1e-10;

/// One item of a [`ParameterRange`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RangeItem {
    /// A single allowed value.
    Point(f64),
    /// An inclusive interval `[lo, hi]`.
    Interval([f64; 2]),
}

impl RangeItem {
    /// Check if `value` matches this item.
    pub fn contains(&self, value: f64) -> bool {
        match *self {
            RangeItem::Point(p) => (value - p).abs() <= RANGE_TOLERANCE,
            RangeItem::Interval([lo, hi]) => {
                value >= lo - RANGE_TOLERANCE && value <= hi + RANGE_TOLERANCE
            }
        }
    }
}

impl fmt::Display for RangeItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeItem::Point(p) => write!(f, "{p}"),
            RangeItem::Interval([lo, hi]) => write!(f, "[{lo}, {hi}]"),
        }
    }
}

/// Union of allowed values and intervals.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterRange {
    items: Vec<RangeItem>,
}

impl ParameterRange {
    /// Create a range from its items.
    pub fn new(items: impl Into<Vec<RangeItem>>) -> Self {
        Self {
            items: items.into(),
        }
    }

    /// A range admitting a single value.
    pub fn point(value: f64) -> Self {
        Self::new(vec![RangeItem::Point(value)])
    }

    /// A range admitting one inclusive interval.
    pub fn interval(lo: f64, hi: f64) -> Self {
        Self::new(vec![RangeItem::Interval([lo, hi])])
    }

    /// Add an item.
    pub fn with(mut self, item: RangeItem) -> Self {
        self.items.push(item);
        self
    }

    /// The items.
    pub fn items(&self) -> &[RangeItem] {
        &self.items
    }

    /// Check if `value` is admitted by any item.
    pub fn contains(&self, value: f64) -> bool {
        self.items.iter().any(|item| item.contains(value))
    }

    /// Describe why this range is unusable, if it is.
    pub(crate) fn defect(&self) -> Option<String> {
        if self.items.is_empty() {
            return Some("range admits no values".into());
        }
        for item in &self.items {
            match *item {
                RangeItem::Point(p) if !p.is_finite() => {
                    return Some(format!("value {p} is not finite"));
                }
                RangeItem::Interval([lo, hi]) if !(lo.is_finite() && hi.is_finite()) => {
                    return Some(format!("interval [{lo}, {hi}] has a non-finite bound"));
                }
                RangeItem::Interval([lo, hi]) if lo > hi => {
                    return Some(format!("interval [{lo}, {hi}] is empty"));
                }
                _ => {}
            }
        }
        None
    }
}

impl fmt::Display for ParameterRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{item}")?;
        }
        f.write_str("}")
    }
}

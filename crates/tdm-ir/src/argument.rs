//! Command arguments: concrete values or symbolic placeholders.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a symbolic placeholder (`p0`, `p1`, ...).
///
/// Placeholders are numbered in the order their value sequences were handed
/// to the program builder. The id indexes the parameter table directly.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PlaceholderId(pub u32);

impl PlaceholderId {
    /// The placeholder index as a `usize`.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// The printable name of the placeholder.
    pub fn name(self) -> String {
        format!("p{}", self.0)
    }
}

impl fmt::Display for PlaceholderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.0)
    }
}

/// A single positional argument of a command.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "ArgumentRepr", into = "ArgumentRepr")]
pub enum Argument {
    /// A fixed numeric value.
    Concrete(f64),
    /// A per-time-bin value looked up in the parameter table.
    Symbolic(PlaceholderId),
}

impl Argument {
    /// Create a concrete argument.
    pub fn concrete(value: f64) -> Self {
        Argument::Concrete(value)
    }

    /// Create a symbolic argument.
    pub fn symbolic(id: u32) -> Self {
        Argument::Symbolic(PlaceholderId(id))
    }

    /// Check if this argument refers to a placeholder.
    pub fn is_symbolic(&self) -> bool {
        matches!(self, Argument::Symbolic(_))
    }

    /// The concrete value, if any.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Argument::Concrete(v) => Some(*v),
            Argument::Symbolic(_) => None,
        }
    }

    /// The placeholder, if any.
    pub fn placeholder(&self) -> Option<PlaceholderId> {
        match self {
            Argument::Concrete(_) => None,
            Argument::Symbolic(id) => Some(*id),
        }
    }

    /// True for a concrete argument equal to zero.
    pub fn is_zero(&self) -> bool {
        matches!(self, Argument::Concrete(v) if *v == 0.0)
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::Concrete(v) => write!(f, "{v}"),
            Argument::Symbolic(id) => write!(f, "{{{id}}}"),
        }
    }
}

impl From<f64> for Argument {
    fn from(value: f64) -> Self {
        Argument::Concrete(value)
    }
}

impl From<i32> for Argument {
    fn from(value: i32) -> Self {
        Argument::Concrete(f64::from(value))
    }
}

impl From<PlaceholderId> for Argument {
    fn from(id: PlaceholderId) -> Self {
        Argument::Symbolic(id)
    }
}

/// Wire form: a bare number, or `{"param": i}` for a placeholder.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum ArgumentRepr {
    Value(f64),
    Param { param: PlaceholderId },
}

impl From<ArgumentRepr> for Argument {
    fn from(repr: ArgumentRepr) -> Self {
        match repr {
            ArgumentRepr::Value(v) => Argument::Concrete(v),
            ArgumentRepr::Param { param } => Argument::Symbolic(param),
        }
    }
}

impl From<Argument> for ArgumentRepr {
    fn from(arg: Argument) -> Self {
        match arg {
            Argument::Concrete(v) => ArgumentRepr::Value(v),
            Argument::Symbolic(param) => ArgumentRepr::Param { param },
        }
    }
}

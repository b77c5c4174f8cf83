//! Readiness classes in ordinal order.

use serde::{Deserialize, Serialize};

/// Discrete readiness verdicts. Classifier class indices map onto this
/// enum explicitly; an out-of-range index is an error, never a silent
/// array lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessClass {
    NotReady,
    Partial,
    Ready,
}

impl ReadinessClass {
    pub const COUNT: usize = 3;

    pub fn index(self) -> usize {
        match self {
            ReadinessClass::NotReady => 0,
            ReadinessClass::Partial => 1,
            ReadinessClass::Ready => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(ReadinessClass::NotReady),
            1 => Some(ReadinessClass::Partial),
            2 => Some(ReadinessClass::Ready),
            _ => None,
        }
    }

    /// Human-readable label used in the explanation narrative.
    pub fn display_label(self) -> &'static str {
        match self {
            ReadinessClass::NotReady => "Not Ready",
            ReadinessClass::Partial => "Partially Ready",
            ReadinessClass::Ready => "Ready",
        }
    }
}

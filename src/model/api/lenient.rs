use serde::{Deserialize, Serialize};

/// An integer that clients may send either as a JSON number or as a numeric
/// string, as HTML form values arrive as strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LenientInt {
    Number(i64),
    Text(String),
}

impl LenientInt {
    /// `0` and `""` count as absent values.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Number(n) => *n != 0,
            Self::Text(s) => !s.is_empty(),
        }
    }

    /// The value as a non-negative integer, if it is one.
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Self::Number(n) => u32::try_from(*n).ok(),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }

    /// The value as a strictly positive integer, if it is one.
    pub fn as_positive_u32(&self) -> Option<u32> {
        self.as_u32().filter(|n| *n > 0)
    }
}

impl From<u32> for LenientInt {
    fn from(n: u32) -> Self {
        Self::Number(n.into())
    }
}

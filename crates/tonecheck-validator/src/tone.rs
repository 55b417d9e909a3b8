//! Financial tone labels

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tonecheck_core::Error;

/// One of the three tones a financial sentiment classifier reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Positive,
    Negative,
    Neutral,
}

impl Tone {
    pub const ALL: [Tone; 3] = [Tone::Positive, Tone::Negative, Tone::Neutral];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }

    /// Map a classifier label such as `Positive` onto a tone, ignoring case
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|tone| label.eq_ignore_ascii_case(tone.as_str()))
    }
}

impl Default for Tone {
    fn default() -> Self {
        Self::Neutral
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a caller-supplied tone. Only the exact lowercase names are accepted.
impl FromStr for Tone {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tone| tone.as_str() == s)
            .ok_or_else(|| {
                Error::invalid_configuration(format!(
                    "The key `financial_tone` must be one of 'positive', 'negative', 'neutral', got '{}'",
                    s
                ))
            })
    }
}

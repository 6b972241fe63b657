//! Scene mode: the named policy that governs directive generation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Operating mode of the classroom.
///
/// [`Auto`](Self::Auto) runs the threshold table; every other mode is a
/// scene that replaces it outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Auto,
    Lecture,
    Exam,
    Energy,
}

impl Mode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Lecture => "lecture",
            Self::Exam => "exam",
            Self::Energy => "energy",
        }
    }

    /// Human-readable name used in API messages.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Auto => "automatic mode",
            Self::Lecture => "lecture mode",
            Self::Exam => "exam mode",
            Self::Energy => "energy-saving mode",
        }
    }

    #[must_use]
    pub fn is_scene(self) -> bool {
        !matches!(self, Self::Auto)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "lecture" => Ok(Self::Lecture),
            "exam" => Ok(Self::Exam),
            "energy" => Ok(Self::Energy),
            _ => Err(ValidationError::UnknownMode(s.to_string())),
        }
    }
}

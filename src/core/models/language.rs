//! Output language of diagrams and reports

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Language used for discipline names and report captions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Ukrainian
    #[default]
    Ua,
    /// English
    En,
}

impl Language {
    /// Short code used in file names and configuration
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Ua => "ua",
            Self::En => "en",
        }
    }

    /// Value for the HTML `lang` attribute
    #[must_use]
    pub const fn html_lang(self) -> &'static str {
        match self {
            Self::Ua => "uk",
            Self::En => "en",
        }
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ua" | "uk" => Ok(Self::Ua),
            "en" => Ok(Self::En),
            _ => Err(format!("Language must be 'ua' or 'en', got '{s}'")),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

use crate::error::{Error, Result};
use crate::naming::generator::NameGenerator;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum number of digits a sequence number is padded to.
pub const MAX_PADDING: usize = 6;
/// Maximum length of the separator placed between a name and its number.
pub const MAX_SEPARATOR_LEN: usize = 3;

/// Where the sequence number is placed in a generated name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberPosition {
    /// In front of everything accumulated so far, prefix included
    Prefix,
    #[default]
    Suffix,
}

impl FromStr for NumberPosition {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "prefix" | "before" => Ok(Self::Prefix),
            "suffix" | "after" => Ok(Self::Suffix),
            _ => Err(Error::InvalidSetting {
                field: "number_position".to_string(),
                message: format!("'{s}' is not one of 'prefix' | 'suffix'"),
            }),
        }
    }
}

impl NumberPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            NumberPosition::Prefix => "prefix",
            NumberPosition::Suffix => "suffix",
        }
    }
}

impl fmt::Display for NumberPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything that controls how new names are composed.
///
/// The value is built once per invocation (from stored settings plus command
/// line overrides) and then only read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenameConfig {
    pub prefix: String,
    pub suffix: String,
    pub use_base_name: bool,
    pub base_name: String,
    /// Strip one trailing `.<digits>` group from the original name
    pub remove_trailing_number: bool,
    pub add_numbers: bool,
    pub number_position: NumberPosition,
    pub number_separator: String,
    pub start_number: u32,
    /// Minimum digit count; longer numbers are never truncated
    pub padding: usize,
    /// Regex applied to the composed name; empty disables substitution
    pub search_pattern: String,
    /// Replacement text, `$1` / `${name}` refer to capture groups
    pub replace_pattern: String,
    pub sort_by_original_name: bool,
}

impl Default for RenameConfig {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            suffix: String::new(),
            use_base_name: false,
            base_name: "Object".to_string(),
            remove_trailing_number: false,
            add_numbers: true,
            number_position: NumberPosition::Suffix,
            number_separator: "_".to_string(),
            start_number: 1,
            padding: 2,
            search_pattern: String::new(),
            replace_pattern: String::new(),
            sort_by_original_name: true,
        }
    }
}

impl RenameConfig {
    /// A configuration that leaves every name untouched.
    pub fn passthrough() -> Self {
        Self {
            add_numbers: false,
            sort_by_original_name: false,
            ..Self::default()
        }
    }

    /// The state restored by `settings clear`: defaults with an empty base name.
    pub fn cleared() -> Self {
        Self {
            base_name: String::new(),
            ..Self::default()
        }
    }

    /// Check the numeric and length limits, then compile the search and
    /// replace patterns so a stored config can always generate names.
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_PADDING).contains(&self.padding) {
            return Err(Error::InvalidSetting {
                field: "padding".to_string(),
                message: format!("must be between 1 and {MAX_PADDING}, got {}", self.padding),
            });
        }

        if self.number_separator.chars().count() > MAX_SEPARATOR_LEN {
            return Err(Error::InvalidSetting {
                field: "number_separator".to_string(),
                message: format!(
                    "at most {MAX_SEPARATOR_LEN} characters, got '{}'",
                    self.number_separator
                ),
            });
        }

        NameGenerator::new(self)?;
        Ok(())
    }
}

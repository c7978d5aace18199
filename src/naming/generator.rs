use crate::error::{Error, Result};
use crate::naming::config::{NumberPosition, RenameConfig};
use regex::Regex;

/// One entry of a rename request: the current name plus whatever the caller
/// uses to find the item again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameItem<Id> {
    pub name: String,
    pub id: Id,
}

impl<Id> RenameItem<Id> {
    pub fn new(name: impl Into<String>, id: Id) -> Self {
        Self {
            name: name.into(),
            id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamedItem<Id> {
    pub id: Id,
    pub original_name: String,
    pub new_name: String,
}

pub type RenameResult<Id> = Vec<RenamedItem<Id>>;

/// A [`RenameConfig`] with its search pattern compiled.
#[derive(Debug, Clone)]
pub struct NameGenerator<'a> {
    config: &'a RenameConfig,
    search: Option<Regex>,
}

impl<'a> NameGenerator<'a> {
    pub fn new(config: &'a RenameConfig) -> Result<Self> {
        let search = if config.search_pattern.is_empty() {
            None
        } else {
            let regex =
                Regex::new(&config.search_pattern).map_err(|source| Error::InvalidSearchPattern {
                    pattern: config.search_pattern.clone(),
                    source,
                })?;
            check_replacement(&regex, &config.replace_pattern)?;
            Some(regex)
        };

        Ok(Self { config, search })
    }

    /// Compose the new name of the item at `index` (position after sorting).
    pub fn name_for(&self, original: &str, index: usize) -> String {
        let config = self.config;
        let mut name = String::new();

        if !config.prefix.is_empty() {
            name.push_str(&config.prefix);
        }

        if config.use_base_name && !config.base_name.is_empty() {
            name.push_str(&config.base_name);
        } else if config.remove_trailing_number {
            name.push_str(strip_trailing_number(original));
        } else {
            name.push_str(original);
        }

        if config.add_numbers {
            let sequence = index as u64 + u64::from(config.start_number);
            let number = format_number(sequence, config.padding);
            match config.number_position {
                NumberPosition::Suffix => {
                    name.push_str(&config.number_separator);
                    name.push_str(&number);
                }
                // The number goes ahead of the prefix as well, not just the body.
                NumberPosition::Prefix => {
                    name = format!("{number}{}{name}", config.number_separator);
                }
            }
        }

        if !config.suffix.is_empty() {
            name.push_str(&config.suffix);
        }

        if let Some(search) = &self.search {
            name = search
                .replace_all(&name, config.replace_pattern.as_str())
                .into_owned();
        }

        if name.is_empty() {
            original.to_string()
        } else {
            name
        }
    }

    /// Order items for numbering, then name each one.
    pub fn generate<Id>(&self, items: Vec<RenameItem<Id>>) -> RenameResult<Id> {
        let mut items = items;
        if self.config.sort_by_original_name {
            // Stable, byte-wise ordering: equal names keep their selection order.
            items.sort_by(|a, b| a.name.cmp(&b.name));
        }

        items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                let new_name = self.name_for(&item.name, index);
                RenamedItem {
                    id: item.id,
                    original_name: item.name,
                    new_name,
                }
            })
            .collect()
    }
}

/// Generate new names for `items`.
///
/// Fails only when `config.search_pattern` is not a valid regular
/// expression, in which case no names are produced at all.
pub fn generate<Id>(items: Vec<RenameItem<Id>>, config: &RenameConfig) -> Result<RenameResult<Id>> {
    let generator = NameGenerator::new(config)?;
    let result = generator.generate(items);
    log::debug!("generated {} name(s)", result.len());
    Ok(result)
}

/// Reject replacements naming a group the pattern does not have.
///
/// The regex crate expands a missing group to nothing, so `$1_Left` (read as
/// the group `1_Left`) would otherwise quietly empty the name.
fn check_replacement(regex: &Regex, replacement: &str) -> Result<()> {
    for group in group_references(replacement) {
        let exists = match group.parse::<usize>() {
            Ok(index) => index < regex.captures_len(),
            Err(_) => regex.capture_names().flatten().any(|name| name == group),
        };
        if exists {
            continue;
        }

        let mut message = format!("the pattern has no group '{group}'");
        if let Some(digits) = group.split(|c: char| !c.is_ascii_digit()).next()
            && !digits.is_empty()
            && digits.len() < group.len()
        {
            message.push_str(&format!(", write '${{{digits}}}' to follow a group number with text"));
        }
        return Err(Error::InvalidReplacePattern {
            replacement: replacement.to_string(),
            message,
        });
    }
    Ok(())
}

/// Group names and numbers referenced by `$name` / `${name}`; `$$` is a literal dollar.
fn group_references(replacement: &str) -> Vec<&str> {
    let mut groups = Vec::new();
    let mut rest = replacement;
    while let Some(pos) = rest.find('$') {
        rest = &rest[pos + 1..];
        if let Some(after) = rest.strip_prefix('$') {
            rest = after;
        } else if let Some(braced) = rest.strip_prefix('{') {
            if let Some(end) = braced.find('}') {
                groups.push(&braced[..end]);
                rest = &braced[end + 1..];
            }
        } else {
            let end = rest
                .find(|c: char| c != '_' && !c.is_ascii_alphanumeric())
                .unwrap_or(rest.len());
            if end > 0 {
                groups.push(&rest[..end]);
            }
            rest = &rest[end..];
        }
    }
    groups
}

/// Drop a single trailing `.<digits>` group, e.g. `Cube.001` becomes `Cube`.
pub fn strip_trailing_number(name: &str) -> &str {
    let without_digits = name.trim_end_matches(|c: char| c.is_ascii_digit());
    if without_digits.len() < name.len()
        && let Some(stem) = without_digits.strip_suffix('.')
    {
        stem
    } else {
        name
    }
}

fn format_number(number: u64, padding: usize) -> String {
    format!("{number:0padding$}")
}

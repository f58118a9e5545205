//! Host feature profiles for the reference script host.
//!
//! A profile records which optional language behaviors the host enables.
//! Probes never read profiles - they discover the same information the
//! hard way - but tests and the CLI use profiles to stand up hosts with
//! known capability sets.

use std::fmt;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::Path;

/// Error type for profile configuration loading.
#[derive(Debug)]
pub enum ProfileError {
    /// Config file could not be read.
    ReadError(String),
    /// Config content was malformed.
    ParseError(String),
}

impl Display for ProfileError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ProfileError::ReadError(msg) => write!(f, "profile read error: {}", msg),
            ProfileError::ParseError(msg) => write!(f, "profile parse error: {}", msg),
        }
    }
}

impl std::error::Error for ProfileError {}

/// Optional language features of the reference host.
#[derive(Debug, Clone, PartialEq)]
pub struct HostProfile {
    /// `let` declarations parse and execute.
    pub let_declarations: bool,
    /// `const` declarations parse and execute.
    pub const_declarations: bool,
    /// Trailing commas allowed in array/object literals and call arguments.
    pub trailing_commas: bool,
    /// Arrow function expressions.
    pub arrow_functions: bool,
    /// Indexing into string values.
    pub string_indexing: bool,
    /// Quirk: assignment to a `const` binding silently succeeds.
    pub const_assignment: bool,
}

impl HostProfile {
    /// Everything on, `const` properly immutable.
    pub fn full() -> Self {
        HostProfile {
            let_declarations: true,
            const_declarations: true,
            trailing_commas: true,
            arrow_functions: true,
            string_indexing: true,
            const_assignment: false,
        }
    }

    /// Baseline host: `var`, plain expressions, nothing optional.
    pub fn minimal() -> Self {
        HostProfile {
            let_declarations: false,
            const_declarations: false,
            trailing_commas: false,
            arrow_functions: false,
            string_indexing: false,
            const_assignment: false,
        }
    }

    /// Load a profile from a config file.
    pub fn load(path: &Path) -> Result<Self, ProfileError> {
        let content = fs::read_to_string(path)
            .map_err(|e| ProfileError::ReadError(format!("{}: {}", path.display(), e)))?;
        Self::parse(&content)
    }

    /// Parse a profile from config text.
    ///
    /// Expected format:
    /// ```toml
    /// [features]
    /// let_declarations = true
    /// const_declarations = true
    /// trailing_commas = false
    /// arrow_functions = true
    /// string_indexing = true
    /// const_assignment = false
    /// ```
    ///
    /// Features left out keep the `full()` defaults.
    pub fn parse(content: &str) -> Result<Self, ProfileError> {
        let mut profile = HostProfile::full();
        let mut current_section = String::new();

        for line in content.lines() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                current_section = line[1..line.len() - 1].to_string();
                continue;
            }

            if current_section != "features" {
                continue;
            }

            let (key, value) = Self::parse_flag(line)?;
            match key.as_str() {
                "let_declarations" => profile.let_declarations = value,
                "const_declarations" => profile.const_declarations = value,
                "trailing_commas" => profile.trailing_commas = value,
                "arrow_functions" => profile.arrow_functions = value,
                "string_indexing" => profile.string_indexing = value,
                "const_assignment" => profile.const_assignment = value,
                other => {
                    return Err(ProfileError::ParseError(format!(
                        "unknown feature: {}",
                        other
                    )));
                }
            }
        }

        Ok(profile)
    }

    /// Parse a `key = true/false` line.
    fn parse_flag(line: &str) -> Result<(String, bool), ProfileError> {
        let parts: Vec<&str> = line.splitn(2, '=').collect();
        if parts.len() != 2 {
            return Err(ProfileError::ParseError(format!(
                "expected key = value, got: {}",
                line
            )));
        }
        let key = parts[0].trim().to_string();
        match parts[1].trim() {
            "true" => Ok((key, true)),
            "false" => Ok((key, false)),
            other => Err(ProfileError::ParseError(format!(
                "expected true or false for {}, got: {}",
                key, other
            ))),
        }
    }
}

impl Default for HostProfile {
    fn default() -> Self {
        Self::full()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_config_keeps_defaults() {
        let profile = HostProfile::parse("").unwrap();
        assert_eq!(profile, HostProfile::full());
    }

    #[test]
    fn test_parse_disables_features() {
        let content = "\
[features]
let_declarations = false
trailing_commas = false
";
        let profile = HostProfile::parse(content).unwrap();
        assert!(!profile.let_declarations);
        assert!(!profile.trailing_commas);
        assert!(profile.const_declarations);
    }

    #[test]
    fn test_parse_const_assignment_quirk() {
        let content = "[features]\nconst_assignment = true\n";
        let profile = HostProfile::parse(content).unwrap();
        assert!(profile.const_assignment);
    }

    #[test]
    fn test_parse_rejects_unknown_feature() {
        let result = HostProfile::parse("[features]\nwith_statements = true\n");
        assert!(matches!(result, Err(ProfileError::ParseError(_))));
    }

    #[test]
    fn test_parse_rejects_non_boolean_value() {
        let result = HostProfile::parse("[features]\nlet_declarations = yes\n");
        assert!(matches!(result, Err(ProfileError::ParseError(_))));
    }

    #[test]
    fn test_parse_ignores_comments_and_other_sections() {
        let content = "\
# host profile
[host]
name = \"reference\"

[features]
arrow_functions = false
";
        let profile = HostProfile::parse(content).unwrap();
        assert!(!profile.arrow_functions);
        assert!(profile.let_declarations);
    }
}

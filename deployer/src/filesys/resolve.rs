//! Resource discovery
//!
//! Expands path patterns relative to a base directory into the list of files
//! to deploy. Resource names are paths relative to the base directory, using
//! `/` as separator.

use std::collections::BTreeSet;
use std::path::{Component, Path};

use glob::{MatchOptions, Pattern};
use tracing::{debug, warn};

use crate::errors::DeployError;
use crate::models::deployment::ResourceRef;

const GLOB_CHARS: &[char] = &['*', '?', '['];

/// Brace expansion and extended-glob groups, which are not supported
const UNSUPPORTED_SYNTAX: &[&str] = &["{", "?(", "*(", "+(", "@(", "!("];

/// Whether a pattern contains glob metacharacters
pub fn is_glob(pattern: &str) -> bool {
    pattern.contains(GLOB_CHARS)
}

fn validate_pattern(pattern: &str) -> Result<(), DeployError> {
    if let Some(syntax) = UNSUPPORTED_SYNTAX.iter().find(|syntax| pattern.contains(**syntax)) {
        return Err(DeployError::ConfigError(format!(
            "pattern '{}' uses unsupported syntax '{}'; list alternatives as separate patterns",
            pattern, syntax
        )));
    }
    if is_glob(pattern) {
        Pattern::new(pattern)
            .map_err(|e| DeployError::ConfigError(format!("invalid pattern '{}': {}", pattern, e)))?;
    }
    Ok(())
}

/// Resolve patterns against `base_dir`.
///
/// Patterns without metacharacters are taken literally. Each matched file
/// appears once even when several patterns match it. Finding nothing is not
/// an error.
pub fn resolve(base_dir: &Path, patterns: &[String]) -> Result<Vec<ResourceRef>, DeployError> {
    let mut names = BTreeSet::new();

    for pattern in patterns {
        validate_pattern(pattern)?;
        if is_glob(pattern) {
            expand(base_dir, pattern, &mut names)?;
        } else {
            names.insert(pattern.clone());
        }
    }

    Ok(names
        .into_iter()
        .map(|name| {
            let path = base_dir.join(&name);
            ResourceRef::new(name, path)
        })
        .collect())
}

fn expand(base_dir: &Path, pattern: &str, names: &mut BTreeSet<String>) -> Result<(), DeployError> {
    // Glob results drop a leading `./`, so match against the canonical
    // directory and take names relative to it.
    let base_dir = match base_dir.canonicalize() {
        Ok(dir) => dir,
        Err(e) => {
            warn!("Cannot search {}: {}", base_dir.display(), e);
            return Ok(());
        }
    };

    let rooted = format!(
        "{}/{}",
        Pattern::escape(&base_dir.to_string_lossy()),
        pattern.trim_start_matches("./")
    );
    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: true,
    };

    let entries = glob::glob_with(&rooted, options)
        .map_err(|e| DeployError::ConfigError(format!("invalid pattern '{}': {}", pattern, e)))?;

    let mut matched = 0usize;
    for entry in entries {
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                warn!("Skipping unreadable path while expanding '{}': {}", pattern, e);
                continue;
            }
        };

        if !path.is_file() {
            continue;
        }

        if let Some(name) = relative_name(&base_dir, &path) {
            matched += 1;
            names.insert(name);
        }
    }

    debug!("Pattern '{}' matched {} file(s)", pattern, matched);
    Ok(())
}

fn relative_name(base_dir: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(base_dir).ok()?;
    let parts: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

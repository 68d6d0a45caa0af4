//! Address to file path resolution.
//!
//! Addresses come straight from the plan and may contain `/` (for example in
//! `for_each` keys). The mode decides what happens to them; no mode lets a
//! path escape the output directory.

use std::path::PathBuf;

use serde::Serialize;

use crate::error::{DecodeError, Result};

/// File extension appended to every address.
const EXTENSION: &str = "json";

/// Replacement for path separators in [`AddressMode::Sanitize`].
const SEPARATOR_REPLACEMENT: char = '_';

/// Policy for turning an address into a relative file path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AddressMode {
    /// Replace `/` and `\` with `_`, producing a single file name.
    #[default]
    Sanitize,
    /// Refuse addresses containing path separators.
    Reject,
    /// Split on `/` into nested directories.
    Verbatim,
}

impl AddressMode {
    /// Resolves `address` into a path relative to a `before`/`after` directory.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::UnsafeAddress`] if the address cannot name a
    /// file inside the directory under this mode.
    pub fn resolve(self, index: usize, address: &str) -> Result<PathBuf> {
        let unsafe_address = |reason| DecodeError::UnsafeAddress {
            index,
            address: address.to_string(),
            reason,
        };

        if address.contains('\0') {
            return Err(unsafe_address("contains a NUL byte").into());
        }

        match self {
            Self::Sanitize => {
                let name: String = address
                    .chars()
                    .map(|c| if is_separator(c) { SEPARATOR_REPLACEMENT } else { c })
                    .collect();
                check_component(&name).map_err(unsafe_address)?;
                Ok(PathBuf::from(with_extension(&name)))
            }
            Self::Reject => {
                if address.chars().any(is_separator) {
                    return Err(unsafe_address("contains a path separator").into());
                }
                check_component(address).map_err(unsafe_address)?;
                Ok(PathBuf::from(with_extension(address)))
            }
            Self::Verbatim => {
                if address.contains('\\') {
                    return Err(unsafe_address("contains a backslash").into());
                }
                let components: Vec<&str> = address.split('/').collect();
                let mut path = PathBuf::new();
                for (i, component) in components.iter().enumerate() {
                    check_component(component).map_err(unsafe_address)?;
                    if i + 1 == components.len() {
                        path.push(with_extension(component));
                    } else {
                        path.push(component);
                    }
                }
                Ok(path)
            }
        }
    }
}

impl std::fmt::Display for AddressMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Sanitize => "sanitize",
            Self::Reject => "reject",
            Self::Verbatim => "verbatim",
        };
        f.write_str(label)
    }
}

const fn is_separator(c: char) -> bool {
    matches!(c, '/' | '\\')
}

fn check_component(component: &str) -> std::result::Result<(), &'static str> {
    match component {
        "" => Err("has an empty path component"),
        "." | ".." => Err("has a relative path component"),
        _ => Ok(()),
    }
}

fn with_extension(name: &str) -> String {
    format!("{name}.{EXTENSION}")
}

//! Vendor identification against the ordered vendor table.

use regex::{Regex, RegexBuilder};

use super::patterns::KNOWN_VENDORS;
use super::FieldExtractor;
use crate::error::{BillscanError, Result};
use crate::models::config::VendorEntry;

/// A compiled, user-supplied vendor pattern.
#[derive(Debug, Clone)]
pub struct VendorPattern {
    pub pattern: Regex,
    pub name: String,
}

impl VendorPattern {
    /// Compile a configured entry, case-insensitively.
    ///
    /// A blank name is rejected: a match must always yield a vendor.
    pub fn compile(entry: &VendorEntry) -> Result<Self> {
        let name = entry.name.trim();
        if name.is_empty() {
            return Err(BillscanError::Config(format!(
                "vendor pattern {:?} has an empty name",
                entry.pattern
            )));
        }

        let pattern = RegexBuilder::new(&entry.pattern)
            .case_insensitive(true)
            .build()
            .map_err(|source| BillscanError::InvalidPattern {
                pattern: entry.pattern.clone(),
                source,
            })?;

        Ok(Self {
            pattern,
            name: name.to_string(),
        })
    }
}

/// Vendor field extractor.
///
/// Scans the built-in table first and any configured extras after it, so a
/// configured pattern can never outrank a built-in vendor.
#[derive(Debug, Clone, Default)]
pub struct VendorIdentifier {
    extra: Vec<VendorPattern>,
}

impl VendorIdentifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append configured vendors after the built-in table.
    pub fn with_entries(mut self, entries: &[VendorEntry]) -> Result<Self> {
        for entry in entries {
            self.extra.push(VendorPattern::compile(entry)?);
        }
        Ok(self)
    }

    fn table(&self) -> impl Iterator<Item = (&Regex, &str)> {
        KNOWN_VENDORS
            .iter()
            .map(|(pattern, name)| (pattern, *name))
            .chain(self.extra.iter().map(|v| (&v.pattern, v.name.as_str())))
    }
}

impl FieldExtractor for VendorIdentifier {
    type Output = String;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.table()
            .find(|(pattern, _)| pattern.is_match(text))
            .map(|(_, name)| name.to_string())
    }
}

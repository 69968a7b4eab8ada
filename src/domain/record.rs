//! Application records parsed from winget's table output

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fmt;

/// Column holding the package identifier
pub const ID_COLUMN: &str = "Id";
/// Column holding the installed version
pub const VERSION_COLUMN: &str = "Version";
/// Column holding the version an upgrade would install
pub const AVAILABLE_COLUMN: &str = "Available";
/// Column holding the display name
pub const NAME_COLUMN: &str = "Name";

/// One row of the upgrade table, keyed by header label
///
/// Fields keep the order of the header row. Column names are whatever the
/// header declared; the accessors for `Id`, `Version` and `Available` read
/// the empty string when the column is absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppRecord {
    fields: Vec<(String, String)>,
}

impl AppRecord {
    /// Builds a record from `(column, value)` pairs in order
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Looks up a column value
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == column)
            .map(|(_, v)| v.as_str())
    }

    /// Package identifier
    pub fn id(&self) -> &str {
        self.get(ID_COLUMN).unwrap_or_default()
    }

    /// Display name
    pub fn name(&self) -> &str {
        self.get(NAME_COLUMN).unwrap_or_default()
    }

    /// Installed version as printed
    pub fn version(&self) -> &str {
        self.get(VERSION_COLUMN).unwrap_or_default()
    }

    /// Available version as printed
    pub fn available(&self) -> &str {
        self.get(AVAILABLE_COLUMN).unwrap_or_default()
    }

    /// Column names in header order
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true when the record has no columns
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for AppRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl fmt::Display for AppRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): {} → {}",
            self.name(),
            self.id(),
            self.version(),
            self.available()
        )
    }
}

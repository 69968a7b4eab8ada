//! Fixed-width table parser for `winget upgrade` output
//!
//! winget prints its upgrade list as a column-aligned table:
//!
//! ```text
//! Name            Id               Version Available Source
//! ---------------------------------------------------------
//! Mozilla Firefox Mozilla.Firefox  120.0.1 121.0     winget
//! 2 upgrades available.
//! ```
//!
//! Columns have no delimiter, so membership is decided by character offset.
//! Offsets come from the header row only; each data row is sliced at those
//! offsets and each slice is trimmed.

use crate::domain::AppRecord;
use crate::error::TableError;

/// Line separator winget uses on its standard output
const LINE_SEPARATOR: &str = "\r\n";

/// Summary line and final empty line after the data rows
const TRAILING_NON_DATA_LINES: usize = 2;

/// Byte order mark some consoles put in front of redirected output
const BYTE_ORDER_MARK: char = '\u{feff}';

/// Column labels and their starting character offsets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    columns: Vec<(String, usize)>,
}

impl ColumnLayout {
    /// Derive the layout from a header row
    ///
    /// Each label's offset is the character index of its first occurrence in
    /// the header, minus the index of the first label, so a leading indent
    /// does not shift the columns.
    pub fn from_header(header: &str) -> Result<Self, TableError> {
        let visible = visible_segment(header);
        let labels: Vec<&str> = visible
            .split_whitespace()
            .filter(|token| is_printable(token))
            .collect();

        let Some(first) = labels.first() else {
            return Err(TableError::malformed("header row has no printable labels"));
        };
        let base = char_index_of(visible, first);

        let columns = labels
            .iter()
            .map(|label| {
                let offset = char_index_of(visible, label).saturating_sub(base);
                (label.to_string(), offset)
            })
            .collect();

        Ok(Self { columns })
    }

    /// Column labels in header order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(label, _)| label.as_str())
    }

    /// Start offsets in header order
    pub fn offsets(&self) -> impl Iterator<Item = usize> + '_ {
        self.columns.iter().map(|(_, offset)| *offset)
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Cut a data row into trimmed values, one per column
    ///
    /// A row shorter than a column's offset yields empty strings for that
    /// column and every column after it.
    pub fn slice_row(&self, row: &str) -> Vec<String> {
        let chars: Vec<char> = row.chars().collect();

        self.columns
            .iter()
            .enumerate()
            .map(|(i, (_, start))| {
                let end = self
                    .columns
                    .get(i + 1)
                    .map_or(chars.len(), |(_, next)| (*next).min(chars.len()));
                if *start >= end {
                    return String::new();
                }
                chars[*start..end]
                    .iter()
                    .collect::<String>()
                    .trim()
                    .to_string()
            })
            .collect()
    }

    /// Build a record for a data row
    pub fn record(&self, row: &str) -> AppRecord {
        AppRecord::from_pairs(self.labels().zip(self.slice_row(row)))
    }
}

/// Parse the raw output of `winget upgrade` into records, in row order
///
/// The text must use CRLF separators. The last two lines are not data, the
/// first remaining line is the header and the second is a separator.
pub fn parse(raw: &str) -> Result<Vec<AppRecord>, TableError> {
    let mut lines: Vec<&str> = raw.split(LINE_SEPARATOR).collect();
    if lines.len() < 2 {
        return Err(TableError::malformed(format!(
            "expected at least 2 lines, found {}",
            lines.len()
        )));
    }
    lines.truncate(lines.len().saturating_sub(TRAILING_NON_DATA_LINES));

    let Some(header) = lines.first() else {
        return Err(TableError::malformed("no header row before the summary lines"));
    };
    let layout = ColumnLayout::from_header(header)?;

    Ok(lines
        .iter()
        .skip(2)
        .map(|row| layout.record(row))
        .collect())
}

/// Text a terminal would show for a line containing bare carriage returns
///
/// winget redraws a progress spinner with `\r` before printing the header.
fn visible_segment(line: &str) -> &str {
    line.rsplit('\r')
        .find(|segment| !segment.trim().is_empty())
        .unwrap_or("")
        .trim_start_matches(BYTE_ORDER_MARK)
}

fn is_printable(token: &str) -> bool {
    !token.chars().any(|c| c.is_control() || is_format(c))
}

/// Invisible formatting characters (Unicode category Cf)
fn is_format(c: char) -> bool {
    matches!(
        c,
        '\u{00ad}'
            | '\u{0600}'..='\u{0605}'
            | '\u{061c}'
            | '\u{06dd}'
            | '\u{070f}'
            | '\u{180e}'
            | '\u{200b}'..='\u{200f}'
            | '\u{202a}'..='\u{202e}'
            | '\u{2060}'..='\u{2064}'
            | '\u{2066}'..='\u{206f}'
            | '\u{feff}'
            | '\u{fff9}'..='\u{fffb}'
    )
}

/// Character (not byte) index of the first occurrence of `needle`
fn char_index_of(haystack: &str, needle: &str) -> usize {
    haystack
        .find(needle)
        .map_or(0, |byte_idx| haystack[..byte_idx].chars().count())
}

//! Package metadata table.
//!
//! The table is a CSV file whose first record names the columns. Columns are
//! read by position: name, version, summary, license, homepage. Values are
//! kept as plain strings.

use std::collections::HashMap;
use std::mem::take;

use crate::error::MetadataError;

/// Number of leading columns a data record is read from.
pub const COLUMNS: usize = 5;

/// One package description from the metadata table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataRow {
    /// Package name, e.g. `wget`
    pub name: String,
    /// Package version, e.g. `1.20.3`
    pub version: String,
    /// One-line description
    pub summary: String,
    /// License name as written in the table
    pub license: String,
    /// Project homepage URL
    pub homepage: String,
}

impl MetadataRow {
    /// Missing trailing columns read as empty strings.
    fn from_record(record: Record) -> Self {
        let found = record.fields.len();
        if found < COLUMNS {
            tracing::debug!("Line {}: {found} of {COLUMNS} columns", record.line);
        }
        let mut fields = record.fields.into_iter();
        let mut next = || fields.next().unwrap_or_default();
        Self {
            name: next(),
            version: next(),
            summary: next(),
            license: next(),
            homepage: next(),
        }
    }

    /// `{name}-{version}`, the prefix a package filename must start with.
    pub fn name_version(&self) -> String {
        format!("{}-{}", self.name, self.version)
    }

    /// True when `filename` starts with `{name}-{version}`.
    pub fn matches(&self, filename: &str) -> bool {
        filename
            .strip_prefix(self.name.as_str())
            .and_then(|rest| rest.strip_prefix('-'))
            .is_some_and(|rest| rest.starts_with(self.version.as_str()))
    }
}

/// Parsed metadata: the header record plus every data row in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataTable {
    /// Column titles from the first record
    pub headers: Vec<String>,
    /// Data rows in file order
    pub rows: Vec<MetadataRow>,
}

impl MetadataTable {
    /// Parse CSV text into a table.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError`] if the input has no header or a quoted
    /// field is never closed.
    pub fn parse(text: &str) -> Result<Self, MetadataError> {
        let mut records = parse_records(text)?.into_iter();
        let headers = records.next().ok_or(MetadataError::MissingHeader)?.fields;
        let rows: Vec<_> = records.map(MetadataRow::from_record).collect();

        tracing::debug!(
            "Loaded {} metadata rows ({} columns)",
            rows.len(),
            headers.len()
        );
        Ok(Self { headers, rows })
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the table has a header but no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Build a name lookup over this table.
    pub fn index(&self) -> MetadataIndex<'_> {
        MetadataIndex::new(self)
    }
}

/// Lookup from package name to metadata rows.
///
/// Produces the same rows, in the same order, as scanning the whole table
/// with [`MetadataRow::matches`].
#[derive(Debug)]
pub struct MetadataIndex<'a> {
    table: &'a MetadataTable,
    by_name: HashMap<&'a str, Vec<usize>>,
}

impl<'a> MetadataIndex<'a> {
    /// Index every row of `table` by name.
    pub fn new(table: &'a MetadataTable) -> Self {
        let mut by_name: HashMap<&str, Vec<usize>> = HashMap::new();
        for (pos, row) in table.rows.iter().enumerate() {
            by_name.entry(row.name.as_str()).or_default().push(pos);
        }
        Self { table, by_name }
    }

    /// Rows whose `{name}-{version}` prefixes `filename`, in file order.
    pub fn matches(&self, filename: &str) -> Vec<&'a MetadataRow> {
        // A matching name always ends right before one of the filename's dashes.
        let mut hits: Vec<usize> = filename
            .match_indices('-')
            .filter_map(|(dash, _)| self.by_name.get(&filename[..dash]))
            .flatten()
            .copied()
            .filter(|&pos| self.table.rows[pos].matches(filename))
            .collect();
        hits.sort_unstable();
        hits.into_iter().map(|pos| &self.table.rows[pos]).collect()
    }
}

/// A raw CSV record and the line it starts on.
#[derive(Debug)]
struct Record {
    line: usize,
    fields: Vec<String>,
}

/// Split CSV text into records.
///
/// Quotes + CRLF tolerant. A `"` opens a quoted field only at the start of a
/// field; `""` inside quotes is an escaped quote. Blank lines are skipped.
fn parse_records(text: &str) -> Result<Vec<Record>, MetadataError> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut line = 1;
    let mut record_line = 1;
    let mut in_quotes = false;
    let mut field_start = true;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            match ch {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next(); // double-quote escape
                    field.push('"');
                }
                '"' => in_quotes = false,
                _ => {
                    if ch == '\n' {
                        line += 1;
                    }
                    field.push(ch);
                }
            }
            continue;
        }

        match ch {
            '"' if field_start => {
                in_quotes = true;
                field_start = false;
            }
            ',' => {
                fields.push(take(&mut field));
                field_start = true;
            }
            '\r' | '\n' => {
                if ch == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                finish_record(&mut records, &mut fields, &mut field, record_line);
                line += 1;
                record_line = line;
                field_start = true;
            }
            _ => {
                field.push(ch);
                field_start = false;
            }
        }
    }

    if in_quotes {
        return Err(MetadataError::UnterminatedQuote { line: record_line });
    }
    finish_record(&mut records, &mut fields, &mut field, record_line);
    Ok(records)
}

fn finish_record(
    records: &mut Vec<Record>,
    fields: &mut Vec<String>,
    field: &mut String,
    line: usize,
) {
    if fields.is_empty() && field.is_empty() {
        return;
    }
    fields.push(take(field));
    records.push(Record {
        line,
        fields: take(fields),
    });
}

//! Small hand-rolled CSV reader/writer for the `elusive_edges`, `read_size`,
//! and `elusive_clusters` tables.
//!
//! The pipeline's own tables quote fields that embed commas (the `samples`
//! and `target_ids`/`recover_samples` columns are themselves comma-joined
//! lists), so a plain `str::split(',')` is not enough. This module implements
//! just the RFC 4180 subset the three tables need: double-quoted fields,
//! `""` as an escaped quote, and nothing fancier (no multi-line fields, no
//! alternate delimiters). Pulling in a dataframe or CSV crate for this would
//! be the kind of engine dependency the core explicitly avoids (see Design
//! Notes in the specification); this mirrors the provider crates' preference
//! for parsing lines directly.

use std::fmt;

/// Splits one CSV line into its fields, honouring double-quoted fields and
/// the `""` escape for a literal quote.
#[must_use]
pub fn parse_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match (ch, in_quotes) {
            ('"', true) if chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            ('"', true) => in_quotes = false,
            ('"', false) => in_quotes = true,
            (',', false) => {
                fields.push(std::mem::take(&mut field));
            }
            (other, _) => field.push(other),
        }
    }
    fields.push(field);
    fields
}

/// Quotes `field` if it contains a comma, quote, or newline; otherwise
/// returns it unchanged.
#[must_use]
pub fn quote_field(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        let mut quoted = String::with_capacity(field.len() + 2);
        quoted.push('"');
        for ch in field.chars() {
            if ch == '"' {
                quoted.push('"');
            }
            quoted.push(ch);
        }
        quoted.push('"');
        quoted
    } else {
        field.to_owned()
    }
}

/// Writes one CSV row (already-quoted fields joined with `,`) to `writer`.
///
/// # Errors
/// Returns [`fmt::Error`] if formatting the joined fields fails.
pub fn write_row(writer: &mut impl fmt::Write, fields: &[&str]) -> fmt::Result {
    for (index, field) in fields.iter().enumerate() {
        if index > 0 {
            writer.write_char(',')?;
        }
        writer.write_str(&quote_field(field))?;
    }
    writer.write_char('\n')
}

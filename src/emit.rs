//! YAML document emission.
//!
//! The layout is fixed so that diffs between runs stay line-oriented:
//!
//! ```yaml
//! creditorAccounts:
//!   - accountNumber: '42'
//!     paymentLimit: '10' # note
//! fourthParties:
//!   - nzbn: '1234567890123'
//!     paymentLimit: '500'
//! ```
//!
//! Every value is quoted, so account numbers with leading zeros and limits like `1e3` survive
//! as text. Values are single-quoted (embedded `'` doubled) unless they hold a line break or
//! another control character, which single quotes cannot carry losslessly; those are written
//! double-quoted with backslash escapes.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::types::AcceptedRecords;

const ENTRY_INDENT: &str = "  - ";
const FIELD_INDENT: &str = "    ";

/// Render `records` as the two-section document.
pub fn render_document(records: &AcceptedRecords) -> String {
    let mut out = String::from("creditorAccounts:\n");
    for r in &records.creditor_accounts {
        push_entry(&mut out, "accountNumber", &r.account_number, &r.payment_limit, &r.comment);
    }
    out.push_str("fourthParties:\n");
    for r in &records.fourth_parties {
        push_entry(&mut out, "nzbn", &r.nzbn, &r.payment_limit, &r.comment);
    }
    out
}

fn push_entry(out: &mut String, key_field: &str, key: &str, limit: &str, comment: &str) {
    if key.is_empty() {
        return;
    }
    out.push_str(&format!("{ENTRY_INDENT}{key_field}: {}\n", scalar(key)));
    out.push_str(&format!("{FIELD_INDENT}paymentLimit: {}", scalar(limit)));
    out.push_str(&annotation(comment));
    out.push('\n');
}

/// Quote `value` as a YAML scalar that parses back to exactly `value`.
pub fn scalar(value: &str) -> String {
    if value.chars().any(char::is_control) {
        double_quote(value)
    } else {
        quote(value)
    }
}

/// Single-quote `value`, doubling any embedded single quote.
pub fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

fn double_quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04X}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Trailing ` # comment`, or nothing for an empty comment. Line breaks become spaces so the
/// annotation cannot spill onto the next line.
fn annotation(comment: &str) -> String {
    if comment.is_empty() {
        return String::new();
    }
    let flat: String = comment
        .split(['\r', '\n'])
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    format!(" # {flat}")
}

/// Write `contents` to `path` in one step: a sibling temporary file is written, synced and
/// renamed over the destination.
pub fn write_document(path: &Path, contents: &str) -> io::Result<()> {
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "output path has no file name"))?;
    let mut tmp_name = file_name.to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    let result = (|| {
        let mut f = fs::File::create(&tmp_path)?;
        f.write_all(contents.as_bytes())?;
        f.sync_all()?;
        fs::rename(&tmp_path, path)
    })();

    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}

//! CSV export of session results.

use std::fmt::Write as _;

use crate::domain::foundation::Timestamp;
use crate::domain::poll::{Tally, VoteChoice};
use crate::ports::ResultsView;

/// Renders results as CSV.
///
/// Layout: one `<Option>,Votes` row per option, then any summary rows.
/// Variants with history append a blank line and a `History` block whose
/// columns are the timestamp, the summary fields and one column per option.
pub fn render<C: VoteChoice>(view: &ResultsView<C>) -> String {
    let mut out = String::new();

    push_row(&mut out, [column_title(C::FIELD), "Votes".to_string()]);
    for (label, votes) in view.current.counts() {
        push_row(&mut out, [label, votes.to_string()]);
    }
    for (label, value) in view.current.summary() {
        push_row(&mut out, [label.to_string(), value]);
    }

    if C::RECORDS_HISTORY {
        out.push('\n');
        push_row(&mut out, ["History".to_string()]);

        let mut header = vec!["Timestamp".to_string()];
        header.extend(view.current.summary().into_iter().map(|(l, _)| l.to_string()));
        header.extend(view.current.counts().into_iter().map(|(l, _)| l));
        push_row(&mut out, header);

        for snapshot in &view.history {
            let mut row = vec![snapshot.timestamp.to_rfc3339()];
            row.extend(snapshot.results.summary().into_iter().map(|(_, v)| v));
            row.extend(
                snapshot
                    .results
                    .counts()
                    .into_iter()
                    .map(|(_, n)| n.to_string()),
            );
            push_row(&mut out, row);
        }
    }

    out
}

/// Download name: `<name>_results_<YYYY-MM-DD_HH-MM-SS>.csv`.
///
/// Characters outside `[A-Za-z0-9_-]` in the session name become `_` so the
/// value is safe inside a `Content-Disposition` header.
pub fn filename<C: VoteChoice>(view: &ResultsView<C>) -> String {
    let safe: String = view
        .name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let stem = if safe.is_empty() { "session" } else { safe.as_str() };
    format!("{}_results_{}.csv", stem, Timestamp::now().to_file_stamp())
}

fn column_title(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn push_row<I>(out: &mut String, fields: I)
where
    I: IntoIterator<Item = String>,
{
    let line = fields
        .into_iter()
        .map(|field| escape(&field))
        .collect::<Vec<_>>()
        .join(",");
    // Writing to a String cannot fail.
    let _ = writeln!(out, "{}", line);
}

fn escape(field: &str) -> String {
    if field.contains(|c: char| matches!(c, ',' | '"' | '\n' | '\r')) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

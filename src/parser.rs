use std::ops::Range;

use crate::record::{normalize_username, SessionMap, SessionRecord};

/// Character-column offsets of one listing tool's fixed-width output.
///
/// The stock layout matches `query user`; a provider with a different tool
/// or locale supplies its own offsets instead of patching the parser.
/// A shifted column width in the external tool silently mis-slices fields,
/// which is inherent to fixed-width output.
#[derive(Debug, Clone)]
pub struct ColumnLayout {
    pub username: Range<usize>,
    pub session_name: Range<usize>,
    pub session_id: Range<usize>,
    pub state: Range<usize>,
    pub idle_time: Range<usize>,
    pub login_time: Range<usize>,
}

impl ColumnLayout {
    /// Layout of `query user` output. The username slice starts at the
    /// first column so it retains the `>` current-session marker.
    pub fn query_user() -> Self {
        ColumnLayout {
            username: 0..23,
            session_name: 23..42,
            session_id: 42..45,
            state: 45..55,
            idle_time: 55..63,
            login_time: 64..89,
        }
    }

    fn field(&self, line: &str, range: &Range<usize>) -> String {
        line.chars()
            .skip(range.start)
            .take(range.end - range.start)
            .collect::<String>()
            .trim()
            .to_string()
    }
}

impl Default for ColumnLayout {
    fn default() -> Self {
        ColumnLayout::query_user()
    }
}

/// Parses one host's raw session listing into a replacement table.
///
/// The header line (spotted by its USERNAME marker token) and blank lines
/// are skipped, as are rows with no recoverable username; no partial record
/// is ever inserted. Empty input yields an empty table.
pub fn parse_listing(raw: &str, layout: &ColumnLayout) -> SessionMap {
    let mut table = SessionMap::new();

    for line in raw.lines() {
        if line.trim().is_empty() || line.contains("USERNAME") {
            continue;
        }

        let key = normalize_username(first_field(line));
        if key.is_empty() {
            continue;
        }

        let record = SessionRecord {
            username: layout.field(line, &layout.username),
            session_name: layout.field(line, &layout.session_name),
            session_id: layout.field(line, &layout.session_id),
            state: layout.field(line, &layout.state),
            idle_time: parse_idle_time(&layout.field(line, &layout.idle_time)),
            login_time: layout.field(line, &layout.login_time),
        };

        table.insert(key, record);
    }

    table
}

/// First field of a row split on runs of two or more whitespace characters.
/// Used to recover the table key independently of the fixed slices.
fn first_field(line: &str) -> &str {
    let trimmed = line.trim();
    let mut prev_was_ws = false;

    for (idx, ch) in trimmed.char_indices() {
        if ch.is_whitespace() {
            if prev_was_ws {
                return trimmed[..idx].trim_end();
            }
            prev_was_ws = true;
        } else {
            prev_was_ws = false;
        }
    }

    trimmed
}

/// Leading digit prefix of the idle column. "." and "None" show up for
/// sessions that were never idle or carry no data; both coerce to 0.
fn parse_idle_time(text: &str) -> u32 {
    let digits: String = text
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}

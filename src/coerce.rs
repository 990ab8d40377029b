use std::borrow::Cow;
use tracing::trace;

/// Drops `_` digit separators; one is only allowed between two digits.
fn strip_separators(raw: &str) -> Option<Cow<'_, str>> {
    if !raw.contains('_') {
        return Some(Cow::Borrowed(raw));
    }
    let bytes = raw.as_bytes();
    let separated = bytes.iter().enumerate().all(|(i, &b)| {
        b != b'_'
            || (i > 0
                && bytes[i - 1].is_ascii_digit()
                && bytes.get(i + 1).is_some_and(u8::is_ascii_digit))
    });
    separated.then(|| Cow::Owned(raw.replace('_', "")))
}

fn parse_cell(raw: &str) -> Option<f64> {
    strip_separators(raw.trim())?.parse::<f64>().ok()
}

/// Parses every string that reads as a float and silently drops the rest.
///
/// Surrounding whitespace and `_` separators between digits are ignored.
/// Empty cells, placeholders such as `M`, and flagged readings such as
/// `0.00s` are skipped; the survivors keep their relative order.
pub fn coerce<S: AsRef<str>>(values: &[S]) -> Vec<f64> {
    values
        .iter()
        .filter_map(|raw| {
            let raw = raw.as_ref();
            let parsed = parse_cell(raw);
            if parsed.is_none() {
                trace!(cell = raw, "skipping non-numeric cell");
            }
            parsed
        })
        .collect()
}

//! Conflict marker text.

const CURRENT_MARKER: &str = "<<<<<<< HEAD\n";
const SEPARATOR: &str = "=======\n";
const END_MARKER: &str = ">>>>>>>\n";

/// Combine both sides of a conflicted file into marker-delimited text.
///
/// Each side has trailing whitespace trimmed and is followed by a newline.
/// A side that is absent or has empty content contributes no lines at all;
/// a whitespace-only side still contributes one blank line.
///
/// ```
/// use sprig_merge::render_conflict;
///
/// let text = render_conflict(Some("B\n".as_bytes()), Some("C\n".as_bytes()));
/// assert_eq!(text, "<<<<<<< HEAD\nB\n=======\nC\n>>>>>>>\n");
///
/// let text = render_conflict(None, Some("only given".as_bytes()));
/// assert_eq!(text, "<<<<<<< HEAD\n=======\nonly given\n>>>>>>>\n");
/// ```
pub fn render_conflict(current: Option<&[u8]>, given: Option<&[u8]>) -> String {
    let mut out = String::from(CURRENT_MARKER);
    push_side(&mut out, current);
    out.push_str(SEPARATOR);
    push_side(&mut out, given);
    out.push_str(END_MARKER);
    out
}

fn push_side(out: &mut String, side: Option<&[u8]>) {
    let Some(data) = side.filter(|data| !data.is_empty()) else {
        return;
    };
    out.push_str(String::from_utf8_lossy(data).trim_end());
    out.push('\n');
}

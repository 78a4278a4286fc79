//! Parsing utilities.
pub(crate) mod header_text;

/// Split raw header text into `(name, value)` pairs in input order.
///
/// Both `\r\n` and `\n` end a line. Blank lines and lines without a colon
/// are skipped. Names and values are returned untrimmed.
pub fn split_header_lines(text: &str) -> impl Iterator<Item = header_text::FieldLineRef<'_>> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| match header_text::field_line(line) {
            Ok((_remain, output)) => Some(output),
            Err(_) => {
                tracing::trace!(line, "skipped header line without colon");
                None
            }
        })
}

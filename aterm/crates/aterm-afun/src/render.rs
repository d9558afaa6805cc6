//! Textual rendering of symbols.
//!
//! Unquoted symbols print their name verbatim. Quoted symbols are wrapped
//! in `"` with `\`, `"`, newline, tab and carriage return escaped as
//! two-character sequences.

use std::fmt;

use crate::entry::SymbolRecord;

const QUOTE: char = '"';

/// Write the textual form of `record` to `out`
///
/// Returns the number of characters written.
pub fn render_into<W: fmt::Write + ?Sized>(
    record: &SymbolRecord,
    out: &mut W,
) -> Result<usize, fmt::Error> {
    if !record.is_quoted() {
        out.write_str(record.name())?;
        return Ok(record.name().chars().count());
    }

    let mut written = 2;
    out.write_char(QUOTE)?;
    for c in record.name().chars() {
        match escape(c) {
            Some(escaped) => {
                out.write_char('\\')?;
                out.write_char(escaped)?;
                written += 2;
            }
            None => {
                out.write_char(c)?;
                written += 1;
            }
        }
    }
    out.write_char(QUOTE)?;
    Ok(written)
}

#[inline]
fn escape(c: char) -> Option<char> {
    match c {
        '\\' => Some('\\'),
        QUOTE => Some(QUOTE),
        '\n' => Some('n'),
        '\t' => Some('t'),
        '\r' => Some('r'),
        _ => None,
    }
}

/// Invert the escaping of a quoted rendering
///
/// Accepts the text between the quote delimiters. Returns `None` on a
/// dangling backslash or an unknown escape.
///
/// # Examples
///
/// ```
/// use aterm_afun::render::unescape;
///
/// assert_eq!(unescape(r#"say \"hi\"\n"#).as_deref(), Some("say \"hi\"\n"));
/// assert_eq!(unescape(r"bad \q"), None);
/// ```
pub fn unescape(text: &str) -> Option<String> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        out.push(match chars.next()? {
            '\\' => '\\',
            QUOTE => QUOTE,
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            _ => return None,
        });
    }
    Some(out)
}

/// `Display` adapter returned by
/// [`SymbolRegistry::display`](crate::SymbolRegistry::display)
pub struct SymbolDisplay<'a> {
    pub(crate) record: Option<&'a SymbolRecord>,
}

impl fmt::Display for SymbolDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.record {
            Some(record) => render_into(record, f).map(|_| ()),
            None => f.write_str("<free>"),
        }
    }
}

use std::fmt;

use crate::document::{Document, Key, Section};
use crate::scanner::{Read, STOP_CHARS, ends_in_open_quote, read_token};

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(comment) = &self.comment {
            write_comment(f, comment, self.sections.is_empty())?;
        }

        let count = self.sections.len();
        for (i, section) in self.sections.iter().enumerate() {
            write_section(f, section, i == 0, i + 1 == count)?;
        }

        Ok(())
    }
}

fn write_section(
    f: &mut fmt::Formatter<'_>,
    section: &Section,
    first: bool,
    last: bool,
) -> fmt::Result {
    // Keys at the top of the file land in the default section without a header. Anywhere else
    // the default section needs an explicit `[""]`.
    let headerless = first
        && section.name.is_empty()
        && section.comment.is_none()
        && !section.keys.is_empty();

    if !headerless {
        f.write_str("[")?;
        write_token(f, &section.name)?;
        f.write_str("]")?;
        end_line(f, section.comment.as_deref(), last && section.keys.is_empty())?;
    }

    let count = section.keys.len();
    for (i, key) in section.keys.iter().enumerate() {
        write_key(f, key, last && i + 1 == count)?;
    }

    Ok(())
}

fn write_key(f: &mut fmt::Formatter<'_>, key: &Key, last: bool) -> fmt::Result {
    let comment = key.comment.as_deref();

    write_token(f, &key.name)?;
    f.write_str("=")?;
    match &key.value {
        // Bare text right after the value would read back as part of it.
        Some(value) if comment.is_some_and(starts_bare) => write_quoted(f, value)?,
        Some(value) => write_token(f, value)?,
        // A token on the same line would read back as the value.
        None if comment.is_some_and(starts_with_token) => f.write_str("\n")?,
        None => {}
    }
    end_line(f, comment, last)
}

fn starts_bare(comment: &str) -> bool {
    comment
        .bytes()
        .next()
        .is_some_and(|b| !STOP_CHARS.contains(&b))
}

fn starts_with_token(comment: &str) -> bool {
    matches!(read_token(comment, 0), Read::Token { token, .. } if !token.is_structural())
}

fn end_line(f: &mut fmt::Formatter<'_>, comment: Option<&str>, last: bool) -> fmt::Result {
    match comment {
        Some(comment) => write_comment(f, comment, last),
        None => f.write_str("\n"),
    }
}

/// Write comment text followed by a line terminator. Unless nothing follows, a quote left open
/// by the comment is closed so it cannot swallow the elements after it.
fn write_comment(f: &mut fmt::Formatter<'_>, comment: &str, last: bool) -> fmt::Result {
    let body = comment.strip_suffix('\n').unwrap_or(comment);

    if !last && ends_in_open_quote(comment) {
        log::warn!("closing an unterminated quote in comment {comment:?}");
        return writeln!(f, "{body}\"");
    }

    writeln!(f, "{body}")
}

/// Write `text` so it reads back as a single token, quoting it when it is empty or contains a
/// structural character.
fn write_token(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    if !text.is_empty() && !text.bytes().any(|b| STOP_CHARS.contains(&b)) {
        return f.write_str(text);
    }

    write_quoted(f, text)
}

fn write_quoted(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    if text.contains('"') {
        log::warn!("{text:?} contains a double quote and will not read back unchanged");
    }

    write!(f, "\"{text}\"")
}

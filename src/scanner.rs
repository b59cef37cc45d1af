/// Characters that end a bare token. All of them are ASCII, so every position the scanner stops
/// at is a valid `str` boundary.
pub(crate) const STOP_CHARS: &[u8] = b" \t\r\n#;\",[]=";

/// Outcome of [`scan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Scan {
    /// An end character was found after this many bytes.
    Matched(usize),
    /// A stop character or the end of input came first, after this many bytes.
    BlockedAt(usize),
}

impl Scan {
    #[must_use]
    pub(crate) fn count(self) -> usize {
        match self {
            Self::Matched(n) | Self::BlockedAt(n) => n,
        }
    }
}

/// Count bytes from `position` until one of `end_chars` or one of `stop_chars` is reached.
/// Stop characters take precedence.
pub(crate) fn scan(data: &[u8], position: usize, end_chars: &[u8], stop_chars: &[u8]) -> Scan {
    let rest = data.get(position..).unwrap_or_default();

    for (count, b) in rest.iter().enumerate() {
        if stop_chars.contains(b) {
            return Scan::BlockedAt(count);
        } else if end_chars.contains(b) {
            return Scan::Matched(count);
        }
    }

    Scan::BlockedAt(rest.len())
}

/// Position of the line terminator (or end of input) at or after `position`.
pub(crate) fn line_end(data: &[u8], position: usize) -> usize {
    position + scan(data, position, b"\r\n", b"").count()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token<'a> {
    pub(crate) text: &'a str,
    pub(crate) quoted: bool,
    /// A quoted token whose closing quote is missing; it runs to the end of input.
    pub(crate) unterminated: bool,
}

impl Token<'_> {
    /// Whether this is the unquoted single character `c`.
    #[must_use]
    pub(crate) fn is(&self, c: char) -> bool {
        !self.quoted && self.text.len() == 1 && self.text.starts_with(c)
    }

    /// Whether this is an unquoted structural character such as `[` or `=`.
    #[must_use]
    pub(crate) fn is_structural(&self) -> bool {
        !self.quoted
            && self
                .text
                .bytes()
                .next()
                .is_some_and(|b| STOP_CHARS.contains(&b))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Read<'a> {
    Token { token: Token<'a>, next: usize },
    /// Only blanks remained on the line. `at` is where the terminator begins and `next` is just
    /// past it.
    LineEnded { at: usize, next: usize },
    Eof,
}

/// Read the next token on the current line, starting at `position`.
pub(crate) fn read_token(text: &str, position: usize) -> Read<'_> {
    let data = text.as_bytes();
    let start = position
        + data
            .get(position..)
            .unwrap_or_default()
            .iter()
            .take_while(|&&b| b == b' ' || b == b'\t')
            .count();

    match data.get(start) {
        None => Read::Eof,
        Some(b'\n') => Read::LineEnded {
            at: start,
            next: start + 1,
        },
        Some(b'\r') => {
            let next = if data.get(start + 1) == Some(&b'\n') {
                start + 2
            } else {
                start + 1
            };
            Read::LineEnded { at: start, next }
        }
        Some(b'"') => {
            let begin = start + 1;
            let (end, next, unterminated) = match scan(data, begin, b"\"", b"") {
                Scan::Matched(n) => (begin + n, begin + n + 1, false),
                // The rest of the input is the token.
                Scan::BlockedAt(n) => (begin + n, begin + n, true),
            };
            Read::Token {
                token: Token {
                    text: &text[begin..end],
                    quoted: true,
                    unterminated,
                },
                next,
            }
        }
        Some(_) => {
            // An empty run still yields the structural character it abuts.
            let end = start + scan(data, start, STOP_CHARS, b"").count().max(1);
            Read::Token {
                token: Token {
                    text: &text[start..end],
                    quoted: false,
                    unterminated: false,
                },
                next: end,
            }
        }
    }
}

/// Whether reading `text` the way the parser does leaves a quoted token open at the end of it.
/// Lines the parser discards whole are skipped, since their quotes are never tokenized.
pub(crate) fn ends_in_open_quote(text: &str) -> bool {
    let mut position = 0;

    loop {
        match read_token(text, position) {
            Read::Eof => return false,
            Read::LineEnded { next, .. } => position = next,
            Read::Token { token, .. } if token.unterminated => return true,
            Read::Token { token, .. } if token.is_structural() => {
                position = line_end(text.as_bytes(), position);
            }
            Read::Token { next, .. } => position = next,
        }
    }
}

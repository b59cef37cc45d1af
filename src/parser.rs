use std::mem;

use crate::document::Document;
use crate::scanner::{Read, Token, line_end, read_token};

/// Element that comment text is currently attached to. A key is only ever set together with the
/// section that owns it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Cursor {
    section: Option<usize>,
    key: Option<usize>,
}

/// Represents an on-going parse.
#[derive(Debug, Clone)]
pub(crate) struct Parser<'a> {
    text: &'a str,
    position: usize,
    cursor: Cursor,
    /// Discarded text not yet attached to an element.
    pending: String,
    document: Document,
}

impl<'a> Parser<'a> {
    #[must_use]
    pub(crate) fn new(text: &'a str) -> Self {
        Self {
            text,
            position: 0,
            cursor: Cursor::default(),
            pending: String::new(),
            document: Document::new(),
        }
    }
}

impl Parser<'_> {
    pub(crate) fn into_document(mut self) -> Document {
        while self.position < self.text.len() {
            self.parse_statement();
        }

        self.flush_comment();
        self.document
    }

    fn parse_statement(&mut self) {
        let start = self.position;

        match read_token(self.text, start) {
            Read::Eof => {
                self.discard(start, self.text.len());
                self.position = self.text.len();
            }
            Read::LineEnded { at, next } => {
                self.discard(start, at);
                self.pending.push('\n');
                self.position = next;
            }
            Read::Token { token, next } if token.is('[') => self.parse_section_header(start, next),
            // Comment lines, and lines opening with `,` `=` or `]`.
            Read::Token { token, .. } if token.is_structural() => self.discard_line(start),
            Read::Token { token, next } => self.parse_key(start, token, next),
        }
    }

    /// Expects `name ]` after the opening bracket; otherwise the whole line becomes comment text.
    fn parse_section_header(&mut self, start: usize, after_bracket: usize) {
        let (name, after_name) = match read_token(self.text, after_bracket) {
            Read::Token { token, next } if !token.is_structural() => (token.text, next),
            _ => return self.discard_line(start),
        };

        match read_token(self.text, after_name) {
            Read::Token { token, next } if token.is(']') => {
                self.flush_comment();
                let section = self.document.find_or_create_section(name);
                self.cursor = Cursor {
                    section: Some(section),
                    key: None,
                };
                self.position = next;
            }
            _ => self.discard_line(start),
        }
    }

    /// Expects `= value` after the key name. Only the name is discarded on failure, so the rest
    /// of the line is parsed again from there.
    fn parse_key(&mut self, start: usize, name: Token<'_>, after_name: usize) {
        let after_equals = match read_token(self.text, after_name) {
            Read::Token { token, next } if token.is('=') => next,
            _ => {
                self.discard(start, after_name);
                self.position = after_name;
                return;
            }
        };

        self.flush_comment();
        let section = match self.cursor.section {
            Some(section) => section,
            None => self.document.find_or_create_section(""),
        };
        let section_ref = &mut self.document.sections[section];
        let key = section_ref.find_or_create_key(name.text);
        self.cursor = Cursor {
            section: Some(section),
            key: Some(key),
        };
        self.position = after_equals;

        match read_token(self.text, after_equals) {
            Read::Token { token, next } if !token.is_structural() => {
                section_ref.keys[key].value = Some(token.text.to_owned());
                self.position = next;
            }
            // No value on this line; an earlier value for the same key is kept.
            _ => {}
        }
    }

    fn discard_line(&mut self, start: usize) {
        let end = line_end(self.text.as_bytes(), start);
        self.discard(start, end);
        self.position = end;
    }

    fn discard(&mut self, start: usize, end: usize) {
        if start < end {
            log::trace!("discarding {:?} at byte {start}", &self.text[start..end]);
            self.pending.push_str(&self.text[start..end]);
        }
    }

    /// Attach pending comment text to the most specific open element.
    fn flush_comment(&mut self) {
        if self.pending.is_empty() {
            return;
        }

        let text = mem::take(&mut self.pending);

        // A lone terminator is the element's own line ending, which the writer restores.
        if text == "\n" && self.cursor.section.is_some() {
            return;
        }

        let target = match self.cursor {
            Cursor {
                section: Some(section),
                key: Some(key),
            } => &mut self.document.sections[section].keys[key].comment,
            Cursor {
                section: Some(section),
                key: None,
            } => &mut self.document.sections[section].comment,
            Cursor { section: None, .. } => &mut self.document.comment,
        };
        target.get_or_insert_with(String::new).push_str(&text);
    }
}

#[cfg(test)]
mod tests {
    use crate::document::{Document, Key};

    fn values(document: &Document, section: &str) -> Vec<(String, Option<String>)> {
        document
            .section(section)
            .expect("section should exist")
            .keys()
            .iter()
            .map(|key| (key.name().to_owned(), key.value().map(str::to_owned)))
            .collect()
    }

    #[test]
    fn header_comment_and_keys() {
        let document = Document::parse("; header comment\n[net]\nhost=localhost\nport=8080\n");

        assert_eq!(document.comment(), Some("; header comment\n"));
        assert_eq!(document.sections().len(), 1);

        let net = &document.sections()[0];
        assert_eq!(net.name(), "net");
        assert_eq!(net.comment(), None);
        assert_eq!(
            values(&document, "net"),
            [
                ("host".to_owned(), Some("localhost".to_owned())),
                ("port".to_owned(), Some("8080".to_owned())),
            ]
        );
        assert!(net.keys().iter().all(|key| key.comment().is_none()));
    }

    #[test]
    fn keys_before_any_header_use_default_section() {
        let document = Document::parse("a=1\n[s]\nb=2\n");

        assert_eq!(document.sections()[0].name(), "");
        assert_eq!(document.get_string("", "a", "_"), "1");
        assert_eq!(document.get_string("s", "b", "_"), "2");
    }

    #[test]
    fn unterminated_header_is_discarded() {
        let document = Document::parse("[abc\nkey=1\n");

        assert_eq!(document.comment(), Some("[abc\n"));
        assert_eq!(document.sections().len(), 1);
        assert_eq!(document.sections()[0].name(), "");
        assert_eq!(document.get_string("", "key", "_"), "1");
    }

    #[test]
    fn empty_header_is_discarded() {
        let document = Document::parse("[]\n[ spaced ]\n");

        assert_eq!(document.comment(), Some("[]\n"));
        assert_eq!(document.sections().len(), 1);
        assert_eq!(document.sections()[0].name(), "spaced");
    }

    #[test]
    fn quoted_value_keeps_structural_characters() {
        let document = Document::parse(r#"k="a=b;c""#);

        assert_eq!(document.get_string("", "k", "_"), "a=b;c");
    }

    #[test]
    fn quoted_names() {
        let document = Document::parse("[\"my section\"]\n\"my key\" = \"x y\"\n");

        assert_eq!(document.get_string("MY SECTION", "My Key", "_"), "x y");
    }

    #[test]
    fn stray_terminator_lines_are_comments() {
        let document = Document::parse("=\n]\n, x\n");

        assert!(document.sections().is_empty());
        assert_eq!(document.comment(), Some("=\n]\n, x\n"));
    }

    #[test]
    fn garbage_only_input_is_one_comment() {
        let text = "this is not\n  an ini file ;\n";
        let document = Document::parse(text);

        assert!(document.sections().is_empty());
        assert_eq!(document.comment(), Some(text));
    }

    #[test]
    fn comments_attach_to_preceding_element() {
        let document = Document::parse("[s] ; about s\na=1 ; about a\n\n; more about a\nb=2\n");
        let section = document.section("s").expect("section should exist");

        assert_eq!(section.comment(), Some(" ; about s\n"));
        assert_eq!(
            section.key("a").and_then(Key::comment),
            Some(" ; about a\n\n; more about a\n")
        );
        assert_eq!(section.key("b").and_then(Key::comment), None);
    }

    #[test]
    fn malformed_fragments_accumulate_on_one_line() {
        let document = Document::parse("[s]\nk=v junk more\nnext=1\n");
        let section = document.section("s").expect("section should exist");

        assert_eq!(section.get("k"), Some("v"));
        assert_eq!(section.key("k").and_then(Key::comment), Some(" junk more\n"));
        assert_eq!(section.get("next"), Some("1"));
    }

    #[test]
    fn two_assignments_on_one_line() {
        let document = Document::parse("a=1 b=2\n");

        assert_eq!(
            values(&document, ""),
            [
                ("a".to_owned(), Some("1".to_owned())),
                ("b".to_owned(), Some("2".to_owned())),
            ]
        );
    }

    #[test]
    fn missing_value_leaves_key_unset() {
        let document = Document::parse("[s]\nempty=\nsemi=;note\nquoted=\"\"\n");
        let section = document.section("s").expect("section should exist");

        assert_eq!(section.key("empty").and_then(Key::value), None);
        assert_eq!(section.key("semi").and_then(Key::value), None);
        assert_eq!(section.key("semi").and_then(Key::comment), Some(";note\n"));
        assert_eq!(section.key("quoted").and_then(Key::value), Some(""));
    }

    #[test]
    fn duplicates_merge_ignoring_case() {
        let document = Document::parse("[S]\nk=1\n[t]\n[s]\nK=2\nj=3\n");

        assert_eq!(document.sections().len(), 2);
        assert_eq!(
            values(&document, "s"),
            [
                ("k".to_owned(), Some("2".to_owned())),
                ("j".to_owned(), Some("3".to_owned())),
            ]
        );
    }

    #[test]
    fn header_resets_current_key() {
        let document = Document::parse("[a]\nk=1\n[b]\n; about b\n");

        assert_eq!(document.key("a", "k").and_then(Key::comment), None);
        assert_eq!(
            document.section("b").and_then(|section| section.comment()),
            Some("\n; about b\n")
        );
    }

    #[test]
    fn crlf_matches_lf() {
        let lf = Document::parse("; c\n[net]\nhost=localhost\n\nport=1\n");
        let crlf = Document::parse("; c\r\n[net]\r\nhost=localhost\r\n\r\nport=1\r\n");

        assert_eq!(lf, crlf);
    }

    #[test]
    fn key_without_equals_is_discarded() {
        let document = Document::parse("[s]\nlonely\nk=1\n");
        let section = document.section("s").expect("section should exist");

        assert_eq!(section.keys().len(), 1);
        assert_eq!(section.comment(), Some("\nlonely\n"));
    }
}

use crate::parser::Parser;

/// An INI document: leading comment text followed by sections in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub(crate) comment: Option<String>,
    pub(crate) sections: Vec<Section>,
}

impl Document {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from INI text. Anything that is not a header, an assignment or a comment
    /// line is kept as comment text, so this never fails.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        Parser::new(text).into_document()
    }

    /// Comment text preceding the first section.
    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Look up a section by name, ignoring ASCII case.
    #[must_use]
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections
            .iter()
            .find(|section| section.name.eq_ignore_ascii_case(name))
    }

    #[must_use]
    pub fn key(&self, section: &str, key: &str) -> Option<&Key> {
        self.section(section)?.key(key)
    }

    /// The value of `key` in `section`, or `default` if either is missing or the value is unset.
    #[must_use]
    pub fn get_string<'a>(&'a self, section: &str, key: &str, default: &'a str) -> &'a str {
        self.key(section, key)
            .and_then(Key::value)
            .unwrap_or(default)
    }

    /// Set `key` in `section`, creating either one if needed.
    pub fn set_string(&mut self, section: &str, key: &str, value: impl Into<String>) {
        let index = self.find_or_create_section(section);
        let section = &mut self.sections[index];
        let index = section.find_or_create_key(key);
        section.keys[index].value = Some(value.into());
    }

    pub(crate) fn find_or_create_section(&mut self, name: &str) -> usize {
        if let Some(i) = self
            .sections
            .iter()
            .position(|section| section.name.eq_ignore_ascii_case(name))
        {
            i
        } else {
            self.sections.push(Section::new(name.to_owned()));
            self.sections.len() - 1
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub(crate) name: String,
    pub(crate) keys: Vec<Key>,
    pub(crate) comment: Option<String>,
}

impl Section {
    #[must_use]
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            keys: Vec::with_capacity(8),
            comment: None,
        }
    }

    /// Empty for the default section.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    /// Comment text following the section header.
    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    #[must_use]
    pub fn key(&self, name: &str) -> Option<&Key> {
        self.keys
            .iter()
            .find(|key| key.name.eq_ignore_ascii_case(name))
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.key(name)?.value()
    }

    pub(crate) fn find_or_create_key(&mut self, name: &str) -> usize {
        if let Some(i) = self
            .keys
            .iter()
            .position(|key| key.name.eq_ignore_ascii_case(name))
        {
            i
        } else {
            self.keys.push(Key::new(name.to_owned()));
            self.keys.len() - 1
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key {
    pub(crate) name: String,
    pub(crate) value: Option<String>,
    pub(crate) comment: Option<String>,
}

impl Key {
    #[must_use]
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            value: None,
            comment: None,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `None` when the key was written without a value (`name=`).
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Comment text following the value.
    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }
}

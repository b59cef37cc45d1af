use std::str::FromStr;

use crate::document::{Document, Key};

impl Document {
    /// Parse the value as an integer, accepting decimal or `0x`-prefixed hexadecimal with an
    /// optional sign. Returns `default` if the key is missing or does not parse.
    #[must_use]
    pub fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.key(section, key)
            .and_then(Key::value)
            .and_then(parse_int)
            .unwrap_or(default)
    }

    /// Accepts `1/true/yes/on` and `0/false/no/off`, ignoring ASCII case.
    #[must_use]
    pub fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.key(section, key)
            .and_then(Key::value)
            .and_then(parse_bool)
            .unwrap_or(default)
    }

    /// Parse the value with [`FromStr`]. `Ok(None)` means the key is missing or unset.
    ///
    /// # Errors
    ///
    /// Returns the parse error of `T` if the value is present but invalid.
    pub fn get_value<T: FromStr>(&self, section: &str, key: &str) -> Result<Option<T>, T::Err> {
        self.key(section, key)
            .and_then(Key::value)
            .map(str::parse)
            .transpose()
    }

    pub fn set_int(&mut self, section: &str, key: &str, value: i64) {
        self.set_string(section, key, value.to_string());
    }

    pub fn set_bool(&mut self, section: &str, key: &str, value: bool) {
        self.set_string(section, key, if value { "true" } else { "false" });
    }
}

fn parse_int(value: &str) -> Option<i64> {
    let value = value.trim_ascii();
    let (negative, digits) = match value.as_bytes().first() {
        Some(b'-') => (true, &value[1..]),
        Some(b'+') => (false, &value[1..]),
        _ => (false, value),
    };

    let magnitude = match digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        Some(hex) if hex.bytes().all(|b| b.is_ascii_hexdigit()) => {
            i128::from_str_radix(hex, 16).ok()?
        }
        Some(_) => return None,
        None if digits.bytes().all(|b| b.is_ascii_digit()) => digits.parse::<i128>().ok()?,
        None => return None,
    };

    i64::try_from(if negative { -magnitude } else { magnitude }).ok()
}

fn parse_bool(value: &str) -> Option<bool> {
    const TRUE: &[&str] = &["1", "true", "yes", "on"];
    const FALSE: &[&str] = &["0", "false", "no", "off"];

    let value = value.trim_ascii();
    if TRUE.iter().any(|s| s.eq_ignore_ascii_case(value)) {
        Some(true)
    } else if FALSE.iter().any(|s| s.eq_ignore_ascii_case(value)) {
        Some(false)
    } else {
        None
    }
}

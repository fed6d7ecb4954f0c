//! Form body decoding for the tool endpoints.
//!
//! The endpoints accept `application/x-www-form-urlencoded` bodies — the
//! same encoding the dispatcher and the embedded frontend send. `+` decodes
//! to a space, `%XX` to the escaped byte; an invalid escape is kept
//! literally rather than rejected.

use anyhow::{Context, Result};

/// Decoded form fields, in the order they appeared in the body.
#[derive(Debug, Default)]
pub struct FormData {
    fields: Vec<(String, String)>,
}

impl FormData {
    /// Parse a form-encoded body. A pair without `=` decodes to an empty
    /// value; empty pairs (stray `&`) are skipped.
    pub fn parse(body: &str) -> Self {
        let mut fields = Vec::new();
        for pair in body.split('&') {
            if pair.is_empty() {
                continue;
            }
            let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
            fields.push((decode(name), decode(value)));
        }
        Self { fields }
    }

    /// Look up a field. First occurrence wins when a name repeats.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Look up a field the endpoint's payload contract requires.
    pub fn require(&self, name: &str) -> Result<&str> {
        self.get(name)
            .with_context(|| format!("missing form field `{name}`"))
    }
}

/// Percent-decode one form token.
fn decode(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len() => match hex_pair(bytes[i + 1], bytes[i + 2]) {
                Some(byte) => {
                    out.push(byte);
                    i += 3;
                }
                None => {
                    out.push(b'%');
                    i += 1;
                }
            },
            byte => {
                out.push(byte);
                i += 1;
            }
        }
    }

    String::from_utf8_lossy(&out).into_owned()
}

fn hex_pair(hi: u8, lo: u8) -> Option<u8> {
    Some(hex_val(hi)? * 16 + hex_val(lo)?)
}

fn hex_val(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_fields() {
        let form = FormData::parse("mode=generator&query=sort");
        assert_eq!(form.get("mode"), Some("generator"));
        assert_eq!(form.get("query"), Some("sort"));
        assert_eq!(form.get("absent"), None);
    }

    #[test]
    fn decodes_plus_and_percent_escapes() {
        let form = FormData::parse("message=hi+there%2C+friend%21");
        assert_eq!(form.get("message"), Some("hi there, friend!"));
    }

    #[test]
    fn decodes_multibyte_utf8() {
        // "déjà" percent-encoded as UTF-8
        let form = FormData::parse("text=d%C3%A9j%C3%A0");
        assert_eq!(form.get("text"), Some("déjà"));
    }

    #[test]
    fn keeps_invalid_escapes_literally() {
        let form = FormData::parse("text=100%zz&tail=50%");
        assert_eq!(form.get("text"), Some("100%zz"));
        assert_eq!(form.get("tail"), Some("50%"));
    }

    #[test]
    fn empty_values_are_present() {
        let form = FormData::parse("text=");
        assert_eq!(form.get("text"), Some(""));
        assert!(form.require("text").is_ok());
    }

    #[test]
    fn pair_without_equals_has_empty_value() {
        let form = FormData::parse("flag&text=x");
        assert_eq!(form.get("flag"), Some(""));
        assert_eq!(form.get("text"), Some("x"));
    }

    #[test]
    fn require_names_the_missing_field() {
        let form = FormData::parse("message=hi");
        let err = form.require("symptoms").unwrap_err();
        assert!(err.to_string().contains("`symptoms`"));
    }
}

//! InitData Value Object
//!
//! The signed payload a Telegram Mini App attaches to its requests, in
//! `application/x-www-form-urlencoded` form:
//!
//! ```text
//! query_id=AAH...&user=%7B%22id%22%3A1%7D&auth_date=1700000000&hash=ab12...
//! ```
//!
//! Parsing never fails. Segments without `=` become keys with an empty
//! value, empty segments are skipped, and a repeated key keeps its last
//! value. Only values are decoded; keys are signed exactly as sent. Every key except `hash` takes part in the signature, including
//! ones this backend does not understand.

use std::collections::BTreeMap;

/// Key carrying the hex-encoded signature
pub const HASH_KEY: &str = "hash";
/// Key carrying the JSON-encoded user object
pub const USER_KEY: &str = "user";
/// Key carrying the signing time in Unix seconds
pub const AUTH_DATE_KEY: &str = "auth_date";

/// Decoded `initData` fields, ordered by key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitData {
    // BTreeMap<String, _> iterates in byte-wise key order, which is exactly
    // the order of the data-check string.
    fields: BTreeMap<String, String>,
}

impl InitData {
    /// Parse the wire representation, percent-decoding values
    pub fn parse(raw: &str) -> Self {
        let fields = raw
            .split('&')
            .filter(|segment| !segment.is_empty())
            .map(|segment| {
                let (key, value) = segment.split_once('=').unwrap_or((segment, ""));
                (key.to_owned(), decode_value(value))
            })
            .collect();
        Self { fields }
    }

    /// Build from already-decoded pairs
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let fields = pairs
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self { fields }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Remove a field, returning its value
    pub fn take(&mut self, key: &str) -> Option<String> {
        self.fields.remove(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Canonical string signed by Telegram
    ///
    /// All fields except `hash`, sorted by key, rendered as `key=value`
    /// with decoded values and joined by `\n` (no trailing newline).
    pub fn data_check_string(&self) -> String {
        self.fields
            .iter()
            .filter(|(key, _)| key.as_str() != HASH_KEY)
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Encode back to the wire format (values percent-encoded, keys as-is)
    pub fn to_query_string(&self) -> String {
        self.fields
            .iter()
            .map(|(key, value)| {
                let value: String = url::form_urlencoded::byte_serialize(value.as_bytes()).collect();
                format!("{key}={value}")
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Decode a single `application/x-www-form-urlencoded` value (`+`, `%XX`)
fn decode_value(value: &str) -> String {
    // Leading `=`: the whole input is the value of an empty key, so any
    // further `=` stays part of the value.
    url::form_urlencoded::parse(format!("={value}").as_bytes())
        .next()
        .map(|(_, decoded)| decoded.into_owned())
        .unwrap_or_default()
}

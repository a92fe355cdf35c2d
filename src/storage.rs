use serde::Deserialize;
use std::collections::HashMap;

/// One entry of a primary dictionary file, keyed by canonical Chinese name.
#[derive(Debug, Deserialize, Clone)]
pub struct DictEntry {
    #[serde(rename = "Country")]
    pub country: String, // Grouping key selecting the per-country table
    #[serde(rename = "HID")]
    pub hid: String, // Handle identifying the record inside that table
    /// Free-text notes; `{alias}` tokens inside are alternate input names.
    #[serde(default)]
    pub exegesis: String,
}

/// Flattened lookup target shared by a canonical name and all its aliases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameRecord {
    pub country: String,
    pub hid: String,
}

/// One entry of a per-country table, keyed by HID. Extra fields are ignored;
/// an entry without a `name` falls back to the "Unknown" placeholder.
#[derive(Debug, Deserialize, Clone)]
pub struct CountryEntry {
    #[serde(default = "unknown_name")]
    pub name: String,
}

pub fn unknown_name() -> String {
    "Unknown".to_string()
}

pub type CountryTable = HashMap<String, CountryEntry>;

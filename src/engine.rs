use std::path::Path;

use crate::alias_index::AliasIndex;
use crate::country_cache::CountryCache;
use crate::i18n::I18n;
use crate::storage::unknown_name;

/// Outcome of a single lookup on one language track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Translation {
    /// Empty input clears the result without any lookup
    Empty,
    /// Input is not a known name or alias
    NoMatch,
    /// The name resolved, but its country table could not be loaded
    TableMissing,
    Found(String),
}

impl Translation {
    pub fn render(&self, i18n: &I18n) -> String {
        match self {
            Translation::Empty => String::new(),
            Translation::NoMatch => i18n.t("no_translation"),
            Translation::TableMissing => i18n.t("data_missing"),
            Translation::Found(name) => name.clone(),
        }
    }
}

/// Resolve input text through an alias index and a country cache.
/// Pure given its two collaborators; each track calls this independently.
pub fn translate(
    input: &str,
    index: &AliasIndex,
    cache: &mut CountryCache,
    i18n: &I18n,
) -> Translation {
    if input.is_empty() {
        return Translation::Empty;
    }

    let record = match index.get(input) {
        Some(record) => record,
        None => return Translation::NoMatch,
    };

    let table = match cache.get(&record.country, i18n) {
        Some(table) => table,
        None => return Translation::TableMissing,
    };

    match table.get(&record.hid) {
        Some(entry) => Translation::Found(entry.name.clone()),
        None => Translation::Found(unknown_name()),
    }
}

/// One target-language track: its dictionary index plus its own table cache.
/// A dictionary that fails to load leaves the index empty and keeps the error
/// text for the UI; lookups then simply report no match instead of failing.
pub struct Track {
    pub label: String,
    pub index: AliasIndex,
    pub cache: CountryCache,
    pub load_error: Option<String>,
}

impl Track {
    pub fn load(
        label_key: &str,
        dict_path: &Path,
        data_dir: &Path,
        country_prefix: &str,
        i18n: &I18n,
    ) -> Self {
        let label = i18n.t(label_key);
        let (index, load_error) = match AliasIndex::load(dict_path) {
            Ok(index) => (index, None),
            Err(err) => (
                AliasIndex::empty(),
                Some(i18n.t_format("dict_load_error", &[&label, &format!("{:#}", err)])),
            ),
        };

        Self {
            label,
            index,
            cache: CountryCache::new(data_dir, country_prefix),
            load_error,
        }
    }

    pub fn translate(&mut self, input: &str, i18n: &I18n) -> Translation {
        translate(input, &self.index, &mut self.cache, i18n)
    }
}

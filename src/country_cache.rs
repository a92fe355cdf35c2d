use colored::*;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::i18n::I18n;
use crate::storage::CountryTable;

/// Lazy per-country table cache. Tables load on first access and stay for the
/// process lifetime; the real set of countries is small and static, so there
/// is no eviction. Negative results are not cached: a missing or broken file
/// is re-attempted on the next lookup.
pub struct CountryCache {
    dir: PathBuf,
    prefix: String,
    tables: HashMap<String, CountryTable>,
}

impl CountryCache {
    pub fn new(dir: impl Into<PathBuf>, prefix: &str) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.to_string(),
            tables: HashMap::new(),
        }
    }

    pub fn table_path(&self, country: &str) -> PathBuf {
        self.dir.join(format!("{}{}.json", self.prefix, country))
    }

    pub fn get(&mut self, country: &str, i18n: &I18n) -> Option<&CountryTable> {
        if !self.tables.contains_key(country) {
            let path = self.table_path(country);
            if !path.exists() {
                return None;
            }

            let loaded = fs::read_to_string(&path)
                .map_err(anyhow::Error::from)
                .and_then(|content| {
                    serde_json::from_str::<CountryTable>(&content).map_err(anyhow::Error::from)
                });

            match loaded {
                Ok(table) => {
                    self.tables.insert(country.to_string(), table);
                }
                Err(err) => {
                    // Diagnostic channel only; the engine reports the sentinel
                    eprintln!(
                        "{}",
                        i18n.t_format("country_load_error", &[country, &err.to_string()])
                            .red()
                    );
                    return None;
                }
            }
        }

        self.tables.get(country)
    }

    #[allow(dead_code)]
    pub fn is_cached(&self, country: &str) -> bool {
        self.tables.contains_key(country)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn write_table(dir: &Path, name: &str, json: &str) {
        fs::write(dir.join(name), json).unwrap();
    }

    #[test]
    fn loads_once_and_serves_from_memory_afterwards() {
        let dir = tempfile::tempdir().unwrap();
        write_table(
            dir.path(),
            "CsLiyue.json",
            r#"{"zhongli": {"name": "Zhongli"}}"#,
        );

        let i18n = I18n::new("en");
        let mut cache = CountryCache::new(dir.path(), "Cs");
        assert!(!cache.is_cached("Liyue"));
        assert_eq!(
            cache.get("Liyue", &i18n).unwrap()["zhongli"].name,
            "Zhongli"
        );
        assert!(cache.is_cached("Liyue"));

        // Removing the file proves later hits never touch the disk again
        fs::remove_file(dir.path().join("CsLiyue.json")).unwrap();
        assert!(cache.get("Liyue", &i18n).is_some());
    }

    #[test]
    fn missing_file_is_not_cached_as_a_negative_result() {
        let dir = tempfile::tempdir().unwrap();
        let i18n = I18n::new("en");
        let mut cache = CountryCache::new(dir.path(), "Cs");

        assert!(cache.get("Natlan", &i18n).is_none());

        // A table appearing later is picked up on the next lookup
        write_table(dir.path(), "CsNatlan.json", r#"{"h1": {"name": "Mavuika"}}"#);
        assert!(cache.get("Natlan", &i18n).is_some());
    }

    #[test]
    fn malformed_file_yields_none_and_is_retried() {
        let dir = tempfile::tempdir().unwrap();
        write_table(dir.path(), "CsSumeru.json", "{ broken");

        let i18n = I18n::new("en");
        let mut cache = CountryCache::new(dir.path(), "Cs");
        assert!(cache.get("Sumeru", &i18n).is_none());
        assert!(!cache.is_cached("Sumeru"));

        write_table(dir.path(), "CsSumeru.json", r#"{"h2": {"name": "Nahida"}}"#);
        assert_eq!(cache.get("Sumeru", &i18n).unwrap()["h2"].name, "Nahida");
    }

    #[test]
    fn extra_fields_and_missing_names_deserialize_leniently() {
        let dir = tempfile::tempdir().unwrap();
        write_table(
            dir.path(),
            "CsFontaine.json",
            r#"{"h3": {"name": "Furina", "rarity": 5}, "h4": {"rarity": 4}}"#,
        );

        let i18n = I18n::new("en");
        let mut cache = CountryCache::new(dir.path(), "Cs");
        let table = cache.get("Fontaine", &i18n).unwrap();
        assert_eq!(table["h3"].name, "Furina");
        assert_eq!(table["h4"].name, "Unknown");
    }
}

use anyhow::{Context, Result};
use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::storage::{DictEntry, NameRecord};

/// Flat mapping from a display name (canonical or alias) to its record.
/// Built once per target-language track and read-only afterward.
pub struct AliasIndex {
    entries: HashMap<String, NameRecord>,
}

impl AliasIndex {
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| path.display().to_string())?;
        let dict: HashMap<String, DictEntry> = serde_json::from_str(&content)
            .with_context(|| path.display().to_string())?;
        Ok(Self::from_dict(dict))
    }

    pub fn from_dict(dict: HashMap<String, DictEntry>) -> Self {
        // Single-level braces only; no nesting observed in the data
        let alias_pattern = Regex::new(r"\{([^}]+)\}").expect("alias pattern");

        let mut entries = HashMap::new();
        for (name, info) in dict {
            let record = NameRecord {
                country: info.country,
                hid: info.hid,
            };

            // Aliases share the canonical record. Collisions across different
            // canonical names are not validated: the last insert wins.
            for alias in extract_aliases(&alias_pattern, &info.exegesis) {
                entries.insert(alias, record.clone());
            }
            entries.insert(name, record);
        }

        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<&NameRecord> {
        self.entries.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|s| s.as_str())
    }

    /// Every display name resolving to the given record, sorted for stable output.
    pub fn names_of(&self, record: &NameRecord) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .entries
            .iter()
            .filter(|&(_, r)| r == record)
            .map(|(name, _)| name.as_str())
            .collect();
        names.sort_unstable();
        names
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn extract_aliases(pattern: &Regex, exegesis: &str) -> Vec<String> {
    pattern
        .captures_iter(exegesis)
        .map(|caps| caps[1].to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn entry(country: &str, hid: &str, exegesis: &str) -> DictEntry {
        DictEntry {
            country: country.to_string(),
            hid: hid.to_string(),
            exegesis: exegesis.to_string(),
        }
    }

    #[test]
    fn canonical_name_without_aliases_maps_only_itself() {
        let mut dict = HashMap::new();
        dict.insert("七七".to_string(), entry("Liyue", "qiqi", "僵尸幼女"));
        let index = AliasIndex::from_dict(dict);

        assert_eq!(index.len(), 1);
        let record = index.get("七七").unwrap();
        assert_eq!(record.country, "Liyue");
        assert_eq!(record.hid, "qiqi");
    }

    #[test]
    fn bracketed_aliases_resolve_to_the_canonical_record() {
        let mut dict = HashMap::new();
        dict.insert(
            "雷电将军".to_string(),
            entry("Inazuma", "shougun", "别称{雷神}{影}，稻妻的统治者"),
        );
        let index = AliasIndex::from_dict(dict);

        assert_eq!(index.len(), 3);
        let canonical = index.get("雷电将军").unwrap().clone();
        assert_eq!(index.get("雷神"), Some(&canonical));
        assert_eq!(index.get("影"), Some(&canonical));
    }

    #[test]
    fn adjacent_tokens_split_into_separate_aliases() {
        let pattern = Regex::new(r"\{([^}]+)\}").unwrap();
        let aliases = extract_aliases(&pattern, "{a}{b} and later {c}");
        assert_eq!(aliases, vec!["a", "b", "c"]);
        assert!(extract_aliases(&pattern, "no tokens here").is_empty());
        assert!(extract_aliases(&pattern, "{}").is_empty());
    }

    #[test]
    fn alias_colliding_with_another_canonical_name_is_overwritten_silently() {
        let mut dict = HashMap::new();
        dict.insert("甲".to_string(), entry("Mondstadt", "a", "{乙}"));
        dict.insert("乙".to_string(), entry("Liyue", "b", ""));
        let index = AliasIndex::from_dict(dict);

        // Both spellings stay resolvable; the collision winner is whichever
        // insert ran last and is deliberately left unvalidated.
        assert_eq!(index.len(), 2);
        assert!(index.get("甲").is_some());
        assert!(index.get("乙").is_some());
    }

    #[test]
    fn load_reports_missing_and_malformed_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(AliasIndex::load(&missing).is_err());

        let malformed = dir.path().join("bad.json");
        let mut f = std::fs::File::create(&malformed).unwrap();
        f.write_all(b"{ not json").unwrap();
        assert!(AliasIndex::load(&malformed).is_err());
    }

    #[test]
    fn load_parses_the_on_disk_dictionary_shape() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("CsOne_main.json");
        std::fs::write(
            &path,
            r#"{"钟离": {"Country": "Liyue", "HID": "zhongli", "exegesis": "岩王帝君{帝君}"}}"#,
        )
        .unwrap();

        let index = AliasIndex::load(&path).unwrap();
        assert_eq!(index.get("帝君"), index.get("钟离"));
        assert!(index.get("帝君").is_some());
    }
}

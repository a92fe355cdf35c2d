use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// Fuzzy "did you mean" candidates over the names of an alias index,
/// shown when an exact lookup misses.
pub struct Suggester {
    matcher: SkimMatcherV2,
}

impl Suggester {
    pub fn new() -> Self {
        Self {
            matcher: SkimMatcherV2::default(),
        }
    }

    /// Score a candidate against the typed pattern. Exact substring hits
    /// (prefixes included) rank above plain fuzzy matches.
    fn score(&self, pattern: &str, candidate: &str) -> Option<i64> {
        if candidate.contains(pattern) {
            return Some(1000 + (pattern.len() * 10) as i64);
        }
        self.matcher.fuzzy_match(candidate, pattern)
    }

    /// Best candidates first, at most `limit`. Ties break toward shorter
    /// names, then lexicographically so output stays stable.
    pub fn suggest<'a>(
        &self,
        pattern: &str,
        candidates: impl Iterator<Item = &'a str>,
        limit: usize,
    ) -> Vec<&'a str> {
        if pattern.is_empty() || limit == 0 {
            return Vec::new();
        }

        let mut scored: Vec<(i64, &str)> = candidates
            .filter(|name| *name != pattern)
            .filter_map(|name| self.score(pattern, name).map(|score| (score, name)))
            .collect();

        scored.sort_by(|a, b| {
            b.0.cmp(&a.0)
                .then(a.1.len().cmp(&b.1.len()))
                .then(a.1.cmp(b.1))
        });

        scored.into_iter().take(limit).map(|(_, name)| name).collect()
    }
}

impl Default for Suggester {
    fn default() -> Self {
        Self::new()
    }
}

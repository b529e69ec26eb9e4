//! Static Hungarian grapheme catalog.

use serde::{Deserialize, Serialize};

use crate::types::Grapheme;

/// Native Hungarian alphabet, in alphabetical order.
pub const CORE_GRAPHEMES: &[&str] = &[
    "a", "á", "b", "c", "cs", "d", "dz", "dzs", "e", "é", "f", "g", "gy", "h", "i", "í", "j",
    "k", "l", "ly", "m", "n", "ny", "o", "ó", "ö", "ő", "p", "r", "s", "sz", "t", "ty", "u",
    "ú", "ü", "ű", "v", "z", "zs",
];

/// Supplemental letters only used in loanwords.
pub const FOREIGN_GRAPHEMES: &[&str] = &["q", "w", "x", "y"];

/// Mirror-image letters children confuse; sampled more often.
pub const TROUBLE_GRAPHEMES: &[&str] = &["b", "d", "p", "q"];

const EXAMPLE_WORDS: &[(&str, &str)] = &[
    ("a", "alma"),
    ("á", "ház"),
    ("b", "béka"),
    ("c", "ceruza"),
    ("cs", "család"),
    ("d", "dió"),
    ("dz", "bodza"),
    ("dzs", "dzsungel"),
    ("e", "egér"),
    ("é", "étel"),
    ("f", "fa"),
    ("g", "gomb"),
    ("gy", "gyerek"),
    ("h", "ház"),
    ("i", "iskola"),
    ("í", "íj"),
    ("j", "jég"),
    ("k", "kutya"),
    ("l", "labda"),
    ("ly", "lyuk"),
    ("m", "macska"),
    ("n", "nap"),
    ("ny", "nyúl"),
    ("o", "óra"),
    ("ó", "óriás"),
    ("ö", "ördög"),
    ("ő", "őz"),
    ("p", "piros"),
    ("r", "repülő"),
    ("s", "sajt"),
    ("sz", "szék"),
    ("t", "teve"),
    ("ty", "tyúk"),
    ("u", "ujj"),
    ("ú", "úszik"),
    ("ü", "üveg"),
    ("ű", "űrhajó"),
    ("v", "virág"),
    ("z", "zöld"),
    ("zs", "zsiráf"),
    ("q", "quiche"),
    ("w", "walkman"),
    ("x", "xilofon"),
    ("y", "yacht"),
];

/// Grapheme with the word used to introduce it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphemeInfo {
    pub grapheme: Grapheme,
    pub phonetic_word: String,
    pub audio_url: String,
}

/// Partitioned grapheme catalog.
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    pub core: &'static [&'static str],
    pub foreign: &'static [&'static str],
    pub trouble: &'static [&'static str],
}

impl Default for Catalog {
    fn default() -> Self {
        Self::hungarian()
    }
}

impl Catalog {
    pub const fn hungarian() -> Self {
        Self {
            core: CORE_GRAPHEMES,
            foreign: FOREIGN_GRAPHEMES,
            trouble: TROUBLE_GRAPHEMES,
        }
    }

    /// Base sampling pool: core graphemes, then foreign ones when enabled.
    pub fn pool(&self, include_foreign: bool) -> Vec<Grapheme> {
        let foreign: &[&str] = if include_foreign { self.foreign } else { &[] };
        self.core
            .iter()
            .chain(foreign.iter())
            .map(|g| Grapheme::from(*g))
            .collect()
    }

    pub fn contains(&self, grapheme: &str) -> bool {
        self.core.iter().chain(self.foreign.iter()).any(|g| *g == grapheme)
    }

    pub fn is_foreign(&self, grapheme: &str) -> bool {
        self.foreign.iter().any(|g| *g == grapheme)
    }

    pub fn is_trouble(&self, grapheme: &str) -> bool {
        self.trouble.iter().any(|g| *g == grapheme)
    }

    /// Example word for a grapheme, if the catalog has one.
    pub fn phonetic_word(&self, grapheme: &str) -> Option<&'static str> {
        EXAMPLE_WORDS
            .iter()
            .find(|(g, _)| *g == grapheme)
            .map(|(_, word)| *word)
    }

    /// Info for every grapheme in the given pool.
    pub fn info(&self, include_foreign: bool) -> Vec<GraphemeInfo> {
        self.pool(include_foreign)
            .into_iter()
            .map(|grapheme| GraphemeInfo {
                phonetic_word: self
                    .phonetic_word(grapheme.as_str())
                    .unwrap_or_default()
                    .to_string(),
                audio_url: format!("/api/audio/{}", grapheme),
                grapheme,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn core_has_forty_graphemes() {
        assert_eq!(CORE_GRAPHEMES.len(), 40);
    }

    #[test]
    fn no_duplicates_across_partitions() {
        let all: Vec<&str> = CORE_GRAPHEMES
            .iter()
            .chain(FOREIGN_GRAPHEMES.iter())
            .copied()
            .collect();
        let unique: HashSet<&str> = all.iter().copied().collect();
        assert_eq!(all.len(), unique.len());
    }

    #[test]
    fn trouble_is_subset_of_catalog() {
        let catalog = Catalog::hungarian();
        for g in TROUBLE_GRAPHEMES {
            assert!(catalog.contains(g), "{g} missing from catalog");
        }
    }

    #[test]
    fn pool_respects_foreign_flag() {
        let catalog = Catalog::hungarian();
        let base = catalog.pool(false);
        assert_eq!(base.len(), 40);
        assert!(!base.iter().any(|g| catalog.is_foreign(g.as_str())));

        let extended = catalog.pool(true);
        assert_eq!(extended.len(), 44);
        assert_eq!(extended.last().map(Grapheme::as_str), Some("y"));
    }

    #[test]
    fn every_grapheme_has_an_example_word() {
        let catalog = Catalog::hungarian();
        for info in catalog.info(true) {
            assert!(!info.phonetic_word.is_empty(), "{}", info.grapheme);
        }
        assert_eq!(catalog.phonetic_word("cs"), Some("család"));
        assert_eq!(catalog.info(false)[0].audio_url, "/api/audio/a");
    }
}

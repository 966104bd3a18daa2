//! Built-in word valence table (AFINN-165, -5..=5) and negation words.
//!
//! The table ships as `afinn.tsv`, one `word<TAB>valence` pair per line, and
//! is parsed once on first lookup.

use lazy_static::lazy_static;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashMap;

const AFINN_TSV: &str = include_str!("afinn.tsv");

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "n't", "none", "nobody", "nothing", "neither", "nor", "nowhere",
    "cannot", "without",
];

lazy_static! {
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);

    static ref LEXICON: HashMap<&'static str, i32> = parse_table(AFINN_TSV).collect();

    /// Valences keyed by stem; the first entry for a stem wins
    static ref STEMMED_LEXICON: HashMap<String, i32> = {
        let mut map = HashMap::with_capacity(LEXICON.len());
        for (word, valence) in parse_table(AFINN_TSV) {
            map.entry(STEMMER.stem(word).into_owned()).or_insert(valence);
        }
        map
    };
}

/// `word<TAB>valence` lines; blank lines, `#` comments and malformed rows are skipped.
fn parse_table(table: &'static str) -> impl Iterator<Item = (&'static str, i32)> {
    table.lines().filter_map(|line| {
        let line = line.trim_end();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }
        let (word, valence) = line.rsplit_once('\t')?;
        let valence = valence.trim().parse().ok()?;
        Some((word.trim(), valence))
    })
}

/// Valence of a lower-cased word: exact match first, then its stem.
pub fn valence(word: &str) -> Option<i32> {
    if let Some(&v) = LEXICON.get(word) {
        return Some(v);
    }
    STEMMED_LEXICON.get(STEMMER.stem(word).as_ref()).copied()
}

pub fn is_negation(word: &str) -> bool {
    NEGATIONS.contains(&word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_lookup() {
        assert_eq!(valence("wonderful"), Some(4));
        assert_eq!(valence("terrible"), Some(-3));
        assert_eq!(valence("table"), None);
    }

    #[test]
    fn test_stem_fallback() {
        assert_eq!(valence("loves"), Some(3));
        assert_eq!(valence("hating"), Some(-3));
        assert!(valence("cheerfulness").is_some_and(|v| v > 0));
    }

    #[test]
    fn test_strongly_polar_words_present() {
        for word in ["furious", "dishonest", "horrific", "pathetic", "disgusted"] {
            assert!(valence(word).is_some_and(|v| v < 0), "{word}");
        }
        for word in ["hilarious", "fabulous", "thrilled", "joyous", "breathtaking"] {
            assert!(valence(word).is_some_and(|v| v > 0), "{word}");
        }
    }

    #[test]
    fn test_negations() {
        assert!(is_negation("not"));
        assert!(is_negation("n't"));
        assert!(!is_negation("note"));
    }

    #[test]
    fn test_table_parses_completely() {
        let rows = AFINN_TSV.lines().filter(|l| !l.trim().is_empty()).count();
        assert_eq!(LEXICON.len(), rows);
        assert!(LEXICON.len() > 3000);
        assert!(LEXICON.values().all(|v| (-5..=5).contains(v)));
    }

    #[test]
    fn test_parse_table_skips_malformed_rows() {
        let rows: Vec<_> = parse_table("# header\ngood\t3\n\nbroken\nbad\tx\nugly\t-3\n").collect();
        assert_eq!(rows, vec![("good", 3), ("ugly", -3)]);
    }
}

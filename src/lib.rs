//! Vocabulary trainer core: word lists, multiple-choice question generation,
//! answer checking, "today's words" windows and learned-word tracking.
//!
//! Everything is synchronous; randomness is passed in as any [`rand::Rng`].

mod data;
pub mod phrases;
pub mod practice;
pub mod progress;
pub mod quiz;
pub mod trainer;
pub mod window;

pub use data::{
    Accent, Definition, LoadError, RelatedWord, VocabularyEntry, parse_word_list, read_word_list,
    sample_vocabulary,
};
pub use progress::{LearnedSet, ProgressError, ProgressStore, Statistics};
pub use quiz::{
    Question, QuestionKind, QuizConfig, QuizError, QuizSession, RelationFilter, ScoreBand,
    check_answer,
};
pub use trainer::Trainer;
pub use window::{Window, select_window};

use rapidfuzz::distance::levenshtein;
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use tracing::{info, warn};

/// Tuning for fuzzy word lookup.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Minimum normalized similarity (0.0..=1.0) for a fuzzy hit.
    pub min_score: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { min_score: 0.6 }
    }
}

#[derive(Debug, Clone)]
pub struct FuzzyHit {
    pub index: usize,
    pub word: String,
    pub score: f64,
}

/// Ordered, read-only list of vocabulary entries loaded once per session.
#[derive(Debug, Clone, Default)]
pub struct WordRepository {
    entries: Vec<VocabularyEntry>,
}

impl WordRepository {
    pub fn new(entries: Vec<VocabularyEntry>) -> Self {
        Self { entries }
    }

    /// Repository backed by the bundled sample list.
    pub fn sample() -> Self {
        Self::new(sample_vocabulary())
    }

    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let entries = read_word_list(path)?;
        info!(path = %path.display(), words = entries.len(), "Loaded vocabulary");
        Ok(Self::new(entries))
    }

    /// Loads `path`, substituting the bundled sample list when the file is
    /// missing or malformed.
    pub fn load_or_sample(path: &Path) -> Self {
        match Self::load(path) {
            Ok(repo) => repo,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "Falling back to sample vocabulary");
                Self::sample()
            }
        }
    }

    pub fn entries(&self) -> &[VocabularyEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&VocabularyEntry> {
        self.entries.get(index)
    }

    /// First entry whose word matches case-insensitively.
    pub fn find(&self, word: &str) -> Option<&VocabularyEntry> {
        let needle = word.trim();
        self.entries
            .iter()
            .find(|entry| entry.word.trim().eq_ignore_ascii_case(needle))
            .or_else(|| {
                let lowered = needle.to_lowercase();
                self.entries
                    .iter()
                    .find(|entry| entry.normalized_word() == lowered)
            })
    }

    pub fn phonetic(&self, word: &str, accent: Accent) -> String {
        self.find(word)
            .map(|entry| entry.phonetic_for(accent))
            .unwrap_or_else(|| format!("/{word}/"))
    }

    /// Case-insensitive substring search across every text field of an entry.
    /// An empty (or whitespace) query returns the whole list.
    pub fn search_contains(&self, query: &str) -> Vec<&VocabularyEntry> {
        let term = query.trim().to_lowercase();
        if term.is_empty() {
            return self.entries.iter().collect();
        }
        self.entries
            .iter()
            .filter(|entry| entry_matches(entry, &term))
            .collect()
    }

    /// Ranks words by normalized Levenshtein similarity to `query`.
    pub fn search_fuzzy(&self, query: &str, config: &SearchConfig, limit: usize) -> Vec<FuzzyHit> {
        let term = query.trim().to_lowercase();
        if term.is_empty() || limit == 0 {
            return Vec::new();
        }
        let mut hits: Vec<FuzzyHit> = self
            .entries
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| {
                let candidate = entry.normalized_word();
                let score = levenshtein::normalized_similarity(term.chars(), candidate.chars());
                (score >= config.min_score).then(|| FuzzyHit {
                    index,
                    word: entry.word.clone(),
                    score,
                })
            })
            .collect();
        hits.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.word.cmp(&b.word))
        });
        hits.truncate(limit);
        hits
    }

    pub fn duplicate_words(&self) -> BTreeSet<String> {
        find_duplicates(self.entries.iter().map(|entry| entry.word.as_str()))
    }
}

/// Normalized (trimmed, lowercased) keys that occur more than once.
pub fn find_duplicates<'a, I>(words: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: HashMap<String, usize> = HashMap::new();
    for word in words {
        *counts.entry(data::normalize_key(word)).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(word, _)| word)
        .collect()
}

fn entry_matches(entry: &VocabularyEntry, term: &str) -> bool {
    let hit = |text: &str| text.to_lowercase().contains(term);
    if hit(&entry.word) || hit(&entry.meaning) || hit(&entry.example) {
        return true;
    }
    if entry
        .definitions
        .iter()
        .any(|def| hit(&def.definition) || hit(&def.example) || hit(&def.part_of_speech))
    {
        return true;
    }
    let related_hit = |related: &RelatedWord| hit(&related.word) || hit(&related.meaning);
    if entry.synonyms.iter().any(related_hit) || entry.antonyms.iter().any(related_hit) {
        return true;
    }
    entry
        .word_family
        .values()
        .any(|members| members.iter().any(related_hit))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> WordRepository {
        let mut brisk = VocabularyEntry::new("Brisk", "quick and energetic")
            .with_example("We went for a brisk walk.");
        brisk.word_family.insert(
            "adverb".to_string(),
            vec![RelatedWord::new("briskly", "in a lively way")],
        );
        WordRepository::new(vec![
            brisk,
            VocabularyEntry::new("dull", "boring").with_synonyms(["tedious"]),
            VocabularyEntry::new("vivid", "bright and intense"),
        ])
    }

    #[test]
    fn duplicates_are_normalized() {
        let found = find_duplicates(["Cat", "cat ", "dog"]);
        assert_eq!(found, BTreeSet::from(["cat".to_string()]));
    }

    #[test]
    fn duplicates_empty_for_unique_words() {
        assert!(repo().duplicate_words().is_empty());
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let repo = repo();
        let by_word: Vec<_> = repo.search_contains("BRISK").iter().map(|e| e.word.clone()).collect();
        assert_eq!(by_word, vec!["Brisk"]);
        assert_eq!(repo.search_contains("tedious").len(), 1);
        assert_eq!(repo.search_contains("lively").len(), 1);
        assert_eq!(repo.search_contains("walk").len(), 1);
        assert!(repo.search_contains("zebra").is_empty());
    }

    #[test]
    fn empty_search_returns_everything() {
        assert_eq!(repo().search_contains("   ").len(), 3);
    }

    #[test]
    fn fuzzy_search_ranks_closest_word_first() {
        let hits = repo().search_fuzzy("vivd", &SearchConfig::default(), 5);
        assert!(!hits.is_empty());
        assert_eq!(hits[0].word, "vivid");
        assert!(hits.iter().all(|hit| hit.score > 0.5));
    }

    #[test]
    fn find_ignores_case_and_padding() {
        let repo = repo();
        assert_eq!(repo.find(" brisk ").map(|e| e.meaning.as_str()), Some("quick and energetic"));
        assert!(repo.find("missing").is_none());
        assert_eq!(repo.phonetic("missing", Accent::EnGb), "/missing/");
    }

    #[test]
    fn load_or_sample_falls_back() {
        let repo = WordRepository::load_or_sample(Path::new("/definitely/not/here.json"));
        assert_eq!(repo.len(), sample_vocabulary().len());
    }
}

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

static SAMPLE_JSON: &str = include_str!("../data/sample_vocabulary.json");

static SAMPLE_VOCABULARY: Lazy<Vec<VocabularyEntry>> = Lazy::new(|| {
    serde_json::from_str::<WordFile>(SAMPLE_JSON)
        .expect("bundled sample vocabulary is valid JSON")
        .words
});

/// A related word (synonym, antonym or word-family member) with its gloss.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedWord {
    pub word: String,
    #[serde(default)]
    pub meaning: String,
}

impl RelatedWord {
    pub fn new(word: impl Into<String>, meaning: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            meaning: meaning.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Definition {
    #[serde(default)]
    pub part_of_speech: String,
    pub definition: String,
    #[serde(default)]
    pub example: String,
}

/// One vocabulary word's full record, as stored in the word-list JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyEntry {
    pub word: String,
    pub meaning: String,
    #[serde(default, rename = "type")]
    pub word_type: String,
    #[serde(default)]
    pub example: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default)]
    pub phonetic: BTreeMap<String, String>,
    #[serde(default)]
    pub synonyms: Vec<RelatedWord>,
    #[serde(default)]
    pub antonyms: Vec<RelatedWord>,
    #[serde(default)]
    pub definitions: Vec<Definition>,
    #[serde(default)]
    pub word_family: BTreeMap<String, Vec<RelatedWord>>,
}

impl VocabularyEntry {
    pub fn new(word: impl Into<String>, meaning: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            meaning: meaning.into(),
            word_type: String::new(),
            example: String::new(),
            level: None,
            phonetic: BTreeMap::new(),
            synonyms: Vec::new(),
            antonyms: Vec::new(),
            definitions: Vec::new(),
            word_family: BTreeMap::new(),
        }
    }

    pub fn with_type(mut self, word_type: impl Into<String>) -> Self {
        self.word_type = word_type.into();
        self
    }

    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.example = example.into();
        self
    }

    pub fn with_synonyms<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.synonyms
            .extend(words.into_iter().map(|w| RelatedWord::new(w, "")));
        self
    }

    pub fn with_antonyms<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.antonyms
            .extend(words.into_iter().map(|w| RelatedWord::new(w, "")));
        self
    }

    pub fn with_phonetic(mut self, accent: Accent, value: impl Into<String>) -> Self {
        self.phonetic.insert(accent.code().to_string(), value.into());
        self
    }

    pub fn has_synonyms(&self) -> bool {
        !self.synonyms.is_empty()
    }

    pub fn has_antonyms(&self) -> bool {
        !self.antonyms.is_empty()
    }

    pub fn synonym_words(&self) -> impl Iterator<Item = &str> + '_ {
        self.synonyms.iter().map(|s| s.word.as_str())
    }

    pub fn antonym_words(&self) -> impl Iterator<Item = &str> + '_ {
        self.antonyms.iter().map(|a| a.word.as_str())
    }

    /// Phonetic transcription for `accent`, falling back to US English and
    /// finally to `/word/`.
    pub fn phonetic_for(&self, accent: Accent) -> String {
        self.phonetic
            .get(accent.code())
            .or_else(|| self.phonetic.get(Accent::EnUs.code()))
            .cloned()
            .unwrap_or_else(|| format!("/{}/", self.word))
    }

    /// Lowercased, trimmed identity key.
    pub fn normalized_word(&self) -> String {
        normalize_key(&self.word)
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, Serialize, Deserialize)]
pub enum Accent {
    #[serde(rename = "en-US")]
    EnUs,
    #[default]
    #[serde(rename = "en-GB")]
    EnGb,
}

impl Accent {
    pub fn code(self) -> &'static str {
        match self {
            Accent::EnUs => "en-US",
            Accent::EnGb => "en-GB",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "en-US" => Some(Accent::EnUs),
            "en-GB" => Some(Accent::EnGb),
            _ => None,
        }
    }
}

impl fmt::Display for Accent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Deserialize)]
struct WordFile {
    #[serde(default)]
    words: Vec<VocabularyEntry>,
}

#[derive(Debug)]
pub enum LoadError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(err) => write!(f, "io error: {err}"),
            LoadError::Json(err) => write!(f, "invalid JSON: {err}"),
        }
    }
}

impl std::error::Error for LoadError {}

impl From<std::io::Error> for LoadError {
    fn from(value: std::io::Error) -> Self {
        LoadError::Io(value)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(value: serde_json::Error) -> Self {
        LoadError::Json(value)
    }
}

/// Parses a word-list document of the form `{"words": [...]}`.
pub fn parse_word_list(json: &str) -> Result<Vec<VocabularyEntry>, LoadError> {
    let file: WordFile = serde_json::from_str(json)?;
    Ok(file.words)
}

pub fn read_word_list(path: &Path) -> Result<Vec<VocabularyEntry>, LoadError> {
    let raw = fs::read_to_string(path)?;
    parse_word_list(&raw)
}

/// The small built-in list used when the word-list file cannot be loaded.
pub fn sample_vocabulary() -> Vec<VocabularyEntry> {
    SAMPLE_VOCABULARY.clone()
}

pub(crate) fn normalize_key(value: &str) -> String {
    value.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_camel_case_fields_and_defaults() {
        let json = r#"{
            "words": [
                {
                    "word": "brisk",
                    "meaning": "quick and energetic",
                    "type": "adjective",
                    "phonetic": {"en-US": "/brɪsk/"},
                    "definitions": [
                        {"partOfSpeech": "adjective", "definition": "active", "example": "a brisk walk"}
                    ],
                    "wordFamily": {"adverb": [{"word": "briskly", "meaning": "quickly"}]}
                },
                {"word": "dull", "meaning": "boring"}
            ]
        }"#;
        let words = parse_word_list(json).expect("parse");
        assert_eq!(words.len(), 2);
        assert_eq!(words[0].word_type, "adjective");
        assert_eq!(words[0].definitions[0].part_of_speech, "adjective");
        assert_eq!(words[0].word_family["adverb"][0].word, "briskly");
        assert!(words[1].synonyms.is_empty());
        assert!(words[1].example.is_empty());
    }

    #[test]
    fn missing_words_key_is_empty_list() {
        let words = parse_word_list("{}").expect("parse");
        assert!(words.is_empty());
    }

    #[test]
    fn phonetic_falls_back_to_us_then_slashes() {
        let entry = VocabularyEntry::new("tomato", "a red fruit")
            .with_phonetic(Accent::EnUs, "/təˈmeɪtoʊ/");
        assert_eq!(entry.phonetic_for(Accent::EnGb), "/təˈmeɪtoʊ/");
        let bare = VocabularyEntry::new("tomato", "a red fruit");
        assert_eq!(bare.phonetic_for(Accent::EnGb), "/tomato/");
    }

    #[test]
    fn sample_vocabulary_has_relations() {
        let sample = sample_vocabulary();
        assert!(sample.len() >= 5);
        assert!(sample.iter().any(|w| w.has_synonyms() && w.has_antonyms()));
    }

    #[test]
    fn accent_codes_round_trip() {
        assert_eq!(Accent::from_code("en-US"), Some(Accent::EnUs));
        assert_eq!(Accent::from_code("fr-FR"), None);
        assert_eq!(Accent::EnGb.to_string(), "en-GB");
    }
}

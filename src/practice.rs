//! Typing exercises: single-word spelling practice and the writing session
//! over a window of words.

use crate::data::{VocabularyEntry, normalize_key};
use crate::quiz::ScoreBand;
use rand::Rng;
use serde::Serialize;
use std::collections::VecDeque;

const RECENT_CAP: usize = 5;
const PICK_ATTEMPTS: usize = 10;
/// Lists this short are picked from without avoiding repeats.
const SMALL_LIST: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpellingOutcome {
    /// Nothing was typed; the caller should warn instead of scoring.
    Empty,
    Correct,
    Incorrect,
}

/// Compares typed input with the entry's word, ignoring case and padding.
pub fn check_spelling(input: &str, entry: &VocabularyEntry) -> SpellingOutcome {
    let typed = normalize_key(input);
    if typed.is_empty() {
        SpellingOutcome::Empty
    } else if typed == entry.normalized_word() {
        SpellingOutcome::Correct
    } else {
        SpellingOutcome::Incorrect
    }
}

/// Random index picker that tries not to repeat recently shown words.
#[derive(Debug, Clone, Default)]
pub struct RecentPicker {
    recent: VecDeque<usize>,
}

impl RecentPicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Picks an index in `0..len`, or `None` for an empty list.
    pub fn pick<R: Rng + ?Sized>(&mut self, len: usize, rng: &mut R) -> Option<usize> {
        if len == 0 {
            return None;
        }
        if len <= SMALL_LIST {
            return Some(rng.gen_range(0..len));
        }
        let mut index = rng.gen_range(0..len);
        let mut attempts = 1;
        while self.recent.contains(&index) && attempts < PICK_ATTEMPTS {
            index = rng.gen_range(0..len);
            attempts += 1;
        }
        if !self.recent.contains(&index) {
            self.recent.push_back(index);
        }
        let cap = RECENT_CAP.min(len / 2);
        while self.recent.len() > cap {
            self.recent.pop_front();
        }
        Some(index)
    }

    pub fn recent(&self) -> impl Iterator<Item = usize> + '_ {
        self.recent.iter().copied()
    }

    pub fn clear(&mut self) {
        self.recent.clear();
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WritingAnswer {
    pub word: String,
    pub meaning: String,
    /// What was typed, or `None` when the word was skipped.
    pub user_answer: Option<String>,
    pub is_correct: bool,
    pub hint_used: bool,
}

impl WritingAnswer {
    pub fn skipped(&self) -> bool {
        self.user_answer.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WritingSummary {
    pub total: usize,
    pub correct: usize,
    pub wrong: usize,
    pub accuracy: u32,
}

impl WritingSummary {
    pub fn band(&self) -> ScoreBand {
        ScoreBand::from_percent(self.accuracy)
    }
}

/// Recall exercise: the learner sees a meaning and types the word.
#[derive(Debug, Clone, Default)]
pub struct WritingSession {
    words: Vec<VocabularyEntry>,
    index: usize,
    hint_used: bool,
    answers: Vec<WritingAnswer>,
}

impl WritingSession {
    pub fn new(words: Vec<VocabularyEntry>) -> Self {
        Self {
            words,
            ..Self::default()
        }
    }

    pub fn current(&self) -> Option<&VocabularyEntry> {
        self.words.get(self.index)
    }

    pub fn position(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.index >= self.words.len()
    }

    /// Reveals the current word's example sentence. Only the first call per
    /// word returns it.
    pub fn reveal_hint(&mut self) -> Option<&str> {
        if self.hint_used {
            return None;
        }
        let entry = self.words.get(self.index)?;
        self.hint_used = true;
        Some(entry.example.as_str())
    }

    /// Scores typed input and moves on. Blank input is ignored and leaves
    /// the session where it was.
    pub fn submit(&mut self, input: &str) -> Option<&WritingAnswer> {
        let typed = normalize_key(input);
        if typed.is_empty() {
            return None;
        }
        let entry = self.words.get(self.index)?;
        let is_correct = typed == entry.normalized_word();
        let answer = WritingAnswer {
            word: entry.word.clone(),
            meaning: entry.meaning.clone(),
            user_answer: Some(input.trim().to_string()),
            is_correct,
            hint_used: self.hint_used,
        };
        self.record(answer)
    }

    /// Records the current word as wrong without an answer.
    pub fn skip(&mut self) -> Option<&WritingAnswer> {
        let entry = self.words.get(self.index)?;
        let answer = WritingAnswer {
            word: entry.word.clone(),
            meaning: entry.meaning.clone(),
            user_answer: None,
            is_correct: false,
            hint_used: self.hint_used,
        };
        self.record(answer)
    }

    fn record(&mut self, answer: WritingAnswer) -> Option<&WritingAnswer> {
        self.answers.push(answer);
        self.index += 1;
        self.hint_used = false;
        self.answers.last()
    }

    pub fn answers(&self) -> &[WritingAnswer] {
        &self.answers
    }

    pub fn summary(&self) -> WritingSummary {
        let total = self.words.len();
        let correct = self.answers.iter().filter(|a| a.is_correct).count();
        let wrong = self.answers.len() - correct;
        let accuracy = if total == 0 {
            0
        } else {
            ((correct as f64 / total as f64) * 100.0).round() as u32
        };
        WritingSummary {
            total,
            correct,
            wrong,
            accuracy,
        }
    }
}

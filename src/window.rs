//! "Today's words": contiguous windows counted from the end of the word list.

use crate::data::VocabularyEntry;
use crate::progress::LearnedSet;
use serde::{Deserialize, Serialize};

/// How a window is chosen. Positions count from the end of the list, so
/// `start = 1` is the most recently added word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Window {
    Count { count: usize },
    Range { start: usize, end: usize },
}

impl Window {
    pub fn count(count: usize) -> Self {
        Window::Count { count }
    }

    pub fn range(start: usize, end: usize) -> Self {
        Window::Range { start, end }
    }

    /// Returns the bounds actually applied for a list of `len` items, as
    /// 1-based `(start, end)` positions from the end.
    pub fn normalized(self, len: usize) -> (usize, usize) {
        if len == 0 {
            return (0, 0);
        }
        match self {
            Window::Count { count } => (1, count.clamp(1, len)),
            Window::Range { start, end } => {
                let start = start.max(1);
                let end = end.max(start);
                (start.min(len), end.min(len))
            }
        }
    }
}

impl Default for Window {
    fn default() -> Self {
        Window::count(10)
    }
}

/// Selects the window from `items`, preserving list order. Out-of-range or
/// inverted bounds are clamped rather than rejected.
pub fn select_window<T>(items: &[T], window: Window) -> &[T] {
    let len = items.len();
    if len == 0 {
        return items;
    }
    let (start, end) = window.normalized(len);
    &items[len - end..len + 1 - start]
}

/// Sequential know/don't-know walk over a window.
#[derive(Debug, Clone)]
pub struct LearnWalk<'a> {
    words: &'a [VocabularyEntry],
    index: usize,
    known: usize,
    unknown: usize,
}

impl<'a> LearnWalk<'a> {
    pub fn new(words: &'a [VocabularyEntry]) -> Self {
        Self {
            words,
            index: 0,
            known: 0,
            unknown: 0,
        }
    }

    pub fn current(&self) -> Option<&'a VocabularyEntry> {
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

    /// Marks the current word known, records it in `learned` and advances.
    pub fn mark_known(&mut self, learned: &mut LearnedSet) {
        if let Some(entry) = self.current() {
            learned.insert(&entry.word);
            self.known += 1;
            self.index += 1;
        }
    }

    pub fn mark_unknown(&mut self) {
        if self.current().is_some() {
            self.unknown += 1;
            self.index += 1;
        }
    }

    pub fn summary(&self) -> WalkSummary {
        let total = self.words.len();
        let known_percent = if total == 0 {
            0
        } else {
            ((self.known as f64 / total as f64) * 100.0).round() as u32
        };
        WalkSummary {
            total,
            known: self.known,
            unknown: self.unknown,
            known_percent,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WalkSummary {
    pub total: usize,
    pub known: usize,
    pub unknown: usize,
    pub known_percent: u32,
}

impl WalkSummary {
    pub fn message(&self) -> &'static str {
        match self.known_percent {
            80.. => "Excellent! You already know most of the new words.",
            60.. => "Well done! Review the words you missed.",
            _ => "Keep going! Study these words a few more times.",
        }
    }
}

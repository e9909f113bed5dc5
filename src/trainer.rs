use crate::WordRepository;
use crate::data::VocabularyEntry;
use crate::phrases::{self, CollocationSet, PhraseItem};
use crate::practice::{RecentPicker, SpellingOutcome, WritingSession, check_spelling};
use crate::progress::{LearnedSet, Statistics};
use crate::quiz::{
    self, QuizConfig, QuizError, QuizSession, RelationFilter, generate_syn_ant_up_to,
    relation_candidates,
};
use crate::window::{Window, select_window};
use rand::{RngCore, SeedableRng};
use rand::rngs::SmallRng;
use tracing::{debug, info};

/// Session state for one learner: the word list, what they know, the
/// current "today's words" window and the random source every generator
/// draws from.
#[derive(Debug)]
pub struct Trainer<R = SmallRng> {
    repository: WordRepository,
    learned: LearnedSet,
    config: QuizConfig,
    window: Window,
    picker: RecentPicker,
    rng: R,
}

impl Trainer<SmallRng> {
    pub fn new(repository: WordRepository, learned: LearnedSet) -> Self {
        Self::with_rng(repository, learned, QuizConfig::default(), SmallRng::from_entropy())
    }

    /// Deterministic trainer, for reproducible quizzes.
    pub fn seeded(repository: WordRepository, learned: LearnedSet, seed: u64) -> Self {
        Self::with_rng(
            repository,
            learned,
            QuizConfig::default(),
            SmallRng::seed_from_u64(seed),
        )
    }
}

impl<R: RngCore> Trainer<R> {
    pub fn with_rng(
        repository: WordRepository,
        learned: LearnedSet,
        config: QuizConfig,
        rng: R,
    ) -> Self {
        let window = Window::count(config.today_words);
        Self {
            repository,
            learned,
            config,
            window,
            picker: RecentPicker::new(),
            rng,
        }
    }

    pub fn repository(&self) -> &WordRepository {
        &self.repository
    }

    pub fn learned(&self) -> &LearnedSet {
        &self.learned
    }

    pub fn learned_mut(&mut self) -> &mut LearnedSet {
        &mut self.learned
    }

    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: QuizConfig) {
        self.config = config;
    }

    pub fn window(&self) -> Window {
        self.window
    }

    pub fn set_window(&mut self, window: Window) {
        debug!(?window, "today's window changed");
        self.window = window;
    }

    /// Words in the current window, in list order.
    pub fn today_words(&self) -> &[VocabularyEntry] {
        select_window(self.repository.entries(), self.window)
    }

    pub fn statistics(&self) -> Statistics {
        Statistics::compute(self.repository.len(), &self.learned)
    }

    /// Returns the new known state of `word`.
    pub fn toggle_learned(&mut self, word: &str) -> bool {
        self.learned.toggle(word)
    }

    pub fn mark_learned(&mut self, word: &str) -> bool {
        self.learned.insert(word)
    }

    pub fn start_meaning_quiz(&mut self) -> Result<QuizSession, QuizError> {
        let entries = self.repository.entries();
        let questions =
            quiz::generate_meaning_quiz(entries, self.config.quiz_size, &mut self.rng);
        finish("meaning", questions, "No vocabulary is loaded yet.")
    }

    pub fn start_syn_ant_quiz(&mut self) -> Result<QuizSession, QuizError> {
        let entries = self.repository.entries();
        let candidates = relation_candidates(entries, RelationFilter::Both);
        if candidates.len() < self.config.min_relation_words {
            return Err(QuizError::InsufficientData(format!(
                "Need at least {} words with synonyms or antonyms, found {}.",
                self.config.min_relation_words,
                candidates.len()
            )));
        }
        let total = self.config.quiz_size.min(candidates.len());
        let questions = generate_syn_ant_up_to(
            &candidates,
            entries,
            RelationFilter::Both,
            total,
            &mut self.rng,
        );
        finish(
            "relations",
            questions,
            "Could not build any synonym or antonym question.",
        )
    }

    /// Meaning questions over the whole window in window order, with
    /// distractors from the full list.
    pub fn start_today_practice(&mut self) -> Result<QuizSession, QuizError> {
        let entries = self.repository.entries();
        let today = select_window(entries, self.window);
        let questions = today
            .iter()
            .map(|entry| quiz::meaning_question(entry, entries, &mut self.rng))
            .collect();
        finish("today", questions, "Today's window has no words.")
    }

    pub fn start_today_syn_ant_quiz(
        &mut self,
        filter: RelationFilter,
        count: usize,
    ) -> Result<QuizSession, QuizError> {
        let entries = self.repository.entries();
        let today = select_window(entries, self.window);
        let candidates = relation_candidates(today, filter);
        if candidates.len() < self.config.min_relation_words {
            return Err(QuizError::InsufficientData(format!(
                "Need at least {} of today's words with {filter}, found {}.",
                self.config.min_relation_words,
                candidates.len()
            )));
        }
        let total = count.min(candidates.len());
        let questions = generate_syn_ant_up_to(&candidates, entries, filter, total, &mut self.rng);
        finish(
            "today relations",
            questions,
            "Could not build any question from today's words.",
        )
    }

    pub fn start_today_writing(&self) -> WritingSession {
        WritingSession::new(self.today_words().to_vec())
    }

    pub fn start_phrase_quiz<P: PhraseItem>(
        &mut self,
        items: &[P],
    ) -> Result<QuizSession, QuizError> {
        let questions =
            phrases::generate_phrase_quiz(items, self.config.phrase_questions, &mut self.rng);
        finish("phrases", questions, "No phrase data is available to practise.")
    }

    pub fn start_collocation_quiz(
        &mut self,
        sets: &[CollocationSet],
    ) -> Result<QuizSession, QuizError> {
        let questions = phrases::generate_collocation_quiz(
            sets,
            self.config.collocation_questions,
            &mut self.rng,
        );
        finish(
            "collocations",
            questions,
            "No collocation data is available to practise.",
        )
    }

    /// Index of the next spelling-practice word, avoiding recent repeats.
    pub fn next_practice_index(&mut self) -> Option<usize> {
        self.picker.pick(self.repository.len(), &mut self.rng)
    }

    /// Checks a spelling attempt for the word at `index`; a correct answer
    /// marks the word learned.
    pub fn check_practice_spelling(&mut self, index: usize, input: &str) -> Option<SpellingOutcome> {
        let entry = self.repository.get(index)?;
        let outcome = check_spelling(input, entry);
        if outcome == SpellingOutcome::Correct && self.learned.insert(&entry.word) {
            debug!(word = %entry.word, "learned through spelling practice");
        }
        Some(outcome)
    }
}

fn finish(
    label: &str,
    questions: Vec<quiz::Question>,
    empty_message: &str,
) -> Result<QuizSession, QuizError> {
    if questions.is_empty() {
        return Err(QuizError::InsufficientData(empty_message.to_string()));
    }
    info!(quiz = label, questions = questions.len(), "Started quiz");
    Ok(QuizSession::new(questions))
}

//! Question generation and answer checking.
//!
//! Every generator is a plain function over a slice of entries and an
//! injected random source, so callers decide between `thread_rng()` and a
//! seeded `SmallRng`. Generators never fail: small or incomplete inputs
//! produce fewer options, fewer questions, or `None`.

use crate::data::VocabularyEntry;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use tracing::debug;

/// Options shown for a full single-select question.
pub const OPTION_COUNT: usize = 4;
/// Most correct answers a "select all" question asks for.
pub const MAX_MULTI_ANSWERS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizConfig {
    pub quiz_size: usize,
    /// Fewest words with synonyms/antonyms needed to start a relation quiz.
    pub min_relation_words: usize,
    pub today_words: usize,
    pub phrase_questions: usize,
    pub collocation_questions: usize,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            quiz_size: 10,
            min_relation_words: 3,
            today_words: 10,
            phrase_questions: 10,
            collocation_questions: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuestionKind {
    Meaning,
    FindSynonyms,
    FindAntonyms,
    SynonymChoice,
    AntonymChoice,
    FindOddOne,
    PhraseMeaning,
    CompleteSentence,
    CollocationGap,
}

impl QuestionKind {
    pub fn label(self) -> &'static str {
        match self {
            QuestionKind::Meaning => "Meaning",
            QuestionKind::FindSynonyms => "Find all synonyms",
            QuestionKind::FindAntonyms => "Find all antonyms",
            QuestionKind::SynonymChoice => "Synonym",
            QuestionKind::AntonymChoice => "Antonym",
            QuestionKind::FindOddOne => "Odd one out",
            QuestionKind::PhraseMeaning => "Phrase meaning",
            QuestionKind::CompleteSentence => "Complete the sentence",
            QuestionKind::CollocationGap => "Collocation",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub kind: QuestionKind,
    /// Source word or phrase the question was built from.
    pub word: String,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_answers: Vec<String>,
    pub is_multi_select: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl Question {
    pub fn check<S: AsRef<str>>(&self, selected: &[S]) -> bool {
        check_answer(selected, self)
    }

    pub fn is_correct_option(&self, option: &str) -> bool {
        self.correct_answers.iter().any(|answer| answer == option)
    }
}

/// Scores a submission. With several correct answers the selection must
/// match them exactly (same size, mutual inclusion); with one, exactly one
/// option equal to it must be selected. Comparison is case-sensitive.
pub fn check_answer<S: AsRef<str>>(selected: &[S], question: &Question) -> bool {
    let correct = &question.correct_answers;
    if correct.len() > 1 {
        selected.len() == correct.len()
            && correct
                .iter()
                .all(|answer| selected.iter().any(|s| s.as_ref() == answer))
            && selected
                .iter()
                .all(|s| correct.iter().any(|answer| answer == s.as_ref()))
    } else {
        match (selected, correct.first()) {
            ([only], Some(expected)) => only.as_ref() == expected,
            _ => false,
        }
    }
}

/// Which strings of an entry can serve as wrong options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistractorSource {
    /// The entry's `meaning`.
    Meanings,
    /// The entry's synonyms, antonyms and headword.
    Relations,
}

/// Draws up to `count` unique distractors from `pool`.
///
/// Entries whose headword is in `exclude` contribute nothing; every other
/// candidate string is dropped when it is empty, excluded, or one of the
/// `correct` answers. The sample is uniform without replacement and may be
/// shorter than `count` for small pools.
pub fn sample_distractors<R: Rng + ?Sized>(
    pool: &[VocabularyEntry],
    source: DistractorSource,
    exclude: &[&str],
    correct: &[String],
    count: usize,
    rng: &mut R,
) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut candidates: Vec<&str> = pool
        .iter()
        .filter(|entry| !exclude.contains(&entry.word.as_str()))
        .flat_map(|entry| surfaces(entry, source))
        .filter(|candidate| {
            !candidate.is_empty()
                && !exclude.contains(candidate)
                && !correct.iter().any(|answer| answer == candidate)
        })
        .filter(|candidate| seen.insert(*candidate))
        .collect();
    candidates.shuffle(rng);
    candidates.truncate(count);
    candidates.into_iter().map(str::to_string).collect()
}

fn surfaces(entry: &VocabularyEntry, source: DistractorSource) -> Vec<&str> {
    match source {
        DistractorSource::Meanings => vec![entry.meaning.as_str()],
        DistractorSource::Relations => entry
            .synonym_words()
            .chain(entry.antonym_words())
            .chain(std::iter::once(entry.word.as_str()))
            .collect(),
    }
}

/// One "what does this word mean" question; distractors are other meanings
/// from `pool`.
pub fn meaning_question<R: Rng + ?Sized>(
    entry: &VocabularyEntry,
    pool: &[VocabularyEntry],
    rng: &mut R,
) -> Question {
    let correct = vec![entry.meaning.clone()];
    let mut options = correct.clone();
    options.extend(sample_distractors(
        pool,
        DistractorSource::Meanings,
        &[entry.word.as_str()],
        &correct,
        OPTION_COUNT - 1,
        rng,
    ));
    options.shuffle(rng);
    Question {
        kind: QuestionKind::Meaning,
        word: entry.word.clone(),
        prompt: format!("What does \"{}\" mean?", entry.word),
        options,
        correct_answers: correct,
        is_multi_select: false,
        explanation: Some(explain_meaning(entry)),
    }
}

/// Shuffles `pool` and builds a meaning question for the first
/// `min(size, pool.len())` entries.
pub fn generate_meaning_quiz<R: Rng + ?Sized>(
    pool: &[VocabularyEntry],
    size: usize,
    rng: &mut R,
) -> Vec<Question> {
    generate_meaning_quiz_from(pool, pool, size, rng)
}

/// Like [`generate_meaning_quiz`], but draws the asked words from `targets`
/// and the distractors from `pool`.
pub fn generate_meaning_quiz_from<R: Rng + ?Sized>(
    targets: &[VocabularyEntry],
    pool: &[VocabularyEntry],
    size: usize,
    rng: &mut R,
) -> Vec<Question> {
    let mut order: Vec<&VocabularyEntry> = targets.iter().collect();
    order.shuffle(rng);
    order
        .into_iter()
        .take(size)
        .map(|entry| meaning_question(entry, pool, rng))
        .collect()
}

/// Restricts relation questions to synonyms, antonyms, or both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationFilter {
    #[default]
    Both,
    Synonyms,
    Antonyms,
}

impl RelationFilter {
    fn synonyms(self) -> bool {
        matches!(self, RelationFilter::Both | RelationFilter::Synonyms)
    }

    fn antonyms(self) -> bool {
        matches!(self, RelationFilter::Both | RelationFilter::Antonyms)
    }

    pub fn admits(self, entry: &VocabularyEntry) -> bool {
        (self.synonyms() && entry.has_synonyms()) || (self.antonyms() && entry.has_antonyms())
    }
}

impl fmt::Display for RelationFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationFilter::Both => write!(f, "synonyms or antonyms"),
            RelationFilter::Synonyms => write!(f, "synonyms"),
            RelationFilter::Antonyms => write!(f, "antonyms"),
        }
    }
}

/// Entries that can carry a relation question under `filter`.
pub fn relation_candidates(
    entries: &[VocabularyEntry],
    filter: RelationFilter,
) -> Vec<&VocabularyEntry> {
    entries.iter().filter(|entry| filter.admits(entry)).collect()
}

/// Question kinds the entry supports. `FindOddOne` is listed once per
/// relation the entry has, which doubles its weight for words with both.
pub fn eligible_relation_kinds(
    entry: &VocabularyEntry,
    filter: RelationFilter,
) -> Vec<QuestionKind> {
    let mut kinds = Vec::with_capacity(6);
    if filter.synonyms() && entry.has_synonyms() {
        kinds.extend([
            QuestionKind::FindSynonyms,
            QuestionKind::SynonymChoice,
            QuestionKind::FindOddOne,
        ]);
    }
    if filter.antonyms() && entry.has_antonyms() {
        kinds.extend([
            QuestionKind::FindAntonyms,
            QuestionKind::AntonymChoice,
            QuestionKind::FindOddOne,
        ]);
    }
    kinds
}

/// Picks a random candidate and a random eligible kind. Returns `None` when
/// there are no candidates or the picked word has nothing usable under
/// `filter`.
pub fn generate_syn_ant_question<R: Rng + ?Sized>(
    candidates: &[&VocabularyEntry],
    pool: &[VocabularyEntry],
    filter: RelationFilter,
    rng: &mut R,
) -> Option<Question> {
    let entry = *candidates.choose(rng)?;
    let kind = *eligible_relation_kinds(entry, filter).choose(rng)?;
    relation_question(entry, kind, pool, rng)
}

/// Makes `total` attempts and keeps the ones that produced a question, so
/// the result holds at most `total` questions and possibly fewer.
pub fn generate_syn_ant_up_to<R: Rng + ?Sized>(
    candidates: &[&VocabularyEntry],
    pool: &[VocabularyEntry],
    filter: RelationFilter,
    total: usize,
    rng: &mut R,
) -> Vec<Question> {
    let questions: Vec<Question> = (0..total)
        .filter_map(|_| generate_syn_ant_question(candidates, pool, filter, rng))
        .collect();
    if questions.len() < total {
        debug!(
            requested = total,
            produced = questions.len(),
            "relation quiz came up short"
        );
    }
    questions
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Relation {
    Synonym,
    Antonym,
}

impl Relation {
    fn forms(self, entry: &VocabularyEntry) -> Vec<&str> {
        let mut seen = HashSet::new();
        let forms: Vec<&str> = match self {
            Relation::Synonym => entry.synonym_words().collect(),
            Relation::Antonym => entry.antonym_words().collect(),
        };
        forms
            .into_iter()
            .filter(|form| !form.is_empty() && seen.insert(*form))
            .collect()
    }

    fn plural(self) -> &'static str {
        match self {
            Relation::Synonym => "synonyms",
            Relation::Antonym => "antonyms",
        }
    }

    fn with_article(self) -> &'static str {
        match self {
            Relation::Synonym => "a synonym",
            Relation::Antonym => "an antonym",
        }
    }
}

/// Builds a relation question of the given kind, or `None` when the kind is
/// not a relation kind or the entry lacks the needed synonyms/antonyms.
pub fn relation_question<R: Rng + ?Sized>(
    entry: &VocabularyEntry,
    kind: QuestionKind,
    pool: &[VocabularyEntry],
    rng: &mut R,
) -> Option<Question> {
    match kind {
        QuestionKind::FindSynonyms => find_all_question(entry, Relation::Synonym, pool, rng),
        QuestionKind::FindAntonyms => find_all_question(entry, Relation::Antonym, pool, rng),
        QuestionKind::SynonymChoice => choice_question(entry, Relation::Synonym, pool, rng),
        QuestionKind::AntonymChoice => choice_question(entry, Relation::Antonym, pool, rng),
        QuestionKind::FindOddOne => odd_one_question(entry, pool, rng),
        _ => None,
    }
}

fn find_all_question<R: Rng + ?Sized>(
    entry: &VocabularyEntry,
    relation: Relation,
    pool: &[VocabularyEntry],
    rng: &mut R,
) -> Option<Question> {
    let forms = relation.forms(entry);
    if forms.is_empty() {
        return None;
    }
    let correct: Vec<String> = forms
        .iter()
        .take(MAX_MULTI_ANSWERS)
        .map(|form| form.to_string())
        .collect();
    let exclude = exclusions(entry, &forms);
    let mut options = correct.clone();
    options.extend(sample_distractors(
        pool,
        DistractorSource::Relations,
        &exclude,
        &correct,
        OPTION_COUNT - correct.len(),
        rng,
    ));
    options.shuffle(rng);
    let plural = relation.plural();
    let kind = match relation {
        Relation::Synonym => QuestionKind::FindSynonyms,
        Relation::Antonym => QuestionKind::FindAntonyms,
    };
    Some(Question {
        kind,
        word: entry.word.clone(),
        prompt: format!("Select ALL {plural} of \"{}\"", entry.word),
        explanation: Some(format!(
            "{} of \"{}\": {}",
            capitalize(plural),
            entry.word,
            correct.join(", ")
        )),
        options,
        correct_answers: correct,
        is_multi_select: true,
    })
}

fn choice_question<R: Rng + ?Sized>(
    entry: &VocabularyEntry,
    relation: Relation,
    pool: &[VocabularyEntry],
    rng: &mut R,
) -> Option<Question> {
    let forms = relation.forms(entry);
    let answer = forms.choose(rng)?.to_string();
    let correct = vec![answer];
    let exclude = exclusions(entry, &forms);
    let mut options = correct.clone();
    options.extend(sample_distractors(
        pool,
        DistractorSource::Relations,
        &exclude,
        &correct,
        OPTION_COUNT - 1,
        rng,
    ));
    options.shuffle(rng);
    let kind = match relation {
        Relation::Synonym => QuestionKind::SynonymChoice,
        Relation::Antonym => QuestionKind::AntonymChoice,
    };
    Some(Question {
        kind,
        word: entry.word.clone(),
        prompt: format!("Which word is {} of \"{}\"?", relation.with_article(), entry.word),
        explanation: Some(format!(
            "\"{}\" is {} of \"{}\"",
            correct[0],
            relation.with_article(),
            entry.word
        )),
        options,
        correct_answers: correct,
        is_multi_select: false,
    })
}

/// "Which word does not belong": the lone antonym among synonyms, or the
/// lone synonym among antonyms. A shape needs three of the majority relation
/// and one of the other; when neither full shape exists a two-majority shape
/// is used, and without that the question degrades to a plain choice.
fn odd_one_question<R: Rng + ?Sized>(
    entry: &VocabularyEntry,
    pool: &[VocabularyEntry],
    rng: &mut R,
) -> Option<Question> {
    let synonyms = Relation::Synonym.forms(entry);
    let antonyms = Relation::Antonym.forms(entry);

    let shape_fits = |majority: usize, odd: usize, min_majority: usize| {
        majority >= min_majority && odd >= 1
    };
    let mut shapes: Vec<Relation> = Vec::with_capacity(2);
    for min_majority in [MAX_MULTI_ANSWERS, 2] {
        if shape_fits(synonyms.len(), antonyms.len(), min_majority) {
            shapes.push(Relation::Antonym);
        }
        if shape_fits(antonyms.len(), synonyms.len(), min_majority) {
            shapes.push(Relation::Synonym);
        }
        if !shapes.is_empty() {
            break;
        }
    }

    // `odd` is the relation of the answer.
    let odd = match shapes.as_slice() {
        [] => {
            let fallback = if synonyms.is_empty() {
                Relation::Antonym
            } else {
                Relation::Synonym
            };
            return choice_question(entry, fallback, pool, rng);
        }
        [only] => *only,
        [first, second, ..] => {
            if rng.gen_bool(0.5) {
                *first
            } else {
                *second
            }
        }
    };
    let (odd_forms, majority_forms, majority) = match odd {
        Relation::Antonym => (&antonyms, &synonyms, Relation::Synonym),
        Relation::Synonym => (&synonyms, &antonyms, Relation::Antonym),
    };
    let answer = odd_forms.choose(rng)?.to_string();
    let mut options: Vec<String> = majority_forms
        .iter()
        .filter(|form| **form != answer)
        .take(MAX_MULTI_ANSWERS)
        .map(|form| form.to_string())
        .collect();
    options.push(answer.clone());
    options.shuffle(rng);
    Some(Question {
        kind: QuestionKind::FindOddOne,
        word: entry.word.clone(),
        prompt: format!(
            "Which word does NOT belong? (The others are {} of \"{}\")",
            majority.plural(),
            entry.word
        ),
        explanation: Some(format!(
            "\"{answer}\" is {} of \"{}\"",
            odd.with_article(),
            entry.word
        )),
        options,
        correct_answers: vec![answer],
        is_multi_select: false,
    })
}

fn exclusions<'a>(entry: &'a VocabularyEntry, forms: &[&'a str]) -> Vec<&'a str> {
    let mut exclude = Vec::with_capacity(forms.len() + 1);
    exclude.push(entry.word.as_str());
    exclude.extend_from_slice(forms);
    exclude
}

fn explain_meaning(entry: &VocabularyEntry) -> String {
    let mut text = format!("\"{}\" means \"{}\"", entry.word, entry.meaning);
    if !entry.example.is_empty() {
        text.push_str(&format!(". Example: {}", entry.example));
    }
    text
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Result of submitting an answer to the current question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub expected: Vec<String>,
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Excellent,
    Good,
    Fair,
    NeedsPractice,
}

impl ScoreBand {
    pub fn from_percent(percent: u32) -> Self {
        match percent {
            90.. => ScoreBand::Excellent,
            70.. => ScoreBand::Good,
            50.. => ScoreBand::Fair,
            _ => ScoreBand::NeedsPractice,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ScoreBand::Excellent => "Excellent! You have mastered these words.",
            ScoreBand::Good => "Well done! Keep it up.",
            ScoreBand::Fair => "Not bad. A little more practice will help.",
            ScoreBand::NeedsPractice => "Keep trying, and don't give up!",
        }
    }
}

/// An in-progress quiz. Starting a new quiz replaces the session.
#[derive(Debug, Clone, Serialize)]
pub struct QuizSession {
    items: Vec<Question>,
    current_index: usize,
    score: usize,
    wrong: usize,
    #[serde(skip)]
    answered: bool,
}

impl QuizSession {
    pub fn new(items: Vec<Question>) -> Self {
        Self {
            items,
            current_index: 0,
            score: 0,
            wrong: 0,
            answered: false,
        }
    }

    pub fn items(&self) -> &[Question] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn current(&self) -> Option<&Question> {
        self.items.get(self.current_index)
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn wrong(&self) -> usize {
        self.wrong
    }

    pub fn is_finished(&self) -> bool {
        self.current_index >= self.items.len()
    }

    /// Scores the current question. Returns `None` once the quiz is over or
    /// when the current question was already answered.
    pub fn submit<S: AsRef<str>>(&mut self, selected: &[S]) -> Option<AnswerOutcome> {
        if self.answered {
            return None;
        }
        let question = self.items.get(self.current_index)?;
        let correct = check_answer(selected, question);
        let outcome = AnswerOutcome {
            correct,
            expected: question.correct_answers.clone(),
            explanation: question.explanation.clone(),
        };
        if correct {
            self.score += 1;
        } else {
            self.wrong += 1;
        }
        self.answered = true;
        Some(outcome)
    }

    /// Moves to the next question; returns `false` when the quiz is over.
    pub fn advance(&mut self) -> bool {
        if !self.is_finished() {
            self.current_index += 1;
        }
        self.answered = false;
        !self.is_finished()
    }

    pub fn percent(&self) -> u32 {
        if self.items.is_empty() {
            return 0;
        }
        ((self.score as f64 / self.items.len() as f64) * 100.0).round() as u32
    }

    pub fn band(&self) -> ScoreBand {
        ScoreBand::from_percent(self.percent())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizError {
    /// Not enough words, options or relations to build the requested quiz.
    InsufficientData(String),
}

impl fmt::Display for QuizError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizError::InsufficientData(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for QuizError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sample_vocabulary;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn rng(seed: u64) -> SmallRng {
        SmallRng::seed_from_u64(seed)
    }

    fn has_duplicates(values: &[String]) -> bool {
        let mut seen = HashSet::new();
        values.iter().any(|value| !seen.insert(value))
    }

    #[test]
    fn distractors_are_unique_and_never_correct() {
        let pool = sample_vocabulary();
        for seed in 0..64 {
            let mut rng = rng(seed);
            let correct = vec!["great".to_string(), "huge".to_string()];
            let picked = sample_distractors(
                &pool,
                DistractorSource::Relations,
                &["good"],
                &correct,
                10,
                &mut rng,
            );
            assert_eq!(picked.len(), 10);
            assert!(!has_duplicates(&picked));
            assert!(picked.iter().all(|p| !correct.contains(p)));
            assert!(!picked.iter().any(|p| p == "good" || p == "excellent"));
        }
    }

    #[test]
    fn distractors_shrink_for_tiny_pools() {
        let pool = vec![
            VocabularyEntry::new("cat", "feline"),
            VocabularyEntry::new("dog", "canine"),
        ];
        let picked = sample_distractors(
            &pool,
            DistractorSource::Meanings,
            &["cat"],
            &["feline".to_string()],
            3,
            &mut rng(1),
        );
        assert_eq!(picked, vec!["canine".to_string()]);
    }

    #[test]
    fn duplicate_candidates_collapse() {
        let pool = vec![
            VocabularyEntry::new("a", "same"),
            VocabularyEntry::new("b", "same"),
            VocabularyEntry::new("c", "other"),
        ];
        let picked =
            sample_distractors(&pool, DistractorSource::Meanings, &[], &[], 5, &mut rng(3));
        assert_eq!(picked.len(), 2);
    }

    #[test]
    fn meaning_quiz_always_contains_answer() {
        let pool = sample_vocabulary();
        for seed in 0..32 {
            let quiz = generate_meaning_quiz(&pool, 10, &mut rng(seed));
            assert_eq!(quiz.len(), pool.len());
            for question in &quiz {
                assert_eq!(question.options.len(), OPTION_COUNT);
                assert!(!question.is_multi_select);
                assert!(
                    question
                        .correct_answers
                        .iter()
                        .all(|answer| question.options.contains(answer))
                );
                assert!(!has_duplicates(&question.options));
            }
        }
    }

    #[test]
    fn meaning_quiz_degrades_for_two_words() {
        let pool = vec![
            VocabularyEntry::new("cat", "feline"),
            VocabularyEntry::new("dog", "canine"),
        ];
        let quiz = generate_meaning_quiz(&pool, 5, &mut rng(9));
        assert_eq!(quiz.len(), 2);
        for question in &quiz {
            assert!(question.options.len() <= 2);
            assert!(question.options.contains(&question.correct_answers[0]));
        }
    }

    #[test]
    fn meaning_quiz_on_empty_pool_is_empty() {
        assert!(generate_meaning_quiz(&[], 5, &mut rng(0)).is_empty());
    }

    #[test]
    fn multi_select_requires_exact_set() {
        let entry = VocabularyEntry::new("quick", "fast").with_synonyms(["a", "b"]);
        let pool = vec![entry.clone(), VocabularyEntry::new("slow", "not fast")];
        let question =
            relation_question(&entry, QuestionKind::FindSynonyms, &pool, &mut rng(4)).unwrap();
        assert!(question.is_multi_select);
        assert_eq!(question.correct_answers, vec!["a", "b"]);
        assert!(check_answer(&["a", "b"], &question));
        assert!(check_answer(&["b", "a"], &question));
        assert!(!check_answer(&["a", "b", "c"], &question));
        assert!(!check_answer(&["a"], &question));
        assert!(!check_answer(&["a", "a"], &question));
    }

    #[test]
    fn single_answer_needs_one_exact_selection() {
        let question = Question {
            kind: QuestionKind::SynonymChoice,
            word: "big".into(),
            prompt: String::new(),
            options: vec!["large".into(), "tiny".into()],
            correct_answers: vec!["large".into()],
            is_multi_select: false,
            explanation: None,
        };
        assert!(check_answer(&["large"], &question));
        assert!(!check_answer(&["Large"], &question));
        assert!(!check_answer(&["large", "tiny"], &question));
        assert!(!check_answer::<&str>(&[], &question));
    }

    #[test]
    fn find_synonyms_caps_correct_answers_and_fills_to_four() {
        let pool = sample_vocabulary();
        let good = pool.iter().find(|e| e.word == "good").unwrap();
        for seed in 0..16 {
            let question =
                relation_question(good, QuestionKind::FindSynonyms, &pool, &mut rng(seed))
                    .unwrap();
            assert_eq!(question.correct_answers.len(), MAX_MULTI_ANSWERS);
            assert_eq!(question.options.len(), OPTION_COUNT);
            assert!(!has_duplicates(&question.options));
            assert!(!question.options.iter().any(|o| o == "good"));
        }
    }

    #[test]
    fn odd_one_has_four_options_and_one_answer() {
        let entry = VocabularyEntry::new("happy", "glad")
            .with_synonyms(["joyful", "cheerful", "delighted"])
            .with_antonyms(["sad"]);
        let pool = vec![entry.clone()];
        for seed in 0..64 {
            let question =
                relation_question(&entry, QuestionKind::FindOddOne, &pool, &mut rng(seed))
                    .unwrap();
            assert_eq!(question.kind, QuestionKind::FindOddOne);
            assert_eq!(question.options.len(), OPTION_COUNT);
            assert_eq!(question.correct_answers.len(), 1);
            let answer = &question.correct_answers[0];
            assert!(
                entry.synonym_words().any(|s| s == answer)
                    || entry.antonym_words().any(|a| a == answer)
            );
            assert!(question.options.contains(answer));
        }
    }

    #[test]
    fn odd_one_uses_both_shapes_when_available() {
        let pool = sample_vocabulary();
        let good = pool.iter().find(|e| e.word == "good").unwrap();
        let mut answers = HashSet::new();
        for seed in 0..64 {
            let question =
                relation_question(good, QuestionKind::FindOddOne, &pool, &mut rng(seed))
                    .unwrap();
            let answer = question.correct_answers[0].clone();
            answers.insert(good.synonym_words().any(|s| s == answer));
        }
        assert_eq!(answers.len(), 2, "both coin-flip outcomes should appear");
    }

    #[test]
    fn relation_explanations_use_matching_article() {
        let pool = sample_vocabulary();
        let good = pool.iter().find(|e| e.word == "good").unwrap();
        let mut seen = HashSet::new();
        for seed in 0..64 {
            let question =
                relation_question(good, QuestionKind::FindOddOne, &pool, &mut rng(seed))
                    .unwrap();
            let explanation = question.explanation.unwrap();
            assert!(!explanation.contains("an synonym"), "{explanation}");
            assert!(!explanation.contains("a antonym"), "{explanation}");
            seen.insert(explanation.contains("is a synonym of"));
        }
        assert_eq!(seen.len(), 2);

        let hot = VocabularyEntry::new("hot", "warm").with_antonyms(["cold"]);
        let question =
            relation_question(&hot, QuestionKind::AntonymChoice, &[], &mut rng(3)).unwrap();
        assert!(question.prompt.starts_with("Which word is an antonym of"));
        assert_eq!(
            question.explanation.as_deref(),
            Some("\"cold\" is an antonym of \"hot\"")
        );
    }

    #[test]
    fn odd_one_falls_back_to_choice() {
        let only_synonyms = VocabularyEntry::new("computer", "machine")
            .with_synonyms(["device", "laptop"]);
        let question = relation_question(
            &only_synonyms,
            QuestionKind::FindOddOne,
            &sample_vocabulary(),
            &mut rng(2),
        )
        .unwrap();
        assert_eq!(question.kind, QuestionKind::SynonymChoice);

        let only_antonyms = VocabularyEntry::new("hot", "warm").with_antonyms(["cold"]);
        let question =
            relation_question(&only_antonyms, QuestionKind::FindOddOne, &[], &mut rng(2))
                .unwrap();
        assert_eq!(question.kind, QuestionKind::AntonymChoice);
        assert_eq!(question.options, vec!["cold".to_string()]);
    }

    #[test]
    fn missing_relations_yield_none() {
        let bare = VocabularyEntry::new("plain", "simple");
        let pool = vec![bare.clone()];
        let candidates: Vec<&VocabularyEntry> = pool.iter().collect();
        assert!(
            generate_syn_ant_question(&candidates, &pool, RelationFilter::Both, &mut rng(0))
                .is_none()
        );
        assert!(relation_question(&bare, QuestionKind::SynonymChoice, &pool, &mut rng(0)).is_none());
        assert!(relation_question(&bare, QuestionKind::Meaning, &pool, &mut rng(0)).is_none());
    }

    #[test]
    fn up_to_returns_at_most_requested() {
        let pool = vec![
            VocabularyEntry::new("plain", "simple"),
            VocabularyEntry::new("hot", "warm").with_antonyms(["cold"]),
        ];
        let candidates: Vec<&VocabularyEntry> = pool.iter().collect();
        for seed in 0..16 {
            let questions = generate_syn_ant_up_to(
                &candidates,
                &pool,
                RelationFilter::Both,
                8,
                &mut rng(seed),
            );
            assert!(questions.len() <= 8);
            assert!(questions.iter().all(|q| q.word == "hot"));
        }
        let exact = generate_syn_ant_up_to(
            &candidates[1..],
            &pool,
            RelationFilter::Both,
            8,
            &mut rng(5),
        );
        assert_eq!(exact.len(), 8);
    }

    #[test]
    fn filter_limits_question_kinds() {
        let pool = sample_vocabulary();
        let candidates = relation_candidates(&pool, RelationFilter::Antonyms);
        assert!(candidates.iter().all(|e| e.has_antonyms()));
        let questions =
            generate_syn_ant_up_to(&candidates, &pool, RelationFilter::Antonyms, 30, &mut rng(7));
        assert_eq!(questions.len(), 30);
        assert!(questions.iter().all(|q| matches!(
            q.kind,
            QuestionKind::FindAntonyms | QuestionKind::AntonymChoice | QuestionKind::FindOddOne
        )));
    }

    #[test]
    fn eligible_kinds_double_weight_odd_one() {
        let both = VocabularyEntry::new("w", "m")
            .with_synonyms(["s"])
            .with_antonyms(["a"]);
        let kinds = eligible_relation_kinds(&both, RelationFilter::Both);
        assert_eq!(kinds.len(), 6);
        assert_eq!(
            kinds.iter().filter(|k| **k == QuestionKind::FindOddOne).count(),
            2
        );
        assert_eq!(eligible_relation_kinds(&both, RelationFilter::Synonyms).len(), 3);
    }

    #[test]
    fn session_scores_once_per_question() {
        let pool = sample_vocabulary();
        let questions = generate_meaning_quiz(&pool, 2, &mut rng(11));
        let first_answer = questions[0].correct_answers[0].clone();
        let mut session = QuizSession::new(questions);
        let outcome = session.submit(&[first_answer.as_str()]).unwrap();
        assert!(outcome.correct);
        assert!(session.submit(&[first_answer.as_str()]).is_none());
        assert!(session.advance());
        let outcome = session.submit(&["definitely wrong"]).unwrap();
        assert!(!outcome.correct);
        assert!(!session.advance());
        assert!(session.is_finished());
        assert!(session.submit(&["anything"]).is_none());
        assert_eq!((session.score(), session.wrong()), (1, 1));
        assert_eq!(session.percent(), 50);
        assert_eq!(session.band(), ScoreBand::Fair);
    }

    #[test]
    fn score_bands_follow_thresholds() {
        assert_eq!(ScoreBand::from_percent(95), ScoreBand::Excellent);
        assert_eq!(ScoreBand::from_percent(70), ScoreBand::Good);
        assert_eq!(ScoreBand::from_percent(49), ScoreBand::NeedsPractice);
    }
}

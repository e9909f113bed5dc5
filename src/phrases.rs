//! Phrasal verbs, idioms and collocations: data files and the quizzes built
//! on them.

use crate::LoadError;
use crate::data::normalize_key;
use crate::find_duplicates;
use crate::quiz::{OPTION_COUNT, Question, QuestionKind};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Replacement text for a hidden phrase or token.
pub const BLANK: &str = "___";
const GAP: &str = "______";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseExample {
    pub sentence: String,
    #[serde(default)]
    pub translation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhrasalMeaning {
    #[serde(default)]
    pub definition: String,
    #[serde(default)]
    pub vietnamese: String,
    #[serde(default)]
    pub examples: Vec<PhraseExample>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhrasalVerb {
    pub verb: String,
    #[serde(default)]
    pub meanings: Vec<PhrasalMeaning>,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub usage: String,
    #[serde(default, rename = "type")]
    pub verb_type: String,
    #[serde(default)]
    pub difficulty: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Idiom {
    pub idiom: String,
    #[serde(default)]
    pub meaning: String,
    #[serde(default)]
    pub vietnamese: String,
    #[serde(default)]
    pub examples: Vec<PhraseExample>,
    #[serde(default)]
    pub usage: String,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub difficulty: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collocation {
    pub phrase: String,
    #[serde(default)]
    pub meaning: String,
    #[serde(default)]
    pub example: String,
    #[serde(default)]
    pub example_translation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollocationSet {
    pub word: String,
    #[serde(default)]
    pub collocations: Vec<Collocation>,
}

/// Something quizzed as a whole phrase: it has a surface form, a gloss for
/// the "which phrase means" prompt and possibly an example sentence.
pub trait PhraseItem {
    fn phrase(&self) -> &str;
    fn gloss(&self) -> Option<&str>;
    fn example(&self) -> Option<&PhraseExample>;
}

fn first_filled<'a>(candidates: [&'a str; 2]) -> Option<&'a str> {
    candidates.into_iter().find(|text| !text.trim().is_empty())
}

impl PhraseItem for PhrasalVerb {
    fn phrase(&self) -> &str {
        &self.verb
    }

    fn gloss(&self) -> Option<&str> {
        let meaning = self.meanings.first()?;
        first_filled([&meaning.vietnamese, &meaning.definition])
    }

    fn example(&self) -> Option<&PhraseExample> {
        self.meanings.first()?.examples.first()
    }
}

impl PhraseItem for Idiom {
    fn phrase(&self) -> &str {
        &self.idiom
    }

    fn gloss(&self) -> Option<&str> {
        first_filled([&self.vietnamese, &self.meaning])
    }

    fn example(&self) -> Option<&PhraseExample> {
        self.examples.first()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PhrasalVerbFile {
    #[serde(default)]
    phrasal_verbs: Vec<PhrasalVerb>,
}

#[derive(Debug, Deserialize)]
struct IdiomFile {
    #[serde(default)]
    idioms: Vec<Idiom>,
}

/// Parses `{"phrasalVerbs": [...]}`.
pub fn parse_phrasal_verbs(json: &str) -> Result<Vec<PhrasalVerb>, LoadError> {
    Ok(serde_json::from_str::<PhrasalVerbFile>(json)?.phrasal_verbs)
}

/// Parses `{"idioms": [...]}`.
pub fn parse_idioms(json: &str) -> Result<Vec<Idiom>, LoadError> {
    Ok(serde_json::from_str::<IdiomFile>(json)?.idioms)
}

/// Parses a bare array of collocation sets.
pub fn parse_collocations(json: &str) -> Result<Vec<CollocationSet>, LoadError> {
    Ok(serde_json::from_str(json)?)
}

pub fn read_phrasal_verbs(path: &Path) -> Result<Vec<PhrasalVerb>, LoadError> {
    parse_phrasal_verbs(&fs::read_to_string(path)?)
}

pub fn read_idioms(path: &Path) -> Result<Vec<Idiom>, LoadError> {
    parse_idioms(&fs::read_to_string(path)?)
}

pub fn read_collocations(path: &Path) -> Result<Vec<CollocationSet>, LoadError> {
    parse_collocations(&fs::read_to_string(path)?)
}

pub fn duplicate_phrasal_verbs(verbs: &[PhrasalVerb]) -> BTreeSet<String> {
    find_duplicates(verbs.iter().map(|verb| verb.verb.as_str()))
}

pub fn duplicate_idioms(idioms: &[Idiom]) -> BTreeSet<String> {
    find_duplicates(idioms.iter().map(|idiom| idiom.idiom.as_str()))
}

/// Replaces every case-insensitive (ASCII) occurrence of `phrase` in
/// `sentence` with [`BLANK`]. Other text, including its case, is kept.
pub fn blank_phrase(sentence: &str, phrase: &str) -> String {
    let needle = phrase.trim().to_ascii_lowercase();
    if needle.is_empty() {
        return sentence.to_string();
    }
    // ASCII lowercasing keeps byte offsets aligned with `sentence`.
    let haystack = sentence.to_ascii_lowercase();
    let mut blanked = String::with_capacity(sentence.len());
    let mut last = 0;
    for (start, _) in haystack.match_indices(&needle) {
        blanked.push_str(&sentence[last..start]);
        blanked.push_str(BLANK);
        last = start + needle.len();
    }
    blanked.push_str(&sentence[last..]);
    blanked
}

/// Builds meaning and complete-the-sentence questions for each distinct
/// phrase, visiting the items in random order, and keeps at most `limit`.
pub fn generate_phrase_quiz<P, R>(items: &[P], limit: usize, rng: &mut R) -> Vec<Question>
where
    P: PhraseItem,
    R: Rng + ?Sized,
{
    let mut seen = HashSet::new();
    let mut unique: Vec<&P> = items
        .iter()
        .filter(|item| {
            !item.phrase().trim().is_empty() && seen.insert(normalize_key(item.phrase()))
        })
        .collect();
    let phrases: Vec<&str> = unique.iter().copied().map(P::phrase).collect();
    unique.shuffle(rng);

    let mut questions = Vec::new();
    for item in unique {
        if questions.len() >= limit {
            break;
        }
        let phrase = item.phrase();
        if let Some(gloss) = item.gloss() {
            questions.push(Question {
                kind: QuestionKind::PhraseMeaning,
                word: phrase.to_string(),
                prompt: format!("Which phrase means \"{gloss}\"?"),
                options: phrase_options(phrase, &phrases, rng),
                correct_answers: vec![phrase.to_string()],
                is_multi_select: false,
                explanation: Some(format!("\"{phrase}\" means \"{gloss}\"")),
            });
        }
        if let Some(example) = item.example() {
            questions.push(Question {
                kind: QuestionKind::CompleteSentence,
                word: phrase.to_string(),
                prompt: format!(
                    "Complete the sentence: \"{}\"",
                    blank_phrase(&example.sentence, phrase)
                ),
                options: phrase_options(phrase, &phrases, rng),
                correct_answers: vec![phrase.to_string()],
                is_multi_select: false,
                explanation: Some(format!("Full sentence: \"{}\"", example.sentence)),
            });
        }
    }
    questions.truncate(limit);
    debug!(questions = questions.len(), "built phrase quiz");
    questions
}

fn phrase_options<R: Rng + ?Sized>(answer: &str, phrases: &[&str], rng: &mut R) -> Vec<String> {
    let key = normalize_key(answer);
    let others: Vec<&str> = phrases
        .iter()
        .copied()
        .filter(|phrase| normalize_key(phrase) != key)
        .collect();
    let mut options: Vec<String> = others
        .choose_multiple(rng, OPTION_COUNT - 1)
        .map(|phrase| phrase.to_string())
        .collect();
    options.push(answer.to_string());
    options.shuffle(rng);
    options
}

/// One gap-fill question: a random token of a random collocation is hidden
/// and must be picked back out from tokens of other collocations.
pub fn collocation_question<R: Rng + ?Sized>(
    sets: &[CollocationSet],
    rng: &mut R,
) -> Option<Question> {
    let usable: Vec<&CollocationSet> = sets
        .iter()
        .filter(|set| !set.collocations.is_empty())
        .collect();
    let set = *usable.choose(rng)?;
    let collocation = set.collocations.choose(rng)?;
    let tokens: Vec<&str> = collocation.phrase.split_whitespace().collect();
    if tokens.is_empty() {
        return None;
    }
    let missing = rng.gen_range(0..tokens.len());
    let answer = tokens[missing];
    let gapped: Vec<&str> = tokens
        .iter()
        .enumerate()
        .map(|(index, token)| if index == missing { GAP } else { *token })
        .collect();

    let mut used: HashSet<&str> = HashSet::from([answer]);
    let mut wrong: Vec<&str> = sets
        .iter()
        .flat_map(|item| item.collocations.iter())
        .flat_map(|other| other.phrase.split_whitespace())
        .filter(|token| *token != set.word && used.insert(*token))
        .collect();
    wrong.shuffle(rng);
    wrong.truncate(OPTION_COUNT - 1);

    let mut options: Vec<String> = wrong.into_iter().map(str::to_string).collect();
    options.push(answer.to_string());
    options.shuffle(rng);

    let mut explanation = format!("\"{}\"", collocation.phrase);
    if !collocation.meaning.is_empty() {
        explanation.push_str(&format!(": {}", collocation.meaning));
    }
    if !collocation.example.is_empty() {
        explanation.push_str(&format!(". Example: {}", collocation.example));
    }
    Some(Question {
        kind: QuestionKind::CollocationGap,
        word: collocation.phrase.clone(),
        prompt: format!("Complete the collocation: {}", gapped.join(" ")),
        options,
        correct_answers: vec![answer.to_string()],
        is_multi_select: false,
        explanation: Some(explanation),
    })
}

/// Up to `count` gap-fill questions; fewer when the data has nothing to ask.
pub fn generate_collocation_quiz<R: Rng + ?Sized>(
    sets: &[CollocationSet],
    count: usize,
    rng: &mut R,
) -> Vec<Question> {
    (0..count)
        .filter_map(|_| collocation_question(sets, rng))
        .collect()
}

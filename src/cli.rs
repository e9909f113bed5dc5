use std::cmp;
use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use atty::Stream;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use serde_json::json;
use termimad::{FmtText, MadSkin, terminal_size};
use tracing_subscriber::EnvFilter;
use wordwise_rs::phrases::{self, CollocationSet, Idiom, PhrasalVerb};
use wordwise_rs::practice::SpellingOutcome;
use wordwise_rs::window::LearnWalk;
use wordwise_rs::{
    Accent, LearnedSet, ProgressStore, QuizSession, RelationFilter, SearchConfig, Trainer,
    VocabularyEntry, Window, WordRepository,
};

#[derive(Parser, Debug)]
#[command(name = "wordwise", about = "Practise English vocabulary", version)]
pub struct Cli {
    /// Word list JSON file (`{"words": [...]}`); the bundled sample list is
    /// used when it cannot be read.
    #[arg(long, global = true, default_value = "vocabulary.json")]
    data: PathBuf,

    /// File holding the learned-word list.
    #[arg(long, global = true, default_value = "learned_words.json")]
    progress: PathBuf,

    /// Seed the random source for reproducible quizzes.
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Emit JSON instead of human-readable output.
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show how many words are learned.
    Stats,
    /// List words that occur more than once.
    Duplicates {
        /// Also check a phrasal-verb file.
        #[arg(long)]
        phrasal_verbs: Option<PathBuf>,
        /// Also check an idiom file.
        #[arg(long)]
        idioms: Option<PathBuf>,
    },
    /// Search every field of the word list.
    Search {
        query: String,
        /// Rank words by spelling similarity instead of substring match.
        #[arg(long)]
        fuzzy: bool,
        /// Minimum similarity (0.0 to 1.0) for fuzzy hits.
        #[arg(long)]
        min_score: Option<f64>,
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },
    /// Show the full entry for a word.
    Show {
        word: String,
        /// Phonetic accent: en-US or en-GB.
        #[arg(long, default_value = "en-GB")]
        accent: String,
    },
    /// List today's words.
    Window(WindowArgs),
    /// Walk through today's words, marking each known or not.
    Learn(WindowArgs),
    /// Toggle the learned state of a word.
    Mark { word: String },
    /// Type words from their meaning.
    Spell {
        #[arg(short, long, default_value_t = 5)]
        rounds: usize,
    },
    /// Recall today's words from their meaning.
    Write(WindowArgs),
    /// Multiple-choice quizzes.
    #[command(subcommand)]
    Quiz(QuizCommand),
}

#[derive(Args, Debug, Clone, Default)]
struct WindowArgs {
    /// Take the newest N words.
    #[arg(long, conflicts_with_all = ["from", "to"])]
    last: Option<usize>,
    /// First position counted from the newest word (1 = newest).
    #[arg(long, requires = "to")]
    from: Option<usize>,
    /// Last position counted from the newest word.
    #[arg(long, requires = "from")]
    to: Option<usize>,
}

impl WindowArgs {
    fn window(&self, default_count: usize) -> Window {
        match (self.last, self.from, self.to) {
            (_, Some(start), Some(end)) => Window::range(start, end),
            (Some(count), _, _) => Window::count(count),
            _ => Window::count(default_count),
        }
    }
}

#[derive(Subcommand, Debug)]
enum QuizCommand {
    /// Pick the meaning of a word.
    Meaning {
        #[arg(short = 'n', long)]
        size: Option<usize>,
    },
    /// Synonym and antonym questions.
    Relations {
        #[arg(short = 'n', long)]
        size: Option<usize>,
    },
    /// Practise today's words.
    Today {
        #[command(flatten)]
        window: WindowArgs,
        /// Ask synonym/antonym questions instead of meanings.
        #[arg(long, value_enum)]
        relations: Option<FilterArg>,
        /// Number of synonym/antonym questions.
        #[arg(short = 'n', long, default_value_t = 10)]
        count: usize,
    },
    /// Phrasal-verb quiz.
    Phrasal {
        #[arg(long, default_value = "phrasal_verbs.json")]
        file: PathBuf,
    },
    /// Idiom quiz.
    Idioms {
        #[arg(long, default_value = "idioms.json")]
        file: PathBuf,
    },
    /// Fill the gap in a collocation.
    Collocations {
        #[arg(long, default_value = "collocation.json")]
        file: PathBuf,
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum FilterArg {
    Both,
    Synonyms,
    Antonyms,
}

impl From<FilterArg> for RelationFilter {
    fn from(value: FilterArg) -> Self {
        match value {
            FilterArg::Both => RelationFilter::Both,
            FilterArg::Synonyms => RelationFilter::Synonyms,
            FilterArg::Antonyms => RelationFilter::Antonyms,
        }
    }
}

pub fn run() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let repository = WordRepository::load_or_sample(&cli.data);
    let store = ProgressStore::new(&cli.progress);
    let learned = store.load();
    let mut trainer = match cli.seed {
        Some(seed) => Trainer::seeded(repository, learned, seed),
        None => Trainer::new(repository, learned),
    };

    match cli.command {
        Command::Stats => handle_stats(&trainer, cli.json),
        Command::Duplicates {
            phrasal_verbs,
            idioms,
        } => handle_duplicates(
            trainer.repository(),
            phrasal_verbs.as_deref(),
            idioms.as_deref(),
            cli.json,
        ),
        Command::Search {
            query,
            fuzzy,
            min_score,
            limit,
        } => handle_search(trainer.repository(), &query, fuzzy, min_score, limit, cli.json),
        Command::Show { word, accent } => {
            handle_show(trainer.repository(), &word, &accent, cli.json)
        }
        Command::Window(args) => {
            let default = trainer.config().today_words;
            trainer.set_window(args.window(default));
            handle_window(&trainer, cli.json)
        }
        Command::Learn(args) => {
            let default = trainer.config().today_words;
            trainer.set_window(args.window(default));
            handle_learn(&mut trainer, &store)
        }
        Command::Mark { word } => handle_mark(&mut trainer, &store, &word),
        Command::Spell { rounds } => handle_spell(&mut trainer, &store, rounds),
        Command::Write(args) => {
            let default = trainer.config().today_words;
            trainer.set_window(args.window(default));
            handle_write(&trainer)
        }
        Command::Quiz(command) => handle_quiz(&mut trainer, command, cli.json),
    }
}

fn init_logging(verbosity: u8) -> Result<(), Box<dyn Error>> {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("wordwise={level},wordwise_rs={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(verbosity >= 2)
        .try_init()
        .map_err(|err| err.to_string())?;
    Ok(())
}

fn handle_stats<R: rand::RngCore>(trainer: &Trainer<R>, as_json: bool) -> Result<(), Box<dyn Error>> {
    let stats = trainer.statistics();
    if as_json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("Total words:   {}", stats.total_words);
        println!("Learned words: {}", stats.learned_words);
        println!("Progress:      {}%", stats.progress_percent);
    }
    Ok(())
}

fn handle_duplicates(
    repository: &WordRepository,
    phrasal_verbs: Option<&Path>,
    idioms: Option<&Path>,
    as_json: bool,
) -> Result<(), Box<dyn Error>> {
    let words = repository.duplicate_words();
    let verbs = match phrasal_verbs {
        Some(path) => Some(phrases::duplicate_phrasal_verbs(&phrases::read_phrasal_verbs(path)?)),
        None => None,
    };
    let idioms = match idioms {
        Some(path) => Some(phrases::duplicate_idioms(&phrases::read_idioms(path)?)),
        None => None,
    };

    if as_json {
        let payload = json!({
            "words": words,
            "phrasal_verbs": verbs,
            "idioms": idioms,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }
    print_duplicates("words", &words);
    if let Some(verbs) = verbs {
        print_duplicates("phrasal verbs", &verbs);
    }
    if let Some(idioms) = idioms {
        print_duplicates("idioms", &idioms);
    }
    Ok(())
}

fn print_duplicates(label: &str, keys: &std::collections::BTreeSet<String>) {
    if keys.is_empty() {
        println!("No duplicate {label}.");
    } else {
        println!("Duplicate {label} ({}):", keys.len());
        for key in keys {
            println!("  {key}");
        }
    }
}

fn handle_search(
    repository: &WordRepository,
    query: &str,
    fuzzy: bool,
    min_score: Option<f64>,
    limit: usize,
    as_json: bool,
) -> Result<(), Box<dyn Error>> {
    let limit = cmp::max(1, limit);
    let rows: Vec<(String, String, Option<f64>)> = if fuzzy {
        if query.trim().is_empty() {
            return Err("Fuzzy search needs a non-empty query".into());
        }
        let mut config = SearchConfig::default();
        if let Some(score) = min_score {
            config.min_score = score.clamp(0.0, 1.0);
        }
        repository
            .search_fuzzy(query, &config, limit)
            .into_iter()
            .filter_map(|hit| {
                let meaning = repository.get(hit.index)?.meaning.clone();
                Some((hit.word, meaning, Some(hit.score)))
            })
            .collect()
    } else {
        repository
            .search_contains(query)
            .into_iter()
            .take(limit)
            .map(|entry| (entry.word.clone(), entry.meaning.clone(), None))
            .collect()
    };

    if as_json {
        let payload = json!({
            "mode": if fuzzy { "fuzzy" } else { "substring" },
            "query": query,
            "limit": limit,
            "results": rows.iter().map(|(word, meaning, score)| {
                json!({"word": word, "meaning": meaning, "score": score})
            }).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        print_word_table(&format!("Matches for \"{}\":", query.trim()), &rows);
    }
    Ok(())
}

fn print_word_table(title: &str, rows: &[(String, String, Option<f64>)]) {
    if rows.is_empty() {
        println!("No words matched.");
        return;
    }
    let width = rows
        .iter()
        .map(|(word, _, _)| word.chars().count())
        .max()
        .unwrap_or(4)
        .max("WORD".len());
    println!("{title}");
    println!("{:<width$}  {}", "WORD", "MEANING", width = width);
    println!("{:-<width$}  {}", "", "-------", width = width);
    for (word, meaning, score) in rows {
        match score {
            Some(score) => println!("{:<width$}  {} ({score:.2})", word, meaning, width = width),
            None => println!("{:<width$}  {}", word, meaning, width = width),
        }
    }
}

fn handle_show(
    repository: &WordRepository,
    word: &str,
    accent: &str,
    as_json: bool,
) -> Result<(), Box<dyn Error>> {
    let accent = Accent::from_code(accent)
        .ok_or_else(|| format!("Unknown accent {accent:?}; use en-US or en-GB"))?;
    let entry = repository
        .find(word)
        .ok_or_else(|| format!("No entry found for word {word:?}"))?;

    if as_json {
        let mut payload = serde_json::to_value(entry)?;
        payload["pronunciation"] = json!(entry.phonetic_for(accent));
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        print_entry(entry, accent);
    }
    Ok(())
}

fn print_entry(entry: &VocabularyEntry, accent: Accent) {
    println!("{} {} ({accent})", entry.word, entry.phonetic_for(accent));
    if !entry.word_type.is_empty() {
        println!("Type: {}", entry.word_type);
    }
    if let Some(level) = &entry.level {
        println!("Level: {level}");
    }
    println!("Meaning: {}", entry.meaning);
    if !entry.example.is_empty() {
        println!("Example: {}", entry.example);
    }

    if !entry.definitions.is_empty() {
        let mut body = String::new();
        for definition in &entry.definitions {
            body.push_str(&format!(
                "* **{}** {}\n",
                definition.part_of_speech, definition.definition
            ));
            if !definition.example.is_empty() {
                body.push_str(&format!("  *{}*\n", definition.example));
            }
        }
        render_markdown_block("Definitions", &body);
    }

    let format_related = |related: &[wordwise_rs::RelatedWord]| {
        format_list(
            related
                .iter()
                .map(|r| {
                    if r.meaning.is_empty() {
                        r.word.clone()
                    } else {
                        format!("{} ({})", r.word, r.meaning)
                    }
                })
                .collect(),
            6,
        )
    };
    if let Some(synonyms) = format_related(&entry.synonyms) {
        println!("\nSynonyms: {synonyms}");
    }
    if let Some(antonyms) = format_related(&entry.antonyms) {
        println!("Antonyms: {antonyms}");
    }
    for (part, members) in &entry.word_family {
        if let Some(family) = format_related(members) {
            println!("Family [{part}]: {family}");
        }
    }
}

fn format_list(items: Vec<String>, limit: usize) -> Option<String> {
    if items.is_empty() {
        return None;
    }
    let truncated = items.len() > limit;
    let display = if truncated {
        &items[..limit]
    } else {
        &items[..]
    };
    let mut text = display.join(", ");
    if truncated {
        text.push_str(", …");
    }
    Some(text)
}

fn handle_window<R: rand::RngCore>(trainer: &Trainer<R>, as_json: bool) -> Result<(), Box<dyn Error>> {
    let words = trainer.today_words();
    let learned = trainer.learned();
    if as_json {
        let payload = json!({
            "window": trainer.window(),
            "words": words.iter().map(|entry| {
                json!({
                    "word": entry.word,
                    "meaning": entry.meaning,
                    "learned": learned.contains(&entry.word),
                })
            }).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }
    if words.is_empty() {
        println!("No words loaded.");
        return Ok(());
    }
    let width = words
        .iter()
        .map(|entry| entry.word.chars().count())
        .max()
        .unwrap_or(4)
        .max("WORD".len());
    println!("Today's words ({}):", words.len());
    for entry in words {
        let mark = if learned.contains(&entry.word) { "✓" } else { " " };
        println!("{mark} {:<width$}  {}", entry.word, entry.meaning, width = width);
    }
    Ok(())
}

fn handle_learn<R: rand::RngCore>(
    trainer: &mut Trainer<R>,
    store: &ProgressStore,
) -> Result<(), Box<dyn Error>> {
    let words = trainer.today_words().to_vec();
    if words.is_empty() {
        return Err("No words to learn".into());
    }
    let mut walk = LearnWalk::new(&words);
    while let Some(entry) = walk.current() {
        println!(
            "\n[{}/{}] {} {}",
            walk.position() + 1,
            walk.len(),
            entry.word,
            entry.phonetic_for(Accent::default())
        );
        println!("  {}", entry.meaning);
        if !entry.example.is_empty() {
            println!("  e.g. {}", entry.example);
        }
        let Some(answer) = prompt_line("Do you know this word? [y/n/q] ")? else {
            break;
        };
        match answer.to_lowercase().as_str() {
            "y" | "yes" => walk.mark_known(trainer.learned_mut()),
            "n" | "no" => walk.mark_unknown(),
            "q" | "quit" => break,
            _ => println!("Answer y, n or q."),
        }
    }
    save_progress(store, trainer.learned())?;

    let summary = walk.summary();
    println!(
        "\nKnown {} of {} ({}%). {}",
        summary.known,
        summary.total,
        summary.known_percent,
        summary.message()
    );
    Ok(())
}

fn handle_mark<R: rand::RngCore>(
    trainer: &mut Trainer<R>,
    store: &ProgressStore,
    word: &str,
) -> Result<(), Box<dyn Error>> {
    let word = trainer
        .repository()
        .find(word)
        .map(|entry| entry.word.clone())
        .ok_or_else(|| format!("No entry found for word {word:?}"))?;
    let learned = trainer.toggle_learned(&word);
    save_progress(store, trainer.learned())?;
    if learned {
        println!("Marked \"{word}\" as learned.");
    } else {
        println!("Removed \"{word}\" from learned words.");
    }
    Ok(())
}

fn handle_spell<R: rand::RngCore>(
    trainer: &mut Trainer<R>,
    store: &ProgressStore,
    rounds: usize,
) -> Result<(), Box<dyn Error>> {
    let mut correct = 0;
    let mut played = 0;
    for _ in 0..rounds {
        let index = trainer
            .next_practice_index()
            .ok_or("No words to practise")?;
        let Some(entry) = trainer.repository().get(index).cloned() else {
            break;
        };
        let kind = if entry.word_type.is_empty() {
            "N/A"
        } else {
            entry.word_type.as_str()
        };
        println!("\n{} ({kind})", entry.meaning);
        let outcome = loop {
            let Some(input) = prompt_line("Type the word: ")? else {
                save_progress(store, trainer.learned())?;
                return Ok(());
            };
            match trainer.check_practice_spelling(index, &input) {
                Some(SpellingOutcome::Empty) => {
                    println!("Please type a word.");
                }
                Some(outcome) => break outcome,
                None => break SpellingOutcome::Incorrect,
            }
        };
        played += 1;
        if outcome == SpellingOutcome::Correct {
            correct += 1;
            println!("Correct! {}", entry.phonetic_for(Accent::default()));
        } else {
            println!("Not quite: the word is \"{}\".", entry.word);
        }
    }
    save_progress(store, trainer.learned())?;
    println!("\nSpelled {correct} of {played} correctly.");
    Ok(())
}

fn handle_write<R: rand::RngCore>(trainer: &Trainer<R>) -> Result<(), Box<dyn Error>> {
    let mut session = trainer.start_today_writing();
    if session.is_empty() {
        return Err("No words to practise".into());
    }
    while let Some(entry) = session.current() {
        println!(
            "\n[{}/{}] {} [{}]",
            session.position() + 1,
            session.len(),
            entry.meaning,
            entry.word_type
        );
        let Some(input) = prompt_line("Word ('?' hint, '-' skip): ")? else {
            break;
        };
        match input.as_str() {
            "?" => match session.reveal_hint() {
                Some(hint) if !hint.is_empty() => println!("Hint: {hint}"),
                Some(_) => println!("No example sentence for this word."),
                None => println!("Hint already used."),
            },
            "-" => {
                if let Some(answer) = session.skip() {
                    println!("Skipped: {}", answer.word);
                }
            }
            _ => match session.submit(&input) {
                Some(answer) if answer.is_correct => println!("Correct! {}", answer.word),
                Some(answer) => println!("Wrong: the word is \"{}\".", answer.word),
                None => println!("Please type the English word."),
            },
        }
    }

    let summary = session.summary();
    println!(
        "\nCorrect {}, wrong {}, accuracy {}%. {}",
        summary.correct,
        summary.wrong,
        summary.accuracy,
        summary.band().message()
    );
    for answer in session.answers() {
        let typed = answer.user_answer.as_deref().unwrap_or("(skipped)");
        let mark = if answer.is_correct { "✓" } else { "✗" };
        let hint = if answer.hint_used { " (hint)" } else { "" };
        println!("{mark} {}: {typed}{hint}", answer.word);
    }
    Ok(())
}

fn handle_quiz<R: rand::RngCore>(
    trainer: &mut Trainer<R>,
    command: QuizCommand,
    as_json: bool,
) -> Result<(), Box<dyn Error>> {
    let session = match command {
        QuizCommand::Meaning { size } => {
            if let Some(size) = size {
                let mut config = trainer.config().clone();
                config.quiz_size = size;
                trainer.set_config(config);
            }
            trainer.start_meaning_quiz()?
        }
        QuizCommand::Relations { size } => {
            if let Some(size) = size {
                let mut config = trainer.config().clone();
                config.quiz_size = size;
                trainer.set_config(config);
            }
            trainer.start_syn_ant_quiz()?
        }
        QuizCommand::Today {
            window,
            relations,
            count,
        } => {
            let default = trainer.config().today_words;
            trainer.set_window(window.window(default));
            match relations {
                Some(filter) => trainer.start_today_syn_ant_quiz(filter.into(), count)?,
                None => trainer.start_today_practice()?,
            }
        }
        QuizCommand::Phrasal { file } => {
            let verbs: Vec<PhrasalVerb> = phrases::read_phrasal_verbs(&file)?;
            trainer.start_phrase_quiz(&verbs)?
        }
        QuizCommand::Idioms { file } => {
            let idioms: Vec<Idiom> = phrases::read_idioms(&file)?;
            trainer.start_phrase_quiz(&idioms)?
        }
        QuizCommand::Collocations { file, count } => {
            let sets: Vec<CollocationSet> = phrases::read_collocations(&file)?;
            if let Some(count) = count {
                let mut config = trainer.config().clone();
                config.collocation_questions = count;
                trainer.set_config(config);
            }
            trainer.start_collocation_quiz(&sets)?
        }
    };
    run_quiz(session, as_json)
}

fn run_quiz(mut session: QuizSession, as_json: bool) -> Result<(), Box<dyn Error>> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(session.items())?);
        return Ok(());
    }
    let total = session.len();
    while let Some(question) = session.current().cloned() {
        println!(
            "\nQuestion {}/{} [{}]",
            session.current_index() + 1,
            total,
            question.kind.label()
        );
        render_markdown_block("", &question.prompt);
        if question.is_multi_select {
            println!("(Select every correct option, e.g. A,C)");
        }
        for (index, option) in question.options.iter().enumerate() {
            println!("  {}. {option}", option_label(index));
        }
        let Some(line) = prompt_line("> ")? else {
            break;
        };
        let Some(selected) = parse_selection(&line, &question.options) else {
            println!("Pick options by letter, e.g. A or A,C.");
            continue;
        };
        if let Some(outcome) = session.submit(selected.as_slice()) {
            if outcome.correct {
                println!("Correct!");
            } else {
                println!("Wrong. Answer: {}", outcome.expected.join(", "));
            }
            if let Some(explanation) = outcome.explanation {
                println!("{explanation}");
            }
        }
        session.advance();
    }

    println!(
        "\nScore: {}/{} ({}%). {}",
        session.score(),
        total,
        session.percent(),
        session.band().message()
    );
    Ok(())
}

fn option_label(index: usize) -> char {
    u8::try_from(index)
        .ok()
        .filter(|i| *i < 26)
        .map(|i| char::from(b'A' + i))
        .unwrap_or('?')
}

/// Turns "a", "A,C", "1 3" into the matching option texts.
fn parse_selection(input: &str, options: &[String]) -> Option<Vec<String>> {
    let mut picked: Vec<String> = Vec::new();
    let tokens = input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty());
    for token in tokens {
        let index = match token.parse::<usize>() {
            Ok(number) => number.checked_sub(1)?,
            Err(_) => {
                let mut chars = token.chars();
                let letter = chars.next()?.to_ascii_uppercase();
                if chars.next().is_some() || !letter.is_ascii_uppercase() {
                    return None;
                }
                usize::from(letter as u8 - b'A')
            }
        };
        let option = options.get(index)?;
        if !picked.contains(option) {
            picked.push(option.clone());
        }
    }
    (!picked.is_empty()).then_some(picked)
}

fn prompt_line(label: &str) -> Result<Option<String>, Box<dyn Error>> {
    print!("{label}");
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn save_progress(store: &ProgressStore, learned: &LearnedSet) -> Result<(), Box<dyn Error>> {
    store.save(learned)?;
    Ok(())
}

fn stdout_is_tty() -> bool {
    atty::is(Stream::Stdout)
}

fn markdown_width() -> usize {
    let (width, _) = terminal_size();
    width.max(60) as usize
}

fn markdown_skin() -> MadSkin {
    MadSkin::default()
}

fn render_markdown_block(title: &str, body: &str) {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return;
    }
    if !title.is_empty() {
        println!("\n{title}:");
    }
    if stdout_is_tty() {
        let skin = markdown_skin();
        let formatted = FmtText::from(&skin, trimmed, Some(markdown_width()));
        println!("{formatted}");
    } else {
        println!("{trimmed}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<String> {
        ["alpha", "beta", "gamma", "delta"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    #[test]
    fn selection_accepts_letters_and_numbers() {
        assert_eq!(parse_selection("b", &options()), Some(vec!["beta".to_string()]));
        assert_eq!(
            parse_selection("A, c", &options()),
            Some(vec!["alpha".to_string(), "gamma".to_string()])
        );
        assert_eq!(parse_selection("4", &options()), Some(vec!["delta".to_string()]));
    }

    #[test]
    fn selection_rejects_out_of_range_input() {
        assert_eq!(parse_selection("e", &options()), None);
        assert_eq!(parse_selection("0", &options()), None);
        assert_eq!(parse_selection("ab", &options()), None);
        assert_eq!(parse_selection("  ", &options()), None);
    }

    #[test]
    fn window_args_prefer_range() {
        let args = WindowArgs {
            last: None,
            from: Some(2),
            to: Some(4),
        };
        assert_eq!(args.window(10), Window::range(2, 4));
        assert_eq!(WindowArgs::default().window(7), Window::count(7));
    }

    #[test]
    fn logging_init_reports_second_install_as_error() {
        let _ = init_logging(0);
        let err = init_logging(3).unwrap_err();
        assert!(!err.to_string().is_empty());
    }
}

use std::collections::HashSet;
use std::fmt;
use std::io::{BufRead, Write as _};
use std::path::PathBuf;
use std::sync::Arc;

use medq_core::model::{QuestionBank, QuestionRecord};
use services::{Clock, QuizService, QuizSession, SessionError};
use storage::FileStore;
use tracing::info;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  medq [--bank <questions.yaml>] [--data-dir <dir>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --bank questions.yaml");
    eprintln!("  --data-dir platform data directory");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  MEDQ_BANK, MEDQ_DATA_DIR");
}

struct Args {
    bank_path: PathBuf,
    data_dir: Option<PathBuf>,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut bank_path = std::env::var("MEDQ_BANK")
            .map_or_else(|_| PathBuf::from("questions.yaml"), PathBuf::from);
        let mut data_dir = std::env::var("MEDQ_DATA_DIR").ok().map(PathBuf::from);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--bank" => bank_path = PathBuf::from(require_value(args, "--bank")?),
                "--data-dir" => {
                    data_dir = Some(PathBuf::from(require_value(args, "--data-dir")?));
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            bank_path,
            data_dir,
        })
    }
}

/// Load and validate the question bank up front; until this succeeds there
/// is nothing to run, so a bad bank is a startup error rather than a
/// half-working quiz.
fn load_bank(path: &PathBuf) -> Result<Arc<QuestionBank>, Box<dyn std::error::Error>> {
    let raw = std::fs::read_to_string(path)
        .map_err(|err| format!("cannot read question bank {}: {err}", path.display()))?;
    let records: Vec<QuestionRecord> = serde_yaml::from_str(&raw)
        .map_err(|err| format!("question bank {} is not valid YAML: {err}", path.display()))?;
    let bank = QuestionBank::from_records(records)?;
    if bank.is_empty() {
        return Err(format!(
            "question bank {} has no text-only questions; nothing to quiz",
            path.display()
        )
        .into());
    }
    Ok(Arc::new(bank))
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let bank = load_bank(&args.bank_path)?;
    info!(questions = bank.len(), "question bank loaded");

    // Keep storage setup in the binary glue so core/services stay pure.
    let data_dir = args
        .data_dir
        .or_else(FileStore::default_dir)
        .unwrap_or_else(|| PathBuf::from(".medq-data"));
    let store = Arc::new(FileStore::open(data_dir)?);

    let service = QuizService::new(Clock::default_clock(), bank, store);

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    let mut selected: HashSet<String> = HashSet::new();

    loop {
        print_home(&service, &selected);
        let Some(command) = read_line(&mut lines)? else {
            return Ok(());
        };

        match command.as_str() {
            "q5" => run_quiz(&service, service.start_quick(5), &mut lines)?,
            "q10" => run_quiz(&service, service.start_quick(10), &mut lines)?,
            "f5" => run_quiz(&service, service.start_focused(&selected, 5), &mut lines)?,
            "f10" => run_quiz(&service, service.start_focused(&selected, 10), &mut lines)?,
            "w" => {
                selected = service.auto_select_weak(3).into_iter().collect();
            }
            "r" => {
                println!("Reset all local progress and stats? [y/N]");
                if let Some(answer) = read_line(&mut lines)? {
                    if answer.eq_ignore_ascii_case("y") {
                        service.stats().reset()?;
                        println!("Progress reset.");
                    }
                }
            }
            "x" | "quit" | "exit" => return Ok(()),
            raw => {
                // a bare number toggles the category shown at that row
                if let Ok(row) = raw.parse::<usize>() {
                    toggle_category(&service, &mut selected, row);
                } else if !raw.is_empty() {
                    println!("Unknown command: {raw}");
                }
            }
        }
    }
}

fn print_home(service: &QuizService, selected: &HashSet<String>) {
    let today = service.today();
    println!();
    println!(
        "Today: {}/{} correct ({}%)",
        today.correct, today.attempted, today.accuracy_percent
    );
    println!(
        "{} questions available (images excluded).",
        service.bank().len()
    );
    println!();
    println!("Categories (weakest first):");
    for (row, overview) in service.category_overview().iter().enumerate() {
        let mark = if selected.contains(&overview.category) {
            "[x]"
        } else {
            "[ ]"
        };
        let meta = match overview.accuracy_percent {
            Some(pct) => format!(
                "{pct}% - {}/{} correct",
                overview.correct, overview.attempted
            ),
            None => "no attempts yet".to_owned(),
        };
        println!("  {} {mark} {} ({meta})", row + 1, overview.category);
    }
    println!();
    println!("Commands: q5/q10 quick start, f5/f10 focused, <n> toggle category,");
    println!("          w auto-select weak, r reset stats, x quit");
    print!("> ");
    let _ = std::io::stdout().flush();
}

fn toggle_category(service: &QuizService, selected: &mut HashSet<String>, row: usize) {
    let rows = service.category_overview();
    let Some(overview) = row.checked_sub(1).and_then(|i| rows.get(i)) else {
        println!("No category at row {row}");
        return;
    };
    if !selected.remove(&overview.category) {
        selected.insert(overview.category.clone());
    }
}

fn run_quiz(
    service: &QuizService,
    session: Result<QuizSession, SessionError>,
    lines: &mut impl Iterator<Item = std::io::Result<String>>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = match session {
        Ok(session) => session,
        Err(SessionError::EmptyPool) => {
            println!("No questions available for the selected categories.");
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    loop {
        let item = session.current_item();
        let question = item.question();
        println!();
        println!(
            "[{}/{}] {} #{}",
            session.current_index() + 1,
            session.total(),
            question.category(),
            question
                .number()
                .map_or_else(|| "-".to_owned(), |n| n.to_string()),
        );
        println!("{}", question.question());
        for (i, option) in item.shuffled().options().iter().enumerate() {
            println!("  {}) {option}", i + 1);
        }

        let chosen = loop {
            print!("answer> ");
            let _ = std::io::stdout().flush();
            let Some(raw) = read_line(lines)? else {
                return Ok(());
            };
            match raw.parse::<usize>() {
                Ok(n) if (1..=item.shuffled().len()).contains(&n) => break n - 1,
                _ => println!("Pick a number between 1 and {}.", item.shuffled().len()),
            }
        };

        let result = service.submit_answer(&mut session, chosen);
        if result.was_correct {
            println!("Correct");
        } else {
            println!(
                "Incorrect - the answer was {}) {}",
                result.correct_index + 1,
                session.current_item().shuffled().options()[result.correct_index]
            );
        }
        if let Some(more) = session.current_item().question().more_information() {
            let more = more.trim();
            if !more.is_empty() {
                println!("{more}");
            }
        }

        if session.is_last() {
            break;
        }
        println!("(enter for next question, f to finish)");
        let Some(raw) = read_line(lines)? else {
            return Ok(());
        };
        if raw == "f" {
            break;
        }
        session.advance()?;
    }

    let summary = session.summary();
    println!();
    println!(
        "Done: {}/{} correct",
        summary.correct_count(),
        summary.total()
    );
    for row in summary.breakdown() {
        println!(
            "  {}: {}% - {}/{} correct",
            row.category, row.accuracy_percent, row.correct, row.attempted
        );
    }
    Ok(())
}

fn read_line(
    lines: &mut impl Iterator<Item = std::io::Result<String>>,
) -> Result<Option<String>, std::io::Error> {
    match lines.next() {
        Some(line) => Ok(Some(line?.trim().to_owned())),
        None => Ok(None),
    }
}

fn main() {
    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}

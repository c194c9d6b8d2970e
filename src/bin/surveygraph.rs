//! surveygraph CLI — load, inspect and walk graph-driven questionnaires.
//!
//! Usage:
//!   surveygraph validate [--survey path]
//!   surveygraph show [--survey path]
//!   surveygraph walk [--survey path] [--json] <answer>...
//!   surveygraph run [--survey path]

use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use surveygraph::definition::default_survey_path;
use surveygraph::{
    Answer, DefinitionError, NavigationEngine, NavigationError, PresentationEvent,
    PresentationPort, Question, QuestionType, RecordingPort, Survey, SurveyDefinition,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "surveygraph",
    version,
    about = "Graph-driven questionnaire engine"
)]
struct Cli {
    /// Path to a survey file (.yaml, .yml or .json)
    #[arg(long, global = true)]
    survey: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the survey and report any integrity fault
    Validate,
    /// List the survey's nodes and edges
    Show,
    /// Submit a scripted sequence of answers and print every event
    Walk {
        /// Print events as JSON lines
        #[arg(long)]
        json: bool,
        /// Answers: `text:<value>`, `first`, `second`, `none` or `both`
        #[arg(value_parser = parse_answer)]
        answers: Vec<Answer>,
    },
    /// Answer the survey interactively
    Run,
}

fn parse_answer(raw: &str) -> Result<Answer, String> {
    if let Some(text) = raw.strip_prefix("text:") {
        return Ok(Answer::text(text));
    }
    match raw {
        "first" | "1" => Ok(Answer::first()),
        "second" | "2" => Ok(Answer::second()),
        "none" => Ok(Answer::choice(false, false)),
        "both" => Ok(Answer::choice(true, true)),
        other => Err(format!(
            "unrecognised answer '{}': use text:<value>, first, second, none or both",
            other
        )),
    }
}

/// Load from `--survey`, else the user's config file, else the bundled sample
fn load_survey(path: Option<PathBuf>) -> Result<Survey, DefinitionError> {
    let path = path.or_else(|| default_survey_path().filter(|p| p.exists()));
    let definition = match path {
        Some(path) => SurveyDefinition::load(&path)?,
        None => SurveyDefinition::vat_registration()?,
    };
    Ok(definition.into_survey()?)
}

fn cmd_validate(survey: &Survey) -> i32 {
    println!(
        "Survey OK: {} questions, {} nodes, {} edges, starting at {}",
        survey.catalog().len(),
        survey.graph().node_count(),
        survey.graph().edge_count(),
        survey.graph().start_node().id
    );
    0
}

fn cmd_show(survey: &Survey) -> i32 {
    let graph = survey.graph();
    println!("{:<12}  {:<12}  {:<20}  LABEL", "NODE", "QUESTION", "TYPE");
    println!("{}", "-".repeat(72));
    for node in graph.nodes() {
        let Ok(question) = survey.catalog().find(&node.question) else {
            continue;
        };
        println!(
            "{:<12}  {:<12}  {:<20}  {}",
            node.id, question.id, question.question_type, question.label
        );
    }

    println!();
    println!("{:<12}  {:<12}  CONSTRAINT", "FROM", "TO");
    println!("{}", "-".repeat(72));
    for edge in graph.edges() {
        let constraint = edge.constraint.as_ref().map_or("(always)", |c| c.as_str());
        println!("{:<12}  {:<12}  {}", edge.source, edge.target, constraint);
    }
    0
}

fn print_event(event: &PresentationEvent, json: bool) {
    if json {
        match serde_json::to_string(event) {
            Ok(line) => println!("{}", line),
            Err(e) => eprintln!("Error: {}", e),
        }
        return;
    }
    match event {
        PresentationEvent::ShowQuestion { question } => match &question.options {
            Some([first, second]) => {
                println!("question {}: {} [{} / {}]", question.id, question.label, first, second)
            }
            None => println!("question {}: {}", question.id, question.label),
        },
        PresentationEvent::ShowError { message } => println!("error: {}", message),
    }
}

fn cmd_walk(survey: Survey, answers: &[Answer], json: bool) -> i32 {
    let mut engine = NavigationEngine::new(Arc::new(survey), RecordingPort::new());
    let mut failed = false;

    for event in engine.port_mut().drain() {
        print_event(&event, json);
    }
    for answer in answers {
        failed |= engine.submit(answer).is_err();
        for event in engine.port_mut().drain() {
            print_event(&event, json);
        }
    }

    if !json {
        println!("Finished at node {}", engine.current_node().id);
    }
    i32::from(failed)
}

/// Renders to the terminal
struct TerminalPort<W: Write> {
    out: W,
}

impl<W: Write> PresentationPort for TerminalPort<W> {
    fn show_question(&mut self, question: &Question) {
        let _ = writeln!(self.out, "\n{}", question.label);
        if let Some([first, second]) = &question.options {
            let _ = writeln!(self.out, "  1) {}\n  2) {}", first, second);
        }
    }

    fn show_error(&mut self, message: &str) {
        let _ = writeln!(self.out, "! {}", message);
    }
}

fn read_answer(question_type: QuestionType, line: &str) -> Answer {
    match question_type {
        QuestionType::Text => Answer::text(line),
        QuestionType::SingleChoicePair => Answer::choice(line == "1", line == "2"),
    }
}

fn cmd_run(survey: Survey) -> i32 {
    let port = TerminalPort { out: io::stdout() };
    let mut engine = NavigationEngine::new(Arc::new(survey), port);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        let _ = io::stdout().flush();

        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(e)) => {
                eprintln!("Error: {}", e);
                return 1;
            }
            None => return 0,
        };
        let line = line.trim();
        if line == "q" || line == "quit" {
            return 0;
        }

        let answer = read_answer(engine.current_question().question_type, line);
        let outcome = engine.submit(&answer).map(|_| ());
        if let Err(NavigationError::NoRoute { .. }) = outcome {
            if engine.is_terminal() {
                println!("End of survey.");
                return 0;
            }
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("surveygraph=warn")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let survey = match load_survey(cli.survey) {
        Ok(survey) => survey,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let code = match cli.command {
        Commands::Validate => cmd_validate(&survey),
        Commands::Show => cmd_show(&survey),
        Commands::Walk { json, answers } => cmd_walk(survey, &answers, json),
        Commands::Run => cmd_run(survey),
    };
    std::process::exit(code);
}

use std::io::{BufRead, Write};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};

use codexr::api::{AppState, create_router};
use codexr::assistant::{Assistant, AskOutcome, History};
use codexr::composer::BackendSelection;
use codexr::config::CONFIG;
use codexr::render::render_markdown;

#[derive(Parser)]
#[command(name = "codexr", about = "AR/VR development query assistant")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Answer a single question
    Ask {
        query: Vec<String>,
        /// mock, local[:model] or remote[:model]
        #[arg(short, long)]
        backend: Option<BackendSelection>,
        /// Print the raw answer JSON instead of markdown
        #[arg(long)]
        json: bool,
    },
    /// Show the category and estimated difficulty of a question
    Classify { query: Vec<String> },
    /// Run one of the built-in demo questions
    Demo {
        scenario: DemoScenario,
        #[arg(short, long)]
        backend: Option<BackendSelection>,
        #[arg(long)]
        json: bool,
    },
    /// Check whether a generation backend is usable
    Status {
        #[arg(short, long)]
        backend: Option<BackendSelection>,
    },
    /// Read questions from stdin, one per line
    Chat {
        #[arg(short, long)]
        backend: Option<BackendSelection>,
    },
    /// Serve the HTTP API
    Serve {
        #[arg(long)]
        addr: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum DemoScenario {
    Teleport,
    Multiplayer,
    Occlusion,
}

impl DemoScenario {
    fn query(self) -> &'static str {
        match self {
            DemoScenario::Teleport => "How do I add teleport locomotion in Unity VR?",
            DemoScenario::Multiplayer => "How do I set up multiplayer in Unreal VR?",
            DemoScenario::Occlusion => "Which shader works best for AR occlusion?",
        }
    }
}

fn join_query(words: Vec<String>) -> Result<String> {
    let query = words.join(" ");
    if query.trim().is_empty() {
        bail!("Please enter a query");
    }
    Ok(query)
}

fn print_outcome(outcome: &AskOutcome, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&outcome.answer)?);
    } else {
        println!("**Category:** {}\n", outcome.category);
        print!("{}", render_markdown(&outcome.answer, &outcome.query));
    }
    Ok(())
}

async fn chat(assistant: &Assistant, backend: &BackendSelection) -> Result<()> {
    let history = History::new();
    let stdin = std::io::stdin();
    eprintln!("Ask about Unity, Unreal or shaders. :history lists past questions, :quit exits.");
    loop {
        eprint!("> ");
        std::io::stderr().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        match line.trim() {
            "" => continue,
            ":quit" | ":q" => break,
            ":history" => {
                for entry in history.entries().await {
                    println!(
                        "{} [{}] {}",
                        entry.timestamp.format("%H:%M:%S"),
                        entry.category,
                        entry.query
                    );
                }
            }
            query => {
                let outcome = assistant.ask(query, backend).await;
                print_outcome(&outcome, false)?;
                history.push(outcome.to_history_entry()).await;
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber (handles both tracing and log crate)
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let assistant = Assistant::from_config()?;
    let pick = |backend: Option<BackendSelection>| {
        backend.unwrap_or_else(BackendSelection::configured_default)
    };

    match cli.command {
        Command::Ask {
            query,
            backend,
            json,
        } => {
            let query = join_query(query)?;
            let outcome = assistant.ask(&query, &pick(backend)).await;
            print_outcome(&outcome, json)?;
        }
        Command::Classify { query } => {
            let query = join_query(query)?;
            let info = assistant.info(&query);
            println!("Category: {}", info.category);
            println!("Estimated Difficulty: {}", info.estimated_difficulty);
        }
        Command::Demo {
            scenario,
            backend,
            json,
        } => {
            let outcome = assistant.ask(scenario.query(), &pick(backend)).await;
            print_outcome(&outcome, json)?;
        }
        Command::Status { backend } => {
            let status = assistant.status(&pick(backend)).await;
            let mark = if status.ready { "ready" } else { "unavailable" };
            println!("{}: {} ({})", status.backend, mark, status.detail);
            if !status.models.is_empty() {
                println!("Models available: {}", status.models.join(", "));
            }
        }
        Command::Chat { backend } => {
            chat(&assistant, &pick(backend)).await?;
        }
        Command::Serve { addr } => {
            let addr = addr.unwrap_or_else(|| CONFIG.bind_addr.clone());
            let state = Arc::new(AppState::new(
                Arc::new(assistant),
                BackendSelection::configured_default(),
            ));
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("Failed to bind {addr}"))?;
            tracing::info!("listening on {addr}");
            axum::serve(listener, create_router(state)).await?;
        }
    }
    Ok(())
}

//! `recall chat`: Interactive REPL or single-message mode.

use crate::commands::{load_config, open_store};
use crate::input;
use crate::repl::{self, Command};
use recall_core::error::{Error, MemoryError, Result};
use recall_core::message::Channel;
use recall_providers::ConfigConnector;
use recall_session::{AssessmentOutcome, GenerationSettings, Session};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

pub async fn run(
    api_key: Option<String>,
    ephemeral: bool,
    message: Option<String>,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    let store = open_store(&config, ephemeral)?;
    let connector = Arc::new(ConfigConnector::from_config(&config));
    let mut session = Session::new(store, connector, GenerationSettings::from(&config));

    if let Some(key) = api_key.or_else(|| config.credential()) {
        if let Err(e) = session.establish_credential(&key) {
            report(&e);
        }
    }

    if let Some(msg) = message {
        // Single message mode
        if !session.has_credential() {
            eprintln!();
            eprintln!("  ERROR: No API key configured!");
            eprintln!();
            eprintln!("  Pass one with --api-key, or set one of these environment variables:");
            eprintln!("    RECALL_API_KEY, GROQ_API_KEY, OPENAI_API_KEY");
            eprintln!();
            eprintln!("  Or add it to your config file:");
            eprintln!("    {}", recall_config::AppConfig::config_dir().join("config.toml").display());
            eprintln!();
            return Err("No API key found. See above for setup instructions.".into());
        }

        eprint!("  Thinking...");
        let response = session.chat(&msg).await;
        eprint!("\r              \r");
        println!("{}", response?);
        return Ok(());
    }

    // Interactive mode
    println!();
    println!("  ╔══════════════════════════════════════════════╗");
    println!("  ║          Recall — Interactive Mode           ║");
    println!("  ╚══════════════════════════════════════════════╝");
    println!();
    println!("  Provider:  {}", config.provider);
    println!("  Model:     {}", config.model);
    println!(
        "  Memory:    {} entries{}",
        session.memory().len(),
        if ephemeral { " (ephemeral)" } else { "" }
    );
    println!();
    if !session.has_credential() {
        println!("  No API key set. Enter one with /key KEY before chatting.");
    }
    println!("  Type your message and press Enter. /help lists commands.");
    println!("  Type 'exit' or Ctrl+D to quit.");
    println!();

    let mut rx = input::spawn_stdin_reader();

    print!("  You > ");
    std::io::stdout().flush()?;

    while let Some(line) = rx.recv().await {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                eprintln!("  [Input Error] {e}");
                break;
            }
        };

        match Command::parse(&line) {
            Ok(Some(Command::Exit)) => break,
            Ok(Some(command)) => {
                if let Err(e) = execute(&mut session, command).await {
                    report(&e);
                    println!();
                }
            }
            Ok(None) => {}
            Err(e) => eprintln!("  {e}"),
        }

        print!("  You > ");
        std::io::stdout().flush()?;
    }

    println!();
    println!("  Goodbye! 👋");
    println!();

    Ok(())
}

async fn execute(session: &mut Session, command: Command) -> Result<()> {
    match command {
        Command::Chat(text) => {
            let reply = thinking(session.chat(&text)).await?;
            print_reply("Assistant", &reply);
            after_exchange(session).await?;
        }
        Command::ChainOfThought(text) => {
            let reply = thinking(session.chain_of_thought(&text)).await?;
            print_reply("Chain of Thought", &reply);
            after_exchange(session).await?;
        }
        Command::WebSearch(text) => {
            let reply = thinking(session.web_search(&text)).await?;
            print_reply("Web Search", &reply);
            after_exchange(session).await?;
        }
        Command::Vision(url) => {
            let reply = thinking(session.analyze_image(&url)).await?;
            print_reply("Image Analysis", &reply);
        }
        Command::AddUrl(url) => {
            if session.add_url(&url)? {
                println!("  🔗 Added {url}");
            } else {
                println!("  {url} is already in the context list");
            }
        }
        Command::ListUrls => {
            if session.urls().is_empty() {
                println!("  No URLs added. Use /url URL.");
            }
            for (i, url) in session.urls().iter().enumerate() {
                println!("  {:>2}. {url}", i + 1);
            }
        }
        Command::Improve => {
            let report = thinking(session.self_improvement()).await?;
            print_reply("Self-Improvement Analysis", &report.analysis);
            print_reply("Action Items", &report.action_items);
            print_reply("Suggested Improvements", &report.suggested_improvements);
            println!("  Run /apply to record the suggestions.");
        }
        Command::Apply(Some(text)) => {
            session.apply_improvements(&text)?;
            println!("  ✅ Improvement recorded");
        }
        Command::Apply(None) => {
            session.apply_suggested()?;
            println!("  ✅ Suggested improvements recorded");
        }
        Command::Verify => {
            let improvements = session.verify_improvements();
            if improvements.is_empty() {
                println!("  No improvements recorded yet.");
            }
            for (i, improvement) in improvements.iter().enumerate() {
                println!("  {:>2}. {improvement}", i + 1);
            }
        }
        Command::Export(None) => println!("{}", session.export_memory()?),
        Command::Export(Some(path)) => {
            let json = session.export_memory()?;
            std::fs::write(&path, json).map_err(|e| storage_error(&path, e))?;
            println!("  📤 Exported memory to {}", path.display());
        }
        Command::Import(path) => {
            let json = std::fs::read_to_string(&path).map_err(|e| storage_error(&path, e))?;
            session.import_memory(&json)?;
            println!(
                "  📥 Imported {} entries from {}",
                session.memory().len(),
                path.display()
            );
        }
        Command::Clear(channel) => {
            session.clear(channel);
            println!("  🧹 Cleared {}", channel.title());
        }
        Command::History(channel) => print_history(session, channel),
        Command::Key(key) => {
            session.establish_credential(&key)?;
            if session.verify_credential().await? {
                println!("  ✅ API key accepted");
            } else {
                println!("  ⚠️  API key set, but the provider could not be reached");
            }
        }
        Command::Help => println!("{}", repl::HELP),
        Command::Exit => {}
    }
    Ok(())
}

/// Run the periodic check after a counted exchange.
async fn after_exchange(session: &mut Session) -> Result<()> {
    match session.periodic_assessment().await? {
        Some(AssessmentOutcome::Quick(text)) => print_reply("Quick Assessment", &text),
        Some(AssessmentOutcome::FullAnalysisDue) => {
            println!("  💡 A full self-improvement analysis is due. Run /improve.");
            println!();
        }
        None => {}
    }
    Ok(())
}

async fn thinking<T>(work: impl std::future::Future<Output = Result<T>>) -> Result<T> {
    eprint!("  ...");
    let result = work.await;
    eprint!("\r     \r");
    result
}

fn print_reply(label: &str, text: &str) {
    println!();
    for line in text.lines() {
        println!("  {label} > {line}");
    }
    println!();
}

fn print_history(session: &Session, channel: Channel) {
    let entries = session.entries(channel);
    println!("  {} ({} entries)", channel.title(), entries.len());
    for entry in entries {
        println!("    {}", entry.render());
    }
}

fn storage_error(path: &Path, e: std::io::Error) -> Error {
    MemoryError::Storage(format!("{}: {e}", path.display())).into()
}

/// Print one line for the user and log the detail.
fn report(error: &Error) {
    tracing::error!(%error, "Command failed");
    match error {
        Error::MissingCredential(_) => {
            eprintln!("  🔑 Please enter a valid API key with /key KEY");
        }
        e if e.is_format() => eprintln!("  Invalid memory file, nothing imported: {e}"),
        e => eprintln!("  [Error] {e}"),
    }
}

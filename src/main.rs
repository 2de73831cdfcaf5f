use anyhow::{anyhow, Result};
use bat::PrettyPrinter;
use clap::{Parser, Subcommand};
use cliclack::{input, spinner};
use console::style;
use dotenv::dotenv;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use fluentbot::config::{mask_secret, Settings};
use fluentbot::learning::{context_prefix, LearningContext, Level};
use fluentbot::providers::configs::{GeminiProviderConfig, OpenRouterProviderConfig, ProviderConfig};
use fluentbot::providers::factory::get_resolver;
use fluentbot::resolver::ReplySource;
use fluentbot::session::Session;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Language you are learning, e.g. French
    #[arg(short, long)]
    language: Option<String>,

    /// Your current level
    #[arg(long, value_enum, default_value_t = Level::Beginner)]
    level: Level,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Check that credentials are visible and optionally send a test message
    Check {
        /// Send "Hello, test message" through the provider chain
        #[arg(long)]
        ping: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Ok(path) = dotenv() {
        debug!("Loaded environment from {:?}", path);
    }

    let cli = Cli::parse();
    let settings = Settings::new()?;

    match cli.command {
        Some(Command::Check { ping }) => check(settings, ping),
        None => {
            let context = cli
                .language
                .map(|language| LearningContext::new(language, cli.level));
            chat(&settings, context.as_ref())
        }
    }
}

fn chat(settings: &Settings, context: Option<&LearningContext>) -> Result<()> {
    let resolver = get_resolver(settings)?;
    debug!(providers = ?resolver.provider_names(), "Provider chain ready");
    let prefix = context_prefix(context);
    let mut session = Session::new();

    let label = context
        .map(|c| format!("{} - {}", c.language, c.level))
        .unwrap_or_else(|| "General Chat".to_string());
    println!(
        "FluentBot {} {}",
        style(label).cyan(),
        style("- type \"exit\" to end, \"reset\" to start over, \"stats\" for progress").dim()
    );
    println!("\n");

    loop {
        let message_text: String = input("Message:")
            .placeholder("Ask about grammar, vocabulary, or start a conversation practice!")
            .interact()?;
        let trimmed = message_text.trim();

        if trimmed.is_empty() {
            continue;
        }
        if trimmed.eq_ignore_ascii_case("exit") {
            break;
        }
        if trimmed.eq_ignore_ascii_case("reset") {
            session.reset();
            println!("{}\n", style("Conversation cleared.").dim());
            continue;
        }
        if trimmed.eq_ignore_ascii_case("stats") {
            let stats = session.stats();
            println!(
                "Total messages: {}  Your questions: {}  AI responses: {}\n",
                stats.total, stats.user, stats.assistant
            );
            continue;
        }

        let spin = spinner();
        spin.start("Thinking...");
        let reply = session.exchange(&resolver, &message_text, &prefix);
        spin.stop("");

        render(&reply)?;
        println!("\n");
    }
    Ok(())
}

fn check(settings: Settings, ping: bool) -> Result<()> {
    let openrouter = OpenRouterProviderConfig::from_env()?;
    let gemini = GeminiProviderConfig::from_env()?;

    println!("{}", style("Credential check").bold());
    for (var, key) in [
        ("OPENROUTER_API_KEY", openrouter.api_key.as_deref()),
        ("GEMINI_API_KEY", gemini.api_key.as_deref()),
    ] {
        match key {
            Some(key) => println!("  {} {}: {}", style("✔").green(), var, mask_secret(key)),
            None => println!("  {} {}: not set", style("✘").red(), var),
        }
    }

    if !ping {
        return Ok(());
    }

    // Diagnostics should reach the secondary provider even without the primary key
    let settings = Settings {
        require_primary_credential: false,
        ..settings
    };
    let resolver = get_resolver(&settings)?;
    let resolution = resolver.resolve_detailed("Hello, test message", &[], "");

    match resolution.source {
        ReplySource::Provider(name) => {
            println!("  {} API call answered by {}", style("✔").green(), name)
        }
        ReplySource::Fallback => {
            println!("  {} every provider failed, got the fallback reply", style("✘").red())
        }
    }
    let preview: String = resolution.reply.chars().take(100).collect();
    println!("  Response preview: {}...", preview);
    Ok(())
}

fn render(content: &str) -> Result<()> {
    PrettyPrinter::new()
        .input_from_bytes(content.as_bytes())
        .language("markdown")
        .print()
        .map_err(|e| anyhow!("Failed to render reply: {}", e))?;
    Ok(())
}

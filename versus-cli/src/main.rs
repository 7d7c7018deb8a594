//! Versus CLI — terminal front end for the Versus comparison core.
//!
//! Plays the role of the rendering layer: reacts to session state changes
//! by switching what is on screen, then prints the structured comparison
//! or the user-facing error message.

use async_trait::async_trait;
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use versus_core::client::{DEFAULT_ENDPOINT, DEFAULT_MODEL, PollinationsClient};
use versus_core::error::SessionError;
use versus_core::pipeline::ComparisonPipeline;
use versus_core::session::{Session, SessionObserver, SessionState};
use versus_core::types::{ComparisonResult, ProductOverview, ProsCons, Winner};

/// Versus: AI-powered product comparison from the terminal
#[derive(Parser, Debug)]
#[command(name = "versus", version, about, long_about = None)]
struct Cli {
    /// First product URL
    url1: String,

    /// Second product URL
    url2: String,

    /// Generative-text endpoint
    #[arg(long, env = "VERSUS_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Model name sent to the endpoint
    #[arg(long, env = "VERSUS_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long)]
    quiet: bool,
}

/// Observer that narrates section switches on stderr.
struct SectionObserver;

#[async_trait]
impl SessionObserver for SectionObserver {
    async fn on_state_change(&self, state: &SessionState) {
        match state {
            SessionState::Loading => eprintln!("Analyzing products with AI..."),
            SessionState::Result(_) => eprintln!("Analysis complete.\n"),
            SessionState::Error(_) | SessionState::Input => {}
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    let client = Arc::new(PollinationsClient::with_endpoint(cli.endpoint, cli.model));
    let pipeline = Arc::new(ComparisonPipeline::new(client));
    let (mut session, mut outcomes) = Session::new(pipeline, Arc::new(SectionObserver));

    if let Err(err) = session.submit(&cli.url1, &cli.url2).await {
        match err {
            SessionError::Validation(v) => anyhow::bail!("{}", v.user_message()),
            other => anyhow::bail!("{other}"),
        }
    }

    let outcome = outcomes
        .recv()
        .await
        .ok_or_else(|| anyhow::anyhow!("run outcome channel closed unexpectedly"))?;
    session.handle_outcome(outcome).await;

    match session.state() {
        SessionState::Result(result) => {
            render_result(&cli.url1, &cli.url2, result);
            Ok(())
        }
        SessionState::Error(message) => anyhow::bail!("{message}"),
        other => anyhow::bail!("session ended in unexpected state: {other:?}"),
    }
}

fn render_result(url1: &str, url2: &str, result: &ComparisonResult) {
    render_product("Product 1", url1, &result.overview.product1);
    render_product("Product 2", url2, &result.overview.product2);

    println!("## Analysis\n\n{}\n", result.analysis);

    render_pros_cons("Product 1", &result.pros_cons.product1);
    render_pros_cons("Product 2", &result.pros_cons.product2);

    let winner = match result.recommendation.winner {
        Winner::Product1 => "Product 1",
        Winner::Product2 => "Product 2",
        Winner::Tie => "Tie",
    };
    println!("## Recommendation\n");
    println!("Winner:     {winner}");
    println!("Confidence: {}%", result.recommendation.confidence);
    println!("Reason:     {}\n", result.recommendation.reason);

    println!("## Customer sentiment\n");
    println!("Product 1: {}", result.customer_sentiment.product1);
    println!("Product 2: {}", result.customer_sentiment.product2);
}

fn render_product(label: &str, url: &str, overview: &ProductOverview) {
    println!("## {label}: {}\n", overview.name);
    println!("URL:   {url}");
    println!("Price: {}", overview.price_range);
    if !overview.key_features.is_empty() {
        println!("Key features:");
        for feature in &overview.key_features {
            println!("  - {feature}");
        }
    }
    println!();
}

fn render_pros_cons(label: &str, pros_cons: &ProsCons) {
    println!("## {label} pros & cons\n");
    for pro in &pros_cons.pros {
        println!("  + {pro}");
    }
    for con in &pros_cons.cons {
        println!("  - {con}");
    }
    println!();
}

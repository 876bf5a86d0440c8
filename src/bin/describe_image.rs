//! Command-line client for the alt-text relay.
//!
//! Runs the same acquisition/validation and submission pipeline the web page
//! uses, against a running relay server.

use alttext_generator::acquire;
use alttext_generator::models::{AltTextOutcome, ImageSource};
use alttext_generator::orchestrate::Orchestrator;
use alttext_generator::relay::HttpRelayClient;
use anyhow::Result;
use clap::Parser;
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "describe_image")]
#[command(about = "Generate alt text for a local image or an image URL")]
struct CliArgs {
    /// Path to a .jpg/.jpeg/.png file, or an image URL.
    source: String,

    /// Base URL of a running relay server.
    #[arg(long, default_value = "http://localhost:3000")]
    relay: String,
}

fn looks_like_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "alttext_generator=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();

    let source: ImageSource = if looks_like_url(&args.source) {
        acquire::remote_image(&args.source)?
    } else {
        acquire::uploaded_image(Path::new(&args.source)).await?
    };

    let orchestrator = Orchestrator::new(Box::new(HttpRelayClient::new(args.relay)));

    match orchestrator.submit(source).await {
        AltTextOutcome::Success { alt_text } => {
            println!("{}", alt_text);
            Ok(())
        }
        AltTextOutcome::Failure { message } => {
            eprintln!("{}", message);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::looks_like_url;

    #[test]
    fn test_looks_like_url() {
        assert!(looks_like_url("https://example.com/photo.png"));
        assert!(looks_like_url("http://example.com/photo.jpg"));
        assert!(!looks_like_url("photos/cat.png"));
        assert!(!looks_like_url("cat.png"));
    }
}

//! Decomp CLI - Command-line interface
//!
//! Usage:
//!   decomp analyze <request.json>
//!   decomp tokens <sentence.json>
//!   decomp split <sentence text>

use anyhow::Context;
use clap::{Parser, Subcommand};
use decomp_core::{Keyword, PreprocessingInfo, Sentence, SentenceContext};
use decomp_engine::{DecompositionEngine, EnumerationSplitter};
use serde::Deserialize;

#[derive(Parser)]
#[command(name = "decomp")]
#[command(about = "Sentence decomposition engine CLI")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze an annotated sentence with keywords from a request file
    Analyze {
        /// Path to a JSON request (sentence, keywords, preprocessing, context)
        file: String,
    },
    /// Print the annotated tokens of a sentence as a table
    Tokens {
        /// Path to a JSON token array
        file: String,
    },
    /// Split an enumeration sentence into keyword items
    Split {
        /// Sentence text
        text: Vec<String>,
    },
}

/// On-disk analyze request, same shape as the API body
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeRequest {
    sentence: Sentence,
    keywords: Vec<Keyword>,
    #[serde(default)]
    preprocessing: PreprocessingInfo,
    #[serde(default)]
    context: SentenceContext,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze { file } => {
            let content = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {file}"))?;
            let request: AnalyzeRequest =
                serde_json::from_str(&content).context("invalid analyze request")?;

            let engine = DecompositionEngine::new();
            let records = engine.analyze(
                &request.sentence,
                &request.keywords,
                &request.preprocessing,
                &request.context,
            );
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        Commands::Tokens { file } => {
            let content = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {file}"))?;
            let sentence: Sentence =
                serde_json::from_str(&content).context("invalid token array")?;

            println!(
                "{:<5} {:<16} {:<6} {:<6} {:<10} {:<5} conjuncts",
                "idx", "text", "pos", "tag", "dep", "head"
            );
            for token in sentence.iter() {
                let conjuncts = token
                    .conjuncts
                    .iter()
                    .map(|i| i.to_string())
                    .collect::<Vec<_>>()
                    .join(",");
                println!(
                    "{:<5} {:<16} {:<6} {:<6} {:<10} {:<5} {}",
                    token.index, token.text, token.pos, token.tag, token.dep, token.head,
                    conjuncts
                );
            }
        }
        Commands::Split { text } => {
            let sentence = text.join(" ");
            let result = EnumerationSplitter::new().split(&sentence);
            println!("category: {}", result.category.as_str());
            println!("keywords:");
            for keyword in &result.keywords {
                println!("  - {keyword}");
            }
            if !result.long_phrases.is_empty() {
                println!("long phrases:");
                for phrase in &result.long_phrases {
                    println!("  - {phrase}");
                }
            }
        }
    }

    Ok(())
}

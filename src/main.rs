use anyhow::Context;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use truthlens::models::FactCheckResult;
use truthlens::providers::ElevenLabsSpeech;
use truthlens::speech::speak_result;
use truthlens::{Settings, TruthLens};

#[derive(Parser)]
#[command(name = "truthlens", version, about = "Fact-check posts and detect AI-generated media")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fact-check a post and print the verdict.
    Check {
        text: String,
        /// Print the raw JSON result.
        #[arg(long)]
        json: bool,
    },
    /// Check whether an image or video is AI-generated.
    Media {
        url: String,
        #[arg(long, default_value = "image")]
        media_type: String,
    },
    /// Fact-check a post and write the spoken summary as MP3.
    Speak {
        text: String,
        #[arg(long, short)]
        out: PathBuf,
    },
}

fn print_result(result: &FactCheckResult) {
    println!("{} ({:.0}%)", result.label, result.confidence * 100.0);
    println!("{}", result.explanation);
    if let Some(bias) = &result.bias {
        println!("bias: {}", bias.as_str());
    }
    for (i, source) in result.sources.iter().enumerate() {
        match &source.published_age {
            Some(age) => println!("  [{}] {} <{}> ({age})", i + 1, source.title, source.url),
            None => println!("  [{}] {} <{}>", i + 1, source.title, source.url),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = Settings::from_env()?;
    let lens = TruthLens::from_settings(&settings)?;

    match cli.command {
        Command::Check { text, json } => {
            let result = lens.fact_check.run_fact_check(&text).await;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_result(&result);
            }
        }
        Command::Media { url, media_type } => {
            let result = lens.media.run_media_check(&url, &media_type).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::Speak { text, out } => {
            let speech = ElevenLabsSpeech::from_settings(&settings.speech)?;
            let result = lens.fact_check.run_fact_check(&text).await;
            print_result(&result);
            let audio = lens
                .pool
                .run(settings.speech.timeout, speak_result(&speech, text.trim(), &result))
                .await?;
            fs::write(&out, audio).with_context(|| format!("writing {}", out.display()))?;
            println!("wrote {}", out.display());
        }
    }
    Ok(())
}

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use crossterm::style::{style, Stylize};
use ns_core::{ArticleInput, LengthBounds, ModelChoice};
use ns_fetcher::{init_logging, ArticleFetcher, FetchConfig, SummaryJob, SummaryPipeline, SummaryReport};
use ns_inference::{create_model, Backend, Config, SummarizationClient};
use tracing::{info, Level};

#[derive(Debug, Clone, Copy, PartialEq)]
struct HumanDuration(Duration);

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        // A bare number means seconds
        if let Ok(secs) = s.parse::<u64>() {
            return Ok(HumanDuration(Duration::from_secs(secs)));
        }
        humantime::parse_duration(s)
            .map(HumanDuration)
            .map_err(|e| format!("Invalid duration {:?}: {}", s, e))
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Summarize news articles with hosted models", long_about = None)]
struct Cli {
    /// Summarization backend
    #[arg(long, value_enum, default_value_t = Backend::HuggingFace, global = true)]
    backend: Backend,
    /// API key for the inference endpoint
    #[arg(long, env = "HUGGINGFACE_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,
    /// Base URL of the inference endpoint
    #[arg(long, env = "NS_INFERENCE_URL", global = true)]
    endpoint: Option<String>,
    /// Timeout for summarization calls (e.g. 30s, 1m)
    #[arg(long, default_value = "30s", global = true)]
    timeout: HumanDuration,
    /// Timeout for article downloads
    #[arg(long, default_value = "10s", global = true)]
    fetch_timeout: HumanDuration,
    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Summarize an article from a URL, pasted text or a file
    Summarize {
        #[arg(long, conflicts_with_all = ["text", "file"])]
        url: Option<String>,
        #[arg(long, conflicts_with = "file")]
        text: Option<String>,
        /// Read the article text from a file
        #[arg(long)]
        file: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = ModelChoice::Bart)]
        model: ModelChoice,
        #[arg(long, default_value_t = LengthBounds::DEFAULT_MIN_LENGTH)]
        min_length: u32,
        #[arg(long, default_value_t = LengthBounds::DEFAULT_MAX_LENGTH)]
        max_length: u32,
        /// Highlight the most important sentence
        #[arg(long)]
        highlight: bool,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// List available models
    Models,
    /// Serve the JSON API
    Serve {
        #[arg(long, default_value = "127.0.0.1:8080")]
        addr: SocketAddr,
    },
}

fn inference_config(cli: &Cli) -> Config {
    let mut config = Config::from_env()
        .with_backend(cli.backend)
        .with_timeout(cli.timeout.0);
    if let Some(key) = &cli.api_key {
        config = config.with_api_key(key.clone());
    }
    if let Some(endpoint) = &cli.endpoint {
        config = config.with_endpoint(endpoint.clone());
    }
    config
}

fn build_pipeline(cli: &Cli) -> anyhow::Result<SummaryPipeline> {
    let model = create_model(&inference_config(cli)).context("failed to initialize summarization model")?;
    info!("🧠 Summarization model initialized (using {})", model.name());

    let fetcher = ArticleFetcher::new(FetchConfig {
        timeout: cli.fetch_timeout.0,
        ..FetchConfig::default()
    })
    .context("failed to initialize article fetcher")?;

    Ok(SummaryPipeline::new(fetcher, SummarizationClient::new(model)))
}

fn print_report(report: &SummaryReport) {
    println!("{}", style("📰 Article").bold());
    println!("{}\n", report.article_preview);
    println!("{}", style("✍️ Summary").bold());
    match report
        .highlight
        .as_deref()
        .and_then(|sentence| report.summary.find(sentence).map(|start| (start, sentence)))
    {
        Some((start, sentence)) => {
            let end = start + sentence.len();
            println!(
                "{}{}{}",
                &report.summary[..start],
                style(sentence).black().on_yellow(),
                &report.summary[end..]
            );
        }
        None => println!("{}", report.summary),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(if cli.verbose { Level::DEBUG } else { Level::INFO });

    match &cli.command {
        Commands::Models => {
            for model in ModelChoice::ALL {
                println!("{:<10} {:<26} {}", model.key(), model.model_id(), model.label());
                println!("{:<10} {}", "", model.description());
            }
        }
        Commands::Summarize {
            url,
            text,
            file,
            model,
            min_length,
            max_length,
            highlight,
            json,
        } => {
            LengthBounds::check(*min_length, *max_length)?;
            let text = match file {
                Some(path) => Some(
                    tokio::fs::read_to_string(path)
                        .await
                        .with_context(|| format!("failed to read {}", path.display()))?,
                ),
                None => text.clone(),
            };
            if url.is_none() && text.is_none() {
                bail!("pass --url, --text or --file");
            }
            let input = ArticleInput::from_parts(url.clone(), text)?;
            let pipeline = build_pipeline(&cli)?;

            info!("⏳ Fetching and summarizing {}", input.describe());
            let report = pipeline
                .run(SummaryJob {
                    input,
                    model_id: model.model_id().to_string(),
                    min_length: *min_length,
                    max_length: *max_length,
                    highlight: *highlight,
                })
                .await?;

            if *json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
        }
        Commands::Serve { addr } => {
            let pipeline = build_pipeline(&cli)?;
            ns_web::serve(ns_web::AppState { pipeline }, *addr).await?;
        }
    }

    Ok(())
}

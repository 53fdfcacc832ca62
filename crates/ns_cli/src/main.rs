use clap::Parser;
use ns_core::logging::init_logging;
use ns_core::{Config, NarrationStyle, NewsReport, Result};
use ns_sources::NewsManager;
use ns_web::AppState;
use std::fmt::Write as _;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone, Copy)]
struct HumanDuration(Duration);

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut total_millis = 0u64;
        let mut current_number = String::new();
        let mut has_unit = false;
        let mut chars = s.chars().peekable();

        while let Some(c) = chars.next() {
            if c.is_ascii_digit() {
                current_number.push(c);
            } else if !current_number.is_empty() {
                let num = current_number
                    .parse::<u64>()
                    .map_err(|_| "Invalid number in duration".to_string())?;
                let factor = match c {
                    'm' if chars.peek() == Some(&'s') => {
                        chars.next();
                        1
                    }
                    's' => 1_000,
                    'm' => 60_000,
                    'h' => 3_600_000,
                    _ => return Err(format!("Invalid duration unit: {}", c)),
                };
                total_millis = num
                    .checked_mul(factor)
                    .and_then(|millis| total_millis.checked_add(millis))
                    .ok_or_else(|| "Duration too large".to_string())?;
                current_number.clear();
                has_unit = true;
            } else if !c.is_whitespace() {
                return Err(format!("Invalid character in duration: {}", c));
            }
        }

        // A bare number is taken as seconds
        if !current_number.is_empty() {
            let num = current_number
                .parse::<u64>()
                .map_err(|_| "Invalid number in duration".to_string())?;
            total_millis = num
                .checked_mul(1_000)
                .and_then(|millis| total_millis.checked_add(millis))
                .ok_or_else(|| "Duration too large".to_string())?;
            has_unit = true;
        }

        if !has_unit {
            return Err("Duration must include a number".to_string());
        }

        Ok(HumanDuration(Duration::from_millis(total_millis)))
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Company news sentiment, comparison and narration", long_about = None)]
pub struct Cli {
    #[arg(long, env = "NEWSAPI_KEY", hide_env_values = true)]
    newsapi_key: Option<String>,
    #[arg(long, env = "GNEWS_KEY", hide_env_values = true)]
    gnews_key: Option<String>,
    #[arg(long, default_value = "data", help = "Directory audio artifacts are written to")]
    audio_dir: PathBuf,
    #[arg(long, default_value = "hi", help = "Language the narration is translated to and spoken in")]
    language: String,
    #[arg(long, value_enum, default_value_t = NarrationStyle::Summaries)]
    narration: NarrationStyle,
    #[arg(long, default_value = "10s", help = "Per-provider timeout (e.g. 10s, 500ms, 1m)")]
    provider_timeout: HumanDuration,
    #[arg(long, default_value_t = 10, help = "Articles kept per provider")]
    max_articles: usize,
    #[arg(long, help = "JSON topic table replacing the built-in taxonomy")]
    topics: Option<PathBuf>,
    #[arg(long, help = "JSON array of raw provider records served as an extra provider")]
    fixtures: Option<PathBuf>,
    #[arg(long, help = "Skip translation and speech services")]
    offline: bool,
    #[arg(long, default_value = "info")]
    log_level: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API
    Serve {
        #[arg(long, default_value = "127.0.0.1:8000")]
        bind: SocketAddr,
    },
    /// Analyze coverage of a company and print the result
    Analyze {
        company: String,
        /// Print the raw JSON payload
        #[arg(long)]
        json: bool,
    },
    /// Render text to speech without translation
    Speak {
        text: String,
    },
    /// Print the active topic table
    Topics,
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            newsapi_key: self.newsapi_key.clone(),
            gnews_key: self.gnews_key.clone(),
            audio_dir: self.audio_dir.clone(),
            language: self.language.clone(),
            narration: self.narration,
            provider_timeout: self.provider_timeout.0,
            max_articles: self.max_articles,
            topics_file: self.topics.clone(),
            fixture_file: self.fixtures.clone(),
            offline: self.offline,
        }
    }
}

fn render_report(report: &NewsReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "📢 News for {}", report.company);

    for article in &report.articles {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", article.title);
        if let Some(source) = &article.source {
            let _ = writeln!(out, "  Source: {}", source);
        }
        let _ = writeln!(out, "  {}", article.summary);
        let _ = writeln!(out, "  Sentiment: {}", article.sentiment);
        let _ = writeln!(out, "  Topics: {}", article.topics.join(", "));
    }

    let comparative = &report.comparative;
    let distribution = &comparative.distribution;
    let _ = writeln!(out, "\n📊 Sentiment Distribution");
    let _ = writeln!(
        out,
        "  Positive: {} | Negative: {} | Neutral: {}",
        distribution.positive, distribution.negative, distribution.neutral
    );

    let _ = writeln!(out, "\n⚖️ Coverage Differences");
    for diff in &comparative.coverage_differences {
        let _ = writeln!(out, "  Comparison: {}", diff.comparison);
        let _ = writeln!(out, "  Impact: {}", diff.impact);
    }

    let overlap = &comparative.topic_overlap;
    let _ = writeln!(out, "\n🔍 Topic Overlap");
    let _ = writeln!(out, "  Common Topics: {}", overlap.common.join(", "));
    let _ = writeln!(out, "  Unique in Article 1: {}", overlap.unique_to_first.join(", "));
    let _ = writeln!(out, "  Unique in Article 2: {}", overlap.unique_to_second.join(", "));

    if !comparative.unique_topics.is_empty() {
        let _ = writeln!(out, "\n🧩 Unique Topics");
        for (article, topics) in comparative.unique_topics.iter() {
            let _ = writeln!(out, "  Article {}: {}", article, topics.join(", "));
        }
    }

    let _ = writeln!(out, "\n🔥 Final Sentiment Analysis: {}", report.final_sentiment);
    match &report.audio_file {
        Some(path) => {
            let _ = writeln!(out, "🔊 Audio summary: {}", path);
        }
        None => {
            let _ = writeln!(out, "🔇 Audio summary unavailable");
        }
    }
    out
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let config = cli.config();
    let manager = NewsManager::from_config(&config)?;
    info!("🦗 Providers initialized: {}", manager.provider_names().join(", "));

    match cli.command {
        Commands::Serve { bind } => {
            let state = AppState {
                manager: Arc::new(manager),
            };
            ns_web::serve(state, bind).await?;
        }
        Commands::Analyze { company, json } => match manager.analyze(&company).await {
            Ok(report) if json => println!("{}", serde_json::to_string_pretty(&report)?),
            Ok(report) => print!("{}", render_report(&report)),
            Err(e) => {
                eprintln!("❌ {}", e);
                std::process::exit(1);
            }
        },
        Commands::Speak { text } => {
            let path = manager.synthesize(&text).await?;
            println!("{}", path);
        }
        Commands::Topics => {
            for rule in manager.topics().rules() {
                println!("{}: {}", rule.name, rule.keywords.join(", "));
            }
        }
    }

    Ok(())
}

//! Argument parsing and output formatting.

use anyhow::Context;
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;

use ddgs::{ClientConfig, SafeSearch, SearchOptions, SearchResult, TimeLimit, DDGS};

/// Search DuckDuckGo and print the results.
#[derive(Debug, Parser)]
#[command(name = "ddgs", version, about)]
pub struct Cli {
    /// Search keywords.
    #[arg(required = true)]
    pub keywords: Vec<String>,

    /// Region code, e.g. wt-wt, us-en, uk-en.
    #[arg(short, long, env = "DDGS_REGION")]
    pub region: Option<String>,

    /// Safe search level: on, moderate or off.
    #[arg(short, long, env = "DDGS_SAFESEARCH")]
    pub safesearch: Option<SafeSearch>,

    /// Time limit: d, w, m, y or none.
    #[arg(short, long)]
    pub timelimit: Option<TimeLimit>,

    /// Backend: api, html or lite.
    #[arg(short, long, default_value = "api", env = "DDGS_BACKEND")]
    pub backend: String,

    /// Per-attempt request timeout in milliseconds.
    #[arg(long, env = "DDGS_TIMEOUT_MS")]
    pub timeout_ms: Option<u64>,

    /// JSON client configuration file.
    #[arg(short, long, env = "DDGS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print at most this many results.
    #[arg(short = 'n', long)]
    pub max_results: Option<usize>,

    /// Print results as a JSON array.
    #[arg(long)]
    pub json: bool,

    /// Enable diagnostic logging.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Builds the client configuration from the config file and flags.
    pub fn client_config(&self) -> anyhow::Result<ClientConfig> {
        let mut config = match &self.config {
            Some(path) => ClientConfig::from_file(path)
                .with_context(|| format!("loading config from {}", path.display()))?,
            None => ClientConfig::default(),
        };
        if let Some(timeout_ms) = self.timeout_ms {
            config = config.with_timeout_ms(timeout_ms);
        }
        if self.verbose > 0 {
            config = config.with_log_level(0);
        }
        Ok(config)
    }

    /// Builds the search options from the flags.
    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            region: self.region.clone(),
            safesearch: self.safesearch,
            timelimit: self.timelimit,
            backend: None,
        }
    }

    /// The keywords joined into one query.
    pub fn query(&self) -> String {
        self.keywords.join(" ")
    }
}

/// Runs a search and prints the results to stdout.
pub async fn run(args: Cli) -> anyhow::Result<()> {
    let config = args.client_config()?;
    let ddgs = DDGS::with_config(config)?;

    let mut results = ddgs
        .text_with_backend(&args.query(), &args.backend, args.search_options())
        .await?;
    if let Some(max) = args.max_results {
        results.truncate(max);
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if args.json {
        serde_json::to_writer_pretty(&mut out, &results)?;
        writeln!(out)?;
    } else {
        write_text(&mut out, &results)?;
    }
    Ok(())
}

fn write_text(out: &mut impl Write, results: &[SearchResult]) -> std::io::Result<()> {
    for (index, result) in results.iter().enumerate() {
        writeln!(out, "{}. {}", index + 1, result.title)?;
        writeln!(out, "   {}", result.url)?;
        if !result.snippet.is_empty() {
            writeln!(out, "   {}", result.snippet)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

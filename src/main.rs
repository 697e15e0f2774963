use anyhow::{Context, Result};
use ariadne::config::{DEFAULT_LANGUAGE, DEFAULT_TIMEOUT_SECS, USER_AGENT};
use ariadne::{
    Direction, ExpandOptions, FetcherConfig, LinkExpander, NodeExpander, WikiLanguage, WikiLinkGraph,
};
use clap::{Args, Parser, Subcommand};
use futures::future::try_join_all;
use indicatif::{ProgressBar, ProgressStyle};
use std::process::ExitCode;
use std::time::{Duration, Instant};
use tracing::{error, info, Level};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(name = "ariadne")]
#[command(about = "Expand Wikipedia articles into their links and backlinks")]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(flatten)]
    wiki: WikiArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct WikiArgs {
    /// Two-letter language code of the Wikipedia to query
    #[arg(short, long, global = true, default_value = DEFAULT_LANGUAGE)]
    lang: String,

    /// Override the MediaWiki API endpoint (defaults to the language's wikipedia.org)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Per-request HTTP timeout in seconds
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Give up on a whole expansion after this many seconds
    #[arg(long, global = true)]
    deadline_secs: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the articles each title links to
    Forward(TitlesArgs),
    /// List the articles linking to each title
    Backward(TitlesArgs),
    /// Report whether a title is a valid node (has at least one outgoing link)
    Check(TitleArgs),
    /// Time a forward and a backward expansion of one title
    Bench(TitleArgs),
}

#[derive(Args)]
struct TitlesArgs {
    /// Article titles, e.g. "Disc_jockey" or "Big Bang"
    #[arg(required = true)]
    titles: Vec<String>,
}

#[derive(Args)]
struct TitleArgs {
    /// Article title
    title: String,
}

impl WikiArgs {
    fn language(&self) -> Result<WikiLanguage> {
        let language = match &self.api_url {
            Some(api_url) => WikiLanguage::with_api_url(&self.lang, api_url)?,
            None => WikiLanguage::new(&self.lang)?,
        };
        Ok(language)
    }

    fn graph(&self) -> Result<WikiLinkGraph> {
        let config = FetcherConfig {
            timeout: Duration::from_secs(self.timeout_secs),
            user_agent: USER_AGENT.to_string(),
        };
        let graph = WikiLinkGraph::new(self.language()?, &config)
            .context("Failed to set up the HTTP client")?;
        Ok(graph)
    }

    fn options(&self) -> ExpandOptions {
        match self.deadline_secs {
            Some(secs) => ExpandOptions::default().with_timeout(Duration::from_secs(secs)),
            None => ExpandOptions::default(),
        }
    }
}

async fn run_list(wiki: &WikiArgs, direction: Direction, titles: &[String]) -> Result<()> {
    let graph = wiki.graph()?;
    let expander = graph.expander(direction);
    let options = wiki.options();

    let results = try_join_all(titles.iter().map(|title| expand_one(expander, title, &options)))
        .await?;

    for (title, neighbors) in titles.iter().zip(results) {
        if titles.len() > 1 {
            println!("# {title} ({direction}, {} neighbors)", neighbors.len());
        }
        for url in neighbors {
            println!("{url}");
        }
    }

    Ok(())
}

async fn expand_one(
    expander: &LinkExpander,
    title: &str,
    options: &ExpandOptions,
) -> Result<Vec<String>> {
    let neighbors = expander
        .expand_with(title, options)
        .await
        .with_context(|| format!("Failed to expand {title:?}"))?;
    Ok(neighbors)
}

async fn run_check(wiki: &WikiArgs, title: &str) -> Result<()> {
    let graph = wiki.graph()?;
    let valid = graph
        .forward
        .is_valid_node(title)
        .await
        .with_context(|| format!("Failed to check {title:?}"))?;

    if valid {
        println!("{title}: valid");
    } else {
        println!("{title}: not found or has no links");
    }
    Ok(())
}

async fn run_bench(wiki: &WikiArgs, title: &str) -> Result<()> {
    let graph = wiki.graph()?;
    let options = wiki.options();

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template("{spinner} {msg} [{elapsed}]")?);
    pb.set_message(format!("Expanding {title} in both directions ..."));
    pb.enable_steady_tick(Duration::from_millis(100));

    let forward = async {
        let start = Instant::now();
        let result = graph.forward.expand_with_stats(title, &options).await;
        result.map(|(neighbors, stats)| (neighbors, stats, start.elapsed()))
    };
    let backward = async {
        let start = Instant::now();
        let result = graph.backward.expand_with_stats(title, &options).await;
        result.map(|(neighbors, stats)| (neighbors, stats, start.elapsed()))
    };

    let ((fwd, fwd_stats, fwd_time), (bwd, bwd_stats, bwd_time)) =
        tokio::try_join!(forward, backward).with_context(|| format!("Failed to benchmark {title:?}"))?;
    pb.finish_and_clear();

    let total = fwd_stats.merge(&bwd_stats);
    info!(
        pages = total.pages(),
        edges = total.edges(),
        "Benchmark complete"
    );

    println!();
    println!("=== Summary ===");
    println!("Article:            {title}");
    println!("API endpoint:       {}", graph.language().api_url());
    println!();
    println!("Forward time:       {:.2}s", fwd_time.as_secs_f64());
    println!("Forward pages:      {}", fwd_stats.pages());
    println!("Forward links:      {}", fwd.len());
    println!("Forward filtered:   {}", fwd_stats.filtered());
    println!();
    println!("Backward time:      {:.2}s", bwd_time.as_secs_f64());
    println!("Backward pages:     {}", bwd_stats.pages());
    println!("Backward links:     {}", bwd.len());
    println!("Backward filtered:  {}", bwd_stats.filtered());

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    // RUST_LOG, when set, refines the -v level (e.g. RUST_LOG=ariadne=debug)
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");

    let rt = match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(4)
        .thread_name("ariadne-worker")
        .enable_io()
        .enable_time()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: failed to start runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    let wiki = &cli.wiki;
    let result = rt.block_on(async {
        match &cli.command {
            Commands::Forward(args) => run_list(wiki, Direction::Forward, &args.titles).await,
            Commands::Backward(args) => run_list(wiki, Direction::Backward, &args.titles).await,
            Commands::Check(args) => run_check(wiki, &args.title).await,
            Commands::Bench(args) => run_bench(wiki, &args.title).await,
        }
    });

    match result {
        Ok(()) => {
            info!("Completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Error: {:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

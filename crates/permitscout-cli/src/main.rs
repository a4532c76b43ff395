mod display;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::builder::PossibleValuesParser;
use clap::{Args, Parser, Subcommand, ValueEnum};
use permitscout_core::extract::DEFAULT_TABLE_SELECTOR;
use permitscout_core::{
    ExtractionConfig, KeywordSet, OutreachTemplates, SourceDescriptor, TemplateKey, market,
};
use permitscout_fetch::sample::SAMPLE_SOURCE;
use permitscout_fetch::{
    BrowserFetcher, BrowserSettings, HttpFetcher, HttpSettings, LeadPipeline, PermitFetcher,
    SampleRouter,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "permitscout",
    version,
    about = "Permit leads, market data, and outreach emails for Miami Master Flooring"
)]
struct Cli {
    /// Emit JSON instead of tables.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch permit sources and list flooring-relevant leads.
    Leads(LeadsArgs),
    /// Show the competitor comparison table.
    Competitors,
    /// Show target neighborhoods and their map circles.
    Neighborhoods {
        /// Print the circles as a GeoJSON FeatureCollection.
        #[arg(long)]
        geojson: bool,
    },
    /// Generate an outreach email for a customer segment.
    Email {
        #[arg(long, value_parser = PossibleValuesParser::new(TemplateKey::ALL.map(TemplateKey::as_str)))]
        template: String,
        /// Recipient name substituted into the template.
        #[arg(long, default_value = "Luis")]
        name: String,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum FetchMode {
    /// Plain HTTP GET; for server-rendered result pages.
    Static,
    /// Headless Chromium; for portals that build the table in JavaScript.
    Dynamic,
}

#[derive(Args, Debug)]
struct LeadsArgs {
    /// Permit source URL or `mock:` sample tag. Repeat or comma-separate.
    /// Defaults to the built-in sample when neither this nor --counties is given.
    #[arg(long = "source", env = "PERMITSCOUT_SOURCES", value_delimiter = ',')]
    sources: Vec<SourceDescriptor>,

    /// Also scrape the live county portals (miamidade.gov/permits and
    /// broward.org/Regulation/Permits), after any --source.
    #[arg(long, env = "PERMITSCOUT_COUNTIES")]
    counties: bool,

    #[arg(long, value_enum, env = "PERMITSCOUT_FETCH_MODE", default_value_t = FetchMode::Static)]
    mode: FetchMode,

    /// CSS selector of the permit table.
    #[arg(long, env = "PERMITSCOUT_TABLE", default_value = DEFAULT_TABLE_SELECTOR)]
    table: String,

    /// Project-type keyword. Defaults to floor, remodel, renovation, construction.
    #[arg(long = "keyword", env = "PERMITSCOUT_KEYWORDS", value_delimiter = ',')]
    keywords: Vec<String>,

    /// HTTP request timeout (static mode).
    #[arg(long, env = "PERMITSCOUT_TIMEOUT_SECS", default_value_t = 30)]
    timeout_secs: u64,

    /// Wait after navigation before reading the page (dynamic mode).
    #[arg(long, env = "PERMITSCOUT_SETTLE_MS", default_value_t = 5000)]
    settle_ms: u64,

    /// Chromium binary (dynamic mode); auto-detected when omitted.
    #[arg(long, env = "PERMITSCOUT_CHROME")]
    chrome: Option<PathBuf>,

    /// Print the start of any document that yielded no permit rows.
    #[arg(long)]
    show_preview: bool,
}

impl LeadsArgs {
    fn resolved_sources(&self) -> Vec<SourceDescriptor> {
        let mut sources = self.sources.clone();
        if self.counties {
            sources.extend(SourceDescriptor::county_portals());
        }
        if sources.is_empty() {
            sources.push(SourceDescriptor::new(SAMPLE_SOURCE));
        }
        sources
    }

    fn keyword_set(&self) -> KeywordSet {
        if self.keywords.is_empty() {
            KeywordSet::flooring()
        } else {
            KeywordSet::new(&self.keywords)
        }
    }

    fn fetcher(&self) -> anyhow::Result<Box<dyn PermitFetcher>> {
        Ok(match self.mode {
            FetchMode::Static => {
                let settings = HttpSettings {
                    timeout: Duration::from_secs(self.timeout_secs),
                    ..HttpSettings::default()
                };
                Box::new(HttpFetcher::new(&settings).context("building HTTP client")?)
            }
            FetchMode::Dynamic => Box::new(BrowserFetcher::new(BrowserSettings {
                settle: Duration::from_millis(self.settle_ms),
                chrome_path: self.chrome.clone(),
                ..BrowserSettings::default()
            })),
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    tracing::info!("permitscout v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    match cli.command {
        Command::Leads(args) => run_leads(&args, cli.json).await,
        Command::Competitors => {
            let rows = market::competitors();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                display::print_competitors(&rows);
            }
            Ok(())
        }
        Command::Neighborhoods { geojson } => {
            let areas = market::neighborhoods();
            let circles = market::target_circles(&areas);
            if geojson {
                let fc = market::circles_to_geojson(&circles);
                println!("{}", serde_json::to_string_pretty(&fc)?);
            } else if cli.json {
                println!("{}", serde_json::to_string_pretty(&circles)?);
            } else {
                display::print_neighborhoods(&areas, &circles);
            }
            Ok(())
        }
        Command::Email { template, name } => {
            let templates = OutreachTemplates::standard();
            let email = templates
                .generate_email(&template, &name)
                .context("template selector and template set are out of sync")?;
            if cli.json {
                let out = serde_json::json!({
                    "template": template,
                    "recipient": name,
                    "email": email,
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("{email}");
            }
            Ok(())
        }
    }
}

async fn run_leads(args: &LeadsArgs, json: bool) -> anyhow::Result<()> {
    let fetcher = SampleRouter::new(args.fetcher()?);
    let mut pipeline = LeadPipeline::new(
        fetcher,
        ExtractionConfig::new(args.table.clone()),
        args.keyword_set(),
    );

    let report = pipeline.run(&args.resolved_sources()).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        display::print_warnings(&report.warnings, args.show_preview);
        display::print_leads(&report)?;
    }
    Ok(())
}

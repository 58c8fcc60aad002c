//! CLI command definitions, routing, and tracing setup.

use std::fmt::{self, Write as _};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use serde::Serialize;
use tracing::{debug, info};

use docrank_content::{
    Catalog, CategoryOrder, FsSource, Page, find_by_slug, latest, neighbours, paginate, tag_index,
    with_tag,
};
use docrank_core::{Scored, rank};
use docrank_shared::{AppConfig, Document, init_config, load_config, load_config_from};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// docrank: ordered listings and related content for markdown docs.
#[derive(Parser)]
#[command(
    name = "docrank",
    version,
    about = "Category-ordered listings and related-content ranking for markdown documentation.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (defaults to ~/.docrank/docrank.toml).
    #[arg(long = "config", global = true, env = "DOCRANK_CONFIG")]
    pub config_file: Option<PathBuf>,

    /// Content directory (overrides `content.dir`).
    #[arg(short, long, global = true, env = "DOCRANK_CONTENT_DIR")]
    pub dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// List documents grouped by category priority, then title.
    List {
        /// Page number (1-based).
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Emit JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Show the documents most related to one document.
    Related {
        /// Slug of the query document.
        slug: String,

        /// How many related documents to return (defaults to `listing.related_count`).
        #[arg(short = 'n', long)]
        count: Option<usize>,

        /// Emit JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Show one document with its previous/next neighbours.
    Show {
        /// Slug of the document.
        slug: String,
    },

    /// List tags with document counts, or the documents carrying one tag.
    Tags {
        /// Only list documents with this tag.
        tag: Option<String>,
    },

    /// List the newest dated documents.
    Latest {
        /// How many documents to list (defaults to `listing.latest_count`).
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Logs go to stderr so command
/// output stays pipeable.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "docrank=warn",
        1 => "docrank=info",
        2 => "docrank=debug",
        _ => "docrank=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    let Cli {
        config_file,
        dir,
        command,
        ..
    } = cli;

    // `config init` must work before any config file exists.
    if let Command::Config {
        action: ConfigAction::Init,
    } = command
    {
        return cmd_config_init();
    }

    let config = resolve_config(config_file, dir)?;
    let site = Site::new(config);
    match command {
        Command::List { page, json } => site.cmd_list(page, json),
        Command::Related { slug, count, json } => site.cmd_related(&slug, count, json),
        Command::Show { slug } => site.cmd_show(&slug),
        Command::Tags { tag } => site.cmd_tags(tag.as_deref()),
        Command::Latest { count } => site.cmd_latest(count),
        Command::Config { .. } => cmd_config_show(&site.config),
    }
}

/// Merge the config file with CLI overrides.
fn resolve_config(path: Option<PathBuf>, dir: Option<PathBuf>) -> Result<AppConfig> {
    let mut config = match path {
        Some(path) => load_config_from(&path)?,
        None => load_config()?,
    };
    if let Some(dir) = dir {
        config.content.dir = dir.to_string_lossy().into_owned();
    }
    config.validate()?;
    debug!(dir = %config.content.dir, "configuration resolved");
    Ok(config)
}

// ---------------------------------------------------------------------------
// Content commands
// ---------------------------------------------------------------------------

/// Loaded configuration plus the catalog over its content directory.
struct Site {
    config: AppConfig,
    catalog: Catalog<FsSource>,
}

impl Site {
    fn new(config: AppConfig) -> Self {
        let source = FsSource::new(&config.content.dir);
        let order = CategoryOrder::new(&config.content.category_order);
        Self {
            catalog: Catalog::new(source, order),
            config,
        }
    }

    fn prefix(&self) -> &str {
        &self.config.content.route_prefix
    }

    fn documents(&self) -> Result<std::sync::Arc<[Document]>> {
        Ok(self.catalog.load_all()?)
    }

    fn cmd_list(&self, page: usize, json: bool) -> Result<()> {
        let docs = self.documents()?;
        let pages = paginate(&docs, self.config.listing.page_size)?;

        if pages.is_empty() {
            println!("No documents found.");
            return Ok(());
        }
        let selected = page
            .checked_sub(1)
            .and_then(|i| pages.get(i))
            .ok_or_else(|| eyre!("page {page} out of range (1..={})", pages.len()))?;

        if json {
            let entries: Vec<ListEntry<'_>> = selected
                .items
                .iter()
                .map(|d| ListEntry::new(d, self.prefix()))
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        } else {
            print!("{}", format_page(selected, self.prefix())?);
        }
        Ok(())
    }

    fn cmd_related(&self, slug: &str, count: Option<usize>, json: bool) -> Result<()> {
        let docs = self.documents()?;
        let query = find_by_slug(&docs, slug).ok_or_else(|| eyre!("no document with slug '{slug}'"))?;
        let n = count.unwrap_or(self.config.listing.related_count);

        let mut ranked = rank(query, &docs);
        ranked.truncate(n);
        info!(query = %query.slug, returned = ranked.len(), "related documents ranked");

        if json {
            let entries: Vec<RelatedEntry<'_>> = ranked
                .iter()
                .map(|s| RelatedEntry::new(s, self.prefix()))
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        } else {
            print!("{}", format_related(query, &ranked, self.prefix())?);
        }
        Ok(())
    }

    fn cmd_show(&self, slug: &str) -> Result<()> {
        let docs = self.documents()?;
        let doc = find_by_slug(&docs, slug).ok_or_else(|| eyre!("no document with slug '{slug}'"))?;
        let around = neighbours(&docs, doc);

        println!("{}", doc.title);
        println!("  Permalink: {}", doc.permalink(self.prefix()));
        println!("  Category:  {}", doc.category_or_default());
        if !doc.tags.is_empty() {
            println!("  Tags:      {}", doc.tags.join(", "));
        }
        if let Some(date) = doc.date {
            println!("  Date:      {date}");
        }
        if let Some(description) = &doc.description {
            println!("  Summary:   {description}");
        }
        for heading in &doc.headings {
            let indent = "  ".repeat(usize::from(heading.depth.saturating_sub(1)));
            println!("    {indent}- {}", heading.text);
        }
        if let Some(prev) = around.previous {
            println!("  Previous:  {} ({})", prev.title, prev.permalink(self.prefix()));
        }
        if let Some(next) = around.next {
            println!("  Next:      {} ({})", next.title, next.permalink(self.prefix()));
        }
        Ok(())
    }

    fn cmd_tags(&self, tag: Option<&str>) -> Result<()> {
        let docs = self.documents()?;
        match tag {
            Some(tag) => {
                let tagged = with_tag(&docs, tag);
                if tagged.is_empty() {
                    println!("No documents tagged '{tag}'.");
                }
                for doc in tagged {
                    println!("{:<40} {}", doc.title, doc.permalink(self.prefix()));
                }
            }
            None => {
                for entry in tag_index(&docs) {
                    println!("{:>4}  {}", entry.count, entry.tag);
                }
            }
        }
        Ok(())
    }

    fn cmd_latest(&self, count: Option<usize>) -> Result<()> {
        let docs = self.documents()?;
        let n = count.unwrap_or(self.config.listing.latest_count);
        let newest = latest(&docs, n);
        if newest.is_empty() {
            println!("No dated documents found.");
        }
        for doc in newest {
            if let Some(date) = doc.date {
                println!("{date}  {:<40} {}", doc.title, doc.permalink(self.prefix()));
            }
        }
        Ok(())
    }
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(config: &AppConfig) -> Result<()> {
    let toml_str = toml::to_string_pretty(config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// Output formatting
// ---------------------------------------------------------------------------

/// JSON row for `list`.
#[derive(Debug, Serialize)]
struct ListEntry<'a> {
    slug: &'a str,
    title: &'a str,
    category: &'a str,
    tags: &'a [String],
    permalink: String,
}

impl<'a> ListEntry<'a> {
    fn new(doc: &'a Document, prefix: &str) -> Self {
        Self {
            slug: &doc.slug,
            title: &doc.title,
            category: doc.category_or_default(),
            tags: &doc.tags,
            permalink: doc.permalink(prefix),
        }
    }
}

/// JSON row for `related`.
#[derive(Debug, Serialize)]
struct RelatedEntry<'a> {
    slug: &'a str,
    title: &'a str,
    permalink: String,
    score: f64,
}

impl<'a> RelatedEntry<'a> {
    fn new(scored: &Scored<'a>, prefix: &str) -> Self {
        Self {
            slug: &scored.document.slug,
            title: &scored.document.title,
            permalink: scored.document.permalink(prefix),
            score: scored.score,
        }
    }
}

/// Render a listing page with a header line per category group.
fn format_page(page: &Page<'_>, prefix: &str) -> Result<String, fmt::Error> {
    let mut out = String::new();
    let mut current_group: Option<&str> = None;

    for doc in page.items {
        let group = doc.category_or_default();
        if current_group != Some(group) {
            writeln!(out, "{group}")?;
            current_group = Some(group);
        }
        writeln!(out, "  {:<40} {}", doc.title, doc.permalink(prefix))?;
    }
    writeln!(out, "-- page {}/{} --", page.number, page.total_pages)?;
    Ok(out)
}

fn format_related(
    query: &Document,
    ranked: &[Scored<'_>],
    prefix: &str,
) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "Related to {} ({})", query.title, query.permalink(prefix))?;
    if ranked.is_empty() {
        writeln!(out, "  No related content.")?;
    }
    for (i, scored) in ranked.iter().enumerate() {
        writeln!(
            out,
            "  {}. {:<40} {:>6.2}  {}",
            i + 1,
            scored.document.title,
            scored.score,
            scored.document.permalink(prefix)
        )?;
    }
    Ok(out)
}

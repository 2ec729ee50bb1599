//! CLI command definitions, routing, and tracing setup.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;
use url::Url;

use helpdeck_client::HelpClient;
use helpdeck_resolver::{HelpOutcome, open_help, resolve_locator, sort_by_default_order};
use helpdeck_shared::{
    AppConfig, HelpArticle, HostInfo, PageInfo, init_config, load_config,
};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Helpdeck — contextual help articles for application pages.
#[derive(Parser)]
#[command(
    name = "helpdeck",
    version,
    about = "Manage and resolve contextual help articles tied to application pages.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

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
    /// Search help articles, sorted by owner key then item key.
    Search {
        /// Filter by owner key (product name).
        #[arg(short, long)]
        product: Option<String>,

        /// Filter by item key.
        #[arg(short, long)]
        item: Option<String>,

        /// Zero-based result page.
        #[arg(long, default_value = "0")]
        page: u32,

        /// Result page size.
        #[arg(long, default_value = "100")]
        size: u32,
    },

    /// Show one article by its server-assigned id.
    Get {
        /// Article id.
        id: String,
    },

    /// Create a new help article.
    Create {
        /// Item key identifying the page/feature (2-255 characters).
        #[arg(long)]
        item: String,

        /// Owner key (product name).
        #[arg(long)]
        product: String,

        /// Base URL (absolute or relative).
        #[arg(long)]
        base_url: Option<String>,

        /// Resource path appended to the base URL.
        #[arg(long)]
        resource_url: Option<String>,

        /// Context fragment appended verbatim.
        #[arg(long)]
        context: Option<String>,
    },

    /// Update an existing article (requires the current modification count).
    Update {
        /// Article id.
        id: String,

        /// Item key identifying the page/feature (2-255 characters).
        #[arg(long)]
        item: String,

        /// Owner key (product name).
        #[arg(long)]
        product: String,

        /// Base URL (absolute or relative).
        #[arg(long)]
        base_url: Option<String>,

        /// Resource path appended to the base URL.
        #[arg(long)]
        resource_url: Option<String>,

        /// Context fragment appended verbatim.
        #[arg(long)]
        context: Option<String>,

        /// Current optimistic-lock token, echoed back unchanged.
        #[arg(long)]
        modification_count: i32,
    },

    /// Delete an article by id.
    Delete {
        /// Article id.
        id: String,
    },

    /// Resolve and open the help article for a page context.
    Open {
        /// Explicit help article id of the current page (preferred key).
        #[arg(long)]
        help_article_id: Option<String>,

        /// Page name of the current page (fallback key).
        #[arg(long)]
        page_name: Option<String>,

        /// Product name of the hosting application.
        #[arg(long)]
        product: Option<String>,

        /// Application id of the hosting application (legacy variant).
        #[arg(long)]
        app_id: Option<String>,

        /// Current navigation path (last-resort article key).
        #[arg(long, default_value = "/")]
        path: String,
    },

    /// Import articles from a JSON file.
    Import {
        /// Path to a JSON array of articles.
        file: PathBuf,
    },

    /// Export articles to a JSON file.
    Export {
        /// Destination file path.
        file: PathBuf,

        /// Owner key filter (repeatable); exports all owners when omitted.
        #[arg(short, long)]
        product: Vec<String>,
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

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "helpdeck=info",
        1 => "helpdeck=debug",
        _ => "helpdeck=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Search {
            product,
            item,
            page,
            size,
        } => cmd_search(product, item, page, size).await,
        Command::Get { id } => cmd_get(&id).await,
        Command::Create {
            item,
            product,
            base_url,
            resource_url,
            context,
        } => cmd_create(item, product, base_url, resource_url, context).await,
        Command::Update {
            id,
            item,
            product,
            base_url,
            resource_url,
            context,
            modification_count,
        } => {
            cmd_update(
                &id,
                item,
                product,
                base_url,
                resource_url,
                context,
                modification_count,
            )
            .await
        }
        Command::Delete { id } => cmd_delete(&id).await,
        Command::Open {
            help_article_id,
            page_name,
            product,
            app_id,
            path,
        } => cmd_open(help_article_id, page_name, product, app_id, &path).await,
        Command::Import { file } => cmd_import(&file).await,
        Command::Export { file, product } => cmd_export(&file, product).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show().await,
        },
    }
}

fn client_from_config(config: &AppConfig) -> Result<HelpClient> {
    Ok(HelpClient::from_config(&config.service)?)
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_search(
    product: Option<String>,
    item: Option<String>,
    page: u32,
    size: u32,
) -> Result<()> {
    let config = load_config()?;
    let client = client_from_config(&config)?;

    let criteria = helpdeck_shared::SearchCriteria {
        product_name: product,
        item_id: item,
        page_number: page,
        page_size: size,
    };

    let mut result = client.search(&criteria).await?;
    sort_by_default_order(&mut result.stream);

    println!(
        "{:<38} {:<24} {:<32} LOCATION",
        "ID", "PRODUCT", "ITEM"
    );
    for article in &result.stream {
        let location = article.base_url.as_deref().unwrap_or("-");
        println!(
            "{:<38} {:<24} {:<32} {location}",
            article.id.as_deref().unwrap_or("-"),
            article.product_name,
            article.item_id,
        );
    }
    println!();
    println!(
        "  {} of {} article(s), page {}",
        result.stream.len(),
        result.total_elements,
        result.number
    );

    Ok(())
}

async fn cmd_get(id: &str) -> Result<()> {
    let config = load_config()?;
    let client = client_from_config(&config)?;

    let article = client.get(id).await?;

    println!("  ID:                 {}", article.id.as_deref().unwrap_or("-"));
    println!("  Product:            {}", article.product_name);
    println!("  Item:               {}", article.item_id);
    println!("  Base URL:           {}", article.base_url.as_deref().unwrap_or("-"));
    println!("  Resource URL:       {}", article.resource_url.as_deref().unwrap_or("-"));
    println!("  Context:            {}", article.context.as_deref().unwrap_or("-"));
    println!("  Modification count: {}", article.modification_count);
    if let Some(created) = article.creation_date {
        println!("  Created:            {created}");
    }
    if let Some(modified) = article.modification_date {
        println!("  Modified:           {modified}");
    }

    Ok(())
}

async fn cmd_create(
    item: String,
    product: String,
    base_url: Option<String>,
    resource_url: Option<String>,
    context: Option<String>,
) -> Result<()> {
    let config = load_config()?;
    let client = client_from_config(&config)?;

    let article = HelpArticle {
        item_id: item,
        product_name: product,
        base_url,
        resource_url,
        context,
        ..Default::default()
    };

    let created = client.create(&article).await?;
    info!(id = ?created.id, item = %created.item_id, "article created");
    println!(
        "Created article '{}' for '{}' (id: {})",
        created.item_id,
        created.product_name,
        created.id.as_deref().unwrap_or("-")
    );

    Ok(())
}

#[allow(clippy::too_many_arguments)]
async fn cmd_update(
    id: &str,
    item: String,
    product: String,
    base_url: Option<String>,
    resource_url: Option<String>,
    context: Option<String>,
    modification_count: i32,
) -> Result<()> {
    let config = load_config()?;
    let client = client_from_config(&config)?;

    let article = HelpArticle {
        id: Some(id.to_string()),
        item_id: item,
        product_name: product,
        base_url,
        resource_url,
        context,
        modification_count,
        ..Default::default()
    };

    let updated = client.update(id, &article).await?;
    println!(
        "Updated article '{}' (modification count now {})",
        updated.item_id, updated.modification_count
    );

    Ok(())
}

async fn cmd_delete(id: &str) -> Result<()> {
    let config = load_config()?;
    let client = client_from_config(&config)?;

    client.delete(id).await?;
    println!("Deleted article {id}");

    Ok(())
}

async fn cmd_open(
    help_article_id: Option<String>,
    page_name: Option<String>,
    product: Option<String>,
    app_id: Option<String>,
    path: &str,
) -> Result<()> {
    let config = load_config()?;
    let client = client_from_config(&config)?;

    let page = PageInfo {
        help_article_id,
        page_name,
    };
    let host = HostInfo {
        product_name: product,
        app_id,
    };

    let locator = resolve_locator(&page, &host, path, config.resolver.owner_source);
    info!(
        owner = %locator.owner_key,
        article = %locator.article_key,
        "resolving help article"
    );

    let origin = Url::parse(&config.resolver.origin)
        .map_err(|e| eyre!("invalid origin '{}' in config: {e}", config.resolver.origin))?;

    let outcome = open_help(
        &client,
        &locator,
        &origin,
        &config.resolver.deployment_base_path,
    )
    .await
    .map_err(|e| eyre!("help page error: {e}"))?;

    match outcome {
        HelpOutcome::Navigate(url) => println!("{url}"),
        HelpOutcome::NoHelpItem { article_key } => {
            println!("No help item defined for '{article_key}'.");
        }
    }

    Ok(())
}

async fn cmd_import(file: &PathBuf) -> Result<()> {
    let config = load_config()?;
    let client = client_from_config(&config)?;

    let content = std::fs::read_to_string(file)
        .map_err(|e| eyre!("cannot read '{}': {e}", file.display()))?;
    let articles: Vec<HelpArticle> = serde_json::from_str(&content)
        .map_err(|e| eyre!("'{}' is not a valid article list: {e}", file.display()))?;

    // Validate everything client-side before uploading anything.
    for (index, article) in articles.iter().enumerate() {
        article
            .validate()
            .map_err(|e| eyre!("article #{index} ('{}'): {e}", article.item_id))?;
    }

    let spinner = progress_spinner();
    spinner.set_message(format!("Importing {} article(s)", articles.len()));

    client.import(&articles).await?;
    spinner.finish_and_clear();

    println!("Imported {} article(s) from {}", articles.len(), file.display());
    Ok(())
}

async fn cmd_export(file: &PathBuf, product: Vec<String>) -> Result<()> {
    let config = load_config()?;
    let client = client_from_config(&config)?;

    let spinner = progress_spinner();
    spinner.set_message("Exporting articles");

    let mut articles = client.export(&product).await?;
    sort_by_default_order(&mut articles);
    spinner.finish_and_clear();

    let json = serde_json::to_string_pretty(&articles)?;
    std::fs::write(file, json).map_err(|e| eyre!("cannot write '{}': {e}", file.display()))?;

    println!("Exported {} article(s) to {}", articles.len(), file.display());
    Ok(())
}

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// Progress helpers
// ---------------------------------------------------------------------------

fn progress_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}

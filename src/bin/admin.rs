//! CLI administration tool for domain-checker.
//!
//! Runs checks without going through the HTTP API, shows the effective
//! configuration, and manages the shared Redis cache.
//!
//! # Usage
//!
//! ```bash
//! # Check one domain
//! cargo run --bin admin -- check example --tld org
//!
//! # Check several labels
//! cargo run --bin admin -- bulk example test openai --tld com
//!
//! # Show the effective configuration
//! cargo run --bin admin -- config
//!
//! # Drop cached results from Redis
//! cargo run --bin admin -- cache clear
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; see `domain_checker::config`. `cache clear` needs
//! `CACHE_REDIS_URL` or `REDIS_URL`.
//!
//! # Features
//!
//! - **Checks**: Single and bulk checks through the real probers, uncached
//! - **Cache Tools**: Count and clear cached results in Redis
//! - **Interactive Prompts**: Confirmation before deleting keys
//! - **Colored Output**: Terminal-friendly formatting using `colored` crate

use domain_checker::application::services::{BulkItem, BulkService};
use domain_checker::config::{self, Config, mask_connection_string};
use domain_checker::domain::entities::{
    Availability, DomainCheckResult, DomainQuery, ProbeDetail, ProbeOutcome, ProbeStatus,
};
use domain_checker::infrastructure::cache::{KEY_PREFIX, NullCache, connect_manager};
use domain_checker::server::build_checker;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use redis::aio::ConnectionManager;
use std::sync::Arc;

/// Keys per SCAN round trip.
const SCAN_BATCH: usize = 500;

/// CLI tool for domain-checker.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Check one domain
    Check {
        /// Domain label, e.g. "example"
        domain: String,

        /// TLD (default: com)
        #[arg(short, long)]
        tld: Option<String>,

        /// Print the raw result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check several labels under one TLD
    Bulk {
        /// Domain labels
        #[arg(required = true)]
        domains: Vec<String>,

        /// TLD (default: com)
        #[arg(short, long)]
        tld: Option<String>,
    },

    /// Show the effective configuration
    Config,

    /// Redis cache operations
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

/// Cache management subcommands.
#[derive(Subcommand)]
enum CacheAction {
    /// Count cached results
    Stats,

    /// Delete cached results (rate limit counters are kept)
    Clear {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env().context("Invalid configuration")?;

    match cli.command {
        Commands::Check { domain, tld, json } => check(&config, &domain, tld, json).await?,
        Commands::Bulk { domains, tld } => bulk(&config, &domains, tld).await?,
        Commands::Config => show_config(&config),
        Commands::Cache { action } => handle_cache_action(action, &config).await?,
    }

    Ok(())
}

/// Runs a single uncached check and prints the verdict.
async fn check(config: &Config, domain: &str, tld: Option<String>, json: bool) -> Result<()> {
    let query = DomainQuery::parse(domain, tld.as_deref())?;
    let checker = build_checker(config, Arc::new(NullCache::new()));

    if !json {
        println!("{} {}", "🔎 Checking".bright_blue().bold(), query.to_string().cyan());
        println!();
    }

    let result = checker.check(&query).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_result(&result);
    }

    Ok(())
}

/// Runs a bulk check with the configured concurrency and prints one line per label.
async fn bulk(config: &Config, domains: &[String], tld: Option<String>) -> Result<()> {
    let checker = Arc::new(build_checker(config, Arc::new(NullCache::new())));
    let service = BulkService::new(checker, config.max_bulk_domains, config.bulk_concurrency);

    println!(
        "{} {} domains",
        "🔎 Checking".bright_blue().bold(),
        domains.len().to_string().bright_white().bold()
    );
    println!();

    let items = service.check_many(domains, tld.as_deref()).await?;

    for item in &items {
        match item {
            BulkItem::Checked(result) => {
                println!(
                    "  {:<40} {}",
                    result.query().to_string().cyan(),
                    verdict_label(result.overall_status())
                );
            }
            BulkItem::Rejected { input, tld, reason } => {
                println!(
                    "  {:<40} {} {}",
                    format!("{input}.{tld}").bright_black(),
                    "INVALID".yellow(),
                    reason.to_string().bright_black()
                );
            }
        }
    }

    let available = items
        .iter()
        .filter(|item| {
            matches!(item, BulkItem::Checked(r) if r.overall_status() == Availability::Available)
        })
        .count();

    println!();
    println!(
        "  Available: {} / {}",
        available.to_string().bright_white().bold(),
        items.len()
    );
    println!();

    Ok(())
}

fn print_result(result: &DomainCheckResult) {
    println!("  Verdict: {}", verdict_label(result.overall_status()));
    println!();
    print_probe("WHOIS", result.whois());
    print_probe("DNS", result.dns());
    println!();
    println!(
        "  Took {}",
        format!("{:.2}s", result.elapsed().as_secs_f64()).bright_black()
    );
    println!();
}

fn print_probe(name: &str, outcome: &ProbeOutcome) {
    let status = match outcome.status {
        ProbeStatus::Available => "available".green(),
        ProbeStatus::Taken => "taken".red(),
        ProbeStatus::Error => "error".yellow(),
        ProbeStatus::Timeout => "timeout".yellow(),
    };

    println!(
        "  {:<6} {} {}",
        name.bright_white().bold(),
        status,
        format!("({} ms)", outcome.latency.as_millis()).bright_black()
    );

    match &outcome.detail {
        ProbeDetail::Whois {
            registrar,
            expiration_date,
        } => {
            if let Some(registrar) = registrar {
                println!("         Registrar: {}", registrar.cyan());
            }
            if let Some(expiration_date) = expiration_date {
                println!("         Expires:   {}", expiration_date.cyan());
            }
        }
        ProbeDetail::Dns { records } => {
            for record in records {
                println!("         {}", record.cyan());
            }
        }
    }

    if let Some(error) = &outcome.error {
        println!("         {}", error.bright_black());
    }
}

fn verdict_label(status: Availability) -> ColoredString {
    match status {
        Availability::Available => "AVAILABLE".green().bold(),
        Availability::Taken => "TAKEN".red().bold(),
    }
}

/// Prints the effective configuration with credentials masked.
fn show_config(config: &Config) {
    println!("{}", "⚙️  Configuration".bright_blue().bold());
    println!();

    let row = |name: &str, value: String| println!("  {:<22} {}", name.bright_white(), value);

    row("Listen", config.listen_addr.clone());
    row("WHOIS timeout", format!("{:?}", config.whois_timeout));
    row("DNS timeout", format!("{:?}", config.dns_timeout));
    row("Cache", config.cache_type.to_string());
    row("Cache TTL", format!("{}s", config.cache_ttl_seconds));
    row(
        "Cache Redis",
        config
            .cache_redis_url
            .as_deref()
            .map(mask_connection_string)
            .unwrap_or_else(|| "-".to_string()),
    );

    if config.enable_rate_limits {
        row("Rate limit (single)", config.rate_limits.single.to_string());
        row("Rate limit (bulk)", config.rate_limits.bulk.to_string());
        row("Rate limit (daily)", config.rate_limits.daily.to_string());
        row(
            "Rate limit backend",
            config
                .redis_url
                .as_deref()
                .map(mask_connection_string)
                .unwrap_or_else(|| "memory".to_string()),
        );
    } else {
        row("Rate limits", "disabled".yellow().to_string());
    }

    row("Max bulk domains", config.max_bulk_domains.to_string());
    row("Bulk concurrency", config.bulk_concurrency.to_string());
    row("Behind proxy", config.behind_proxy.to_string());

    for (tld, server) in &config.whois_servers {
        row(&format!("WHOIS .{tld}"), server.to_string());
    }
    if !config.dns_nameservers.is_empty() {
        row("DNS nameservers", format!("{:?}", config.dns_nameservers));
    }

    println!();
}

/// Dispatches cache management commands.
async fn handle_cache_action(action: CacheAction, config: &Config) -> Result<()> {
    let url = config
        .cache_redis_url
        .as_deref()
        .context("CACHE_REDIS_URL or REDIS_URL must be set")?;

    let mut conn = connect_manager(url)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    let keys = cached_result_keys(&mut conn).await?;

    match action {
        CacheAction::Stats => {
            println!("{}", "📊 Cache".bright_blue().bold());
            println!();
            println!("  Redis:   {}", mask_connection_string(url).cyan());
            println!("  Results: {}", keys.len().to_string().bright_white().bold());
            println!();
        }
        CacheAction::Clear { yes } => clear_cache(&mut conn, keys, yes).await?,
    }

    Ok(())
}

/// Collects every cached result key, skipping rate limit counters.
async fn cached_result_keys(conn: &mut ConnectionManager) -> Result<Vec<String>> {
    let pattern = format!("{KEY_PREFIX}*");
    let counters = format!("{KEY_PREFIX}ratelimit:");

    let mut keys = Vec::new();
    let mut cursor: u64 = 0;

    loop {
        let (next, batch): (u64, Vec<String>) = redis::cmd("SCAN")
            .arg(cursor)
            .arg("MATCH")
            .arg(&pattern)
            .arg("COUNT")
            .arg(SCAN_BATCH)
            .query_async(conn)
            .await
            .context("SCAN failed")?;

        keys.extend(batch.into_iter().filter(|key| !key.starts_with(&counters)));

        if next == 0 {
            break;
        }
        cursor = next;
    }

    Ok(keys)
}

/// Deletes cached results after confirmation.
///
/// # Safety
///
/// - Requires confirmation (default: No) unless `--yes`
/// - Only touches keys under the service prefix, never rate limit counters
async fn clear_cache(conn: &mut ConnectionManager, keys: Vec<String>, yes: bool) -> Result<()> {
    println!("{}", "🧹 Clear Cache".bright_blue().bold());
    println!();

    if keys.is_empty() {
        println!("{}", "  Cache is already empty".yellow());
        println!();
        return Ok(());
    }

    println!(
        "  {} cached results will be deleted",
        keys.len().to_string().bright_white().bold()
    );
    println!();

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt("Delete them?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let mut deleted: u64 = 0;
    for chunk in keys.chunks(SCAN_BATCH) {
        let removed: u64 = redis::cmd("DEL")
            .arg(chunk)
            .query_async(conn)
            .await
            .context("DEL failed")?;
        deleted += removed;
    }

    println!();
    println!(
        "{} {}",
        "✅ Deleted".green().bold(),
        format!("{deleted} cached results").green()
    );
    println!();

    Ok(())
}

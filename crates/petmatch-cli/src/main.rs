//! `petmatch` CLI — check sitter availability and bookings from the command
//! line.
//!
//! ## Usage
//!
//! ```sh
//! # Offline: does a slot file cover a requested window?
//! petmatch check --slots slots.json --from 2024-06-01T10:00:00Z --to 2024-06-01T14:00:00Z
//!
//! # Offline: week-at-a-glance open hours (slot JSON from stdin)
//! curl -s "$API/availability/?sitter=9" | petmatch schedule --week-of 2024-06-03T00:00:00Z
//!
//! # Online: sitters available for a window (uses PETMATCH_API_URL/_TOKEN)
//! petmatch sitters --from 2024-06-01T10:00:00Z --to 2024-06-01T14:00:00Z --tag "Overnight Care"
//!
//! # Online: bookings visible to the authenticated party
//! petmatch bookings
//! ```

use std::io::{self, Read};
use std::process;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use petmatch_client::{ApiClient, ClientConfig, FilterOutcome, SitterFilter, SitterQuery};
use petmatch_engine::{covering_slot, week_schedule, RequestedWindow, TimeSlot};

#[derive(Parser)]
#[command(
    name = "petmatch",
    version,
    about = "Pet-sitting marketplace availability and booking client"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// API base URL for online commands
    #[arg(
        long,
        global = true,
        env = "PETMATCH_API_URL",
        default_value = "http://127.0.0.1:8000/api"
    )]
    base_url: String,

    /// API token for online commands
    #[arg(long, global = true, env = "PETMATCH_API_TOKEN")]
    token: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether a slot file covers a requested window
    Check {
        /// Slot JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        slots: Option<String>,
        /// Window start (RFC 3339)
        #[arg(long)]
        from: DateTime<Utc>,
        /// Window end (RFC 3339)
        #[arg(long)]
        to: DateTime<Utc>,
    },
    /// Print a week of open hours from a slot file
    Schedule {
        /// Slot JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        slots: Option<String>,
        /// First day to display (RFC 3339; defaults to the earliest slot)
        #[arg(long)]
        week_of: Option<DateTime<Utc>>,
    },
    /// List sitters, optionally filtered by window, tag, and specialty
    Sitters {
        /// Window start (RFC 3339; requires --to)
        #[arg(long)]
        from: Option<DateTime<Utc>>,
        /// Window end (RFC 3339; requires --from)
        #[arg(long)]
        to: Option<DateTime<Utc>>,
        /// Keep sitters carrying this tag (repeatable)
        #[arg(long)]
        tag: Vec<String>,
        /// Keep sitters with this specialty slug (repeatable)
        #[arg(long)]
        specialty: Vec<String>,
    },
    /// List bookings visible to the authenticated party
    Bookings,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check { slots, from, to } => check(slots.as_deref(), from, to),
        Commands::Schedule { slots, week_of } => schedule(slots.as_deref(), week_of),
        Commands::Sitters {
            from,
            to,
            tag,
            specialty,
        } => {
            let client = api_client(&cli.base_url, cli.token.as_deref())?;
            sitters(&client, from, to, tag, specialty).await
        }
        Commands::Bookings => {
            let client = api_client(&cli.base_url, cli.token.as_deref())?;
            bookings(&client).await
        }
    }
}

fn check(path: Option<&str>, from: DateTime<Utc>, to: DateTime<Utc>) -> Result<()> {
    let window = RequestedWindow::new(from, to).context("invalid requested window")?;
    let slots = load_slots(path)?;

    match covering_slot(&window, &slots) {
        Some(slot) => {
            println!(
                "covered by slot {} ({} to {})",
                slot.id, slot.start_ts, slot.end_ts
            );
            Ok(())
        }
        None => {
            println!("not covered");
            // Scriptable verdict: non-zero when the window is not covered.
            process::exit(1);
        }
    }
}

fn schedule(path: Option<&str>, week_of: Option<DateTime<Utc>>) -> Result<()> {
    let slots = load_slots(path)?;
    let start = match week_of {
        Some(ts) => ts,
        None => match slots.iter().map(|s| s.start_ts).min() {
            Some(earliest) => earliest,
            None => bail!("slot input is empty and --week-of was not given"),
        },
    };

    for day in week_schedule(&slots, start) {
        let slot_count = day.open_slots.len();
        println!(
            "{}  {:>5.1}h open  ({} slot{})",
            day.day_start.format("%a %Y-%m-%d"),
            day.open_minutes as f64 / 60.0,
            slot_count,
            if slot_count == 1 { "" } else { "s" }
        );
    }
    Ok(())
}

async fn sitters(
    client: &ApiClient,
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
    tags: Vec<String>,
    specialties: Vec<String>,
) -> Result<()> {
    let window = match (from, to) {
        (Some(from), Some(to)) => {
            Some(RequestedWindow::new(from, to).context("invalid requested window")?)
        }
        (None, None) => None,
        _ => bail!("--from and --to must be given together"),
    };

    let all = client.sitters().await?;
    let shortlisted = SitterQuery { specialties, tags }.apply(&all);

    let filter = SitterFilter::new();
    let available = match filter
        .filter_available(client, &shortlisted, window.as_ref())
        .await
    {
        FilterOutcome::Fresh(list) => list,
        // The CLI issues exactly one filter request per invocation.
        FilterOutcome::Superseded => unreachable!("no concurrent filter requests"),
    };

    if available.is_empty() {
        println!("no sitters match");
        return Ok(());
    }
    for sitter in available {
        let rate = sitter
            .rate_hourly
            .map(|r| format!("${r:.2}/hr"))
            .unwrap_or_else(|| "rate n/a".to_string());
        println!("#{:<5} {:<24} {}", sitter.id, sitter.display_name, rate);
    }
    Ok(())
}

async fn bookings(client: &ApiClient) -> Result<()> {
    let bookings = client.bookings().await?;

    if bookings.is_empty() {
        println!("no bookings");
        return Ok(());
    }
    for booking in bookings {
        println!(
            "#{:<5} sitter {:<5} {} to {}  ${:.2}  {:?}",
            booking.id,
            booking.sitter_id,
            booking.start_ts,
            booking.end_ts,
            booking.price_quote,
            booking.status
        );
    }
    Ok(())
}

fn api_client(base_url: &str, token: Option<&str>) -> Result<ApiClient> {
    let client = ApiClient::new(ClientConfig::new(base_url))?;
    if let Some(token) = token {
        client.session().set(token, None);
    }
    Ok(client)
}

fn load_slots(path: Option<&str>) -> Result<Vec<TimeSlot>> {
    let raw = read_input(path)?;
    serde_json::from_str(&raw).context("slot input is not a JSON array of availability slots")
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

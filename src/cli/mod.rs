//! Argument handling and execution for the `grid-layout` binary.

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use chrono::NaiveDate;

use crate::models::settings::LayoutSettings;
use crate::services::input::load_events;
use crate::services::layout::GridAssembler;
use crate::services::resolver::{week_containing, EventFilter};
use crate::services::settings::SettingsStore;

pub const USAGE: &str = "usage:
  grid-layout week  <events.json> <YYYY-MM-DD> [options]
  grid-layout month <events.json> <YYYY-MM>    [options]

options:
  --config <settings.toml>   layout settings (default: platform config dir)
  --category <name>          only events in this category
  --search <text>            only events whose title or category contains text
  --compact                  single-line JSON output";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Period {
    /// Week row containing this date
    Week(NaiveDate),
    Month { year: i32, month: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub period: Period,
    pub events: PathBuf,
    pub config: Option<PathBuf>,
    pub filter: EventFilter,
    pub compact: bool,
}

impl Args {
    /// Parse arguments, excluding the program name.
    pub fn parse(args: &[String]) -> Result<Self> {
        let (command, rest) = args.split_first().ok_or_else(|| anyhow!("missing command"))?;
        let events = rest.first().ok_or_else(|| anyhow!("missing events file"))?;
        let when = rest.get(1).ok_or_else(|| anyhow!("missing date"))?;

        let period = match command.as_str() {
            "week" => Period::Week(
                NaiveDate::parse_from_str(when, "%Y-%m-%d")
                    .with_context(|| format!("invalid date {}", when))?,
            ),
            "month" => parse_month(when)?,
            other => bail!("unknown command {}", other),
        };

        let mut res = Args {
            period,
            events: PathBuf::from(events),
            config: None,
            filter: EventFilter::default(),
            compact: false,
        };

        let mut i = 2;
        while i < rest.len() {
            let arg = &rest[i];

            if arg == "--compact" {
                res.compact = true;
            } else if arg == "--config" || arg == "--category" || arg == "--search" {
                i += 1;
                let value = rest
                    .get(i)
                    .ok_or_else(|| anyhow!("{} needs a value", arg))?
                    .clone();

                match arg.as_str() {
                    "--config" => res.config = Some(PathBuf::from(value)),
                    "--category" => res.filter.category = Some(value),
                    _ => res.filter.text = Some(value),
                }
            } else {
                bail!("unrecognized argument {}", arg);
            }

            i += 1;
        }

        Ok(res)
    }
}

fn parse_month(value: &str) -> Result<Period> {
    let (year, month) = value
        .split_once('-')
        .ok_or_else(|| anyhow!("invalid month {}, expected YYYY-MM", value))?;
    let year: i32 = year.parse().with_context(|| format!("invalid year in {}", value))?;
    let month: u32 = month.parse().with_context(|| format!("invalid month in {}", value))?;
    Ok(Period::Month { year, month })
}

fn load_settings(config: Option<&PathBuf>) -> Result<LayoutSettings> {
    let store = match config {
        Some(path) => SettingsStore::new(path),
        None => match SettingsStore::default_location() {
            Some(store) => store,
            None => return Ok(LayoutSettings::default()),
        },
    };
    log::debug!("Loading settings from {}", store.path().display());
    store.load()
}

/// Run a layout pass and return its JSON rendering.
pub fn run(args: &Args) -> Result<String> {
    let settings = load_settings(args.config.as_ref())?;
    let events = load_events(&args.events)?;
    log::info!("Loaded {} events from {}", events.len(), args.events.display());

    let assembler = GridAssembler::new(settings);

    let value = match args.period {
        Period::Week(date) => {
            let week_start = week_containing(date, assembler.settings())?;
            let layout = assembler.layout_week_from_events(week_start, &events, &args.filter)?;
            serde_json::to_value(layout)?
        }
        Period::Month { year, month } => {
            serde_json::to_value(assembler.layout_month(year, month, &events, &args.filter)?)?
        }
    };

    let output = if args.compact {
        serde_json::to_string(&value)?
    } else {
        serde_json::to_string_pretty(&value)?
    };
    Ok(output)
}

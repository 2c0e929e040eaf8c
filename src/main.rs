// Care Calendar
// Command-line entry point: loads a schedule bundle and prints the active view

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use std::fs;
use std::path::PathBuf;

use care_calendar::calendar::views::time_grid::format_time_label;
use care_calendar::calendar::views::week_view::WeekCellKey;
use care_calendar::calendar::views::EMPTY_STATE_MESSAGE;
use care_calendar::calendar::{CalendarHost, CalendarState};
use care_calendar::models::event::CalendarEvent;
use care_calendar::models::raw::RawBundle;
use care_calendar::models::settings::CalendarSettings;
use care_calendar::models::view::{Navigation, ViewType};
use care_calendar::services::selection::Perspective;

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    log::info!("Starting care calendar for {}", args.bundle.display());

    let settings = CalendarSettings::load_or_default(args.config.as_deref());
    let content = fs::read_to_string(&args.bundle)
        .with_context(|| format!("Failed to read bundle {}", args.bundle.display()))?;
    let bundle: RawBundle = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse bundle {}", args.bundle.display()))?;

    let mut host = ConsoleHost;
    let today = Local::now().date_naive();
    let mut state = CalendarState::new(settings, today)?;
    state.replace_entities(Perspective::Clients, &bundle.clients);
    state.replace_entities(Perspective::CareWorkers, &bundle.care_workers);
    state.replace_entities(Perspective::OfficeStaff, &bundle.office_staff);
    state.replace_events(&bundle.schedules, &mut host);

    state.set_view(args.view);
    state.set_perspective(args.perspective);
    for id in args.select.iter().map(|id| id.trim()).filter(|id| !id.is_empty()) {
        let toggled = state.selection.collection_mut(args.perspective).toggle(id);
        if toggled.is_none() {
            log::warn!("Unknown {:?} id '{}' ignored", args.perspective, id);
        }
    }
    if let Some(date) = args.date {
        state.navigate(Navigation::Jump(date), &mut host);
    }

    print!("{}", render(&state));
    Ok(())
}

/// Print a care schedule bundle as a day, week or month calendar
#[derive(Parser, Debug)]
#[command(name = "care-calendar")]
#[command(version, about, long_about = None)]
struct Args {
    /// Schedule bundle (JSON with schedules, clients and staff)
    bundle: PathBuf,

    /// Anchor date, defaults to today
    #[arg(long, value_name = "YYYY-MM-DD", value_parser = parse_date)]
    date: Option<NaiveDate>,

    /// day, week or month
    #[arg(long, default_value = "week", value_parser = parse_view)]
    view: ViewType,

    /// clients, care-workers or office-staff
    #[arg(long, default_value = "clients", value_parser = parse_perspective)]
    perspective: Perspective,

    /// Entity ids to select under the chosen perspective
    #[arg(long, value_name = "ID", value_delimiter = ',')]
    select: Vec<String>,

    /// Settings file, defaults to the per-user config path
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|err| format!("invalid date '{}': {}", raw, err))
}

fn parse_view(raw: &str) -> Result<ViewType, String> {
    ViewType::parse(raw).ok_or_else(|| format!("unknown view '{}'", raw))
}

fn parse_perspective(raw: &str) -> Result<Perspective, String> {
    Perspective::parse(raw).ok_or_else(|| format!("unknown perspective '{}'", raw))
}

/// Prints host callbacks; the CLI has nowhere else to send them.
struct ConsoleHost;

impl CalendarHost for ConsoleHost {
    fn on_select_event(&mut self, event: &CalendarEvent) {
        log::info!("Selected {} ({})", event.title, event.id);
    }

    fn on_event_update(&mut self, event: &CalendarEvent) {
        log::info!("Updated {} to {} - {}", event.id, event.start, event.end);
    }

    fn on_navigate(&mut self, date: NaiveDate) {
        log::debug!("Navigated to {}", date);
    }

    fn on_data_warning(&mut self, message: &str) {
        eprintln!("warning: {}", message);
    }
}

fn render(state: &CalendarState) -> String {
    let mut out = String::new();
    let visible = state.visible();
    let (first, last) = state.view.visible_range(state.settings().first_day_of_week);
    out.push_str(&format!(
        "{:?} view, {} to {} ({:?})\n",
        state.view.active_view,
        first,
        last,
        state.selection.perspective()
    ));

    match state.view.active_view {
        ViewType::Day => {
            let layout = state.day_layout();
            out.push_str(&format!(
                "{} ({} column(s))\n",
                layout.date.format("%A %-d %B %Y"),
                layout.total_columns.max(1)
            ));
            if layout.is_empty() {
                out.push_str(&format!("  {}\n", EMPTY_STATE_MESSAGE));
            }
            for placed in &layout.placed {
                out.push_str(&format!(
                    "  {:>8} - {:>8}  [col {}]  {} {}\n",
                    format_time_label(placed.event.start.time()),
                    format_time_label(placed.event.end.time()),
                    placed.column + 1,
                    placed.event.kind.appearance().icon,
                    placed.event.title
                ));
            }
            for event in &layout.out_of_window {
                out.push_str(&format!(
                    "  (outside hours) {} {}\n",
                    event.start.time(),
                    event.title
                ));
            }
        }
        ViewType::Week => {
            let grid = state.week_grid();
            let expansion = state.week_expansion();
            if grid.is_empty() {
                out.push_str(&format!("{}\n", EMPTY_STATE_MESSAGE));
            }
            let counts = state.day_counts();
            for date in &grid.dates {
                let date = *date;
                let total = counts.get(&date).copied().unwrap_or(0);
                out.push_str(&format!("{} ({})\n", date.format("%a %-d %b"), total));
                for slot in &grid.slots {
                    let key = WeekCellKey {
                        date,
                        slot: slot.index,
                    };
                    let cell = grid.cell(key, expansion);
                    if cell.is_empty() {
                        continue;
                    }
                    let titles: Vec<&str> =
                        cell.visible().iter().map(|e| e.title.as_str()).collect();
                    out.push_str(&format!("  {:>8}  {}", slot.label, titles.join(", ")));
                    if let Some(more) = cell.more_label() {
                        out.push_str(&format!(" {}", more));
                    }
                    out.push('\n');
                }
            }
            for event in &grid.unbinned {
                out.push_str(&format!("(outside hours) {} {}\n", event.start, event.title));
            }
        }
        ViewType::Month => {
            let grid = state.month_grid();
            let expansion = state.month_expansion();
            out.push_str(&format!("{}-{:02}\n", grid.year, grid.month));
            if grid.is_empty() {
                out.push_str(&format!("{}\n", EMPTY_STATE_MESSAGE));
            }
            let listed = grid
                .days
                .iter()
                .filter(|day| day.in_current_month && !day.events.is_empty());
            for day in listed {
                let cell = grid.cell(day.date, expansion);
                let titles: Vec<&str> = cell.visible().iter().map(|e| e.title.as_str()).collect();
                out.push_str(&format!("  {:>2}  {}", day.date.format("%-d"), titles.join(", ")));
                if let Some(more) = cell.more_label() {
                    out.push_str(&format!(" {}", more));
                }
                out.push('\n');
            }
        }
    }

    if !visible.unallocated.is_empty() {
        out.push_str(&format!("Unallocated ({}):\n", visible.unallocated.len()));
        for event in &visible.unallocated {
            out.push_str(&format!("  {} {}\n", event.date(), event.title));
        }
    }
    out
}

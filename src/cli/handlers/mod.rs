use std::path::PathBuf;

use chrono::{DateTime, Local, Utc};

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io::{config_dir, read_config_from, resolve_data_path};
use crate::io::recovery::{self, prune_recovery, read_recovery_entries, recovery_log_path};
use crate::io::store::{Store, log_dir_for};
use crate::model::{DateKey, DateKeyError, DayRecord, YearMonth};
use crate::ops::day_ops::{self, DayError};
use crate::ops::grid;

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let data = cli.data.as_deref();

    match cli.command {
        None => {
            eprintln!("no command given (try `dp --help`)");
            Ok(())
        }
        Some(cmd) => match cmd {
            // Read commands
            Commands::Month(args) => cmd_month(args, data, json),
            Commands::Show(args) => cmd_show(args, data, json),
            Commands::List => cmd_list(data, json),

            // Write commands
            Commands::Note(args) => cmd_note(args, data, json),
            Commands::Todo(cmd) => cmd_todo(cmd, data, json),

            // Maintenance
            Commands::Recovery(cmd) => cmd_recovery(cmd, data, json),
        },
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Resolve the data file from `--data`, `$DAYPAD_DATA` and the config file
fn data_path(data: Option<&str>) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let dir = config_dir();
    let config = read_config_from(&dir)?;
    Ok(resolve_data_path(data, &config, &dir))
}

fn open_store(data: Option<&str>) -> Result<Store, Box<dyn std::error::Error>> {
    Ok(Store::open(&data_path(data)?)?)
}

/// A `YYYY-MM-DD` date, or `today`
fn parse_date(s: &str) -> Result<DateKey, DateKeyError> {
    if s.eq_ignore_ascii_case("today") {
        return Ok(DateKey::new(Local::now().date_naive()));
    }
    s.parse()
}

/// A `YYYY-MM` month
fn parse_month(s: &str) -> Result<YearMonth, String> {
    let first: DateKey = format!("{}-01", s)
        .parse()
        .map_err(|_| format!("invalid month \"{}\": expected YYYY-MM", s))?;
    Ok(YearMonth::of(first.date()))
}

/// Convert a 1-based CLI todo number to an index
fn todo_index(n: usize) -> Result<usize, String> {
    n.checked_sub(1)
        .ok_or_else(|| "todo numbers start at 1".to_string())
}

/// Report a day-op failure with the 1-based todo number the user typed
fn day_error(err: DayError, key: &DateKey) -> Box<dyn std::error::Error> {
    match err {
        DayError::IndexOutOfRange(i) => format!("no todo {} on {}", i + 1, key).into(),
        other => other.into(),
    }
}

fn print_day(key: &DateKey, record: &DayRecord, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(&day_to_json(key, record))?);
    } else {
        println!("{}", format_day(key, record));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_month(args: MonthArgs, data: Option<&str>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(data)?;
    let today = Local::now().date_naive();
    let ym = match args.month {
        Some(ref m) => parse_month(m)?,
        None => YearMonth::of(today),
    };
    let cells = grid::build_grid(ym.year, ym.month0 as i32, today, None, &store);

    if json {
        println!("{}", serde_json::to_string_pretty(&month_to_json(ym, &cells))?);
    } else {
        println!("{}", format_month(ym, &cells));
    }
    Ok(())
}

fn cmd_show(args: ShowArgs, data: Option<&str>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let key = parse_date(&args.date)?;
    let store = open_store(data)?;
    print_day(&key, &store.get(&key), json)
}

fn cmd_list(data: Option<&str>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(data)?;
    let dates = store.dates_with_data();

    if json {
        let entries: Vec<ListEntryJson> = dates
            .iter()
            .map(|d| list_entry_to_json(d, &store.get(d)))
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        for d in &dates {
            println!("{}", format_list_line(d, &store.get(d)));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_note(args: NoteArgs, data: Option<&str>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let key = parse_date(&args.date)?;
    let mut store = open_store(data)?;
    let record = day_ops::set_note(&mut store, &key, &args.text)?;

    if json {
        return print_day(&key, &record, true);
    }
    if record.note.is_empty() {
        println!("{} note cleared", key);
    } else {
        println!("{} note updated", key);
    }
    Ok(())
}

fn cmd_todo(cmd: TodoCmd, data: Option<&str>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store(data)?;

    let (key, record, message) = match cmd.action {
        TodoAction::Add(args) => {
            let key = parse_date(&args.date)?;
            let record = day_ops::push_todo(&mut store, &key, &args.text)
                .map_err(|e| day_error(e, &key))?
                .ok_or("todo text is empty")?;
            let message = format!("{} added todo {}", key, record.todos.len());
            (key, record, message)
        }
        TodoAction::Toggle(args) => {
            let key = parse_date(&args.date)?;
            let index = todo_index(args.index)?;
            let record = day_ops::toggle_todo_at(&mut store, &key, index)
                .map_err(|e| day_error(e, &key))?;
            let state = if record.todos[index].done {
                "done"
            } else {
                "not done"
            };
            let message = format!("{} todo {} {}", key, args.index, state);
            (key, record, message)
        }
        TodoAction::Rm(args) => {
            let key = parse_date(&args.date)?;
            let index = todo_index(args.index)?;
            let record = day_ops::remove_todo_at(&mut store, &key, index)
                .map_err(|e| day_error(e, &key))?;
            let message = format!("{} removed todo {}", key, args.index);
            (key, record, message)
        }
    };

    if json {
        print_day(&key, &record, true)
    } else {
        println!("{}", message);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Recovery log
// ---------------------------------------------------------------------------

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| format!("invalid timestamp \"{}\": {}", s, e))
}

fn cmd_recovery(cmd: RecoveryCmd, data: Option<&str>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let dir = log_dir_for(&data_path(data)?);

    match cmd.action {
        Some(RecoveryAction::Path) => {
            let path = recovery_log_path(&dir);
            let abs = std::path::absolute(&path).unwrap_or(path);
            println!("{}", abs.display());
            Ok(())
        }
        Some(RecoveryAction::Prune(args)) => {
            let before = args.before.as_deref().map(parse_timestamp).transpose()?;
            let removed = prune_recovery(&dir, before, args.all)?;
            println!("pruned {} recovery entries", removed);
            Ok(())
        }
        None => {
            let since = cmd.since.as_deref().map(parse_timestamp).transpose()?;
            let limit = cmd.limit.unwrap_or(10);
            let entries: Vec<recovery::RecoveryEntry> = read_recovery_entries(&dir, None)
                .into_iter()
                .filter(|e| since.is_none_or(|s| e.timestamp > s))
                .take(limit)
                .collect();

            if json {
                let values: Vec<serde_json::Value> = entries.iter().map(|e| e.to_json()).collect();
                println!("{}", serde_json::to_string_pretty(&values)?);
            } else if entries.is_empty() {
                println!("no recovery entries");
            } else {
                for entry in &entries {
                    print!("{}", entry.to_display_markdown());
                }
            }
            Ok(())
        }
    }
}

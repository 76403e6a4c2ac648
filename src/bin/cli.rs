use chrono::{Local, NaiveDateTime};
use clap::Parser;
use shift_schedule::{
    Interval, RestDayType, ScheduleConfig, ScheduleResult, ShiftSchedule, StartTimeType,
    check_horizon_days, default_horizon_days, export_intervals_to_csv, export_intervals_to_json,
    load_config_from_json, parse_weekday, save_config_to_json,
};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Parser)]
#[command(name = "shift-schedule", about = "Interactive work/rest shift schedule viewer")]
struct Args {
    /// JSON schedule configuration to start from
    #[arg(short, long, env = "SHIFT_SCHEDULE_CONFIG")]
    config: Option<PathBuf>,

    /// Fixed horizon in days (defaults to the end of the current month plus a week, at least 60)
    #[arg(short, long)]
    days: Option<u32>,
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s.trim(), DATETIME_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(s.trim(), "%Y-%m-%dT%H:%M"))
        .ok()
}

fn parse_day_list(s: &str) -> Result<Vec<u8>, String> {
    s.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| parse_weekday(p).ok_or_else(|| format!("Invalid weekday '{p}'")))
        .collect()
}

fn render_intervals_as_text_table(intervals: &[Interval]) -> String {
    let headers = ["#", "kind", "start", "end", "hours"];
    let rows: Vec<[String; 5]> = intervals
        .iter()
        .enumerate()
        .map(|(idx, interval)| {
            [
                (idx + 1).to_string(),
                interval.kind.to_string(),
                interval.start_time.format(DATETIME_FORMAT).to_string(),
                interval.end_time.format(DATETIME_FORMAT).to_string(),
                format!("{:.1}", interval.duration_hours()),
            ]
        })
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in &rows {
        for (ci, cell) in row.iter().enumerate() {
            widths[ci] = widths[ci].max(cell.len());
        }
    }

    let mut sep = String::from("+");
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let render_row = |cells: &[&str]| {
        let mut line = String::from("|");
        for (ci, cell) in cells.iter().enumerate() {
            line.push(' ');
            line.push_str(cell);
            line.push_str(&" ".repeat(widths[ci].saturating_sub(cell.len())));
            line.push_str(" |");
        }
        line
    };

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    out.push_str(&render_row(&headers));
    out.push('\n');
    out.push_str(&sep);
    out.push('\n');
    for row in &rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        out.push_str(&render_row(&cells));
        out.push('\n');
    }
    out.push_str(&sep);
    out
}

fn print_help() {
    println!(
        "Commands:\n  help                               Show this help\n  show                               Show generated intervals\n  status [YYYY-MM-DD HH:MM]          Show what is scheduled now (or at the given time)\n  set work <hours>                   Set shift length (1-24)\n  set rest <hours>                   Set rest length (1-168)\n  set start <YYYY-MM-DD HH:MM>       Set start date and time\n  set type <work|off>                Start time marks a shift start or a shift end\n  set rest-days <none|single|double|custom>\n                                     Set rest-day policy\n  set custom <csv>                   Custom rest days (0=Sun..6=Sat or names, e.g. sat,sun)\n  toggle <day>                       Toggle one custom rest day\n  days <n|auto>                      Set horizon in days (at most 3660)\n  config show                        Show configuration\n  config save <json_path>            Save configuration to JSON\n  config load <json_path>            Load configuration from JSON\n  export <json|csv> <path>           Write generated intervals to disk\n  quit|exit                          Exit"
    );
}

fn print_config(schedule: &ShiftSchedule) {
    let config = schedule.config();
    let custom = config
        .custom_rest_days
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join(",");
    println!("Work hours         : {}", config.work_hours);
    println!("Rest hours         : {}", config.rest_hours);
    println!("Start              : {}", config.start_date.format(DATETIME_FORMAT));
    println!("Start time type    : {}", config.start_time_type);
    println!("Rest day type      : {}", config.rest_day_type);
    println!("Custom rest days   : {}", custom);
    println!("Anchor             : {}", config.anchor().format(DATETIME_FORMAT));
    println!("Horizon days       : {}", schedule.horizon_days());
}

fn print_status(schedule: &ShiftSchedule, at: NaiveDateTime) {
    let status = schedule.status_at(at);
    match status.interval() {
        Some(interval) => println!(
            "Status at {}: {} ({} {} - {})",
            at.format(DATETIME_FORMAT),
            status.as_str(),
            status.message(),
            interval.start_time.format(DATETIME_FORMAT),
            interval.end_time.format(DATETIME_FORMAT)
        ),
        None => println!(
            "Status at {}: {} ({})",
            at.format(DATETIME_FORMAT),
            status.as_str(),
            status.message()
        ),
    }
    if let Some(next) = schedule.next_work_start(at) {
        println!("Next shift starts  : {}", next.start_time.format(DATETIME_FORMAT));
    }
}

/// Apply a configuration edit and regenerate. Without a fixed horizon the
/// horizon follows the start date.
fn apply<F>(schedule: &mut ShiftSchedule, fixed_days: Option<u32>, edit: F) -> ScheduleResult<()>
where
    F: FnOnce(&mut ScheduleConfig),
{
    schedule.update_config(edit)?;
    if fixed_days.is_none() {
        let days = default_horizon_days(schedule.config().start_date, now());
        schedule.set_horizon_days(days)?;
    }
    Ok(())
}

fn report(result: ScheduleResult<()>, schedule: &ShiftSchedule) {
    match result {
        Ok(()) => println!(
            "Schedule regenerated: {} intervals over {} days.",
            schedule.intervals().len(),
            schedule.horizon_days()
        ),
        Err(e) => println!("Error: {}", e),
    }
}

fn handle_set<'a>(
    schedule: &mut ShiftSchedule,
    fixed_days: Option<u32>,
    mut parts: impl Iterator<Item = &'a str>,
) {
    let usage = "Usage: set <work|rest|start|type|rest-days|custom> <value>";
    let Some(field) = parts.next() else {
        println!("{}", usage);
        return;
    };
    let value = parts.collect::<Vec<_>>().join(" ");
    if value.is_empty() {
        println!("{}", usage);
        return;
    }
    let result = match field {
        "work" => match value.parse::<f64>() {
            Ok(hours) => apply(schedule, fixed_days, |c| c.work_hours = hours),
            Err(_) => {
                println!("Invalid hours");
                return;
            }
        },
        "rest" => match value.parse::<f64>() {
            Ok(hours) => apply(schedule, fixed_days, |c| c.rest_hours = hours),
            Err(_) => {
                println!("Invalid hours");
                return;
            }
        },
        "start" => match parse_datetime(&value) {
            Some(start) => apply(schedule, fixed_days, |c| c.start_date = start),
            None => {
                println!("Invalid date (YYYY-MM-DD HH:MM)");
                return;
            }
        },
        "type" => match value.parse::<StartTimeType>() {
            Ok(kind) => apply(schedule, fixed_days, |c| c.start_time_type = kind),
            Err(e) => {
                println!("{}", e);
                return;
            }
        },
        "rest-days" => match value.parse::<RestDayType>() {
            Ok(kind) => apply(schedule, fixed_days, |c| {
                *c = c.clone().with_rest_day_type(kind);
            }),
            Err(e) => {
                println!("{}", e);
                return;
            }
        },
        "custom" => match parse_day_list(&value) {
            Ok(days) => apply(schedule, fixed_days, |c| {
                *c = c.clone().with_custom_rest_days(days);
            }),
            Err(e) => {
                println!("{}", e);
                return;
            }
        },
        other => {
            println!("Unknown field '{}'.", other);
            return;
        }
    };
    report(result, schedule);
}

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(io::stderr)
        .init();

    let config = match &args.config {
        Some(path) => match load_config_from_json(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => ScheduleConfig::default(),
    };

    if let Some(Err(e)) = args.days.map(check_horizon_days) {
        eprintln!("Error: {}", e);
        std::process::exit(2);
    }

    let mut fixed_days = args.days;
    let mut schedule = match fixed_days {
        Some(days) => ShiftSchedule::new(config, days),
        None => ShiftSchedule::covering(config, now()),
    };

    println!("Shift Schedule (CLI) - type 'help' for commands\n");
    print_status(&schedule, now());

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        match stdin.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "show" => println!("{}", render_intervals_as_text_table(schedule.intervals())),
            "status" => {
                let rest = parts.collect::<Vec<_>>().join(" ");
                if rest.is_empty() {
                    print_status(&schedule, now());
                } else {
                    match parse_datetime(&rest) {
                        Some(at) => print_status(&schedule, at),
                        None => println!("Invalid date (YYYY-MM-DD HH:MM)"),
                    }
                }
            }
            "set" => handle_set(&mut schedule, fixed_days, parts),
            "toggle" => match parts.next().and_then(parse_weekday) {
                Some(day) => {
                    let result = apply(&mut schedule, fixed_days, |c| {
                        c.rest_day_type = RestDayType::Custom;
                        c.toggle_custom_rest_day(day);
                    });
                    report(result, &schedule);
                }
                None => println!("Usage: toggle <0-6|weekday name>"),
            },
            "days" => match parts.next() {
                Some("auto") => {
                    fixed_days = None;
                    let days = default_horizon_days(schedule.config().start_date, now());
                    let result = schedule.set_horizon_days(days);
                    report(result, &schedule);
                }
                Some(value) => match value.parse::<u32>() {
                    Ok(days) => {
                        let result = schedule.set_horizon_days(days);
                        if result.is_ok() {
                            fixed_days = Some(days);
                        }
                        report(result, &schedule);
                    }
                    Err(_) => println!("Invalid number of days"),
                },
                None => println!("Usage: days <n|auto>"),
            },
            "config" => match parts.next() {
                Some("show") | None => print_config(&schedule),
                Some("save") => match parts.next() {
                    Some(path) => match save_config_to_json(schedule.config(), path) {
                        Ok(_) => println!("Configuration saved to {}.", path),
                        Err(e) => println!("Error saving configuration: {}", e),
                    },
                    None => println!("Usage: config save <json_path>"),
                },
                Some("load") => match parts.next() {
                    Some(path) => match load_config_from_json(path) {
                        Ok(loaded) => {
                            let result = apply(&mut schedule, fixed_days, |c| *c = loaded);
                            match result {
                                Ok(()) => {
                                    println!("Configuration loaded from {}.", path);
                                    print_config(&schedule);
                                }
                                Err(e) => println!("Error: {}", e),
                            }
                        }
                        Err(e) => println!("Error loading configuration: {}", e),
                    },
                    None => println!("Usage: config load <json_path>"),
                },
                Some(other) => {
                    println!("Unknown config command '{}'.", other);
                    println!("Usage: config show|save <json_path>|load <json_path>");
                }
            },
            "export" => {
                let fmt = parts.next();
                let path = parts.next();
                let result = match (fmt, path) {
                    (Some("json"), Some(path)) => {
                        export_intervals_to_json(schedule.intervals(), path).map(|_| path)
                    }
                    (Some("csv"), Some(path)) => {
                        export_intervals_to_csv(schedule.intervals(), path).map(|_| path)
                    }
                    _ => {
                        println!("Usage: export <json|csv> <path>");
                        continue;
                    }
                };
                match result {
                    Ok(path) => println!(
                        "Exported {} intervals to {}.",
                        schedule.intervals().len(),
                        path
                    ),
                    Err(e) => println!("Error exporting schedule: {}", e),
                }
            }
            _ => {
                println!("Unknown command. Type 'help'.");
            }
        }
    }
}

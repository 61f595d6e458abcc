use std::{
    env,
    io::Write,
    process::{Command, Stdio},
};

use anyhow::Context;
use chrono::{Local, NaiveDate};

use daybook::{
    calendar::{OverlapGroup, group_overlapping, groups_on_day},
    storage::config::Config,
    sync::sync_engine::SyncEngine,
    ui::GridConfig,
};

pub const USAGE: &str = "Usage: daybook [--server URL] [--agenda [YYYY/MM/DD]] [--sample]";

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CliMode {
    Default { sample: bool },
    AgendaDate(NaiveDate),
}

#[derive(Clone, Debug, PartialEq)]
pub struct CliOptions {
    pub mode: CliMode,
    pub server: Option<String>,
}

pub fn parse_cli_mode() -> Result<CliOptions, String> {
    parse_args(env::args().skip(1))
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<CliOptions, String> {
    let mut sample = false;
    let mut agenda_date = None;
    let mut server = None;
    let mut args = args.into_iter().peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--sample" => {
                sample = true;
            }
            "--server" => {
                let url = args.next().ok_or_else(|| "--server requires a URL".to_string())?;
                server = Some(url);
            }
            "--agenda" => {
                let target_date = match args.next_if(|next| !next.starts_with("--")) {
                    Some(date_str) => NaiveDate::parse_from_str(&date_str, "%Y/%m/%d")
                        .map_err(|_| format!("Invalid date '{}'. Use YYYY/MM/DD.", date_str))?,
                    None => Local::now().date_naive(),
                };
                agenda_date = Some(target_date);
            }
            "--help" => {
                println!("{}", USAGE);
                std::process::exit(0);
            }
            _ => return Err(format!("Unknown argument: {}", arg)),
        }
    }

    let mode = match agenda_date {
        Some(date) => CliMode::AgendaDate(date),
        None => CliMode::Default { sample },
    };
    Ok(CliOptions { mode, server })
}

pub async fn run_agenda_mode(config: &Config, date: NaiveDate) -> anyhow::Result<()> {
    let engine = SyncEngine::new(config).context("Failed to create scheduling client")?;

    let agenda = match engine.load_appointments().await {
        Ok(appointments) => {
            let groups = group_overlapping(&appointments);
            format_agenda_text(date, &groups_on_day(&groups, date), &config.grid)
        }
        Err(e) => {
            tracing::error!("Agenda fetch failed: {}", e);
            format_agenda_failure(date, &e.to_string())
        }
    };

    display_with_pager(&agenda).context("Failed to display agenda")
}

fn agenda_header(date: NaiveDate) -> Vec<String> {
    vec![format!("Agenda – {}", date.format("%A, %B %d, %Y")), String::new()]
}

fn format_agenda_failure(date: NaiveDate, error: &str) -> String {
    let mut lines = agenda_header(date);
    lines.push(format!("Could not load appointments: {}", error));
    lines.join("\n")
}

fn format_agenda_text(date: NaiveDate, groups: &[&OverlapGroup], grid: &GridConfig) -> String {
    let mut lines = agenda_header(date);

    if groups.is_empty() {
        lines.push("No appointments scheduled.".to_string());
    }

    for group in groups {
        let representative = group.representative();
        let mut line = format!("- {:<13} {}", representative.time_label(), representative.title);
        if group.more_count() > 0 {
            line.push_str(&format!(" (+{} more)", group.more_count()));
        }
        if grid.place(representative).is_none() {
            line.push_str(" (outside grid)");
        }
        lines.push(line);

        for member in group.members().iter().skip(1) {
            lines.push(format!("    {:<13} {}", member.time_label(), member.title));
        }
    }

    lines.join("\n")
}

fn display_with_pager(text: &str) -> std::io::Result<()> {
    let pager_value = env::var("PAGER").unwrap_or_else(|_| "less".to_string());
    let mut parts = pager_value.split_whitespace();
    let cmd = match parts.next() {
        Some(c) => c,
        None => {
            println!("{text}");
            return Ok(());
        }
    };
    let args: Vec<&str> = parts.collect();

    match Command::new(cmd)
        .args(&args)
        .stdin(Stdio::piped())
        .spawn()
    {
        Ok(mut child) => {
            if let Some(stdin) = child.stdin.as_mut() {
                stdin.write_all(text.as_bytes())?;
            }
            let _ = child.wait();
        }
        Err(_) => {
            println!("{text}");
        }
    }

    Ok(())
}

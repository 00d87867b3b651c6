//! Parsers for the tables printed by the `cf` client.
//!
//! Both the v6 layout (`instances` column, `2/3`) and the v7+ layout
//! (`processes` column, `web:2/3, worker:1/1`) are understood. Column
//! widths vary with content, so rows are split on whitespace rather than
//! on header offsets.

use crate::error::{FootprintError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppInstances {
    pub name: String,
    pub running: u64,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ParsedApps {
    pub rows: Vec<AppInstances>,
    /// Rows that could not be interpreted, verbatim.
    pub skipped: Vec<String>,
}

impl ParsedApps {
    pub fn running_total(&self) -> u64 {
        self.rows.iter().map(|row| row.running).sum()
    }
}

pub fn parse_spaces(text: &str) -> Result<Vec<String>> {
    if text.contains("No spaces found") {
        return Ok(Vec::new());
    }

    let mut lines = text.lines();
    if !lines.any(|line| line.trim() == "name") {
        return Err(unexpected("cf spaces", text));
    }

    Ok(lines
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

pub fn parse_instance_rows(text: &str) -> Result<ParsedApps> {
    if text.contains("No apps found") {
        return Ok(ParsedApps::default());
    }

    let mut lines = text.lines();
    if !lines.any(|line| is_header(line) && line.contains("requested state")) {
        return Err(unexpected("cf apps", text));
    }

    let mut parsed = ParsedApps::default();
    for line in lines.filter(|line| !line.trim().is_empty()) {
        match parse_app_row(line) {
            Some(row) => parsed.rows.push(row),
            None => parsed.skipped.push(line.trim_end().to_string()),
        }
    }
    Ok(parsed)
}

pub fn parse_service_count(text: &str) -> Result<u64> {
    if text.contains("No services found") || text.contains("No service instances found") {
        return Ok(0);
    }

    let mut lines = text.lines();
    if !lines.any(is_header) {
        return Err(unexpected("cf services", text));
    }

    Ok(lines.filter(|line| !line.trim().is_empty()).count() as u64)
}

fn is_header(line: &str) -> bool {
    line.split_whitespace().next() == Some("name")
}

fn parse_app_row(line: &str) -> Option<AppInstances> {
    let mut tokens = line.split_whitespace();
    let name = tokens.next()?;
    let state = tokens.next()?;

    let running = match state {
        "stopped" => 0,
        "started" => {
            let counts: Vec<u64> = tokens.map_while(running_count).collect();
            if counts.is_empty() {
                return None;
            }
            counts.iter().sum()
        }
        _ => return None,
    };

    Some(AppInstances {
        name: name.to_string(),
        running,
    })
}

/// Running count from a `2/3` or `web:2/3,` cell.
fn running_count(cell: &str) -> Option<u64> {
    let cell = cell.trim_end_matches(',');
    let cell = cell.rsplit_once(':').map_or(cell, |(_, counts)| counts);
    let (running, desired) = cell.split_once('/')?;
    desired.parse::<u64>().ok()?;
    running.parse().ok()
}

fn unexpected(command: &str, output: &str) -> FootprintError {
    FootprintError::UnexpectedOutput {
        command: command.to_string(),
        output: output.trim().to_string(),
    }
}

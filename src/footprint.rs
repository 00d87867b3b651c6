use serde::Serialize;

use crate::error::{FootprintError, Result};
use crate::parse::{parse_instance_rows, parse_service_count, parse_spaces};
use crate::platform::CfRunner;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpaceUsage {
    pub name: String,
    pub running_instances: u64,
    /// Informational only; services are not part of the energy estimate.
    pub service_count: u64,
    #[serde(skip)]
    pub skipped_rows: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Footprint {
    pub spaces: Vec<SpaceUsage>,
    pub total_instances: u64,
}

pub fn list_spaces(runner: &dyn CfRunner) -> Result<Vec<String>> {
    let spaces = parse_spaces(&runner.run_checked(&["spaces"])?)?;
    tracing::debug!(count = spaces.len(), ?spaces, "found spaces");
    Ok(spaces)
}

/// All spaces in listing order, or only `filter` when it names a known space.
pub fn select_spaces(all: Vec<String>, filter: Option<&str>) -> Result<Vec<String>> {
    match filter {
        None => Ok(all),
        Some(wanted) => all
            .into_iter()
            .find(|space| space == wanted)
            .map(|space| vec![space])
            .ok_or_else(|| FootprintError::SpaceNotFound(wanted.to_string())),
    }
}

pub fn count_space(runner: &dyn CfRunner, space: &str) -> Result<SpaceUsage> {
    runner.run_checked(&["target", "-s", space])?;

    let apps = parse_instance_rows(&runner.run_checked(&["apps"])?)?;
    for row in &apps.rows {
        tracing::debug!(space, app = %row.name, running = row.running, "app instances");
    }
    for row in &apps.skipped {
        tracing::warn!(space, row = %row, "skipping unparseable app row");
    }

    let service_count = parse_service_count(&runner.run_checked(&["services"])?)?;

    let usage = SpaceUsage {
        name: space.to_string(),
        running_instances: apps.running_total(),
        service_count,
        skipped_rows: apps.skipped.len(),
    };
    tracing::info!(
        space,
        instances = usage.running_instances,
        services = usage.service_count,
        "counted space"
    );
    Ok(usage)
}

pub fn collect(runner: &dyn CfRunner, filter: Option<&str>) -> Result<Footprint> {
    let spaces = select_spaces(list_spaces(runner)?, filter)?;

    let mut usages = Vec::with_capacity(spaces.len());
    for space in &spaces {
        usages.push(count_space(runner, space)?);
    }

    let total_instances = usages.iter().map(|u| u.running_instances).sum();
    Ok(Footprint {
        spaces: usages,
        total_instances,
    })
}

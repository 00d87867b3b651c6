use std::io::Write;

use serde::Serialize;

use crate::error::{FootprintError, Result};
use crate::estimate::{Estimate, PowerModel, estimate};
use crate::footprint::{Footprint, SpaceUsage};

pub struct Report<'a> {
    pub footprint: &'a Footprint,
    pub estimate: &'a Estimate,
    pub model: &'a PowerModel,
    pub verbose: bool,
}

pub fn print_report(out: &mut impl Write, format: &str, report: &Report<'_>) -> Result<()> {
    match format {
        "text" => print_text(out, report),
        "json" => print_json(out, report),
        other => Err(FootprintError::InvalidArg(format!(
            "Unknown output format: {other}"
        ))),
    }
}

fn space_estimate(report: &Report<'_>, space: &SpaceUsage) -> Result<Estimate> {
    estimate(
        space.running_instances,
        report.estimate.mode,
        report.estimate.carbon_intensity,
        report.model,
    )
}

fn print_text(out: &mut impl Write, report: &Report<'_>) -> Result<()> {
    if report.verbose {
        for space in &report.footprint.spaces {
            let (value, unit) = space_estimate(report, space)?.headline();
            write!(
                out,
                "Space {}: {} running instances, {} services, {:.2} {}",
                space.name, space.running_instances, space.service_count, value, unit
            )?;
            if space.skipped_rows > 0 {
                write!(out, " ({} unparseable rows skipped)", space.skipped_rows)?;
            }
            writeln!(out)?;
        }
        writeln!(out)?;
    }

    let (value, unit) = report.estimate.headline();
    writeln!(
        out,
        "Total running instances: {}",
        report.estimate.total_instances
    )?;
    writeln!(out, "TOTAL: {:.2} {}", value, unit)?;
    Ok(())
}

#[derive(Serialize)]
struct JsonSpace<'a> {
    #[serde(flatten)]
    usage: &'a SpaceUsage,
    estimate: Estimate,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    estimate: &'a Estimate,
    watts_per_container: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    spaces: Option<Vec<JsonSpace<'a>>>,
}

fn print_json(out: &mut impl Write, report: &Report<'_>) -> Result<()> {
    let spaces = if report.verbose {
        let mut rows = Vec::with_capacity(report.footprint.spaces.len());
        for usage in &report.footprint.spaces {
            rows.push(JsonSpace {
                usage,
                estimate: space_estimate(report, usage)?,
            });
        }
        Some(rows)
    } else {
        None
    };

    let json_report = JsonReport {
        estimate: report.estimate,
        watts_per_container: report.model.watts_per_container(),
        spaces,
    };
    serde_json::to_writer_pretty(&mut *out, &json_report)?;
    writeln!(out)?;
    Ok(())
}

use std::path::PathBuf;

use clap::Parser;

use crate::estimate::Mode;

#[derive(Parser, Debug)]
#[command(
    name = "cf_footprint",
    version,
    about = "Estimate the energy and carbon footprint of running Cloud Foundry apps"
)]
pub struct Cli {
    /// Estimate electricity footprint per year (in kWh/year)
    #[arg(short, long)]
    pub year: bool,

    /// Estimate carbon footprint per year (in kg CO2e/year). CARBON is the carbon
    /// intensity of the energy mix used by the servers, in gram CO2e/kWh. Overrides -y.
    #[arg(short, long, value_name = "CARBON")]
    pub carbon: Option<f64>,

    /// Estimate only for the provided space
    #[arg(short, long)]
    pub space: Option<String>,

    /// Print a per-space breakdown and parser warnings
    #[arg(short, long)]
    pub verbose: bool,

    #[arg(long, default_value = "text")]
    pub output: String,

    /// Cloud Foundry CLI binary to invoke
    #[arg(long, env = "CF_FOOTPRINT_CF_BIN")]
    pub cf_bin: Option<PathBuf>,

    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Fail instead of attempting a login when no session is active
    #[arg(long)]
    pub no_login: bool,
}

impl Cli {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(carbon) = self.carbon {
            if !carbon.is_finite() || carbon < 0.0 {
                return Err(format!("carbon intensity must be >= 0, got {carbon}"));
            }
        }

        if !matches!(self.output.as_str(), "text" | "json") {
            return Err(format!("unknown output format: {}", self.output));
        }

        if let Some(space) = &self.space {
            if space.trim().is_empty() {
                return Err("space name must not be empty".to_string());
            }
        }

        Ok(())
    }

    pub fn mode(&self) -> Mode {
        if self.carbon.is_some() {
            Mode::Carbon
        } else if self.year {
            Mode::Year
        } else {
            Mode::Power
        }
    }
}

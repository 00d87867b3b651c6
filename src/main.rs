mod cli;
mod config;
mod error;
mod estimate;
mod footprint;
mod output;
mod parse;
mod platform;
mod session;

use std::io::{self, IsTerminal};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::error::FootprintError;
use crate::output::Report;
use crate::platform::CfCli;
use crate::session::LoginPolicy;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = real_main(&cli) {
        eprintln!("error: {err}");
        std::process::exit(err.exit_code());
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "cf_footprint=debug" } else { "error" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn real_main(cli: &Cli) -> Result<(), FootprintError> {
    cli.validate().map_err(FootprintError::InvalidArg)?;

    let config = config::load(cli.config.as_deref())?;
    let cf_bin = cli.cf_bin.clone().unwrap_or_else(|| config.cf_bin.clone());
    let runner = CfCli::new(cf_bin);

    let policy = if !cli.no_login && io::stdin().is_terminal() {
        LoginPolicy::Interactive
    } else {
        LoginPolicy::Never
    };
    let password = std::env::var(config::PASSWORD_ENV).ok();
    session::ensure_authenticated(
        &runner,
        config.login.as_ref().filter(|_| !cli.no_login),
        password.as_deref(),
        policy,
    )?;

    let footprint = footprint::collect(&runner, cli.space.as_deref())?;
    let estimate = estimate::estimate(
        footprint.total_instances,
        cli.mode(),
        cli.carbon,
        &config.model,
    )?;

    let report = Report {
        footprint: &footprint,
        estimate: &estimate,
        model: &config.model,
        verbose: cli.verbose,
    };
    output::print_report(&mut io::stdout().lock(), &cli.output, &report)
}

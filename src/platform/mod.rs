use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::error::{FootprintError, Result};

#[cfg(test)]
pub mod mock;

pub struct CfOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// Boundary to the Cloud Foundry command-line client.
pub trait CfRunner {
    /// Runs `cf <args>` and captures its output.
    fn run(&self, args: &[&str]) -> Result<CfOutput>;

    /// Runs `cf <args>` attached to the terminal; returns whether it succeeded.
    fn run_interactive(&self, args: &[&str]) -> Result<bool>;

    /// Like `run`, but a non-zero exit becomes `CommandFailed`.
    fn run_checked(&self, args: &[&str]) -> Result<String> {
        let output = self.run(args)?;
        if output.success {
            Ok(output.stdout)
        } else {
            let stderr = if output.stderr.trim().is_empty() {
                output.stdout
            } else {
                output.stderr
            };
            Err(FootprintError::CommandFailed {
                command: render_command(args),
                stderr: stderr.trim().to_string(),
            })
        }
    }
}

pub struct CfCli {
    bin: PathBuf,
}

impl CfCli {
    pub fn new(bin: PathBuf) -> Self {
        Self { bin }
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(&self.bin);
        cmd.args(args);
        // Plain tables, no ANSI colouring.
        cmd.env("CF_COLOR", "false");
        cmd
    }
}

impl CfRunner for CfCli {
    fn run(&self, args: &[&str]) -> Result<CfOutput> {
        tracing::debug!(command = %render_command(args), "running platform client");
        let output = self
            .command(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|err| spawn_error(&self.bin, err))?;
        Ok(CfOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn run_interactive(&self, args: &[&str]) -> Result<bool> {
        tracing::debug!(command = %render_command(args), "running platform client interactively");
        let status = self
            .command(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|err| spawn_error(&self.bin, err))?;
        Ok(status.success())
    }
}

fn spawn_error(bin: &std::path::Path, err: std::io::Error) -> FootprintError {
    if err.kind() == std::io::ErrorKind::NotFound {
        FootprintError::InvalidArg(format!(
            "Cloud Foundry CLI not found at {}. Install it or pass --cf-bin.",
            bin.display()
        ))
    } else {
        FootprintError::Io(err)
    }
}

/// Shell-quoted `cf ...` command line with the value following `-p` masked.
pub fn render_command(args: &[&str]) -> String {
    let mut words = Vec::with_capacity(args.len() + 1);
    words.push("cf");
    let mut mask_next = false;
    for &arg in args {
        if mask_next {
            words.push("REDACTED");
            mask_next = false;
        } else {
            words.push(arg);
            mask_next = arg == "-p";
        }
    }
    shell_words::join(words)
}

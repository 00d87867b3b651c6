use crate::config::LoginConfig;
use crate::error::{FootprintError, Result};
use crate::platform::CfRunner;

/// How to recover when no platform session is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginPolicy {
    /// Hand the terminal to `cf login`.
    Interactive,
    Never,
}

pub fn is_authenticated(runner: &dyn CfRunner) -> Result<bool> {
    Ok(runner.run(&["target"])?.success)
}

pub fn ensure_authenticated(
    runner: &dyn CfRunner,
    login: Option<&LoginConfig>,
    password: Option<&str>,
    policy: LoginPolicy,
) -> Result<()> {
    if is_authenticated(runner)? {
        tracing::debug!("platform session is active");
        return Ok(());
    }

    match (login, password) {
        (Some(login), Some(password)) => {
            tracing::info!(api = %login.api, user = %login.user, "logging into Cloud Foundry");
            let mut args = vec![
                "login",
                "-a",
                login.api.as_str(),
                "-u",
                login.user.as_str(),
                "-p",
                password,
                "-o",
                login.org.as_str(),
            ];
            if let Some(space) = login.space.as_deref() {
                args.extend(["-s", space]);
            }
            let output = runner.run(&args)?;
            if !output.success {
                let reason = if output.stderr.trim().is_empty() {
                    output.stdout
                } else {
                    output.stderr
                };
                return Err(FootprintError::LoginFailed(reason.trim().to_string()));
            }
        }
        _ if policy == LoginPolicy::Interactive => {
            tracing::info!("no active session, starting interactive cf login");
            if !runner.run_interactive(&["login"])? {
                return Err(FootprintError::LoginFailed(
                    "interactive cf login did not succeed".to_string(),
                ));
            }
        }
        _ => return Err(FootprintError::NotAuthenticated),
    }

    if is_authenticated(runner)? {
        Ok(())
    } else {
        Err(FootprintError::NotAuthenticated)
    }
}

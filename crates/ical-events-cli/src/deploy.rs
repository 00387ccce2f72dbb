//! Cloudflare Pages deployment through the `wrangler` CLI.

use std::ffi::OsString;
use std::path::Path;
use std::process::ExitStatus;

use thiserror::Error;
use tokio::process::Command;
use tracing::info;

/// The deploy tool, looked up on `PATH`.
pub const WRANGLER: &str = "wrangler";

#[derive(Debug, Error)]
pub enum DeployError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("wrangler pages deploy failed ({status})")]
    Failed { status: ExitStatus },
}

/// Arguments for `wrangler pages deploy <dir> --project-name=<project>`.
pub fn deploy_args(output_dir: &Path, project: &str) -> Vec<OsString> {
    vec![
        "pages".into(),
        "deploy".into(),
        output_dir.as_os_str().to_owned(),
        format!("--project-name={}", project).into(),
    ]
}

/// Deploys `output_dir` to the given Pages project.
///
/// wrangler's own output is passed through to the terminal.
pub async fn deploy_pages(output_dir: &Path, project: &str) -> Result<(), DeployError> {
    run_deploy(WRANGLER, output_dir, project).await
}

async fn run_deploy(program: &str, output_dir: &Path, project: &str) -> Result<(), DeployError> {
    info!(program, dir = %output_dir.display(), project, "Deploying to Cloudflare Pages");

    let status = Command::new(program)
        .args(deploy_args(output_dir, project))
        .status()
        .await
        .map_err(|source| DeployError::Spawn {
            program: program.to_string(),
            source,
        })?;

    if !status.success() {
        return Err(DeployError::Failed { status });
    }
    Ok(())
}

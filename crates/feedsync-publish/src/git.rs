//! Publishing the feed file through git.
//!
//! Runs the `git` CLI as subprocesses inside a working copy that already has
//! an upstream configured. Every step must exit zero; the first failure stops
//! the sequence.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::PublishError;

/// What [`GitPublisher::publish`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    /// The staged feed matched `HEAD`; nothing was committed or pushed.
    Unchanged,
    /// A commit was created and pushed.
    Pushed,
}

/// Stages, commits, and pushes a single file.
#[derive(Debug, Clone)]
pub struct GitPublisher {
    repo_dir: PathBuf,
    pull_rebase: bool,
    skip_unchanged: bool,
    timeout: Duration,
}

impl GitPublisher {
    /// Publisher for the working copy at `repo_dir` with default behaviour:
    /// rebase onto the upstream before pushing, skip unchanged feeds, and a
    /// two-minute limit per git command.
    #[must_use]
    pub fn new(repo_dir: impl Into<PathBuf>) -> Self {
        Self {
            repo_dir: repo_dir.into(),
            pull_rebase: true,
            skip_unchanged: true,
            timeout: Duration::from_secs(120),
        }
    }

    /// Publisher for the current directory, configured from `config`.
    #[must_use]
    pub fn from_config(config: &feedsync_core::AppConfig) -> Self {
        Self::new(".")
            .pull_rebase(config.git_pull_rebase)
            .skip_unchanged(config.git_skip_unchanged)
            .timeout(Duration::from_secs(config.git_timeout_secs))
    }

    #[must_use]
    pub fn pull_rebase(mut self, enabled: bool) -> Self {
        self.pull_rebase = enabled;
        self
    }

    /// When `false`, an unchanged feed still produces an (empty) commit.
    #[must_use]
    pub fn skip_unchanged(mut self, enabled: bool) -> Self {
        self.skip_unchanged = enabled;
        self
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Stages `file`, commits it with a message stamped with `generated_at`,
    /// optionally runs `git pull --rebase`, and pushes.
    ///
    /// `file` is interpreted relative to the working copy.
    ///
    /// # Errors
    ///
    /// - [`PublishError::Spawn`] if `git` cannot be started.
    /// - [`PublishError::CommandFailed`] if any git step exits non-zero.
    /// - [`PublishError::Timeout`] if a step exceeds the configured limit.
    pub async fn publish(
        &self,
        file: &Path,
        generated_at: DateTime<Utc>,
    ) -> Result<PublishOutcome, PublishError> {
        let file = file.as_os_str();
        self.run_checked(&[OsStr::new("add"), OsStr::new("--"), file])
            .await?;

        let has_changes = self.has_staged_changes(file).await?;
        let message = format!(
            "Update feed at {}",
            generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
        );

        if has_changes {
            self.run_checked(&[
                OsStr::new("commit"),
                OsStr::new("-m"),
                OsStr::new(&message),
                OsStr::new("--"),
                file,
            ])
            .await?;
        } else if self.skip_unchanged {
            tracing::info!("feed unchanged; skipping commit and push");
            return Ok(PublishOutcome::Unchanged);
        } else {
            self.run_checked(&[
                OsStr::new("commit"),
                OsStr::new("--allow-empty"),
                OsStr::new("-m"),
                OsStr::new(&message),
            ])
            .await?;
        }

        if self.pull_rebase {
            self.run_checked(&[OsStr::new("pull"), OsStr::new("--rebase")])
                .await?;
        }
        self.run_checked(&[OsStr::new("push")]).await?;

        tracing::info!(message = %message, "feed pushed");
        Ok(PublishOutcome::Pushed)
    }

    /// `git diff --cached --quiet` exits 0 for no difference and 1 for a
    /// difference; anything else is a failure.
    async fn has_staged_changes(&self, file: &OsStr) -> Result<bool, PublishError> {
        let args = [
            OsStr::new("diff"),
            OsStr::new("--cached"),
            OsStr::new("--quiet"),
            OsStr::new("--"),
            file,
        ];
        let output = self.run(&args).await?;
        match output.status.code() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(command_failed(&args, &output)),
        }
    }

    async fn run_checked(&self, args: &[&OsStr]) -> Result<Output, PublishError> {
        let output = self.run(args).await?;
        if output.status.success() {
            Ok(output)
        } else {
            Err(command_failed(args, &output))
        }
    }

    async fn run(&self, args: &[&OsStr]) -> Result<Output, PublishError> {
        tracing::debug!(command = %render_command(args), "running git");
        let child = tokio::process::Command::new("git")
            .args(args)
            .current_dir(&self.repo_dir)
            .kill_on_drop(true)
            .output();

        match tokio::time::timeout(self.timeout, child).await {
            Ok(Ok(output)) => Ok(output),
            Ok(Err(source)) => Err(PublishError::Spawn {
                command: render_command(args),
                source,
            }),
            Err(_) => Err(PublishError::Timeout {
                command: render_command(args),
                timeout_secs: self.timeout.as_secs(),
            }),
        }
    }
}

fn command_failed(args: &[&OsStr], output: &Output) -> PublishError {
    PublishError::CommandFailed {
        command: render_command(args),
        status: output.status.to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
    }
}

fn render_command(args: &[&OsStr]) -> String {
    let mut rendered = String::from("git");
    for arg in args {
        rendered.push(' ');
        rendered.push_str(&arg.to_string_lossy());
    }
    rendered
}

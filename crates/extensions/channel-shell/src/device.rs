//! Pointer device backed by the `input` command.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use autotap_protocols::{ChannelError, ChannelKind, Point, PointerDevice};
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

use crate::command::{InputCommand, MotionAction};
use crate::error::ShellError;

pub struct ShellInputDevice {
    prefix: Vec<String>,
    timeout: Duration,
}

impl ShellInputDevice {
    /// `prefix` is the program and leading arguments every command is run
    /// through, e.g. `["adb", "shell"]`. Config validation rejects an empty
    /// prefix for the shell channel. A device built directly with one runs
    /// `input` on this host.
    pub fn new(prefix: Vec<String>, timeout: Duration) -> Self {
        Self { prefix, timeout }
    }

    pub fn prefix(&self) -> &[String] {
        &self.prefix
    }

    /// Full argv for a command, program first.
    pub fn argv(&self, command: &InputCommand) -> Result<Vec<String>, ShellError> {
        let mut argv = self.prefix.clone();
        argv.extend(command.args()?);
        Ok(argv)
    }

    /// Run a command to completion and return its stdout.
    pub async fn run(&self, command: &InputCommand) -> Result<String, ShellError> {
        let argv = self.argv(command)?;
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| ShellError::InvalidInput("empty command".to_string()))?;

        debug!("Running {}", argv.join(" "));
        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = timeout(self.timeout, cmd.output())
            .await
            .map_err(|_| ShellError::Timeout(self.timeout.as_secs()))?
            .map_err(|source| ShellError::Spawn {
                program: program.clone(),
                source,
            })?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            Err(ShellError::Failed {
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }

    async fn motion(&self, action: MotionAction, at: Point) -> Result<(), ChannelError> {
        self.run(&InputCommand::Motion { action, at }).await?;
        Ok(())
    }
}

#[async_trait]
impl PointerDevice for ShellInputDevice {
    fn kind(&self) -> ChannelKind {
        ChannelKind::SyntheticInputInjector
    }

    async fn is_available(&self) -> bool {
        match self.run(&InputCommand::Echo).await {
            Ok(stdout) => stdout.contains("ok"),
            Err(e) => {
                debug!("Shell input unavailable: {}", e);
                false
            }
        }
    }

    async fn pointer_down(&self, at: Point) -> Result<(), ChannelError> {
        self.motion(MotionAction::Down, at).await
    }

    async fn pointer_move(&self, to: Point) -> Result<(), ChannelError> {
        self.motion(MotionAction::Move, to).await
    }

    async fn pointer_up(&self, at: Point) -> Result<(), ChannelError> {
        self.motion(MotionAction::Up, at).await
    }

    async fn type_text(&self, text: &str) -> Result<(), ChannelError> {
        self.run(&InputCommand::Text(text.to_string())).await?;
        Ok(())
    }

    async fn send_key(&self, key_code: i32) -> Result<(), ChannelError> {
        self.run(&InputCommand::KeyEvent(key_code)).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "device_tests.rs"]
mod tests;

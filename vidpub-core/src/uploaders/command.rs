//! Uploader that delegates a platform's publishing mechanics to an external
//! program.
//!
//! The program is invoked with a sub-command as its first argument:
//!
//! - `auth` authenticates interactively or from stored credentials
//! - `status` exits 0 when a usable session exists
//! - `upload <VIDEO>` publishes; metadata JSON arrives on stdin and the last
//!   non-empty stdout line is the published URL
//! - `recover` resets the session before a retry (optional)
//!
//! `VIDPUB_PLATFORM`, `VIDPUB_DRY_RUN` and `VIDPUB_ATTEMPT` are set in the
//! program's environment.

use super::{DispatchOptions, PlatformUploader};
use crate::error::{CoreError, CoreResult, command_failed_error, command_start_error};
use crate::models::{Platform, UploadMetadata, UploadResult};

use log::{debug, info, warn};

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

/// Runs an external program per operation.
#[derive(Debug, Clone)]
pub struct CommandUploader {
    platform: Platform,
    program: PathBuf,
}

impl CommandUploader {
    pub fn new(platform: Platform, program: impl Into<PathBuf>) -> Self {
        Self {
            platform,
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    fn command(&self, action: &str) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg(action).env("VIDPUB_PLATFORM", self.platform.as_str());
        cmd
    }

    fn program_name(&self) -> String {
        self.program.display().to_string()
    }

    fn run(&self, mut cmd: Command, stdin: Option<&[u8]>) -> CoreResult<Output> {
        debug!("Running uploader command: {:?}", cmd);
        cmd.stdin(if stdin.is_some() { Stdio::piped() } else { Stdio::null() })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = cmd
            .spawn()
            .map_err(|e| command_start_error(self.program_name(), e))?;

        if let (Some(bytes), Some(mut pipe)) = (stdin, child.stdin.take()) {
            // Dropping the pipe afterwards closes the program's stdin. A
            // program that exits without reading it is judged by its status.
            if let Err(e) = pipe.write_all(bytes) {
                if e.kind() != std::io::ErrorKind::BrokenPipe {
                    return Err(e.into());
                }
            }
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            return Err(command_failed_error(
                self.program_name(),
                output.status.code(),
                &String::from_utf8_lossy(&output.stderr),
            ));
        }
        Ok(output)
    }

    fn try_upload(
        &mut self,
        video_path: &Path,
        metadata: &UploadMetadata,
        options: &DispatchOptions,
    ) -> CoreResult<String> {
        if !self.is_authenticated() {
            info!("{} session not authenticated, authenticating first", self.platform);
            self.authenticate()?;
        }

        let payload = serde_json::to_vec(metadata)?;
        let mut cmd = self.command("upload");
        cmd.arg(video_path)
            .env("VIDPUB_DRY_RUN", if options.dry_run { "true" } else { "false" })
            .env("VIDPUB_ATTEMPT", options.attempt.to_string());

        let output = self.run(cmd, Some(&payload))?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        stdout
            .lines()
            .map(str::trim)
            .rfind(|line| !line.is_empty())
            .map(str::to_string)
            .ok_or_else(|| {
                CoreError::OperationFailed(format!(
                    "{} printed no URL after uploading",
                    self.program_name()
                ))
            })
    }
}

impl PlatformUploader for CommandUploader {
    fn platform(&self) -> Platform {
        self.platform
    }

    fn authenticate(&mut self) -> CoreResult<()> {
        self.run(self.command("auth"), None)
            .map(|_| ())
            .map_err(|e| CoreError::AuthError {
                platform: self.platform.to_string(),
                message: e.to_string(),
            })
    }

    fn is_authenticated(&self) -> bool {
        match self.run(self.command("status"), None) {
            Ok(_) => true,
            Err(e) => {
                debug!("{} status check failed: {}", self.platform, e);
                false
            }
        }
    }

    fn upload(
        &mut self,
        video_path: &Path,
        metadata: &UploadMetadata,
        options: &DispatchOptions,
    ) -> UploadResult {
        match self.try_upload(video_path, metadata, options) {
            Ok(url) => UploadResult::success(self.platform, url),
            Err(e) => UploadResult::failure(self.platform, e.to_string()),
        }
    }

    fn recover(&mut self) {
        if let Err(e) = self.run(self.command("recover"), None) {
            warn!("{} recovery step failed (continuing): {}", self.platform, e);
        }
    }
}

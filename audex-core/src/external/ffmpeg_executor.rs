// ============================================================================
// audex-core/src/external/ffmpeg_executor.rs
// ============================================================================
//
// FFMPEG EXECUTOR: FFmpeg Process Management and Abstraction
//
// Spawning and supervising the ffmpeg child process behind two traits so the
// progress monitor can be driven by a mock in tests.
//
// KEY COMPONENTS:
// - TranscodeProcess: a running transcoder with a non-blocking liveness check
// - TranscodeSpawner: creates TranscodeProcess instances from a command
// - SidecarSpawner / SidecarProcess: implementation on top of ffmpeg-sidecar
//
// The sidecar process drains ffmpeg's stderr on a background thread. Without
// it a chatty ffmpeg would eventually block on a full pipe and never exit.

use crate::error::{CoreResult, command_start_error, command_wait_error};
use crate::external::ffmpeg_builder::TranscodeCommand;
use crate::outcome::ProcessExit;

use ffmpeg_sidecar::child::FfmpegChild;
use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::{FfmpegEvent, LogLevel};
use std::collections::VecDeque;
use std::thread::{self, JoinHandle};

/// Number of ffmpeg log lines kept for failure diagnostics.
const DIAGNOSTIC_TAIL_LINES: usize = 20;

// --- Transcoder Execution Abstraction ---

/// A running transcoder process.
pub trait TranscodeProcess: Send {
    /// Returns the exit information once the process has terminated,
    /// `None` while it is still alive. Never blocks.
    fn try_wait(&mut self) -> CoreResult<Option<ProcessExit>>;

    /// Terminates the process and reaps it.
    fn kill(&mut self) -> CoreResult<ProcessExit>;

    /// Last warning/error lines the transcoder printed, oldest first.
    fn diagnostics(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Something that can launch a [`TranscodeProcess`] without waiting for it.
pub trait TranscodeSpawner {
    type Process: TranscodeProcess;

    fn spawn(&self, command: &TranscodeCommand) -> CoreResult<Self::Process>;
}

// --- Concrete Implementation using ffmpeg-sidecar ---

/// Wrapper around `ffmpeg_sidecar::child::FfmpegChild` implementing `TranscodeProcess`.
pub struct SidecarProcess {
    child: FfmpegChild,
    name: String,
    drain: Option<JoinHandle<Vec<String>>>,
    diagnostics: Vec<String>,
}

impl SidecarProcess {
    fn new(mut child: FfmpegChild, name: String) -> Self {
        let drain = match child.iter() {
            Ok(events) => {
                let spawned = thread::Builder::new()
                    .name("ffmpeg-stderr".to_string())
                    .spawn(move || drain_events(events));
                match spawned {
                    Ok(handle) => Some(handle),
                    Err(e) => {
                        log::warn!("Could not start ffmpeg log reader: {}", e);
                        None
                    }
                }
            }
            Err(e) => {
                log::warn!("Could not attach to ffmpeg output: {}", e);
                None
            }
        };

        Self {
            child,
            name,
            drain,
            diagnostics: Vec::new(),
        }
    }

    /// Joins the stderr reader; only called once the child has exited.
    fn collect_diagnostics(&mut self) {
        if let Some(handle) = self.drain.take() {
            match handle.join() {
                Ok(lines) => self.diagnostics = lines,
                Err(_) => log::warn!("ffmpeg log reader panicked"),
            }
        }
    }
}

impl TranscodeProcess for SidecarProcess {
    fn try_wait(&mut self) -> CoreResult<Option<ProcessExit>> {
        let status = self
            .child
            .as_inner_mut()
            .try_wait()
            .map_err(|e| command_wait_error(self.name.as_str(), e))?;

        match status {
            Some(status) => {
                self.collect_diagnostics();
                Ok(Some(ProcessExit::from(status)))
            }
            None => Ok(None),
        }
    }

    fn kill(&mut self) -> CoreResult<ProcessExit> {
        if let Err(e) = self.child.kill() {
            // Already exited between the last poll and the kill.
            log::debug!("Kill of {} returned: {}", self.name, e);
        }
        let status = self
            .child
            .wait()
            .map_err(|e| command_wait_error(self.name.as_str(), e))?;
        self.collect_diagnostics();
        Ok(ProcessExit::from(status))
    }

    fn diagnostics(&self) -> Vec<String> {
        self.diagnostics.clone()
    }
}

fn drain_events(events: impl Iterator<Item = FfmpegEvent>) -> Vec<String> {
    let mut tail: VecDeque<String> = VecDeque::with_capacity(DIAGNOSTIC_TAIL_LINES);
    let mut keep = |line: String| {
        if tail.len() == DIAGNOSTIC_TAIL_LINES {
            tail.pop_front();
        }
        tail.push_back(line);
    };

    for event in events {
        match event {
            FfmpegEvent::Log(LogLevel::Error | LogLevel::Fatal, line) => {
                log::error!("ffmpeg: {}", line);
                keep(line);
            }
            FfmpegEvent::Log(LogLevel::Warning, line) => {
                log::warn!("ffmpeg: {}", line);
                keep(line);
            }
            FfmpegEvent::Log(_, line) => log::debug!("ffmpeg: {}", line),
            FfmpegEvent::Error(message) => {
                log::warn!("ffmpeg: {}", message);
                keep(message);
            }
            _ => {}
        }
    }

    tail.into_iter().collect()
}

/// Concrete implementation of `TranscodeSpawner` using `ffmpeg-sidecar`.
#[derive(Debug, Clone, Default)]
pub struct SidecarSpawner;

impl TranscodeSpawner for SidecarSpawner {
    type Process = SidecarProcess;

    fn spawn(&self, command: &TranscodeCommand) -> CoreResult<Self::Process> {
        let mut cmd = match &command.program {
            Some(path) => FfmpegCommand::new_with_path(path),
            None => FfmpegCommand::new(),
        };
        cmd.args(&command.args);

        let name = command.program_name();
        let mut child = cmd
            .spawn()
            .map_err(|e| command_start_error(name.as_str(), e))?;
        log::debug!("Spawned {} (pid {})", name, child.as_inner_mut().id());

        Ok(SidecarProcess::new(child, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_keeps_only_problem_lines() {
        let events = vec![
            FfmpegEvent::Log(LogLevel::Info, "Stream mapping:".to_string()),
            FfmpegEvent::Log(LogLevel::Warning, "Guessed channel layout".to_string()),
            FfmpegEvent::Log(LogLevel::Error, "Invalid data found".to_string()),
        ];
        let tail = drain_events(events.into_iter());
        assert_eq!(tail, vec!["Guessed channel layout", "Invalid data found"]);
    }

    #[test]
    fn test_drain_tail_is_bounded() {
        let events = (0..50).map(|i| FfmpegEvent::Log(LogLevel::Error, format!("line {i}")));
        let tail = drain_events(events);
        assert_eq!(tail.len(), DIAGNOSTIC_TAIL_LINES);
        assert_eq!(tail.first().map(String::as_str), Some("line 30"));
        assert_eq!(tail.last().map(String::as_str), Some("line 49"));
    }

    #[test]
    fn test_missing_binary_is_launch_failure() {
        let command = TranscodeCommand {
            program: Some("/surely/not/a/real/ffmpeg-binary".into()),
            args: vec!["-version".into()],
        };
        let err = SidecarSpawner.spawn(&command).err().expect("spawn must fail");
        assert_eq!(
            err.failure_kind(),
            crate::outcome::FailureKind::LaunchFailure
        );
    }
}

// audex-core/src/external/mocks.rs

// --- Mocking Infrastructure (for testing) ---

// Compiled for this crate's own tests and for dependents enabling "test-mocks".

use super::ffmpeg_builder::TranscodeCommand;
use super::ffmpeg_executor::{TranscodeProcess, TranscodeSpawner};
use crate::error::{CoreResult, command_start_error, command_wait_error};
use crate::outcome::ProcessExit;

use std::io;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// How a mock process behaves once spawned.
#[derive(Debug, Clone)]
enum MockBehaviour {
    /// Alive for `alive_polls` liveness checks, then exits with `code`.
    Exit { alive_polls: usize, code: i32 },
    /// Spawning fails with the given I/O error kind.
    SpawnError(io::ErrorKind),
    /// The liveness check fails after `alive_polls` successful checks.
    WaitError { alive_polls: usize },
}

/// Mock implementation of TranscodeProcess.
#[derive(Debug)]
pub struct MockProcess {
    alive_polls: usize,
    polls: usize,
    total_polls: Arc<AtomicUsize>,
    code: i32,
    fail_wait: bool,
    killed: Arc<AtomicBool>,
    diagnostics: Vec<String>,
}

impl TranscodeProcess for MockProcess {
    fn try_wait(&mut self) -> CoreResult<Option<ProcessExit>> {
        self.total_polls.fetch_add(1, Ordering::SeqCst);
        if self.polls < self.alive_polls {
            self.polls += 1;
            return Ok(None);
        }
        if self.fail_wait {
            return Err(command_wait_error(
                "ffmpeg (mock)",
                io::Error::other("mock liveness check failed"),
            ));
        }
        Ok(Some(ProcessExit::from_code(self.code)))
    }

    fn kill(&mut self) -> CoreResult<ProcessExit> {
        self.killed.store(true, Ordering::SeqCst);
        Ok(ProcessExit { code: None })
    }

    fn diagnostics(&self) -> Vec<String> {
        self.diagnostics.clone()
    }
}

/// Mock implementation of TranscodeSpawner recording every command it receives.
#[derive(Debug, Clone)]
pub struct MockSpawner {
    behaviour: MockBehaviour,
    diagnostics: Vec<String>,
    received: Arc<Mutex<Vec<TranscodeCommand>>>,
    polls: Arc<AtomicUsize>,
    killed: Arc<AtomicBool>,
}

impl MockSpawner {
    fn with_behaviour(behaviour: MockBehaviour) -> Self {
        Self {
            behaviour,
            diagnostics: Vec::new(),
            received: Arc::default(),
            polls: Arc::default(),
            killed: Arc::default(),
        }
    }

    /// Processes stay alive for `alive_polls` checks and then exit with `code`.
    pub fn exiting_after(alive_polls: usize, code: i32) -> Self {
        Self::with_behaviour(MockBehaviour::Exit { alive_polls, code })
    }

    /// Processes that only stop when killed.
    pub fn running_forever() -> Self {
        Self::exiting_after(usize::MAX, 0)
    }

    pub fn failing_spawn(kind: io::ErrorKind) -> Self {
        Self::with_behaviour(MockBehaviour::SpawnError(kind))
    }

    pub fn failing_wait(alive_polls: usize) -> Self {
        Self::with_behaviour(MockBehaviour::WaitError { alive_polls })
    }

    /// Lines reported by `TranscodeProcess::diagnostics`.
    pub fn with_diagnostics(mut self, lines: &[&str]) -> Self {
        self.diagnostics = lines.iter().map(|l| l.to_string()).collect();
        self
    }

    pub fn received_commands(&self) -> Vec<TranscodeCommand> {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn spawn_count(&self) -> usize {
        self.received_commands().len()
    }

    /// Total liveness checks across all spawned processes.
    pub fn poll_count(&self) -> usize {
        self.polls.load(Ordering::SeqCst)
    }

    pub fn was_killed(&self) -> bool {
        self.killed.load(Ordering::SeqCst)
    }
}

impl TranscodeSpawner for MockSpawner {
    type Process = MockProcess;

    fn spawn(&self, command: &TranscodeCommand) -> CoreResult<Self::Process> {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(command.clone());
        log::debug!("Mock spawn: {}", command);

        let (alive_polls, code, fail_wait) = match self.behaviour {
            MockBehaviour::Exit { alive_polls, code } => (alive_polls, code, false),
            MockBehaviour::WaitError { alive_polls } => (alive_polls, 0, true),
            MockBehaviour::SpawnError(kind) => {
                return Err(command_start_error("ffmpeg (mock)", io::Error::from(kind)));
            }
        };

        Ok(MockProcess {
            alive_polls,
            polls: 0,
            total_polls: Arc::clone(&self.polls),
            code,
            fail_wait,
            killed: Arc::clone(&self.killed),
            diagnostics: self.diagnostics.clone(),
        })
    }
}

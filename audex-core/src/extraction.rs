// ============================================================================
// audex-core/src/extraction.rs
// ============================================================================
//
// EXTRACTION: Audio Extraction Orchestration
//
// This module coordinates a single extraction request from validation to the
// terminal outcome. It is the only place where errors are turned into
// `ExtractionOutcome` values; nothing below it knows about outcomes.
//
// WORKFLOW:
// 1. Validate the configuration and the request paths
// 2. Reserve the destination so overlapping requests are rejected
// 3. Build the profile-specific ffmpeg command
// 4. Spawn ffmpeg without blocking
// 5. Drive the progress monitor until the process stops or is cancelled
// 6. Classify the result
//
// A transcoder that is not seen to stop is killed before the destination is
// released, including when the progress sink panics.
//
// KEY COMPONENTS:
// - Extractor: configured orchestrator, generic over the spawner
// - ExtractionJob: an extraction running on its own worker thread
// - extract: convenience entry point with the default configuration

// ---- Internal crate imports ----
use crate::config::ExtractConfig;
use crate::error::{CoreError, CoreResult, command_failed_error};
use crate::external::{ExtractionCommandBuilder, SidecarSpawner, TranscodeProcess, TranscodeSpawner};
use crate::monitor::{CancelHandle, CancelToken, MonitorState, ProgressMonitor, cancellation};
use crate::outcome::{ExtractionOutcome, FailureKind};
use crate::progress::ProgressSink;
use crate::validation::validate_paths;

// ---- External crate imports ----
use log::{debug, error, info, warn};

// ---- Standard library imports ----
use std::collections::HashSet;
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};

// ============================================================================
// REQUEST
// ============================================================================

/// Source video and destination audio file of one extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRequest {
    pub source: PathBuf,
    pub destination: PathBuf,
}

impl ExtractionRequest {
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }
}

// ============================================================================
// DESTINATION RESERVATION
// ============================================================================

type ActiveDestinations = Arc<Mutex<HashSet<PathBuf>>>;

/// Holds a destination for the lifetime of one request.
struct DestinationGuard {
    active: ActiveDestinations,
    key: PathBuf,
}

impl DestinationGuard {
    fn acquire(active: &ActiveDestinations, destination: &Path) -> CoreResult<Self> {
        let key = reservation_key(destination);
        let mut set = active.lock().unwrap_or_else(PoisonError::into_inner);
        if !set.insert(key.clone()) {
            return Err(CoreError::DestinationBusy(destination.to_path_buf()));
        }
        Ok(Self {
            active: Arc::clone(active),
            key,
        })
    }
}

impl Drop for DestinationGuard {
    fn drop(&mut self) {
        self.active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
    }
}

/// Resolves `..` and symlinks in the destination's directory so that every
/// spelling of the same file maps to one key. The file itself usually does
/// not exist yet, so only the parent is canonicalized.
fn reservation_key(destination: &Path) -> PathBuf {
    let parent = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if let Some(name) = destination.file_name() {
        if let Ok(dir) = fs::canonicalize(parent) {
            return dir.join(name);
        }
    }
    std::path::absolute(destination).unwrap_or_else(|_| destination.to_path_buf())
}

// ============================================================================
// PROCESS GUARD
// ============================================================================

/// Owns a spawned transcoder and kills it on drop unless it was seen to stop.
struct SpawnedProcess<P: TranscodeProcess> {
    process: P,
    stopped: bool,
}

impl<P: TranscodeProcess> SpawnedProcess<P> {
    fn new(process: P) -> Self {
        Self {
            process,
            stopped: false,
        }
    }
}

impl<P: TranscodeProcess> Drop for SpawnedProcess<P> {
    fn drop(&mut self) {
        if self.stopped {
            return;
        }
        match self.process.kill() {
            Ok(exit) => debug!("Killed abandoned transcoder ({})", exit),
            Err(e) => debug!("Kill of abandoned transcoder returned: {}", e),
        }
    }
}

// ============================================================================
// EXTRACTOR
// ============================================================================

/// Runs extraction requests with a fixed configuration.
///
/// Clones share the set of destinations currently being written, so two
/// concurrent requests for the same file are rejected even across threads.
///
/// # Examples
///
/// ```rust,no_run
/// use audex_core::{ExtractConfig, ExtractionRequest, Extractor};
///
/// let extractor = Extractor::new(ExtractConfig::default());
/// let request = ExtractionRequest::new("movie.mp4", "movie.mp3");
/// let outcome = extractor.extract(&request, &mut |text: &str| println!("{text}"));
/// println!("{outcome:?}");
/// ```
#[derive(Debug, Clone)]
pub struct Extractor<S = SidecarSpawner> {
    config: ExtractConfig,
    spawner: S,
    active: ActiveDestinations,
}

impl Extractor<SidecarSpawner> {
    pub fn new(config: ExtractConfig) -> Self {
        Self::with_spawner(config, SidecarSpawner)
    }
}

impl<S: TranscodeSpawner> Extractor<S> {
    /// Uses a custom spawner, e.g. `external::mocks::MockSpawner` in tests.
    pub fn with_spawner(config: ExtractConfig, spawner: S) -> Self {
        Self {
            config,
            spawner,
            active: ActiveDestinations::default(),
        }
    }

    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    /// Runs one extraction to completion on the calling thread.
    pub fn extract(&self, request: &ExtractionRequest, sink: &mut dyn ProgressSink) -> ExtractionOutcome {
        self.extract_with_cancel(request, sink, &mut CancelToken::never())
    }

    /// Like [`Extractor::extract`], stopping early when `cancel` fires.
    pub fn extract_with_cancel(
        &self,
        request: &ExtractionRequest,
        sink: &mut dyn ProgressSink,
        cancel: &mut CancelToken,
    ) -> ExtractionOutcome {
        info!(
            "Extraction requested: {} -> {}",
            request.source.display(),
            request.destination.display()
        );

        let result = panic::catch_unwind(AssertUnwindSafe(|| self.run(request, sink, cancel)))
            .unwrap_or_else(|_| {
                Err(CoreError::OperationFailed(
                    "extraction panicked while the transcoder was running".to_string(),
                ))
            });

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(err) => {
                let outcome = ExtractionOutcome::from_error(&err);
                match err.failure_kind() {
                    FailureKind::Unknown => error!("Extraction failed: {:?}", err),
                    kind => warn!("Extraction rejected ({}): {}", kind, err),
                }
                outcome
            }
        };

        debug!("Extraction outcome: {:?}", outcome);
        outcome
    }

    fn run(
        &self,
        request: &ExtractionRequest,
        sink: &mut dyn ProgressSink,
        cancel: &mut CancelToken,
    ) -> CoreResult<ExtractionOutcome> {
        self.config.validate()?;
        let profile = validate_paths(
            &request.source,
            &request.destination,
            self.config.rejects_existing_destination(),
        )?;
        let _reservation = DestinationGuard::acquire(&self.active, &request.destination)?;

        if cancel.is_cancelled() {
            info!("Extraction cancelled before launch");
            return Ok(ExtractionOutcome::Cancelled {
                elapsed: std::time::Duration::ZERO,
            });
        }

        info!("Selected profile: {}", profile);
        let command = ExtractionCommandBuilder::new(
            &request.source,
            &request.destination,
            profile.encode_params(),
        )
        .with_config(&self.config)
        .build();
        debug!("ffmpeg command: {}", command);

        // Declared after the reservation so it is dropped first.
        let mut spawned = SpawnedProcess::new(self.spawner.spawn(&command)?);

        let mut monitor = ProgressMonitor::new(self.config.tick_interval, self.config.locale);
        let report = monitor.run(&mut spawned.process, sink, cancel)?;
        spawned.stopped = true;

        match report.state {
            MonitorState::Cancelled => {
                remove_partial_output(&request.destination);
                info!("Extraction cancelled after {:.1}s", report.elapsed.as_secs_f64());
                Ok(ExtractionOutcome::Cancelled {
                    elapsed: report.elapsed,
                })
            }
            _ => {
                if !report.exit.success() {
                    if self.config.strict_exit_status {
                        let diagnostics = spawned.process.diagnostics();
                        let detail = if diagnostics.is_empty() {
                            "no diagnostics captured".to_string()
                        } else {
                            diagnostics.join("; ")
                        };
                        return Err(command_failed_error(command.program_name(), report.exit, detail));
                    }
                    warn!(
                        "{} finished with {}; reporting completion anyway",
                        command.program_name(),
                        report.exit
                    );
                }

                info!(
                    "Extraction finished in {:.1}s: {}",
                    report.elapsed.as_secs_f64(),
                    request.destination.display()
                );
                Ok(ExtractionOutcome::Success {
                    elapsed: report.elapsed,
                    destination: request.destination.clone(),
                    exit: report.exit,
                })
            }
        }
    }
}

impl<S> Extractor<S>
where
    S: TranscodeSpawner + Clone + Send + 'static,
{
    /// Starts the extraction on a dedicated worker thread.
    pub fn spawn<K>(&self, request: ExtractionRequest, mut sink: K) -> ExtractionJob
    where
        K: ProgressSink + 'static,
    {
        let (handle, mut token) = cancellation();
        let extractor = self.clone();

        let worker = thread::Builder::new()
            .name("audex-extract".to_string())
            .spawn(move || extractor.extract_with_cancel(&request, &mut sink, &mut token));

        match worker {
            Ok(worker) => ExtractionJob {
                cancel: handle,
                state: JobState::Running(worker),
            },
            Err(e) => {
                error!("Could not start extraction worker: {:?}", e);
                ExtractionJob {
                    cancel: handle,
                    state: JobState::Finished(ExtractionOutcome::from_error(&CoreError::Io(e))),
                }
            }
        }
    }
}

// ============================================================================
// BACKGROUND JOBS
// ============================================================================

enum JobState {
    Running(JoinHandle<ExtractionOutcome>),
    Finished(ExtractionOutcome),
}

/// An extraction running on its own thread.
pub struct ExtractionJob {
    cancel: CancelHandle,
    state: JobState,
}

impl ExtractionJob {
    /// Requests cancellation; the job still has to be waited for.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    pub fn is_finished(&self) -> bool {
        match &self.state {
            JobState::Running(worker) => worker.is_finished(),
            JobState::Finished(_) => true,
        }
    }

    /// Blocks until the worker is done and returns its outcome.
    pub fn wait(self) -> ExtractionOutcome {
        match self.state {
            JobState::Finished(outcome) => outcome,
            JobState::Running(worker) => worker.join().unwrap_or_else(|_| {
                error!("Extraction worker panicked");
                ExtractionOutcome::from_error(&CoreError::OperationFailed(
                    "extraction worker panicked".to_string(),
                ))
            }),
        }
    }
}

fn remove_partial_output(destination: &Path) {
    match fs::remove_file(destination) {
        Ok(()) => debug!("Removed partial output {}", destination.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!("Could not remove partial output {}: {}", destination.display(), e),
    }
}

/// Extracts the audio track of `source` into `destination` using the
/// default configuration.
pub fn extract(
    source: impl AsRef<Path>,
    destination: impl AsRef<Path>,
    sink: &mut dyn ProgressSink,
) -> ExtractionOutcome {
    let request = ExtractionRequest::new(source.as_ref(), destination.as_ref());
    Extractor::new(ExtractConfig::default()).extract(&request, sink)
}

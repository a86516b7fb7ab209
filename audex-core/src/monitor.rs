//! Progress monitoring of a running transcoder.
//!
//! The monitor polls the process once per tick and hands the elapsed time to
//! the progress sink. Ticks are spaced by a channel receive with a timeout,
//! so a [`CancelHandle`] can interrupt the wait at any moment.
//!
//! ```text
//! Running --(tick, still alive)--> Running
//! Running --(process exited)-----> Completed
//! Running --(cancel requested)---> Cancelled
//! ```

use crate::error::CoreResult;
use crate::external::TranscodeProcess;
use crate::outcome::ProcessExit;
use crate::progress::{ProgressLocale, ProgressSink};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::time::{Duration, Instant};

/// Requests cancellation of a running extraction. Cheap to clone.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    tx: Sender<()>,
}

impl CancelHandle {
    /// Asks the monitor to stop the transcoder. Repeated calls are harmless.
    pub fn cancel(&self) {
        // A full channel already holds a pending request.
        let _ = self.tx.try_send(());
    }
}

/// Receiving side of a cancellation request, owned by the monitor.
#[derive(Debug)]
pub struct CancelToken {
    rx: Receiver<()>,
}

impl CancelToken {
    /// A token that is never cancelled.
    pub fn never() -> Self {
        Self {
            rx: crossbeam_channel::never(),
        }
    }

    /// Non-blocking check for a pending cancellation request.
    pub fn is_cancelled(&mut self) -> bool {
        match self.rx.try_recv() {
            Ok(()) => true,
            Err(TryRecvError::Empty) => false,
            Err(TryRecvError::Disconnected) => {
                self.rx = crossbeam_channel::never();
                false
            }
        }
    }

    /// Waits up to `timeout`; returns `true` if cancellation was requested.
    fn wait(&mut self, timeout: Duration) -> bool {
        match self.rx.recv_timeout(timeout) {
            Ok(()) => true,
            Err(RecvTimeoutError::Timeout) => false,
            Err(RecvTimeoutError::Disconnected) => {
                // Every handle is gone; nobody can cancel any more.
                self.rx = crossbeam_channel::never();
                self.rx.recv_timeout(timeout).is_ok()
            }
        }
    }
}

/// Creates a connected handle/token pair.
pub fn cancellation() -> (CancelHandle, CancelToken) {
    let (tx, rx) = crossbeam_channel::bounded(1);
    (CancelHandle { tx }, CancelToken { rx })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    Idle,
    Running,
    Completed,
    Cancelled,
}

/// What the monitor observed by the time it reached a terminal state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorReport {
    pub state: MonitorState,
    /// Time from launch until termination was observed
    pub elapsed: Duration,
    /// Progress updates sent while the process was alive (excludes the final one)
    pub ticks: u32,
    pub exit: ProcessExit,
}

pub struct ProgressMonitor {
    tick_interval: Duration,
    locale: ProgressLocale,
    state: MonitorState,
}

impl ProgressMonitor {
    pub fn new(tick_interval: Duration, locale: ProgressLocale) -> Self {
        Self {
            tick_interval,
            locale,
            state: MonitorState::Idle,
        }
    }

    pub fn state(&self) -> MonitorState {
        self.state
    }

    /// Drives the process to a terminal state.
    ///
    /// The sink receives one update per tick while the process is alive and
    /// exactly one more once it has stopped. Errors from the liveness check
    /// are returned as-is; the caller decides what to do with the process.
    pub fn run<P>(
        &mut self,
        process: &mut P,
        sink: &mut dyn ProgressSink,
        cancel: &mut CancelToken,
    ) -> CoreResult<MonitorReport>
    where
        P: TranscodeProcess + ?Sized,
    {
        let started = Instant::now();
        let mut ticks: u32 = 0;
        self.state = MonitorState::Running;

        loop {
            if let Some(exit) = process.try_wait()? {
                return Ok(self.finish(MonitorState::Completed, started, ticks, exit, sink));
            }

            sink.report(&self.locale.format_elapsed(started.elapsed()));
            ticks = ticks.saturating_add(1);

            if cancel.wait(self.tick_interval) {
                log::info!("Cancellation requested, stopping transcoder");
                let exit = process.kill()?;
                return Ok(self.finish(MonitorState::Cancelled, started, ticks, exit, sink));
            }
        }
    }

    fn finish(
        &mut self,
        state: MonitorState,
        started: Instant,
        ticks: u32,
        exit: ProcessExit,
        sink: &mut dyn ProgressSink,
    ) -> MonitorReport {
        let elapsed = started.elapsed();
        sink.report(&self.locale.format_elapsed(elapsed));
        self.state = state;
        log::debug!("Monitor reached {:?} after {} tick(s), {}", state, ticks, exit);
        MonitorReport {
            state,
            elapsed,
            ticks,
            exit,
        }
    }
}

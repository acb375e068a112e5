use std::cell::Cell;
use std::sync::Arc;
use std::sync::mpsc;
use std::thread::{self, JoinHandle};

use crate::expand::opts::ExpandOpts;
use crate::expand::scheduler::{CancelToken, ExpandControl, ExpandReport, ExpandStatus, expand_with};
use crate::foundation::error::{TexpandError, TexpandResult};
use crate::raster::image::ImageF32;
use crate::raster::mask::Mask;

/// Message sent from a running [`ExpandJob`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ExpandEvent {
    /// Fraction of rows completed, non-decreasing.
    Progress(f32),
    /// The run ended without error.
    Finished(ExpandStatus),
}

/// Expansion running on a background thread.
///
/// Poll events with [`ExpandJob::try_event`] or [`ExpandJob::wait_event`], stop early
/// with [`ExpandJob::cancel`], and collect the output with [`ExpandJob::join`].
#[derive(Debug)]
pub struct ExpandJob {
    cancel: CancelToken,
    events: mpsc::Receiver<ExpandEvent>,
    // Finish event pulled off the channel by `latest_progress`, handed out by the next poll.
    held: Cell<Option<ExpandEvent>>,
    handle: JoinHandle<TexpandResult<(ImageF32, ExpandReport)>>,
}

impl ExpandJob {
    /// Start dilating `output` (already seeded) on a worker thread.
    pub fn spawn(
        image: Arc<ImageF32>,
        mask: Arc<Mask>,
        mut output: ImageF32,
        opts: ExpandOpts,
    ) -> TexpandResult<Self> {
        let cancel = CancelToken::new();
        let (tx, events) = mpsc::channel();
        let worker_cancel = cancel.clone();

        let handle = thread::Builder::new()
            .name("texpand-job".to_owned())
            .spawn(move || {
                let progress_tx = tx.clone();
                let on_progress = move |p: f32| {
                    let _ = progress_tx.send(ExpandEvent::Progress(p));
                };
                let ctl = ExpandControl {
                    cancel: Some(&worker_cancel),
                    progress: Some(&on_progress),
                };
                let res = expand_with(&mut output, &image, &mask, &opts, &ctl);
                if let Ok(report) = &res {
                    let _ = tx.send(ExpandEvent::Finished(report.status));
                }
                res.map(|report| (output, report))
            })
            .map_err(|e| TexpandError::Other(anyhow::Error::new(e).context("spawn expand worker")))?;

        Ok(Self {
            cancel,
            events,
            held: Cell::new(None),
            handle,
        })
    }

    /// Ask the worker to stop before its next row block.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// The token observed by the worker.
    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    /// Next pending event, if any.
    pub fn try_event(&self) -> Option<ExpandEvent> {
        self.held.take().or_else(|| self.events.try_recv().ok())
    }

    /// Block until the next event. `None` once the worker has exited and all events are drained.
    pub fn wait_event(&self) -> Option<ExpandEvent> {
        self.held.take().or_else(|| self.events.recv().ok())
    }

    /// Drain pending progress events and return the most recent value.
    ///
    /// Stops at [`ExpandEvent::Finished`], which stays queued for the next
    /// [`ExpandJob::try_event`] or [`ExpandJob::wait_event`].
    pub fn latest_progress(&self) -> Option<f32> {
        if let Some(ev) = self.held.take() {
            self.held.set(Some(ev));
            return None;
        }
        let mut latest = None;
        for ev in self.events.try_iter() {
            match ev {
                ExpandEvent::Progress(p) => latest = Some(p),
                ExpandEvent::Finished(_) => {
                    self.held.set(Some(ev));
                    break;
                }
            }
        }
        latest
    }

    /// `true` once the worker thread has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the worker and return the output with its report.
    pub fn join(self) -> TexpandResult<(ImageF32, ExpandReport)> {
        self.handle
            .join()
            .map_err(|_| TexpandError::Other(anyhow::anyhow!("expand worker panicked")))?
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expand/job.rs"]
mod tests;

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;

use crate::expand::opts::{ExpandOpts, MissPolicy};
use crate::expand::scanline::{ScanStats, fill_rows, validate_inputs, validate_rows};
use crate::foundation::core::RowRange;
use crate::foundation::error::{TexpandError, TexpandResult};
use crate::raster::image::ImageF32;
use crate::raster::mask::Mask;

/// Shared cancellation flag. Clones observe the same flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// A token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Blocks that have not started yet are skipped.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// `true` once [`CancelToken::cancel`] has been called on any clone.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Optional hooks observed by [`expand_with`].
#[derive(Clone, Copy, Default)]
pub struct ExpandControl<'a> {
    /// Checked before each row block starts.
    pub cancel: Option<&'a CancelToken>,
    /// Receives the completed fraction in `[0, 1]`; may be called from worker threads.
    pub progress: Option<&'a (dyn Fn(f32) + Sync)>,
}

/// How an expansion run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpandStatus {
    /// Every requested row was processed.
    Completed,
    /// Cancellation was observed; some blocks were skipped.
    Cancelled,
}

/// Summary returned by [`expand`] and [`expand_with`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ExpandReport {
    /// How the run ended.
    pub status: ExpandStatus,
    /// Rows requested.
    pub rows_total: u64,
    /// Rows whose block ran to completion.
    pub rows_completed: u64,
    /// Unused texels that received a color.
    pub pixels_filled: u64,
    /// Unused texels left at their seed value.
    pub pixels_unresolved: u64,
    /// Rows abandoned after a miss.
    pub rows_aborted: u64,
    /// The mask had no used texel; output equals its seed.
    pub empty_mask: bool,
}

/// Dilate `output` in place using the scheduling in `opts`.
///
/// `output` must be pre-seeded by the caller, usually with a clone of `image`.
pub fn expand(
    output: &mut ImageF32,
    image: &ImageF32,
    mask: &Mask,
    opts: &ExpandOpts,
) -> TexpandResult<ExpandReport> {
    expand_with(output, image, mask, opts, &ExpandControl::default())
}

/// [`expand`] with cancellation and progress hooks.
///
/// Rows are split into blocks of `opts.block_rows`. Each block owns a disjoint slice of
/// `output`, so blocks run on rayon workers without locking pixel data. Cancellation is
/// checked before every block; rows of blocks that already finished stay written.
#[tracing::instrument(
    skip_all,
    fields(width = image.width(), height = image.height(), radius = %opts.radius)
)]
pub fn expand_with(
    output: &mut ImageF32,
    image: &ImageF32,
    mask: &Mask,
    opts: &ExpandOpts,
    ctl: &ExpandControl<'_>,
) -> TexpandResult<ExpandReport> {
    validate_inputs(output, image, mask)?;
    let rows = opts.rows.unwrap_or_else(|| RowRange::full(image.height()));
    validate_rows(rows, image.height())?;
    if opts.threads == Some(0) {
        return Err(TexpandError::validation(
            "expand 'threads' must be >= 1 when set",
        ));
    }

    // A block never needs more rows than the range holds.
    let block_rows = opts
        .normalized_block_rows()
        .min(rows.len_rows().max(1) as usize);
    let is_cancelled = || ctl.cancel.is_some_and(CancelToken::is_cancelled);
    let progress = ProgressGate::new(ctl.progress, rows.len_rows());

    tracing::debug!(
        rows_start = rows.start,
        rows_end = rows.end,
        block_rows,
        parallel = opts.parallel,
        threads = ?opts.threads,
        miss_policy = ?opts.miss_policy,
        "expand start"
    );

    if mask.valid_count() == 0 {
        tracing::warn!("mask has no used texels; output keeps its seed");
        if is_cancelled() {
            return Ok(cancelled_before_start(rows, true));
        }
        progress.finish();
        return Ok(empty_mask_report(rows, image.width(), opts.miss_policy));
    }

    let run_block = |(idx, block): (usize, &mut [f32])| -> Option<ScanStats> {
        if is_cancelled() {
            return None;
        }
        progress.begin_block();
        let first_row = rows.start + (idx * block_rows) as u32;
        let stats = fill_rows(block, first_row, image, mask, opts.radius, opts.miss_policy);
        progress.complete_rows(stats.rows);
        Some(stats)
    };

    let chunk_len = image.row_stride() * block_rows;
    let dst = output.rows_mut(rows.start, rows.end);
    let results: Vec<Option<ScanStats>> = if !opts.parallel {
        dst.chunks_mut(chunk_len).enumerate().map(&run_block).collect()
    } else if let Some(threads) = opts.threads {
        build_thread_pool(threads)?.install(|| {
            dst.par_chunks_mut(chunk_len)
                .enumerate()
                .map(&run_block)
                .collect()
        })
    } else {
        dst.par_chunks_mut(chunk_len)
            .enumerate()
            .map(&run_block)
            .collect()
    };

    let mut stats = ScanStats::default();
    let mut skipped = 0usize;
    for r in &results {
        match r {
            Some(s) => stats.accumulate(s),
            None => skipped += 1,
        }
    }

    let status = if skipped > 0 {
        tracing::info!(
            skipped_blocks = skipped,
            rows_completed = stats.rows,
            "expand cancelled"
        );
        ExpandStatus::Cancelled
    } else {
        progress.finish();
        ExpandStatus::Completed
    };

    let report = ExpandReport {
        status,
        rows_total: u64::from(rows.len_rows()),
        rows_completed: stats.rows,
        pixels_filled: stats.pixels_filled,
        pixels_unresolved: stats.pixels_unresolved,
        rows_aborted: stats.rows_aborted,
        empty_mask: false,
    };
    tracing::debug!(?report, "expand done");
    Ok(report)
}

fn cancelled_before_start(rows: RowRange, empty_mask: bool) -> ExpandReport {
    ExpandReport {
        status: ExpandStatus::Cancelled,
        rows_total: u64::from(rows.len_rows()),
        rows_completed: 0,
        pixels_filled: 0,
        pixels_unresolved: 0,
        rows_aborted: 0,
        empty_mask,
    }
}

// With nothing to copy from, every unused texel misses on the first lookup of its row.
fn empty_mask_report(rows: RowRange, width: u32, miss: MissPolicy) -> ExpandReport {
    let n = u64::from(rows.len_rows());
    ExpandReport {
        status: ExpandStatus::Completed,
        rows_total: n,
        rows_completed: n,
        pixels_filled: 0,
        pixels_unresolved: n * u64::from(width),
        rows_aborted: match miss {
            MissPolicy::AbortRow => n,
            MissPolicy::SkipPixel => 0,
        },
        empty_mask: true,
    }
}

struct ProgressState {
    done_rows: u64,
    last: f32,
}

/// Serializes progress reports so observers see a non-decreasing sequence.
struct ProgressGate<'a> {
    sink: Option<&'a (dyn Fn(f32) + Sync)>,
    total_rows: u64,
    state: Mutex<ProgressState>,
}

impl<'a> ProgressGate<'a> {
    fn new(sink: Option<&'a (dyn Fn(f32) + Sync)>, total_rows: u32) -> Self {
        Self {
            sink,
            total_rows: u64::from(total_rows),
            state: Mutex::new(ProgressState {
                done_rows: 0,
                last: 0.0,
            }),
        }
    }

    fn begin_block(&self) {
        let Some(sink) = self.sink else {
            return;
        };
        let mut st = self.state.lock().unwrap_or_else(|e| e.into_inner());
        let frac = if self.total_rows == 0 {
            0.0
        } else {
            st.done_rows as f32 / self.total_rows as f32
        };
        st.last = st.last.max(frac);
        sink(st.last);
    }

    fn complete_rows(&self, rows: u64) {
        if self.sink.is_none() {
            return;
        }
        let mut st = self.state.lock().unwrap_or_else(|e| e.into_inner());
        st.done_rows += rows;
    }

    fn finish(&self) {
        let Some(sink) = self.sink else {
            return;
        };
        let mut st = self.state.lock().unwrap_or_else(|e| e.into_inner());
        st.last = 1.0;
        sink(1.0);
    }
}

fn build_thread_pool(threads: usize) -> TexpandResult<rayon::ThreadPool> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("texpand-worker-{i}"))
        .build()
        .map_err(|e| TexpandError::validation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/expand/scheduler.rs"]
mod tests;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::core::{RowRange, SearchRadius};
use crate::foundation::error::{TexpandError, TexpandResult};

/// Rows per scheduling block. Cancellation and progress are observed at this granularity.
pub const DEFAULT_BLOCK_ROWS: usize = 32;

/// What to do when an unused texel has no used texel inside the search window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissPolicy {
    /// Leave the texel and stop processing the rest of its row.
    #[default]
    AbortRow,
    /// Leave the texel and continue with the next one in the row.
    SkipPixel,
}

/// Configuration for one expansion run.
///
/// Every field has a default, so a JSON config only needs the keys it overrides:
///
/// ```json
/// { "radius": 16, "threads": 4, "miss_policy": "skip_pixel" }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExpandOpts {
    /// Search bound; non-positive means unbounded.
    pub radius: SearchRadius,
    /// Rows to process. `None` processes the whole image.
    pub rows: Option<RowRange>,
    /// Distribute row blocks across rayon workers.
    pub parallel: bool,
    /// Dedicated worker count. `None` uses the global rayon pool.
    pub threads: Option<usize>,
    /// Rows per block; `0` is treated as `1`.
    pub block_rows: usize,
    /// Behavior on unresolved texels.
    pub miss_policy: MissPolicy,
}

impl Default for ExpandOpts {
    fn default() -> Self {
        Self {
            radius: SearchRadius::UNBOUNDED,
            rows: None,
            parallel: true,
            threads: None,
            block_rows: DEFAULT_BLOCK_ROWS,
            miss_policy: MissPolicy::AbortRow,
        }
    }
}

impl ExpandOpts {
    /// Parse options from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> TexpandResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| TexpandError::validation(format!("parse expand options JSON: {e}")))
    }

    /// Parse options from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> TexpandResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            TexpandError::validation(format!("open expand options '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Copy of `self` with a different search radius.
    pub fn with_radius(mut self, radius: SearchRadius) -> Self {
        self.radius = radius;
        self
    }

    pub(crate) fn normalized_block_rows(&self) -> usize {
        self.block_rows.max(1)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expand/opts.rs"]
mod tests;

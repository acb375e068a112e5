use crate::foundation::error::{TexpandError, TexpandResult};

/// Half-open range of image rows `[start, end)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RowRange {
    pub start: u32,
    pub end: u32, // exclusive
}

impl RowRange {
    pub fn new(start: u32, end: u32) -> TexpandResult<Self> {
        if start > end {
            return Err(TexpandError::validation("RowRange start must be <= end"));
        }
        Ok(Self { start, end })
    }

    pub fn full(height: u32) -> Self {
        Self {
            start: 0,
            end: height,
        }
    }

    pub fn len_rows(self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(self) -> bool {
        self.start >= self.end
    }

    pub fn contains(self, row: u32) -> bool {
        self.start <= row && row < self.end
    }
}

/// Bound on how far the nearest-pixel search may look.
///
/// Wraps the signed `max_dist` used by the command line: any value `<= 0`
/// means the search may cover the whole image.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct SearchRadius(pub i32);

impl SearchRadius {
    /// Search the whole image.
    pub const UNBOUNDED: Self = Self(0);

    pub fn new(max_dist: i32) -> Self {
        Self(max_dist)
    }

    pub fn is_unbounded(self) -> bool {
        self.0 <= 0
    }

    /// The positive bound, or `None` when unbounded.
    pub fn limit(self) -> Option<u32> {
        if self.is_unbounded() {
            None
        } else {
            Some(self.0.unsigned_abs())
        }
    }
}

impl std::fmt::Display for SearchRadius {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.limit() {
            Some(r) => write!(f, "{r}px"),
            None => f.write_str("unbounded"),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;

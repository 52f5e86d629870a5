use thiserror::Error;

/// Boxed error surfaced by a [`RankedLayouter`](super::RankedLayouter)
/// implementation; passed through without reinterpretation.
pub type RankedError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum LayoutError {
    /// A `parent` chain loops back on itself. Layout of such input is
    /// undefined, so it is rejected outright instead of recursing until the
    /// stack runs out.
    #[error("containment cycle through cluster `{cluster}`")]
    CyclicContainment { cluster: String },

    /// Failure inside the rank-based layout primitive. No retry, no partial
    /// result.
    #[error(transparent)]
    Ranked(#[from] RankedError),
}

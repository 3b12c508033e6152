//! Persistence hook for saved images.

/// Records which user saved which image.
///
/// Implemented by the record store; the session only sees this trait so a
/// failing store can never corrupt editing state.
pub trait EditLog {
    type Error: std::error::Error;

    /// Append an entry for `image_path` saved by `username`.
    fn record_edit(&mut self, image_path: &str, username: &str) -> Result<(), Self::Error>;

    /// Paths saved by `username`, in insertion order.
    fn list_edits(&self, username: &str) -> Result<Vec<String>, Self::Error>;
}

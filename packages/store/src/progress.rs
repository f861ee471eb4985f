//! Load progress reporting.
//!
//! Reading a multi-year incident file takes long enough to be worth a
//! progress bar. The store reports through [`ProgressCallback`] so it never
//! depends on a terminal rendering crate; the CLI supplies an `indicatif`
//! implementation and tests pass [`NullProgress`].

/// Receives progress updates while the record store loads.
///
/// Units are bytes of the incident file when the size is known up front,
/// otherwise rows read.
pub trait ProgressCallback: Send + Sync {
    /// Set the total expected units of work.
    fn set_total(&self, total: u64);

    /// Set the current position (absolute, not delta).
    fn set_position(&self, pos: u64);

    /// Update the message displayed alongside the progress indicator.
    fn set_message(&self, msg: String);

    /// Mark loading as complete with a final message.
    fn finish(&self, msg: String);
}

/// Ignores every update.
pub struct NullProgress;

impl ProgressCallback for NullProgress {
    fn set_total(&self, _total: u64) {}
    fn set_position(&self, _pos: u64) {}
    fn set_message(&self, _msg: String) {}
    fn finish(&self, _msg: String) {}
}

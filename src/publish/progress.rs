//! Progress reporting for publish operations

/// Receives human-readable progress at each state transition
pub trait Progress {
    /// Normal progress line
    fn step(&self, message: &str);

    /// Extra detail, shown only when asked for
    fn detail(&self, message: &str);

    /// Recoverable problem; the operation keeps going
    fn warn(&self, message: &str);

    /// Terminal failure
    fn error(&self, message: &str);
}

/// Discards all progress
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl Progress for Silent {
    fn step(&self, _message: &str) {}
    fn detail(&self, _message: &str) {}
    fn warn(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
}

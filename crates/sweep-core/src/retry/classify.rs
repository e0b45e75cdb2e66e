//! Per-attempt retry dispositions and the classifier seam.

/// What the executor should do with a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Transient condition (resource busy, operation in progress); try again.
    Retryable,
    /// Terminal condition; stop immediately and surface the error.
    Permanent,
    /// The error means the desired end state already holds (e.g. "not found"
    /// while deleting); stop and report completion.
    Success,
}

/// Maps an operation error to a [`Disposition`].
///
/// Any `Fn(&E) -> Disposition` is a classifier, so callers usually pass a
/// closure or a plain function.
pub trait Classify<E> {
    fn classify(&self, error: &E) -> Disposition;
}

impl<E, F> Classify<E> for F
where
    F: Fn(&E) -> Disposition,
{
    fn classify(&self, error: &E) -> Disposition {
        self(error)
    }
}

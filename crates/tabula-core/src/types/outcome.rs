/// Result of a delete operation
///
/// Deletes commit whether or not anything matched, so "nothing to delete" is
/// reported here rather than as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// At least one value was removed
    Deleted,
    /// No value matched; the transaction still committed
    NotFound,
}

impl DeleteOutcome {
    pub fn is_deleted(self) -> bool {
        self == DeleteOutcome::Deleted
    }
}

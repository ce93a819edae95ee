/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionProgress {
    /// One-based number of the round on screen, capped at `total`.
    pub current: usize,
    pub total: usize,
    pub correct: u32,
    pub is_complete: bool,
}

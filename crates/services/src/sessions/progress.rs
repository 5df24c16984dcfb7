/// Aggregated view of session progress, useful for presentation layers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionProgress {
    pub total: usize,
    pub answered: usize,
    pub correct: usize,
    pub is_last: bool,
}

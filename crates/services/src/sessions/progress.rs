/// Aggregated view of session progress, useful for UI.
///
/// `total` is the size of the filtered set when the filter was chosen; it is not
/// recomputed as rounds go by. `consumed` keeps counting after the queue
/// reshuffles, so it may exceed `total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionProgress {
    pub consumed: usize,
    pub total: usize,
}

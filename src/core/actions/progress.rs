/// Receives row-completion notices from render workers.
///
/// Called concurrently from every worker; implementations must not block.
pub trait ProgressObserver: Send + Sync {
    fn rows_completed(&self, rows: u32);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    #[inline]
    fn rows_completed(&self, _rows: u32) {}
}

impl<F> ProgressObserver for F
where
    F: Fn(u32) + Send + Sync,
{
    #[inline]
    fn rows_completed(&self, rows: u32) {
        self(rows)
    }
}

/// Asked before each frame whether the run should stop there.
///
/// Stopping between frames leaves every finished frame and its checkpoint in place, so a
/// later resume continues exactly at `next_frame`.
pub trait StopSignal: Send + Sync {
    fn should_stop(&self, next_frame: usize) -> bool;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NeverStop;

impl StopSignal for NeverStop {
    #[inline]
    fn should_stop(&self, _next_frame: usize) -> bool {
        false
    }
}

impl<F> StopSignal for F
where
    F: Fn(usize) -> bool + Send + Sync,
{
    #[inline]
    fn should_stop(&self, next_frame: usize) -> bool {
        self(next_frame)
    }
}

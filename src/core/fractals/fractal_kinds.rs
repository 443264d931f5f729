/// Escape-time recurrence a frame is rendered with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FractalKind {
    /// `z0` is the pixel, `c = a + bi` is fixed for the whole frame.
    Julia { a: f64, b: f64 },
    /// `z0 = 0`, `c` is the pixel.
    Mandelbrot,
}

impl FractalKind {
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Mandelbrot => "Mandelbrot",
            Self::Julia { .. } => "Julia",
        }
    }
}

pub mod adjust_precision;
pub mod analyse_density;
pub mod generate_fractal;
pub mod generate_pixel_buffer;
pub mod progress;
pub mod render_frame;
pub mod stop_signal;
pub mod transform_viewport;

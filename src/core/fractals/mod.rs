pub mod algorithm_error;
pub mod escape_time;
pub mod fractal_kinds;
pub mod frame_algorithm;
pub mod julia;
pub mod mandelbrot;
pub mod weighted_colour_map;

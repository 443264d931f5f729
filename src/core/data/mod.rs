pub mod checkpoint;
pub mod colour;
pub mod density_map;
pub mod frame_sequence;
pub mod frame_size;
pub mod frame_spec;
pub mod iteration_grid;
pub mod pixel_buffer;
pub mod point;
pub mod precision;
pub mod viewport;

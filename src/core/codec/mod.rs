pub mod iteration_grid_codec;

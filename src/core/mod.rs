pub mod actions;
pub mod codec;
pub mod data;
pub mod fractals;
pub mod util;

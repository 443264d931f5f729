//! Interfaces between the animation controller and the outside world.

pub mod checkpoint_store;
pub mod frame_sink;

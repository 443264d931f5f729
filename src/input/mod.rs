//! Input adapters: turn external descriptions of an animation into domain types.

pub mod frame_table;

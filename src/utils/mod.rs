pub mod format;
pub mod geometry;
pub mod ids;
pub mod time;

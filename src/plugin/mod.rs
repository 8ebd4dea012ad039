//! Plugin definitions and the decoration contract they follow.

pub mod banner;
pub mod decoration;

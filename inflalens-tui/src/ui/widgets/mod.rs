//! Reusable widgets.

pub mod pie;

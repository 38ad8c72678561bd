//! Domain logic

pub mod logs;

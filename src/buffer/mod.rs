// src/buffer/mod.rs
//! The owning growable buffer and its operations

mod core;
mod ops;
mod raw;

pub use self::core::Buffer;

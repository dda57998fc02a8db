//! API Data Transfer Objects

pub mod common;

pub use common::*;

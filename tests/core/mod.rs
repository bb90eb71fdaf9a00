//! Core module tests

pub mod export_tests;
pub mod window_tests;

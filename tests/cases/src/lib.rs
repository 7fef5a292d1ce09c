//! # Bully Node Test cases
//!
//! This subproject provides integration tests for the Bully algorithm.

#[macro_use]
extern crate log;
extern crate chrono;
extern crate env_logger;

extern crate bully;
extern crate bully_modules;

pub mod cases;
mod steps;

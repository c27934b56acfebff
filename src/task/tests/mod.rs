//! Unit tests for the task engine.

mod links_tests;
mod support;

//! Unit tests for recurring task generation.

mod support;

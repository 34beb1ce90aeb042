//! Tests for the NIMROD decoder

pub mod support;

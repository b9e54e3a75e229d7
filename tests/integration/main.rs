//! Integration tests for edgewarm
//!
//! These tests use wiremock to create mock HTTP servers and exercise
//! discovery, probing, and full prewarm runs end-to-end.

mod discovery_tests;

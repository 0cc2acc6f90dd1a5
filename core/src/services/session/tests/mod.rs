//! Integration-style tests for the session lifecycle

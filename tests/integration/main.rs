//! Integration tests for glyphplay.

mod helpers;

mod cli_test;
mod config_test;
mod playback_test;

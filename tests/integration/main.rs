//! Integration test harness

mod helpers;

mod cli_test;
mod pipeline_test;
mod render_test;

//! Integration tests

mod e2e_test;
mod historical_test;
mod scheduler_test;

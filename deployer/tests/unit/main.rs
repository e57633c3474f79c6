//! Integration tests

mod engine;
mod test_resolve;
mod test_run;

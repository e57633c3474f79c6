//! CI workflow commands
//!
//! A CI runner turns `::warning::` and `::error::` lines on stdout into
//! annotations on the run.

/// Whether the process runs inside a CI action runner
pub fn detect() -> bool {
    std::env::var("GITHUB_ACTIONS").map(|v| v == "true").unwrap_or(false)
}

/// Format a workflow command line
pub fn command(kind: &str, message: &str) -> String {
    format!("::{}::{}", kind, escape(message))
}

pub fn warning(enabled: bool, message: &str) {
    if enabled {
        println!("{}", command("warning", message));
    }
}

pub fn error(enabled: bool, message: &str) {
    if enabled {
        println!("{}", command("error", message));
    }
}

fn escape(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

//! Embeds the source revision and build date shown by `--version`.

use std::process::Command;

use chrono::{DateTime, SecondsFormat, Utc};

fn git_revision() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--always", "--dirty", "--abbrev=10"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let revision = String::from_utf8(output.stdout).ok()?;
    let revision = revision.trim();
    (!revision.is_empty()).then(|| revision.to_string())
}

/// Honors `SOURCE_DATE_EPOCH` so packaged builds are reproducible.
fn build_date() -> String {
    let built = std::env::var("SOURCE_DATE_EPOCH")
        .ok()
        .and_then(|epoch| epoch.parse::<i64>().ok())
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        .unwrap_or_else(Utc::now);
    built.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn main() {
    let revision = git_revision().unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=DEPLOYER_GIT_REVISION={}", revision);
    println!("cargo:rustc-env=DEPLOYER_BUILD_DATE={}", build_date());

    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=../.git/HEAD");
    println!("cargo:rerun-if-changed=../.git/index");
    println!("cargo:rerun-if-env-changed=SOURCE_DATE_EPOCH");
}

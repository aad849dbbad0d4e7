use std::env;
use std::process::Command;

use chrono::{DateTime, SecondsFormat, Utc};

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/index");
    println!("cargo:rerun-if-env-changed=SOURCE_DATE_EPOCH");

    println!("cargo:rustc-env=TONEY_GIT_SHA={}", git_describe());
    println!("cargo:rustc-env=TONEY_BUILD_TS={}", build_time());
}

/// Short commit id, suffixed with `-dirty` for uncommitted changes.
fn git_describe() -> String {
    Command::new("git")
        .args(["describe", "--always", "--dirty", "--abbrev=8"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

/// RFC 3339 UTC timestamp; `SOURCE_DATE_EPOCH` pins it for reproducible builds.
fn build_time() -> String {
    let pinned = env::var("SOURCE_DATE_EPOCH")
        .ok()
        .and_then(|raw| raw.trim().parse::<i64>().ok())
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0));
    pinned
        .unwrap_or_else(Utc::now)
        .to_rfc3339_opts(SecondsFormat::Secs, true)
}

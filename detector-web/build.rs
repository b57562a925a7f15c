//! Build script for detector-web
//!
//! Exports the identifiers printed in the startup log line and in the page
//! header of the upload and setup pages, so a reported verdict can be traced
//! back to the exact binary that produced it:
//! - GIT_HASH
//! - BUILD_TIMESTAMP
//! - BUILD_PROFILE

use std::process::Command;

fn main() {
    // Tarball builds have no checkout; the page header then shows "unknown"
    let git_hash = Command::new("git")
        .args(["rev-parse", "--short=8", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "unknown".to_string());

    let build_timestamp = chrono::Local::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, false);

    // Distinguishes a debug build accidentally deployed behind the upload form
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());

    for (key, value) in [
        ("GIT_HASH", git_hash),
        ("BUILD_TIMESTAMP", build_timestamp),
        ("BUILD_PROFILE", profile),
    ] {
        println!("cargo:rustc-env={}={}", key, value);
    }

    // Refresh the hash after a commit or checkout
    println!("cargo:rerun-if-changed=../.git/HEAD");
    println!("cargo:rerun-if-changed=build.rs");
}

//! Build script for glyphplay - embeds build date and git commit
//!
//! Always emits `GLYPHPLAY_BUILD_DATE`. Unless the `release` feature is set,
//! also emits `VERGEN_GIT_SHA` so dev builds report the commit they came from.

use std::process::Command;

/// Current date as YYYY-MM-DD, or "unknown".
fn build_date() -> String {
    Command::new("date")
        .arg("+%Y-%m-%d")
        .output()
        .ok()
        .filter(|output| output.status.success())
        .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
        .filter(|date| !date.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rustc-env=GLYPHPLAY_BUILD_DATE={}", build_date());

    #[cfg(not(feature = "release"))]
    {
        use vergen_gitcl::{Emitter, GitclBuilder};

        let emitted = GitclBuilder::default()
            .sha(true)
            .build()
            .map_err(|e| e.to_string())
            .and_then(|git| {
                Emitter::default()
                    .add_instructions(&git)
                    .and_then(|emitter| emitter.emit())
                    .map_err(|e| e.to_string())
            });

        if let Err(e) = emitted {
            // Not a git checkout, or git is missing.
            println!("cargo:warning=Failed to get git info: {}", e);
            println!("cargo:rustc-env=VERGEN_GIT_SHA=unknown");
        }
    }
}

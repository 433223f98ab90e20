// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

fn source_files() -> Vec<(PathBuf, String)> {
    let src_root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("src");
    let mut out = Vec::new();
    let mut stack = vec![src_root];
    while let Some(path) = stack.pop() {
        for entry in std::fs::read_dir(path).expect("read_dir") {
            let path = entry.expect("entry").path();
            if path.is_dir() {
                stack.push(path);
            } else if path.extension().and_then(|v| v.to_str()) == Some("rs") {
                let text = std::fs::read_to_string(&path).expect("read file");
                out.push((path, text));
            }
        }
    }
    out
}

#[test]
fn evaluator_stays_free_of_runtime_io_and_cli_crates() {
    let forbidden = ["tokio", "clap", "tracing_subscriber", "std::fs", "std::env", "hinweis_cli"];
    for (path, text) in source_files() {
        for token in forbidden {
            assert!(
                !text.contains(token),
                "forbidden token `{token}` in {}",
                path.display()
            );
        }
    }
}

#[test]
fn evaluator_never_reads_the_wall_clock() {
    for (path, text) in source_files() {
        for token in ["Utc::now", "SystemTime", "Local::now"] {
            assert!(
                !text.contains(token),
                "`now` must be passed in, found `{token}` in {}",
                path.display()
            );
        }
    }
}

#[test]
fn evaluator_manifest_has_no_runtime_dependencies() {
    let manifest = std::fs::read_to_string(
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml"),
    )
    .expect("read Cargo.toml");
    for dep in ["tokio", "clap", "tracing-subscriber", "hinweis-core"] {
        assert!(
            !manifest.contains(dep),
            "hinweis-fristen must not depend on {dep}"
        );
    }
}

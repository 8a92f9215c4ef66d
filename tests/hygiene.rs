//! Hygiene: source-level rules checked at test time.
//!
//! Scans the engine and playground sources for patterns that crash the page,
//! swallow errors, or bypass the `log` facade. Every rule has a budget of
//! zero. Test files (`*_test.rs`) are exempt.

use std::fs;
use std::path::Path;

/// Roots scanned, relative to the workspace root.
const ROOTS: &[&str] = &["src", "playground/src"];

struct Rule {
    pattern: &'static str,
    budget: usize,
    reason: &'static str,
}

const RULES: &[Rule] = &[
    // Panics: a panic in a frame callback kills the whole wasm instance.
    Rule { pattern: ".unwrap()", budget: 0, reason: "propagate with `?` or log" },
    Rule { pattern: ".expect(", budget: 0, reason: "propagate with `?` or log" },
    Rule { pattern: "panic!(", budget: 0, reason: "return an EngineError" },
    Rule { pattern: "unreachable!(", budget: 0, reason: "restructure the match" },
    Rule { pattern: "todo!(", budget: 0, reason: "finish the stub" },
    Rule { pattern: "unimplemented!(", budget: 0, reason: "finish the stub" },
    // Silent loss.
    Rule { pattern: "let _ =", budget: 0, reason: "inspect or log the result" },
    Rule { pattern: ".ok()", budget: 0, reason: "inspect or log the error" },
    // Logging goes through `log`.
    Rule { pattern: "console::log", budget: 0, reason: "use the log macros" },
    Rule { pattern: "println!(", budget: 0, reason: "use the log macros" },
    // Structure.
    Rule { pattern: "#[allow(dead_code)]", budget: 0, reason: "delete unused code" },
];

struct SourceFile {
    path: String,
    content: String,
}

fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    for root in ROOTS {
        collect(Path::new(root), &mut files);
    }
    files
}

fn collect(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect(&path, out);
            continue;
        }
        let path_str = path.to_string_lossy().to_string();
        if !path_str.ends_with(".rs") || path_str.ends_with("_test.rs") {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push(SourceFile { path: path_str, content });
        }
    }
}

/// `(path, line number, line)` for every line containing `pattern`.
fn hits<'a>(files: &'a [SourceFile], pattern: &str) -> Vec<(&'a str, usize, &'a str)> {
    files
        .iter()
        .flat_map(|file| {
            file.content
                .lines()
                .enumerate()
                .filter(move |(_, line)| line.contains(pattern))
                .map(move |(n, line)| (file.path.as_str(), n + 1, line.trim()))
        })
        .collect()
}

#[test]
fn sources_are_found() {
    let files = source_files();
    assert!(files.iter().any(|f| f.path.ends_with("game_loop.rs")), "engine sources not found");
}

#[test]
fn rule_budgets() {
    let files = source_files();
    let mut report = Vec::new();
    for rule in RULES {
        let found = hits(&files, rule.pattern);
        if found.len() > rule.budget {
            report.push(format!(
                "`{}`: found {}, max {} ({})",
                rule.pattern,
                found.len(),
                rule.budget,
                rule.reason
            ));
            for (path, line_no, line) in found {
                report.push(format!("  {path}:{line_no}: {line}"));
            }
        }
    }
    assert!(report.is_empty(), "hygiene budgets exceeded:\n{}", report.join("\n"));
}

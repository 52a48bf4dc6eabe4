//! Filesystem traversal and per-file checking.

use std::fs;
use std::path::Path;

use wml_lib::ParseError;

/// How parse failures are rendered to stderr.
#[derive(Clone, Copy, Debug, Default)]
pub struct RenderOptions {
    pub snippets: bool,
    pub colored: bool,
}

fn report(error: &ParseError, text: &str, opts: RenderOptions) {
    let printer = error.printer();
    let rendered = if opts.snippets {
        printer.source(text).colored(opts.colored).render()
    } else {
        printer.render()
    };
    eprintln!("{}", rendered);
}

/// Checks one file, skipping anything without a `.cfg` extension.
/// Returns the number of failures (0 or 1).
pub fn check_file(path: &Path, opts: RenderOptions) -> u32 {
    if path.extension().and_then(|ext| ext.to_str()) != Some("cfg") {
        return 0;
    }
    tracing::info!(path = %path.display(), "scanning file");

    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("error: cannot read '{}': {}", path.display(), err);
            return 1;
        }
    };

    match wml_lib::parse_document(&text, &path.display().to_string()) {
        Ok(_) => 0,
        Err(error) => {
            eprintln!("{}: ERROR", path.display());
            report(&error, &text, opts);
            1
        }
    }
}

/// Recursively checks every `.cfg` file below `path`, in sorted order.
/// Returns the total failure count.
pub fn scan_dir(path: &Path, opts: RenderOptions) -> u32 {
    tracing::info!(path = %path.display(), "scanning directory");

    let mut entries: Vec<_> = match fs::read_dir(path) {
        Ok(read_dir) => read_dir
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .collect(),
        Err(err) => {
            eprintln!("error: cannot read directory '{}': {}", path.display(), err);
            return 1;
        }
    };
    entries.sort();

    let mut failures = 0;
    for entry in entries {
        if entry.is_dir() {
            failures += scan_dir(&entry, opts);
        } else {
            failures += check_file(&entry, opts);
        }
    }
    failures
}

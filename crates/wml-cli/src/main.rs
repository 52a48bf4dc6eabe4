mod cli;
mod regression;
mod scan;

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;

use cli::Cli;
use scan::RenderOptions;

fn main() {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    std::process::exit(run(cli));
}

fn run(cli: Cli) -> i32 {
    if cli.test {
        return regression::run();
    }

    let opts = RenderOptions {
        snippets: cli.snippets,
        colored: cli.use_color(),
    };

    if let Some(path) = &cli.path {
        if cli.dump || cli.dump_json {
            return dump_file(path, cli.dump_json, opts);
        }
        if path.is_file() {
            return exit_code(scan::check_file(path, opts));
        }
        if path.is_dir() {
            return exit_code(scan::scan_dir(path, opts));
        }
        eprintln!(
            "error: '{}' is not a known file or directory",
            path.display()
        );
        return 1;
    }

    // No argument: locate the asset directory.
    match locate_asset_dir() {
        Some(dir) => exit_code(scan::scan_dir(&dir, opts)),
        None => {
            eprintln!("error: no input given and no usable asset_path.txt found");
            eprintln!();
            eprintln!("Run 'wmlint --help' for usage.");
            1
        }
    }
}

fn exit_code(failures: u32) -> i32 {
    if failures == 0 { 0 } else { 1 }
}

fn dump_file(path: &Path, as_json: bool, opts: RenderOptions) -> i32 {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("error: cannot read '{}': {}", path.display(), err);
            return 1;
        }
    };
    match wml_lib::parse_document(&text, &path.display().to_string()) {
        Ok(root) => {
            if as_json {
                match serde_json::to_string_pretty(&root) {
                    Ok(json) => println!("{}", json),
                    Err(err) => {
                        eprintln!("error: cannot serialize tree: {}", err);
                        return 1;
                    }
                }
            } else {
                print!("{}", root.dump());
            }
            0
        }
        Err(error) => {
            let rendered = if opts.snippets {
                error
                    .printer()
                    .source(&text)
                    .colored(opts.colored)
                    .render()
            } else {
                error.printer().render()
            };
            eprintln!("{}", rendered);
            1
        }
    }
}

/// With no argument, `asset_path.txt` in the working directory may name the
/// directory to scan. Browser-embedded builds fall back to `/assets`.
fn locate_asset_dir() -> Option<PathBuf> {
    if let Ok(contents) = fs::read_to_string("asset_path.txt") {
        let path = PathBuf::from(contents.trim());
        if path.is_dir() {
            return Some(path);
        }
        eprintln!(
            "error: asset_path.txt names '{}', which is not a directory",
            path.display()
        );
        return None;
    }

    #[cfg(target_family = "wasm")]
    {
        let assets = PathBuf::from("/assets");
        if assets.is_dir() {
            return Some(assets);
        }
    }

    None
}

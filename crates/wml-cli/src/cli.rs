use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Argument to `--color`. Resolution to an on/off decision happens in
/// [`Cli::use_color`], since `auto` depends on where stderr goes.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum ColorMode {
    /// Colorize only when stderr is a terminal
    #[default]
    Auto,
    Always,
    Never,
}

#[derive(Parser)]
#[command(name = "wmlint", bin_name = "wmlint")]
#[command(about = "Validate WML configuration files")]
#[command(after_help = r#"EXAMPLES:
  wmlint scenario.cfg
  wmlint data/campaigns
  wmlint --dump scenario.cfg
  wmlint --test

With no argument, the path named by asset_path.txt in the working directory
is scanned."#)]
pub struct Cli {
    /// File or directory to check (directories are scanned recursively for
    /// .cfg files)
    pub path: Option<PathBuf>,

    /// Run the embedded grammar regression set and exit
    #[arg(long)]
    pub test: bool,

    /// Print the parsed tree of a single file
    #[arg(long, conflicts_with = "dump_json")]
    pub dump: bool,

    /// Print the parsed tree of a single file as JSON
    #[arg(long)]
    pub dump_json: bool,

    /// Render parse errors as annotated source snippets instead of the
    /// plain banner
    #[arg(long)]
    pub snippets: bool,

    /// When to colorize snippet output
    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,
}

impl Cli {
    /// Whether error renderings should carry ANSI styling.
    pub fn use_color(&self) -> bool {
        match self.color {
            ColorMode::Never => false,
            ColorMode::Always => true,
            ColorMode::Auto => io::stderr().is_terminal(),
        }
    }
}

//! Command-line argument definitions for the Sapling CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Sapling tree renderer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input outline file
    #[arg(help = "Path to the input outline file")]
    pub input: String,

    /// Path to the output SVG file
    #[arg(short, long, default_value = "tree.svg")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["sapling", "tree.txt"]).unwrap();
        assert_eq!(args.input, "tree.txt");
        assert_eq!(args.output, "tree.svg");
        assert_eq!(args.config, None);
        assert_eq!(args.log_level, "info");
    }

    #[test]
    fn test_all_options() {
        let args = Args::try_parse_from([
            "sapling",
            "in.tree",
            "-o",
            "out.svg",
            "--config",
            "style.toml",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(args.output, "out.svg");
        assert_eq!(args.config.as_deref(), Some("style.toml"));
        assert_eq!(args.log_level, "debug");
    }

    #[test]
    fn test_input_required() {
        assert!(Args::try_parse_from(["sapling"]).is_err());
    }
}

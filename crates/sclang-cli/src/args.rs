//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Arg, ArgAction, Command, value_parser};

/// Build the complete CLI.
pub fn build_cli() -> Command {
    Command::new("sclangc")
        .about("Compiler for the SC language (emits C)")
        .arg(
            Arg::new("input")
                .value_name("INPUT")
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .help("SC source file"),
        )
        .arg(
            Arg::new("output")
                .value_name("OUTPUT")
                .value_parser(value_parser!(PathBuf))
                .help("Output file (defaults to standard output)"),
        )
        .arg(
            Arg::new("dump_ast")
                .long("dump-ast")
                .action(ArgAction::SetTrue)
                .help("Print parsed declarations as JSON instead of compiling"),
        )
        .arg(
            Arg::new("color")
                .long("color")
                .value_name("WHEN")
                .default_value("auto")
                .value_parser(["auto", "always", "never"])
                .help("Colorize diagnostics"),
        )
}

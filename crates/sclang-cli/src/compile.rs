//! Compile command: read the input, translate or dump, report failures.

use std::fs::{self, File};
use std::io::{self, BufWriter, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::ArgMatches;
use sclang_lib::{ErrorPrinter, parse, translate};

use crate::prelude::PRELUDE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    pub fn should_colorize(self) -> bool {
        match self {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => io::stderr().is_terminal(),
        }
    }
}

pub struct Params {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub dump_ast: bool,
    pub color: ColorChoice,
}

impl Params {
    pub fn from_matches(m: &ArgMatches) -> Self {
        let color = match m.get_one::<String>("color").map(String::as_str) {
            Some("always") => ColorChoice::Always,
            Some("never") => ColorChoice::Never,
            _ => ColorChoice::Auto,
        };
        Self {
            input: m
                .get_one::<PathBuf>("input")
                .cloned()
                .expect("clap enforces the required input"),
            output: m.get_one::<PathBuf>("output").cloned(),
            dump_ast: m.get_flag("dump_ast"),
            color,
        }
    }
}

pub fn run(params: &Params) -> ExitCode {
    let source = match fs::read_to_string(&params.input) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("error: unable to read {}: {err}", params.input.display());
            return ExitCode::FAILURE;
        }
    };

    let result = if params.dump_ast {
        dump_ast(&source, params.output.as_deref())
    } else {
        compile(&source, params.output.as_deref())
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let report = ErrorPrinter::new(&err)
                .source(&source)
                .path(&params.input.display().to_string())
                .colored(params.color.should_colorize())
                .render();
            eprintln!("{report}");
            ExitCode::FAILURE
        }
    }
}

/// Translates the source to C on the requested sink.
pub(crate) fn compile(source: &str, output: Option<&Path>) -> sclang_lib::Result<()> {
    match output {
        Some(path) => {
            let mut out = BufWriter::new(File::create(path)?);
            translate(source, PRELUDE, &mut out)?;
            out.flush()?;
        }
        None => {
            let stdout = io::stdout();
            translate(source, PRELUDE, stdout.lock())?;
        }
    }
    Ok(())
}

/// Prints the parsed declarations as JSON.
pub(crate) fn dump_ast(source: &str, output: Option<&Path>) -> sclang_lib::Result<()> {
    let declarations = parse(source)?;
    let json = serde_json::to_string_pretty(&declarations)
        .expect("the AST always serializes");
    match output {
        Some(path) => {
            let mut out = BufWriter::new(File::create(path)?);
            writeln!(out, "{json}")?;
            out.flush()?;
        }
        None => {
            let stdout = io::stdout();
            writeln!(stdout.lock(), "{json}")?;
        }
    }
    Ok(())
}

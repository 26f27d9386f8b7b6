mod args;
mod compile;
mod prelude;


use std::process::ExitCode;

fn main() -> ExitCode {
    let matches = args::build_cli().get_matches();
    let params = compile::Params::from_matches(&matches);
    compile::run(&params)
}

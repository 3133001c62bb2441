use anyhow::Result;

pub mod args;
pub mod commands;
mod exit_status;
pub mod json;
pub mod report;

pub use args::{Arguments, CommonArgs, OutputFormat};
pub use exit_status::ExitStatus;

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    if args.init {
        return commands::init();
    }

    commands::check(&args.paths, &args.common)
}

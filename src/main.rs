mod cli;

use std::process::ExitCode;

use colored::Colorize;

fn main() -> ExitCode {
    let command_line_interface = cli::CommandLineInterface::load();
    match command_line_interface.run() {
        Ok(exit_code) => exit_code,
        Err(error) => {
            eprintln!("{} {error:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

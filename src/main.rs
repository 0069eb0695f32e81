use std::env::args_os;
use std::process::ExitCode;

use bmp_filter_chain::{filter_bitmap_file, CLIParser};

fn main() -> ExitCode {
    let mut cli_parser = CLIParser::default();
    let result = cli_parser
        .parse(args_os())
        .and_then(|arguments| filter_bitmap_file(&arguments));
    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", cli_parser.render_failure(&e));
            ExitCode::FAILURE
        }
    }
}

//Enable more cargo lint tests
#![warn(rust_2018_idioms)]
#![warn(clippy::disallowed_types)]

use std::process::ExitCode;

use hufham::compression::compress::compress_file;
use hufham::compression::decompress::decompress_file;
use hufham::tools::cli::{hufopts_init, Mode};

use log::{error, info, LevelFilter};
use simplelog::{Config, TermLogger, TerminalMode};

fn main() -> ExitCode {
    // Available log levels are Error, Warn, Info, Debug, Trace. hufopts_init narrows this.
    if let Err(e) = TermLogger::init(
        LevelFilter::Trace,
        Config::default(),
        TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    ) {
        eprintln!("Unable to start the logger: {}", e);
    }

    let options = hufopts_init();

    //----- Figure how what we need to do and go do it
    let result = match options.op_mode {
        Mode::Zip => compress_file(&options),
        Mode::Unzip | Mode::Test => decompress_file(&options),
    };

    match result {
        Ok(()) => {
            info!("Done.\n");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}: {}", options.file, e);
            ExitCode::FAILURE
        }
    }
}

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use log::info;

use super::cli::{HufOpts, Output};

/// Open the output channel chosen in opts. An existing file is only replaced with --force.
pub fn open_output(opts: &HufOpts) -> io::Result<Box<dyn Write>> {
    if opts.output == Output::Stdout {
        return Ok(Box::new(BufWriter::new(io::stdout().lock())));
    }
    let path = opts.out_path();
    if Path::new(&path).exists() && !opts.force_overwrite {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} already exists (use --force to overwrite)", path),
        ));
    }
    info!("Writing output to {}.", path);
    Ok(Box::new(BufWriter::new(File::create(&path)?)))
}

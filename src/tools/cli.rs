use clap::Parser;
use log::{info, warn};
use std::{fmt::Display, fmt::Formatter};

/// Extension added to compressed files.
pub const EXTENSION: &str = ".huf";

/// Verbosity of user information
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Errors,
    Warnings,
    Info,
    Debug,
    Trace,
}

/// Compress, Decompress, Test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Zip,
    Unzip,
    Test,
}
impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Define the two output channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    File,
    Stdout,
}
impl Display for Output {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone)]
pub struct HufOpts {
    /// Name of the file to read for input
    pub file: String,
    /// Explicit output path, if given
    pub out_file: Option<String>,
    /// Silently overwrite existing files with the same name
    pub force_overwrite: bool,
    /// Protect the compressed bitstream with Hamming (7,4)
    pub hamming: bool,
    /// Compress/Decompress/Test
    pub op_mode: Mode,
    /// Location where output is sent
    pub output: Output,
    /// Verbosity of user information
    pub verbose: Verbosity,
}

impl HufOpts {
    pub fn new(file: &str) -> Self {
        Self {
            file: file.to_string(),
            out_file: None,
            force_overwrite: false,
            hamming: false,
            op_mode: Mode::Zip,
            output: Output::File,
            verbose: Verbosity::Warnings,
        }
    }

    /// Output path: the explicit one, else `<input>.huf` when compressing, else the input with
    /// `.huf` stripped (or `.out` appended) when decompressing.
    pub fn out_path(&self) -> String {
        if let Some(path) = &self.out_file {
            return path.clone();
        }
        match self.op_mode {
            Mode::Zip => format!("{}{}", self.file, EXTENSION),
            Mode::Unzip | Mode::Test => match self.file.strip_suffix(EXTENSION) {
                Some(stem) if !stem.is_empty() => stem.to_string(),
                _ => format!("{}.out", self.file),
            },
        }
    }
}

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    version,
    about = "Huffman file compressor with optional Hamming (7,4) error protection",
    long_about = None
)]
pub struct Args {
    /// Filename of file to process
    #[clap()]
    filename: String,

    /// Perform compression on the input file (default)
    #[clap(short = 'z', long = "compress")]
    compress: bool,

    /// Perform decompression on the input file
    #[clap(short = 'd', long = "decompress")]
    decompress: bool,

    /// Test compressed file integrity without writing output
    #[clap(short = 't', long = "test")]
    test: bool,

    /// Add Hamming (7,4) error protection when compressing
    #[clap(short = 'e', long = "hamming")]
    hamming: bool,

    /// Output file name
    #[clap(short = 'o', long = "output")]
    output: Option<String>,

    /// Send output to the terminal
    #[clap(short = 'c', long = "stdout")]
    stdout: bool,

    /// Force overwriting output file
    #[clap(short = 'f', long = "force")]
    force: bool,

    /// Sets verbosity. -v0 is silent, -v5 is chatty
    #[clap(short = 'v', long = "verbose", default_value_t = 2)]
    v: u8,
}

/// Put command line information from CLAP into our internal structure.
pub fn hufopts_from(args: Args) -> HufOpts {
    let mut opts = HufOpts::new(&args.filename);
    if args.compress {
        opts.op_mode = Mode::Zip
    };
    if args.decompress {
        opts.op_mode = Mode::Unzip
    };
    if args.test {
        opts.op_mode = Mode::Test
    };
    opts.hamming = args.hamming;
    opts.out_file = args.output;
    if args.stdout {
        opts.output = Output::Stdout
    };
    opts.force_overwrite = args.force;
    opts.verbose = match args.v {
        0 => Verbosity::Quiet,
        1 => Verbosity::Errors,
        2 => Verbosity::Warnings,
        3 => Verbosity::Info,
        4 => Verbosity::Debug,
        _ => Verbosity::Trace,
    };
    opts
}

/// Parse the command line, set the log level and report the settings.
pub fn hufopts_init() -> HufOpts {
    let opts = hufopts_from(Args::parse());

    // Set the log level
    match opts.verbose {
        Verbosity::Quiet => log::set_max_level(log::LevelFilter::Off),
        Verbosity::Errors => log::set_max_level(log::LevelFilter::Error),
        Verbosity::Warnings => log::set_max_level(log::LevelFilter::Warn),
        Verbosity::Info => log::set_max_level(log::LevelFilter::Info),
        Verbosity::Debug => log::set_max_level(log::LevelFilter::Debug),
        Verbosity::Trace => log::set_max_level(log::LevelFilter::Trace),
    };

    info!("---- hufham Initialization Start ----");
    info!("Verbosity set to {}", log::max_level());
    info!("Operational mode set to {}", opts.op_mode);
    info!("Getting input from the file {}", opts.file);
    match opts.output {
        Output::File => info!("Sending output to {}", opts.out_path()),
        Output::Stdout => info!("Sending output to stdout"),
    }
    if opts.hamming && opts.op_mode != Mode::Zip {
        warn!("--hamming only applies when compressing; the container header decides on decode")
    };
    if opts.force_overwrite {
        info!("Forcing file overwriting")
    };
    info!("---- hufham Initialization End ----\n");
    opts
}

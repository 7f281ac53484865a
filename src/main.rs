// std imports
use std::{
    io::{self, IsTerminal, Write, stdin, stdout},
    process,
};

// third-party imports
use clap::Parser;
use env_logger::{self as logger};

// local imports
use aho_wildcard::{app, cli, error::Result};

const AHO_WILDCARD_LOG: &str = "AHO_WILDCARD_LOG";
const AHO_WILDCARD_LOG_STYLE: &str = "AHO_WILDCARD_LOG_STYLE";

// ---

fn init_logging(debug: bool) {
    if std::env::var(AHO_WILDCARD_LOG).is_ok() {
        logger::Builder::from_env(
            logger::Env::new()
                .filter(AHO_WILDCARD_LOG)
                .write_style(AHO_WILDCARD_LOG_STYLE),
        )
        .format_timestamp_micros()
        .init();
    } else if debug {
        logger::Builder::new()
            .filter_level(log::LevelFilter::Trace)
            .format_timestamp(None)
            .format_target(false)
            .init();
    } else {
        logger::Builder::new()
            .filter_level(log::LevelFilter::Error)
            .format_timestamp_millis()
            .init()
    }
    log::debug!("logging initialized");
}

fn run() -> Result<()> {
    let opt = cli::Opt::parse();
    init_logging(opt.debug);
    log::debug!("running in {:?} mode", opt.mode());

    let input = stdin().lock();
    let mut prompt: Box<dyn Write> = if stdin().is_terminal() {
        Box::new(io::stderr())
    } else {
        Box::new(io::sink())
    };

    app::run(&opt, input, stdout().lock(), &mut *prompt)
}

fn main() {
    if let Err(err) = run() {
        log::debug!("{err:?}");
        eprintln!("error: {err}");
        process::exit(1);
    }
}

//! Stderr logging for `--verbose`.

use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::runtime::ConfigErrors;
use log4rs::config::{Appender, Config, Logger, Root};
use log4rs::encode::pattern::PatternEncoder;

const APPENDER: &str = "stderr";

/// Build the logging config: everything at `level` goes to stderr, keeping
/// stdout free for reports and encoded output.
pub fn config(level: LevelFilter) -> Result<Config, ConfigErrors> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("[{l}] {m}{n}")))
        .build();

    Config::builder()
        .appender(Appender::builder().build(APPENDER, Box::new(stderr)))
        .logger(Logger::builder().build("ureq", LevelFilter::Warn))
        .logger(Logger::builder().build("ureq_proto", LevelFilter::Warn))
        .logger(Logger::builder().build("rustls", LevelFilter::Warn))
        .build(Root::builder().appender(APPENDER).build(level))
}

pub fn setup(verbose: bool) {
    if !verbose {
        return;
    }

    let installed = config(LevelFilter::Debug)
        .map_err(|e| e.to_string())
        .and_then(|config| log4rs::init_config(config).map_err(|e| e.to_string()));
    if let Err(e) = installed {
        eprintln!("Warning: could not set up logging: {e}");
    }
}

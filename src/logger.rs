use std::path::Path;

use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

const CONFIG_FILE: &str = "log4rs.yaml";
const FALLBACK_PATTERN: &str = "{d(%H:%M:%S%.3f)} {h({l:5})} {t} - {m}{n}";

#[ctor::ctor]
fn init() {
    if Path::new(CONFIG_FILE).is_file()
        && log4rs::init_file(CONFIG_FILE, Default::default()).is_ok()
    {
        return;
    }
    install_fallback_logger();
}

/// Installs the stderr console logger. Failures are reported, never raised.
fn install_fallback_logger() -> bool {
    let Some(config) = fallback_config() else {
        eprintln!("Unable to initialize logging: invalid fallback configuration");
        return false;
    };
    match log4rs::init_config(config) {
        Ok(_) => true,
        Err(e) => {
            eprintln!("Unable to initialize logging: {}", e);
            false
        }
    }
}

fn fallback_config() -> Option<Config> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(FALLBACK_PATTERN)))
        .build();
    Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(LevelFilter::Warn))
        .ok()
}

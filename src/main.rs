// src/main.rs

// Modules defined in the crate
mod analytics;
mod api;
mod config;
mod constants;
mod error;
mod formatting;
mod metadata;
mod model;
mod output;
mod pipeline;
mod storage;
mod types;

use crate::config::{CommandLineInput, SyncConfig};
use crate::pipeline::SyncPipeline;
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::ConsoleAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    Config,
};

/// Sets up logging configuration.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stdout_appender = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout_appender)))
        .build(Root::builder().appender("stdout").build(log_level))?;

    log4rs::init_config(config)?;
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = CommandLineInput::parse();

    if let Err(e) = setup_logging(cli.verbose) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    let config = match SyncConfig::resolve(cli) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let pipeline = match SyncPipeline::new(config) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            log::error!("Failed to initialize pipeline: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = pipeline.run().await {
        log::error!("Sync failed: {}", e);
        std::process::exit(1);
    }
}

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use spdlog::{error, info, warn};

use sitegen::logger::configure_logger;
use sitegen::site_builder::SiteBuilder;

use crate::config::open_config;

mod config;

const CFG_FILE_NAME: &str = "sitegen.toml";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Config path
    #[arg(short, long)]
    config_path: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config_path = args.config_path.map(PathBuf::from);

    let config = match open_config(config_path) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            eprintln!("Please run sitegen --help");
            std::process::exit(2);
        }
    };

    if let Err(err) = configure_logger(&config) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }

    info!("Starting sitegen =-=-=-=-=-=-=-=-=-=-=-=-=-=-=-");
    let builder = SiteBuilder::new(&config);
    if let Err(err) = builder.build() {
        error!("Build failed: {:#}", err);
        spdlog::default_logger().flush();
        return Err(err);
    }

    spdlog::default_logger().flush();
    Ok(())
}

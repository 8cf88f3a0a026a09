// src/main.rs
mod config;
mod kas;
mod types;
mod utils;

use clap::Parser;
use config::ClusterConfig;
use kas::ConfigOperations;
use std::io;
use utils::logging::{FileLogger, Logger, StdoutLogger};

#[derive(Parser)]
#[command(author, version, about = "Generates kube-apiserver configuration for hosted control planes", long_about = None)]
pub struct Args {
    #[arg(short, long, default_value = "cluster_config.json")]
    pub config: String,
    #[arg(short, long, default_value = "manifests")]
    pub output_dir: String,
    #[arg(short, long, default_value = "logs/configgen.log")]
    pub log_file: String,
    #[arg(short, long)]
    pub debug: bool,
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    let config_path = shellexpand::tilde(&args.config).to_string();
    let output_dir = shellexpand::tilde(&args.output_dir).to_string();
    let log_file = shellexpand::tilde(&args.log_file).to_string();

    let logger: Box<dyn Logger> = match FileLogger::new(&log_file, args.debug) {
        Ok(file_logger) => Box::new(file_logger),
        Err(e) => {
            eprintln!("Failed to open log file {}: {}", log_file, e);
            Box::new(StdoutLogger::new(args.debug))
        }
    };

    let cluster_config = match ClusterConfig::load_from_file(&config_path) {
        Ok(loaded) => loaded,
        Err(_) => {
            // First run: write a template for the user to fill in
            let template = ClusterConfig::default();
            template.save_to_file(&config_path)?;
            println!(
                "No cluster config found. Wrote a template to {}, edit it and re-run.",
                config_path
            );
            return Ok(());
        }
    };
    cluster_config.validate()?;

    let mut operations = ConfigOperations::new(logger);
    let written = operations.generate(&cluster_config, &output_dir)?;
    for path in &written {
        println!("Wrote {}", path.display());
    }

    Ok(())
}

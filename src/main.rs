use std::env;

use clap::Parser;
use plan::cli::commands::Cli;
use plan::cli::handlers;
use plan::cli::output::format_path_advice;
use plan::model::config::StoreConfig;
use plan::ops::PathError;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let store = match StoreConfig::from_env(cli.file.clone()) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = handlers::dispatch(cli, &store) {
        eprintln!("error: {}", e);
        if let Some(path_err) = e.downcast_ref::<PathError>() {
            for line in format_path_advice(path_err) {
                eprintln!("{}", line);
            }
        }
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("PLAN_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let format = env::var("PLAN_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

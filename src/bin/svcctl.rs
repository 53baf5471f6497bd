use anyhow::{bail, Context, Result};
use std::env;
use std::path::Path;
use tracing_subscriber::EnvFilter;

use svcctl::cmd::SystemRunner;
use svcctl::{init, Config, ServiceController};

/// LSB exit code for "program is not running"
const EXIT_NOT_RUNNING: i32 = 3;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut args: Vec<String> = env::args().skip(1).collect();

    let config = match args.iter().position(|a| a == "--config") {
        Some(idx) => {
            let Some(path) = args.get(idx + 1).cloned() else {
                bail!("--config requires a path");
            };
            args.drain(idx..=idx + 1);
            Config::load(Path::new(&path))?
        }
        None => Config::load_default()?,
    };

    let Some(command) = args.first() else {
        print_usage();
        return Ok(());
    };

    match command.as_str() {
        "start" => {
            let service = controller(&args, &config)?;
            service.start()?;
            println!("Started {}", service.name());
            Ok(())
        }
        "stop" => {
            let service = controller(&args, &config)?;
            service.stop()?;
            println!("Stopped {}", service.name());
            Ok(())
        }
        "status" => {
            let service = controller(&args, &config)?;
            if service.is_running()? {
                println!("{} is running", service.name());
                Ok(())
            } else {
                println!("{} is not running", service.name());
                std::process::exit(EXIT_NOT_RUNNING);
            }
        }
        "detect" => {
            let detection = init::detect(&SystemRunner::new(), &config.probe)?;
            println!("{}", detection.kind.name());
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            std::process::exit(1);
        }
    }
}

fn controller(args: &[String], config: &Config) -> Result<ServiceController> {
    let Some(name) = args.get(1) else {
        bail!("svcctl {} requires a service name", args[0]);
    };
    ServiceController::from_config(name.as_str(), config)
        .with_context(|| format!("Cannot manage service {}", name))
}

fn print_usage() {
    println!(
        r#"svcctl - Service control for systemd and SysV init

Usage:
    svcctl [--config PATH] start <service>   Start a service
    svcctl [--config PATH] stop <service>    Stop a service
    svcctl [--config PATH] status <service>  Exit 0 if running, 3 if not
    svcctl [--config PATH] detect            Print the detected init system
    svcctl help                              Show this help message

Configuration is read from $SVCCTL_CONFIG or /etc/svcctl/config.toml.

Examples:
    svcctl status couchdb
    svcctl --config ./svcctl.toml start nginx
"#
    );
}

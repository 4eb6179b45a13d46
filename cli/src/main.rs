mod commands;
mod terminal;

use std::time::Duration;

use commands::{CommandLine, Commands};
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CommandLine::parse_args();
    let cfg = cli.to_config();

    logging::init_logging();
    if !cfg.json {
        print::banner(cfg.no_banner, cfg.quiet);
    }

    let result = match cli.command {
        Commands::Port { host, port, .. } => commands::port::probe(&host, port, &cfg).await,
        Commands::Range {
            host,
            ports,
            deadline_ms,
            ..
        } => {
            if !cfg.json {
                print::header("starting scanner", cfg.quiet);
            }
            commands::range::scan(&host, ports, deadline_ms.map(Duration::from_millis), &cfg).await
        }
        Commands::Service { port } => commands::service::lookup(port, &cfg),
    };

    if !cfg.json {
        print::end_of_program(cfg.quiet);
    }
    result
}

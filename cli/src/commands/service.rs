use colored::*;
use serde_json::json;
use sweep_common::config::Config;
use sweep_common::services::{UNKNOWN_SERVICE, service_name};

use crate::terminal::{colors, print};

pub fn lookup(port: u16, cfg: &Config) -> anyhow::Result<()> {
    let service = service_name(port);

    if cfg.json {
        println!("{}", json!({ "port": port, "service": service }));
        return Ok(());
    }

    print::header("service lookup", cfg.quiet);
    let value: ColoredString = if service == UNKNOWN_SERVICE {
        service.dimmed()
    } else {
        service.color(colors::PRIMARY).bold()
    };
    print::details(&[
        ("Port".to_string(), port.to_string().color(colors::ACCENT)),
        ("Service".to_string(), value),
    ]);
    Ok(())
}

use colored::*;
use sweep_common::network::probe::{PortStatus, ProbeResult};
use sweep_common::services::service_name;

use crate::terminal::colors;

/// A `(key, value)` row shown by the detail printers.
pub type Detail = (String, ColoredString);

pub fn status_to_colored(status: PortStatus) -> ColoredString {
    match status {
        PortStatus::Open => "open".color(colors::PORT_OPEN).bold(),
        PortStatus::Closed => "closed".color(colors::PORT_CLOSED),
        PortStatus::Error => "error".color(colors::PORT_ERROR).bold(),
    }
}

pub fn latency_to_colored(response_time: Option<f64>) -> Option<ColoredString> {
    response_time.map(|ms| format!("{ms:.2} ms").color(colors::LATENCY))
}

/// Name shown for a port in tree views, e.g. `443/tcp`.
pub fn port_label(port: u16) -> String {
    format!("{port}/tcp")
}

/// Key/value rows describing one probe result.
pub fn result_to_details(result: &ProbeResult) -> Vec<Detail> {
    let mut details: Vec<Detail> = vec![
        ("State".to_string(), status_to_colored(result.status)),
        (
            "Service".to_string(),
            service_name(result.port).color(colors::TEXT_DEFAULT),
        ),
    ];

    if let Some(latency) = latency_to_colored(result.response_time) {
        details.push(("Latency".to_string(), latency));
    }

    if let Some(error) = &result.error {
        details.push(("Error".to_string(), error.as_str().color(colors::PORT_ERROR)));
    }

    details
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

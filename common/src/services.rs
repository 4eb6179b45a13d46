use std::collections::HashMap;
use std::sync::OnceLock;

pub const UNKNOWN_SERVICE: &str = "Unknown";

const WELL_KNOWN: &[(u16, &str)] = &[
    (21, "FTP"),
    (22, "SSH"),
    (23, "Telnet"),
    (25, "SMTP"),
    (53, "DNS"),
    (80, "HTTP"),
    (110, "POP3"),
    (143, "IMAP"),
    (443, "HTTPS"),
    (993, "IMAPS"),
    (995, "POP3S"),
    (3306, "MySQL"),
    (3389, "RDP"),
    (5432, "PostgreSQL"),
    (6379, "Redis"),
    (27017, "MongoDB"),
];

static SERVICE_DB: OnceLock<HashMap<u16, &'static str>> = OnceLock::new();

/// Retrieves or initializes the well-known service table.
///
/// Built once per process and never written afterwards.
fn get_service_db() -> &'static HashMap<u16, &'static str> {
    SERVICE_DB.get_or_init(|| WELL_KNOWN.iter().copied().collect())
}

/// Identify the service commonly bound to `port`.
///
/// Returns [`UNKNOWN_SERVICE`] for ports outside the table.
pub fn service_name(port: u16) -> &'static str {
    get_service_db()
        .get(&port)
        .copied()
        .unwrap_or(UNKNOWN_SERVICE)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

//! Cross-crate tests: the scanner driven against real loopback sockets and
//! against randomized simulated hosts.

mod scanning;
mod utils;

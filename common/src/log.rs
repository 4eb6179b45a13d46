#[doc(hidden)]
pub use tracing;

/// Emits a user-facing success line.
///
/// Routed through `tracing` under the `sweep::success` target so the CLI
/// formatter can render it differently from a plain `info!` event.
#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::log::tracing::info!(target: "sweep::success", $($arg)*)
    };
}

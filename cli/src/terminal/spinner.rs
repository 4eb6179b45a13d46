use colored::*;
use indicatif::ProgressStyle;
use tracing::Span;
use tracing_indicatif::span_ext::IndicatifSpanExt;

const TICK_STRINGS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

/// Turns `span` into a progress bar over `total` probes.
pub fn start_scan_progress(span: &Span, total: usize) -> anyhow::Result<()> {
    let style = ProgressStyle::with_template(
        "{spinner:.blue} {msg} {bar:28.green/bright_black} {pos}/{len} ports",
    )?
    .progress_chars("━╸━")
    .tick_strings(TICK_STRINGS);

    span.pb_set_style(&style);
    span.pb_set_length(total as u64);
    span.pb_set_message(&format!("{}", "Probing".italic().white()));
    span.pb_set_position(0);
    Ok(())
}

/// Returns a callback that advances the bar attached to `span`.
pub fn report_scan_progress(span: Span) -> impl Fn(usize) + Send + Sync + 'static {
    move |finished: usize| span.pb_set_position(finished as u64)
}

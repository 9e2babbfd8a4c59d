use std::panic::PanicHookInfo;
use std::sync::Once;

use tracing_subscriber::{filter::FilterFn, layer::SubscriberExt, util::SubscriberInitExt};

fn ours(module_path: Option<&str>) -> bool {
    module_path.unwrap_or_default().starts_with("parada")
}

/// Install the tracing subscriber and panic hook. Safe to call repeatedly.
pub(crate) fn setup_logging() {
    static LOGGING_SETUP: Once = Once::new();

    LOGGING_SETUP.call_once(|| {
        install_subscriber();
        std::panic::set_hook(Box::new(panic_hook));
    })
}

#[cfg(target_os = "android")]
fn install_subscriber() {
    use tracing_logcat::{LogcatMakeWriter, LogcatTag};
    use tracing_subscriber::fmt::format::Format;

    let tag = LogcatTag::Fixed("Parada-Rust".to_owned());
    let writer = match LogcatMakeWriter::new(tag) {
        Ok(writer) => writer,
        Err(error) => {
            eprintln!("failed to initialize logcat writer: {error}");
            return;
        }
    };

    let filter = FilterFn::new(|meta| ours(meta.module_path()));
    let layer = tracing_subscriber::fmt::layer()
        .event_format(Format::default().with_level(false).without_time())
        .with_writer(writer)
        .with_ansi(false);
    let _ = tracing_subscriber::registry()
        .with(layer)
        .with(filter)
        .try_init();
}

#[cfg(not(target_os = "android"))]
fn install_subscriber() {
    let filter = FilterFn::new(|meta| ours(meta.module_path()));
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false);
    let _ = tracing_subscriber::registry()
        .with(layer)
        .with(filter)
        .try_init();
}

fn panic_hook(info: &PanicHookInfo) {
    let backtrace = std::backtrace::Backtrace::force_capture();
    tracing::error!("{info}\n{backtrace}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_keeps_our_crates() {
        assert!(ours(Some("parada_core::browser")));
        assert!(ours(Some("parada_mobile::state")));
        assert!(!ours(Some("reqwest::connect")));
        assert!(!ours(None));
    }
}

pub(crate) mod logging;
pub mod state;

uniffi::setup_scaffolding!();

/// Route Rust logs to logcat (Android) or stderr and log panics.
/// Call this once at startup from Kotlin/Swift; constructing a
/// [`state::BrowserState`] does it too.
#[uniffi::export]
pub fn init_logging() {
    logging::setup_logging();
}

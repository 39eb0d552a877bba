//! User-Agent header generation for SDK telemetry.

use std::sync::OnceLock;

/// SDK name used in the User-Agent string.
const SDK_NAME: &str = "verifalia-rust-sdk";

/// SDK version from Cargo.toml.
const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

static USER_AGENT: OnceLock<String> = OnceLock::new();

/// Returns the User-Agent string for SDK requests.
///
/// Format: `verifalia-rust-sdk/0.1.0 (rust/1.92; linux/x86_64)`
///
/// The string is computed once and cached for subsequent calls.
pub(crate) fn user_agent() -> &'static str {
    USER_AGENT.get_or_init(|| {
        format!(
            "{}/{} ({}; {}/{})",
            SDK_NAME,
            SDK_VERSION,
            rust_version(),
            os_name(std::env::consts::OS),
            std::env::consts::ARCH,
        )
    })
}

fn rust_version() -> &'static str {
    concat!("rust/", env!("CARGO_PKG_RUST_VERSION"))
}

fn os_name(os: &'static str) -> &'static str {
    match os {
        "macos" => "darwin",
        os => os,
    }
}

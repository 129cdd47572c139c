//! Development helper: initialize a tracing subscriber when `RUST_LOG` is
//! set.
//!
//! Benches and tests can call [`init_tracing`] to see the `tracing::debug!`
//! calls each matcher emits on subscribe/unsubscribe. No-op if `RUST_LOG`
//! isn't set or a global subscriber is already installed.
pub fn init_tracing() {
    use std::env;

    if env::var("RUST_LOG").is_ok() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    }
}

/// Development helper: install a tracing subscriber when `RUST_LOG` is set.
///
/// Tests and benches can call `zmqx::dev_tracing::init_tracing()` to see the
/// `[OPT]`, `[MONITOR]` and `[PUMP]` logs. Does nothing when `RUST_LOG` is
/// unset or a global subscriber is already installed.
pub fn init_tracing() {
    if std::env::var_os("RUST_LOG").is_some() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }
}

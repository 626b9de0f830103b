//! Tracing subscriber setup shared by every Hearth binary.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Build the default filter directive for a binary.
///
/// Cargo binary names use dashes while tracing targets use the crate's
/// underscored module path, so `hearth-server` becomes `hearth_server=info`.
pub fn default_directive(bin_name: &str, level: &str) -> String {
    let target = bin_name.replace('-', "_");
    format!("{target}={level},tower_http={level},warn")
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `level` when it is set. Calling this more
/// than once is harmless; later calls are ignored.
pub fn setup_logger(bin_name: &str, level: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(bin_name, level)));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(env_filter)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_uses_crate_target() {
        // テスト項目: バイナリ名のダッシュがアンダースコアに変換される
        // when (操作):
        let directive = default_directive("hearth-server", "debug");

        // then (期待する結果):
        assert_eq!(directive, "hearth_server=debug,tower_http=debug,warn");
    }

    #[test]
    fn test_setup_logger_twice_does_not_panic() {
        // テスト項目: 2 回呼び出してもパニックしない
        setup_logger("hearth-test", "info");
        setup_logger("hearth-test", "debug");
    }
}

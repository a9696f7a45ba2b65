//! `skk_cli`：命令行前端（`skkdic-expr` 词典表达式工具 + 交互式查词 REPL）。
pub mod expr;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// 日志输出到 stderr（stdout 用于词典输出）；级别由 `RUST_LOG` 控制，默认 warn。
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

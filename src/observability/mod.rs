//! 可观测性

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// 安装日志：RUST_LOG 优先，否则用配置中的默认级别。日志写 stderr，stdout 留给对局事件。
pub fn init(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

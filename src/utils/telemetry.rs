// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// 日志格式的环境变量，取值 `json` 时输出结构化日志
pub const LOG_FORMAT_ENV: &str = "VISUAL_TESTER_LOG_FORMAT";

const DEFAULT_FILTER: &str = "info,visual_tester=debug";

/// 初始化日志
///
/// 进度信息通过 `tracing` 输出到标准输出，`RUST_LOG` 可覆盖默认过滤规则
pub fn init_telemetry() {
    let json = std::env::var(LOG_FORMAT_ENV)
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let fmt_layer = if json {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().with_target(false).boxed()
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with(fmt_layer)
        .init();
}

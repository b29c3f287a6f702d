// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use tracing::info;
use url::Url;
use validator::Validate;
use visual_tester::config::settings::Settings;
use visual_tester::domain::services::page_verifier::{PageVerifier, VerifyOptions};
use visual_tester::engines::chromium_engine::ChromiumLauncher;
use visual_tester::engines::session::verify_in_session;
use visual_tester::infrastructure::storage::LocalStorage;
use visual_tester::utils::telemetry;

/// 主函数
///
/// 加载配置，在一个浏览器会话中依次校验三个页面并保存截图。
/// 任何一步失败都会以非零状态退出。
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();

    // 2. Load configuration
    let settings = Settings::new()?;
    settings.validate()?;
    let origin = Url::parse(&settings.target.origin)?;
    info!(
        origin = %origin,
        ready_timeout_ms = settings.verification.ready_timeout_ms,
        assertion_timeout_ms = settings.verification.assertion_timeout_ms,
        "Configuration loaded"
    );

    // 3. Wire the verifier; screenshots land relative to the working directory
    let store = Arc::new(LocalStorage::new("."));
    let verifier = PageVerifier::new(origin, VerifyOptions::from(&settings.verification), store);
    let launcher = ChromiumLauncher::new(settings.browser.clone());

    // 4. Run
    let report = verify_in_session(&launcher, &verifier).await?;
    for page in &report.pages {
        info!(
            page = page.page,
            url = %page.url,
            path = page.screenshot_path,
            bytes = page.bytes_written,
            "Screenshot written"
        );
    }

    Ok(())
}

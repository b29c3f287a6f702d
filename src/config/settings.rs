// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;
use validator::Validate;

/// 远程调试地址的环境变量回退
pub const REMOTE_DEBUGGING_URL_ENV: &str = "CHROMIUM_REMOTE_DEBUGGING_URL";

/// 应用程序配置设置
///
/// 包含目标站点、浏览器和页面校验的所有配置项
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Settings {
    /// 目标站点配置
    #[validate(nested)]
    pub target: TargetSettings,
    /// 浏览器配置
    #[validate(nested)]
    pub browser: BrowserSettings,
    /// 页面校验配置
    #[validate(nested)]
    pub verification: VerificationSettings,
}

/// 目标站点配置
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TargetSettings {
    /// 被测应用的源地址
    #[validate(url)]
    pub origin: String,
}

/// 浏览器配置设置
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BrowserSettings {
    /// 是否无头模式运行
    pub headless: bool,
    /// 是否禁用沙箱
    pub no_sandbox: bool,
    /// 远程 Chrome 调试地址，设置后不再本地启动浏览器
    #[validate(url)]
    pub remote_debugging_url: Option<String>,
    /// Chrome 可执行文件路径
    pub chrome_executable: Option<String>,
    /// CDP 请求超时时间（秒）
    #[validate(range(min = 1))]
    pub request_timeout_secs: u64,
    /// 视口宽度
    #[validate(range(min = 1))]
    pub viewport_width: u32,
    /// 视口高度
    #[validate(range(min = 1))]
    pub viewport_height: u32,
}

/// 页面校验配置设置
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VerificationSettings {
    /// 等待就绪选择器可见的超时时间（毫秒）
    pub ready_timeout_ms: u64,
    /// 文本断言的超时时间（毫秒）
    pub assertion_timeout_ms: u64,
    /// 轮询间隔（毫秒）
    #[validate(range(min = 1))]
    pub poll_interval_ms: u64,
    /// 是否截取整页
    pub full_page: bool,
}

impl BrowserSettings {
    /// CDP 请求超时
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// 解析远程调试地址
    ///
    /// 配置项优先，其次读取 `CHROMIUM_REMOTE_DEBUGGING_URL` 环境变量
    pub fn remote_url(&self) -> Option<String> {
        self.remote_debugging_url
            .clone()
            .or_else(|| std::env::var(REMOTE_DEBUGGING_URL_ENV).ok())
            .filter(|url| !url.trim().is_empty())
    }
}

impl VerificationSettings {
    pub fn ready_timeout(&self) -> Duration {
        Duration::from_millis(self.ready_timeout_ms)
    }

    pub fn assertion_timeout(&self) -> Duration {
        Duration::from_millis(self.assertion_timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次叠加默认值、`config/default`、`config/{APP_ENVIRONMENT}` 文件和
    /// `VISUAL_TESTER__*` 环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Self::with_defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("VISUAL_TESTER").separator("__"));

        builder.build()?.try_deserialize()
    }

    /// 仅由默认值构成的配置，不读取文件或环境变量
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::with_defaults()?.build()?.try_deserialize()
    }

    fn with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("target.origin", "http://localhost:9090")?
            // Browser launch settings
            .set_default("browser.headless", true)?
            .set_default("browser.no_sandbox", true)?
            .set_default("browser.request_timeout_secs", 30)?
            .set_default("browser.viewport_width", 1280)?
            .set_default("browser.viewport_height", 720)?
            // Playwright defaults: 30s for waits, 5s for expect() assertions
            .set_default("verification.ready_timeout_ms", 30_000)?
            .set_default("verification.assertion_timeout_ms", 5_000)?
            .set_default("verification.poll_interval_ms", 100)?
            .set_default("verification.full_page", true)
    }
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::BrowserSettings;
use crate::engines::traits::{BrowserSession, EngineError, PageDriver, SessionLauncher};
use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::handler::viewport::Viewport;
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use tokio::task::JoinHandle;

const SCRIPT_ARG: &str = "__ARG__";

// Visible = connected, non-empty box, not visibility:hidden/collapse.
const SELECTOR_VISIBLE_SCRIPT: &str = r#"(() => {
  const el = document.querySelector(__ARG__);
  if (!el || !el.isConnected) return false;
  const style = window.getComputedStyle(el);
  if (style.visibility === 'hidden' || style.visibility === 'collapse') return false;
  const rect = el.getBoundingClientRect();
  return rect.width > 0 && rect.height > 0;
})()"#;

// Only the deepest elements containing the text are considered.
const TEXT_VISIBLE_SCRIPT: &str = r#"(() => {
  const norm = (s) => (s || '').replace(/\s+/g, ' ').trim().toLowerCase();
  const needle = norm(__ARG__);
  const skip = new Set(['SCRIPT', 'STYLE', 'NOSCRIPT', 'TEMPLATE', 'HEAD', 'TITLE']);
  const matches = (el) => !skip.has(el.tagName) && norm(el.textContent).includes(needle);
  const visible = (el) => {
    const style = window.getComputedStyle(el);
    if (style.visibility === 'hidden' || style.visibility === 'collapse') return false;
    const rect = el.getBoundingClientRect();
    return rect.width > 0 && rect.height > 0;
  };
  if (!document.body) return false;
  for (const el of [document.body, ...document.body.querySelectorAll('*')]) {
    if (!matches(el)) continue;
    if (Array.from(el.children).some(matches)) continue;
    if (visible(el)) return true;
  }
  return false;
})()"#;

/// 将参数以 JSON 字面量嵌入脚本
fn render_script(template: &str, arg: &str) -> Result<String, EngineError> {
    let literal = serde_json::to_string(arg).map_err(|e| EngineError::Protocol(e.to_string()))?;
    Ok(template.replace(SCRIPT_ARG, &literal))
}

/// 选择器可见性探测脚本
pub fn selector_visible_script(selector: &str) -> Result<String, EngineError> {
    render_script(SELECTOR_VISIBLE_SCRIPT, selector)
}

/// 文本可见性探测脚本
pub fn text_visible_script(text: &str) -> Result<String, EngineError> {
    render_script(TEXT_VISIBLE_SCRIPT, text)
}

async fn evaluate_bool(page: &Page, script: String) -> Result<bool, EngineError> {
    page.evaluate(script)
        .await
        .map_err(|e| EngineError::Protocol(e.to_string()))?
        .into_value::<bool>()
        .map_err(|e| EngineError::Protocol(e.to_string()))
}

#[async_trait]
impl PageDriver for Page {
    async fn goto(&self, url: &str) -> Result<(), EngineError> {
        // goto waits for the load event by default
        Page::goto(self, url)
            .await
            .map_err(|e| EngineError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    async fn is_selector_visible(&self, selector: &str) -> Result<bool, EngineError> {
        evaluate_bool(self, selector_visible_script(selector)?).await
    }

    async fn is_text_visible(&self, text: &str) -> Result<bool, EngineError> {
        evaluate_bool(self, text_visible_script(text)?).await
    }

    async fn screenshot(&self, full_page: bool) -> Result<Vec<u8>, EngineError> {
        let params = ScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .full_page(full_page)
            .build();

        Page::screenshot(self, params)
            .await
            .map_err(|e| EngineError::Protocol(format!("Page screenshot failed: {}", e)))
    }
}

/// 会话来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    /// 本地启动的 Chromium 进程，关闭时结束进程
    Launched,
    /// 远程 Chrome 实例，关闭时只关闭页面
    Remote,
}

/// Chromium 浏览器会话
///
/// 持有浏览器、CDP 事件处理任务和唯一的页面
pub struct ChromiumSession {
    browser: Browser,
    handler: JoinHandle<()>,
    page: Page,
    mode: SessionMode,
}

impl ChromiumSession {
    /// 启动或连接浏览器并打开一个空白页面
    pub async fn launch(settings: &BrowserSettings) -> Result<Self, EngineError> {
        let (browser, mut handler, mode) = if let Some(url) = settings.remote_url() {
            tracing::info!("Connecting to remote Chrome instance at: {}", url);
            let (browser, handler) = Browser::connect(url)
                .await
                .map_err(|e| EngineError::Launch(format!("Failed to connect to remote Chrome: {}", e)))?;
            (browser, handler, SessionMode::Remote)
        } else {
            let config = Self::browser_config(settings)?;
            tracing::info!(headless = settings.headless, "Launching Chromium");
            let (browser, handler) = Browser::launch(config)
                .await
                .map_err(|e| EngineError::Launch(e.to_string()))?;
            (browser, handler, SessionMode::Launched)
        };

        // Spawn a handler to process browser events
        let handler = tokio::spawn(async move {
            while let Some(h) = handler.next().await {
                if h.is_err() {
                    break;
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                let mut browser = browser;
                if mode == SessionMode::Launched {
                    let _ = browser.close().await;
                    let _ = browser.wait().await;
                }
                handler.abort();
                return Err(EngineError::Launch(format!("Failed to open page: {}", e)));
            }
        };

        Ok(Self {
            browser,
            handler,
            page,
            mode,
        })
    }

    fn browser_config(settings: &BrowserSettings) -> Result<BrowserConfig, EngineError> {
        let mut builder = BrowserConfig::builder()
            .request_timeout(settings.request_timeout())
            .viewport(Viewport {
                width: settings.viewport_width,
                height: settings.viewport_height,
                ..Default::default()
            })
            .window_size(settings.viewport_width, settings.viewport_height)
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage");

        if !settings.headless {
            builder = builder.with_head();
        }
        if settings.no_sandbox {
            builder = builder.no_sandbox();
        }
        if let Some(path) = &settings.chrome_executable {
            builder = builder.chrome_executable(path);
        }

        builder.build().map_err(EngineError::Launch)
    }
}

#[async_trait]
impl BrowserSession for ChromiumSession {
    type Driver = Page;

    fn driver(&self) -> &Page {
        &self.page
    }

    async fn close(self) -> Result<(), EngineError> {
        let ChromiumSession {
            mut browser,
            handler,
            page,
            mode,
        } = self;

        let result = match mode {
            SessionMode::Launched => {
                drop(page);
                match browser.close().await {
                    Ok(_) => browser
                        .wait()
                        .await
                        .map(|_| ())
                        .map_err(|e| EngineError::Protocol(e.to_string())),
                    Err(e) => Err(EngineError::Protocol(e.to_string())),
                }
            }
            SessionMode::Remote => page
                .close()
                .await
                .map_err(|e| EngineError::Protocol(e.to_string())),
        };

        handler.abort();
        tracing::debug!(?mode, ok = result.is_ok(), "Browser session closed");
        result
    }
}

/// Chromium 会话启动器
#[derive(Debug, Clone)]
pub struct ChromiumLauncher {
    settings: BrowserSettings,
}

impl ChromiumLauncher {
    pub fn new(settings: BrowserSettings) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl SessionLauncher for ChromiumLauncher {
    type Session = ChromiumSession;

    async fn launch(&self) -> Result<ChromiumSession, EngineError> {
        ChromiumSession::launch(&self.settings).await
    }
}

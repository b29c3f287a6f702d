// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::VerificationSettings;
use crate::domain::models::page_target::{PageTarget, PAGE_TARGETS};
use crate::domain::models::verification::{PageOutcome, VerificationReport, VerificationStage};
use crate::domain::repositories::storage_repository::ScreenshotStore;
use crate::engines::traits::PageDriver;
use crate::utils::errors::VerifyError;
use crate::utils::wait::poll_until;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};
use url::Url;

/// 校验选项
///
/// 默认值与 Playwright 的内置默认值一致：等待 30 秒，断言 5 秒
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifyOptions {
    /// 等待就绪选择器可见的超时
    pub ready_timeout: Duration,
    /// 单条文本断言的超时
    pub assertion_timeout: Duration,
    /// 轮询间隔
    pub poll_interval: Duration,
    /// 是否截取整页
    pub full_page: bool,
}

impl Default for VerifyOptions {
    fn default() -> Self {
        Self {
            ready_timeout: Duration::from_millis(30_000),
            assertion_timeout: Duration::from_millis(5_000),
            poll_interval: Duration::from_millis(100),
            full_page: true,
        }
    }
}

impl From<&VerificationSettings> for VerifyOptions {
    fn from(settings: &VerificationSettings) -> Self {
        Self {
            ready_timeout: settings.ready_timeout(),
            assertion_timeout: settings.assertion_timeout(),
            poll_interval: settings.poll_interval(),
            full_page: settings.full_page,
        }
    }
}

/// 页面校验服务
///
/// 按固定顺序依次校验主页、文档页和仪表盘页：导航、等待就绪标记、
/// 断言文本、截图并保存。遇到第一个失败即终止，不重试，也不跳过。
pub struct PageVerifier {
    origin: Url,
    targets: Vec<PageTarget>,
    options: VerifyOptions,
    store: Arc<dyn ScreenshotStore>,
}

impl PageVerifier {
    pub fn new(origin: Url, options: VerifyOptions, store: Arc<dyn ScreenshotStore>) -> Self {
        Self {
            origin,
            targets: PAGE_TARGETS.to_vec(),
            options,
            store,
        }
    }

    pub fn targets(&self) -> &[PageTarget] {
        &self.targets
    }

    /// 页面的完整URL（源地址 + 路由）
    pub fn page_url(&self, target: &PageTarget) -> Result<Url, VerifyError> {
        self.origin
            .join(target.route)
            .map_err(|e| VerifyError::InvalidUrl {
                page: target.name,
                message: e.to_string(),
            })
    }

    /// 依次校验所有页面
    ///
    /// # 参数
    ///
    /// * `driver` - 当前会话的页面驱动
    ///
    /// # 返回值
    ///
    /// * `Ok(VerificationReport)` - 全部页面通过，截图均已写入
    /// * `Err(VerifyError)` - 第一个失败的页面及原因
    pub async fn verify_pages<D>(&self, driver: &D) -> Result<VerificationReport, VerifyError>
    where
        D: PageDriver + ?Sized,
    {
        let mut report = VerificationReport::default();
        let mut stage = VerificationStage::NotStarted;
        debug!(%stage, pages = self.targets.len(), "Starting page verification");

        for (index, target) in self.targets.iter().enumerate() {
            stage = VerificationStage::Verifying(index);
            debug!(%stage, page = target.name);

            match self.verify_page(driver, target).await {
                Ok(outcome) => report.pages.push(outcome),
                Err(e) => {
                    stage = VerificationStage::Failed(index);
                    error!(%stage, page = target.name, error = %e, "Page verification failed");
                    return Err(e);
                }
            }
        }

        stage = VerificationStage::Done;
        debug!(%stage);
        info!("All pages verified and screenshots taken.");
        Ok(report)
    }

    async fn verify_page<D>(&self, driver: &D, target: &PageTarget) -> Result<PageOutcome, VerifyError>
    where
        D: PageDriver + ?Sized,
    {
        let url = self.page_url(target)?;

        info!("Navigating to the {} page...", target.name);
        driver
            .goto(url.as_str())
            .await
            .map_err(|source| VerifyError::Navigation {
                page: target.name,
                url: url.to_string(),
                source,
            })?;

        let selector = target.ready_selector;
        let ready = poll_until(self.options.ready_timeout, self.options.poll_interval, move || {
            driver.is_selector_visible(selector)
        })
        .await
        .map_err(|source| VerifyError::Probe {
            page: target.name,
            source,
        })?;
        if !ready {
            return Err(VerifyError::ReadinessTimeout {
                page: target.name,
                selector,
                timeout: self.options.ready_timeout,
            });
        }
        debug!(page = target.name, selector, "Readiness marker visible");

        for &text in target.required_texts {
            let visible = poll_until(
                self.options.assertion_timeout,
                self.options.poll_interval,
                move || driver.is_text_visible(text),
            )
            .await
            .map_err(|source| VerifyError::Probe {
                page: target.name,
                source,
            })?;
            if !visible {
                return Err(VerifyError::TextNotVisible {
                    page: target.name,
                    text,
                    timeout: self.options.assertion_timeout,
                });
            }
            debug!(page = target.name, text, "Text visible");
        }

        info!("Taking screenshot of the {} page...", target.name);
        let png = driver
            .screenshot(self.options.full_page)
            .await
            .map_err(|source| VerifyError::Screenshot {
                page: target.name,
                source,
            })?;

        self.store
            .save(target.screenshot_path, &png)
            .await
            .map_err(|source| VerifyError::Storage {
                page: target.name,
                path: target.screenshot_path,
                source,
            })?;

        Ok(PageOutcome {
            page: target.name,
            url: url.to_string(),
            screenshot_path: target.screenshot_path,
            bytes_written: png.len(),
        })
    }
}

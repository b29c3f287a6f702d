// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::verification::VerificationReport;
use crate::domain::services::page_verifier::PageVerifier;
use crate::engines::traits::{BrowserSession, SessionLauncher};
use crate::utils::errors::SessionError;
use tracing::{info, warn};

/// 在一个浏览器会话中执行页面校验
///
/// 获取会话 → 校验 → 释放会话。无论校验成功与否都会关闭会话；
/// 校验错误优先于关闭错误返回。
///
/// # 参数
///
/// * `launcher` - 会话启动器
/// * `verifier` - 页面校验服务
///
/// # 返回值
///
/// * `Ok(VerificationReport)` - 全部页面通过且会话正常关闭
/// * `Err(SessionError)` - 启动、校验或关闭失败
pub async fn verify_in_session<L>(
    launcher: &L,
    verifier: &PageVerifier,
) -> Result<VerificationReport, SessionError>
where
    L: SessionLauncher,
{
    let session = launcher.launch().await.map_err(SessionError::Launch)?;
    info!("Browser session started");

    let outcome = verifier.verify_pages(session.driver()).await;
    let closed = session.close().await;

    match (outcome, closed) {
        (Ok(report), Ok(())) => Ok(report),
        (Ok(_), Err(e)) => Err(SessionError::Close(e)),
        (Err(e), Ok(())) => Err(SessionError::Verify(e)),
        (Err(e), Err(close_error)) => {
            warn!(error = %close_error, "Failed to close browser session after verification failure");
            Err(SessionError::Verify(e))
        }
    }
}

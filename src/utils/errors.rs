// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::repositories::storage_repository::StorageError;
use crate::engines::traits::EngineError;
use std::time::Duration;
use thiserror::Error;

/// 页面校验错误类型
///
/// 每个变体都携带失败页面的名称，任何一个错误都会终止整个校验流程
#[derive(Error, Debug)]
pub enum VerifyError {
    #[error("[{page}] invalid page url: {message}")]
    InvalidUrl { page: &'static str, message: String },

    #[error("[{page}] navigation to {url} failed: {source}")]
    Navigation {
        page: &'static str,
        url: String,
        #[source]
        source: EngineError,
    },

    #[error("[{page}] selector `{selector}` did not become visible within {timeout:?}")]
    ReadinessTimeout {
        page: &'static str,
        selector: &'static str,
        timeout: Duration,
    },

    #[error("[{page}] text \"{text}\" was not visible within {timeout:?}")]
    TextNotVisible {
        page: &'static str,
        text: &'static str,
        timeout: Duration,
    },

    #[error("[{page}] browser probe failed: {source}")]
    Probe {
        page: &'static str,
        #[source]
        source: EngineError,
    },

    #[error("[{page}] screenshot capture failed: {source}")]
    Screenshot {
        page: &'static str,
        #[source]
        source: EngineError,
    },

    #[error("[{page}] writing {path} failed: {source}")]
    Storage {
        page: &'static str,
        path: &'static str,
        #[source]
        source: StorageError,
    },
}

impl VerifyError {
    /// 失败的页面名称
    pub fn page(&self) -> &'static str {
        match self {
            VerifyError::InvalidUrl { page, .. }
            | VerifyError::Navigation { page, .. }
            | VerifyError::ReadinessTimeout { page, .. }
            | VerifyError::TextNotVisible { page, .. }
            | VerifyError::Probe { page, .. }
            | VerifyError::Screenshot { page, .. }
            | VerifyError::Storage { page, .. } => page,
        }
    }
}

/// 会话错误类型
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("failed to start browser session: {0}")]
    Launch(#[source] EngineError),

    #[error(transparent)]
    Verify(#[from] VerifyError),

    #[error("failed to close browser session: {0}")]
    Close(#[source] EngineError),
}

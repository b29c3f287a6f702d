// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use thiserror::Error;

/// 存储错误类型
#[derive(Error, Debug)]
pub enum StorageError {
    /// IO错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// 截图存储特质
///
/// 以相对路径为键保存截图，已存在的文件会被覆盖
#[async_trait]
pub trait ScreenshotStore: Send + Sync {
    /// 使用指定键保存数据，必要时创建父目录
    async fn save(&self, key: &str, data: &[u8]) -> Result<(), StorageError>;

    /// 检查存储中是否存在指定键
    async fn exists(&self, key: &str) -> Result<bool, StorageError>;
}

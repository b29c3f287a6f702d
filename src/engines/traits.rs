// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use thiserror::Error;

/// 引擎错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    /// 浏览器启动或连接失败
    #[error("Browser launch failed: {0}")]
    Launch(String),
    /// 导航失败
    #[error("Navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },
    /// CDP 调用或脚本执行失败
    #[error("Protocol error: {0}")]
    Protocol(String),
}

/// 页面驱动特质
///
/// 浏览器自动化能力的最小抽象，校验流程只依赖这四个操作
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// 导航到指定URL，并等待页面加载完成
    async fn goto(&self, url: &str) -> Result<(), EngineError>;

    /// 匹配选择器的第一个元素当前是否可见
    async fn is_selector_visible(&self, selector: &str) -> Result<bool, EngineError>;

    /// 是否存在包含指定文本的可见元素
    ///
    /// 匹配忽略大小写并折叠空白
    async fn is_text_visible(&self, text: &str) -> Result<bool, EngineError>;

    /// 截取当前页面，返回 PNG 数据
    async fn screenshot(&self, full_page: bool) -> Result<Vec<u8>, EngineError>;
}

/// 浏览器会话特质
///
/// 持有浏览器进程（或远程连接）与唯一的页面
#[async_trait]
pub trait BrowserSession: Send {
    type Driver: PageDriver;

    /// 会话的页面驱动
    fn driver(&self) -> &Self::Driver;

    /// 释放会话
    async fn close(self) -> Result<(), EngineError>;
}

/// 会话启动器特质
#[async_trait]
pub trait SessionLauncher: Send + Sync {
    type Session: BrowserSession;

    /// 获取一个新的浏览器会话
    async fn launch(&self) -> Result<Self::Session, EngineError>;
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::fmt;

/// 校验阶段
///
/// 状态只会向前推进：
/// NotStarted → Verifying(i) → Done/Failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerificationStage {
    /// 尚未开始
    #[default]
    NotStarted,
    /// 正在校验第 i 个页面（从 0 开始）
    Verifying(usize),
    /// 全部页面校验通过
    Done,
    /// 在某个页面失败
    Failed(usize),
}

impl fmt::Display for VerificationStage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            VerificationStage::NotStarted => write!(f, "not_started"),
            VerificationStage::Verifying(i) => write!(f, "verifying[{}]", i),
            VerificationStage::Done => write!(f, "done"),
            VerificationStage::Failed(i) => write!(f, "failed[{}]", i),
        }
    }
}

/// 单个页面的校验结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOutcome {
    pub page: &'static str,
    pub url: String,
    pub screenshot_path: &'static str,
    pub bytes_written: usize,
}

/// 校验报告，按处理顺序记录每个页面
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerificationReport {
    pub pages: Vec<PageOutcome>,
}

impl VerificationReport {
    /// 已写入的截图路径
    pub fn screenshot_paths(&self) -> Vec<&'static str> {
        self.pages.iter().map(|p| p.screenshot_path).collect()
    }
}

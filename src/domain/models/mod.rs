// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// - 页面描述符（page_target）：三条固定的页面校验规则
/// - 校验结果（verification）：阶段与报告
pub mod page_target;
pub mod verification;

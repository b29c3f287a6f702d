// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置模块
///
/// 处理目标站点、浏览器和超时配置
pub mod config;

/// 领域模块
///
/// 页面描述符、校验服务和存储接口
pub mod domain;

/// 引擎模块
///
/// 浏览器驱动抽象及其 chromiumoxide 实现
pub mod engines;

/// 基础设施模块
///
/// 截图的本地文件存储
pub mod infrastructure;

/// 工具模块
///
/// 错误类型、轮询等待和日志
pub mod utils;

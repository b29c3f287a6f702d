// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// - 领域模型（models）：页面描述符和校验报告
/// - 仓库接口（repositories）：截图存储抽象
/// - 服务（services）：页面校验流程
///
/// 领域层不依赖具体的浏览器实现，只通过 `PageDriver` 特质访问浏览器。
pub mod models;
pub mod repositories;
pub mod services;

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 页面校验描述符
///
/// 描述一次页面校验所需的路由、就绪选择器、必须可见的文本以及截图输出路径。
/// 所有实例均为编译期常量，运行期间不会被修改。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageTarget {
    /// 页面名称，用于日志和错误信息
    pub name: &'static str,
    /// 相对于源地址的路由
    pub route: &'static str,
    /// 就绪标记的 CSS 选择器
    pub ready_selector: &'static str,
    /// 必须可见的文本，按顺序断言
    pub required_texts: &'static [&'static str],
    /// 截图输出路径（相对于工作目录）
    pub screenshot_path: &'static str,
}

/// 主页
pub const MAIN_PAGE: PageTarget = PageTarget {
    name: "main",
    route: "/",
    ready_selector: ".hero-stats",
    required_texts: &["0.02ms", "(excluding the z.ai request time)"],
    screenshot_path: "visual_tester/main_page.png",
};

/// 文档页
pub const DOCS_PAGE: PageTarget = PageTarget {
    name: "docs",
    route: "/docs",
    ready_selector: ".container",
    required_texts: &[],
    screenshot_path: "visual_tester/docs_page.png",
};

/// 仪表盘页
pub const DASHBOARD_PAGE: PageTarget = PageTarget {
    name: "dashboard",
    route: "/dashboard",
    ready_selector: ".stats-container",
    required_texts: &[],
    screenshot_path: "visual_tester/dashboard_page.png",
};

/// 按处理顺序排列的全部页面
pub const PAGE_TARGETS: [PageTarget; 3] = [MAIN_PAGE, DOCS_PAGE, DASHBOARD_PAGE];

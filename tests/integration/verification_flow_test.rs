// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 页面校验流程测试
///
/// 使用假驱动验证顺序、失败即停和截图写入行为
#[cfg(test)]
mod tests {
    use crate::integration::helpers::mock_driver::{DriverCall, FakePage, MockPageDriver, PNG_MAGIC};
    use std::path::Path;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::Instant;
    use url::Url;
    use visual_tester::domain::services::page_verifier::{PageVerifier, VerifyOptions};
    use visual_tester::infrastructure::storage::LocalStorage;
    use visual_tester::utils::errors::VerifyError;

    const ORIGIN: &str = "http://localhost:9090";

    fn verifier_in(dir: &Path, options: VerifyOptions) -> PageVerifier {
        PageVerifier::new(
            Url::parse(ORIGIN).unwrap(),
            options,
            Arc::new(LocalStorage::new(dir)),
        )
    }

    fn screenshot(dir: &Path, name: &str) -> std::path::PathBuf {
        dir.join("visual_tester").join(name)
    }

    #[tokio::test(start_paused = true)]
    async fn test_healthy_app_produces_three_screenshots() {
        let dir = tempfile::tempdir().unwrap();
        let verifier = verifier_in(dir.path(), VerifyOptions::default());
        let driver = MockPageDriver::healthy(ORIGIN);

        let report = verifier.verify_pages(&driver).await.unwrap();

        assert_eq!(
            report.screenshot_paths(),
            vec![
                "visual_tester/main_page.png",
                "visual_tester/docs_page.png",
                "visual_tester/dashboard_page.png",
            ]
        );
        for name in ["main_page.png", "docs_page.png", "dashboard_page.png"] {
            let data = std::fs::read(screenshot(dir.path(), name)).unwrap();
            assert!(data.starts_with(PNG_MAGIC), "{} is not a png", name);
            assert!(data.len() > PNG_MAGIC.len());
        }
        assert_eq!(
            std::fs::read_dir(dir.path().join("visual_tester")).unwrap().count(),
            3
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_steps_run_in_fixed_order() {
        let dir = tempfile::tempdir().unwrap();
        let verifier = verifier_in(dir.path(), VerifyOptions::default());
        let driver = MockPageDriver::healthy(ORIGIN);

        verifier.verify_pages(&driver).await.unwrap();

        assert_eq!(
            driver.calls(),
            vec![
                DriverCall::Goto("http://localhost:9090/".to_string()),
                DriverCall::SelectorProbe(".hero-stats".to_string()),
                DriverCall::TextProbe("0.02ms".to_string()),
                DriverCall::TextProbe("(excluding the z.ai request time)".to_string()),
                DriverCall::Screenshot(true),
                DriverCall::Goto("http://localhost:9090/docs".to_string()),
                DriverCall::SelectorProbe(".container".to_string()),
                DriverCall::Screenshot(true),
                DriverCall::Goto("http://localhost:9090/dashboard".to_string()),
                DriverCall::SelectorProbe(".stats-container".to_string()),
                DriverCall::Screenshot(true),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_hero_stats_stops_before_other_pages() {
        let dir = tempfile::tempdir().unwrap();
        let verifier = verifier_in(dir.path(), VerifyOptions::default());
        let driver = MockPageDriver::healthy(ORIGIN).with_page(
            "http://localhost:9090/",
            FakePage::default().text("0.02ms"),
        );

        let start = Instant::now();
        let err = verifier.verify_pages(&driver).await.unwrap_err();

        assert!(matches!(
            err,
            VerifyError::ReadinessTimeout {
                page: "main",
                selector: ".hero-stats",
                ..
            }
        ));
        assert_eq!(start.elapsed(), Duration::from_secs(30));
        assert!(!driver
            .calls()
            .iter()
            .any(|c| matches!(c, DriverCall::Goto(url) if url.ends_with("/docs"))));
        assert!(!driver.calls().contains(&DriverCall::Screenshot(true)));
        assert!(!dir.path().join("visual_tester").exists());
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_latency_text_fails_before_screenshot() {
        let dir = tempfile::tempdir().unwrap();
        let verifier = verifier_in(dir.path(), VerifyOptions::default());
        let driver = MockPageDriver::healthy(ORIGIN).with_page(
            "http://localhost:9090/",
            FakePage::with_selector(".hero-stats").text("(excluding the z.ai request time)"),
        );

        let start = Instant::now();
        let err = verifier.verify_pages(&driver).await.unwrap_err();

        match err {
            VerifyError::TextNotVisible { page, text, timeout } => {
                assert_eq!(page, "main");
                assert_eq!(text, "0.02ms");
                assert_eq!(timeout, Duration::from_secs(5));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(start.elapsed(), Duration::from_secs(5));
        assert!(!driver.calls().contains(&DriverCall::Screenshot(true)));
        assert!(!screenshot(dir.path(), "main_page.png").exists());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dashboard_failure_keeps_earlier_screenshots() {
        let dir = tempfile::tempdir().unwrap();
        let verifier = verifier_in(dir.path(), VerifyOptions::default());
        let driver = MockPageDriver::healthy(ORIGIN)
            .with_page("http://localhost:9090/dashboard", FakePage::default());

        let err = verifier.verify_pages(&driver).await.unwrap_err();

        assert_eq!(err.page(), "dashboard");
        assert!(matches!(err, VerifyError::ReadinessTimeout { selector: ".stats-container", .. }));
        assert!(screenshot(dir.path(), "main_page.png").exists());
        assert!(screenshot(dir.path(), "docs_page.png").exists());
        assert!(!screenshot(dir.path(), "dashboard_page.png").exists());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rerun_overwrites_previous_screenshots() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("visual_tester")).unwrap();
        std::fs::write(
            screenshot(dir.path(), "main_page.png"),
            vec![0u8; 4096],
        )
        .unwrap();

        let verifier = verifier_in(dir.path(), VerifyOptions::default());
        verifier
            .verify_pages(&MockPageDriver::healthy(ORIGIN))
            .await
            .unwrap();
        let first = std::fs::read(screenshot(dir.path(), "main_page.png")).unwrap();
        assert!(first.starts_with(PNG_MAGIC));
        assert_ne!(first.len(), 4096);

        verifier
            .verify_pages(&MockPageDriver::healthy(ORIGIN))
            .await
            .unwrap();
        let second = std::fs::read(screenshot(dir.path(), "main_page.png")).unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test(start_paused = true)]
    async fn test_late_readiness_marker_is_awaited() {
        let dir = tempfile::tempdir().unwrap();
        let verifier = verifier_in(dir.path(), VerifyOptions::default());
        let driver = MockPageDriver::healthy(ORIGIN).with_page(
            "http://localhost:9090/docs",
            FakePage::with_selector(".container").ready_after(10),
        );

        let start = Instant::now();
        verifier.verify_pages(&driver).await.unwrap();

        // ten failed probes, each followed by one poll interval
        assert_eq!(start.elapsed(), Duration::from_millis(1_000));
        let docs_probes = driver
            .calls()
            .iter()
            .filter(|c| **c == DriverCall::SelectorProbe(".container".to_string()))
            .count();
        assert_eq!(docs_probes, 11);
    }

    #[tokio::test(start_paused = true)]
    async fn test_configured_timeout_is_honoured() {
        let dir = tempfile::tempdir().unwrap();
        let options = VerifyOptions {
            ready_timeout: Duration::from_secs(2),
            ..VerifyOptions::default()
        };
        let verifier = verifier_in(dir.path(), options);
        let driver = MockPageDriver::new();

        let start = Instant::now();
        let err = verifier.verify_pages(&driver).await.unwrap_err();

        assert!(matches!(err, VerifyError::ReadinessTimeout { timeout, .. } if timeout == Duration::from_secs(2)));
        assert_eq!(start.elapsed(), Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_viewport_screenshot_option_is_passed_through() {
        let dir = tempfile::tempdir().unwrap();
        let options = VerifyOptions {
            full_page: false,
            ..VerifyOptions::default()
        };
        let verifier = verifier_in(dir.path(), options);
        let driver = MockPageDriver::healthy(ORIGIN);

        verifier.verify_pages(&driver).await.unwrap();

        assert_eq!(
            driver
                .calls()
                .iter()
                .filter(|c| **c == DriverCall::Screenshot(false))
                .count(),
            3
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_unreachable_origin_is_a_navigation_error() {
        let dir = tempfile::tempdir().unwrap();
        let verifier = verifier_in(dir.path(), VerifyOptions::default());
        let driver = MockPageDriver::healthy(ORIGIN).unreachable();

        let err = verifier.verify_pages(&driver).await.unwrap_err();

        assert!(matches!(err, VerifyError::Navigation { page: "main", .. }));
        assert_eq!(
            driver.calls(),
            vec![DriverCall::Goto("http://localhost:9090/".to_string())]
        );
        assert!(!dir.path().join("visual_tester").exists());
    }

    #[tokio::test(start_paused = true)]
    async fn test_probe_failure_is_fatal_without_retry() {
        let dir = tempfile::tempdir().unwrap();
        let verifier = verifier_in(dir.path(), VerifyOptions::default());
        let driver = MockPageDriver::healthy(ORIGIN).failing_probes();

        let start = Instant::now();
        let err = verifier.verify_pages(&driver).await.unwrap_err();

        assert!(matches!(err, VerifyError::Probe { page: "main", .. }));
        assert_eq!(start.elapsed(), Duration::ZERO);
        assert_eq!(driver.calls().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_screenshot_failure_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let verifier = verifier_in(dir.path(), VerifyOptions::default());
        let driver = MockPageDriver::healthy(ORIGIN).failing_screenshots();

        let err = verifier.verify_pages(&driver).await.unwrap_err();

        assert!(matches!(err, VerifyError::Screenshot { page: "main", .. }));
        assert!(!screenshot(dir.path(), "main_page.png").exists());
    }

    #[tokio::test(start_paused = true)]
    async fn test_unwritable_output_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("visual_tester"), b"file in the way").unwrap();
        let verifier = verifier_in(dir.path(), VerifyOptions::default());
        let driver = MockPageDriver::healthy(ORIGIN);

        let err = verifier.verify_pages(&driver).await.unwrap_err();

        assert!(matches!(
            err,
            VerifyError::Storage {
                page: "main",
                path: "visual_tester/main_page.png",
                ..
            }
        ));
        assert!(!driver
            .calls()
            .iter()
            .any(|c| matches!(c, DriverCall::Goto(url) if url.ends_with("/docs"))));
    }
}

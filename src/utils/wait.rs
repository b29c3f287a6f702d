// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::future::Future;
use std::time::Duration;
use tokio::time::{sleep, timeout_at, Instant};

/// 轮询直到探测返回 `true` 或超时
///
/// 探测至少执行一次。探测返回错误时立即返回该错误，不做重试。
/// 单次探测同样受截止时间约束，截止时仍未完成视为超时。
///
/// # 返回值
///
/// * `Ok(true)` - 截止时间之前探测成功
/// * `Ok(false)` - 超时
/// * `Err(E)` - 探测失败
pub async fn poll_until<F, Fut, E>(
    timeout: Duration,
    interval: Duration,
    mut probe: F,
) -> Result<bool, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool, E>>,
{
    let deadline = Instant::now() + timeout;
    loop {
        match timeout_at(deadline, probe()).await {
            Ok(result) => {
                if result? {
                    return Ok(true);
                }
            }
            Err(_) => return Ok(false),
        }

        let now = Instant::now();
        if now >= deadline {
            return Ok(false);
        }
        sleep(interval.min(deadline - now)).await;
    }
}

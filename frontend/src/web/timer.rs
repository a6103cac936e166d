//! 定时器与任务调度
//!
//! 轮询器需要的 [`Scheduler`]：`gloo-timers` 的 `Interval` 在 drop 时自动 `clearInterval`。

use std::time::Duration;

use futures::future::LocalBoxFuture;
use gloo_timers::callback::Interval;
use pixshare::Scheduler;

#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    type Handle = Interval;

    fn every(&self, period: Duration, tick: Box<dyn Fn()>) -> Interval {
        let millis = u32::try_from(period.as_millis()).unwrap_or(u32::MAX);
        Interval::new(millis, move || tick())
    }

    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        leptos::task::spawn_local(task);
    }
}

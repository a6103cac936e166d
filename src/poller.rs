//! 定时轮询器
//!
//! 聊天室这类视图挂载后按固定间隔拉取整份列表并整体替换。
//!
//! 状态只有两个：
//! - `Idle`：没有定时器
//! - `Polling`：定时器每隔 `period` 触发一次拉取
//!
//! 两条保证：
//! 1. 同一时刻最多只有一个拉取在进行，上一次未完成时到点的 tick 直接跳过，
//!    因此结果总是按发出顺序生效，旧结果不会覆盖新结果
//! 2. `stop` 之后才返回的结果一律丢弃，已卸载的视图不会再收到更新

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

use futures::FutureExt;
use futures::future::LocalBoxFuture;

use crate::error::{ApiError, ApiResponse};

/// 定时器与任务调度
///
/// 浏览器端由 `setInterval` 与 `spawn_local` 实现，测试中由手动时钟实现。
pub trait Scheduler: Clone + 'static {
    /// 定时器句柄，drop 即取消
    type Handle: 'static;

    /// 每隔 `period` 调用一次 `tick`（首次调用在一个周期之后）
    fn every(&self, period: Duration, tick: Box<dyn Fn()>) -> Self::Handle;

    /// 在当前线程上运行一个后台任务
    fn spawn(&self, task: LocalBoxFuture<'static, ()>);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollerState {
    Idle,
    Polling,
}

type FetchFn<T> = Box<dyn Fn() -> LocalBoxFuture<'static, ApiResponse<T>>>;

struct Shared<T> {
    fetch: FetchFn<T>,
    on_update: RefCell<Box<dyn Fn(T)>>,
    on_error: RefCell<Box<dyn Fn(ApiError, u32)>>,
    in_flight: Cell<bool>,
    /// 连续失败次数，成功或 stop 时清零
    failures: Cell<u32>,
    /// 每次 stop 加一，拉取结果只在代数未变时生效
    generation: Cell<u64>,
    label: String,
}

impl<T: 'static> Shared<T> {
    fn poll_once<S: Scheduler>(self: &Rc<Self>, scheduler: &S) -> bool {
        if self.in_flight.get() {
            log::warn!("{}: previous fetch still running, skipping tick", self.label);
            return false;
        }
        self.in_flight.set(true);

        let generation = self.generation.get();
        let pending = (self.fetch)();
        let shared = Rc::clone(self);

        scheduler.spawn(Box::pin(async move {
            let result = pending.await;
            shared.in_flight.set(false);

            if shared.generation.get() != generation {
                log::debug!("{}: discarding result that arrived after stop", shared.label);
                return;
            }

            match result {
                Ok(value) => {
                    shared.failures.set(0);
                    (*shared.on_update.borrow())(value)
                }
                Err(e) => {
                    let streak = shared.failures.get().saturating_add(1);
                    shared.failures.set(streak);
                    log::warn!("{}: fetch failed ({} in a row): {}", shared.label, streak, e);
                    (*shared.on_error.borrow())(e, streak)
                }
            }
        }));
        true
    }
}

/// 轮询器
///
/// drop 时自动停止。
pub struct Poller<T, S: Scheduler> {
    shared: Rc<Shared<T>>,
    scheduler: S,
    period: Duration,
    timer: Option<S::Handle>,
}

impl<T: 'static, S: Scheduler> Poller<T, S> {
    pub fn new<F, Fut>(scheduler: S, period: Duration, fetch: F) -> Self
    where
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = ApiResponse<T>> + 'static,
    {
        Self {
            shared: Rc::new(Shared {
                fetch: Box::new(move || fetch().boxed_local()),
                on_update: RefCell::new(Box::new(|_| {})),
                on_error: RefCell::new(Box::new(|_, _| {})),
                in_flight: Cell::new(false),
                failures: Cell::new(0),
                generation: Cell::new(0),
                label: "poller".to_string(),
            }),
            scheduler,
            period,
            timer: None,
        }
    }

    /// 日志中使用的名称
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        if let Some(shared) = Rc::get_mut(&mut self.shared) {
            shared.label = label.into();
        }
        self
    }

    /// 每次拉取成功时以完整结果调用
    pub fn on_update(self, f: impl Fn(T) + 'static) -> Self {
        *self.shared.on_update.borrow_mut() = Box::new(f);
        self
    }

    /// 拉取失败时调用，第二个参数是连续失败次数（从 1 开始）
    ///
    /// 调用方可据此只在一串失败的第一次提示用户。
    pub fn on_error(self, f: impl Fn(ApiError, u32) + 'static) -> Self {
        *self.shared.on_error.borrow_mut() = Box::new(f);
        self
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn state(&self) -> PollerState {
        if self.timer.is_some() {
            PollerState::Polling
        } else {
            PollerState::Idle
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.shared.in_flight.get()
    }

    /// Idle -> Polling；不会立即拉取，首次拉取在一个周期后
    pub fn start(&mut self) {
        if self.timer.is_some() {
            return;
        }

        let shared = Rc::clone(&self.shared);
        let scheduler = self.scheduler.clone();
        self.timer = Some(self.scheduler.every(
            self.period,
            Box::new(move || {
                shared.poll_once(&scheduler);
            }),
        ));
        log::debug!("{}: polling every {:?}", self.shared.label, self.period);
    }

    /// Polling -> Idle，取消定时器并作废所有未返回的拉取
    pub fn stop(&mut self) {
        let was_polling = self.timer.take().is_some();
        self.shared.generation.set(self.shared.generation.get() + 1);
        self.shared.failures.set(0);
        if was_polling {
            log::debug!("{}: stopped", self.shared.label);
        }
    }

    /// 立即拉取一次（用于首次加载或手动刷新）
    ///
    /// 与定时 tick 共用单飞约束，已有拉取在进行时返回 false。
    pub fn refresh_now(&self) -> bool {
        self.shared.poll_once(&self.scheduler)
    }
}

impl<T, S: Scheduler> Drop for Poller<T, S> {
    fn drop(&mut self) {
        self.timer = None;
        self.shared.generation.set(self.shared.generation.get() + 1);
    }
}

#[cfg(test)]
mod tests;

use super::*;
use futures::channel::oneshot;
use futures::executor::{LocalPool, LocalSpawner};
use futures::task::LocalSpawnExt;
use std::collections::VecDeque;
use std::rc::Weak;

const PERIOD: Duration = Duration::from_millis(3000);

// =========================================================
// Manual clock scheduler
// =========================================================

struct Timer {
    id: u64,
    period: Duration,
    due: Duration,
    tick: Rc<dyn Fn()>,
}

#[derive(Default)]
struct Clock {
    now: Duration,
    next_id: u64,
    timers: Vec<Timer>,
}

#[derive(Clone)]
struct ManualScheduler {
    clock: Rc<RefCell<Clock>>,
    spawner: LocalSpawner,
}

struct ManualHandle {
    id: u64,
    clock: Weak<RefCell<Clock>>,
}

impl Drop for ManualHandle {
    fn drop(&mut self) {
        if let Some(clock) = self.clock.upgrade() {
            clock.borrow_mut().timers.retain(|t| t.id != self.id);
        }
    }
}

impl Scheduler for ManualScheduler {
    type Handle = ManualHandle;

    fn every(&self, period: Duration, tick: Box<dyn Fn()>) -> ManualHandle {
        let mut clock = self.clock.borrow_mut();
        clock.next_id += 1;
        let id = clock.next_id;
        let due = clock.now + period;
        clock.timers.push(Timer {
            id,
            period,
            due,
            tick: Rc::from(tick),
        });
        ManualHandle {
            id,
            clock: Rc::downgrade(&self.clock),
        }
    }

    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        self.spawner.spawn_local(task).unwrap();
    }
}

impl ManualScheduler {
    fn active_timers(&self) -> usize {
        self.clock.borrow().timers.len()
    }

    /// 推进时钟，依次触发到期的定时器
    fn advance(&self, by: Duration) {
        let target = self.clock.borrow().now + by;
        loop {
            let tick = {
                let mut clock = self.clock.borrow_mut();
                let Some(timer) = clock
                    .timers
                    .iter_mut()
                    .filter(|t| t.due <= target)
                    .min_by_key(|t| t.due)
                else {
                    break;
                };
                let due = timer.due;
                timer.due += timer.period;
                let tick = Rc::clone(&timer.tick);
                clock.now = due;
                tick
            };
            tick();
        }
        self.clock.borrow_mut().now = target;
    }
}

// =========================================================
// Fake remote source
// =========================================================

/// 每次拉取都挂起，直到测试显式给出结果
#[derive(Default)]
struct FakeSource {
    calls: Cell<usize>,
    pending: RefCell<VecDeque<oneshot::Sender<ApiResponse<Vec<u32>>>>>,
}

impl FakeSource {
    fn fetch(&self) -> LocalBoxFuture<'static, ApiResponse<Vec<u32>>> {
        self.calls.set(self.calls.get() + 1);
        let (tx, rx) = oneshot::channel();
        self.pending.borrow_mut().push_back(tx);
        Box::pin(async move {
            rx.await
                .unwrap_or_else(|_| Err(ApiError::transport("fetch dropped")))
        })
    }

    fn resolve(&self, result: ApiResponse<Vec<u32>>) {
        let tx = self.pending.borrow_mut().pop_front().unwrap();
        let _ = tx.send(result);
    }

    fn calls(&self) -> usize {
        self.calls.get()
    }
}

struct Harness {
    pool: LocalPool,
    scheduler: ManualScheduler,
    source: Rc<FakeSource>,
    updates: Rc<RefCell<Vec<Vec<u32>>>>,
    /// (消息, 连续失败次数)
    errors: Rc<RefCell<Vec<(String, u32)>>>,
}

impl Harness {
    fn new() -> Self {
        let pool = LocalPool::new();
        let scheduler = ManualScheduler {
            clock: Rc::default(),
            spawner: pool.spawner(),
        };
        Self {
            pool,
            scheduler,
            source: Rc::default(),
            updates: Rc::default(),
            errors: Rc::default(),
        }
    }

    fn poller(&self) -> Poller<Vec<u32>, ManualScheduler> {
        let source = Rc::clone(&self.source);
        let updates = Rc::clone(&self.updates);
        let errors = Rc::clone(&self.errors);
        Poller::new(self.scheduler.clone(), PERIOD, move || source.fetch())
            .with_label("chat")
            .on_update(move |messages| updates.borrow_mut().push(messages))
            .on_error(move |e, streak| errors.borrow_mut().push((e.message().to_string(), streak)))
    }

    fn advance(&mut self, by: Duration) {
        self.scheduler.advance(by);
        self.pool.run_until_stalled();
    }

    fn resolve(&mut self, result: ApiResponse<Vec<u32>>) {
        self.source.resolve(result);
        self.pool.run_until_stalled();
    }
}

// =========================================================
// State machine
// =========================================================

#[test]
fn test_start_does_not_fetch_until_first_tick() {
    let mut h = Harness::new();
    let mut poller = h.poller();
    assert_eq!(poller.state(), PollerState::Idle);

    poller.start();
    assert_eq!(poller.state(), PollerState::Polling);
    h.advance(PERIOD - Duration::from_millis(1));
    assert_eq!(h.source.calls(), 0);

    h.advance(Duration::from_millis(1));
    assert_eq!(h.source.calls(), 1);
}

#[test]
fn test_one_interval_means_exactly_one_fetch() {
    let mut h = Harness::new();
    let mut poller = h.poller();
    poller.start();

    h.advance(PERIOD);
    assert_eq!(h.source.calls(), 1);
    h.resolve(Ok(vec![1, 2]));
    assert_eq!(*h.updates.borrow(), vec![vec![1, 2]]);
}

#[test]
fn test_stop_before_tick_prevents_fetch() {
    let mut h = Harness::new();
    let mut poller = h.poller();
    poller.start();
    h.advance(PERIOD / 2);

    poller.stop();
    assert_eq!(poller.state(), PollerState::Idle);
    assert_eq!(h.scheduler.active_timers(), 0);

    h.advance(PERIOD * 2);
    assert_eq!(h.source.calls(), 0);
}

#[test]
fn test_start_twice_keeps_one_timer() {
    let mut h = Harness::new();
    let mut poller = h.poller();
    poller.start();
    poller.start();
    assert_eq!(h.scheduler.active_timers(), 1);

    h.advance(PERIOD);
    assert_eq!(h.source.calls(), 1);
}

#[test]
fn test_drop_cancels_timer() {
    let mut h = Harness::new();
    let mut poller = h.poller();
    poller.start();
    drop(poller);

    assert_eq!(h.scheduler.active_timers(), 0);
    h.advance(PERIOD * 3);
    assert_eq!(h.source.calls(), 0);
}

// =========================================================
// Single-flight & ordering
// =========================================================

#[test]
fn test_tick_during_outstanding_fetch_is_skipped() {
    let mut h = Harness::new();
    let mut poller = h.poller();
    poller.start();

    h.advance(PERIOD);
    assert!(poller.is_in_flight());
    h.advance(PERIOD * 3);
    assert_eq!(h.source.calls(), 1);

    h.resolve(Ok(vec![1]));
    assert!(!poller.is_in_flight());

    h.advance(PERIOD);
    assert_eq!(h.source.calls(), 2);
}

#[test]
fn test_results_apply_in_issue_order() {
    let mut h = Harness::new();
    let mut poller = h.poller();
    poller.start();

    for round in 1..=3u32 {
        h.advance(PERIOD);
        h.resolve(Ok((1..=round).collect()));
    }

    assert_eq!(
        *h.updates.borrow(),
        vec![vec![1], vec![1, 2], vec![1, 2, 3]]
    );
    assert_eq!(h.source.calls(), 3);
}

#[test]
fn test_refresh_now_shares_single_flight() {
    let mut h = Harness::new();
    let mut poller = h.poller();

    assert!(poller.refresh_now());
    assert!(!poller.refresh_now());
    poller.start();
    h.advance(PERIOD);
    assert_eq!(h.source.calls(), 1);

    h.resolve(Ok(vec![7]));
    assert_eq!(*h.updates.borrow(), vec![vec![7]]);
    assert!(poller.refresh_now());
    assert_eq!(h.source.calls(), 2);
}

// =========================================================
// Stop discards late results
// =========================================================

#[test]
fn test_result_after_stop_is_not_delivered() {
    let mut h = Harness::new();
    let mut poller = h.poller();
    poller.start();
    h.advance(PERIOD);

    poller.stop();
    h.resolve(Ok(vec![42]));

    assert!(h.updates.borrow().is_empty());
    assert!(!poller.is_in_flight());
}

#[test]
fn test_result_after_drop_is_not_delivered() {
    let mut h = Harness::new();
    let poller = h.poller();
    poller.refresh_now();
    drop(poller);

    h.resolve(Ok(vec![1]));
    assert!(h.updates.borrow().is_empty());
}

#[test]
fn test_restart_after_stop_delivers_new_results_only() {
    let mut h = Harness::new();
    let mut poller = h.poller();
    poller.start();
    h.advance(PERIOD);
    poller.stop();

    poller.start();
    h.advance(PERIOD);
    // 旧的拉取仍在进行，新周期的 tick 被跳过
    assert_eq!(h.source.calls(), 1);

    h.resolve(Ok(vec![0]));
    h.advance(PERIOD);
    assert_eq!(h.source.calls(), 2);
    h.resolve(Ok(vec![1]));

    assert_eq!(*h.updates.borrow(), vec![vec![1]]);
}

// =========================================================
// Errors
// =========================================================

#[test]
fn test_errors_are_reported_and_polling_continues() {
    let mut h = Harness::new();
    let mut poller = h.poller();
    poller.start();

    h.advance(PERIOD);
    h.resolve(Err(ApiError::transport("offline")));
    h.advance(PERIOD);
    h.resolve(Ok(vec![3]));

    assert_eq!(*h.errors.borrow(), vec![("offline".to_string(), 1)]);
    assert_eq!(*h.updates.borrow(), vec![vec![3]]);
    assert_eq!(poller.state(), PollerState::Polling);
}

#[test]
fn test_failure_streak_counts_and_resets() {
    let mut h = Harness::new();
    let mut poller = h.poller();
    poller.start();

    for _ in 0..3 {
        h.advance(PERIOD);
        h.resolve(Err(ApiError::transport("offline")));
    }
    h.advance(PERIOD);
    h.resolve(Ok(vec![1]));
    h.advance(PERIOD);
    h.resolve(Err(ApiError::transport("offline again")));

    let streaks: Vec<u32> = h.errors.borrow().iter().map(|(_, n)| *n).collect();
    assert_eq!(streaks, vec![1, 2, 3, 1]);
    assert_eq!(*h.updates.borrow(), vec![vec![1]]);
}

#[test]
fn test_restart_starts_a_new_failure_streak() {
    let mut h = Harness::new();
    let mut poller = h.poller();
    poller.start();

    h.advance(PERIOD);
    h.resolve(Err(ApiError::transport("offline")));
    poller.stop();
    poller.start();
    h.advance(PERIOD);
    h.resolve(Err(ApiError::transport("offline")));

    let streaks: Vec<u32> = h.errors.borrow().iter().map(|(_, n)| *n).collect();
    assert_eq!(streaks, vec![1, 1]);
}

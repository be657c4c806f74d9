//! 延迟步骤调度
//!
//! 控制器的所有等待都表示为一个到期后送回 `Game::on_timer` 的 `Timer`。
//! `TimerQueue` 使用虚拟时间：终端循环按真实流逝时间推进它，测试则直接推进。

use std::time::Duration;

/// 延迟步骤
///
/// 带 `epoch` 的步骤属于某次遭遇，遭遇被替换或中止后到期也不会生效。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timer {
    /// 开门后的停顿结束，生成房间内容
    RevealRoom,
    /// 展示下一个招式（最后一次调用开放输入）
    RevealTick { epoch: u64 },
    /// 失败或 Boss 被击退后重新开始展示
    RestartCombat { epoch: u64 },
    /// 出现下楼的楼梯
    RevealStairs,
    /// 房间结束，出现新的门
    AutoProceed,
    /// 下楼完成
    Descend,
    /// 切换到结算画面
    ShowGameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

pub trait Scheduler {
    /// 在 `delay` 之后触发 `timer`
    fn schedule(&mut self, delay: Duration, timer: Timer) -> TimerHandle;

    /// 取消尚未触发的步骤，返回是否确实取消了
    fn cancel(&mut self, handle: TimerHandle) -> bool;

    /// 当前虚拟时间
    fn now(&self) -> Duration;

    /// 取出一个在 `until` 之前到期的步骤，并把时间推进到它的到期时刻
    fn pop_due(&mut self, until: Duration) -> Option<Timer>;

    /// 把时间推进到 `until`（不会倒退）
    fn advance_clock(&mut self, until: Duration);

    fn next_deadline(&self) -> Option<Duration>;

    fn pending(&self) -> usize;

    fn clear(&mut self);
}

#[derive(Debug, Clone)]
struct Entry {
    deadline: Duration,
    handle: TimerHandle,
    timer: Timer,
}

/// 虚拟时间的计时队列，同一时刻到期的按安排顺序触发
#[derive(Debug, Default)]
pub struct TimerQueue {
    now: Duration,
    next_id: u64,
    entries: Vec<Entry>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// 尚未触发的步骤，按到期顺序
    pub fn scheduled(&self) -> Vec<Timer> {
        let mut entries: Vec<&Entry> = self.entries.iter().collect();
        entries.sort_by_key(|e| (e.deadline, e.handle));
        entries.into_iter().map(|e| e.timer).collect()
    }
}

impl Scheduler for TimerQueue {
    fn schedule(&mut self, delay: Duration, timer: Timer) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            deadline: self.now + delay,
            handle,
            timer,
        });
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.handle != handle);
        self.entries.len() != before
    }

    fn now(&self) -> Duration {
        self.now
    }

    fn pop_due(&mut self, until: Duration) -> Option<Timer> {
        let (idx, _) = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.deadline <= until)
            .min_by_key(|(_, e)| (e.deadline, e.handle))?;
        let entry = self.entries.remove(idx);
        self.now = self.now.max(entry.deadline);
        Some(entry.timer)
    }

    fn advance_clock(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }

    fn next_deadline(&self) -> Option<Duration> {
        self.entries.iter().map(|e| e.deadline).min()
    }

    fn pending(&self) -> usize {
        self.entries.len()
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}

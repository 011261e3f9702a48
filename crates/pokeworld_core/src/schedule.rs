//! Engine clock and delayed battle transitions.
//!
//! Tasks carry the [`BattleId`] they were scheduled for. The session checks
//! that id against its active battle when a task comes due, so a task that
//! outlives its battle does nothing.

use std::time::Duration;

use crate::battle::BattleId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    CounterAttack,
    Teardown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledTask {
    pub battle: BattleId,
    pub kind: TaskKind,
    pub due_at_ms: u64,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    now_ms: u64,
    pending: Vec<ScheduledTask>,
}

impl Scheduler {
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn schedule(&mut self, battle: BattleId, kind: TaskKind, delay: Duration) -> ScheduledTask {
        let task = ScheduledTask {
            battle,
            kind,
            due_at_ms: self.now_ms.saturating_add(duration_ms(delay)),
        };
        self.pending.push(task);
        task
    }

    pub fn pending(&self) -> &[ScheduledTask] {
        &self.pending
    }

    pub fn next_due_ms(&self) -> Option<u64> {
        self.pending.iter().map(|task| task.due_at_ms).min()
    }

    /// Removes the earliest task due at or before `until_ms` and moves the
    /// clock to its due time. Ties keep scheduling order.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<ScheduledTask> {
        let (idx, _) = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, task)| task.due_at_ms <= until_ms)
            .min_by_key(|(idx, task)| (task.due_at_ms, *idx))?;
        let task = self.pending.remove(idx);
        self.now_ms = self.now_ms.max(task.due_at_ms);
        Some(task)
    }

    pub fn advance_to(&mut self, until_ms: u64) {
        self.now_ms = self.now_ms.max(until_ms);
    }
}

pub fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

//! Runs scheduler triggers against a day book.

use anchor_lang::prelude::*;

use crate::state::{
    DayBook, DayInit, MasterAuctionConfig, ProgressReport, SchedulerState, TriggerKind,
};
use crate::time::{day_of, hour_of};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub enum TriggerOutcome {
    Initialized(DayInit),
    Progressed(ProgressReport),
    Reset { date: Option<i64>, removed: u32 },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TickEntry {
    pub kind: TriggerKind,
    pub hour: u8,
    /// `None` when the handler failed; the failure was logged and counted.
    pub outcome: Option<TriggerOutcome>,
    pub failures: u32,
}

fn run_trigger(
    kind: TriggerKind,
    book: &mut DayBook,
    config: &MasterAuctionConfig,
    now: i64,
) -> Result<TriggerOutcome> {
    let today = day_of(now);
    match kind {
        TriggerKind::Reset => {
            // the day boundary clears whatever day the book still holds
            let date = book.date.filter(|d| *d <= today);
            let removed = date.map_or(0, |d| book.reset_day(d)) as u32;
            Ok(TriggerOutcome::Reset { date, removed })
        }
        TriggerKind::Init => book
            .initialize_day(config, today)
            .map(TriggerOutcome::Initialized),
        TriggerKind::Progress => Ok(TriggerOutcome::Progressed(
            book.progress(config, hour_of(now)),
        )),
    }
}

/// Runs one trigger handler on a copy of the book and commits it only on success.
pub fn fire(
    kind: TriggerKind,
    book: &mut DayBook,
    config: &MasterAuctionConfig,
    now: i64,
) -> Result<TriggerOutcome> {
    let mut draft = book.clone();
    let outcome = run_trigger(kind, &mut draft, config, now)?;
    *book = draft;
    Ok(outcome)
}

impl SchedulerState {
    /// Fires every trigger due at `now`. A failing handler is logged and
    /// counted but still marked fired, so it will not run again until its
    /// next scheduled day; the remaining triggers still run.
    pub fn tick(
        &mut self,
        book: &mut DayBook,
        config: &MasterAuctionConfig,
        now: i64,
    ) -> Vec<TickEntry> {
        let today = day_of(now);
        let hour = hour_of(now);
        let mut entries = Vec::new();

        for index in self.due_triggers(today, hour) {
            let trigger = &mut self.active_triggers[index];
            let outcome = match fire(trigger.kind, book, config, now) {
                Ok(outcome) => Some(outcome),
                Err(e) => {
                    trigger.failures = trigger.failures.saturating_add(1);
                    msg!(
                        "{:?} trigger failed at {:02}:00 ({} failures): {}",
                        trigger.kind,
                        hour,
                        trigger.failures,
                        e
                    );
                    None
                }
            };
            trigger.last_fired_day = Some(today);
            entries.push(TickEntry {
                kind: trigger.kind,
                hour,
                outcome,
                failures: trigger.failures,
            });
        }
        entries
    }
}

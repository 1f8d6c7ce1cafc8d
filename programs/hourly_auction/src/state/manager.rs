//! Day lifecycle of a [`DayBook`]: initialisation, hourly progression and reset.

use anchor_lang::prelude::*;

use crate::errors::AuctionError;
use crate::state::{DayBook, InstanceStatus, InstanceSummary, MasterAuctionConfig};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct DayInit {
    pub date: i64,
    pub instances: Vec<InstanceSummary>,
    /// Set when the date already had instances; nothing was created.
    pub already_initialized: bool,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProgressStep {
    CompleteElapsed,
    PromoteCurrent,
    ReplenishWindow,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ProgressReport {
    pub hour: u8,
    pub completed: Vec<u64>,
    pub promoted: Vec<u64>,
    pub cancelled: Vec<u64>,
    pub created: Vec<u64>,
    pub failed_steps: Vec<ProgressStep>,
}

impl ProgressReport {
    pub fn transition_count(&self) -> usize {
        self.completed.len() + self.promoted.len() + self.cancelled.len() + self.created.len()
    }

    pub fn is_noop(&self) -> bool {
        self.transition_count() == 0 && self.failed_steps.is_empty()
    }
}

impl DayBook {
    pub fn initialize_day(&mut self, config: &MasterAuctionConfig, date: i64) -> Result<DayInit> {
        if self.date == Some(date) && !self.instances.is_empty() {
            msg!("day {} already initialized", date);
            return Ok(DayInit {
                date,
                instances: self.summaries(),
                already_initialized: true,
            });
        }
        if let Some(stale) = self.date.filter(|d| *d != date) {
            msg!(
                "rolling day book over from {} to {}, dropping {} instances",
                stale,
                date,
                self.instances.len()
            );
            self.instances.clear();
        }

        self.date = Some(date);
        let count = usize::from(config.window_size).min(config.slots.len());
        for (index, slot) in config.slots.iter().take(count).enumerate() {
            let status = if index == 0 {
                InstanceStatus::Live
            } else {
                InstanceStatus::Upcoming
            };
            self.push_instance(config, slot, date, status)?;
        }

        Ok(DayInit {
            date,
            instances: self.summaries(),
            already_initialized: false,
        })
    }

    /// Complete, then promote, then replenish. A failing step is recorded in
    /// the report and does not stop the later steps.
    pub fn progress(&mut self, config: &MasterAuctionConfig, current_hour: u8) -> ProgressReport {
        let mut report = ProgressReport {
            hour: current_hour,
            ..ProgressReport::default()
        };
        if self.date.is_none() {
            msg!("progress at {:02}:00 skipped, day not initialized", current_hour);
            return report;
        }

        if let Err(e) = self.complete_elapsed(current_hour, &mut report) {
            msg!("progress step {:?} failed: {}", ProgressStep::CompleteElapsed, e);
            report.failed_steps.push(ProgressStep::CompleteElapsed);
        }
        if let Err(e) = self.promote_current(current_hour, &mut report) {
            msg!("progress step {:?} failed: {}", ProgressStep::PromoteCurrent, e);
            report.failed_steps.push(ProgressStep::PromoteCurrent);
        }
        if let Err(e) = self.replenish_window(config, current_hour, &mut report) {
            msg!("progress step {:?} failed: {}", ProgressStep::ReplenishWindow, e);
            report.failed_steps.push(ProgressStep::ReplenishWindow);
        }
        report
    }

    /// Clears the book if it holds `date`. Returns the number of instances removed.
    pub fn reset_day(&mut self, date: i64) -> usize {
        if self.date != Some(date) {
            return 0;
        }
        let removed = self.instances.len();
        self.instances.clear();
        self.date = None;
        msg!("day {} reset, {} instances removed", date, removed);
        removed
    }

    fn complete_elapsed(&mut self, current_hour: u8, report: &mut ProgressReport) -> Result<()> {
        // Any Live instance from an earlier hour, not only `current_hour - 1`,
        // so a missed tick cannot leave two instances Live.
        for instance in self
            .instances
            .iter_mut()
            .filter(|i| i.status == InstanceStatus::Live && i.hour < current_hour)
        {
            instance.transition(InstanceStatus::Completed)?;
            report.completed.push(instance.instance_id);
        }
        Ok(())
    }

    fn promote_current(&mut self, current_hour: u8, report: &mut ProgressReport) -> Result<()> {
        for instance in self
            .instances
            .iter_mut()
            .filter(|i| i.status == InstanceStatus::Upcoming && i.hour < current_hour)
        {
            msg!("auction {} missed its slot", instance.instance_id);
            instance.transition(InstanceStatus::Cancelled)?;
            report.cancelled.push(instance.instance_id);
        }

        let has_live = self.live().is_some();
        let Some(instance) = self
            .instances
            .iter_mut()
            .find(|i| i.status == InstanceStatus::Upcoming && i.hour == current_hour)
        else {
            return Ok(());
        };
        require!(!has_live, AuctionError::InvalidTransition);
        instance.transition(InstanceStatus::Live)?;
        report.promoted.push(instance.instance_id);
        Ok(())
    }

    fn replenish_window(
        &mut self,
        config: &MasterAuctionConfig,
        current_hour: u8,
        report: &mut ProgressReport,
    ) -> Result<()> {
        if current_hour < config.day_start_hour {
            return Ok(());
        }
        let date = self.date.ok_or(AuctionError::NotFound)?;
        let target = usize::from(config.window_size.saturating_sub(1));

        loop {
            let upcoming = self.with_status(InstanceStatus::Upcoming).count();
            if upcoming >= target {
                return Ok(());
            }
            let next_number = u16::try_from(self.instances.len() + 1)
                .map_err(|_| error!(AuctionError::MathError))?;
            let Some(slot) = config.slot(next_number) else {
                return Ok(());
            };
            if slot.time_slot_hour < current_hour {
                let id = self.push_instance(config, slot, date, InstanceStatus::Upcoming)?;
                self.cancel_instance(id)?;
                report.cancelled.push(id);
                continue;
            }
            // caught up to a slot that can still run this hour
            if slot.time_slot_hour == current_hour && self.live().is_none() {
                let id = self.push_instance(config, slot, date, InstanceStatus::Live)?;
                report.created.push(id);
                report.promoted.push(id);
                continue;
            }
            let id = self.push_instance(config, slot, date, InstanceStatus::Upcoming)?;
            report.created.push(id);
        }
    }
}

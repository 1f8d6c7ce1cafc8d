use anchor_lang::prelude::*;

use crate::constants::MAX_TRIGGERS;
use crate::state::MasterAuctionConfig;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerKind {
    Reset,
    Init,
    Progress,
}

/// A daily wall-clock trigger. Fires at most once per day, during `hour`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Trigger {
    pub kind: TriggerKind,
    pub hour: u8,
    pub last_fired_day: Option<i64>,
    pub failures: u32,
}

impl Trigger {
    pub const LEN: usize = 1 + 1 + (1 + 8) + 4;

    pub fn new(kind: TriggerKind, hour: u8) -> Self {
        Self {
            kind,
            hour,
            last_fired_day: None,
            failures: 0,
        }
    }

    pub fn is_due(&self, day: i64, hour: u8) -> bool {
        self.hour == hour && self.last_fired_day != Some(day)
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct SchedulerStatus {
    pub initialized: bool,
    pub running: bool,
    pub active_triggers: Vec<Trigger>,
}

/// Trigger set for a configuration: Reset at the day boundary, Init at day
/// start, then one Progress per hour until the last slot has completed.
pub fn install_triggers(config: &MasterAuctionConfig) -> Vec<Trigger> {
    let mut triggers = vec![
        Trigger::new(TriggerKind::Reset, 0),
        Trigger::new(TriggerKind::Init, config.day_start_hour),
    ];
    triggers.extend(
        (config.day_start_hour + 1..=config.last_operating_hour())
            .map(|hour| Trigger::new(TriggerKind::Progress, hour)),
    );
    triggers
}

/// Clock driver state for one master configuration.
#[account]
pub struct SchedulerState {
    pub master_config: Pubkey,
    pub authority: Pubkey,         // the single scheduling authority
    pub initialized: bool,
    pub running: bool,
    pub active_triggers: Vec<Trigger>,
    pub bump: u8,
}

impl SchedulerState {
    pub const LEN: usize = 32      // master_config
        + 32                       // authority
        + 1                        // initialized
        + 1                        // running
        + 4 + Trigger::LEN * MAX_TRIGGERS // active_triggers
        + 1;                       // bump

    /// Installs the trigger set from the persisted configuration. Returns
    /// false when already running, leaving the existing set untouched.
    pub fn start_all(&mut self, config: &MasterAuctionConfig) -> bool {
        if self.running {
            return false;
        }
        self.active_triggers = install_triggers(config);
        self.running = true;
        true
    }

    /// Returns the number of triggers cleared.
    pub fn stop_all(&mut self) -> usize {
        let cleared = self.active_triggers.len();
        self.active_triggers.clear();
        self.running = false;
        cleared
    }

    pub fn status(&self) -> SchedulerStatus {
        SchedulerStatus {
            initialized: self.initialized,
            running: self.running,
            active_triggers: self.active_triggers.clone(),
        }
    }

    /// Indexes of triggers due at (`day`, `hour`), Reset before Init before Progress.
    pub fn due_triggers(&self, day: i64, hour: u8) -> Vec<usize> {
        if !self.running {
            return vec![];
        }
        let mut due: Vec<usize> = self
            .active_triggers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.is_due(day, hour))
            .map(|(i, _)| i)
            .collect();
        due.sort_by_key(|i| self.active_triggers[*i].kind as u8);
        due
    }
}

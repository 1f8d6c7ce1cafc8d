use anchor_lang::prelude::*;

use crate::state::{
    DayInit, InstanceSummary, LeaderboardEntry, ProgressReport, Trigger, TriggerKind,
    TriggerOutcome,
};

#[event]
pub struct MasterConfigUpdated {
    pub master_config: Pubkey,
    pub authority: Pubkey,
    pub slot_count: u8,
    pub window_size: u8,
}

#[event]
pub struct SchedulerInitialized {
    pub scheduler: Pubkey,
    pub master_config: Pubkey,
    pub authority: Pubkey,
}

#[event]
pub struct SchedulerStarted {
    pub master_config: Pubkey,
    pub triggers: Vec<Trigger>,
}

#[event]
pub struct SchedulerStopped {
    pub master_config: Pubkey,
    pub cleared: u8,
}

#[event]
pub struct DayInitialized {
    pub master_config: Pubkey,
    pub init: DayInit,
}

#[event]
pub struct DayProgressed {
    pub master_config: Pubkey,
    pub report: ProgressReport,
}

#[event]
pub struct DayReset {
    pub master_config: Pubkey,
    pub date: Option<i64>,
    pub removed: u32,
}

#[event]
pub struct TriggerFailed {
    pub master_config: Pubkey,
    pub kind: TriggerKind,
    pub hour: u8,
    pub failures: u32,
}

#[event]
pub struct InstanceCancelled {
    pub master_config: Pubkey,
    pub instance: InstanceSummary,
}

#[event]
pub struct EntryPaid {
    pub day_book: Pubkey,
    pub instance_id: u64,
    pub participant: Pubkey,
    pub box_id: u8,
    pub entry_fee: u64,
    pub entry_complete: bool,
}

#[event]
pub struct BidPlaced {
    pub day_book: Pubkey,
    pub instance_id: u64,
    pub round_number: u8,
    pub bidder: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
    pub leading_bid: u64,
    pub leading_bidder: Option<Pubkey>,
}

#[event]
pub struct LeaderboardFinalized {
    pub day_book: Pubkey,
    pub instance_id: u64,
    pub round_number: u8,
    pub entries: Vec<LeaderboardEntry>,
    pub synthetic: bool,
}

pub fn emit_trigger_outcome(master_config: Pubkey, outcome: &TriggerOutcome) {
    match outcome {
        TriggerOutcome::Initialized(init) => emit!(DayInitialized {
            master_config,
            init: init.clone(),
        }),
        TriggerOutcome::Progressed(report) => emit!(DayProgressed {
            master_config,
            report: report.clone(),
        }),
        TriggerOutcome::Reset { date, removed } => emit!(DayReset {
            master_config,
            date: *date,
            removed: *removed,
        }),
    }
}

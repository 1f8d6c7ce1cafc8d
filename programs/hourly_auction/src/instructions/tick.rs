use anchor_lang::prelude::*;

use crate::constants::{DAY_BOOK_SEED, SCHEDULER_SEED};
use crate::errors::AuctionError;
use crate::events::{emit_trigger_outcome, TriggerFailed};
use crate::state::{DayBook, MasterAuctionConfig, SchedulerState};

/// Permissionless crank. Anyone may send it; only triggers due at the
/// current cluster time do anything.
#[derive(Accounts)]
pub struct Tick<'info> {
    pub master_config: Account<'info, MasterAuctionConfig>,
    #[account(
        mut,
        seeds = [SCHEDULER_SEED, master_config.key().as_ref()],
        bump = scheduler.bump,
        has_one = master_config
    )]
    pub scheduler: Account<'info, SchedulerState>,
    #[account(
        mut,
        seeds = [DAY_BOOK_SEED, master_config.key().as_ref()],
        bump = day_book.bump,
        has_one = master_config
    )]
    pub day_book: Account<'info, DayBook>,
}

pub fn handle_tick(ctx: Context<Tick>) -> Result<()> {
    require!(
        ctx.accounts.scheduler.initialized,
        AuctionError::SchedulerNotInitialized
    );
    if !ctx.accounts.scheduler.running {
        msg!("scheduler stopped");
        return Ok(());
    }

    let now = Clock::get()?.unix_timestamp;
    let master_config = ctx.accounts.master_config.key();
    let entries = ctx.accounts.scheduler.tick(
        &mut ctx.accounts.day_book,
        &ctx.accounts.master_config,
        now,
    );

    if entries.is_empty() {
        msg!("no triggers due");
    }
    for entry in entries {
        match &entry.outcome {
            Some(outcome) => emit_trigger_outcome(master_config, outcome),
            None => emit!(TriggerFailed {
                master_config,
                kind: entry.kind,
                hour: entry.hour,
                failures: entry.failures,
            }),
        }
    }
    Ok(())
}

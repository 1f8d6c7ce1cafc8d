use anchor_lang::prelude::*;

use crate::constants::{DAY_BOOK_SEED, SCHEDULER_SEED};
use crate::errors::AuctionError;
use crate::events::emit_trigger_outcome;
use crate::state::{
    fire, DayBook, MasterAuctionConfig, SchedulerState, TriggerKind, TriggerOutcome,
};

/// Operator invocation of a trigger handler outside its scheduled hour.
#[derive(Accounts)]
pub struct ManualTrigger<'info> {
    pub master_config: Account<'info, MasterAuctionConfig>,
    #[account(
        seeds = [SCHEDULER_SEED, master_config.key().as_ref()],
        bump = scheduler.bump,
        has_one = master_config,
        has_one = authority @ AuctionError::InvalidAuthority
    )]
    pub scheduler: Account<'info, SchedulerState>,
    #[account(
        mut,
        seeds = [DAY_BOOK_SEED, master_config.key().as_ref()],
        bump = day_book.bump,
        has_one = master_config
    )]
    pub day_book: Account<'info, DayBook>,
    pub authority: Signer<'info>,
}

/// Runs the handler for `kind` at the current cluster time. Unlike a timed
/// trigger, a failure here fails the transaction.
pub fn handle_manual_trigger(
    ctx: Context<ManualTrigger>,
    kind: TriggerKind,
) -> Result<TriggerOutcome> {
    require!(
        ctx.accounts.scheduler.initialized,
        AuctionError::SchedulerNotInitialized
    );

    let now = Clock::get()?.unix_timestamp;
    let outcome = fire(
        kind,
        &mut ctx.accounts.day_book,
        &ctx.accounts.master_config,
        now,
    )?;

    msg!("manual {:?} trigger", kind);
    emit_trigger_outcome(ctx.accounts.master_config.key(), &outcome);
    Ok(outcome)
}

use anchor_lang::prelude::*;

use crate::constants::{DAY_BOOK_SEED, SCHEDULER_SEED};
use crate::errors::AuctionError;
use crate::events::SchedulerInitialized;
use crate::instructions::load_optional;
use crate::state::{DayBook, MasterAuctionConfig, SchedulerState, SchedulerStatus};

#[derive(Accounts)]
pub struct InitializeScheduler<'info> {
    /// CHECK: deserialized in the handler so an unknown configuration reports `NotFound`
    pub master_config: UncheckedAccount<'info>,
    #[account(
        init_if_needed,
        payer = authority,
        space = 8 + SchedulerState::LEN,
        seeds = [SCHEDULER_SEED, master_config.key().as_ref()],
        bump
    )]
    pub scheduler: Account<'info, SchedulerState>,
    #[account(
        init_if_needed,
        payer = authority,
        space = 8 + DayBook::LEN,
        seeds = [DAY_BOOK_SEED, master_config.key().as_ref()],
        bump
    )]
    pub day_book: Account<'info, DayBook>,
    #[account(mut)]
    pub authority: Signer<'info>,
    pub system_program: Program<'info, System>,
}

/// Binds the scheduler and day book to a master configuration. Calling it
/// again is a no-op that reports the current status.
pub fn handle_initialize_scheduler(ctx: Context<InitializeScheduler>) -> Result<SchedulerStatus> {
    let config: MasterAuctionConfig = load_optional(&ctx.accounts.master_config)
        .ok()
        .flatten()
        .ok_or(AuctionError::NotFound)?;
    require_keys_eq!(
        config.authority,
        ctx.accounts.authority.key(),
        AuctionError::InvalidAuthority
    );

    let scheduler = &mut ctx.accounts.scheduler;
    if scheduler.initialized {
        msg!("scheduler already initialized");
        return Ok(scheduler.status());
    }

    let master_config = ctx.accounts.master_config.key();
    scheduler.master_config = master_config;
    scheduler.authority = config.authority;
    scheduler.initialized = true;
    scheduler.running = false;
    scheduler.active_triggers = vec![];
    scheduler.bump = ctx.bumps.scheduler;

    let day_book = &mut ctx.accounts.day_book;
    day_book.master_config = master_config;
    day_book.date = None;
    day_book.next_instance_id = 1;
    day_book.instances = vec![];
    day_book.bump = ctx.bumps.day_book;

    msg!("scheduler initialized for {}", master_config);
    emit!(SchedulerInitialized {
        scheduler: scheduler.key(),
        master_config,
        authority: config.authority,
    });
    Ok(scheduler.status())
}

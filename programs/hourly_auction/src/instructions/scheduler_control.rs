use anchor_lang::prelude::*;

use crate::constants::SCHEDULER_SEED;
use crate::errors::AuctionError;
use crate::events::{SchedulerStarted, SchedulerStopped};
use crate::state::{MasterAuctionConfig, SchedulerState, SchedulerStatus};

#[derive(Accounts)]
pub struct SchedulerControl<'info> {
    pub master_config: Account<'info, MasterAuctionConfig>,
    #[account(
        mut,
        seeds = [SCHEDULER_SEED, master_config.key().as_ref()],
        bump = scheduler.bump,
        has_one = master_config,
        has_one = authority @ AuctionError::InvalidAuthority
    )]
    pub scheduler: Account<'info, SchedulerState>,
    pub authority: Signer<'info>,
}

#[derive(Accounts)]
pub struct ReadScheduler<'info> {
    pub master_config: Account<'info, MasterAuctionConfig>,
    #[account(
        seeds = [SCHEDULER_SEED, master_config.key().as_ref()],
        bump = scheduler.bump,
        has_one = master_config
    )]
    pub scheduler: Account<'info, SchedulerState>,
}

pub fn handle_start_all(ctx: Context<SchedulerControl>) -> Result<SchedulerStatus> {
    let scheduler = &mut ctx.accounts.scheduler;
    require!(scheduler.initialized, AuctionError::SchedulerNotInitialized);

    if scheduler.start_all(&ctx.accounts.master_config) {
        msg!("installed {} triggers", scheduler.active_triggers.len());
        emit!(SchedulerStarted {
            master_config: scheduler.master_config,
            triggers: scheduler.active_triggers.clone(),
        });
    } else {
        msg!("scheduler already running");
    }
    Ok(scheduler.status())
}

pub fn handle_stop_all(ctx: Context<SchedulerControl>) -> Result<SchedulerStatus> {
    let scheduler = &mut ctx.accounts.scheduler;
    let cleared = scheduler.stop_all();

    msg!("cleared {} triggers", cleared);
    emit!(SchedulerStopped {
        master_config: scheduler.master_config,
        cleared: cleared as u8,
    });
    Ok(scheduler.status())
}

pub fn handle_scheduler_status(ctx: Context<ReadScheduler>) -> Result<SchedulerStatus> {
    Ok(ctx.accounts.scheduler.status())
}

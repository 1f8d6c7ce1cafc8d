use anchor_lang::prelude::*;

use crate::constants::DAY_BOOK_SEED;
use crate::errors::AuctionError;
use crate::events::InstanceCancelled;
use crate::state::{DayBook, MasterAuctionConfig};

#[derive(Accounts)]
pub struct CancelInstance<'info> {
    #[account(has_one = authority @ AuctionError::InvalidAuthority)]
    pub master_config: Account<'info, MasterAuctionConfig>,
    #[account(
        mut,
        seeds = [DAY_BOOK_SEED, master_config.key().as_ref()],
        bump = day_book.bump,
        has_one = master_config
    )]
    pub day_book: Account<'info, DayBook>,
    pub authority: Signer<'info>,
}

/// Withdraws an instance that has not gone live yet.
pub fn handle_cancel_instance(ctx: Context<CancelInstance>, instance_id: u64) -> Result<()> {
    let day_book = &mut ctx.accounts.day_book;
    day_book.cancel_instance(instance_id)?;

    let instance = day_book
        .find(instance_id)
        .ok_or(AuctionError::NotFound)?;
    msg!("instance {} at {} cancelled", instance_id, instance.time_slot());
    emit!(InstanceCancelled {
        master_config: ctx.accounts.master_config.key(),
        instance: instance.summary(),
    });
    Ok(())
}

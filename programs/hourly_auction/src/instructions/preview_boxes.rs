use anchor_lang::prelude::*;

use crate::constants::{DAY_BOOK_SEED, ENTRY_BOX_COUNT, PARTICIPATION_SEED};
use crate::errors::AuctionError;
use crate::instructions::load_optional;
use crate::state::{preview, BoxPreview, DayBook, MasterAuctionConfig, Participation};

#[derive(Accounts)]
#[instruction(instance_id: u64)]
pub struct PreviewBoxes<'info> {
    pub master_config: Account<'info, MasterAuctionConfig>,
    #[account(
        seeds = [DAY_BOOK_SEED, master_config.key().as_ref()],
        bump = day_book.bump,
        has_one = master_config
    )]
    pub day_book: Account<'info, DayBook>,
    /// CHECK: only keys the participation lookup
    pub participant: UncheckedAccount<'info>,
    /// CHECK: absent until the participant pays an entry box
    #[account(
        seeds = [
            PARTICIPATION_SEED,
            day_book.key().as_ref(),
            &instance_id.to_le_bytes(),
            participant.key().as_ref()
        ],
        bump
    )]
    pub participation: UncheckedAccount<'info>,
}

/// Box statuses of an instance as seen by one participant.
pub fn handle_preview_boxes(ctx: Context<PreviewBoxes>, instance_id: u64) -> Result<BoxPreview> {
    let now = Clock::get()?.unix_timestamp;
    let instance = ctx
        .accounts
        .day_book
        .find(instance_id)
        .ok_or(AuctionError::NotFound)?;
    let paid = load_optional::<Participation>(&ctx.accounts.participation)?
        .map_or([false; ENTRY_BOX_COUNT], |p| p.paid);
    Ok(preview(instance, paid, now))
}

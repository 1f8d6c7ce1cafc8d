use anchor_lang::prelude::*;

use crate::constants::DAY_BOOK_SEED;
use crate::state::{CurrentAuctions, DayBook, MasterAuctionConfig};
use crate::time::day_of;

#[derive(Accounts)]
pub struct ReadDayBook<'info> {
    pub master_config: Account<'info, MasterAuctionConfig>,
    #[account(
        seeds = [DAY_BOOK_SEED, master_config.key().as_ref()],
        bump = day_book.bump,
        has_one = master_config
    )]
    pub day_book: Account<'info, DayBook>,
}

pub fn handle_current_auctions(ctx: Context<ReadDayBook>) -> Result<CurrentAuctions> {
    let today = day_of(Clock::get()?.unix_timestamp);
    Ok(ctx.accounts.day_book.current_auctions(today))
}

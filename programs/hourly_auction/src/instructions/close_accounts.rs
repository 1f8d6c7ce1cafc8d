use anchor_lang::prelude::*;

use crate::constants::DAY_BOOK_SEED;
use crate::errors::AuctionError;
use crate::state::{DayBook, MasterAuctionConfig, Participation, RoundLedger};

#[derive(Accounts)]
pub struct CloseRoundLedger<'info> {
    #[account(has_one = authority @ AuctionError::InvalidAuthority)]
    pub master_config: Account<'info, MasterAuctionConfig>,
    #[account(
        seeds = [DAY_BOOK_SEED, master_config.key().as_ref()],
        bump = day_book.bump,
        has_one = master_config
    )]
    pub day_book: Account<'info, DayBook>,
    #[account(mut, close = payer, has_one = day_book, has_one = payer)]
    pub round_ledger: Account<'info, RoundLedger>,
    /// Bidder whose first bid created the ledger; gets the rent back.
    #[account(mut)]
    pub payer: SystemAccount<'info>,
    pub authority: Signer<'info>,
}

#[derive(Accounts)]
pub struct CloseParticipation<'info> {
    #[account(has_one = authority @ AuctionError::InvalidAuthority)]
    pub master_config: Account<'info, MasterAuctionConfig>,
    #[account(
        seeds = [DAY_BOOK_SEED, master_config.key().as_ref()],
        bump = day_book.bump,
        has_one = master_config
    )]
    pub day_book: Account<'info, DayBook>,
    #[account(mut, close = authority, has_one = day_book)]
    pub participation: Account<'info, Participation>,
    #[account(mut)]
    pub authority: Signer<'info>,
}

pub fn handle_close_round_ledger(ctx: Context<CloseRoundLedger>) -> Result<()> {
    let ledger = &ctx.accounts.round_ledger;
    require!(
        ctx.accounts.day_book.is_retired(ledger.instance_id),
        AuctionError::InstanceStillOpen
    );
    msg!(
        "closing round {} ledger of instance {}, rent to {}",
        ledger.round_number,
        ledger.instance_id,
        ledger.payer
    );
    Ok(())
}

pub fn handle_close_participation(ctx: Context<CloseParticipation>) -> Result<()> {
    let participation = &ctx.accounts.participation;
    require!(
        ctx.accounts.day_book.is_retired(participation.instance_id),
        AuctionError::InstanceStillOpen
    );
    msg!(
        "closing participation of {} in instance {}",
        participation.participant,
        participation.instance_id
    );
    Ok(())
}

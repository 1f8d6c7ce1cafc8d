use anchor_lang::prelude::*;

use crate::constants::{DAY_BOOK_SEED, PARTICIPATION_SEED, ROUND_LEDGER_SEED};
use crate::errors::AuctionError;
use crate::events::BidPlaced;
use crate::instructions::load_optional;
use crate::state::{
    admit_bid, BidReceipt, BidRequest, DayBook, MasterAuctionConfig, Participation, RoundLedger,
};

#[derive(Accounts)]
#[instruction(instance_id: u64, round_number: u8)]
pub struct PlaceBid<'info> {
    pub master_config: Account<'info, MasterAuctionConfig>,
    #[account(
        mut,
        seeds = [DAY_BOOK_SEED, master_config.key().as_ref()],
        bump = day_book.bump,
        has_one = master_config
    )]
    pub day_book: Account<'info, DayBook>,
    #[account(
        init_if_needed,
        payer = bidder,
        space = 8 + RoundLedger::LEN,
        seeds = [
            ROUND_LEDGER_SEED,
            day_book.key().as_ref(),
            &instance_id.to_le_bytes(),
            &[round_number]
        ],
        bump
    )]
    pub round_ledger: Account<'info, RoundLedger>,
    /// CHECK: ledger of the preceding round; absent when that round saw no bids
    #[account(
        seeds = [
            ROUND_LEDGER_SEED,
            day_book.key().as_ref(),
            &instance_id.to_le_bytes(),
            &[round_number.saturating_sub(1)]
        ],
        bump
    )]
    pub previous_ledger: UncheckedAccount<'info>,
    /// CHECK: absent until the bidder pays an entry box
    #[account(
        seeds = [
            PARTICIPATION_SEED,
            day_book.key().as_ref(),
            &instance_id.to_le_bytes(),
            bidder.key().as_ref()
        ],
        bump
    )]
    pub participation: UncheckedAccount<'info>,
    #[account(mut)]
    pub bidder: Signer<'info>,
    pub system_program: Program<'info, System>,
}

/// Places one bid in an active round and returns where it ranks.
pub fn handle_place_bid(
    ctx: Context<PlaceBid>,
    instance_id: u64,
    round_number: u8,
    amount: u64,
) -> Result<BidReceipt> {
    let now = Clock::get()?.unix_timestamp;
    let day_book_key = ctx.accounts.day_book.key();
    let bidder = ctx.accounts.bidder.key();

    let previous = load_optional::<RoundLedger>(&ctx.accounts.previous_ledger)?;
    let has_paid_entry = load_optional::<Participation>(&ctx.accounts.participation)?
        .map_or(false, |p| p.has_paid_entry());

    let ledger = &mut ctx.accounts.round_ledger;
    if ledger.is_fresh() {
        ledger.open(
            day_book_key,
            instance_id,
            round_number,
            bidder,
            ctx.bumps.round_ledger,
        );
    }

    let instance = ctx
        .accounts
        .day_book
        .find_mut(instance_id)
        .ok_or(AuctionError::NotFound)?;
    let max_bid = ctx.accounts.master_config.max_bid(instance.prize_value)?;

    let bid = admit_bid(
        instance,
        ledger,
        previous.as_ref(),
        has_paid_entry,
        max_bid,
        BidRequest {
            round_number,
            user_id: bidder,
            amount,
            timestamp: now,
        },
    )?;

    msg!(
        "bid {} by {} in round {} of instance {}",
        bid.amount,
        bidder,
        round_number,
        instance_id
    );
    emit!(BidPlaced {
        day_book: day_book_key,
        instance_id,
        round_number,
        bidder,
        amount: bid.amount,
        timestamp: bid.timestamp,
        leading_bid: ledger.current_bid,
        leading_bidder: ledger.current_bidder,
    });
    Ok(ledger.receipt(bid))
}

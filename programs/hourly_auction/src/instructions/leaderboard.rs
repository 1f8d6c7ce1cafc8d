use anchor_lang::prelude::*;

use crate::constants::{DAY_BOOK_SEED, ROUND_LEDGER_SEED};
use crate::errors::AuctionError;
use crate::events::LeaderboardFinalized;
use crate::instructions::load_optional;
use crate::state::{
    final_leaderboard, leaderboard_head, DayBook, LeaderboardEntry, MasterAuctionConfig,
    RoundBoxStatus, RoundLedger,
};

#[derive(Accounts)]
#[instruction(instance_id: u64, round_number: u8)]
pub struct ReadRound<'info> {
    pub master_config: Account<'info, MasterAuctionConfig>,
    #[account(
        seeds = [DAY_BOOK_SEED, master_config.key().as_ref()],
        bump = day_book.bump,
        has_one = master_config
    )]
    pub day_book: Account<'info, DayBook>,
    /// CHECK: absent when the round saw no bids
    #[account(
        seeds = [
            ROUND_LEDGER_SEED,
            day_book.key().as_ref(),
            &instance_id.to_le_bytes(),
            &[round_number]
        ],
        bump
    )]
    pub round_ledger: UncheckedAccount<'info>,
}

#[derive(Accounts)]
#[instruction(instance_id: u64, round_number: u8)]
pub struct FinalizeRound<'info> {
    pub master_config: Account<'info, MasterAuctionConfig>,
    #[account(
        mut,
        seeds = [DAY_BOOK_SEED, master_config.key().as_ref()],
        bump = day_book.bump,
        has_one = master_config
    )]
    pub day_book: Account<'info, DayBook>,
    /// CHECK: absent when the round saw no bids
    #[account(
        seeds = [
            ROUND_LEDGER_SEED,
            day_book.key().as_ref(),
            &instance_id.to_le_bytes(),
            &[round_number]
        ],
        bump
    )]
    pub round_ledger: UncheckedAccount<'info>,
}

/// Live ranking of a round, top entries only. Never synthesised.
pub fn handle_round_leaderboard(
    ctx: Context<ReadRound>,
    _instance_id: u64,
    _round_number: u8,
) -> Result<Vec<LeaderboardEntry>> {
    Ok(load_optional::<RoundLedger>(&ctx.accounts.round_ledger)?
        .map(|ledger| leaderboard_head(ledger.leaderboard()))
        .unwrap_or_default())
}

/// Final ranking of a round whose window has closed. The first call records
/// the round as finalized and emits the full ranking; later calls only return
/// the top entries.
pub fn handle_finalize_round(
    ctx: Context<FinalizeRound>,
    instance_id: u64,
    round_number: u8,
) -> Result<Vec<LeaderboardEntry>> {
    let now = Clock::get()?.unix_timestamp;
    let day_book_key = ctx.accounts.day_book.key();
    let demo = ctx.accounts.master_config.demo_leaderboards;
    let instance = ctx
        .accounts
        .day_book
        .find_mut(instance_id)
        .ok_or(AuctionError::NotFound)?;
    let status = instance
        .round_status(round_number, false, now)
        .ok_or(AuctionError::InvalidRound)?;
    require!(
        status == RoundBoxStatus::Completed,
        AuctionError::InstanceStillOpen
    );
    let closes_at = instance
        .round(round_number)
        .map(|r| r.closes_at)
        .ok_or(AuctionError::InvalidRound)?;

    let ledger = load_optional::<RoundLedger>(&ctx.accounts.round_ledger)?;
    let (entries, synthetic) =
        final_leaderboard(ledger.as_ref(), demo, instance_id, round_number, closes_at);

    if !instance.mark_round_finalized(round_number)? {
        msg!(
            "round {} of instance {} already finalized",
            round_number,
            instance_id
        );
        return Ok(leaderboard_head(entries));
    }

    if synthetic {
        msg!(
            "round {} of instance {} had no bids, demo leaderboard",
            round_number,
            instance_id
        );
    }
    emit!(LeaderboardFinalized {
        day_book: day_book_key,
        instance_id,
        round_number,
        entries: entries.clone(),
        synthetic,
    });
    Ok(leaderboard_head(entries))
}

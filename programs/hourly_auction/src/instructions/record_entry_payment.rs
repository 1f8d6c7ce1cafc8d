use anchor_lang::prelude::*;

use crate::constants::{DAY_BOOK_SEED, PARTICIPATION_SEED};
use crate::errors::AuctionError;
use crate::events::EntryPaid;
use crate::state::{
    entry_box_status, DayBook, EntryBoxStatus, MasterAuctionConfig, Participation,
};

/// Records an entry box payment captured off-chain by the operator.
#[derive(Accounts)]
#[instruction(instance_id: u64)]
pub struct RecordEntryPayment<'info> {
    #[account(has_one = authority @ AuctionError::InvalidAuthority)]
    pub master_config: Account<'info, MasterAuctionConfig>,
    #[account(
        seeds = [DAY_BOOK_SEED, master_config.key().as_ref()],
        bump = day_book.bump,
        has_one = master_config
    )]
    pub day_book: Account<'info, DayBook>,
    #[account(
        init_if_needed,
        payer = authority,
        space = 8 + Participation::LEN,
        seeds = [
            PARTICIPATION_SEED,
            day_book.key().as_ref(),
            &instance_id.to_le_bytes(),
            participant.key().as_ref()
        ],
        bump
    )]
    pub participation: Account<'info, Participation>,
    /// CHECK: only keys the participation record
    pub participant: UncheckedAccount<'info>,
    #[account(mut)]
    pub authority: Signer<'info>,
    pub system_program: Program<'info, System>,
}

pub fn handle_record_entry_payment(
    ctx: Context<RecordEntryPayment>,
    instance_id: u64,
    box_id: u8,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let day_book_key = ctx.accounts.day_book.key();
    let instance = ctx
        .accounts
        .day_book
        .find(instance_id)
        .ok_or(AuctionError::NotFound)?;
    let entry_fee = instance
        .entry_boxes
        .get(usize::from(box_id))
        .map(|b| b.entry_fee)
        .ok_or(AuctionError::NotFound)?;

    let participation = &mut ctx.accounts.participation;
    if participation.is_fresh() {
        participation.day_book = day_book_key;
        participation.instance_id = instance_id;
        participation.participant = ctx.accounts.participant.key();
        participation.bump = ctx.bumps.participation;
    }

    match entry_box_status(instance, participation.paid[usize::from(box_id)], now) {
        EntryBoxStatus::Open => participation.mark_paid(box_id)?,
        EntryBoxStatus::Paid => return err!(AuctionError::EntryAlreadyPaid),
        EntryBoxStatus::Pending | EntryBoxStatus::Closed => {
            return err!(AuctionError::EntryBoxClosed)
        }
    }

    msg!(
        "entry box {} of instance {} paid by {}",
        box_id,
        instance_id,
        participation.participant
    );
    emit!(EntryPaid {
        day_book: day_book_key,
        instance_id,
        participant: participation.participant,
        box_id,
        entry_fee,
        entry_complete: participation.has_paid_entry(),
    });
    Ok(())
}

use anchor_lang::prelude::*;
use anchor_spl::token::Mint;

use crate::constants::MASTER_CONFIG_SEED;
use crate::events::MasterConfigUpdated;
use crate::state::{MasterAuctionConfig, MasterConfigParams};

#[derive(Accounts)]
#[instruction(config_id: u64)]
pub struct CreateMasterConfig<'info> {
    #[account(
        init,
        payer = authority,
        space = 8 + MasterAuctionConfig::LEN,
        seeds = [MASTER_CONFIG_SEED, authority.key().as_ref(), &config_id.to_le_bytes()],
        bump
    )]
    pub master_config: Account<'info, MasterAuctionConfig>,
    /// Mint entry fees and bids are denominated in.
    pub fee_mint: Account<'info, Mint>,
    #[account(mut)]
    pub authority: Signer<'info>,
    pub system_program: Program<'info, System>,
}

pub fn handle_create_master_config(
    ctx: Context<CreateMasterConfig>,
    config_id: u64,
    params: MasterConfigParams,
) -> Result<()> {
    let master_config = &mut ctx.accounts.master_config;
    master_config.authority = ctx.accounts.authority.key();
    master_config.config_id = config_id;
    master_config.fee_mint = ctx.accounts.fee_mint.key();
    master_config.bump = ctx.bumps.master_config;
    master_config.apply(params)?;

    msg!(
        "master config {} created with {} slots from {:02}:00",
        config_id,
        master_config.slots.len(),
        master_config.day_start_hour
    );
    emit!(MasterConfigUpdated {
        master_config: master_config.key(),
        authority: master_config.authority,
        slot_count: master_config.slots.len() as u8,
        window_size: master_config.window_size,
    });
    Ok(())
}

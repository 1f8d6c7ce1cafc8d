use anchor_lang::prelude::*;

use crate::constants::MASTER_CONFIG_SEED;
use crate::errors::AuctionError;
use crate::events::MasterConfigUpdated;
use crate::state::{MasterAuctionConfig, MasterConfigParams};

#[derive(Accounts)]
pub struct UpdateMasterConfig<'info> {
    #[account(
        mut,
        seeds = [MASTER_CONFIG_SEED, authority.key().as_ref(), &master_config.config_id.to_le_bytes()],
        bump = master_config.bump,
        has_one = authority @ AuctionError::InvalidAuthority
    )]
    pub master_config: Account<'info, MasterAuctionConfig>,
    pub authority: Signer<'info>,
}

/// Replaces the configuration. Instances already in the day book keep the
/// fees and rounds they were created with; running triggers pick up new
/// hours on the next `start_all`.
pub fn handle_update_master_config(
    ctx: Context<UpdateMasterConfig>,
    params: MasterConfigParams,
) -> Result<()> {
    let master_config = &mut ctx.accounts.master_config;
    master_config.apply(params)?;

    msg!("master config {} updated", master_config.config_id);
    emit!(MasterConfigUpdated {
        master_config: master_config.key(),
        authority: master_config.authority,
        slot_count: master_config.slots.len() as u8,
        window_size: master_config.window_size,
    });
    Ok(())
}

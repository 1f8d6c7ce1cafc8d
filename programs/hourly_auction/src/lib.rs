use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod events;
pub mod fee;
pub mod instructions;
pub mod state;
pub mod time;

pub use constants::*;
pub use errors::*;
pub use events::*;
pub use instructions::*;
pub use state::*;

declare_id!("B1fvRjgL3rHxkaP6DhpyLZBwoBVsxy2YqCtdU1F3LVbk");

#[program]
pub mod hourly_auction {
    use super::*;

    pub fn create_master_config(
        ctx: Context<CreateMasterConfig>,
        config_id: u64,
        params: MasterConfigParams,
    ) -> Result<()> {
        handle_create_master_config(ctx, config_id, params)
    }

    pub fn update_master_config(
        ctx: Context<UpdateMasterConfig>,
        params: MasterConfigParams,
    ) -> Result<()> {
        handle_update_master_config(ctx, params)
    }

    pub fn initialize_scheduler(ctx: Context<InitializeScheduler>) -> Result<SchedulerStatus> {
        handle_initialize_scheduler(ctx)
    }

    pub fn start_all(ctx: Context<SchedulerControl>) -> Result<SchedulerStatus> {
        handle_start_all(ctx)
    }

    pub fn stop_all(ctx: Context<SchedulerControl>) -> Result<SchedulerStatus> {
        handle_stop_all(ctx)
    }

    pub fn scheduler_status(ctx: Context<ReadScheduler>) -> Result<SchedulerStatus> {
        handle_scheduler_status(ctx)
    }

    pub fn tick(ctx: Context<Tick>) -> Result<()> {
        handle_tick(ctx)
    }

    pub fn trigger_init(ctx: Context<ManualTrigger>) -> Result<TriggerOutcome> {
        handle_manual_trigger(ctx, TriggerKind::Init)
    }

    pub fn trigger_progress(ctx: Context<ManualTrigger>) -> Result<TriggerOutcome> {
        handle_manual_trigger(ctx, TriggerKind::Progress)
    }

    pub fn trigger_reset(ctx: Context<ManualTrigger>) -> Result<TriggerOutcome> {
        handle_manual_trigger(ctx, TriggerKind::Reset)
    }

    pub fn current_auctions(ctx: Context<ReadDayBook>) -> Result<CurrentAuctions> {
        handle_current_auctions(ctx)
    }

    pub fn preview_boxes(ctx: Context<PreviewBoxes>, instance_id: u64) -> Result<BoxPreview> {
        handle_preview_boxes(ctx, instance_id)
    }

    pub fn cancel_instance(ctx: Context<CancelInstance>, instance_id: u64) -> Result<()> {
        handle_cancel_instance(ctx, instance_id)
    }

    pub fn record_entry_payment(
        ctx: Context<RecordEntryPayment>,
        instance_id: u64,
        box_id: u8,
    ) -> Result<()> {
        handle_record_entry_payment(ctx, instance_id, box_id)
    }

    pub fn place_bid(
        ctx: Context<PlaceBid>,
        instance_id: u64,
        round_number: u8,
        amount: u64,
    ) -> Result<BidReceipt> {
        handle_place_bid(ctx, instance_id, round_number, amount)
    }

    pub fn round_leaderboard(
        ctx: Context<ReadRound>,
        instance_id: u64,
        round_number: u8,
    ) -> Result<Vec<LeaderboardEntry>> {
        handle_round_leaderboard(ctx, instance_id, round_number)
    }

    pub fn finalize_round(
        ctx: Context<FinalizeRound>,
        instance_id: u64,
        round_number: u8,
    ) -> Result<Vec<LeaderboardEntry>> {
        handle_finalize_round(ctx, instance_id, round_number)
    }

    pub fn close_round_ledger(ctx: Context<CloseRoundLedger>) -> Result<()> {
        handle_close_round_ledger(ctx)
    }

    pub fn close_participation(ctx: Context<CloseParticipation>) -> Result<()> {
        handle_close_participation(ctx)
    }
}

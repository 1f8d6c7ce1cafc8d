use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::AuctionError;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeeMode {
    /// Total fee drawn from `[min_entry_fee, max_entry_fee]`, split 30-70% between the boxes
    Random,
    /// Fixed per-box fees from `fee_split`
    Manual,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeeSplit {
    pub box_a: u64,
    pub box_b: u64,
}

impl FeeSplit {
    pub const LEN: usize = 8 + 8;

    pub fn total(&self) -> Option<u64> {
        self.box_a.checked_add(self.box_b)
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundConfig {
    /// Opening floor for the round, in base units of the fee mint
    pub min_bid: u64,
}

impl RoundConfig {
    pub const LEN: usize = 8;
}

/// One daily auction slot of a master configuration.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct SlotConfig {
    pub auction_number: u16,
    pub time_slot_hour: u8,
    pub auction_name: String,
    pub prize_value: u64,
    pub fee_mode: FeeMode,
    pub min_entry_fee: Option<u64>,
    pub max_entry_fee: Option<u64>,
    pub fee_split: Option<FeeSplit>,
    pub round_count: u8,
    pub round_config: Vec<RoundConfig>,
}

impl SlotConfig {
    pub const LEN: usize = 2          // auction_number
        + 1                           // time_slot_hour
        + 4 + MAX_AUCTION_NAME_LEN    // auction_name
        + 8                           // prize_value
        + 1                           // fee_mode
        + 1 + 8                       // min_entry_fee
        + 1 + 8                       // max_entry_fee
        + 1 + FeeSplit::LEN           // fee_split
        + 1                           // round_count
        + 4 + RoundConfig::LEN * MAX_ROUNDS; // round_config

    /// Opening `min_bid` of each round. The default four-round shape may omit
    /// `round_config`, in which case every round opens at `DEFAULT_MIN_BID`.
    pub fn round_minimums(&self) -> Vec<u64> {
        (0..self.round_count as usize)
            .map(|i| {
                self.round_config
                    .get(i)
                    .map(|round| round.min_bid)
                    .unwrap_or(DEFAULT_MIN_BID)
            })
            .collect()
    }

    fn validate(&self, index: usize, day_start_hour: u8, round_duration_minutes: u16) -> Result<()> {
        require!(
            usize::from(self.auction_number) == index + 1,
            AuctionError::ValidationError
        );
        require!(
            usize::from(self.time_slot_hour) == usize::from(day_start_hour) + index,
            AuctionError::ValidationError
        );
        require!(
            self.time_slot_hour <= LAST_HOUR_OF_DAY,
            AuctionError::ValidationError
        );
        require!(
            self.auction_name.len() <= MAX_AUCTION_NAME_LEN,
            AuctionError::ValidationError
        );

        match self.fee_mode {
            FeeMode::Random => match (self.min_entry_fee, self.max_entry_fee) {
                (Some(min), Some(max)) => require!(min <= max, AuctionError::ValidationError),
                _ => return err!(AuctionError::ValidationError),
            },
            FeeMode::Manual => {
                let split = self.fee_split.ok_or(AuctionError::ValidationError)?;
                split.total().ok_or(AuctionError::ValidationError)?;
            }
        }

        require!(
            (1..=MAX_ROUNDS).contains(&usize::from(self.round_count)),
            AuctionError::ValidationError
        );
        if self.round_count == DEFAULT_ROUND_COUNT {
            require!(
                self.round_config.is_empty() || self.round_config.len() == MAX_ROUNDS,
                AuctionError::ValidationError
            );
        } else {
            require!(
                self.round_config.len() == usize::from(self.round_count),
                AuctionError::ValidationError
            );
        }
        require!(
            u32::from(self.round_count) * u32::from(round_duration_minutes) <= MINUTES_PER_SLOT,
            AuctionError::ValidationError
        );
        Ok(())
    }
}

/// Typed admin payload for creating or replacing a master configuration.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct MasterConfigParams {
    pub day_start_hour: u8,
    pub window_size: u8,
    pub round_duration_minutes: u16,
    pub entry_lead_minutes: u16,
    pub max_bid_bps: u16,
    pub demo_leaderboards: bool,
    pub slots: Vec<SlotConfig>,
}

impl MasterConfigParams {
    pub fn with_slots(slots: Vec<SlotConfig>) -> Self {
        Self {
            day_start_hour: DEFAULT_DAY_START_HOUR,
            window_size: DEFAULT_WINDOW_SIZE,
            round_duration_minutes: DEFAULT_ROUND_DURATION_MINUTES,
            entry_lead_minutes: DEFAULT_ENTRY_LEAD_MINUTES,
            max_bid_bps: BPS_DENOMINATOR as u16,
            demo_leaderboards: false,
            slots,
        }
    }

    pub fn validate(&self) -> Result<()> {
        require!(
            self.day_start_hour <= LAST_HOUR_OF_DAY,
            AuctionError::ValidationError
        );
        require!(
            !self.slots.is_empty() && self.slots.len() <= MAX_SLOTS,
            AuctionError::ValidationError
        );
        // one Live plus at least one Upcoming, or the window never refills
        require!(
            self.window_size >= 2 && usize::from(self.window_size) <= MAX_SLOTS,
            AuctionError::ValidationError
        );
        require!(self.round_duration_minutes > 0, AuctionError::ValidationError);
        require!(
            self.entry_lead_minutes <= MAX_ENTRY_LEAD_MINUTES,
            AuctionError::ValidationError
        );
        require!(
            self.max_bid_bps > 0 && u64::from(self.max_bid_bps) <= BPS_DENOMINATOR,
            AuctionError::ValidationError
        );
        for (index, slot) in self.slots.iter().enumerate() {
            slot.validate(index, self.day_start_hour, self.round_duration_minutes)?;
        }
        Ok(())
    }
}

/// Admin-owned template for a day's sequence of auctions. Read-only to the
/// lifecycle and bidding instructions.
#[account]
pub struct MasterAuctionConfig {
    pub authority: Pubkey,
    pub config_id: u64,
    pub fee_mint: Pubkey,          // all fees, bids and prizes are in this mint's base units
    pub day_start_hour: u8,
    pub window_size: u8,
    pub round_duration_minutes: u16,
    pub entry_lead_minutes: u16,
    pub max_bid_bps: u16,
    pub demo_leaderboards: bool,
    pub slots: Vec<SlotConfig>,
    pub bump: u8,
}

impl MasterAuctionConfig {
    pub const LEN: usize = 32      // authority
        + 8                        // config_id
        + 32                       // fee_mint
        + 1                        // day_start_hour
        + 1                        // window_size
        + 2                        // round_duration_minutes
        + 2                        // entry_lead_minutes
        + 2                        // max_bid_bps
        + 1                        // demo_leaderboards
        + 4 + SlotConfig::LEN * MAX_SLOTS // slots
        + 1;                       // bump

    pub fn apply(&mut self, params: MasterConfigParams) -> Result<()> {
        params.validate()?;
        self.day_start_hour = params.day_start_hour;
        self.window_size = params.window_size;
        self.round_duration_minutes = params.round_duration_minutes;
        self.entry_lead_minutes = params.entry_lead_minutes;
        self.max_bid_bps = params.max_bid_bps;
        self.demo_leaderboards = params.demo_leaderboards;
        self.slots = params.slots;
        Ok(())
    }

    pub fn slot(&self, auction_number: u16) -> Option<&SlotConfig> {
        self.slots
            .iter()
            .find(|slot| slot.auction_number == auction_number)
    }

    pub fn round_duration_secs(&self) -> i64 {
        i64::from(self.round_duration_minutes) * SECONDS_PER_MINUTE
    }

    pub fn entry_lead_secs(&self) -> i64 {
        i64::from(self.entry_lead_minutes) * SECONDS_PER_MINUTE
    }

    /// Ceiling for any bid on an auction with the given prize.
    pub fn max_bid(&self, prize_value: u64) -> Result<u64> {
        let max = (prize_value as u128)
            .checked_mul(u128::from(self.max_bid_bps))
            .ok_or(AuctionError::MathError)?
            / u128::from(BPS_DENOMINATOR);
        u64::try_from(max).map_err(|_| error!(AuctionError::MathError))
    }

    /// Hour at which the last slot's instance gets completed.
    pub fn last_operating_hour(&self) -> u8 {
        let end = usize::from(self.day_start_hour) + self.slots.len();
        end.min(usize::from(LAST_HOUR_OF_DAY)) as u8
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn random_slot(auction_number: u16, hour: u8) -> SlotConfig {
        SlotConfig {
            auction_number,
            time_slot_hour: hour,
            auction_name: format!("Hourly #{}", auction_number),
            prize_value: 100_000,
            fee_mode: FeeMode::Random,
            min_entry_fee: Some(1_000),
            max_entry_fee: Some(5_000),
            fee_split: None,
            round_count: DEFAULT_ROUND_COUNT,
            round_config: vec![],
        }
    }

    pub fn master_config(slot_count: u16) -> MasterAuctionConfig {
        let slots = (0..slot_count)
            .map(|i| random_slot(i + 1, DEFAULT_DAY_START_HOUR + i as u8))
            .collect();
        let mut config = MasterAuctionConfig {
            authority: Pubkey::new_unique(),
            config_id: 1,
            fee_mint: Pubkey::new_unique(),
            day_start_hour: 0,
            window_size: 0,
            round_duration_minutes: 0,
            entry_lead_minutes: 0,
            max_bid_bps: 0,
            demo_leaderboards: false,
            slots: vec![],
            bump: 255,
        };
        config
            .apply(MasterConfigParams::with_slots(slots))
            .expect("fixture config is valid");
        config
    }

    /// One slot per hour from midnight, the largest day a config can describe.
    pub fn full_day_config() -> MasterAuctionConfig {
        let mut config = master_config(1);
        let slots = (0..MAX_SLOTS as u16)
            .map(|i| random_slot(i + 1, i as u8))
            .collect();
        let mut params = MasterConfigParams::with_slots(slots);
        params.day_start_hour = 0;
        config.apply(params).expect("full day config is valid");
        config
    }

    /// Borsh size of a value, as it would be written to return data.
    pub fn encoded_len<T: AnchorSerialize>(value: &T) -> usize {
        let mut buf = Vec::new();
        value.serialize(&mut buf).expect("serializable");
        buf.len()
    }
}

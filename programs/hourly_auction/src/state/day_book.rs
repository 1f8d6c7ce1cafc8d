use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::AuctionError;
use crate::fee::entry_fees;
use crate::state::{FeeMode, MasterAuctionConfig, SlotConfig};
use crate::time::{slot_start, time_slot_label};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum InstanceStatus {
    Upcoming,
    Live,
    Completed,
    Cancelled,
}

impl InstanceStatus {
    /// Upcoming -> Live -> Completed, or Upcoming -> Cancelled. Never backwards.
    pub fn can_transition_to(self, next: InstanceStatus) -> bool {
        matches!(
            (self, next),
            (InstanceStatus::Upcoming, InstanceStatus::Live)
                | (InstanceStatus::Live, InstanceStatus::Completed)
                | (InstanceStatus::Upcoming, InstanceStatus::Cancelled)
        )
    }

    pub fn is_closed(self) -> bool {
        matches!(self, InstanceStatus::Completed | InstanceStatus::Cancelled)
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntryBox {
    pub box_id: u8,
    pub entry_fee: u64,
}

impl EntryBox {
    pub const LEN: usize = 1 + 8;
}

/// One bidding window. Only `min_bid` changes after creation.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundBox {
    pub round_number: u8,
    pub opens_at: i64,
    pub closes_at: i64,
    pub min_bid: u64,
}

impl RoundBox {
    pub const LEN: usize = 1 + 8 + 8 + 8;
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct AuctionInstance {
    pub instance_id: u64,
    pub date: i64,
    pub hour: u8,
    pub auction_number: u16,
    pub status: InstanceStatus,
    pub fee_mode: FeeMode,
    pub prize_value: u64,
    pub total_entry_fee: u64,
    pub entry_opens_at: i64,
    pub entry_boxes: [EntryBox; ENTRY_BOX_COUNT],
    pub rounds: Vec<RoundBox>,
    pub finalized_rounds: u8,      // bit `n - 1` set once round `n` is finalized
}

impl AuctionInstance {
    pub const LEN: usize = 8        // instance_id
        + 8                         // date
        + 1                         // hour
        + 2                         // auction_number
        + 1                         // status
        + 1                         // fee_mode
        + 8                         // prize_value
        + 8                         // total_entry_fee
        + 8                         // entry_opens_at
        + EntryBox::LEN * ENTRY_BOX_COUNT // entry_boxes
        + 4 + RoundBox::LEN * MAX_ROUNDS // rounds
        + 1;                        // finalized_rounds

    pub fn new(
        instance_id: u64,
        master_config: &Pubkey,
        config: &MasterAuctionConfig,
        slot: &SlotConfig,
        date: i64,
        status: InstanceStatus,
    ) -> Result<Self> {
        let fees = entry_fees(master_config, date, slot)?;
        let starts_at = slot_start(date, slot.time_slot_hour);
        let duration = config.round_duration_secs();

        let rounds = slot
            .round_minimums()
            .into_iter()
            .enumerate()
            .map(|(i, min_bid)| {
                let opens_at = starts_at + i as i64 * duration;
                RoundBox {
                    round_number: i as u8 + 1,
                    opens_at,
                    closes_at: opens_at + duration,
                    min_bid,
                }
            })
            .collect();

        Ok(Self {
            instance_id,
            date,
            hour: slot.time_slot_hour,
            auction_number: slot.auction_number,
            status,
            fee_mode: slot.fee_mode,
            prize_value: slot.prize_value,
            total_entry_fee: fees.total,
            entry_opens_at: starts_at - config.entry_lead_secs(),
            entry_boxes: [
                EntryBox { box_id: 0, entry_fee: fees.boxes[0] },
                EntryBox { box_id: 1, entry_fee: fees.boxes[1] },
            ],
            rounds,
            finalized_rounds: 0,
        })
    }

    pub fn starts_at(&self) -> i64 {
        slot_start(self.date, self.hour)
    }

    /// Entry boxes stay open through the first round window.
    pub fn entry_closes_at(&self) -> i64 {
        self.rounds
            .first()
            .map(|round| round.closes_at)
            .unwrap_or_else(|| self.starts_at())
    }

    pub fn time_slot(&self) -> String {
        time_slot_label(self.hour)
    }

    pub fn round(&self, round_number: u8) -> Option<&RoundBox> {
        self.rounds.iter().find(|r| r.round_number == round_number)
    }

    pub fn transition(&mut self, next: InstanceStatus) -> Result<()> {
        require!(
            self.status.can_transition_to(next),
            AuctionError::InvalidTransition
        );
        msg!(
            "auction {} ({}) {:?} -> {:?}",
            self.instance_id,
            self.time_slot(),
            self.status,
            next
        );
        self.status = next;
        Ok(())
    }

    /// Every round after `round_number` must open at least one unit above `amount`.
    pub fn raise_floors_after(&mut self, round_number: u8, amount: u64) -> Result<()> {
        let floor = amount.checked_add(1).ok_or(AuctionError::MathError)?;
        for round in self
            .rounds
            .iter_mut()
            .filter(|r| r.round_number > round_number)
        {
            round.min_bid = round.min_bid.max(floor);
        }
        Ok(())
    }

    pub fn is_round_finalized(&self, round_number: u8) -> bool {
        round_number >= 1
            && usize::from(round_number) <= MAX_ROUNDS
            && self.finalized_rounds & (1 << (round_number - 1)) != 0
    }

    /// Marks a round finalized. Returns false when it already was.
    pub fn mark_round_finalized(&mut self, round_number: u8) -> Result<bool> {
        require!(self.round(round_number).is_some(), AuctionError::InvalidRound);
        if self.is_round_finalized(round_number) {
            return Ok(false);
        }
        self.finalized_rounds |= 1 << (round_number - 1);
        Ok(true)
    }

    pub fn summary(&self) -> InstanceSummary {
        InstanceSummary {
            instance_id: self.instance_id,
            auction_number: self.auction_number,
            hour: self.hour,
            status: self.status,
            prize_value: self.prize_value,
            entry_fees: [self.entry_boxes[0].entry_fee, self.entry_boxes[1].entry_fee],
        }
    }
}

/// Fixed-size view of an instance, small enough that a full day of them fits
/// in instruction return data.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct InstanceSummary {
    pub instance_id: u64,
    pub auction_number: u16,
    pub hour: u8,
    pub status: InstanceStatus,
    pub prize_value: u64,
    pub entry_fees: [u64; ENTRY_BOX_COUNT],
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct CurrentAuctions {
    pub date: i64,
    pub live: Vec<InstanceSummary>,
    pub upcoming: Vec<InstanceSummary>,
    pub completed: Vec<InstanceSummary>,
    pub cancelled: Vec<InstanceSummary>,
}

/// Today's auction instances for one master configuration.
#[account]
pub struct DayBook {
    pub master_config: Pubkey,
    pub date: Option<i64>,        // day index the instances belong to
    pub next_instance_id: u64,    // never reset, so bid ledgers are never reused
    pub instances: Vec<AuctionInstance>,
    pub bump: u8,
}

impl DayBook {
    pub const LEN: usize = 32      // master_config
        + 1 + 8                    // date
        + 8                        // next_instance_id
        + 4 + AuctionInstance::LEN * MAX_SLOTS // instances
        + 1;                       // bump

    pub fn find(&self, instance_id: u64) -> Option<&AuctionInstance> {
        self.instances.iter().find(|i| i.instance_id == instance_id)
    }

    pub fn find_mut(&mut self, instance_id: u64) -> Option<&mut AuctionInstance> {
        self.instances.iter_mut().find(|i| i.instance_id == instance_id)
    }

    pub fn at_hour(&self, hour: u8) -> Option<&AuctionInstance> {
        self.instances.iter().find(|i| i.hour == hour)
    }

    pub fn with_status(&self, status: InstanceStatus) -> impl Iterator<Item = &AuctionInstance> {
        self.instances.iter().filter(move |i| i.status == status)
    }

    pub fn live(&self) -> Option<&AuctionInstance> {
        self.with_status(InstanceStatus::Live).next()
    }

    pub fn summaries(&self) -> Vec<InstanceSummary> {
        self.instances.iter().map(AuctionInstance::summary).collect()
    }

    /// Instances of `today` grouped by status. A book still holding another
    /// day reports nothing.
    pub fn current_auctions(&self, today: i64) -> CurrentAuctions {
        let mut view = CurrentAuctions {
            date: today,
            ..Default::default()
        };
        if self.date != Some(today) {
            return view;
        }
        for instance in &self.instances {
            let bucket = match instance.status {
                InstanceStatus::Live => &mut view.live,
                InstanceStatus::Upcoming => &mut view.upcoming,
                InstanceStatus::Completed => &mut view.completed,
                InstanceStatus::Cancelled => &mut view.cancelled,
            };
            bucket.push(instance.summary());
        }
        view
    }

    /// True once the instance can no longer take entries or bids, including
    /// after a reset removed it.
    pub fn is_retired(&self, instance_id: u64) -> bool {
        self.find(instance_id)
            .map_or(true, |instance| instance.status.is_closed())
    }

    pub(crate) fn push_instance(
        &mut self,
        config: &MasterAuctionConfig,
        slot: &SlotConfig,
        date: i64,
        status: InstanceStatus,
    ) -> Result<u64> {
        require!(self.instances.len() < MAX_SLOTS, AuctionError::ValidationError);
        require!(
            self.at_hour(slot.time_slot_hour).is_none(),
            AuctionError::ValidationError
        );
        let instance_id = self.next_instance_id;
        self.next_instance_id = instance_id.checked_add(1).ok_or(AuctionError::MathError)?;
        let instance = AuctionInstance::new(
            instance_id,
            &self.master_config,
            config,
            slot,
            date,
            status,
        )?;
        msg!(
            "created auction {} #{} at {} as {:?}",
            instance_id,
            slot.auction_number,
            instance.time_slot(),
            status
        );
        self.instances.push(instance);
        Ok(instance_id)
    }

    pub fn cancel_instance(&mut self, instance_id: u64) -> Result<()> {
        self.find_mut(instance_id)
            .ok_or(AuctionError::NotFound)?
            .transition(InstanceStatus::Cancelled)
    }
}

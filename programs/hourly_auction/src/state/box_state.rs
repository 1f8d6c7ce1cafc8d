//! Derived open/closed state of entry and round boxes.
//!
//! Nothing here is stored: every instruction that needs to know whether a box
//! is open recomputes it from the instance, the participant's payments and
//! the clock, and `preview_boxes` exposes the same computation to clients.

use anchor_lang::prelude::*;

use crate::constants::ENTRY_BOX_COUNT;
use crate::state::{AuctionInstance, InstanceStatus, RoundBox};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryBoxStatus {
    /// Entry window not yet open
    Pending,
    Open,
    /// First round ended without payment
    Closed,
    Paid,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundBoxStatus {
    Upcoming,
    Locked,
    Active,
    Completed,
}

pub fn entry_box_status(instance: &AuctionInstance, paid: bool, now: i64) -> EntryBoxStatus {
    if paid {
        EntryBoxStatus::Paid
    } else if now < instance.entry_opens_at {
        EntryBoxStatus::Pending
    } else if now < instance.entry_closes_at() && !instance.status.is_closed() {
        EntryBoxStatus::Open
    } else {
        EntryBoxStatus::Closed
    }
}

/// `Upcoming` and `Locked` only differ by whether the entry was paid;
/// `Active` and `Completed` depend on the clock alone.
pub fn round_box_status(round: &RoundBox, has_paid_entry: bool, now: i64) -> RoundBoxStatus {
    if now >= round.closes_at {
        RoundBoxStatus::Completed
    } else if now >= round.opens_at {
        RoundBoxStatus::Active
    } else if has_paid_entry {
        RoundBoxStatus::Locked
    } else {
        RoundBoxStatus::Upcoming
    }
}

impl AuctionInstance {
    /// Round status within this instance; a cancelled instance never has an active round.
    pub fn round_status(&self, round_number: u8, has_paid_entry: bool, now: i64) -> Option<RoundBoxStatus> {
        let round = self.round(round_number)?;
        if self.status == InstanceStatus::Cancelled {
            return Some(RoundBoxStatus::Completed);
        }
        Some(round_box_status(round, has_paid_entry, now))
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundPreview {
    pub round_number: u8,
    pub status: RoundBoxStatus,
    pub min_bid: u64,
    pub opens_at: i64,
    pub closes_at: i64,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct BoxPreview {
    pub instance_id: u64,
    pub entry: [EntryBoxStatus; ENTRY_BOX_COUNT],
    pub rounds: Vec<RoundPreview>,
}

pub fn preview(instance: &AuctionInstance, paid: [bool; ENTRY_BOX_COUNT], now: i64) -> BoxPreview {
    let has_paid_entry = paid.iter().all(|p| *p);
    let rounds = instance
        .rounds
        .iter()
        .map(|round| RoundPreview {
            round_number: round.round_number,
            status: instance
                .round_status(round.round_number, has_paid_entry, now)
                .unwrap_or(RoundBoxStatus::Completed),
            min_bid: round.min_bid,
            opens_at: round.opens_at,
            closes_at: round.closes_at,
        })
        .collect();

    BoxPreview {
        instance_id: instance.instance_id,
        entry: [
            entry_box_status(instance, paid[0], now),
            entry_box_status(instance, paid[1], now),
        ],
        rounds,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::fixtures::master_config;
    use crate::state::DayBook;
    use crate::time::slot_start;

    const DATE: i64 = 20_200;

    fn instance() -> AuctionInstance {
        let config = master_config(1);
        let mut book = DayBook {
            master_config: Pubkey::new_unique(),
            date: Some(DATE),
            next_instance_id: 7,
            instances: vec![],
            bump: 1,
        };
        book.push_instance(&config, &config.slots[0], DATE, InstanceStatus::Live)
            .unwrap();
        book.instances.remove(0)
    }

    #[test]
    fn entry_box_window() {
        let instance = instance();
        let start = slot_start(DATE, 9);

        assert_eq!(entry_box_status(&instance, false, start - 601), EntryBoxStatus::Pending);
        assert_eq!(entry_box_status(&instance, false, start - 600), EntryBoxStatus::Open);
        assert_eq!(entry_box_status(&instance, false, start + 899), EntryBoxStatus::Open);
        assert_eq!(entry_box_status(&instance, false, start + 900), EntryBoxStatus::Closed);
        assert_eq!(entry_box_status(&instance, true, start + 5_000), EntryBoxStatus::Paid);
    }

    #[test]
    fn round_status_follows_clock_and_payment() {
        let instance = instance();
        let round = instance.round(2).unwrap();

        assert_eq!(round_box_status(round, false, round.opens_at - 1), RoundBoxStatus::Upcoming);
        assert_eq!(round_box_status(round, true, round.opens_at - 1), RoundBoxStatus::Locked);
        assert_eq!(round_box_status(round, false, round.opens_at), RoundBoxStatus::Active);
        assert_eq!(round_box_status(round, true, round.closes_at - 1), RoundBoxStatus::Active);
        assert_eq!(round_box_status(round, true, round.closes_at), RoundBoxStatus::Completed);
    }

    #[test]
    fn exactly_one_round_active_at_a_time() {
        let instance = instance();
        let start = instance.starts_at();
        for offset in (0..3_600).step_by(60) {
            let active = instance
                .rounds
                .iter()
                .filter(|r| round_box_status(r, true, start + offset) == RoundBoxStatus::Active)
                .count();
            assert_eq!(active, 1, "offset {}", offset);
        }
    }

    #[test]
    fn cancelled_instance_has_no_active_rounds() {
        let mut instance = instance();
        instance.status = InstanceStatus::Cancelled;
        let opens = instance.round(1).unwrap().opens_at;
        assert_eq!(instance.round_status(1, true, opens), Some(RoundBoxStatus::Completed));
        assert_eq!(instance.round_status(9, true, opens), None);
        assert_eq!(entry_box_status(&instance, false, opens), EntryBoxStatus::Closed);
    }

    #[test]
    fn preview_reports_all_boxes() {
        let instance = instance();
        let now = instance.starts_at() + 1_000;
        let preview = preview(&instance, [true, false], now);

        assert_eq!(preview.instance_id, 7);
        assert_eq!(preview.entry, [EntryBoxStatus::Paid, EntryBoxStatus::Closed]);
        let statuses: Vec<RoundBoxStatus> = preview.rounds.iter().map(|r| r.status).collect();
        assert_eq!(
            statuses,
            vec![
                RoundBoxStatus::Completed,
                RoundBoxStatus::Active,
                RoundBoxStatus::Upcoming,
                RoundBoxStatus::Upcoming,
            ]
        );
    }
}

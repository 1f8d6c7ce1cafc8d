use anchor_lang::prelude::*;
use anchor_lang::solana_program::hash::hashv;

use crate::constants::*;
use crate::errors::AuctionError;
use crate::state::{AuctionInstance, RoundBoxStatus};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bid {
    pub round_number: u8,
    pub user_id: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}

impl Bid {
    pub const LEN: usize = 1 + 32 + 8 + 8;
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub round_number: u8,
    pub username: Pubkey,
    pub bid: u64,
    pub timestamp: i64,
}

/// Bids of one round of one auction instance.
#[account]
pub struct RoundLedger {
    pub day_book: Pubkey,
    pub instance_id: u64,
    pub round_number: u8,
    pub current_bid: u64,                // leading amount, not the latest one
    pub current_bidder: Option<Pubkey>,
    pub payer: Pubkey,                   // first bidder, refunded the rent on close
    pub bids: Vec<Bid>,
    pub bump: u8,
}

impl RoundLedger {
    pub const LEN: usize = 32      // day_book
        + 8                        // instance_id
        + 1                        // round_number
        + 8                        // current_bid
        + 1 + 32                   // current_bidder
        + 32                       // payer
        + 4 + Bid::LEN * MAX_BIDS_PER_ROUND // bids
        + 1;                       // bump

    pub fn is_fresh(&self) -> bool {
        self.day_book == Pubkey::default()
    }

    /// Binds a freshly created ledger to its round and rent payer.
    pub fn open(
        &mut self,
        day_book: Pubkey,
        instance_id: u64,
        round_number: u8,
        payer: Pubkey,
        bump: u8,
    ) {
        self.day_book = day_book;
        self.instance_id = instance_id;
        self.round_number = round_number;
        self.payer = payer;
        self.bump = bump;
    }

    pub fn bid_of(&self, user_id: &Pubkey) -> Option<&Bid> {
        self.bids.iter().find(|b| b.user_id == *user_id)
    }

    pub fn leaderboard(&self) -> Vec<LeaderboardEntry> {
        rank(&self.bids)
    }

    pub fn receipt(&self, bid: Bid) -> BidReceipt {
        let ranked = rank(&self.bids);
        let position = ranked
            .iter()
            .position(|entry| entry.username == bid.user_id)
            .unwrap_or(self.bids.len());
        BidReceipt {
            bid,
            rank: (position + 1) as u16,
            bid_count: self.bids.len() as u16,
            leading_bid: self.current_bid,
            leading_bidder: self.current_bidder,
            leaderboard: leaderboard_head(ranked),
        }
    }

    fn record(&mut self, bid: Bid) -> Result<()> {
        require!(self.bids.len() < MAX_BIDS_PER_ROUND, AuctionError::LedgerFull);
        self.bids.push(bid);
        if let Some(leader) = rank(&self.bids).first() {
            self.current_bid = leader.bid;
            self.current_bidder = Some(leader.username);
        }
        Ok(())
    }
}

/// Return data of `place_bid`: the accepted bid, where it stands, and the
/// head of the updated leaderboard.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct BidReceipt {
    pub bid: Bid,
    /// 1-based position on the full leaderboard
    pub rank: u16,
    pub bid_count: u16,
    pub leading_bid: u64,
    pub leading_bidder: Option<Pubkey>,
    pub leaderboard: Vec<LeaderboardEntry>,
}

/// Top of a leaderboard, cut to what fits in instruction return data.
/// Events carry the full ranking.
pub fn leaderboard_head(mut entries: Vec<LeaderboardEntry>) -> Vec<LeaderboardEntry> {
    entries.truncate(MAX_LEADERBOARD_ENTRIES);
    entries
}

/// Highest bid first; equal bids keep the earlier timestamp first.
pub fn rank(bids: &[Bid]) -> Vec<LeaderboardEntry> {
    let mut entries: Vec<LeaderboardEntry> = bids
        .iter()
        .map(|b| LeaderboardEntry {
            round_number: b.round_number,
            username: b.user_id,
            bid: b.amount,
            timestamp: b.timestamp,
        })
        .collect();
    entries.sort_by(|a, b| b.bid.cmp(&a.bid).then(a.timestamp.cmp(&b.timestamp)));
    entries
}

/// Placeholder rankings for an empty completed round. Only used when the
/// master configuration runs with `demo_leaderboards`.
pub fn demo_leaderboard(instance_id: u64, round_number: u8, closes_at: i64) -> Vec<LeaderboardEntry> {
    (0..DEMO_LEADERBOARD_SIZE)
        .map(|i| {
            let seed = hashv(&[
                b"demo_bidder",
                &instance_id.to_le_bytes(),
                &[round_number, i as u8],
            ]);
            LeaderboardEntry {
                round_number,
                username: Pubkey::new_from_array(seed.to_bytes()),
                bid: 1_000 * (DEMO_LEADERBOARD_SIZE - i) as u64,
                timestamp: closes_at - 60 * (DEMO_LEADERBOARD_SIZE - i) as i64,
            }
        })
        .collect()
}

/// A finished round's leaderboard, and whether it was synthesised.
pub fn final_leaderboard(
    ledger: Option<&RoundLedger>,
    demo: bool,
    instance_id: u64,
    round_number: u8,
    closes_at: i64,
) -> (Vec<LeaderboardEntry>, bool) {
    let entries = ledger.map(RoundLedger::leaderboard).unwrap_or_default();
    if entries.is_empty() && demo {
        return (demo_leaderboard(instance_id, round_number, closes_at), true);
    }
    (entries, false)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BidRequest {
    pub round_number: u8,
    pub user_id: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}

/// Validates a bid against the round rules and records it.
///
/// `previous` is the user's round `r - 1` ledger, if that round saw any bids.
/// On success every later round's `min_bid` is raised above the accepted amount.
pub fn admit_bid(
    instance: &mut AuctionInstance,
    ledger: &mut RoundLedger,
    previous: Option<&RoundLedger>,
    has_paid_entry: bool,
    max_bid: u64,
    request: BidRequest,
) -> Result<Bid> {
    let BidRequest {
        round_number,
        user_id,
        amount,
        timestamp,
    } = request;

    require!(ledger.round_number == round_number, AuctionError::InvalidRound);
    let status = instance
        .round_status(round_number, has_paid_entry, timestamp)
        .ok_or(AuctionError::InvalidRound)?;
    require!(status == RoundBoxStatus::Active, AuctionError::RoundNotActive);
    require!(has_paid_entry, AuctionError::EntryNotPaid);
    require!(ledger.bid_of(&user_id).is_none(), AuctionError::DuplicateBid);

    if round_number > 1 {
        if let Some(prior) = previous.and_then(|p| p.bid_of(&user_id)) {
            require!(amount > prior.amount, AuctionError::BidNotIncreasing);
        }
    }

    let min_bid = instance
        .round(round_number)
        .map(|r| r.min_bid)
        .ok_or(AuctionError::InvalidRound)?;
    require!(
        amount >= min_bid && amount <= max_bid,
        AuctionError::BidOutOfRange
    );

    let bid = Bid {
        round_number,
        user_id,
        amount,
        timestamp,
    };
    ledger.record(bid)?;
    instance.raise_floors_after(round_number, amount)?;
    Ok(bid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::fixtures::{encoded_len, master_config};
    use crate::state::{DayBook, InstanceStatus};

    const DATE: i64 = 20_300;
    const MAX_BID: u64 = 100_000;

    fn instance() -> AuctionInstance {
        let config = master_config(1);
        let mut book = DayBook {
            master_config: Pubkey::new_unique(),
            date: Some(DATE),
            next_instance_id: 1,
            instances: vec![],
            bump: 1,
        };
        book.push_instance(&config, &config.slots[0], DATE, InstanceStatus::Live)
            .unwrap();
        book.instances.remove(0)
    }

    fn ledger(round_number: u8) -> RoundLedger {
        RoundLedger {
            day_book: Pubkey::new_unique(),
            instance_id: 1,
            round_number,
            current_bid: 0,
            current_bidder: None,
            payer: Pubkey::default(),
            bids: vec![],
            bump: 1,
        }
    }

    fn during(instance: &AuctionInstance, round_number: u8) -> i64 {
        instance.round(round_number).unwrap().opens_at + 30
    }

    fn bid(
        instance: &mut AuctionInstance,
        ledger: &mut RoundLedger,
        previous: Option<&RoundLedger>,
        user_id: Pubkey,
        amount: u64,
        timestamp: i64,
    ) -> Result<Bid> {
        let request = BidRequest {
            round_number: ledger.round_number,
            user_id,
            amount,
            timestamp,
        };
        admit_bid(instance, ledger, previous, true, MAX_BID, request)
    }

    #[test]
    fn bids_must_increase_across_rounds() {
        let mut instance = instance();
        let mut round_1 = ledger(1);
        let mut round_2 = ledger(2);
        let user = Pubkey::new_unique();
        let t1 = during(&instance, 1);
        let t2 = during(&instance, 2);

        bid(&mut instance, &mut round_1, None, user, 500, t1).unwrap();

        assert_eq!(
            bid(&mut instance, &mut round_2, Some(&round_1), user, 500, t2).unwrap_err(),
            AuctionError::BidNotIncreasing.into()
        );
        bid(&mut instance, &mut round_2, Some(&round_1), user, 600, t2).unwrap();

        assert!(instance.round(3).unwrap().min_bid >= 601);
        assert!(instance.round(4).unwrap().min_bid >= 601);
    }

    #[test]
    fn one_bid_per_user_per_round() {
        let mut instance = instance();
        let mut round_1 = ledger(1);
        let user = Pubkey::new_unique();
        let t = during(&instance, 1);

        bid(&mut instance, &mut round_1, None, user, 500, t).unwrap();
        assert_eq!(
            bid(&mut instance, &mut round_1, None, user, 900, t + 1).unwrap_err(),
            AuctionError::DuplicateBid.into()
        );
        assert_eq!(round_1.bids.len(), 1);
    }

    #[test]
    fn rejects_outside_round_window() {
        let mut instance = instance();
        let mut round_2 = ledger(2);
        let user = Pubkey::new_unique();
        let round = *instance.round(2).unwrap();

        for t in [round.opens_at - 1, round.closes_at] {
            assert_eq!(
                bid(&mut instance, &mut round_2, None, user, 500, t).unwrap_err(),
                AuctionError::RoundNotActive.into()
            );
        }
        assert!(round_2.bids.is_empty());
    }

    #[test]
    fn rejects_out_of_range_amounts() {
        let mut instance = instance();
        let mut round_1 = ledger(1);
        let mut round_2 = ledger(2);
        let t1 = during(&instance, 1);
        let t2 = during(&instance, 2);

        assert_eq!(
            bid(&mut instance, &mut round_1, None, Pubkey::new_unique(), MAX_BID + 1, t1)
                .unwrap_err(),
            AuctionError::BidOutOfRange.into()
        );
        bid(&mut instance, &mut round_1, None, Pubkey::new_unique(), 800, t1).unwrap();

        // floor propagated from another user's round-1 bid
        assert_eq!(
            bid(&mut instance, &mut round_2, None, Pubkey::new_unique(), 800, t2).unwrap_err(),
            AuctionError::BidOutOfRange.into()
        );
    }

    #[test]
    fn requires_paid_entry() {
        let mut instance = instance();
        let mut round_1 = ledger(1);
        let request = BidRequest {
            round_number: 1,
            user_id: Pubkey::new_unique(),
            amount: 10,
            timestamp: during(&instance, 1),
        };
        assert_eq!(
            admit_bid(&mut instance, &mut round_1, None, false, MAX_BID, request).unwrap_err(),
            AuctionError::EntryNotPaid.into()
        );
    }

    #[test]
    fn unknown_round_is_invalid() {
        let mut instance = instance();
        let mut round_5 = ledger(5);
        let t = during(&instance, 1);
        assert_eq!(
            bid(&mut instance, &mut round_5, None, Pubkey::new_unique(), 10, t).unwrap_err(),
            AuctionError::InvalidRound.into()
        );
    }

    #[test]
    fn equal_bids_rank_by_timestamp() {
        let mut instance = instance();
        let mut round_1 = ledger(1);
        let early = Pubkey::new_unique();
        let late = Pubkey::new_unique();
        let t = during(&instance, 1);

        // recorded out of timestamp order
        bid(&mut instance, &mut round_1, None, late, 1_000, t + 5).unwrap();
        bid(&mut instance, &mut round_1, None, early, 1_000, t + 1).unwrap();
        bid(&mut instance, &mut round_1, None, Pubkey::new_unique(), 400, t).unwrap();

        let board = round_1.leaderboard();
        assert_eq!(board[0].username, early);
        assert_eq!(board[1].username, late);
        assert_eq!(board[2].bid, 400);
        assert!(board.windows(2).all(|w| w[0].bid >= w[1].bid));
    }

    #[test]
    fn current_bid_tracks_leader_not_latest() {
        let mut instance = instance();
        let mut round_1 = ledger(1);
        let leader = Pubkey::new_unique();
        let t = during(&instance, 1);

        bid(&mut instance, &mut round_1, None, leader, 2_000, t).unwrap();
        bid(&mut instance, &mut round_1, None, Pubkey::new_unique(), 1_500, t + 1).unwrap();

        assert_eq!(round_1.current_bid, 2_000);
        assert_eq!(round_1.current_bidder, Some(leader));
    }

    #[test]
    fn receipt_reports_rank_and_leader() {
        let mut instance = instance();
        let mut round_1 = ledger(1);
        let leader = Pubkey::new_unique();
        let t = during(&instance, 1);

        let first = bid(&mut instance, &mut round_1, None, leader, 2_000, t).unwrap();
        let second =
            bid(&mut instance, &mut round_1, None, Pubkey::new_unique(), 1_500, t + 1).unwrap();

        let receipt = round_1.receipt(second);
        assert_eq!(receipt.bid, second);
        assert_eq!(receipt.rank, 2);
        assert_eq!(receipt.bid_count, 2);
        assert_eq!(receipt.leading_bid, 2_000);
        assert_eq!(receipt.leading_bidder, Some(leader));
        assert_eq!(receipt.leaderboard, round_1.leaderboard());
        assert_eq!(round_1.receipt(first).rank, 1);
    }

    #[test]
    fn full_round_return_data_fits() {
        let mut instance = instance();
        let mut round_1 = ledger(1);
        let t = during(&instance, 1);
        let mut last = None;
        for i in 0..MAX_BIDS_PER_ROUND as u64 {
            last = Some(
                bid(&mut instance, &mut round_1, None, Pubkey::new_unique(), 10 + i, t).unwrap(),
            );
        }

        let full = round_1.leaderboard();
        assert_eq!(full.len(), MAX_BIDS_PER_ROUND);
        assert!(encoded_len(&full) > MAX_RETURN_DATA);

        let head = leaderboard_head(full.clone());
        assert_eq!(head.len(), MAX_LEADERBOARD_ENTRIES);
        assert_eq!(head[..], full[..MAX_LEADERBOARD_ENTRIES]);
        assert!(encoded_len(&head) <= MAX_RETURN_DATA);

        let receipt = round_1.receipt(last.unwrap());
        assert_eq!(receipt.rank, 1);
        assert_eq!(usize::from(receipt.bid_count), MAX_BIDS_PER_ROUND);
        assert_eq!(receipt.leaderboard, head);
        assert!(encoded_len(&receipt) <= MAX_RETURN_DATA);
    }

    #[test]
    fn open_records_rent_payer() {
        let mut round = ledger(0);
        round.day_book = Pubkey::default();
        assert!(round.is_fresh());

        let day_book = Pubkey::new_unique();
        let bidder = Pubkey::new_unique();
        round.open(day_book, 9, 3, bidder, 251);

        assert!(!round.is_fresh());
        assert_eq!(round.payer, bidder);
        assert_eq!(round.day_book, day_book);
        assert_eq!((round.instance_id, round.round_number, round.bump), (9, 3, 251));
    }

    #[test]
    fn full_ledger_rejects_bids() {
        let mut instance = instance();
        let mut round_1 = ledger(1);
        let t = during(&instance, 1);
        for i in 0..MAX_BIDS_PER_ROUND as u64 {
            bid(&mut instance, &mut round_1, None, Pubkey::new_unique(), 10 + i, t).unwrap();
        }
        assert_eq!(
            bid(&mut instance, &mut round_1, None, Pubkey::new_unique(), 5_000, t).unwrap_err(),
            AuctionError::LedgerFull.into()
        );
    }

    #[test]
    fn empty_round_stays_empty_unless_demo() {
        let (entries, synthetic) = final_leaderboard(None, false, 3, 2, 1_000);
        assert!(entries.is_empty());
        assert!(!synthetic);

        let (entries, synthetic) = final_leaderboard(Some(&ledger(2)), true, 3, 2, 1_000);
        assert!(synthetic);
        assert_eq!(entries.len(), DEMO_LEADERBOARD_SIZE);
        assert_eq!(entries, rank_entries(&entries));
        assert_eq!(entries, demo_leaderboard(3, 2, 1_000));
    }

    fn rank_entries(entries: &[LeaderboardEntry]) -> Vec<LeaderboardEntry> {
        let bids: Vec<Bid> = entries
            .iter()
            .map(|e| Bid {
                round_number: e.round_number,
                user_id: e.username,
                amount: e.bid,
                timestamp: e.timestamp,
            })
            .collect();
        rank(&bids)
    }
}

//! Entry fee derivation for the two entry boxes of an instance.

use anchor_lang::prelude::*;
use anchor_lang::solana_program::hash::hashv;

use crate::constants::*;
use crate::errors::AuctionError;
use crate::state::{FeeMode, SlotConfig};

/// Per-instance entry fees: the total and the `[box_a, box_b]` split.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntryFees {
    pub total: u64,
    pub boxes: [u64; ENTRY_BOX_COUNT],
}

/// Seeded by (config, date, auction number) so that re-initialising a day
/// reproduces the same fees.
fn draw(master_config: &Pubkey, date: i64, auction_number: u16) -> (u64, u64) {
    let hash = hashv(&[
        b"entry_fee",
        master_config.as_ref(),
        &date.to_le_bytes(),
        &auction_number.to_le_bytes(),
    ])
    .to_bytes();
    let mut first = [0u8; 8];
    let mut second = [0u8; 8];
    first.copy_from_slice(&hash[..8]);
    second.copy_from_slice(&hash[8..16]);
    (u64::from_le_bytes(first), u64::from_le_bytes(second))
}

/// Box A gets `floor(total * box_a_bps / 10_000)`, box B the remainder.
pub fn split_total(total: u64, box_a_bps: u64) -> Result<[u64; ENTRY_BOX_COUNT]> {
    require!(box_a_bps <= BPS_DENOMINATOR, AuctionError::MathError);
    let box_a = (total as u128)
        .checked_mul(u128::from(box_a_bps))
        .ok_or(AuctionError::MathError)?
        / u128::from(BPS_DENOMINATOR);
    let box_a = u64::try_from(box_a).map_err(|_| error!(AuctionError::MathError))?;
    let box_b = total.checked_sub(box_a).ok_or(AuctionError::MathError)?;
    Ok([box_a, box_b])
}

pub fn entry_fees(master_config: &Pubkey, date: i64, slot: &SlotConfig) -> Result<EntryFees> {
    match slot.fee_mode {
        FeeMode::Random => {
            let min = slot.min_entry_fee.ok_or(AuctionError::ValidationError)?;
            let max = slot.max_entry_fee.ok_or(AuctionError::ValidationError)?;
            require!(min <= max, AuctionError::ValidationError);

            let (fee_draw, split_draw) = draw(master_config, date, slot.auction_number);
            let span = u128::from(max - min) + 1;
            let total = min + (u128::from(fee_draw) % span) as u64;
            let bps_span = RANDOM_SPLIT_MAX_BPS - RANDOM_SPLIT_MIN_BPS + 1;
            let box_a_bps = RANDOM_SPLIT_MIN_BPS + split_draw % bps_span;
            Ok(EntryFees {
                total,
                boxes: split_total(total, box_a_bps)?,
            })
        }
        FeeMode::Manual => {
            let split = slot.fee_split.ok_or(AuctionError::ValidationError)?;
            let total = split.total().ok_or(AuctionError::MathError)?;
            Ok(EntryFees {
                total,
                boxes: [split.box_a, split.box_b],
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::fixtures::random_slot;
    use crate::state::FeeSplit;

    #[test]
    fn random_split_sums_to_total_within_bounds() {
        let config = Pubkey::new_unique();
        for date in 19_000..19_200 {
            let fees = entry_fees(&config, date, &random_slot(1, 9)).unwrap();
            let [box_a, box_b] = fees.boxes;
            assert_eq!(box_a + box_b, fees.total);
            assert!((1_000..=5_000).contains(&fees.total));
            assert!(box_a >= fees.total * 3_000 / 10_000);
            assert!(box_a <= fees.total * 7_000 / 10_000);
        }
    }

    #[test]
    fn random_draw_is_deterministic() {
        let config = Pubkey::new_unique();
        let slot = random_slot(2, 10);
        assert_eq!(
            entry_fees(&config, 19_500, &slot).unwrap(),
            entry_fees(&config, 19_500, &slot).unwrap()
        );
    }

    #[test]
    fn fixed_random_range_yields_fixed_total() {
        let mut slot = random_slot(1, 9);
        slot.min_entry_fee = Some(777);
        slot.max_entry_fee = Some(777);
        let fees = entry_fees(&Pubkey::new_unique(), 1, &slot).unwrap();
        assert_eq!(fees.total, 777);
    }

    #[test]
    fn split_floors_box_a() {
        assert_eq!(split_total(999, 3_000).unwrap(), [299, 700]);
        assert_eq!(split_total(0, 5_000).unwrap(), [0, 0]);
    }

    #[test]
    fn manual_mode_uses_configured_split() {
        let mut slot = random_slot(1, 9);
        slot.fee_mode = FeeMode::Manual;
        slot.fee_split = Some(FeeSplit { box_a: 250, box_b: 750 });
        let fees = entry_fees(&Pubkey::new_unique(), 1, &slot).unwrap();
        assert_eq!(fees.total, 1_000);
        assert_eq!(fees.boxes, [250, 750]);
    }
}

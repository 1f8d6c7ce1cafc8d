use anchor_lang::prelude::*;

use crate::constants::ENTRY_BOX_COUNT;
use crate::errors::AuctionError;

/// Entry payments of one participant for one auction instance.
#[account]
pub struct Participation {
    pub day_book: Pubkey,
    pub instance_id: u64,
    pub participant: Pubkey,
    pub paid: [bool; ENTRY_BOX_COUNT],
    pub bump: u8,
}

impl Participation {
    pub const LEN: usize = 32 + 8 + 32 + ENTRY_BOX_COUNT + 1;

    pub fn is_fresh(&self) -> bool {
        self.day_book == Pubkey::default()
    }

    pub fn has_paid_entry(&self) -> bool {
        self.paid.iter().all(|p| *p)
    }

    pub fn mark_paid(&mut self, box_id: u8) -> Result<()> {
        let slot = self
            .paid
            .get_mut(usize::from(box_id))
            .ok_or(AuctionError::NotFound)?;
        require!(!*slot, AuctionError::EntryAlreadyPaid);
        *slot = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_needs_both_boxes() {
        let mut participation = Participation {
            day_book: Pubkey::new_unique(),
            instance_id: 1,
            participant: Pubkey::new_unique(),
            paid: [false; ENTRY_BOX_COUNT],
            bump: 1,
        };
        participation.mark_paid(1).unwrap();
        assert!(!participation.has_paid_entry());
        participation.mark_paid(0).unwrap();
        assert!(participation.has_paid_entry());

        assert_eq!(
            participation.mark_paid(0).unwrap_err(),
            AuctionError::EntryAlreadyPaid.into()
        );
        assert_eq!(participation.mark_paid(2).unwrap_err(), AuctionError::NotFound.into());
    }
}

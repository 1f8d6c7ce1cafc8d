use anchor_lang::prelude::*;

#[error_code]
pub enum AuctionError {
    #[msg("Master configuration or auction instance not found")]
    NotFound,
    #[msg("Auction day already initialized")]
    AlreadyInitialized,
    #[msg("Auction configuration failed validation")]
    ValidationError,
    #[msg("User already placed a bid in this round")]
    DuplicateBid,
    #[msg("Bid must exceed the user's bid in the previous round")]
    BidNotIncreasing,
    #[msg("Bid is outside the allowed range for this round")]
    BidOutOfRange,
    #[msg("Round is not accepting bids")]
    RoundNotActive,
    #[msg("Scheduler has not been initialized")]
    SchedulerNotInitialized,
    #[msg("Invalid authority for this operation")]
    InvalidAuthority,
    #[msg("Round does not exist for this auction")]
    InvalidRound,
    #[msg("Entry box is not open")]
    EntryBoxClosed,
    #[msg("Entry box already paid")]
    EntryAlreadyPaid,
    #[msg("Entry fee has not been paid for this auction")]
    EntryNotPaid,
    #[msg("Round ledger has no room for more bids")]
    LedgerFull,
    #[msg("Auction status transition not allowed")]
    InvalidTransition,
    #[msg("Auction instance is still open")]
    InstanceStillOpen,
    #[msg("Math overflow/underflow error")]
    MathError,
}

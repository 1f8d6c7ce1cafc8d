pub const MASTER_CONFIG_SEED: &[u8] = b"master_config";
pub const DAY_BOOK_SEED: &[u8] = b"day_book";
pub const SCHEDULER_SEED: &[u8] = b"scheduler";
pub const ROUND_LEDGER_SEED: &[u8] = b"round_ledger";
pub const PARTICIPATION_SEED: &[u8] = b"participation";

pub const SECONDS_PER_MINUTE: i64 = 60;
pub const SECONDS_PER_HOUR: i64 = 3_600;
pub const SECONDS_PER_DAY: i64 = 86_400;
pub const LAST_HOUR_OF_DAY: u8 = 23;
pub const MINUTES_PER_SLOT: u32 = 60;

pub const MAX_SLOTS: usize = 24;
pub const MAX_ROUNDS: usize = 4;
pub const DEFAULT_ROUND_COUNT: u8 = 4;
pub const ENTRY_BOX_COUNT: usize = 2;
pub const MAX_AUCTION_NAME_LEN: usize = 32;
pub const MAX_BIDS_PER_ROUND: usize = 64;
/// Solana's cap on instruction return data, in bytes
pub const MAX_RETURN_DATA: usize = 1_024;
/// Leaderboard entries returned by an instruction; 4 + 16 * 49 bytes
pub const MAX_LEADERBOARD_ENTRIES: usize = 16;
/// Reset + Init + one Progress trigger per slot hour
pub const MAX_TRIGGERS: usize = 2 + MAX_SLOTS;

pub const DEFAULT_DAY_START_HOUR: u8 = 9;
pub const DEFAULT_WINDOW_SIZE: u8 = 3;
pub const DEFAULT_ROUND_DURATION_MINUTES: u16 = 15;
pub const DEFAULT_ENTRY_LEAD_MINUTES: u16 = 10;
pub const DEFAULT_MIN_BID: u64 = 1;
pub const MAX_ENTRY_LEAD_MINUTES: u16 = 60;

pub const BPS_DENOMINATOR: u64 = 10_000;
pub const RANDOM_SPLIT_MIN_BPS: u64 = 3_000;
pub const RANDOM_SPLIT_MAX_BPS: u64 = 7_000;

pub const DEMO_LEADERBOARD_SIZE: usize = 5;

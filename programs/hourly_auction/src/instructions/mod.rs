pub mod cancel_instance;
pub mod close_accounts;
pub mod create_master_config;
pub mod current_auctions;
pub mod initialize_scheduler;
pub mod leaderboard;
pub mod manual_trigger;
pub mod place_bid;
pub mod preview_boxes;
pub mod record_entry_payment;
pub mod scheduler_control;
pub mod tick;
pub mod update_master_config;

pub use cancel_instance::*;
pub use close_accounts::*;
pub use create_master_config::*;
pub use current_auctions::*;
pub use initialize_scheduler::*;
pub use leaderboard::*;
pub use manual_trigger::*;
pub use place_bid::*;
pub use preview_boxes::*;
pub use record_entry_payment::*;
pub use scheduler_control::*;
pub use tick::*;
pub use update_master_config::*;

use anchor_lang::prelude::*;
use anchor_lang::{AccountDeserialize, Owner};

/// Reads a program account that may not have been created yet.
pub(crate) fn load_optional<T: AccountDeserialize + Owner>(
    info: &AccountInfo,
) -> Result<Option<T>> {
    if info.data_is_empty() {
        return Ok(None);
    }
    require_keys_eq!(
        *info.owner,
        T::owner(),
        anchor_lang::error::ErrorCode::AccountOwnedByWrongProgram
    );
    let data = info.try_borrow_data()?;
    Ok(Some(T::try_deserialize(&mut &data[..])?))
}

pub mod box_state;
pub mod clock_driver;
pub mod day_book;
pub mod manager;
pub mod master_config;
pub mod participation;
pub mod round_ledger;
pub mod scheduler;

pub use box_state::*;
pub use clock_driver::*;
pub use day_book::*;
pub use manager::*;
pub use master_config::*;
pub use participation::*;
pub use round_ledger::*;
pub use scheduler::*;

#[cfg(test)]
pub(crate) use master_config::fixtures;

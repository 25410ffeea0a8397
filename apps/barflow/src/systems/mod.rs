//! Day-level systems owned by the flow: the day cycle, the deferred decision
//! queue, and the built-in books.

pub mod day_cycle;
pub mod decision_queue;
pub mod economy;
pub mod inn;
pub mod ledger;
pub mod reputation;

pub use day_cycle::{DayCycle, DayState};
pub use decision_queue::{DecisionQueue, QueueChange, SleepResolution};
pub use economy::{income_multiplier, TavernEconomy};
pub use inn::InnStay;
pub use ledger::DailyLedger;
pub use reputation::ReputationBook;

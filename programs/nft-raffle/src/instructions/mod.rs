pub mod admin;
pub mod buy_ticket;
pub mod claim_prize;
pub mod create_raffle;
pub mod deposit_prize;
pub mod reveal_winner;
pub mod withdraw_funds;

pub use admin::*;
pub use buy_ticket::*;
pub use claim_prize::*;
pub use create_raffle::*;
pub use deposit_prize::*;
pub use reveal_winner::*;
pub use withdraw_funds::*;

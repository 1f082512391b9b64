// levtrade-core: leveraged trading simulation engine.
// settlement-first architecture: trigger evaluation and fixed-point pnl take priority.
// all computation is deterministic with no external I/O.
//
// file map (search X.0 for structs, X.1+ for logic):
//   1.x  types.rs: primitives: AccountId, TradeId, Side, Price, Quote, Pnl, Leverage
//   2.x  math.rs: 10^18 fixed-point arithmetic, full-width intermediates
//   3.x  account.rs: registry: virtual balances, registration stake
//   4.x  trade.rs: position ledger: one open trade per account, monotonic ids
//   5.x  settlement.rs: TP/SL trigger evaluation, manual-close override, pnl
//   6.x  access.rs: administrator and price-authority roles
//   7.x  events.rs: state transition events for audit
//   8.x  engine/: core engine: registration, trading, resolution

// core trading modules
pub mod account;
pub mod engine;
pub mod events;
pub mod math;
pub mod settlement;
pub mod trade;
pub mod types;

// roles
pub mod access;

// re exports for convenience
pub use access::*;
pub use account::*;
pub use engine::*;
pub use events::*;
pub use math::{MathError, SCALE};
pub use settlement::*;
pub use trade::*;
pub use types::*;

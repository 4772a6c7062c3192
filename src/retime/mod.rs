//! Split bookkeeping and retime aggregation.
//!
//! A [`SplitLedger`] records the segments a verifier marks while scrubbing
//! through a run; [`RetimeCalculator`] checks them and produces the in-game
//! time (sum of segment lengths plus any extra time) and the real-time span
//! from first start to last end. [`ModNote`] formats the result.
//!
//! ```rust
//! use splitframe::{RetimeCalculator, SplitLedger, TimeQuantizer};
//!
//! let quantizer = TimeQuantizer::new(60);
//! let mut ledger = SplitLedger::new();
//! ledger.mark_start(0.0, &quantizer);
//! ledger.mark_end(2.0, &quantizer);
//! ledger.insert_after_current();
//! ledger.mark_start(2.0, &quantizer);
//! ledger.mark_end(5.0, &quantizer);
//!
//! let retime = RetimeCalculator::new(60).calculate(ledger.splits(), 0.0).retime().unwrap();
//! assert_eq!((retime.igt, retime.rta), (5.0, 5.0));
//! ```

mod calculator;
mod ledger;
mod mod_note;

pub use calculator::RetimeCalculator;
pub use ledger::SplitLedger;
pub use mod_note::ModNote;

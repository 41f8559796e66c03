//! Calendar grid layout engine.
//! Classification, span and overlap math, and banner-track reconciliation
//! organized across focused submodules; `assembler` ties them together.

pub mod assembler;
pub mod classifier;
pub mod overlap;
pub mod reconciler;
pub mod span;
pub mod time_of_day;

pub use assembler::GridAssembler;
pub use classifier::{classify, ClassifiedDay};
pub use overlap::{stack_overlaps, DayInterval};
pub use reconciler::{reconcile_week, ReconcileContext, Transition};
pub use span::{compute_span, span_in_week};
pub use time_of_day::time_buckets;

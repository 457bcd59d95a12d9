//! Filesystem operations: collision-safe moves and directory scans.

mod atomic;
mod batch;
mod copy;
mod duplicate;
mod helpers;
mod safe_move;
mod scan;

pub use batch::{move_batch, CollisionPolicy, ItemOutcome, MoveReport};
pub use duplicate::disambiguate;
pub use safe_move::safe_move;
pub use scan::{list_candidates, published_names};

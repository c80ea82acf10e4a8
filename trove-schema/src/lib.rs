//! Trade records in the two competing modeling styles, plus the mock records used to
//! check that documents survive a store round trip unchanged.
//!
//! - [`deep`]: legs nested as embedded documents inside the swap.
//! - [`wide`]: leg attributes flattened onto the trade as numbered fields.
//! - [`mocks`]: plain records covering inherited, derived and nested fields.

pub mod deep;
pub mod mocks;
pub mod wide;

pub use deep::*;
pub use mocks::*;
pub use wide::*;

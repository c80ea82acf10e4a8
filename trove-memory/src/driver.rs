use crate::MemoryConnection;
use trove_core::Driver;

/// Driver of the in-process document store, connection URLs look like `memory://namespace`.
#[derive(Default, Debug, Clone, Copy)]
pub struct MemoryDriver {}

impl MemoryDriver {
    pub const fn new() -> Self {
        Self {}
    }
}

impl Driver for MemoryDriver {
    type Connection = MemoryConnection;

    const NAME: &'static str = "memory";
}

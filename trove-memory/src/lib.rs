mod connection;
mod driver;
mod store;

pub use connection::*;
pub use driver::*;

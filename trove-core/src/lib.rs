mod as_value;
mod command;
mod connection;
mod decode_type;
mod document;
mod driver;
mod executor;
mod field;
mod filter;
mod schema;
mod util;
mod value;
mod writer;

pub use ::anyhow::Context;
pub use as_value::*;
pub use command::*;
pub use connection::*;
pub use decode_type::*;
pub use document::*;
pub use driver::*;
pub use executor::*;
pub use field::*;
pub use filter::*;
pub use schema::*;
pub use util::*;
pub use value::*;
pub use writer::*;
pub mod stream {
    pub use ::futures::stream::*;
}
pub use ::futures::future;

pub type Result<T> = anyhow::Result<T>;
pub type Error = anyhow::Error;

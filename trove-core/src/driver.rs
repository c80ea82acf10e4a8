use crate::{Connection, Result};
use std::{borrow::Cow, future::Future};

pub trait Driver: Send + Sync {
    type Connection: Connection<Driver = Self>;

    /// URL scheme identifying the driver.
    const NAME: &'static str;

    fn connect(
        &self,
        url: Cow<'static, str>,
    ) -> impl Future<Output = Result<Self::Connection>> + Send {
        Self::Connection::connect(url)
    }

    /// Connection URL of the given namespace.
    fn url_for(&self, namespace: &str) -> String {
        format!("{}://{}", Self::NAME, urlencoding::encode(namespace))
    }
}

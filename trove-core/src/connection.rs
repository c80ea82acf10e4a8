use crate::{Command, Executor, Result};
use futures::TryFutureExt;
use std::{borrow::Cow, future::Future};

pub trait Connection: Executor {
    /// Open a connection to the namespace named by the URL.
    ///
    /// Connecting more than once to the same namespace gives handles over the same data.
    fn connect(url: Cow<'static, str>) -> impl Future<Output = Result<Self>> + Send;

    /// Name of the connected namespace.
    fn namespace(&self) -> &str;

    /// Drop every collection of the namespace, succeeds on an empty namespace.
    fn drop_namespace(&mut self) -> impl Future<Output = Result<()>> + Send {
        self.execute(Command::DropNamespace).map_ok(|_| ())
    }
}

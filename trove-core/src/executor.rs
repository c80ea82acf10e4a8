use crate::{
    Command, CommandResult, DocumentsAffected, Driver, Result, StoredDocument,
    stream::{Stream, StreamExt, TryStreamExt},
};
use std::future::Future;

pub trait Executor: Send + Sized {
    type Driver: Driver;

    fn driver(&self) -> &Self::Driver;

    /// General method to send any command and return any result type (either documents or count)
    fn run(&mut self, command: Command) -> impl Stream<Item = Result<CommandResult>> + Send;

    /// Execute the command and return the documents.
    fn fetch(&mut self, command: Command) -> impl Stream<Item = Result<StoredDocument>> + Send {
        self.run(command).filter_map(|v| async move {
            match v {
                Ok(CommandResult::Document(v)) => Some(Ok(v)),
                Err(e) => Some(Err(e)),
                _ => None,
            }
        })
    }

    /// Execute the command and return the total number of documents affected.
    fn execute(&mut self, command: Command) -> impl Future<Output = Result<DocumentsAffected>> + Send {
        self.run(command)
            .filter_map(|v| async move {
                match v {
                    Ok(CommandResult::Affected(v)) => Some(Ok(v)),
                    Err(e) => Some(Err(e)),
                    _ => None,
                }
            })
            .try_collect()
    }
}

use derive_more::Display;
use thiserror::Error;

/// An error produced by a link
#[derive(Error, Debug, Display, PartialEq, Eq, Clone)]
#[display("{}", msg)]
pub struct LinkError {
    msg: String,
}

impl LinkError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}

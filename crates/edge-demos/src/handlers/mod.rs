//! Workers hosted by the gateway
//!
//! Each worker is an independent entry point; the gateway runs exactly one of
//! them, chosen at startup.

pub mod object_store;
pub mod read_modify_write;
pub mod container;
pub mod hello;

use std::fmt;
use std::str::FromStr;

use edge_demos_sdk::handler::HandlerFn;

/// A worker the gateway can host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Worker {
    /// PUT/GET/DELETE objects by URL path
    ObjectStore,
    /// Append-and-write-back demo against KV and bucket
    ReadModifyWrite,
    /// Forward everything to the singleton container
    Container,
    /// Static greeting
    Hello,
}

/// Error returned when a worker name is not recognized
#[derive(Debug, thiserror::Error)]
#[error("unknown worker: {0}")]
pub struct UnknownWorker(pub String);

impl Worker {
    pub const ALL: [Worker; 4] = [
        Worker::ObjectStore,
        Worker::ReadModifyWrite,
        Worker::Container,
        Worker::Hello,
    ];

    /// Name used in configuration and logs
    pub fn name(&self) -> &'static str {
        match self {
            Worker::ObjectStore => "object-store",
            Worker::ReadModifyWrite => "read-modify-write",
            Worker::Container => "container",
            Worker::Hello => "hello",
        }
    }

    /// Entry point invoked for every request
    pub fn handler(&self) -> HandlerFn {
        match self {
            Worker::ObjectStore => object_store::entry,
            Worker::ReadModifyWrite => read_modify_write::entry,
            Worker::Container => container::entry,
            Worker::Hello => hello::entry,
        }
    }
}

impl fmt::Display for Worker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Worker {
    type Err = UnknownWorker;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Worker::ALL
            .into_iter()
            .find(|w| w.name() == s)
            .ok_or_else(|| UnknownWorker(s.to_string()))
    }
}

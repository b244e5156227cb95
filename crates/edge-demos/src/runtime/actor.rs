//! Single-task services driven over a channel
//!
//! A service owns its state inside one spawned task and receives commands on
//! an mpsc channel, so commands run one at a time in arrival order. Callers
//! hold a [`ServiceHandle`] and get replies back on a oneshot channel.

use std::fmt;
use tokio::sync::{mpsc, oneshot};

use edge_demos_sdk::ServiceError;

/// Marker for command enums a service task accepts
pub trait ServiceCommand: Send + 'static {}

/// Sending side of a service task. Cheap to clone.
pub struct ServiceHandle<C: ServiceCommand> {
    name: &'static str,
    sender: mpsc::Sender<C>,
}

// Not derived: `C` itself need not be Clone
impl<C: ServiceCommand> Clone for ServiceHandle<C> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            sender: self.sender.clone(),
        }
    }
}

impl<C: ServiceCommand> ServiceHandle<C> {
    /// Queue a command without waiting for a reply
    pub async fn send(&self, cmd: C) -> Result<(), ServiceError> {
        self.sender
            .send(cmd)
            .await
            .map_err(|_| ServiceError::Unavailable(format!("{} actor closed", self.name)))
    }

    /// Queue the command built by `make` and wait for the reply it carries
    ///
    /// ```ignore
    /// let value = handle.request(|reply| KvCommand::Get { key, reply }).await?;
    /// ```
    pub async fn request<R, F>(&self, make: F) -> Result<R, ServiceError>
    where
        F: FnOnce(oneshot::Sender<R>) -> C,
    {
        let (reply, rx) = oneshot::channel();
        self.send(make(reply)).await?;
        rx.await
            .map_err(|_| ServiceError::Unavailable(format!("no response from {} actor", self.name)))
    }

    /// False once the task has dropped its receiver
    pub fn is_alive(&self) -> bool {
        !self.sender.is_closed()
    }
}

impl<C: ServiceCommand> fmt::Debug for ServiceHandle<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceHandle")
            .field("name", &self.name)
            .field("alive", &self.is_alive())
            .finish()
    }
}

/// Spawn `run` on the runtime with a channel of `capacity` commands
pub fn spawn_service<C, F, Fut>(name: &'static str, capacity: usize, run: F) -> ServiceHandle<C>
where
    C: ServiceCommand,
    F: FnOnce(mpsc::Receiver<C>) -> Fut,
    Fut: std::future::Future<Output = ()> + Send + 'static,
{
    let (sender, rx) = mpsc::channel(capacity);
    tokio::spawn(run(rx));
    ServiceHandle { name, sender }
}

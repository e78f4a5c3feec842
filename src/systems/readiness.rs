use std::fmt;
use std::time::Duration;

use futures_channel::oneshot;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadinessError {
    /// The dependency did not report ready within the allotted time.
    TimedOut {
        dependency: String,
        waited: Duration,
    },
    /// The notifier was dropped without ever signalling.
    Abandoned { dependency: String },
}

impl fmt::Display for ReadinessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadinessError::TimedOut { dependency, waited } => write!(
                f,
                "{dependency} was not ready after {} ms",
                waited.as_millis()
            ),
            ReadinessError::Abandoned { dependency } => {
                write!(f, "{dependency} went away before becoming ready")
            }
        }
    }
}

impl std::error::Error for ReadinessError {}

/// Held by whoever brings the dependency up; fires exactly once.
#[derive(Debug)]
pub struct ReadyNotifier {
    dependency: String,
    sender: oneshot::Sender<()>,
}

impl ReadyNotifier {
    pub fn notify(self) {
        debug!(dependency = %self.dependency, "dependency ready");
        // the waiter may already have given up; nothing to do then
        let _ = self.sender.send(());
    }
}

/// Held by the component that cannot start until the dependency is up.
#[derive(Debug)]
pub struct ReadyWaiter {
    dependency: String,
    receiver: oneshot::Receiver<()>,
}

impl ReadyWaiter {
    pub fn dependency(&self) -> &str {
        &self.dependency
    }

    pub async fn wait(self, timeout: Duration) -> Result<(), ReadinessError> {
        match tokio::time::timeout(timeout, self.receiver).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(oneshot::Canceled)) => {
                warn!(dependency = %self.dependency, "dependency abandoned");
                Err(ReadinessError::Abandoned {
                    dependency: self.dependency,
                })
            }
            Err(_) => {
                warn!(dependency = %self.dependency, ?timeout, "timed out waiting for dependency");
                Err(ReadinessError::TimedOut {
                    dependency: self.dependency,
                    waited: timeout,
                })
            }
        }
    }
}

pub fn readiness(dependency: &str) -> (ReadyNotifier, ReadyWaiter) {
    let (sender, receiver) = oneshot::channel();
    (
        ReadyNotifier {
            dependency: dependency.to_string(),
            sender,
        },
        ReadyWaiter {
            dependency: dependency.to_string(),
            receiver,
        },
    )
}

use std::{any::Any, error::Error, fmt};

use tokio::sync::oneshot;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SupervisionStrategy {
    /// Replace the actor with a fresh one from its factory.
    Restart,
    /// Keep the actor as it is and continue with the next message.
    Resume,
    /// Stop processing messages.
    Stop,
}

pub trait Actor: Send + Sync + 'static {
    /// Name used in log messages.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Called when a handler on the actor panics. The return value represents the
    /// supervision strategy used to handle the panic.
    /// NOTE: If this method panics, the actor can not recover from the panic.
    #[allow(unused_variables)]
    fn on_fail(&mut self, error: Box<dyn Any + Send>) -> SupervisionStrategy {
        SupervisionStrategy::Restart
    }
}

#[derive(Debug)]
pub enum ActorError {
    /// The actor stopped, nothing reads its mailbox anymore.
    MailboxClosed,
    /// The actor dropped the message before answering it.
    NoResponse(oneshot::error::RecvError),
}

impl fmt::Display for ActorError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::MailboxClosed => write!(f, "actor mailbox is closed"),
            Self::NoResponse(_) => write!(f, "actor dropped the message without answer"),
        }
    }
}

impl Error for ActorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MailboxClosed => None,
            Self::NoResponse(why) => Some(why),
        }
    }
}

use tokio::sync::oneshot;

use crate::{
    actor::{Actor, ActorError},
    handler::{ActorMessage, Handler, Message},
    mailbox::Mailbox,
};

pub type ActorResult<T> = Result<T, ActorError>;

/// Handle for sending messages to a running actor. Messages are handled one
/// after another in the order they were sent.
pub struct ActorRef<A: Actor> {
    mailbox: Mailbox<A>,
}

impl<A: Actor> Clone for ActorRef<A> {
    fn clone(&self) -> Self {
        Self {
            mailbox: self.mailbox.clone(),
        }
    }
}

impl<A: Actor> ActorRef<A> {
    pub(crate) fn new(mailbox: Mailbox<A>) -> Self {
        Self { mailbox }
    }

    /// Sends a message without waiting for it to be handled.
    pub async fn tell<M>(&self, msg: M) -> ActorResult<()>
    where
        M: Message,
        A: Handler<M>,
    {
        self.mailbox.post(ActorMessage::<M, A>::new(msg, None)).await
    }

    /// Sends a message and waits for the handler's response.
    pub async fn ask<M>(&self, msg: M) -> ActorResult<M::Response>
    where
        M: Message,
        A: Handler<M>,
    {
        let (response_tx, response_rx) = oneshot::channel();
        self.mailbox
            .post(ActorMessage::<M, A>::new(msg, Some(response_tx)))
            .await?;
        response_rx.await.map_err(ActorError::NoResponse)
    }

    /// Whether the actor stopped.
    pub fn is_closed(&self) -> bool {
        self.mailbox.is_closed()
    }
}

use tokio::sync::mpsc;

use crate::{actor::ActorError, handler::MessageHandler, Actor};

pub(crate) type Envelope<A> = Box<dyn MessageHandler<A>>;

/// Sending side of an actor's message queue.
pub struct Mailbox<A: Actor>(mpsc::Sender<Envelope<A>>);

impl<A: Actor> Clone for Mailbox<A> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<A: Actor> Mailbox<A> {
    /// Waits for free capacity when the queue is full.
    pub async fn post<M>(&self, message: M) -> Result<(), ActorError>
    where
        M: MessageHandler<A> + 'static,
    {
        self.0
            .send(Box::new(message))
            .await
            .map_err(|_| ActorError::MailboxClosed)
    }

    pub fn is_closed(&self) -> bool {
        self.0.is_closed()
    }
}

pub struct MailboxReceiver<A: Actor>(mpsc::Receiver<Envelope<A>>);

impl<A: Actor> MailboxReceiver<A> {
    pub async fn recv(&mut self) -> Option<Envelope<A>> {
        self.0.recv().await
    }
}

pub fn mailbox<A: Actor>(capacity: usize) -> (Mailbox<A>, MailboxReceiver<A>) {
    let (tx, rx) = mpsc::channel(capacity);
    (Mailbox(tx), MailboxReceiver(rx))
}

use std::time::Duration;

use tokio::{
    task::JoinHandle,
    time::{self, Instant, MissedTickBehavior},
};

use crate::{
    actor::Actor,
    actor_ref::ActorRef,
    handler::{Handler, Message},
};

/// Sends a message built by `make` to the actor every `period`. Ticks that
/// can not be delivered in time are skipped rather than sent in a burst. The
/// ticker ends when the actor is gone.
pub fn every<A, M, F>(actor_ref: ActorRef<A>, period: Duration, make: F) -> JoinHandle<()>
where
    A: Handler<M>,
    M: Message,
    F: Fn(std::time::Instant) -> M + Send + 'static,
{
    tokio::spawn(async move {
        let mut interval = time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            let tick: Instant = interval.tick().await;
            if actor_ref.tell(make(tick.into_std())).await.is_err() {
                log::debug!("ticker stopped, actor is gone");
                break;
            }
        }
    })
}

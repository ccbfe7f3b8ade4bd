//! Delay-then-deliver port for automated moves.
//!
//! The turn controller never sleeps. When the opponent should move it hands a
//! [`MoveTicket`] to a [`MoveScheduler`], which delivers the ticket back to
//! whoever drives the controller once the pause is over. Tickets carry the
//! generation of the game that issued them so a ticket outliving a restart is
//! recognised and dropped.

use std::collections::VecDeque;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, instrument, warn};

/// Permission to run one automated move in a specific game generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveTicket {
    generation: u64,
}

impl MoveTicket {
    pub(crate) fn new(generation: u64) -> Self {
        Self { generation }
    }

    /// Generation of the game that issued this ticket.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Schedules delivery of a ticket after a cosmetic delay.
pub trait MoveScheduler {
    /// Arranges for `ticket` to be delivered after `delay`.
    fn schedule(&mut self, delay: Duration, ticket: MoveTicket);
}

/// Scheduler that queues tickets for the caller to run synchronously.
///
/// Delays are recorded but never waited on, which keeps tests and headless
/// drivers deterministic.
#[derive(Debug, Clone, Default)]
pub struct QueuedScheduler {
    pending: VecDeque<(Duration, MoveTicket)>,
}

impl QueuedScheduler {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the oldest pending ticket.
    pub fn pop(&mut self) -> Option<MoveTicket> {
        self.pending.pop_front().map(|(_, ticket)| ticket)
    }

    /// Number of tickets waiting.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Checks if no ticket is waiting.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Delays requested so far for the pending tickets, oldest first.
    pub fn delays(&self) -> Vec<Duration> {
        self.pending.iter().map(|(delay, _)| *delay).collect()
    }
}

impl MoveScheduler for QueuedScheduler {
    fn schedule(&mut self, delay: Duration, ticket: MoveTicket) {
        debug!(?delay, generation = ticket.generation, "Queued automated move");
        self.pending.push_back((delay, ticket));
    }
}

/// Scheduler that sleeps on the tokio runtime and then sends the ticket.
///
/// Must be used from within a tokio runtime.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    tx: mpsc::UnboundedSender<MoveTicket>,
}

impl TokioScheduler {
    /// Creates a scheduler and the receiver its tickets arrive on.
    #[instrument]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<MoveTicket>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl MoveScheduler for TokioScheduler {
    fn schedule(&mut self, delay: Duration, ticket: MoveTicket) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if tx.send(ticket).is_err() {
                warn!(generation = ticket.generation, "Ticket receiver dropped");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_is_fifo() {
        let mut scheduler = QueuedScheduler::new();
        scheduler.schedule(Duration::from_millis(350), MoveTicket::new(1));
        scheduler.schedule(Duration::from_millis(280), MoveTicket::new(2));

        assert_eq!(scheduler.len(), 2);
        assert_eq!(
            scheduler.delays(),
            vec![Duration::from_millis(350), Duration::from_millis(280)]
        );
        assert_eq!(scheduler.pop().map(|t| t.generation()), Some(1));
        assert_eq!(scheduler.pop().map(|t| t.generation()), Some(2));
        assert!(scheduler.is_empty());
    }

    #[tokio::test]
    async fn test_tokio_scheduler_delivers_after_delay() {
        let (mut scheduler, mut rx) = TokioScheduler::channel();
        scheduler.schedule(Duration::from_millis(5), MoveTicket::new(7));

        let ticket = rx.recv().await.expect("ticket delivered");
        assert_eq!(ticket.generation(), 7);
    }
}

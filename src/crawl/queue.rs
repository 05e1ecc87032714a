// src/crawl/queue.rs
// =============================================================================
// The crawl frontier: a FIFO of (url, depth) items shared by all workers.
//
// Besides the queue itself it keeps a count of unfinished items. An item
// counts from the moment it is pushed until a worker calls `task_done` for
// it, and a worker only does that after the item's children have been
// pushed. So when the count reaches zero, no work is left anywhere and
// `join` returns.
//
// Rust concepts:
// - mpsc channel: unbounded, many producers; the single receiver is shared
//   behind an async Mutex so any idle worker can take the next item
// - watch channel: broadcasts the pending count so `join` can wait for 0
// =============================================================================

use crate::urls::Url;
use tokio::sync::{mpsc, watch, Mutex};

/// A queued page and how many link hops it is from the root.
#[derive(Debug, Clone)]
pub struct CrawlItem {
    pub url: Url,
    pub depth: usize,
}

#[derive(Debug)]
pub struct Frontier {
    sender: mpsc::UnboundedSender<CrawlItem>,
    receiver: Mutex<mpsc::UnboundedReceiver<CrawlItem>>,
    pending: watch::Sender<usize>,
}

impl Default for Frontier {
    fn default() -> Self {
        Self::new()
    }
}

impl Frontier {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let (pending, _) = watch::channel(0);
        Self {
            sender,
            receiver: Mutex::new(receiver),
            pending,
        }
    }

    /// Adds an item at the back of the queue.
    pub fn push(&self, url: Url, depth: usize) {
        // Count first, so the total never dips to zero while the item is in flight
        self.pending.send_modify(|n| *n += 1);
        if self.sender.send(CrawlItem { url, depth }).is_err() {
            // The receiver lives in `self`, so this cannot happen; keep the count honest anyway
            self.task_done();
        }
    }

    /// Waits for the next item. Returns `None` only if the queue is closed.
    pub async fn pop(&self) -> Option<CrawlItem> {
        self.receiver.lock().await.recv().await
    }

    /// Marks one popped item as fully processed.
    pub fn task_done(&self) {
        self.pending.send_modify(|n| *n = n.saturating_sub(1));
    }

    /// Returns a guard that marks one popped item as done when dropped,
    /// including when the worker holding it unwinds.
    pub fn done_on_drop(&self) -> TaskDone<'_> {
        TaskDone { frontier: self }
    }

    /// Number of items pushed but not yet marked done.
    pub fn pending(&self) -> usize {
        *self.pending.borrow()
    }

    /// Waits until every pushed item has been marked done.
    pub async fn join(&self) {
        let mut pending = self.pending.subscribe();
        // The sender lives in `self`, so the channel cannot close under us
        let _ = pending.wait_for(|n| *n == 0).await;
    }
}

/// Calls [`Frontier::task_done`] once, on drop.
#[must_use = "the item is marked done as soon as the guard is dropped"]
pub struct TaskDone<'a> {
    frontier: &'a Frontier,
}

impl Drop for TaskDone<'_> {
    fn drop(&mut self) {
        self.frontier.task_done();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_fifo_order() {
        let frontier = Frontier::new();
        frontier.push(Url::new("https://mysite.com/a"), 0);
        frontier.push(Url::new("https://mysite.com/b"), 1);

        let first = frontier.pop().await.unwrap();
        let second = frontier.pop().await.unwrap();
        assert_eq!(first.url.basic_url(), "https://mysite.com/a");
        assert_eq!(second.url.basic_url(), "https://mysite.com/b");
        assert_eq!(second.depth, 1);
    }

    #[tokio::test]
    async fn test_join_waits_for_task_done_not_empty_queue() {
        let frontier = Arc::new(Frontier::new());
        frontier.push(Url::new("https://mysite.com"), 0);

        let item = frontier.pop().await.unwrap();
        assert_eq!(frontier.pending(), 1);

        // Queue is empty but the item is still being worked on
        let joined = tokio::time::timeout(Duration::from_millis(50), frontier.join()).await;
        assert!(joined.is_err());

        // Its child is pushed before the parent is marked done
        frontier.push(Url::with_parent("/child", &item.url, true), item.depth + 1);
        frontier.task_done();
        assert_eq!(frontier.pending(), 1);

        let child = frontier.pop().await.unwrap();
        assert_eq!(child.depth, 1);
        frontier.task_done();

        tokio::time::timeout(Duration::from_secs(1), frontier.join())
            .await
            .expect("join should complete once every item is done");
    }

    #[tokio::test]
    async fn test_done_guard_releases_on_panic() {
        let frontier = Arc::new(Frontier::new());
        frontier.push(Url::new("https://mysite.com"), 0);

        let worker = Arc::clone(&frontier);
        let result = tokio::spawn(async move {
            let _item = worker.pop().await.unwrap();
            let _done = worker.done_on_drop();
            panic!("worker failed");
        })
        .await;
        assert!(result.unwrap_err().is_panic());

        assert_eq!(frontier.pending(), 0);
        tokio::time::timeout(Duration::from_secs(1), frontier.join())
            .await
            .expect("join should complete after a worker panicked");
    }

    #[tokio::test]
    async fn test_join_on_idle_frontier_returns() {
        let frontier = Frontier::new();
        frontier.join().await;
        assert_eq!(frontier.pending(), 0);
    }
}

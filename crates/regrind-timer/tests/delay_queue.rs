//! Integration tests for the single-shot delay queue.
//!
//! Uses `tokio::time::pause()` (via `start_paused`) so deadlines resolve
//! deterministically without real sleeps.

use std::time::Duration;

use regrind_timer::DelayQueue;

// =========================================================================
// Bookkeeping
// =========================================================================

#[test]
fn test_new_queue_is_empty() {
    let q: DelayQueue<u32> = DelayQueue::new();
    assert!(q.is_empty());
    assert_eq!(q.len(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_schedule_increments_len() {
    let mut q = DelayQueue::new();
    q.schedule(Duration::from_secs(1), "a");
    q.schedule(Duration::from_secs(2), "b");
    assert_eq!(q.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_timer_ids_are_unique() {
    let mut q = DelayQueue::new();
    let a = q.schedule(Duration::from_secs(1), ());
    let b = q.schedule(Duration::from_secs(1), ());
    assert_ne!(a, b);
}

#[tokio::test(start_paused = true)]
async fn test_clear_drops_everything() {
    let mut q = DelayQueue::new();
    q.schedule(Duration::from_millis(10), 1);
    q.schedule(Duration::from_millis(20), 2);
    q.clear();
    assert!(q.is_empty());
}

// =========================================================================
// Due order
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_next_due_returns_task_after_delay() {
    let mut q = DelayQueue::new();
    q.schedule(Duration::from_millis(250), "go");

    let task = q.next_due().await;
    assert_eq!(task, "go");
    assert!(q.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_next_due_fires_in_deadline_order() {
    let mut q = DelayQueue::new();
    q.schedule(Duration::from_secs(3), "late");
    q.schedule(Duration::from_secs(1), "early");
    q.schedule(Duration::from_secs(2), "middle");

    assert_eq!(q.next_due().await, "early");
    assert_eq!(q.next_due().await, "middle");
    assert_eq!(q.next_due().await, "late");
}

#[tokio::test(start_paused = true)]
async fn test_equal_deadlines_fire_in_scheduling_order() {
    let mut q = DelayQueue::new();
    q.schedule(Duration::from_secs(1), "first");
    q.schedule(Duration::from_secs(1), "second");

    assert_eq!(q.next_due().await, "first");
    assert_eq!(q.next_due().await, "second");
}

#[tokio::test(start_paused = true)]
async fn test_zero_delay_fires_immediately() {
    let mut q = DelayQueue::new();
    q.schedule(Duration::ZERO, 7);
    assert_eq!(q.next_due().await, 7);
}

// =========================================================================
// Empty-queue behavior
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_next_due_pends_while_empty() {
    let mut q: DelayQueue<()> = DelayQueue::new();

    // An empty queue must never resolve — give it generous simulated time.
    let wait = tokio::time::timeout(Duration::from_secs(3600), q.next_due());
    assert!(wait.await.is_err(), "empty queue should pend forever");
}

#[tokio::test(start_paused = true)]
async fn test_queue_usable_again_after_drain() {
    let mut q = DelayQueue::new();
    q.schedule(Duration::from_millis(5), 1);
    assert_eq!(q.next_due().await, 1);

    q.schedule(Duration::from_millis(5), 2);
    assert_eq!(q.next_due().await, 2);
}

// =========================================================================
// Jitter
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_schedule_jittered_zero_jitter_behaves_like_schedule() {
    let mut q = DelayQueue::new();
    q.schedule_jittered(Duration::from_secs(1), Duration::ZERO, "x");
    assert_eq!(q.next_due().await, "x");
}

#[tokio::test(start_paused = true)]
async fn test_schedule_jittered_fires_within_bounds() {
    let mut q = DelayQueue::new();
    q.schedule_jittered(
        Duration::from_millis(100),
        Duration::from_millis(50),
        "x",
    );

    // Must fire no later than delay + max jitter.
    let wait = tokio::time::timeout(Duration::from_millis(151), q.next_due());
    assert_eq!(wait.await.expect("should fire within jitter bound"), "x");
}

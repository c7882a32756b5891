//! Emergency triage queue.

use crate::types::{ClinicError, ClinicResult};

/// Lowest severity the queue accepts.
pub const MIN_SEVERITY: u8 = 1;

/// Highest severity the queue accepts.
pub const MAX_SEVERITY: u8 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Element {
    priority: u8,
    seq: u64,
    payload: String,
}

impl Element {
    /// Max-heap ordering: higher severity wins, earlier arrival breaks
    /// ties.
    fn outranks(&self, other: &Element) -> bool {
        self.priority > other.priority || (self.priority == other.priority && self.seq < other.seq)
    }
}

/// Binary max-heap of emergency admissions.
///
/// Severity 10 is treated first. Equal severities leave in arrival
/// order: each element carries a monotonically increasing sequence
/// number used as the secondary comparison key, because a bare binary
/// heap is not stable. The heap is the usual array-backed complete
/// tree — children of index `i` sit at `2i + 1` and `2i + 2` — with
/// sift-up on insert and sift-down after extraction.
///
/// # Examples
///
/// ```
/// use clinic_store::TriageQueue;
///
/// let mut triage = TriageQueue::new();
/// triage.enqueue(5, "sprained ankle").unwrap();
/// triage.enqueue(9, "chest pain").unwrap();
///
/// assert_eq!(triage.dequeue(), Some((9, "chest pain".to_string())));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TriageQueue {
    heap: Vec<Element>,
    next_seq: u64,
}

impl TriageQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of waiting admissions.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns true if nobody is waiting.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Adds an admission.
    ///
    /// Severities outside 1..=10 are rejected without touching the
    /// queue — no silent clamping.
    pub fn enqueue(&mut self, priority: u8, payload: impl Into<String>) -> ClinicResult<()> {
        if !(MIN_SEVERITY..=MAX_SEVERITY).contains(&priority) {
            return Err(ClinicError::SeverityOutOfRange {
                severity: i64::from(priority),
            });
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Element {
            priority,
            seq,
            payload: payload.into(),
        });
        self.sift_up(self.heap.len() - 1);
        Ok(())
    }

    /// Removes and returns the most urgent admission, or `None` when the
    /// queue is empty.
    pub fn dequeue(&mut self) -> Option<(u8, String)> {
        if self.heap.is_empty() {
            return None;
        }

        let last = self.heap.len() - 1;
        self.heap.swap(0, last);
        let element = self.heap.pop()?;
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some((element.priority, element.payload))
    }

    /// The most urgent admission without removing it.
    pub fn peek(&self) -> Option<(u8, &str)> {
        self.heap
            .first()
            .map(|element| (element.priority, element.payload.as_str()))
    }

    /// Queue contents in dequeue order, for export.
    ///
    /// Re-enqueuing the returned sequence into an empty queue rebuilds
    /// identical dequeue behavior: severity order is explicit and FIFO
    /// ties are re-established by the fresh insertion order.
    pub fn entries(&self) -> Vec<(u8, String)> {
        let mut snapshot = self.clone();
        let mut ordered = Vec::with_capacity(snapshot.len());
        while let Some(entry) = snapshot.dequeue() {
            ordered.push(entry);
        }
        ordered
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.heap[index].outranks(&self.heap[parent]) {
                self.heap.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        loop {
            let mut top = index;
            for child in [2 * index + 1, 2 * index + 2] {
                if child < self.heap.len() && self.heap[child].outranks(&self.heap[top]) {
                    top = child;
                }
            }
            if top == index {
                break;
            }
            self.heap.swap(index, top);
            index = top;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dequeue_returns_maximum_priority() {
        let mut triage = TriageQueue::new();
        for (severity, payload) in [(3, "a"), (7, "b"), (1, "c"), (10, "d"), (6, "e")] {
            triage.enqueue(severity, payload).unwrap();
        }

        let severities: Vec<u8> = std::iter::from_fn(|| triage.dequeue())
            .map(|(severity, _)| severity)
            .collect();
        assert_eq!(severities, [10, 7, 6, 3, 1]);
    }

    #[test]
    fn test_equal_priorities_leave_in_arrival_order() {
        let mut triage = TriageQueue::new();
        triage.enqueue(5, "first").unwrap();
        triage.enqueue(9, "urgent").unwrap();
        triage.enqueue(5, "second").unwrap();
        triage.enqueue(3, "last").unwrap();

        assert_eq!(triage.dequeue(), Some((9, "urgent".to_string())));
        assert_eq!(triage.dequeue(), Some((5, "first".to_string())));
        assert_eq!(triage.dequeue(), Some((5, "second".to_string())));
        assert_eq!(triage.dequeue(), Some((3, "last".to_string())));
    }

    #[test]
    fn test_fifo_holds_across_many_ties() {
        let mut triage = TriageQueue::new();
        for i in 0..30 {
            triage.enqueue(5, format!("case-{i}")).unwrap();
        }
        for i in 0..30 {
            assert_eq!(triage.dequeue(), Some((5, format!("case-{i}"))));
        }
    }

    #[test]
    fn test_n_dequeues_empty_the_queue() {
        let mut triage = TriageQueue::new();
        for severity in 1..=10 {
            triage.enqueue(severity, "x").unwrap();
        }
        for _ in 0..10 {
            assert!(triage.dequeue().is_some());
        }

        assert!(triage.is_empty());
        assert_eq!(triage.dequeue(), None);
    }

    #[test]
    fn test_out_of_range_severity_is_rejected() {
        let mut triage = TriageQueue::new();
        assert!(matches!(
            triage.enqueue(0, "too low"),
            Err(ClinicError::SeverityOutOfRange { severity: 0 })
        ));
        assert!(matches!(
            triage.enqueue(11, "too high"),
            Err(ClinicError::SeverityOutOfRange { severity: 11 })
        ));
        assert!(triage.is_empty());
    }

    #[test]
    fn test_peek_leaves_queue_intact() {
        let mut triage = TriageQueue::new();
        triage.enqueue(4, "a").unwrap();
        triage.enqueue(8, "b").unwrap();

        assert_eq!(triage.peek(), Some((8, "b")));
        assert_eq!(triage.len(), 2);
    }

    #[test]
    fn test_entries_reconstruct_queue_semantics() {
        let mut triage = TriageQueue::new();
        for (severity, payload) in [(5, "a"), (9, "b"), (5, "c"), (3, "d")] {
            triage.enqueue(severity, payload).unwrap();
        }

        let exported = triage.entries();
        // export leaves the queue untouched
        assert_eq!(triage.len(), 4);

        let mut reloaded = TriageQueue::new();
        for (severity, payload) in exported {
            reloaded.enqueue(severity, payload).unwrap();
        }

        let original: Vec<_> = std::iter::from_fn(|| triage.dequeue()).collect();
        let rebuilt: Vec<_> = std::iter::from_fn(|| reloaded.dequeue()).collect();
        assert_eq!(original, rebuilt);
    }
}

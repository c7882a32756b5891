//! Append-only visit history.
//!
//! This module provides the `VisitHistory` list owned by each patient
//! record.

use std::fmt;

/// A single history entry owning its successor.
#[derive(Debug, PartialEq, Eq)]
struct Node {
    entry: String,
    next: Option<Box<Node>>,
}

/// Append-only, ordered log of visit entries for one patient.
///
/// Entries live on a singly linked chain exclusively owned by the list;
/// iteration and `Display` always run oldest-first in insertion order.
/// There is no removal operation: the history is an audit log.
///
/// `append` walks to the tail and is O(n) in the number of entries; no
/// tail pointer is kept, since one would have to alias the owning `Box`
/// chain. Histories stay short at clinic scale.
///
/// # Examples
///
/// ```
/// use clinic_types::VisitHistory;
///
/// let mut history = VisitHistory::new();
/// history.append("checkup");
/// history.append("follow-up");
///
/// let entries: Vec<&str> = history.iter().collect();
/// assert_eq!(entries, ["checkup", "follow-up"]);
/// ```
#[derive(Debug, Default, PartialEq, Eq)]
pub struct VisitHistory {
    head: Option<Box<Node>>,
    len: usize,
}

impl VisitHistory {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry at the end, preserving the order of everything
    /// already recorded.
    pub fn append(&mut self, entry: impl Into<String>) {
        let mut cursor = &mut self.head;
        while let Some(node) = cursor {
            cursor = &mut node.next;
        }
        *cursor = Some(Box::new(Node {
            entry: entry.into(),
            next: None,
        }));
        self.len += 1;
    }

    /// Returns the number of recorded entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterates over entries, oldest first.
    pub fn iter(&self) -> Entries<'_> {
        Entries {
            cursor: self.head.as_deref(),
        }
    }
}

impl Clone for VisitHistory {
    fn clone(&self) -> Self {
        self.iter().map(str::to_owned).collect()
    }
}

// Unlink iteratively so dropping a long history cannot recurse through
// the whole chain.
impl Drop for VisitHistory {
    fn drop(&mut self) {
        let mut cursor = self.head.take();
        while let Some(mut node) = cursor {
            cursor = node.next.take();
        }
    }
}

impl FromIterator<String> for VisitHistory {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut history = Self::new();
        let mut cursor = &mut history.head;
        for entry in iter {
            let node = cursor.insert(Box::new(Node { entry, next: None }));
            cursor = &mut node.next;
            history.len += 1;
        }
        history
    }
}

impl Extend<String> for VisitHistory {
    fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
        for entry in iter {
            self.append(entry);
        }
    }
}

impl<'a> IntoIterator for &'a VisitHistory {
    type Item = &'a str;
    type IntoIter = Entries<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for VisitHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for entry in self {
            if !first {
                f.write_str("\n")?;
            }
            f.write_str(entry)?;
            first = false;
        }
        Ok(())
    }
}

/// Iterator over history entries, oldest first.
#[derive(Debug)]
pub struct Entries<'a> {
    cursor: Option<&'a Node>,
}

impl<'a> Iterator for Entries<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.cursor?;
        self.cursor = node.next.as_deref();
        Some(&node.entry)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for VisitHistory {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for VisitHistory {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = Vec::<String>::deserialize(deserializer)?;
        Ok(entries.into_iter().collect())
    }
}

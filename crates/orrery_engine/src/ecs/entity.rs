//! Object identifiers

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

static NEXT_OBJECT_ID: AtomicU32 = AtomicU32::new(1);

/// Unique scene object identifier
///
/// Ids are allocated from a process-wide counter so objects built before
/// their scene exists still get distinct ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId {
    id: u32,
}

impl ObjectId {
    /// Allocate a fresh id
    pub(crate) fn next() -> Self {
        Self { id: NEXT_OBJECT_ID.fetch_add(1, Ordering::Relaxed) }
    }

    /// Get the raw id value
    pub fn id(&self) -> u32 {
        self.id
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.id)
    }
}

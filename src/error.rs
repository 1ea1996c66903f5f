use std::fmt;

/// Which fixed-capacity store rejected an insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Bodies,
    Links,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store already holds `capacity` entries; the insert was dropped.
    CapacityExceeded { store: StoreKind, capacity: usize },
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreKind::Bodies => write!(f, "body store"),
            StoreKind::Links => write!(f, "link store"),
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::CapacityExceeded { store, capacity } => {
                write!(f, "{store} maximum reached (capacity {capacity})")
            }
        }
    }
}

impl std::error::Error for StoreError {}

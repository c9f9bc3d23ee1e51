use serde::{Deserialize, Serialize};
use std::fmt;

use crate::time::EpochMillis;

macro_rules! id_type {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            pub const fn from_raw(value: u64) -> Self {
                Self(value)
            }

            pub const fn as_raw(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }
    };
}

id_type!(UnitId);
id_type!(MissionId);
id_type!(ReportId);
id_type!(AlertId);

/// Issues timestamp-based ids that never repeat within a session.
///
/// A fresh id is the current epoch millisecond, bumped past the last issued
/// value when two creations land in the same millisecond (or the clock steps
/// backwards).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdAllocator {
    last_issued: u64,
}

impl IdAllocator {
    pub fn starting_after(last_issued: u64) -> Self {
        Self { last_issued }
    }

    pub fn last_issued(&self) -> u64 {
        self.last_issued
    }

    pub fn next(&mut self, now_ms: EpochMillis) -> u64 {
        let next = now_ms.max(self.last_issued.saturating_add(1));
        self.last_issued = next;
        next
    }
}

//! Three-way outcome of an existence probe.
//!
//! Existence endpoints can fail for reasons unrelated to the resource. Instead of
//! folding those failures into `false`, probes report [`Existence::Unknown`] and
//! each caller decides what an unknown answer means for it.

use crate::error::{XldError, XldResult};

/// Result of asking the server whether a resource exists.
#[derive(Debug)]
pub enum Existence {
    Present,
    Absent,
    /// The probe failed; the error says why.
    Unknown(XldError),
}

impl Existence {
    pub fn is_present(&self) -> bool {
        matches!(self, Existence::Present)
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Existence::Absent)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Existence::Unknown(_))
    }

    /// Collapse to a boolean, surfacing an unknown outcome as its error.
    pub fn into_result(self) -> XldResult<bool> {
        match self {
            Existence::Present => Ok(true),
            Existence::Absent => Ok(false),
            Existence::Unknown(error) => Err(error),
        }
    }
}

impl From<bool> for Existence {
    fn from(exists: bool) -> Self {
        if exists {
            Existence::Present
        } else {
            Existence::Absent
        }
    }
}

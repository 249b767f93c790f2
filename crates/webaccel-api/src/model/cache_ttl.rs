use std::fmt;

use serde::{Deserialize, Serialize};

use crate::validate::{Rule, ValidationError};

/// Default cache period for a site, in seconds.
///
/// `-1` disables caching; otherwise `0..=604800` (one week). Out-of-range
/// values cannot be constructed or deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct CacheTtl(i64);

impl CacheTtl {
    pub const FIELD: &'static str = "DefaultCacheTTL";
    pub const MIN: i64 = -1;
    pub const MAX: i64 = 604_800;
    pub const DISABLED: Self = Self(-1);

    pub fn new(secs: i64) -> Result<Self, ValidationError> {
        if (Self::MIN..=Self::MAX).contains(&secs) {
            Ok(Self(secs))
        } else {
            Err(ValidationError::new(
                Self::FIELD,
                Rule::Range {
                    got: secs,
                    min: Self::MIN,
                    max: Self::MAX,
                },
            ))
        }
    }

    /// Raw wire value.
    pub fn get(self) -> i64 {
        self.0
    }

    pub fn is_disabled(self) -> bool {
        self.0 == Self::MIN
    }

    /// Cache period in seconds, or `None` when caching is disabled.
    pub fn seconds(self) -> Option<u32> {
        u32::try_from(self.0).ok()
    }
}

impl TryFrom<i64> for CacheTtl {
    type Error = ValidationError;

    fn try_from(secs: i64) -> Result<Self, Self::Error> {
        Self::new(secs)
    }
}

impl From<CacheTtl> for i64 {
    fn from(ttl: CacheTtl) -> Self {
        ttl.0
    }
}

impl fmt::Display for CacheTtl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_disabled() {
            f.write_str("disabled")
        } else {
            write!(f, "{}s", self.0)
        }
    }
}

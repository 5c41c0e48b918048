use serde::{Deserialize, Serialize};

/// Course length in minutes
///
/// # Invariants
/// - Strictly positive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseDuration(i32);

impl CourseDuration {
    pub fn new(minutes: i32) -> Result<Self, String> {
        if minutes > 0 {
            Ok(Self(minutes))
        } else {
            Err(format!("Invalid course duration: {}", minutes))
        }
    }

    pub fn minutes(&self) -> i32 {
        self.0
    }
}

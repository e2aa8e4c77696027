//! Expense reference generation.

use rand::Rng;

/// Prefix of every expense reference.
pub const REFERENCE_PREFIX: &str = "EXP/";

/// Source of expense references.
#[cfg_attr(test, mockall::automock)]
pub trait ReferenceGenerator: Send + Sync {
    /// Produces the next reference. Collisions are allowed.
    fn next_reference(&self) -> String;
}

/// `EXP/` followed by a uniformly random number in `1000..=9999`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomReferences;

impl ReferenceGenerator for RandomReferences {
    fn next_reference(&self) -> String {
        let n: u16 = rand::rng().random_range(1000..=9999);
        format!("{REFERENCE_PREFIX}{n}")
    }
}

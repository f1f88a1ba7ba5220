pub mod movements;
pub mod orders;
pub mod products;

use uuid::Uuid;

/// Ids carry an entity prefix so log lines and events stay readable.
pub(crate) fn prefixed_id(prefix: &str) -> String {
    format!("{}_{}", prefix, Uuid::new_v4().simple())
}

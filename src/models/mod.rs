pub mod hiking;
pub mod id;
pub mod observation;

use serde::{de::DeserializeOwned, Serialize};

pub use hiking::Hiking;
pub use id::RecordId;
pub use observation::Observation;

/// A record type persisted in its own collection of the document store.
pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection the records live in.
    const COLLECTION: &'static str;
    /// Human-facing name used in response messages.
    const LABEL: &'static str;

    fn set_id(&mut self, id: RecordId);
}

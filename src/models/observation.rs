use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull};

use super::{RecordId, Resource};

/// Something noticed along the way. `hiking_id` is free text and is not
/// checked against the hiking collection.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Observation {
    #[serde(
        rename = "_id",
        deserialize_with = "super::id::deserialize_optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub hiking_id: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub name: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub comment: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub time: String,
}

impl Resource for Observation {
    const COLLECTION: &'static str = "observation";
    const LABEL: &'static str = "Observation";

    fn set_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }
}

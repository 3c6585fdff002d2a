use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull};

use super::{RecordId, Resource};

/// A planned or completed hiking trip. Missing or `null` fields decode to
/// their zero value.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hiking {
    #[serde(
        rename = "_id",
        deserialize_with = "super::id::deserialize_optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub name: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub location: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub date: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub parking: bool,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub length: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub difficulty: i64,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub description: String,
}

impl Resource for Hiking {
    const COLLECTION: &'static str = "hiking";
    const LABEL: &'static str = "Hiking";

    fn set_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }
}

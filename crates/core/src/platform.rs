use serde::{Deserialize, Serialize};

/// A game platform record.
///
/// The `id` is assigned by the store on creation and never changes afterwards;
/// id uniqueness is the store's responsibility. Serialization of this type is
/// the wire read view (`{id, name, publisher, cost}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Platform {
    pub id: i64,
    pub name: String,
    pub publisher: String,
    pub cost: String,
}

/// An id-less platform draft, as submitted for creation.
///
/// Transport input views project onto this type; the store turns it into a
/// full [`Platform`] by assigning the next id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPlatform {
    pub name: String,
    pub publisher: String,
    pub cost: String,
}

impl NewPlatform {
    /// Attach a store-assigned id, producing the persisted entity.
    pub fn with_id(self, id: i64) -> Platform {
        Platform {
            id,
            name: self.name,
            publisher: self.publisher,
            cost: self.cost,
        }
    }
}

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Backend account object.
///
/// The backend returns this under the `account` field. Only the fields we
/// actually read are typed; everything else stays in `extra` so backend
/// additions don't break deserialization.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct AccountInfo {
    pub id: String,

    #[serde(default)]
    pub email: String,

    #[serde(flatten)]
    pub extra: serde_json::Value,
}

/// A single to-do item, owned by exactly one account.
///
/// `position` drives the custom manual ordering and is nullable: rows created
/// before ordering existed carry no position until the first load backfills
/// them. Only the reorder path ever writes `position`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct Item {
    pub id: String,

    #[serde(rename = "owner-id")]
    pub owner_id: String,

    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(rename = "created-at", default)]
    pub created_at: String,

    #[serde(default)]
    pub position: Option<i64>,
}

/// Field the item list is sorted by. `Position` is the custom drag order;
/// the other two are plain store columns.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub(crate) enum SortField {
    Name,
    CreatedAt,
    Position,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub(crate) enum SortDirection {
    Asc,
    Desc,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortSpec {
    /// Custom order is only meaningful ascending; the reorder UI keys off this.
    pub fn is_custom_order(&self) -> bool {
        self.field == SortField::Position
    }
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            field: SortField::Position,
            direction: SortDirection::Asc,
        }
    }
}

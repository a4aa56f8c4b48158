use serde::{Deserialize, Serialize};

use crate::domain::Item;

/// Raw fields of a create or edit submission, exactly as they arrive in the
/// form body. Parsing into typed fields happens in one explicit step before
/// anything reaches the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemForm {
    #[serde(default, alias = "itemName")]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub quantity: Option<String>,
}

impl From<&Item> for ItemForm {
    fn from(item: &Item) -> Self {
        Self {
            name: Some(item.name.clone()),
            price: Some(item.price.to_string()),
            quantity: Some(item.quantity.to_string()),
        }
    }
}

/// Query accepted by the detail page. `status=true` is attached to the
/// redirect issued after a successful create and is shown once. Any other
/// value is ignored rather than rejected.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DetailQuery {
    #[serde(default)]
    pub status: Option<String>,
}

impl DetailQuery {
    pub fn just_created(&self) -> bool {
        self.status.as_deref() == Some("true")
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

id_newtype!(ItemId);

/// An inventory record as held by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub price: i32,
    pub quantity: i32,
}

/// The editable fields of an [`Item`]: what a client submits on create
/// and what an update replaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemParams {
    pub name: String,
    pub price: i32,
    pub quantity: i32,
}

impl ItemParams {
    pub fn new(name: impl Into<String>, price: i32, quantity: i32) -> Self {
        Self {
            name: name.into(),
            price,
            quantity,
        }
    }

    pub fn into_item(self, id: ItemId) -> Item {
        Item {
            id,
            name: self.name,
            price: self.price,
            quantity: self.quantity,
        }
    }
}

impl Item {
    pub fn params(&self) -> ItemParams {
        ItemParams {
            name: self.name.clone(),
            price: self.price,
            quantity: self.quantity,
        }
    }

    pub fn apply(&mut self, params: ItemParams) {
        self.name = params.name;
        self.price = params.price;
        self.quantity = params.quantity;
    }
}

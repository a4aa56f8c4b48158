use shared::{
    domain::{Item, ItemId, ItemParams},
    error::{ApiError, ErrorCode},
    protocol::ItemForm,
};
use storage::{Storage, StorageError};
use tracing::{info, warn};

#[derive(Clone, Default)]
pub struct ApiContext {
    pub storage: Storage,
}

impl ApiContext {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }
}

pub async fn list_items(ctx: &ApiContext) -> Result<Vec<Item>, ApiError> {
    Ok(ctx.storage.find_all().await)
}

pub async fn get_item(ctx: &ApiContext, item_id: ItemId) -> Result<Item, ApiError> {
    ctx.storage
        .find_by_id(item_id)
        .await
        .ok_or_else(|| item_not_found(item_id))
}

pub async fn create_item(ctx: &ApiContext, form: &ItemForm) -> Result<Item, ApiError> {
    let params = parse_item_form(form)?;
    let item = ctx.storage.save(params).await;
    info!(item_id = %item.id, name = %item.name, "item created");
    Ok(item)
}

pub async fn edit_item(
    ctx: &ApiContext,
    item_id: ItemId,
    form: &ItemForm,
) -> Result<Item, ApiError> {
    let params = parse_item_form(form)?;
    let item = ctx
        .storage
        .update(item_id, params)
        .await
        .map_err(storage_error)?;
    info!(item_id = %item.id, name = %item.name, "item updated");
    Ok(item)
}

/// Stores the sample records the service starts with.
pub async fn seed_test_items(ctx: &ApiContext) -> Vec<Item> {
    let mut seeded = Vec::with_capacity(2);
    for params in [
        ItemParams::new("testA", 10000, 10),
        ItemParams::new("testB", 20000, 20),
    ] {
        seeded.push(ctx.storage.save(params).await);
    }
    info!(count = seeded.len(), "seeded test items");
    seeded
}

/// Turns a raw submission into typed fields, rejecting the whole request on
/// the first missing or malformed field.
pub fn parse_item_form(form: &ItemForm) -> Result<ItemParams, ApiError> {
    let name = required_field("item name", form.name.as_deref())?;
    let price = whole_number_field("price", form.price.as_deref())?;
    let quantity = whole_number_field("quantity", form.quantity.as_deref())?;
    Ok(ItemParams::new(name, price, quantity))
}

/// Returns the submitted value untouched; whitespace only counts when deciding
/// whether the field is empty.
fn required_field<'a>(label: &str, raw: Option<&'a str>) -> Result<&'a str, ApiError> {
    raw.filter(|value| !value.trim().is_empty())
        .ok_or_else(|| {
            warn!(field = label, "rejected submission with missing field");
            ApiError::validation(format!("{label} is required"))
        })
}

fn whole_number_field(label: &str, raw: Option<&str>) -> Result<i32, ApiError> {
    let value = required_field(label, raw)?.trim();
    value.parse::<i32>().map_err(|_| {
        warn!(field = label, %value, "rejected submission with malformed number");
        ApiError::validation(format!("{label} must be a whole number"))
    })
}

fn item_not_found(item_id: ItemId) -> ApiError {
    ApiError::new(ErrorCode::NotFound, format!("item {item_id} not found"))
}

fn storage_error(err: StorageError) -> ApiError {
    match err {
        StorageError::NotFound(item_id) => item_not_found(item_id),
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;

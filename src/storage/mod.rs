use crate::models::{AccountInfo, SortSpec};
use serde::{Deserialize, Serialize};

pub(crate) const TOKEN_KEY: &str = "doable_token";
pub(crate) const USER_KEY: &str = "doable_user";
pub(crate) const SIDEBAR_COLLAPSED_KEY: &str = "doable_sidebar_collapsed";
pub(crate) const SORT_SPEC_KEY: &str = "doable_item_sort";

pub(crate) fn save_user_to_storage(user: &AccountInfo) {
    if let Ok(json) = serde_json::to_string(user) {
        if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
            let _ = storage.set_item(USER_KEY, &json);
        }
    }
}

pub(crate) fn load_user_from_storage() -> Option<AccountInfo> {
    if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
        if let Ok(Some(json)) = storage.get_item(USER_KEY) {
            return serde_json::from_str(&json).ok();
        }
    }
    None
}

pub(crate) fn load_json_from_storage<T: for<'de> Deserialize<'de>>(key: &str) -> Option<T> {
    let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten())?;
    let json = storage.get_item(key).ok().flatten()?;
    serde_json::from_str(&json).ok()
}

pub(crate) fn save_json_to_storage<T: Serialize>(key: &str, value: &T) {
    if let Ok(json) = serde_json::to_string(value) {
        if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
            let _ = storage.set_item(key, &json);
        }
    }
}

/// Last active sort, restored on the next visit.
pub(crate) fn load_sort_spec() -> SortSpec {
    load_json_from_storage::<SortSpec>(SORT_SPEC_KEY).unwrap_or_default()
}

pub(crate) fn save_sort_spec(sort: &SortSpec) {
    save_json_to_storage(SORT_SPEC_KEY, sort);
}

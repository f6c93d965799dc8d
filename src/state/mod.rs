pub(crate) mod items;

use crate::api::ApiClient;
use crate::models::AccountInfo;
use crate::storage::{load_user_from_storage, SIDEBAR_COLLAPSED_KEY};
use leptos::prelude::*;

/// The injected session object.
///
/// Every consumer (pages, the item list controller) receives this explicitly
/// instead of reading ambient global auth state. `epoch` is the "session
/// changed" notification: it is bumped on every login/logout so subscribers
/// can react even when the new user happens to deserialize equal to the old.
#[derive(Clone, Copy)]
pub(crate) struct Session {
    pub current_user: RwSignal<Option<AccountInfo>>,

    /// True while the stored token is being verified against the backend.
    /// All list operations are gated on this resolving to false.
    pub auth_loading: RwSignal<bool>,

    pub epoch: RwSignal<u64>,
}

impl Session {
    pub fn new(stored_user: Option<AccountInfo>) -> Self {
        Self {
            current_user: RwSignal::new(stored_user),
            auth_loading: RwSignal::new(false),
            epoch: RwSignal::new(0),
        }
    }

    /// Owner identity, or None while unauthenticated.
    pub fn owner_id_untracked(&self) -> Option<String> {
        self.current_user.get_untracked().map(|u| u.id)
    }

    pub fn changed(&self) {
        self.epoch.update(|e| *e = e.saturating_add(1));
    }
}

#[derive(Clone)]
pub(crate) struct AppState {
    pub api_client: RwSignal<ApiClient>,
    pub session: Session,

    /// Global UI state.
    pub sidebar_collapsed: RwSignal<bool>,
}

impl AppState {
    pub fn new() -> Self {
        let stored_client = ApiClient::load_from_storage();
        let stored_user = load_user_from_storage();

        let sidebar_collapsed = web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .and_then(|s| s.get_item(SIDEBAR_COLLAPSED_KEY).ok().flatten())
            .map(|v| v == "1" || v == "true")
            .unwrap_or(false);

        Self {
            api_client: RwSignal::new(stored_client),
            session: Session::new(stored_user),
            sidebar_collapsed: RwSignal::new(sidebar_collapsed),
        }
    }

    /// Drop credentials and notify session subscribers. Used both for
    /// explicit sign-out and for 401 responses mid-session.
    pub fn sign_out(&self) {
        let mut client = self.api_client.get_untracked();
        client.logout();
        self.api_client.set(client);
        self.session.current_user.set(None);
        self.session.changed();
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
pub(crate) struct AppContext(pub AppState);

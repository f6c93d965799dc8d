use crate::api::{ApiErrorKind, ApiResult};
use crate::models::{Item, SortDirection, SortField, SortSpec};
use crate::ordering::{assign_positions, needs_backfill, reorder_by_id, sort_by_position};
use crate::state::AppContext;
use crate::storage::{load_sort_spec, save_sort_spec};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::future::Future;

/// Errors surfaced to the presentation layer. All remote failures are caught
/// at the operation boundary and converted into one of these; nothing
/// propagates as an unhandled fault.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum ListError {
    /// Operation attempted without an authenticated owner. Rendered as a
    /// passive "please log in" prompt, not a failure banner.
    AuthRequired,

    Remote(String),

    /// A position batch stopped partway: a prefix of the new order was saved,
    /// the rest was not. The in-memory order is kept (no rollback), so the
    /// visible order may not survive a reload.
    PartialOrderPersistence {
        saved: usize,
        total: usize,
        message: String,
    },
}

impl std::fmt::Display for ListError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListError::AuthRequired => write!(f, "Please log in to view your items"),
            ListError::Remote(msg) => write!(f, "{msg}"),
            ListError::PartialOrderPersistence { saved, total, .. } => write!(
                f,
                "Failed to save the new order ({saved} of {total} rows updated). \
                 The order shown here may not survive a reload."
            ),
        }
    }
}

#[derive(Debug)]
pub(crate) struct PersistFailure {
    pub saved: usize,
    pub error: crate::api::ApiError,
}

/// Write each item's position back, one row at a time, strictly in sequence.
///
/// Deliberately not transactional: on the first failed row the loop stops
/// immediately, so at worst a prefix of the new order is durable. Returns how
/// many rows were written either way.
pub(crate) async fn write_positions<F, Fut>(
    items: &[Item],
    mut write: F,
) -> Result<usize, PersistFailure>
where
    F: FnMut(String, i64) -> Fut,
    Fut: Future<Output = ApiResult<()>>,
{
    let mut saved = 0usize;
    for it in items {
        // Every row has a position by the time a batch is built; skip
        // defensively rather than invent one here.
        let Some(pos) = it.position else {
            continue;
        };

        match write(it.id.clone(), pos).await {
            Ok(()) => saved += 1,
            Err(error) => return Err(PersistFailure { saved, error }),
        }
    }
    Ok(saved)
}

/// Run queued position batches until none remain. `next_batch` takes the
/// latest queued order (clearing the slot), so orders queued while a batch is
/// in flight coalesce: only the newest runs once the current batch completes.
/// `persist_batch` returns false to cut the drain short (session ended);
/// anything still queued at that point is left in place.
pub(crate) async fn drain_order_batches<N, F, Fut>(mut next_batch: N, mut persist_batch: F) -> bool
where
    N: FnMut() -> Option<Vec<Item>>,
    F: FnMut(Vec<Item>) -> Fut,
    Fut: Future<Output = bool>,
{
    while let Some(batch) = next_batch() {
        if !persist_batch(batch).await {
            return false;
        }
    }
    true
}

/// Post-fetch half of a load: discard superseded responses, backfill missing
/// positions, and persist the backfill before the list is exposed. Returns
/// None when this load was superseded by a newer one (checked again after the
/// backfill write, which may have waited on the persist queue) or when the
/// persist was cut short by a sign-out.
pub(crate) async fn prepare_loaded_items<S, F, Fut>(
    mut items: Vec<Item>,
    is_stale: S,
    mut persist_backfill: F,
) -> Option<Vec<Item>>
where
    S: Fn() -> bool,
    F: FnMut(Vec<Item>) -> Fut,
    Fut: Future<Output = bool>,
{
    if is_stale() {
        return None;
    }

    if needs_backfill(&items) {
        assign_positions(&mut items);

        if !persist_backfill(items.clone()).await {
            return None;
        }
        if is_stale() {
            return None;
        }
    }

    Some(items)
}

/// Owns the current user's ordered item list.
///
/// The in-memory list is a cache of the remote store and is mutated only by
/// the operations below. Reorder and delete are optimistic: the list updates
/// first, persistence follows, and a remote failure surfaces an error without
/// rolling the list back.
#[derive(Clone)]
pub(crate) struct ItemListController {
    app_state: AppContext,

    pub items: RwSignal<Vec<Item>>,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<ListError>>,
    pub sort: RwSignal<SortSpec>,

    /// True while a position batch is in flight. Re-entrant persists are
    /// suppressed; see `pending_order`.
    pub persisting: RwSignal<bool>,

    /// Latest desired order queued while a persist is in flight. When the
    /// in-flight batch completes, exactly one more batch runs with this
    /// state (coalescing), so a reorder during persistence is never dropped.
    pending_order: RwSignal<Option<Vec<Item>>>,

    /// Ids with an in-flight delete, so other rows stay interactive.
    deleting: RwSignal<Vec<String>>,

    /// Monotonic load token; responses from superseded loads are discarded.
    load_request_id: RwSignal<u64>,

    /// Add-form state (insert is a manager operation like the rest).
    pub adding: RwSignal<bool>,
    pub add_error: RwSignal<Option<String>>,
    pub add_success: RwSignal<bool>,
}

impl ItemListController {
    pub fn new(app_state: AppContext) -> Self {
        let s = Self {
            app_state,
            items: RwSignal::new(vec![]),
            loading: RwSignal::new(false),
            error: RwSignal::new(None),
            sort: RwSignal::new(load_sort_spec()),
            persisting: RwSignal::new(false),
            pending_order: RwSignal::new(None),
            deleting: RwSignal::new(vec![]),
            load_request_id: RwSignal::new(0),
            adding: RwSignal::new(false),
            add_error: RwSignal::new(None),
            add_success: RwSignal::new(false),
        };

        s.watch_session();
        s
    }

    /// Subscribe to the injected session: any login/logout (epoch bump) or
    /// auth-resolution change triggers a reload or clears the list.
    fn watch_session(&self) {
        let s2 = self.clone();
        let session = self.app_state.0.session;
        Effect::new(move |_| {
            session.epoch.get();
            let _ = session.current_user.get();
            let _ = session.auth_loading.get();
            s2.load();
        });
    }

    pub fn is_deleting(&self, id: &str) -> bool {
        self.deleting.get().iter().any(|d| d == id)
    }

    fn force_sign_out(&self) {
        self.app_state.0.sign_out();
        let _ = window().location().set_href("/login");
    }

    /// Fetch the owner's items, store-side sorted by the active sort spec.
    /// No-op (and clears the list) while auth is still resolving or when no
    /// owner is present. Lists containing legacy null-position rows are
    /// backfilled and persisted before they are exposed.
    pub fn load(&self) {
        let session = self.app_state.0.session;

        if session.auth_loading.get_untracked() {
            self.items.set(vec![]);
            self.loading.set(false);
            self.error.set(None);
            return;
        }

        let Some(owner_id) = session.owner_id_untracked() else {
            self.items.set(vec![]);
            self.loading.set(false);
            self.error.set(None);
            return;
        };

        // Stale-response protection: only the newest load may publish.
        let req_id = self.load_request_id.get_untracked().saturating_add(1);
        self.load_request_id.set(req_id);

        self.loading.set(true);
        self.error.set(None);

        let sort = self.sort.get_untracked();
        let api_client = self.app_state.0.api_client.get_untracked();
        let s2 = self.clone();
        spawn_local(async move {
            let result = api_client.list_items(&owner_id, &sort).await;

            if s2.load_request_id.get_untracked() != req_id {
                return;
            }

            match result {
                Ok(fetched) => {
                    // Legacy rows get synthetic positions in fetch order,
                    // written through the shared persist queue so a backfill
                    // batch never runs beside a reorder batch already in
                    // flight; if one is, the backfill coalesces behind it.
                    let is_stale = || s2.load_request_id.get_untracked() != req_id;
                    let persist = |batch: Vec<Item>| {
                        let s3 = s2.clone();
                        async move {
                            s3.pending_order.set(Some(batch));
                            s3.drain_persist_queue().await
                        }
                    };
                    let Some(ready) = prepare_loaded_items(fetched, is_stale, persist).await
                    else {
                        return;
                    };
                    s2.items.set(ready);
                }
                Err(e) => {
                    if e.kind == ApiErrorKind::Unauthorized {
                        s2.loading.set(false);
                        s2.force_sign_out();
                        return;
                    }
                    s2.items.set(vec![]);
                    s2.error.set(Some(ListError::Remote(e.to_string())));
                }
            }
            s2.loading.set(false);
        });
    }

    /// Move the dragged item to `target_index` in the displayed list, then
    /// renumber and persist. Synchronous in-memory update (immediate visual
    /// feedback); persistence runs behind it. Ignored unless the active sort
    /// is the custom order.
    pub fn reorder(&self, moved_id: &str, target_index: usize) {
        if !self.sort.get_untracked().is_custom_order() {
            return;
        }

        let mut next = self.items.get_untracked();
        if !reorder_by_id(&mut next, moved_id, target_index) {
            // Dropped onto itself, or the row vanished; no write.
            return;
        }

        self.items.set(next.clone());
        self.queue_persist(next);
    }

    /// Queue a full-order persist. If a batch is already in flight the
    /// snapshot replaces any previously queued one and is picked up when the
    /// current batch completes.
    fn queue_persist(&self, snapshot: Vec<Item>) {
        self.pending_order.set(Some(snapshot));

        if self.persisting.get_untracked() {
            return;
        }

        let s2 = self.clone();
        spawn_local(async move {
            s2.drain_persist_queue().await;
        });
    }

    /// Drain the persist queue. At most one drain runs at a time (`persisting`
    /// flag); a caller that finds one active relies on it to pick up whatever
    /// was just queued. Returns false when the drain was cut short by a
    /// sign-out.
    async fn drain_persist_queue(&self) -> bool {
        if self.persisting.get_untracked() {
            return true;
        }
        self.persisting.set(true);

        let pending = self.pending_order;
        let next_batch = move || {
            let batch = pending.get_untracked();
            if batch.is_some() {
                pending.set(None);
            }
            batch
        };

        let s2 = self.clone();
        let persist_batch = move |batch: Vec<Item>| {
            let s2 = s2.clone();
            async move {
                let Some(owner_id) = s2.app_state.0.session.owner_id_untracked() else {
                    return false;
                };

                let api_client = s2.app_state.0.api_client.get_untracked();
                let total = batch.len();
                let write = |id: String, pos: i64| {
                    let client = api_client.clone();
                    let owner = owner_id.clone();
                    async move { client.update_item_position(&id, &owner, pos).await }
                };

                match write_positions(&batch, write).await {
                    Ok(_) => {
                        // A fully saved order supersedes any earlier partial
                        // warning.
                        if matches!(
                            s2.error.get_untracked(),
                            Some(ListError::PartialOrderPersistence { .. })
                        ) {
                            s2.error.set(None);
                        }
                        true
                    }
                    Err(fail) => {
                        if fail.error.kind == ApiErrorKind::Unauthorized {
                            s2.force_sign_out();
                            return false;
                        }
                        s2.error.set(Some(ListError::PartialOrderPersistence {
                            saved: fail.saved,
                            total,
                            message: fail.error.to_string(),
                        }));
                        // No retry of this batch; a newer queued order (if
                        // any) still runs on the next turn.
                        true
                    }
                }
            }
        };

        let completed = drain_order_batches(next_batch, persist_batch).await;
        self.persisting.set(false);
        completed
    }

    /// Delete one row at the store, then drop it from the list on success.
    /// Per-item busy state keeps the other rows deletable meanwhile.
    pub fn delete(&self, id: &str) {
        let Some(owner_id) = self.app_state.0.session.owner_id_untracked() else {
            self.error.set(Some(ListError::AuthRequired));
            return;
        };

        if self.is_deleting(id) {
            return;
        }
        self.deleting.update(|d| d.push(id.to_string()));

        let id = id.to_string();
        let api_client = self.app_state.0.api_client.get_untracked();
        let s2 = self.clone();
        spawn_local(async move {
            match api_client.delete_item(&id, &owner_id).await {
                Ok(()) => {
                    s2.items.update(|list| list.retain(|it| it.id != id));
                    s2.error.set(None);
                }
                Err(e) => {
                    if e.kind == ApiErrorKind::Unauthorized {
                        s2.deleting.update(|d| d.retain(|x| x != &id));
                        s2.force_sign_out();
                        return;
                    }
                    // Row stays in the list; no automatic retry.
                    s2.error.set(Some(ListError::Remote(e.to_string())));
                }
            }
            s2.deleting.update(|d| d.retain(|x| x != &id));
        });
    }

    /// Insert a new item. `position` is left unset; the next load backfills
    /// it. On success the list is reloaded so the new row appears under the
    /// active sort.
    pub fn add(&self, name: String, description: String) {
        if self.adding.get_untracked() {
            return;
        }

        if name.trim().is_empty() {
            self.add_error.set(Some("Name is required".to_string()));
            return;
        }

        let Some(owner_id) = self.app_state.0.session.owner_id_untracked() else {
            self.add_error
                .set(Some("You must be logged in to add items".to_string()));
            return;
        };

        self.adding.set(true);
        self.add_error.set(None);
        self.add_success.set(false);

        let description = {
            let d = description.trim().to_string();
            (!d.is_empty()).then_some(d)
        };

        let api_client = self.app_state.0.api_client.get_untracked();
        let s2 = self.clone();
        spawn_local(async move {
            match api_client
                .insert_item(&owner_id, name.trim(), description.as_deref())
                .await
            {
                Ok(_item) => {
                    s2.add_success.set(true);
                    s2.load();
                }
                Err(e) => {
                    if e.kind == ApiErrorKind::Unauthorized {
                        s2.adding.set(false);
                        s2.force_sign_out();
                        return;
                    }
                    s2.add_error.set(Some(e.to_string()));
                }
            }
            s2.adding.set(false);
        });
    }

    /// Change the active sort. Position is only meaningful ascending, so the
    /// direction is forced there. Switching to the custom order re-sorts the
    /// in-memory list from the last loaded positions; any other field
    /// triggers a store-side reload.
    pub fn set_sort(&self, field: SortField, direction: SortDirection) {
        let direction = if field == SortField::Position {
            SortDirection::Asc
        } else {
            direction
        };
        let next = SortSpec { field, direction };

        if next == self.sort.get_untracked() {
            return;
        }

        self.sort.set(next);
        save_sort_spec(&next);

        if next.is_custom_order() {
            self.items.update(|list| sort_by_position(list));
        } else {
            self.load();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiClient, ApiError, ApiErrorKind};
    use crate::models::AccountInfo;
    use crate::state::{AppState, Session};
    use futures::executor::block_on;
    use std::cell::{Cell, RefCell};

    fn item(id: &str, position: Option<i64>) -> Item {
        Item {
            id: id.to_string(),
            owner_id: "acc-1".to_string(),
            name: format!("item {id}"),
            description: None,
            created_at: String::new(),
            position,
        }
    }

    fn ids(items: &[Item]) -> Vec<String> {
        items.iter().map(|it| it.id.clone()).collect()
    }

    fn remote_error() -> ApiError {
        ApiError {
            kind: ApiErrorKind::Http,
            message: "boom".to_string(),
        }
    }

    fn account(id: &str) -> AccountInfo {
        AccountInfo {
            id: id.to_string(),
            email: format!("{id}@example.com"),
            extra: serde_json::json!({}),
        }
    }

    // Built by hand so no browser storage is touched and no session watcher
    // is registered; only the synchronous paths are exercised here.
    fn test_controller(user: Option<AccountInfo>) -> ItemListController {
        let app_state = AppState {
            api_client: RwSignal::new(ApiClient::new("http://localhost:7171".to_string())),
            session: Session::new(user),
            sidebar_collapsed: RwSignal::new(false),
        };
        ItemListController {
            app_state: AppContext(app_state),
            items: RwSignal::new(vec![]),
            loading: RwSignal::new(false),
            error: RwSignal::new(None),
            sort: RwSignal::new(SortSpec::default()),
            persisting: RwSignal::new(false),
            pending_order: RwSignal::new(None),
            deleting: RwSignal::new(vec![]),
            load_request_id: RwSignal::new(0),
            adding: RwSignal::new(false),
            add_error: RwSignal::new(None),
            add_success: RwSignal::new(false),
        }
    }

    #[test]
    fn test_write_positions_writes_every_row_in_order() {
        let items = vec![item("a", Some(0)), item("b", Some(1000)), item("c", Some(2000))];
        let written: RefCell<Vec<(String, i64)>> = RefCell::new(vec![]);

        let saved = block_on(write_positions(&items, |id, pos| {
            written.borrow_mut().push((id, pos));
            async { Ok(()) }
        }))
        .expect("all writes succeed");

        assert_eq!(saved, 3);
        assert_eq!(
            *written.borrow(),
            vec![
                ("a".to_string(), 0),
                ("b".to_string(), 1000),
                ("c".to_string(), 2000)
            ]
        );
    }

    #[test]
    fn test_write_positions_stops_at_first_failure() {
        // Failure on the 2nd of 4 rows: row 1 is durable, rows 2-4 are not.
        let items = vec![
            item("a", Some(0)),
            item("b", Some(1000)),
            item("c", Some(2000)),
            item("d", Some(3000)),
        ];
        let attempts: RefCell<Vec<String>> = RefCell::new(vec![]);

        let fail = block_on(write_positions(&items, |id, _pos| {
            attempts.borrow_mut().push(id.clone());
            async move {
                if id == "b" {
                    Err(remote_error())
                } else {
                    Ok(())
                }
            }
        }))
        .expect_err("batch should stop on the failed row");

        assert_eq!(fail.saved, 1);
        // Rows after the failure are never attempted.
        assert_eq!(*attempts.borrow(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_write_positions_skips_rows_without_position() {
        let items = vec![item("a", Some(0)), item("b", None), item("c", Some(2000))];
        let written: RefCell<Vec<String>> = RefCell::new(vec![]);

        let saved = block_on(write_positions(&items, |id, _| {
            written.borrow_mut().push(id);
            async { Ok(()) }
        }))
        .expect("writes succeed");

        assert_eq!(saved, 2);
        assert_eq!(*written.borrow(), vec!["a".to_string(), "c".to_string()]);
    }

    #[test]
    fn test_partial_order_error_message_mentions_saved_prefix() {
        let e = ListError::PartialOrderPersistence {
            saved: 1,
            total: 4,
            message: "boom".to_string(),
        };
        let text = e.to_string();
        assert!(text.contains("Failed to save the new order"));
        assert!(text.contains("1 of 4"));
    }

    #[test]
    fn test_auth_required_is_a_prompt_not_a_failure() {
        assert_eq!(
            ListError::AuthRequired.to_string(),
            "Please log in to view your items"
        );
    }

    #[test]
    fn test_order_queued_mid_batch_runs_once_after_it() {
        let pending: RefCell<Option<Vec<Item>>> =
            RefCell::new(Some(vec![item("a", Some(0)), item("b", Some(1000))]));
        let runs: RefCell<Vec<Vec<String>>> = RefCell::new(vec![]);

        let completed = block_on(drain_order_batches(
            || pending.borrow_mut().take(),
            |batch| {
                runs.borrow_mut().push(ids(&batch));
                // A reorder lands while the first batch is still writing.
                if runs.borrow().len() == 1 {
                    *pending.borrow_mut() = Some(vec![item("b", Some(0)), item("a", Some(1000))]);
                }
                async { true }
            },
        ));

        assert!(completed);
        assert_eq!(
            *runs.borrow(),
            vec![
                vec!["a".to_string(), "b".to_string()],
                vec!["b".to_string(), "a".to_string()],
            ]
        );
    }

    #[test]
    fn test_orders_queued_mid_batch_coalesce_to_the_latest() {
        let pending: RefCell<Option<Vec<Item>>> = RefCell::new(Some(vec![
            item("a", Some(0)),
            item("b", Some(1000)),
            item("c", Some(2000)),
        ]));
        let runs: RefCell<Vec<Vec<String>>> = RefCell::new(vec![]);

        block_on(drain_order_batches(
            || pending.borrow_mut().take(),
            |batch| {
                runs.borrow_mut().push(ids(&batch));
                if runs.borrow().len() == 1 {
                    // Two reorders land during the first batch; the second
                    // replaces the first, so only the newest order runs.
                    *pending.borrow_mut() = Some(vec![
                        item("b", Some(0)),
                        item("a", Some(1000)),
                        item("c", Some(2000)),
                    ]);
                    *pending.borrow_mut() = Some(vec![
                        item("c", Some(0)),
                        item("b", Some(1000)),
                        item("a", Some(2000)),
                    ]);
                }
                async { true }
            },
        ));

        let runs = runs.borrow();
        assert_eq!(runs.len(), 2);
        assert_eq!(
            runs[1],
            vec!["c".to_string(), "b".to_string(), "a".to_string()]
        );
    }

    #[test]
    fn test_drain_stops_when_a_batch_reports_sign_out() {
        let pending: RefCell<Option<Vec<Item>>> = RefCell::new(Some(vec![item("a", Some(0))]));
        let runs: Cell<usize> = Cell::new(0);

        let completed = block_on(drain_order_batches(
            || pending.borrow_mut().take(),
            |_batch| {
                runs.set(runs.get() + 1);
                *pending.borrow_mut() = Some(vec![item("b", Some(0))]);
                async { false }
            },
        ));

        assert!(!completed);
        assert_eq!(runs.get(), 1);
        // The queued order is left in place, not silently dropped.
        assert!(pending.borrow().is_some());
    }

    #[test]
    fn test_load_backfills_and_persists_before_publishing() {
        let fetched = vec![item("a", None), item("b", Some(7)), item("c", None)];
        let persisted: RefCell<Option<Vec<Item>>> = RefCell::new(None);

        let ready = block_on(prepare_loaded_items(
            fetched,
            || false,
            |batch| {
                *persisted.borrow_mut() = Some(batch);
                async { true }
            },
        ))
        .expect("list should publish");

        let positions: Vec<Option<i64>> = ready.iter().map(|it| it.position).collect();
        assert_eq!(positions, vec![Some(0), Some(1000), Some(2000)]);
        // The persisted batch is exactly what the caller gets to render.
        assert_eq!(persisted.borrow().as_ref(), Some(&ready));
    }

    #[test]
    fn test_fully_positioned_load_skips_the_backfill_write() {
        let fetched = vec![item("a", Some(0)), item("b", Some(1000))];
        let wrote = Cell::new(false);

        let ready = block_on(prepare_loaded_items(fetched.clone(), || false, |_batch| {
            wrote.set(true);
            async { true }
        }))
        .expect("list should publish");

        assert_eq!(ready, fetched);
        assert!(!wrote.get());
    }

    #[test]
    fn test_superseded_load_never_publishes() {
        let wrote = Cell::new(false);

        let ready = block_on(prepare_loaded_items(vec![item("a", None)], || true, |_batch| {
            wrote.set(true);
            async { true }
        }));

        assert!(ready.is_none());
        assert!(!wrote.get());
    }

    #[test]
    fn test_load_superseded_during_backfill_is_discarded() {
        let superseded = Cell::new(false);

        let ready = block_on(prepare_loaded_items(
            vec![item("a", None), item("b", None)],
            || superseded.get(),
            |_batch| {
                // A newer load starts while the backfill batch is in flight.
                superseded.set(true);
                async { true }
            },
        ));

        assert!(ready.is_none());
    }

    #[test]
    fn test_backfill_cut_short_by_sign_out_is_not_published() {
        let ready = block_on(prepare_loaded_items(vec![item("a", None)], || false, |_batch| async {
            false
        }));

        assert!(ready.is_none());
    }

    #[test]
    fn test_load_during_auth_resolution_resets_list_state() {
        let c = test_controller(Some(account("acc-1")));
        c.app_state.0.session.auth_loading.set(true);
        c.items.set(vec![item("a", Some(0))]);
        c.loading.set(true);
        c.error.set(Some(ListError::Remote("old failure".to_string())));

        c.load();

        assert!(c.items.get_untracked().is_empty());
        assert!(!c.loading.get_untracked());
        assert!(c.error.get_untracked().is_none());
    }

    #[test]
    fn test_load_without_owner_resets_list_state() {
        let c = test_controller(None);
        c.items.set(vec![item("a", Some(0))]);
        c.loading.set(true);
        c.error.set(Some(ListError::Remote("old failure".to_string())));

        c.load();

        assert!(c.items.get_untracked().is_empty());
        assert!(!c.loading.get_untracked());
        assert!(c.error.get_untracked().is_none());
    }
}

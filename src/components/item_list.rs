use crate::components::ui::{
    Alert, AlertDescription, Button, ButtonSize, ButtonVariant, Spinner,
};
use crate::models::{SortDirection, SortField};
use crate::state::items::{ItemListController, ListError};
use crate::state::AppContext;
use leptos::ev;
use leptos::prelude::*;
use leptos_dom::helpers::window_event_listener;

/// The current user's item list: sort controls, drag-to-reorder rows (custom
/// order only), per-row delete.
#[component]
pub fn ItemList() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let list = expect_context::<ItemListController>();

    let session = app_state.0.session;

    // Drag state. HTML5 drag events carry the dragged id in the DataTransfer
    // payload, but Leptos signals are simpler to read from the drop handler.
    let dragging_id: RwSignal<Option<String>> = RwSignal::new(None);
    let hover_index: RwSignal<Option<usize>> = RwSignal::new(None);

    let clear_drag = move || {
        dragging_id.set(None);
        hover_index.set(None);
    };

    // A drop outside any row never fires the row handlers; clear on the
    // window-level dragend so no row stays highlighted. Keep the handle
    // alive for the component's lifetime.
    let dragend_handle = window_event_listener(ev::dragend, move |_ev: web_sys::DragEvent| {
        clear_drag();
    });
    let _dragend_handle = StoredValue::new(Some(dragend_handle));

    let is_custom_order = {
        let list = list.clone();
        move || list.sort.get().is_custom_order()
    };

    let sort_button = {
        let list = list.clone();
        move |field: SortField, label: &'static str| {
            let list = list.clone();
            move || {
                let list = list.clone();
                let active = list.sort.get().field == field;
                let class = if active { "ring-1 ring-ring" } else { "" };
                let on_click = {
                    let list = list.clone();
                    move |_| {
                        let direction = list.sort.get_untracked().direction;
                        list.set_sort(field, direction);
                    }
                };
                view! {
                    <Button
                        variant=ButtonVariant::Outline
                        size=ButtonSize::Sm
                        class=class
                        on:click=on_click
                    >
                        {label}
                    </Button>
                }
            }
        }
    };

    let toggle_direction = {
        let list = list.clone();
        move |_| {
            let sort = list.sort.get_untracked();
            let flipped = match sort.direction {
                SortDirection::Asc => SortDirection::Desc,
                SortDirection::Desc => SortDirection::Asc,
            };
            list.set_sort(sort.field, flipped);
        }
    };

    let error_view = {
        let list = list.clone();
        move || {
            list.error.get().map(|e| {
                // A stopped persist batch is a warning (the list stays
                // usable); everything else is a failure.
                let partial = matches!(e, ListError::PartialOrderPersistence { .. });
                let class = if partial {
                    "border-amber-500/40"
                } else {
                    "border-destructive/30"
                };
                let text_class = if partial {
                    "text-amber-600 text-xs"
                } else {
                    "text-destructive text-xs"
                };
                view! {
                    <Alert class=class>
                        <AlertDescription class=text_class>{e.to_string()}</AlertDescription>
                    </Alert>
                }
            })
        }
    };

    let rows = {
        let list = list.clone();
        move || {
            let draggable = list.sort.get().is_custom_order();
            list.items
                .get()
                .into_iter()
                .enumerate()
                .map(|(idx, item)| {
                    let list = list.clone();
                    let id = item.id.clone();
                    let id_for_drag = id.clone();
                    let id_for_drop = id.clone();
                    let id_for_delete = id.clone();
                    let id_for_busy = id.clone();
                    let name = item.name.clone();
                    let delete_label = format!("Delete {}", item.name);
                    let description = item.description.clone();

                    let deleting = {
                        let list = list.clone();
                        move || list.is_deleting(&id_for_busy)
                    };

                    let deleting_attr = deleting.clone();

                    let highlighted = move || hover_index.get() == Some(idx);

                    let on_dragstart = move |ev: web_sys::DragEvent| {
                        if let Some(dt) = ev.data_transfer() {
                            let _ = dt.set_data("text/plain", &id_for_drag);
                            dt.set_effect_allowed("move");
                        }
                        dragging_id.set(Some(id_for_drag.clone()));
                    };

                    let on_dragover = move |ev: web_sys::DragEvent| {
                        if dragging_id.get_untracked().is_none() {
                            return;
                        }
                        // Required to make the row a valid drop target.
                        ev.prevent_default();
                        hover_index.set(Some(idx));
                    };

                    let on_drop = {
                        let list = list.clone();
                        move |ev: web_sys::DragEvent| {
                            ev.prevent_default();
                            let dragged = dragging_id
                                .get_untracked()
                                .or_else(|| {
                                    ev.data_transfer()
                                        .and_then(|dt| dt.get_data("text/plain").ok())
                                })
                                .unwrap_or_default();
                            clear_drag();

                            if !dragged.trim().is_empty() && dragged != id_for_drop {
                                list.reorder(&dragged, idx);
                            }
                        }
                    };

                    let on_delete = {
                        let list = list.clone();
                        move |_| list.delete(&id_for_delete)
                    };

                    view! {
                        <li
                            class="flex items-center justify-between gap-3 rounded-md border px-4 py-3"
                            class=("ring-1", highlighted)
                            class=("ring-ring", highlighted)
                            class=("cursor-grab", draggable)
                            draggable=draggable.to_string()
                            on:dragstart=on_dragstart
                            on:dragover=on_dragover
                            on:dragend=move |_| clear_drag()
                            on:drop=on_drop
                        >
                            <div class="flex min-w-0 items-center gap-3">
                                <Show when=move || draggable fallback=|| ().into_view()>
                                    <svg
                                        xmlns="http://www.w3.org/2000/svg"
                                        width="16"
                                        height="16"
                                        viewBox="0 0 24 24"
                                        fill="none"
                                        stroke="currentColor"
                                        stroke-width="2"
                                        stroke-linecap="round"
                                        stroke-linejoin="round"
                                        class="shrink-0 text-muted-foreground"
                                        aria-hidden="true"
                                    >
                                        <circle cx="9" cy="6" r="1" />
                                        <circle cx="15" cy="6" r="1" />
                                        <circle cx="9" cy="12" r="1" />
                                        <circle cx="15" cy="12" r="1" />
                                        <circle cx="9" cy="18" r="1" />
                                        <circle cx="15" cy="18" r="1" />
                                    </svg>
                                </Show>

                                <div class="min-w-0">
                                    <div class="truncate text-sm font-medium">{name}</div>
                                    {description.map(|d| view! {
                                        <p class="truncate text-xs text-muted-foreground">{d}</p>
                                    })}
                                </div>
                            </div>

                            <Button
                                variant=ButtonVariant::Destructive
                                size=ButtonSize::Sm
                                attr:disabled=deleting_attr
                                attr:aria-label=delete_label
                                on:click=on_delete
                            >
                                {move || if deleting() { "Deleting..." } else { "Delete" }}
                            </Button>
                        </li>
                    }
                })
                .collect_view()
        }
    };
    // Copy handle so nested `Fn` children closures don't move the row builder.
    let rows = StoredValue::new(rows);

    let loading = list.loading;
    let persisting = list.persisting;
    let direction_label = {
        let list = list.clone();
        move || match list.sort.get().direction {
            SortDirection::Asc => "Asc",
            SortDirection::Desc => "Desc",
        }
    };
    let has_items = {
        let list = list.clone();
        move || !list.items.get().is_empty()
    };
    let signed_in = move || session.current_user.get().is_some();

    view! {
        <div class="space-y-3">
            <div class="flex flex-wrap items-center gap-2">
                {sort_button(SortField::Position, "Custom")}
                {sort_button(SortField::Name, "Name")}
                {sort_button(SortField::CreatedAt, "Created")}

                <Button
                    variant=ButtonVariant::Ghost
                    size=ButtonSize::Sm
                    attr:disabled=is_custom_order.clone()
                    attr:title="Toggle direction"
                    on:click=toggle_direction
                >
                    {direction_label}
                </Button>

                <Show when=move || persisting.get() fallback=|| ().into_view()>
                    <span class="inline-flex items-center gap-1 text-xs text-muted-foreground">
                        <Spinner />
                        "Saving order..."
                    </span>
                </Show>
            </div>

            {error_view}

            <Show
                when=move || !session.auth_loading.get()
                fallback=|| view! {
                    <div class="py-3 text-center text-xs text-muted-foreground" aria-live="polite">
                        "Checking session..."
                    </div>
                }
            >
                <Show
                    when=signed_in
                    fallback=|| view! {
                        <div class="rounded-md border px-4 py-3 text-center text-sm text-muted-foreground">
                            "Please log in to view your items"
                        </div>
                    }
                >
                    <Show
                        when=move || !loading.get()
                        fallback=|| view! {
                            <div class="py-3 text-center text-xs text-muted-foreground" aria-live="polite">
                                "Loading items..."
                            </div>
                        }
                    >
                        <Show
                            when=has_items.clone()
                            fallback=|| view! {
                                <div class="rounded-md border px-4 py-3 text-center text-sm text-muted-foreground">
                                    "No items yet"
                                </div>
                            }
                        >
                            <ul class="flex flex-col gap-2" aria-label="To-do items list">
                                {move || rows.with_value(|rows| rows())}
                            </ul>
                        </Show>
                    </Show>
                </Show>
            </Show>
        </div>
    }
}

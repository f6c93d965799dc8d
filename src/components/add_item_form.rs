use crate::components::ui::{Alert, AlertDescription, Button, Input, Label, Spinner, Textarea};
use crate::state::items::ItemListController;
use leptos::prelude::*;

/// Form for inserting a new item. Submission goes through the shared list
/// controller so the list refreshes itself on success.
#[component]
pub fn AddItemForm(#[prop(optional, into)] on_added: Option<Callback<()>>) -> impl IntoView {
    let list = expect_context::<ItemListController>();

    let name = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());

    let adding = list.adding;
    let add_error = list.add_error;
    let add_success = list.add_success;

    // Reset the form once per successful insert, then re-arm the flag.
    Effect::new(move |_| {
        if !add_success.get() {
            return;
        }
        name.set(String::new());
        description.set(String::new());
        if let Some(cb) = on_added {
            cb.run(());
        }
        add_success.set(false);
    });

    let on_submit = {
        let list = list.clone();
        move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();
            list.add(name.get_untracked(), description.get_untracked());
        }
    };

    view! {
        <form class="flex flex-col gap-3" on:submit=on_submit>
            <div class="flex flex-col gap-1.5">
                <Label html_for="item-name" class="text-xs">"Name"</Label>
                <Input
                    id="item-name"
                    r#type="text"
                    placeholder="What needs doing?"
                    bind_value=name
                    required=true
                    class="h-8 text-sm"
                />
            </div>

            <div class="flex flex-col gap-1.5">
                <Label html_for="item-description" class="text-xs">"Description (optional)"</Label>
                <Textarea
                    id="item-description"
                    placeholder="Add a few details"
                    bind_value=description
                    class="text-sm"
                />
            </div>

            <Show when=move || add_error.get().is_some() fallback=|| ().into_view()>
                {move || {
                    add_error.get().map(|e| {
                        view! {
                            <Alert class="border-destructive/30">
                                <AlertDescription class="text-destructive text-xs">
                                    {e}
                                </AlertDescription>
                            </Alert>
                        }
                    })
                }}
            </Show>

            <Button class="w-full" attr:disabled=move || adding.get()>
                <span class="inline-flex items-center gap-2">
                    <Show when=move || adding.get() fallback=|| ().into_view()>
                        <Spinner />
                    </Show>
                    {move || if adding.get() { "Adding..." } else { "Add item" }}
                </span>
            </Button>
        </form>
    }
}

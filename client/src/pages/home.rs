//! Home page — upload form on top, the fetched gallery below.
//!
//! DATA FLOW
//! =========
//! The page fetches the record list once on mount and again after every
//! successful upload. Upload and load failures share one notice area so the
//! user always sees the most recent problem.

#[cfg(test)]
#[path = "home_test.rs"]
mod home_test;

use leptos::prelude::*;

use crate::components::record_card::RecordCard;
use crate::net::api;
use crate::state::gallery::GalleryState;
use crate::state::upload::UploadFormState;

/// Shown when submit is pressed before a file has been chosen.
#[cfg(any(test, feature = "hydrate"))]
const NO_FILE_MESSAGE: &str = "יש לבחור קובץ תמונה לפני השליחה";

fn submit_button_label(submitting: bool) -> &'static str {
    if submitting { "מעלה..." } else { "שליחה" }
}

/// Pre-submit check: without a chosen file nothing is sent, and the notice
/// tells the user what to do.
#[cfg(any(test, feature = "hydrate"))]
fn validate_chosen_file<T>(file: Option<T>) -> Result<T, &'static str> {
    file.ok_or(NO_FILE_MESSAGE)
}

/// Gallery home page.
#[component]
pub fn HomePage() -> impl IntoView {
    let gallery = expect_context::<RwSignal<GalleryState>>();
    let error = RwSignal::new(None::<String>);

    // Fetch the list once on mount; uploads trigger their own refresh.
    let requested = RwSignal::new(false);
    Effect::new(move || {
        if requested.get() {
            return;
        }
        leptos::task::spawn_local(load_images(gallery, error));
        requested.set(true);
    });

    view! {
        <main class="page">
            <header class="page__header">
                <div>
                    <h1 class="page__title">"Photo Manager"</h1>
                    <p class="page__tagline">"העלאת תמונות לשרת וצפייה בגלריה."</p>
                </div>
                <span class="page__badge">"Leptos + Axum"</span>
            </header>

            <section class="panel">
                <h2 class="panel__title">"העלאת תמונה חדשה"</h2>
                <UploadForm gallery=gallery error=error/>
            </section>

            <section class="panel">
                <h2 class="panel__title">"גלריה"</h2>
                <Gallery gallery=gallery/>
            </section>
        </main>
    }
}

/// Fetch the record list into shared state. Failure surfaces the fixed
/// Hebrew message and keeps whatever was already loaded.
async fn load_images(gallery: RwSignal<GalleryState>, error: RwSignal<Option<String>>) {
    gallery.update(|state| state.loading = true);
    error.set(None);
    match api::fetch_images().await {
        Ok(items) => gallery.set(GalleryState {
            items,
            loading: false,
        }),
        Err(message) => {
            error.set(Some(message));
            gallery.update(|state| state.loading = false);
        }
    }
}

/// The metadata + file form. Submit is rejected client-side when no file is
/// chosen; nothing is sent in that case.
#[component]
fn UploadForm(gallery: RwSignal<GalleryState>, error: RwSignal<Option<String>>) -> impl IntoView {
    let form = expect_context::<RwSignal<UploadFormState>>();
    let file_input = NodeRef::<leptos::html::Input>::new();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        submit_upload(gallery, form, error, file_input);
    };

    view! {
        <form class="upload-form" on:submit=on_submit>
            <label class="upload-form__field">
                "קובץ תמונה"
                <input type="file" accept="image/*" node_ref=file_input/>
            </label>

            <div class="upload-form__grid">
                <label class="upload-form__field">
                    "נושא"
                    <input
                        type="text"
                        prop:value=move || form.with(|state| state.subject.clone())
                        on:input=move |ev| {
                            form.update(|state| state.subject = event_target_value(&ev));
                        }
                    />
                </label>
                <label class="upload-form__field">
                    "בעלים"
                    <input
                        type="text"
                        prop:value=move || form.with(|state| state.owner_name.clone())
                        on:input=move |ev| {
                            form.update(|state| state.owner_name = event_target_value(&ev));
                        }
                    />
                </label>
                <label class="upload-form__field">
                    "מיקום"
                    <input
                        type="text"
                        prop:value=move || form.with(|state| state.location.clone())
                        on:input=move |ev| {
                            form.update(|state| state.location = event_target_value(&ev));
                        }
                    />
                </label>
                <label class="upload-form__field">
                    "מדריך"
                    <input
                        type="text"
                        prop:value=move || form.with(|state| state.guide_name.clone())
                        on:input=move |ev| {
                            form.update(|state| state.guide_name = event_target_value(&ev));
                        }
                    />
                </label>
            </div>

            <label class="upload-form__field">
                "הערות"
                <textarea
                    rows="3"
                    prop:value=move || form.with(|state| state.notes.clone())
                    on:input=move |ev| {
                        form.update(|state| state.notes = event_target_value(&ev));
                    }
                ></textarea>
            </label>

            <button
                class="upload-form__submit"
                type="submit"
                disabled=move || form.with(|state| state.submitting)
            >
                {move || submit_button_label(form.with(|state| state.submitting))}
            </button>

            <Show when=move || error.get().is_some()>
                <p class="upload-form__error">{move || error.get().unwrap_or_default()}</p>
            </Show>
        </form>
    }
}

/// Validate and send the upload, then clear the form and refresh the list.
fn submit_upload(
    gallery: RwSignal<GalleryState>,
    form: RwSignal<UploadFormState>,
    error: RwSignal<Option<String>>,
    file_input: NodeRef<leptos::html::Input>,
) {
    #[cfg(feature = "hydrate")]
    {
        if form.with_untracked(|state| state.submitting) {
            return;
        }
        let file = file_input
            .get_untracked()
            .and_then(|input| input.files())
            .and_then(|files| files.get(0));
        let file = match validate_chosen_file(file) {
            Ok(file) => file,
            Err(message) => {
                error.set(Some(message.to_owned()));
                return;
            }
        };

        error.set(None);
        form.update(|state| state.submitting = true);
        let entries = form.with_untracked(UploadFormState::field_entries);

        leptos::task::spawn_local(async move {
            match api::upload_image(&file, &entries).await {
                Ok(_) => {
                    form.update(UploadFormState::clear_fields);
                    if let Some(input) = file_input.get_untracked() {
                        input.set_value("");
                    }
                    load_images(gallery, error).await;
                }
                Err(message) => error.set(Some(message)),
            }
            form.update(|state| state.submitting = false);
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (gallery, form, error, file_input);
    }
}

/// Gallery body: loading notice, empty-state message, or the record grid.
#[component]
fn Gallery(gallery: RwSignal<GalleryState>) -> impl IntoView {
    view! {
        <Show
            when=move || !gallery.get().loading
            fallback=move || view! { <p class="gallery__status">"טוען תמונות..."</p> }
        >
            <Show
                when=move || !gallery.get().is_empty()
                fallback=move || {
                    view! {
                        <p class="gallery__status">
                            "אין עדיין תמונות. העלו תמונה ראשונה כדי להתחיל."
                        </p>
                    }
                }
            >
                <div class="gallery__grid">
                    {move || {
                        gallery
                            .get()
                            .items
                            .into_iter()
                            .map(|record| view! { <RecordCard record=record/> })
                            .collect::<Vec<_>>()
                    }}
                </div>
            </Show>
        </Show>
    }
}

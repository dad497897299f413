//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{Meta, MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::pages::home::HomePage;
use crate::state::{gallery::GalleryState, upload::UploadFormState};

/// HTML shell rendered on the server for SSR + hydration.
///
/// The page is Hebrew-first, so the document root is `dir="rtl"`.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="he" dir="rtl">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the shared gallery and upload-form contexts and sets up routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    // Provide reactive state contexts for all child components.
    let gallery = RwSignal::new(GalleryState::default());
    let upload_form = RwSignal::new(UploadFormState::default());

    provide_context(gallery);
    provide_context(upload_form);

    view! {
        <Stylesheet id="leptos" href="/pkg/photoshelf.css"/>
        <Title text="Photo Manager"/>
        <Meta name="description" content="העלאה וניהול תמונות דרך השרת"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=HomePage/>
            </Routes>
        </Router>
    }
}

//! Gallery card for a single stored image.

use leptos::prelude::*;

use crate::net::api::image_file_url;
use crate::net::types::ImageRecord;

/// One gallery card: the stored image plus its subject, owner, and location.
#[component]
pub fn RecordCard(record: ImageRecord) -> impl IntoView {
    let src = image_file_url(record.id);
    let title = record.title().to_owned();
    let owner = record.owner_label().to_owned();
    let location = record.location_label().to_owned();

    view! {
        <article class="record-card">
            <img class="record-card__image" src=src alt=title.clone() loading="lazy"/>
            <div class="record-card__body">
                <strong class="record-card__title">{title}</strong>
                <span class="record-card__meta">{owner}</span>
                <span class="record-card__meta">{location}</span>
            </div>
        </article>
    }
}

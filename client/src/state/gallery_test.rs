use super::*;

fn record(id: i64) -> ImageRecord {
    ImageRecord {
        id,
        filename: format!("photo-{id}.jpg"),
        subject: None,
        owner_name: None,
        location: None,
        guide_name: None,
        notes: None,
        uploaded_at: None,
    }
}

#[test]
fn default_starts_loading_with_no_items() {
    let state = GalleryState::default();
    assert!(state.loading);
    assert!(state.items.is_empty());
}

#[test]
fn is_empty_is_false_while_loading() {
    let state = GalleryState::default();
    assert!(!state.is_empty());
}

#[test]
fn is_empty_is_true_after_loading_nothing() {
    let state = GalleryState {
        items: Vec::new(),
        loading: false,
    };
    assert!(state.is_empty());
}

#[test]
fn is_empty_is_false_once_records_arrive() {
    let state = GalleryState {
        items: vec![record(1)],
        loading: false,
    };
    assert!(!state.is_empty());
}

use bytes::Bytes;

use docspeak::application::ports::{BlobStore, BlobStoreError};
use docspeak::infrastructure::storage::ObjectBlobStore;

const BASE: &str = "https://audio.blob.core.windows.net/output-wav";

#[tokio::test]
async fn given_stored_blob_when_fetching_then_bytes_match() {
    let store = ObjectBlobStore::in_memory(BASE).unwrap();

    store
        .put("Gothic.wav", Bytes::from_static(b"RIFF"), Some("audio/wav"))
        .await
        .unwrap();

    assert_eq!(store.fetch("Gothic.wav").await.unwrap().as_ref(), b"RIFF");
}

#[tokio::test]
async fn given_existing_blob_when_putting_again_then_content_is_overwritten() {
    let store = ObjectBlobStore::in_memory(BASE).unwrap();
    store
        .put("Gothic.wav", Bytes::from_static(b"first"), None)
        .await
        .unwrap();

    store
        .put("Gothic.wav", Bytes::from_static(b"second"), None)
        .await
        .unwrap();

    assert_eq!(store.fetch("Gothic.wav").await.unwrap().as_ref(), b"second");
    assert_eq!(store.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn given_missing_blob_when_fetching_then_returns_not_found() {
    let store = ObjectBlobStore::in_memory(BASE).unwrap();

    let result = store.fetch("missing.wav").await;

    assert!(matches!(result, Err(BlobStoreError::NotFound(_))));
}

#[tokio::test]
async fn given_blobs_when_listing_then_paths_are_reported() {
    let store = ObjectBlobStore::in_memory(BASE).unwrap();
    store
        .put("a.pdf", Bytes::from_static(b"12345"), None)
        .await
        .unwrap();

    let entries = store.list().await.unwrap();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].path, "a.pdf");
}

#[test]
fn given_name_with_spaces_when_building_locator_then_it_is_percent_encoded() {
    let store = ObjectBlobStore::in_memory(BASE).unwrap();

    let locator = store.locator("Doric Order.wav").unwrap();

    assert_eq!(locator, format!("{BASE}/Doric%20Order.wav"));
}

#[test]
fn given_base_url_with_trailing_slash_when_building_locator_then_no_double_slash() {
    let store = ObjectBlobStore::in_memory(&format!("{BASE}/")).unwrap();

    assert_eq!(
        store.locator("Gothic.wav").unwrap(),
        format!("{BASE}/Gothic.wav")
    );
}

#[test]
fn given_invalid_base_url_when_creating_store_then_returns_invalid_locator() {
    let result = ObjectBlobStore::in_memory("not a url");

    assert!(matches!(result, Err(BlobStoreError::InvalidLocator(_))));
}

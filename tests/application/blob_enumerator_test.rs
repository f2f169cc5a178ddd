use docspeak::application::services::BlobEnumerator;

use crate::helpers::{SOURCE_BASE_URL, put_pdf, source_store};

#[tokio::test]
async fn given_pdfs_in_container_when_listing_then_returns_keys_and_locators() {
    let store = source_store();
    put_pdf(&store, "Gothic-Architecture.pdf").await;
    put_pdf(&store, "Doric-Order.pdf").await;

    let documents = BlobEnumerator::new(store).list().await.unwrap();

    let mut keys: Vec<&str> = documents.iter().map(|d| d.key.as_str()).collect();
    keys.sort();
    assert_eq!(keys, vec!["Doric Order", "Gothic Architecture"]);
    let doric = documents.iter().find(|d| d.key == "Doric Order").unwrap();
    assert_eq!(doric.locator, format!("{SOURCE_BASE_URL}/Doric-Order.pdf"));
}

#[tokio::test]
async fn given_empty_container_when_listing_then_returns_empty() {
    let documents = BlobEnumerator::new(source_store()).list().await.unwrap();

    assert!(documents.is_empty());
}

#[tokio::test]
async fn given_non_pdf_object_when_listing_then_it_is_kept_with_full_name_as_key() {
    let store = source_store();
    put_pdf(&store, "notes.txt").await;

    let documents = BlobEnumerator::new(store).list().await.unwrap();

    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0].key, "notes.txt");
}

#[tokio::test]
async fn given_names_colliding_after_key_derivation_when_listing_then_both_are_returned() {
    let store = source_store();
    put_pdf(&store, "Roman-Arches.pdf").await;
    put_pdf(&store, "Roman Arches.pdf").await;

    let documents = BlobEnumerator::new(store).list().await.unwrap();

    assert_eq!(documents.len(), 2);
    assert!(documents.iter().all(|d| d.key == "Roman Arches"));
}

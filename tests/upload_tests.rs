use anyhow::Result;
use async_trait::async_trait;
use mockall::mock;
use regex::Regex;

use folio_backend::constants::MAX_UPLOAD_BYTES;
use folio_backend::errors::UploadError;
use folio_backend::storage::MediaStore;
use folio_backend::use_cases::uploads::UploadHandler;

mock! {
    pub Store {}

    #[async_trait]
    impl MediaStore for Store {
        async fn exists(&self, filename: &str) -> Result<bool>;
        async fn put(&self, filename: &str, bytes: &[u8], content_type: &str) -> Result<()>;
        fn public_url(&self, filename: &str) -> String;
    }
}

const PNG_MAGIC: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

fn png_bytes(total_len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; total_len];
    bytes[..PNG_MAGIC.len()].copy_from_slice(&PNG_MAGIC);
    bytes
}

fn accepting_store() -> MockStore {
    let mut store = MockStore::new();
    store.expect_exists().returning(|_| Ok(false));
    store.expect_put().returning(|_, _, _| Ok(()));
    store
        .expect_public_url()
        .returning(|filename| format!("https://storage.example.com/media/{}", filename));
    store
}

#[tokio::test]
async fn accepts_a_png_and_returns_its_public_location() {
    let handler = UploadHandler::new(accepting_store());

    let response = handler
        .upload("My Photo.png", png_bytes(2 * 1024 * 1024), "image/png")
        .await
        .unwrap();

    assert!(response.url.starts_with("https://storage.example.com/media/"));
    assert_eq!(response.size, 2 * 1024 * 1024);
    assert_eq!(response.content_type, "image/png");

    let pattern = Regex::new(r"^\d+-[\w-]+\.png$").unwrap();
    assert!(
        pattern.is_match(&response.filename),
        "{} should match the filename contract",
        response.filename
    );
}

#[tokio::test]
async fn exactly_five_mebibytes_passes_the_ceiling() {
    let handler = UploadHandler::new(accepting_store());

    let result = handler
        .upload("big.png", png_bytes(MAX_UPLOAD_BYTES), "image/png")
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn one_byte_over_the_ceiling_is_a_size_error() {
    // No expectations: storage must not be touched.
    let handler = UploadHandler::new(MockStore::new());

    let result = handler
        .upload("big.png", png_bytes(MAX_UPLOAD_BYTES + 1), "image/png")
        .await;

    assert!(matches!(result, Err(UploadError::TooLarge)));
}

#[tokio::test]
async fn pdf_is_rejected_naming_the_allowed_types() {
    let handler = UploadHandler::new(MockStore::new());

    let result = handler
        .upload("paper.pdf", b"%PDF-1.7 ...".to_vec(), "application/pdf")
        .await;

    let err = result.expect_err("pdf should be rejected");
    assert!(matches!(err, UploadError::InvalidType));

    let message = err.to_string();
    for allowed in ["image/jpeg", "image/png", "image/webp", "image/gif", "image/svg+xml"] {
        assert!(message.contains(allowed), "{message} should list {allowed}");
    }
}

#[tokio::test]
async fn sniffed_type_overrides_a_lying_declaration() {
    let handler = UploadHandler::new(MockStore::new());

    // Declared png, actually a PDF payload.
    let result = handler
        .upload("sneaky.png", b"%PDF-1.7 fake image".to_vec(), "image/png")
        .await;

    assert!(matches!(result, Err(UploadError::InvalidType)));
}

#[tokio::test]
async fn svg_passes_on_its_declared_type() {
    let handler = UploadHandler::new(accepting_store());

    let result = handler
        .upload("icon.svg", b"<svg xmlns='http://www.w3.org/2000/svg'/>".to_vec(), "image/svg+xml")
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn a_name_collision_fails_instead_of_clobbering() {
    let mut store = MockStore::new();
    store.expect_exists().returning(|_| Ok(true));

    let handler = UploadHandler::new(store);
    let result = handler
        .upload("photo.png", png_bytes(1024), "image/png")
        .await;

    assert!(matches!(result, Err(UploadError::StorageFailure(_))));
}

use retro_cloud_remote::{
    CatalogCache, MAX_REDIRECTS, MIN_IMAGE_SIZE, MatchOptions, MatchTier, MemorySource,
    PNG_SIGNATURE, RemoteCatalog, RemoteError, materialize, resolve_in,
};

const COLLECTION: &str = "Nintendo_-_Game_Boy";

fn png(tag: &[u8]) -> Vec<u8> {
    let mut data = PNG_SIGNATURE.to_vec();
    data.extend_from_slice(tag);
    data.resize(MIN_IMAGE_SIZE + 64, 0);
    data
}

/// A source where `hop0.png -> hop1.png -> ... -> hop{n}.png` and the last
/// file is a real PNG.
fn chain(redirects: usize) -> MemorySource {
    let mut source = MemorySource::new();
    for i in 0..redirects {
        source = source.with_pointer(COLLECTION, &format!("hop{i}.png"), &format!("hop{}.png", i + 1));
    }
    source.with_boxart(COLLECTION, &format!("hop{redirects}.png"), &png(b"final"))
}

#[test]
fn png_is_written_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("gb").join("Tetris.png");
    let source = MemorySource::new().with_boxart(COLLECTION, "Tetris (World).png", &png(b"tetris"));

    let done = materialize(&source, COLLECTION, "Tetris (World).png", &dest).unwrap();
    assert_eq!(done.hops, 0);
    assert_eq!(std::fs::read(&dest).unwrap(), png(b"tetris"));
}

#[test]
fn follows_up_to_three_redirects() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("out.png");
    let source = chain(MAX_REDIRECTS);

    let done = materialize(&source, COLLECTION, "hop0.png", &dest).unwrap();
    assert_eq!(done.hops, 3);
    assert_eq!(done.resolved_name, "hop3.png");
    assert_eq!(std::fs::read(&dest).unwrap(), png(b"final"));
    assert_eq!(source.fetched().len(), 4);
}

#[test]
fn fourth_redirect_fails() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("out.png");
    let source = chain(MAX_REDIRECTS + 1);

    let err = materialize(&source, COLLECTION, "hop0.png", &dest).unwrap_err();
    assert!(matches!(err, RemoteError::TooManyRedirects { hops: 3, .. }), "{err}");
    assert!(!dest.exists());
    // The PNG at the end of the chain is never requested.
    assert!(!source.fetched().contains(&"hop4.png".to_string()));
}

#[test]
fn garbage_payload_is_not_an_image() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("out.png");
    let source = MemorySource::new().with_boxart(COLLECTION, "bad.png", &[0u8, 1, 2, 3, 0xff]);

    let err = materialize(&source, COLLECTION, "bad.png", &dest).unwrap_err();
    assert!(matches!(err, RemoteError::NotAnImage { .. }));
    assert!(!dest.exists());
}

#[test]
fn tiny_png_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("out.png");
    let mut tiny = PNG_SIGNATURE.to_vec();
    tiny.extend_from_slice(b"IHDR");
    let source = MemorySource::new()
        .with_pointer(COLLECTION, "alias.png", "tiny.png")
        .with_boxart(COLLECTION, "tiny.png", &tiny);

    let err = materialize(&source, COLLECTION, "alias.png", &dest).unwrap_err();
    assert!(
        matches!(&err, RemoteError::TooSmall { file_name, bytes: 12 } if file_name == "tiny.png"),
        "{err}"
    );
    assert!(!dest.exists());
}

#[test]
fn missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = materialize(&MemorySource::new(), COLLECTION, "nope.png", &dir.path().join("x.png"))
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn failed_listing_is_requested_once_per_run() {
    let source = MemorySource::new().with_failing_listing(COLLECTION);
    let mut cache = CatalogCache::new();

    for key in ["tetris", "dr mario", "kirby s dream land"] {
        assert!(resolve_in(key, &[COLLECTION], &mut cache, &source, MatchOptions::default()).is_none());
    }
    assert_eq!(source.listed(), [COLLECTION]);
    assert_eq!(cache.requests(), 1);
    assert!(cache.is_cached(COLLECTION));
}

#[test]
fn successful_listing_is_reused() {
    let source = MemorySource::new()
        .with_boxart(COLLECTION, "Tetris (World).png", &png(b"t"))
        .with_boxart(COLLECTION, "Dr. Mario (World).png", &png(b"d"));
    let mut cache = CatalogCache::new();

    let first = resolve_in("tetris", &[COLLECTION], &mut cache, &source, MatchOptions::default());
    let second = resolve_in("dr mario", &[COLLECTION], &mut cache, &source, MatchOptions::default());
    assert_eq!(first.unwrap().file_name, "Tetris (World).png");
    assert_eq!(second.unwrap().file_name, "Dr. Mario (World).png");
    assert_eq!(source.listed().len(), 1);
}

#[test]
fn seeded_catalog_skips_listing() {
    let source = MemorySource::new();
    let mut cache = CatalogCache::new();
    cache.insert(RemoteCatalog::from_paths(
        COLLECTION,
        ["Named_Boxarts/Tetris (World).png"],
    ));

    let found = resolve_in("tetris", &[COLLECTION], &mut cache, &source, MatchOptions::default())
        .unwrap();
    assert_eq!(found.file_name, "Tetris (World).png");
    assert_eq!(found.tier, MatchTier::Exact);
    assert!(source.listed().is_empty());
    assert_eq!(cache.requests(), 0);
}

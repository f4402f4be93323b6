use std::fs;
use std::path::Path;

use retro_cloud_core::System;
use retro_cloud_lib::{
    BuildEvent, BuildOptions, CoverOptions, ImageSource, LibError, MIN_ASSET_SIZE, Manifest,
    OverrideMap, Settings, build_manifest, download_covers, purge_corrupt_assets,
};
use retro_cloud_remote::{CatalogCache, MemorySource, PNG_SIGNATURE};

const NES: &str = "Nintendo_-_Nintendo_Entertainment_System";
const SNES: &str = "Nintendo_-_Super_Nintendo_Entertainment_System";
const FBNEO: &str = "FBNeo_-_Arcade_Games";

fn png() -> Vec<u8> {
    let mut data = PNG_SIGNATURE.to_vec();
    data.resize(300, 7);
    data
}

fn touch(root: &Path, rel: &str, len: usize) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, vec![1u8; len]).unwrap();
}

fn settings(root: &Path) -> Settings {
    let mut settings = Settings::default();
    settings.rom_dir = root.join("public/roms");
    settings.asset_dir = root.join("public/logos");
    settings.output = root.join("public/data/gamelist.json");
    settings.web_root = root.to_path_buf();
    settings.remote.download_delay_ms = 0;
    settings
}

fn options(root: &Path) -> BuildOptions {
    BuildOptions::from_settings(&settings(root))
}

fn sample_tree(root: &Path) {
    touch(root, "public/roms/nes/Zelda (USA) [!].nes", 64);
    touch(root, "public/roms/nes/notes.txt", 10);
    touch(root, "public/roms/snes/Chrono Trigger.sfc", 64);
    touch(root, "public/roms/psx/Final Fantasy VII (USA) (Disc 1).bin", 64);
    touch(root, "public/roms/genesis/Sonic the Hedgehog (USA, Europe).md", 64);
    touch(root, "public/roms/arcade/mslug.zip", 64);
}

fn sample_source() -> MemorySource {
    MemorySource::new()
        .with_boxart(NES, "Zelda (USA).png", &png())
        .with_boxart(SNES, "Chrono Trigger (USA).png", &png())
        .with_boxart(FBNEO, "Metal Slug - Super Vehicle-001 (NGM-2010).png", &png())
}

fn build(
    options: &BuildOptions,
    source: &MemorySource,
    overrides: &OverrideMap,
) -> retro_cloud_lib::BuildResult {
    let mut cache = CatalogCache::new();
    build_manifest(options, source, &mut cache, overrides, &mut |_| {}).unwrap()
}

#[test]
fn one_entry_per_recognized_file() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    sample_tree(root);
    let opts = options(root);

    let result = build(&opts, &sample_source(), &OverrideMap::default());
    let manifest = &result.manifest;

    assert_eq!(manifest.len(), 5);
    assert_eq!(result.report.skipped, 1);
    assert!(manifest.iter().all(|e| !e.rom_path.ends_with(".txt")));

    let ids: Vec<&str> = manifest.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(
        ids,
        [
            "mslug_zip",
            "sonic_the_hedgehog_(usa,_europe)_md",
            "zelda_(usa)_[!]_nes",
            "final_fantasy_vii_(usa)_(disc_1)_bin",
            "chrono_trigger_sfc",
        ]
    );

    let mslug = &manifest.entries[0];
    assert_eq!(mslug.system, System::Arcade);
    assert_eq!(mslug.core, "fbneo");
    assert_eq!(mslug.name, "Metal Slug - Super Vehicle-001");
    assert_eq!(mslug.rom_path, "public/roms/arcade/mslug.zip");
    assert_eq!(mslug.image, "public/logos/arcade/mslug.png");

    let ff7 = &manifest.entries[3];
    assert_eq!(ff7.system, System::Ps1);
    assert_eq!(ff7.image, "assets/default.png");
    assert_eq!(ff7.crc32.as_deref().map(str::len), Some(8));

    // The written file matches what was returned.
    let written = Manifest::load(&opts.output).unwrap();
    assert_eq!(&written, manifest);
    assert_eq!(result.report.written.as_deref(), Some(opts.output.as_path()));
}

#[test]
fn downloaded_covers_land_in_asset_store() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    sample_tree(root);
    let opts = options(root);

    let result = build(&opts, &sample_source(), &OverrideMap::default());
    assert_eq!(result.report.downloaded, 3);
    assert_eq!(result.report.placeholders, 2);
    assert_eq!(result.report.failures, 0);

    let zelda = root.join("public/logos/nes/Zelda (USA) [!].png");
    assert_eq!(fs::read(zelda).unwrap(), png());
}

#[test]
fn override_wins_regardless_of_remote() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    sample_tree(root);
    // A local asset exists too; the override still takes precedence.
    touch(root, "public/logos/snes/Chrono Trigger.png", 500);
    let opts = options(root);

    let overrides = OverrideMap::from_json(r#"{"Chrono Trigger": "custom/ct.png"}"#).unwrap();
    let source = sample_source();
    let result = build(&opts, &source, &overrides);

    let ct = result
        .manifest
        .iter()
        .find(|e| e.id == "chrono_trigger_sfc")
        .unwrap();
    assert_eq!(ct.image, "custom/ct.png");
    assert_eq!(result.report.overrides, 1);
    assert!(!source.fetched().contains(&"Chrono Trigger (USA).png".to_string()));
}

#[test]
fn local_asset_is_used_before_remote() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    touch(root, "public/roms/nes/Zelda (USA) [!].nes", 64);
    touch(root, "public/logos/nes/Zelda (USA) [!].jpg", 500);
    let source = sample_source();

    let result = build(&options(root), &source, &OverrideMap::default());
    assert_eq!(result.manifest.entries[0].image, "public/logos/nes/Zelda (USA) [!].jpg");
    assert_eq!(result.report.local, 1);
    assert!(source.listed().is_empty());
}

#[test]
fn purged_assets_are_not_referenced() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    touch(root, "public/roms/nes/Zelda (USA) [!].nes", 64);
    touch(root, "public/logos/nes/Zelda (USA) [!].png", 57);
    let mut opts = options(root);
    opts.resolve_remote = false;

    let purge = purge_corrupt_assets(&opts.asset_dir, MIN_ASSET_SIZE, false).unwrap();
    assert_eq!(purge.removed.len(), 1);

    let result = build(&opts, &MemorySource::new(), &OverrideMap::default());
    assert_eq!(result.manifest.entries[0].image, "assets/default.png");
    assert!(!root.join("public/logos/nes/Zelda (USA) [!].png").exists());
}

#[test]
fn tiny_remote_cover_is_never_referenced() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    touch(root, "public/roms/nes/Zelda (USA) [!].nes", 64);
    let mut tiny = PNG_SIGNATURE.to_vec();
    tiny.extend_from_slice(b"IHDR");
    let source = MemorySource::new().with_boxart(NES, "Zelda (USA).png", &tiny);
    let opts = options(root);

    let result = build(&opts, &source, &OverrideMap::default());
    assert_eq!(result.manifest.entries[0].image, "assets/default.png");
    assert_eq!(result.report.downloaded, 0);
    assert_eq!(result.report.failures, 1);
    assert!(!root.join("public/logos/nes/Zelda (USA) [!].png").exists());

    // Nothing for the cleanup pass to remove, so the manifest stays valid.
    let purge = purge_corrupt_assets(&opts.asset_dir, MIN_ASSET_SIZE, false).unwrap();
    assert!(purge.removed.is_empty());
}

#[test]
fn link_remote_emits_urls() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    touch(root, "public/roms/nes/Zelda (USA) [!].nes", 64);
    let mut opts = options(root);
    opts.link_remote = true;

    let source = sample_source();
    let result = build(&opts, &source, &OverrideMap::default());
    assert_eq!(result.manifest.entries[0].image, format!("memory://{NES}/Zelda (USA).png"));
    assert_eq!(result.report.linked, 1);
    assert!(source.fetched().is_empty());
    assert!(!root.join("public/logos").exists());
}

#[test]
fn failed_download_falls_back_to_placeholder() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    touch(root, "public/roms/nes/Zelda (USA) [!].nes", 64);
    let source = MemorySource::new().with_boxart(NES, "Zelda (USA).png", b"<html>nope</html>");

    let mut failures = Vec::new();
    let mut cache = CatalogCache::new();
    let result = build_manifest(
        &options(root),
        &source,
        &mut cache,
        &OverrideMap::default(),
        &mut |event| {
            if let BuildEvent::ImageFailed { file, .. } = event {
                failures.push(file);
            }
        },
    )
    .unwrap();

    assert_eq!(result.manifest.entries[0].image, "assets/default.png");
    assert_eq!(result.report.failures, 1);
    assert_eq!(failures, ["Zelda (USA) [!].nes"]);
}

#[test]
fn failing_listing_is_requested_once() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    for name in ["Contra", "Metroid", "Kid Icarus", "Mega Man 2"] {
        touch(root, &format!("public/roms/nes/{name} (USA).nes"), 16);
    }
    let source = MemorySource::new().with_failing_listing(NES);

    let result = build(&options(root), &source, &OverrideMap::default());
    assert_eq!(result.report.placeholders, 4);
    assert_eq!(source.listed(), [NES]);
}

#[test]
fn empty_tree_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    touch(root, "public/roms/readme.txt", 10);
    let opts = options(root);

    let result = build(&opts, &MemorySource::new(), &OverrideMap::default());
    assert!(result.manifest.is_empty());
    assert_eq!(result.report.written, None);
    assert!(!opts.output.exists());
}

#[test]
fn missing_rom_dir_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let mut cache = CatalogCache::new();
    let err = build_manifest(
        &options(dir.path()),
        &MemorySource::new(),
        &mut cache,
        &OverrideMap::default(),
        &mut |_| {},
    )
    .unwrap_err();
    assert!(matches!(err, LibError::RomRootMissing(_)));
}

#[test]
fn system_filter_and_disabled_checksums() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    sample_tree(root);
    let mut opts = options(root);
    opts.systems = Some(vec![System::Nes, System::Snes]);
    opts.checksums = false;
    opts.resolve_remote = false;

    let result = build(&opts, &MemorySource::new(), &OverrideMap::default());
    assert_eq!(result.manifest.len(), 2);
    assert_eq!(result.report.filtered, 3);
    assert!(result.manifest.iter().all(|e| e.crc32.is_none()));
}

#[test]
fn events_bracket_each_entry() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    sample_tree(root);
    let mut opts = options(root);
    opts.resolve_remote = false;

    let mut started = 0;
    let mut completed = Vec::new();
    let mut total = None;
    let mut cache = CatalogCache::new();
    build_manifest(&opts, &MemorySource::new(), &mut cache, &OverrideMap::default(), &mut |event| {
        match event {
            BuildEvent::ScanComplete { total: t, .. } => total = Some(t),
            BuildEvent::EntryStarted { .. } => started += 1,
            BuildEvent::EntryCompleted { source, .. } => completed.push(source),
            _ => {}
        }
    })
    .unwrap();

    assert_eq!(total, Some(5));
    assert_eq!(started, 5);
    assert!(completed.iter().all(|s| *s == ImageSource::Placeholder));
}

#[test]
fn cover_batch_skips_existing_and_downloads_missing() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    sample_tree(root);
    touch(root, "public/logos/snes/Chrono Trigger.webp", 500);

    let mut opts = CoverOptions::from_settings(&settings(root));
    opts.systems = Some(vec![System::Nes, System::Snes, System::Arcade]);
    let mut cache = CatalogCache::new();
    let report = download_covers(&opts, &sample_source(), &mut cache, &mut |_| {}).unwrap();

    assert_eq!(report.total, 3);
    assert_eq!(report.existing, 1);
    assert_eq!(report.downloaded, 2);
    assert!(root.join("public/logos/arcade/mslug.png").is_file());
    assert!(root.join("public/logos/nes/Zelda (USA) [!].png").is_file());
}

#[test]
fn cover_batch_exact_only_misses_fuzzy_titles() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    touch(root, "public/roms/snes/Chrono Trigger - Special (USA).sfc", 64);
    let mut opts = CoverOptions::from_settings(&settings(root));

    opts.match_options.fuzzy = false;
    let mut cache = CatalogCache::new();
    let report = download_covers(&opts, &sample_source(), &mut cache, &mut |_| {}).unwrap();
    assert_eq!(report.not_found, 1);

    opts.match_options.fuzzy = true;
    let report = download_covers(&opts, &sample_source(), &mut cache, &mut |_| {}).unwrap();
    assert_eq!(report.downloaded, 1);
}

#[test]
fn cover_batch_counts_tiny_cover_as_failed() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    touch(root, "public/roms/nes/Zelda (USA) [!].nes", 64);
    let mut tiny = PNG_SIGNATURE.to_vec();
    tiny.resize(MIN_ASSET_SIZE as usize - 1, 0);
    let source = MemorySource::new().with_boxart(NES, "Zelda (USA).png", &tiny);

    let opts = CoverOptions::from_settings(&settings(root));
    let mut cache = CatalogCache::new();
    let report = download_covers(&opts, &source, &mut cache, &mut |_| {}).unwrap();

    assert_eq!(report.downloaded, 0);
    assert_eq!(report.failed, 1);
    assert!(!root.join("public/logos/nes").exists());
}

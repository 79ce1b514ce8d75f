//! Store-backed jobs against a filesystem store.

use std::fs;

use image::{Rgba, RgbaImage};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

use spritenorm::{
    decode_image, encode_png, run_job, JobRequest, LocalStore, NormError, NormalizeOptions,
    SheetMetadata,
};

fn upload(root: &TempDir, key: &str) {
    let mut img = RgbaImage::new(60, 30);
    for y in 4..16 {
        for x in 4..14 {
            img.put_pixel(x, y, Rgba([200, 20, 20, 255]));
        }
        for x in 30..44 {
            img.put_pixel(x, y, Rgba([20, 20, 200, 255]));
        }
    }
    let path = root.path().join("sprites").join(key);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, encode_png(&img).unwrap()).unwrap();
}

fn request(key: &str, owner: &str) -> JobRequest {
    JobRequest {
        bucket: "sprites".to_string(),
        key: key.to_string(),
        owner: owner.to_string(),
        options: None,
    }
}

#[test]
fn job_writes_sheet_and_metadata_under_owner() {
    let root = TempDir::new().unwrap();
    upload(&root, "raw/u42/walk.png");
    let store = LocalStore::new(root.path());

    let report = run_job(&store, &request("raw/u42/walk.png", "u42")).unwrap();
    assert!(report.ok);
    assert_eq!(report.normalized_png_path, "normalized/u42/spritesheet.png");
    assert_eq!(report.metadata_path, "normalized/u42/metadata.json");
    assert_eq!((report.frame_size.w, report.frame_size.h), (18, 16));
    assert_eq!(report.frame_count, 2);

    let out = root.path().join("sprites/normalized/u42");
    let sheet = decode_image(&fs::read(out.join("spritesheet.png")).unwrap()).unwrap();
    assert_eq!(sheet.dimensions(), (36, 16));

    let meta: SheetMetadata =
        serde_json::from_str(&fs::read_to_string(out.join("metadata.json")).unwrap()).unwrap();
    assert_eq!(meta.original_frame_count, 2);
    assert_eq!(meta.padding, 2);
}

#[test]
fn job_accepts_public_object_urls() {
    let root = TempDir::new().unwrap();
    upload(&root, "raw/u7/idle.png");
    let store = LocalStore::new(root.path());

    let url = "https://assets.example.com/storage/v1/object/public/sprites/raw/u7/idle.png";
    let report = run_job(&store, &request(url, "u7")).unwrap();
    assert_eq!(report.source_path, "raw/u7/idle.png");
}

#[test]
fn job_rejects_keys_outside_owner_prefix() {
    let root = TempDir::new().unwrap();
    upload(&root, "raw/u1/walk.png");
    let store = LocalStore::new(root.path());

    let err = run_job(&store, &request("raw/u1/walk.png", "u2")).unwrap_err();
    assert!(matches!(err, NormError::Request { .. }), "got {err:?}");
    assert!(!root.path().join("sprites/normalized").exists());
}

#[test]
fn job_reports_missing_upload() {
    let root = TempDir::new().unwrap();
    let store = LocalStore::new(root.path());

    let err = run_job(&store, &request("raw/u1/missing.png", "u1")).unwrap_err();
    assert!(matches!(err, NormError::Storage { .. }), "got {err:?}");
}

#[test]
fn job_request_from_wire_json() {
    let json = r#"{
        "bucket": "sprites",
        "key": "raw/u9/run.png",
        "user_id": "u9",
        "options": { "transparencyThreshold": 1, "normalizedPadding": 0, "forceTileWidth": 24 }
    }"#;
    let req: JobRequest = serde_json::from_str(json).unwrap();
    assert_eq!(req.owner, "u9");

    let opts = req.options();
    assert_eq!(
        opts,
        NormalizeOptions {
            transparency_threshold: 1,
            padding: 0,
            force_tile_width: Some(24),
            ..Default::default()
        }
    );
}

use super::*;
use std::{
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn temp_root(label: &str) -> PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    env::temp_dir().join(format!("gallery_prefs_{label}_{suffix}"))
}

#[test]
fn missing_layout_falls_back_to_grid() {
    let store = MemoryPreferenceStore::default();
    assert_eq!(load_layout(&store), GalleryLayout::Grid);
}

#[test]
fn invalid_layout_falls_back_to_grid() {
    let store = MemoryPreferenceStore::default();
    store
        .set(LAYOUT_PREFERENCE_KEY, "mosaic")
        .expect("set");
    assert_eq!(load_layout(&store), GalleryLayout::Grid);
}

#[test]
fn saved_layout_is_loaded_back() {
    let store = MemoryPreferenceStore::default();
    save_layout(&store, GalleryLayout::Carousel).expect("save");
    assert_eq!(
        store.get(LAYOUT_PREFERENCE_KEY).expect("get").as_deref(),
        Some("carousel")
    );
    assert_eq!(load_layout(&store), GalleryLayout::Carousel);
}

#[test]
fn file_store_persists_across_instances_and_creates_parent_dir() {
    let root = temp_root("persist");
    let path = root.join("nested").join("preferences.toml");

    save_layout(&FilePreferenceStore::new(&path), GalleryLayout::Cards).expect("save");
    FilePreferenceStore::new(&path)
        .set("other.key", "kept")
        .expect("set other");

    let reopened = FilePreferenceStore::new(&path);
    assert_eq!(load_layout(&reopened), GalleryLayout::Cards);
    assert_eq!(
        reopened.get("other.key").expect("get").as_deref(),
        Some("kept")
    );
    assert!(fs::read_to_string(&path)
        .expect("file")
        .contains("\"gallery.layout\" = \"cards\""));

    fs::remove_dir_all(root).expect("cleanup");
}

#[test]
fn file_store_reads_missing_file_as_empty() {
    let store = FilePreferenceStore::new(temp_root("missing").join("preferences.toml"));
    assert_eq!(store.get(LAYOUT_PREFERENCE_KEY).expect("get"), None);
    assert_eq!(load_layout(&store), GalleryLayout::Grid);
}

#[test]
fn corrupt_file_is_reported_and_layout_falls_back() {
    let root = temp_root("corrupt");
    fs::create_dir_all(&root).expect("root");
    let path = root.join("preferences.toml");
    fs::write(&path, "this is = = not toml").expect("write");

    let store = FilePreferenceStore::new(&path);
    assert!(matches!(
        store.get(LAYOUT_PREFERENCE_KEY),
        Err(PreferenceError::Parse { .. })
    ));
    assert_eq!(load_layout(&store), GalleryLayout::Grid);

    fs::remove_dir_all(root).expect("cleanup");
}

use super::*;

fn record(id: &str, n: usize) -> AnimationRecord {
    AnimationRecord::new(id, (0..n).map(|i| format!("frame {i}")).collect()).unwrap()
}

fn scratch(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_record_store").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

#[tokio::test]
async fn dir_store_save_then_fetch() {
    let store = DirStore::new(scratch("roundtrip"));
    let rec = record("pinnace", 3);
    let path = store.save(&rec).await.unwrap();
    assert!(path.ends_with("pinnace_animation.json"));
    let back = store.fetch("pinnace").await.unwrap();
    assert_eq!(back, rec);
}

#[tokio::test]
async fn dir_store_missing_file_is_record_load_error() {
    let store = DirStore::new(scratch("missing"));
    let err = store.fetch("nope").await.unwrap_err();
    assert!(matches!(err, ReelError::RecordLoad { ref id, .. } if id == "nope"));
}

#[tokio::test]
async fn dir_store_keeps_corrupt_record_error() {
    let dir = scratch("corrupt");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("bad_animation.json"),
        r#"{ "subject_name": "bad", "num_frames": 2, "frames": ["x"] }"#,
    )
    .unwrap();
    let err = DirStore::new(dir).fetch("bad").await.unwrap_err();
    assert!(matches!(err, ReelError::CorruptRecord(_)));
}

#[tokio::test]
async fn dir_store_rejects_path_like_ids() {
    let store = DirStore::new(scratch("ids"));
    let err = store.fetch("../etc").await.unwrap_err();
    assert!(matches!(err, ReelError::RecordLoad { .. }));
}

#[tokio::test(start_paused = true)]
async fn memory_store_applies_latency() {
    let mut store = MemoryStore::new().with_latency(Duration::from_millis(200));
    store.insert(record("a", 2));
    let start = tokio::time::Instant::now();
    let rec = store.fetch("a").await.unwrap();
    assert_eq!(rec.frame_count(), 2);
    assert!(start.elapsed() >= Duration::from_millis(200));
    assert!(matches!(
        store.fetch("b").await.unwrap_err(),
        ReelError::RecordLoad { .. }
    ));
}

use super::*;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "storycam_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

#[test]
fn in_memory_lists_and_loads() {
    let mut repo = InMemoryStoryRepository::new();
    repo.insert("b", r#"{"sceneSrc": "b.glb"}"#);
    repo.insert("a", r#"{"projections": []}"#);
    assert_eq!(repo.list().unwrap(), vec!["a", "b"]);
    let story = repo.load("b").unwrap();
    assert_eq!(story.scene_src.as_deref(), Some("b.glb"));
}

#[test]
fn missing_and_unparsable_stories_are_errors() {
    let mut repo = InMemoryStoryRepository::new();
    repo.insert("broken", "{");
    assert!(matches!(repo.load("nope"), Err(StorycamError::NotFound(_))));
    assert!(matches!(repo.load("broken"), Err(StorycamError::Parse(_))));
}

#[test]
fn fs_repository_reads_json_files() {
    let tmp = temp_dir("fs_repo");
    std::fs::create_dir_all(&tmp).unwrap();
    std::fs::write(tmp.join("harbor.json"), r#"{"maxTimelineTime": 12}"#).unwrap();
    std::fs::write(tmp.join("notes.txt"), "ignored").unwrap();

    let repo = FsStoryRepository::new(&tmp);
    assert_eq!(repo.list().unwrap(), vec!["harbor"]);
    assert_eq!(repo.load("harbor").unwrap().max_timeline_time, 12.0);
    assert!(matches!(repo.load("gone"), Err(StorycamError::NotFound(_))));
    assert!(matches!(
        repo.load("../harbor"),
        Err(StorycamError::Validation(_))
    ));

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn fs_repository_missing_root_is_io_error() {
    let repo = FsStoryRepository::new(temp_dir("fs_repo_missing"));
    assert!(matches!(repo.list(), Err(StorycamError::Io(_))));
}

use std::fs;
use std::path::{Path, PathBuf};

fn collect_rs_files(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        if let Ok(read_dir) = fs::read_dir(&dir) {
            for entry in read_dir.flatten() {
                let path = entry.path();
                if path.is_dir() {
                    stack.push(path);
                } else if path.extension().map(|e| e == "rs").unwrap_or(false) {
                    files.push(path);
                }
            }
        }
    }
    files
}

fn file_contains(path: &Path, needle: &str) -> bool {
    fs::read_to_string(path)
        .map(|c| c.contains(needle))
        .unwrap_or(false)
}

#[test]
fn vote_writes_only_from_vote_repo() {
    // The vote toggle's concurrency safety rests on the unique-pair
    // insert/delete in vote_repo; any other write path would bypass it.
    let src_root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("src");
    let mut offenders = Vec::new();
    for file in collect_rs_files(&src_root) {
        let path_str = file.to_string_lossy();
        if path_str.ends_with("db/vote_repo.rs") {
            continue;
        }
        if file_contains(&file, "INSERT INTO opinion_votes")
            || file_contains(&file, "DELETE FROM opinion_votes")
            || file_contains(&file, "UPDATE opinion_votes")
        {
            offenders.push(path_str.to_string());
        }
    }

    if !offenders.is_empty() {
        panic!(
            "Vote-set writes must go through db::vote_repo only. Offenders: {:?}",
            offenders
        );
    }
}

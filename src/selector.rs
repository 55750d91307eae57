use crate::config::Configuration;
use crate::error::{Result, ShrinkError};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A file that passed the extension and size filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    pub path: PathBuf,
    pub size: u64,
    pub extension: String,
}

/// Collects every candidate under the configured root before any network
/// activity starts.
///
/// # Arguments
/// * `config` - Root, recursion flag and the fixed filters
///
/// # Returns
/// * `Ok(files)` - Candidates in directory-listing order, one per real file
///   even when symlinks point at the same target
/// * `Err(ShrinkError)` - If the root is not a directory or any entry cannot
///   be read; no partial list is returned
pub fn select_files(config: &Configuration) -> Result<Vec<CandidateFile>> {
    let root = config.root();
    let root_meta = std::fs::metadata(root)?;
    if !root_meta.is_dir() {
        return Err(ShrinkError::NotADirectory(root.to_path_buf()));
    }

    // Depth 1 keeps the listing to direct children, so subdirectories are
    // skipped silently when recursion is off.
    let mut walker = WalkDir::new(root).min_depth(1).follow_links(true);
    if !config.recursive() {
        walker = walker.max_depth(1);
    }

    let mut files = Vec::new();
    let mut seen = HashSet::new();
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let size = entry.metadata()?.len();
        if let Some(extension) = matching_extension(entry.path(), size, config) {
            // A symlink and its target must not end up in two pipelines
            if !seen.insert(std::fs::canonicalize(entry.path())?) {
                tracing::debug!(
                    path = %entry.path().display(),
                    "skipping duplicate of a selected file"
                );
                continue;
            }
            files.push(CandidateFile {
                path: entry.into_path(),
                size,
                extension,
            });
        }
    }

    Ok(files)
}

/// Returns the extension when it is on the allow-list. The comparison is
/// case-sensitive, so `photo.JPG` is not selected.
pub fn allowed_extension(path: &Path, allowed: &[&str]) -> Option<String> {
    path.extension()
        .and_then(|s| s.to_str())
        .filter(|ext| allowed.contains(ext))
        .map(str::to_string)
}

fn matching_extension(path: &Path, size: u64, config: &Configuration) -> Option<String> {
    if !(config.min_size()..=config.max_size()).contains(&size) {
        return None;
    }
    allowed_extension(path, config.extensions())
}

/// The filter applied to every regular file during selection.
pub fn passes_filter(path: &Path, size: u64, config: &Configuration) -> bool {
    matching_extension(path, size, config).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::ALLOWED_EXTENSIONS;
    use std::fs::{self, File};
    use std::io::Write;
    use tempfile::TempDir;

    fn write_sized(path: &Path, size: usize) {
        let mut file = File::create(path).unwrap();
        file.write_all(&vec![0u8; size]).unwrap();
    }

    fn sorted_names(files: &[CandidateFile]) -> Vec<String> {
        let mut names: Vec<String> = files
            .iter()
            .map(|f| f.path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_allowed_extension() {
        assert_eq!(
            allowed_extension(Path::new("a.jpg"), ALLOWED_EXTENSIONS),
            Some("jpg".to_string())
        );
        assert_eq!(allowed_extension(Path::new("a.PNG"), ALLOWED_EXTENSIONS), None);
        assert_eq!(allowed_extension(Path::new("a.Jpg"), ALLOWED_EXTENSIONS), None);
        assert_eq!(allowed_extension(Path::new("a.jpeg"), ALLOWED_EXTENSIONS), None);
        assert_eq!(allowed_extension(Path::new("a.webp"), ALLOWED_EXTENSIONS), None);
        assert_eq!(allowed_extension(Path::new("jpg"), ALLOWED_EXTENSIONS), None);
    }

    #[test]
    fn test_passes_filter_bounds_inclusive() {
        let config = Configuration::new(".", false);
        let path = Path::new("photo.jpg");
        assert!(!passes_filter(path, 99_999, &config));
        assert!(passes_filter(path, 100_000, &config));
        assert!(passes_filter(path, 5_200_000, &config));
        assert!(!passes_filter(path, 5_200_001, &config));
    }

    #[test]
    fn test_select_files_applies_filters() {
        let temp_dir = TempDir::new().unwrap();
        write_sized(&temp_dir.path().join("keep.jpg"), 150_000);
        write_sized(&temp_dir.path().join("keep.png"), 100_000);
        write_sized(&temp_dir.path().join("small.jpg"), 1_024);
        write_sized(&temp_dir.path().join("large.png"), 5_200_001);
        write_sized(&temp_dir.path().join("notes.txt"), 150_000);
        write_sized(&temp_dir.path().join("upper.JPG"), 150_000);

        let files = select_files(&Configuration::new(temp_dir.path(), false)).unwrap();
        assert_eq!(sorted_names(&files), vec!["keep.jpg", "keep.png"]);

        let jpg = files.iter().find(|f| f.extension == "jpg").unwrap();
        assert_eq!(jpg.size, 150_000);
    }

    #[test]
    fn test_select_files_non_recursive_skips_directories() {
        let temp_dir = TempDir::new().unwrap();
        let subdir = temp_dir.path().join("nested");
        fs::create_dir(&subdir).unwrap();
        write_sized(&temp_dir.path().join("top.jpg"), 200_000);
        write_sized(&subdir.join("deep.png"), 200_000);

        let files = select_files(&Configuration::new(temp_dir.path(), false)).unwrap();
        assert_eq!(sorted_names(&files), vec!["top.jpg"]);
    }

    #[test]
    fn test_select_files_recursive_is_superset() {
        let temp_dir = TempDir::new().unwrap();
        let subdir = temp_dir.path().join("a").join("b");
        fs::create_dir_all(&subdir).unwrap();
        write_sized(&temp_dir.path().join("top.jpg"), 200_000);
        write_sized(&subdir.join("deep.png"), 200_000);

        let shallow = select_files(&Configuration::new(temp_dir.path(), false)).unwrap();
        let deep = select_files(&Configuration::new(temp_dir.path(), true)).unwrap();

        assert_eq!(sorted_names(&deep), vec!["deep.png", "top.jpg"]);
        for file in &shallow {
            assert!(deep.iter().any(|d| d.path == file.path));
        }
    }

    #[test]
    fn test_select_files_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        let files = select_files(&Configuration::new(temp_dir.path(), true)).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_select_files_missing_root() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing");
        let result = select_files(&Configuration::new(&missing, true));
        assert!(matches!(result, Err(ShrinkError::Io(_))));
    }

    #[test]
    fn test_select_files_root_is_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("photo.jpg");
        write_sized(&file, 200_000);

        let result = select_files(&Configuration::new(&file, true));
        assert!(matches!(result, Err(ShrinkError::NotADirectory(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_select_files_broken_symlink_fails() {
        let temp_dir = TempDir::new().unwrap();
        write_sized(&temp_dir.path().join("ok.jpg"), 200_000);
        std::os::unix::fs::symlink(
            temp_dir.path().join("gone.jpg"),
            temp_dir.path().join("dangling.jpg"),
        )
        .unwrap();

        let result = select_files(&Configuration::new(temp_dir.path(), true));
        assert!(matches!(result, Err(ShrinkError::WalkdirError(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_select_files_follows_symlinked_file() {
        let temp_dir = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();
        let target = outside.path().join("real.png");
        write_sized(&target, 300_000);
        std::os::unix::fs::symlink(&target, temp_dir.path().join("link.png")).unwrap();

        let files = select_files(&Configuration::new(temp_dir.path(), false)).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].size, 300_000);
    }

    #[cfg(unix)]
    #[test]
    fn test_select_files_symlink_and_target_selected_once() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("real.png");
        write_sized(&target, 150_000);
        std::os::unix::fs::symlink(&target, temp_dir.path().join("alias.png")).unwrap();

        let files = select_files(&Configuration::new(temp_dir.path(), true)).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].size, 150_000);
    }
}

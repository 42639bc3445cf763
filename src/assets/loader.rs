/// Asset directory loader
///
/// Scans one directory (not recursive) for image files, parses each
/// filename and probes each image header. An entry that cannot be read
/// or whose name cannot be parsed is skipped with a warning; the rest of
/// the load goes on.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::task;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use super::{display, parser};
use crate::error::{LoadError, SkipReason};
use crate::state::data::ImageRecord;

/// A file left out of the load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// Result of scanning an asset directory
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub dir: PathBuf,
    /// Parsed records in discovery order
    pub records: Vec<ImageRecord>,
    /// Unreadable entries and names that did not follow the naming convention
    pub skipped: Vec<SkippedFile>,
    /// Image paths whose header could not be read
    pub broken: HashSet<String>,
}

/// Load all assets under `dir`
///
/// Runs on a blocking worker because probing touches every file.
pub async fn load_assets(dir: PathBuf, extensions: Vec<String>) -> Result<LoadReport, LoadError> {
    task::spawn_blocking(move || load_assets_blocking(&dir, &extensions))
        .await
        .map_err(|e| LoadError::Join(e.to_string()))?
}

/// Blocking implementation of the directory scan
pub fn load_assets_blocking(dir: &Path, extensions: &[String]) -> Result<LoadReport, LoadError> {
    if !dir.is_dir() {
        return Err(LoadError::NotADirectory(dir.to_path_buf()));
    }

    info!(dir = %dir.display(), "scanning asset directory");

    let mut report = LoadReport {
        dir: dir.to_path_buf(),
        ..LoadReport::default()
    };

    // Sorted so discovery order does not depend on the file system
    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            // Depth 0 is the asset directory itself
            Err(e) if e.depth() == 0 => {
                return Err(LoadError::Walk {
                    path: dir.to_path_buf(),
                    message: e.to_string(),
                })
            }
            Err(e) => {
                let path = e.path().unwrap_or(dir).to_path_buf();
                warn!(path = %path.display(), error = %e, "skipping unreadable entry");
                report.skipped.push(SkippedFile {
                    path,
                    reason: SkipReason::Unreadable(e.to_string()),
                });
                continue;
            }
        };
        let path = entry.path();

        if !entry.file_type().is_file() || !has_extension(path, extensions) {
            continue;
        }

        match parser::parse_path(path) {
            Ok(record) => {
                if !display::probe(path) {
                    debug!(path = %path.display(), "image header unreadable, will show fallback");
                    report.broken.insert(record.image_path.clone());
                }
                report.records.push(record);
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "skipping file");
                report.skipped.push(SkippedFile {
                    path: path.to_path_buf(),
                    reason: error.into(),
                });
            }
        }
    }

    info!(
        loaded = report.records.len(),
        skipped = report.skipped.len(),
        broken = report.broken.len(),
        "asset scan complete"
    );

    Ok(report)
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy())
        .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(&ext)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;

    fn png() -> Vec<String> {
        vec!["png".to_string()]
    }

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), b"").unwrap();
    }

    #[test]
    fn test_skips_malformed_and_keeps_the_rest() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "bg2.png");
        touch(dir.path(), "bg2_I1_V1_U_OK.png");
        touch(dir.path(), "bg3_I1_V1_nocondition.png");
        touch(dir.path(), "readme.png");

        let report = load_assets_blocking(dir.path(), &png()).unwrap();
        assert_eq!(report.records.len(), 2);
        assert_eq!(report.skipped.len(), 2);
        assert!(report
            .skipped
            .iter()
            .any(|s| matches!(s.reason, SkipReason::Name(ParseError::MissingCondition(_)))));
        assert!(report
            .skipped
            .iter()
            .any(|s| matches!(s.reason, SkipReason::Name(ParseError::MissingGroupToken(_)))));
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "bg1.png");
        touch(dir.path(), "bg2_I1_V1_OK.png");
        let link = dir.path().join("bg3.png");
        std::os::unix::fs::symlink(dir.path().join("missing.png"), &link).unwrap();

        let report = load_assets_blocking(dir.path(), &png()).unwrap();
        let groups: Vec<&str> = report.records.iter().map(|r| r.group_id.as_str()).collect();
        assert_eq!(groups, vec!["bg1", "bg2"]);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].path, link);
        assert!(matches!(report.skipped[0].reason, SkipReason::Unreadable(_)));
    }

    #[test]
    fn test_filters_extensions_case_insensitively() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "bg1.PNG");
        touch(dir.path(), "bg1_I1_V1_OK.jpg");
        touch(dir.path(), "notes.txt");

        let report = load_assets_blocking(dir.path(), &png()).unwrap();
        assert_eq!(report.records.len(), 1);
        assert!(report.skipped.is_empty());

        let both = vec!["png".to_string(), "JPG".to_string()];
        let report = load_assets_blocking(dir.path(), &both).unwrap();
        assert_eq!(report.records.len(), 2);
    }

    #[test]
    fn test_does_not_recurse() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        touch(&dir.path().join("nested"), "bg4.png");
        touch(dir.path(), "bg5.png");

        let report = load_assets_blocking(dir.path(), &png()).unwrap();
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].group_id.as_str(), "bg5");
    }

    #[test]
    fn test_marks_unreadable_images_broken() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "bg1.png");
        image::RgbImage::new(2, 2).save(dir.path().join("bg1_I1_V1_OK.png")).unwrap();

        let report = load_assets_blocking(dir.path(), &png()).unwrap();
        assert_eq!(report.broken.len(), 1);
        let broken = dir.path().join("bg1.png").to_string_lossy().to_string();
        assert!(report.broken.contains(&broken));
    }

    #[test]
    fn test_not_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert_eq!(
            load_assets_blocking(&missing, &png()).unwrap_err(),
            LoadError::NotADirectory(missing)
        );
    }

    #[tokio::test]
    async fn test_load_assets_async() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "bg10.png");
        touch(dir.path(), "bg2.png");

        let report = load_assets(dir.path().to_path_buf(), png()).await.unwrap();
        let groups: Vec<&str> = report.records.iter().map(|r| r.group_id.as_str()).collect();
        assert_eq!(groups, vec!["bg10", "bg2"]);
    }
}

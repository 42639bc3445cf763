/// Manifest export
///
/// One line per flagged image: `<groupId>_<version>_<location>_<condition>`,
/// absent fields left empty. Lines are joined with '\n' with no header
/// and no trailing newline.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::ExportError;
use crate::state::data::ImageRecord;
use crate::state::library::GroupIndex;
use crate::state::selection::SelectionSet;

/// Default name offered in the save dialog
pub const DEFAULT_FILE_NAME: &str = "selected_images.txt";

/// Order in which groups are written
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ManifestOrder {
    /// Order in which groups were discovered while scanning
    #[default]
    Discovery,
    /// Same numeric order as Previous/Next
    Numeric,
}

/// Composite key written for one record
pub fn manifest_line(record: &ImageRecord) -> String {
    format!(
        "{}_{}_{}_{}",
        record.group_id,
        record.version().unwrap_or_default(),
        record.location().map(|l| l.as_str()).unwrap_or_default(),
        record.condition().unwrap_or_default(),
    )
}

/// Serialize every flagged record of `index`
pub fn export(index: &GroupIndex, selection: &SelectionSet, order: ManifestOrder) -> String {
    let groups: Vec<(_, &[ImageRecord])> = match order {
        ManifestOrder::Discovery => index.groups().collect(),
        ManifestOrder::Numeric => index
            .ordered_group_ids()
            .into_iter()
            .map(|id| (id, index.records(id)))
            .collect(),
    };

    groups
        .into_iter()
        .flat_map(|(_, records)| records.iter())
        .filter(|record| selection.contains(&record.image_path))
        .map(manifest_line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Write manifest text to `path`
pub async fn write_manifest(path: PathBuf, text: String) -> Result<PathBuf, ExportError> {
    tokio::fs::write(&path, text.as_bytes())
        .await
        .map_err(|e| write_error(&path, e))?;
    info!(path = %path.display(), bytes = text.len(), "manifest written");
    Ok(path)
}

fn write_error(path: &Path, err: std::io::Error) -> ExportError {
    ExportError::Write {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::parser::parse;

    fn index_of(names: &[&str]) -> GroupIndex {
        GroupIndex::build(names.iter().map(|n| parse(n).unwrap()))
    }

    fn select(names: &[&str]) -> SelectionSet {
        let mut set = SelectionSet::new();
        for name in names {
            set.toggle(name);
        }
        set
    }

    #[test]
    fn test_single_flagged_record() {
        let index = index_of(&["bg3_I1_V1_OK.png", "bg3_I2_V1_U_BAD.png"]);
        let selection = select(&["bg3_I1_V1_OK.png"]);
        assert_eq!(export(&index, &selection, ManifestOrder::Discovery), "bg3_V1_E_OK");
    }

    #[test]
    fn test_empty_selection_is_empty_text() {
        let index = index_of(&["bg3_I1_V1_OK.png"]);
        assert_eq!(export(&index, &SelectionSet::new(), ManifestOrder::Discovery), "");
    }

    #[test]
    fn test_missing_fields_leave_empty_segments() {
        let index = index_of(&["bg5.png", "bg6_U_OK.png"]);
        let selection = select(&["bg5.png", "bg6_U_OK.png"]);
        assert_eq!(
            export(&index, &selection, ManifestOrder::Discovery),
            "bg5___\nbg6__U_OK"
        );
    }

    #[test]
    fn test_group_order() {
        let names = ["bg10_I1_V1_OK.png", "bg2_I1_V2_U_BAD.png", "bg10_I2_V3_OK.png"];
        let index = index_of(&names);
        let selection = select(&names);

        assert_eq!(
            export(&index, &selection, ManifestOrder::Discovery),
            "bg10_V1_E_OK\nbg10_V3_E_OK\nbg2_V2_U_BAD"
        );
        assert_eq!(
            export(&index, &selection, ManifestOrder::Numeric),
            "bg2_V2_U_BAD\nbg10_V1_E_OK\nbg10_V3_E_OK"
        );
    }

    #[test]
    fn test_selection_of_unknown_path_is_ignored() {
        let index = index_of(&["bg3_I1_V1_OK.png"]);
        let selection = select(&["bg99_I1_V1_OK.png"]);
        assert_eq!(export(&index, &selection, ManifestOrder::Numeric), "");
    }

    #[tokio::test]
    async fn test_write_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_FILE_NAME);
        let written = write_manifest(path.clone(), "bg3_V1_E_OK".to_string())
            .await
            .unwrap();
        assert_eq!(written, path);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "bg3_V1_E_OK");
    }

    #[tokio::test]
    async fn test_write_manifest_reports_bad_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join(DEFAULT_FILE_NAME);
        let result = write_manifest(path.clone(), String::new()).await;
        assert!(matches!(result, Err(ExportError::Write { path: p, .. }) if p == path));
    }
}

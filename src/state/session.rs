use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::data::{GroupId, ImageRecord};
use super::library::GroupIndex;
use super::selection::SelectionSet;
use crate::assets::display;
use crate::assets::loader::{LoadReport, SkippedFile};
use crate::error::NavigationError;
use crate::manifest::{self, ManifestOrder};

/// Everything the reviewer is working on, owned in one place.
///
/// Handlers get `&mut ReviewSession`; nothing here is global.
/// Invariant: `cursor` is `Some` key of `index` whenever `index` is non-empty.
#[derive(Debug, Default)]
pub struct ReviewSession {
    index: GroupIndex,
    cursor: Option<GroupId>,
    selection: SelectionSet,
    /// Paths whose image could not be decoded
    broken: HashSet<String>,
    skipped: Vec<SkippedFile>,
    asset_dir: Option<PathBuf>,
}

impl ReviewSession {
    /// An empty session (nothing loaded yet)
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a session from a completed scan.
    ///
    /// The cursor starts at `start_group` (a bare number) when that group
    /// exists, otherwise at the lowest group.
    pub fn from_report(report: LoadReport, start_group: Option<&str>) -> Self {
        let index = GroupIndex::build(report.records);
        let cursor = start_group
            .and_then(|raw| index.jump_to(raw).ok())
            .or_else(|| index.first().cloned());

        debug!(
            groups = index.len(),
            images = index.record_count(),
            cursor = ?cursor,
            "session built"
        );

        Self {
            index,
            cursor,
            selection: SelectionSet::new(),
            broken: report.broken,
            skipped: report.skipped,
            asset_dir: Some(report.dir),
        }
    }

    /// Swap in a new scan, keeping the flagged images.
    ///
    /// Flags are keyed by path, so flags on images the new scan does not
    /// contain stay in the set but are not exported.
    pub fn reload(&mut self, report: LoadReport, start_group: Option<&str>) {
        let selection = std::mem::take(&mut self.selection);
        *self = Self::from_report(report, start_group);
        self.selection = selection;
    }

    pub fn index(&self) -> &GroupIndex {
        &self.index
    }

    pub fn asset_dir(&self) -> Option<&Path> {
        self.asset_dir.as_deref()
    }

    pub fn current_group(&self) -> Option<&GroupId> {
        self.cursor.as_ref()
    }

    /// Images of the displayed group
    pub fn current_records(&self) -> &[ImageRecord] {
        match &self.cursor {
            Some(group) => self.index.records(group),
            None => &[],
        }
    }

    pub fn next_group(&mut self) {
        if let Some(current) = &self.cursor {
            self.cursor = self.index.next(current);
        }
    }

    pub fn prev_group(&mut self) {
        if let Some(current) = &self.cursor {
            self.cursor = self.index.prev(current);
        }
    }

    /// Move to the group typed by the user; on error nothing changes
    pub fn jump_to(&mut self, raw_input: &str) -> Result<&GroupId, NavigationError> {
        let target = self.index.jump_to(raw_input)?;
        let cursor: &GroupId = self.cursor.insert(target);
        Ok(cursor)
    }

    /// Flip the "needs changes" flag. Returns true if now flagged.
    pub fn toggle_flag(&mut self, image_path: &str) -> bool {
        self.selection.toggle(image_path)
    }

    pub fn is_flagged(&self, image_path: &str) -> bool {
        self.selection.contains(image_path)
    }

    pub fn flagged_count(&self) -> usize {
        self.selection.len()
    }

    pub fn manifest(&self, order: ManifestOrder) -> String {
        manifest::export(&self.index, &self.selection, order)
    }

    /// Files left out of the load
    pub fn skipped(&self) -> &[SkippedFile] {
        &self.skipped
    }

    pub fn is_broken(&self, image_path: &str) -> bool {
        self.broken.contains(image_path)
    }

    /// Path to display for `record`, `fallback` if its image is broken
    pub fn display_path(&self, record: &ImageRecord, fallback: &Path) -> PathBuf {
        display::resolve(&record.image_path, &self.broken, fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::parser::parse;
    use crate::error::{ParseError, SkipReason};

    fn report(names: &[&str]) -> LoadReport {
        LoadReport {
            dir: PathBuf::from("/assets"),
            records: names.iter().map(|n| parse(n).unwrap()).collect(),
            ..LoadReport::default()
        }
    }

    fn gid(digits: &str) -> GroupId {
        GroupId::from_digits(digits).unwrap()
    }

    #[test]
    fn test_empty_session() {
        let mut session = ReviewSession::new();
        assert_eq!(session.current_group(), None);
        assert!(session.current_records().is_empty());
        session.next_group();
        session.prev_group();
        assert_eq!(session.current_group(), None);
        assert!(session.jump_to("1").is_err());
    }

    #[test]
    fn test_cursor_starts_at_lowest_group() {
        let session = ReviewSession::from_report(report(&["bg10.png", "bg3.png"]), None);
        assert_eq!(session.current_group(), Some(&gid("3")));
        assert_eq!(session.asset_dir(), Some(Path::new("/assets")));
    }

    #[test]
    fn test_cursor_honours_start_group() {
        let names = ["bg10.png", "bg3.png"];
        let session = ReviewSession::from_report(report(&names), Some("10"));
        assert_eq!(session.current_group(), Some(&gid("10")));

        let session = ReviewSession::from_report(report(&names), Some("2"));
        assert_eq!(session.current_group(), Some(&gid("3")));
    }

    #[test]
    fn test_navigation_round_trip() {
        let mut session =
            ReviewSession::from_report(report(&["bg1.png", "bg2.png", "bg10.png"]), None);
        session.next_group();
        assert_eq!(session.current_group(), Some(&gid("2")));
        session.prev_group();
        session.prev_group();
        assert_eq!(session.current_group(), Some(&gid("10")));
        session.next_group();
        assert_eq!(session.current_group(), Some(&gid("1")));
    }

    #[test]
    fn test_failed_jump_leaves_cursor() {
        let mut session = ReviewSession::from_report(report(&["bg1.png", "bg7.png"]), None);
        assert_eq!(session.jump_to("7").cloned(), Ok(gid("7")));
        assert_eq!(
            session.jump_to("999").cloned(),
            Err(NavigationError::NotFound("bg999".to_string()))
        );
        assert!(matches!(session.jump_to("abc"), Err(NavigationError::InvalidInput(_))));
        assert_eq!(session.current_group(), Some(&gid("7")));
    }

    #[test]
    fn test_selection_survives_navigation() {
        let mut session =
            ReviewSession::from_report(report(&["bg3_I1_V1_OK.png", "bg4_I1_V2_U_BAD.png"]), None);
        let path = session.current_records()[0].image_path.clone();
        assert!(session.toggle_flag(&path));
        session.next_group();
        session.next_group();
        assert!(session.is_flagged(&path));
        assert_eq!(session.flagged_count(), 1);
        assert_eq!(session.manifest(ManifestOrder::Discovery), "bg3_V1_E_OK");
    }

    #[test]
    fn test_reload_keeps_flags() {
        let names = ["bg3_I1_V1_OK.png", "bg4_I1_V2_U_BAD.png"];
        let mut session = ReviewSession::from_report(report(&names), None);
        session.toggle_flag("bg3_I1_V1_OK.png");
        session.next_group();

        session.reload(report(&names), None);
        assert_eq!(session.current_group(), Some(&gid("3")));
        assert!(session.is_flagged("bg3_I1_V1_OK.png"));
        assert_eq!(session.flagged_count(), 1);
        assert_eq!(session.manifest(ManifestOrder::Discovery), "bg3_V1_E_OK");
    }

    #[test]
    fn test_reload_other_folder_keeps_flags_out_of_manifest() {
        let mut session = ReviewSession::from_report(report(&["bg3_I1_V1_OK.png"]), None);
        session.toggle_flag("bg3_I1_V1_OK.png");

        session.reload(report(&["bg9_I1_V1_U_OK.png"]), None);
        assert_eq!(session.current_group(), Some(&gid("9")));
        assert_eq!(session.flagged_count(), 1);
        assert_eq!(session.manifest(ManifestOrder::Discovery), "");

        session.reload(report(&["bg3_I1_V1_OK.png"]), None);
        assert_eq!(session.manifest(ManifestOrder::Discovery), "bg3_V1_E_OK");
    }

    #[test]
    fn test_broken_and_skipped_carry_over() {
        let mut load = report(&["bg3_I1_V1_OK.png", "bg3_I2_V1_OK.png"]);
        load.broken.insert("bg3_I2_V1_OK.png".to_string());
        load.skipped.push(SkippedFile {
            path: PathBuf::from("/assets/junk.png"),
            reason: SkipReason::Name(ParseError::MissingGroupToken("junk.png".to_string())),
        });
        let session = ReviewSession::from_report(load, None);

        assert_eq!(session.skipped().len(), 1);
        assert!(session.is_broken("bg3_I2_V1_OK.png"));

        let fallback = Path::new("/assets/bg2.png");
        let records = session.current_records();
        assert_eq!(
            session.display_path(&records[0], fallback),
            PathBuf::from("bg3_I1_V1_OK.png")
        );
        assert_eq!(session.display_path(&records[1], fallback), fallback);
    }
}

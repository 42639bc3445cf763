use std::collections::HashMap;

use super::data::{GroupId, ImageRecord};
use crate::error::NavigationError;

/// The GroupIndex maps each group id to the images that carry it.
///
/// Groups and the images inside them keep discovery order; numeric order
/// is only computed for navigation.
#[derive(Debug, Clone, Default)]
pub struct GroupIndex {
    /// (group, images) in the order groups were first seen
    groups: Vec<(GroupId, Vec<ImageRecord>)>,
    /// group id -> position in `groups`
    positions: HashMap<GroupId, usize>,
}

impl GroupIndex {
    /// Build the index, appending each record to its group's list
    pub fn build(records: impl IntoIterator<Item = ImageRecord>) -> Self {
        let mut index = GroupIndex::default();
        for record in records {
            index.insert(record);
        }
        index
    }

    fn insert(&mut self, record: ImageRecord) {
        match self.positions.get(&record.group_id) {
            Some(&pos) => self.groups[pos].1.push(record),
            None => {
                self.positions.insert(record.group_id.clone(), self.groups.len());
                self.groups.push((record.group_id.clone(), vec![record]));
            }
        }
    }

    /// Number of groups
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of images across all groups
    pub fn record_count(&self) -> usize {
        self.groups.iter().map(|(_, records)| records.len()).sum()
    }

    pub fn contains(&self, group: &GroupId) -> bool {
        self.positions.contains_key(group)
    }

    /// Images of one group in discovery order (empty if unknown)
    pub fn records(&self, group: &GroupId) -> &[ImageRecord] {
        self.positions
            .get(group)
            .map(|&pos| self.groups[pos].1.as_slice())
            .unwrap_or(&[])
    }

    /// All groups in discovery order
    pub fn groups(&self) -> impl Iterator<Item = (&GroupId, &[ImageRecord])> {
        self.groups.iter().map(|(id, records)| (id, records.as_slice()))
    }

    /// Group ids sorted by numeric suffix ("bg2" before "bg10")
    pub fn ordered_group_ids(&self) -> Vec<&GroupId> {
        let mut ids: Vec<&GroupId> = self.groups.iter().map(|(id, _)| id).collect();
        ids.sort();
        ids
    }

    /// 1-based position of `group` in numeric order
    pub fn position(&self, group: &GroupId) -> Option<usize> {
        self.ordered_group_ids()
            .iter()
            .position(|id| *id == group)
            .map(|i| i + 1)
    }

    /// The first group in numeric order
    pub fn first(&self) -> Option<&GroupId> {
        self.groups.iter().map(|(id, _)| id).min()
    }

    /// The group after `current` in numeric order, wrapping to the first.
    /// An unknown `current` yields the first group.
    pub fn next(&self, current: &GroupId) -> Option<GroupId> {
        let ids = self.ordered_group_ids();
        if ids.is_empty() {
            return None;
        }
        let next = match ids.iter().position(|id| *id == current) {
            Some(i) => (i + 1) % ids.len(),
            None => 0,
        };
        Some(ids[next].clone())
    }

    /// The group before `current` in numeric order, wrapping to the last.
    /// An unknown `current` yields the last group.
    pub fn prev(&self, current: &GroupId) -> Option<GroupId> {
        let ids = self.ordered_group_ids();
        if ids.is_empty() {
            return None;
        }
        let prev = match ids.iter().position(|id| *id == current) {
            Some(i) => (i + ids.len() - 1) % ids.len(),
            None => ids.len() - 1,
        };
        Some(ids[prev].clone())
    }

    /// Resolve a bare group number typed by the user ("7" -> "bg7")
    pub fn jump_to(&self, raw_input: &str) -> Result<GroupId, NavigationError> {
        let raw = raw_input.trim();
        let candidate = GroupId::from_digits(raw)
            .ok_or_else(|| NavigationError::InvalidInput(raw_input.to_string()))?;
        if self.contains(&candidate) {
            Ok(candidate)
        } else {
            Err(NavigationError::NotFound(candidate.to_string()))
        }
    }
}

/// Shared data structures for the application state
///
/// These structs represent the data model that flows from
/// the filename parser into the group index and the UI layer.

use std::cmp::Ordering;
use std::fmt;

/// A group identifier of the form `bg<digits>` (e.g. "bg12")
///
/// Ordering compares the numeric suffix, so "bg2" < "bg10" < "bg100".
/// The suffix may be arbitrarily long; leading zeros are ignored for the
/// numeric comparison and the raw text breaks ties ("bg07" vs "bg7").
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupId(String);

impl GroupId {
    /// Build a group id from its digit suffix ("12" -> "bg12")
    /// Returns None unless `digits` is a non-empty run of ASCII digits
    pub fn from_digits(digits: &str) -> Option<Self> {
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(GroupId(format!("bg{}", digits)))
    }

    /// The full identifier, e.g. "bg12"
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The digit suffix, e.g. "12"
    pub fn digits(&self) -> &str {
        &self.0[2..]
    }

    fn numeric_cmp(&self, other: &Self) -> Ordering {
        let a = self.digits().trim_start_matches('0');
        let b = other.digits().trim_start_matches('0');
        a.len().cmp(&b.len()).then_with(|| a.cmp(b))
    }
}

impl Ord for GroupId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.numeric_cmp(other).then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for GroupId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where the photographed item sits: "U" or "E"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    U,
    E,
}

impl Location {
    pub fn as_str(&self) -> &'static str {
        match self {
            Location::U => "U",
            Location::E => "E",
        }
    }
}

/// Metadata carried by a fully annotated filename
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    /// e.g. "I3" (None if the name has no I<N> token)
    pub item_number: Option<String>,
    /// e.g. "V2" (None if the name has no V<N> token)
    pub version: Option<String>,
    pub location: Location,
    /// Uppercase review status, e.g. "OK"
    pub condition: String,
}

/// The two filename shapes found in an asset directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageKind {
    /// Bare `bg<N>.<ext>` image with no metadata
    Placeholder,
    /// `bg<N>_..._<CONDITION>.<ext>` image
    Annotated(Annotation),
}

/// Represents a single image asset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    /// Full path to the image file; also the selection key
    pub image_path: String,
    /// Group this image is displayed in
    pub group_id: GroupId,
    pub kind: ImageKind,
}

impl ImageRecord {
    fn annotation(&self) -> Option<&Annotation> {
        match &self.kind {
            ImageKind::Placeholder => None,
            ImageKind::Annotated(annotation) => Some(annotation),
        }
    }

    pub fn item_number(&self) -> Option<&str> {
        self.annotation().and_then(|a| a.item_number.as_deref())
    }

    pub fn version(&self) -> Option<&str> {
        self.annotation().and_then(|a| a.version.as_deref())
    }

    pub fn location(&self) -> Option<Location> {
        self.annotation().map(|a| a.location)
    }

    pub fn condition(&self) -> Option<&str> {
        self.annotation().map(|a| a.condition.as_str())
    }

    /// Space separated caption: "bg12 I3 V2 U OK"
    pub fn caption(&self) -> String {
        format!(
            "{} {} {} {} {}",
            self.group_id,
            self.item_number().unwrap_or_default(),
            self.version().unwrap_or_default(),
            self.location().map(|l| l.as_str()).unwrap_or_default(),
            self.condition().unwrap_or_default(),
        )
    }
}

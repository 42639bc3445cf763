/// Filename parser
///
/// Asset names come in two shapes:
/// - `bg5.png`                 placeholder, group token only
/// - `bg12_I3_V2_U_OK.png`     annotated: item, version, location, condition
///
/// The shape is decided once here; everything downstream matches on `ImageKind`.

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

use crate::error::ParseError;
use crate::state::data::{Annotation, GroupId, ImageKind, ImageRecord, Location};

static GROUP_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"bg(\d+)").unwrap());
static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^bg\d+\.[A-Za-z0-9]+$").unwrap());
static ITEM_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"I\d+").unwrap());
// Single digit on purpose: "V12" reads as "V1"
static VERSION: Lazy<Regex> = Lazy::new(|| Regex::new(r"V\d").unwrap());
static CONDITION: Lazy<Regex> = Lazy::new(|| Regex::new(r"_([A-Z]+)\.[A-Za-z0-9]+$").unwrap());

const UPPER_TOKEN: &str = "_U_";

/// Parse a bare filename; `image_path` is set to the filename itself
pub fn parse(filename: &str) -> Result<ImageRecord, ParseError> {
    parse_with_path(filename, filename.to_string())
}

/// Parse the file name component of `path`, keeping the full path as the record's key
///
/// Non-UTF-8 names are read lossily and go through the same grammar.
pub fn parse_path(path: &Path) -> Result<ImageRecord, ParseError> {
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy())
        .ok_or_else(|| ParseError::NoFileName(path.to_path_buf()))?;
    parse_with_path(&filename, path.to_string_lossy().to_string())
}

fn parse_with_path(filename: &str, image_path: String) -> Result<ImageRecord, ParseError> {
    let group_id = GROUP_TOKEN
        .captures(filename)
        .and_then(|caps| GroupId::from_digits(&caps[1]))
        .ok_or_else(|| ParseError::MissingGroupToken(filename.to_string()))?;

    if PLACEHOLDER.is_match(filename) {
        return Ok(ImageRecord {
            image_path,
            group_id,
            kind: ImageKind::Placeholder,
        });
    }

    let condition = CONDITION
        .captures(filename)
        .map(|caps| caps[1].to_string())
        .ok_or_else(|| ParseError::MissingCondition(filename.to_string()))?;

    let annotation = Annotation {
        item_number: ITEM_NUMBER.find(filename).map(|m| m.as_str().to_string()),
        version: VERSION.find(filename).map(|m| m.as_str().to_string()),
        location: if filename.contains(UPPER_TOKEN) {
            Location::U
        } else {
            Location::E
        },
        condition,
    };

    Ok(ImageRecord {
        image_path,
        group_id,
        kind: ImageKind::Annotated(annotation),
    })
}

//! YAML front matter parsing for markdown content files.
//!
//! Front matter is the block between a leading `---` line and the next `---`
//! line. Unknown keys are ignored.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use serde::{Deserialize, Deserializer};

use docrank_shared::{DocrankError, Result};

/// Matches the front matter block at the very start of a file.
static FRONT_MATTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?ms)\A---[ \t]*\r?\n(.*?)^---[ \t]*\r?$\n?").expect("front matter regex")
});

/// Front matter fields understood by the content loader.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FrontMatter {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub draft: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_date")]
    pub date: Option<NaiveDate>,
}

/// Split `content` into its front matter and the remaining body.
///
/// Files without a front matter block get defaults and the whole content as
/// body. A leading byte order mark is ignored.
pub fn parse_front_matter(content: &str) -> Result<(FrontMatter, &str)> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let Some(caps) = FRONT_MATTER_RE.captures(content) else {
        return Ok((FrontMatter::default(), content));
    };

    let yaml = caps.get(1).map_or("", |m| m.as_str());
    let body_start = caps.get(0).map_or(0, |m| m.end());
    let body = &content[body_start..];

    if yaml.trim().is_empty() {
        return Ok((FrontMatter::default(), body));
    }

    let front: FrontMatter = serde_yaml::from_str(yaml)
        .map_err(|e| DocrankError::parse(format!("invalid front matter: {e}")))?;

    Ok((front, body))
}

/// Timestamp layouts without an offset, tried after RFC 3339.
const LOCAL_TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Accept `2024-01-15`, RFC 3339 timestamps, and offset-less timestamps.
fn deserialize_date<'de, D>(deserializer: D) -> std::result::Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let raw = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(Some(date));
    }
    let rfc3339_err = match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => return Ok(Some(dt.date_naive())),
        Err(e) => e,
    };
    LOCAL_TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| Some(dt.date()))
        .ok_or_else(|| serde::de::Error::custom(format!("invalid date '{raw}': {rfc3339_err}")))
}

//! Content blocks: the closed set of block kinds an article body is built from

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use super::error::MalformedBlockError;

/// Discriminant of a [`ContentBlock`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockKind {
    Heading,
    Paragraph,
    List,
    Tip,
    MythBuster,
    Checklist,
    ScriptCompare,
    Timeline,
    Table,
}

impl BlockKind {
    /// Every kind, in declaration order
    pub const ALL: [BlockKind; 9] = [
        BlockKind::Heading,
        BlockKind::Paragraph,
        BlockKind::List,
        BlockKind::Tip,
        BlockKind::MythBuster,
        BlockKind::Checklist,
        BlockKind::ScriptCompare,
        BlockKind::Timeline,
        BlockKind::Table,
    ];

    /// Canonical (kebab-case) name, as written in catalog files
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::Heading => "heading",
            BlockKind::Paragraph => "paragraph",
            BlockKind::List => "list",
            BlockKind::Tip => "tip",
            BlockKind::MythBuster => "myth-buster",
            BlockKind::Checklist => "checklist",
            BlockKind::ScriptCompare => "script-compare",
            BlockKind::Timeline => "timeline",
            BlockKind::Table => "table",
        }
    }

    /// Resolve a discriminant as written in data.
    ///
    /// Matching ignores case, `-` and `_`, so `myth-buster`, `myth_buster`
    /// and `mythBuster` all name the same kind.
    pub fn parse(name: &str) -> Option<Self> {
        let normalized: String = name
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();

        BlockKind::ALL.into_iter().find(|kind| {
            kind.as_str().replace('-', "") == normalized
        })
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Prose with an optional title (Heading and Paragraph payload)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Prose {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub content: String,
}

/// Ordered items (List payload)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItemList {
    pub items: Vec<String>,
    /// Render as a numbered list
    #[serde(default)]
    pub ordered: bool,
}

/// Checklist payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Checklist {
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Tip {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MythBuster {
    pub myth: String,
    pub reality: String,
}

/// A wrong phrasing, its better replacement and why it works
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptCompare {
    pub wrong: String,
    pub right: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TimelinePhase {
    #[serde(deserialize_with = "scalar_string")]
    pub phase: String,
    #[serde(deserialize_with = "scalar_string")]
    pub title: String,
    #[serde(deserialize_with = "scalar_string")]
    pub description: String,
}

/// Timeline payload. Phases are displayed in the order given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Timeline {
    pub items: Vec<TimelinePhase>,
}

/// Table payload.
///
/// Every row is expected to have `headers.len()` cells. Rows that don't are
/// kept as written; the renderer pads or truncates them. Numeric and boolean
/// cells are read as their text, so `45000` and `"45000"` load the same.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Table {
    #[serde(deserialize_with = "scalar_strings")]
    pub headers: Vec<String>,
    #[serde(deserialize_with = "scalar_rows")]
    pub rows: Vec<Vec<String>>,
}

/// Custom deserializer that reads a string, number or boolean as text
fn scalar_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};

    struct ScalarText;

    impl<'de> Visitor<'de> for ScalarText {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string, number or boolean")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value)
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }
    }

    deserializer.deserialize_any(ScalarText)
}

struct Scalar(String);

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        scalar_string(deserializer).map(Scalar)
    }
}

fn scalar_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let cells = Vec::<Scalar>::deserialize(deserializer)?;
    Ok(cells.into_iter().map(|Scalar(text)| text).collect())
}

fn scalar_rows<'de, D>(deserializer: D) -> Result<Vec<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let rows = Vec::<Vec<Scalar>>::deserialize(deserializer)?;
    Ok(rows
        .into_iter()
        .map(|row| row.into_iter().map(|Scalar(text)| text).collect())
        .collect())
}

/// A single typed unit of article content
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ContentBlock {
    Heading(Prose),
    Paragraph(Prose),
    List(ItemList),
    Tip(Tip),
    MythBuster(MythBuster),
    Checklist(Checklist),
    ScriptCompare(ScriptCompare),
    Timeline(Timeline),
    Table(Table),
}

impl ContentBlock {
    pub fn kind(&self) -> BlockKind {
        match self {
            ContentBlock::Heading(_) => BlockKind::Heading,
            ContentBlock::Paragraph(_) => BlockKind::Paragraph,
            ContentBlock::List(_) => BlockKind::List,
            ContentBlock::Tip(_) => BlockKind::Tip,
            ContentBlock::MythBuster(_) => BlockKind::MythBuster,
            ContentBlock::Checklist(_) => BlockKind::Checklist,
            ContentBlock::ScriptCompare(_) => BlockKind::ScriptCompare,
            ContentBlock::Timeline(_) => BlockKind::Timeline,
            ContentBlock::Table(_) => BlockKind::Table,
        }
    }

    /// Convenience constructor for a heading without a title
    pub fn heading(content: impl Into<String>) -> Self {
        ContentBlock::Heading(Prose {
            title: None,
            content: content.into(),
        })
    }

    /// Convenience constructor for an untitled paragraph
    pub fn paragraph(content: impl Into<String>) -> Self {
        ContentBlock::Paragraph(Prose {
            title: None,
            content: content.into(),
        })
    }

    /// Every free-text string carried by the block, in display order
    pub fn texts(&self) -> Vec<&str> {
        match self {
            ContentBlock::Heading(p) | ContentBlock::Paragraph(p) => p
                .title
                .as_deref()
                .into_iter()
                .chain(std::iter::once(p.content.as_str()))
                .collect(),
            ContentBlock::List(list) => list.items.iter().map(String::as_str).collect(),
            ContentBlock::Checklist(list) => list.items.iter().map(String::as_str).collect(),
            ContentBlock::Tip(tip) => vec![tip.content.as_str()],
            ContentBlock::MythBuster(m) => vec![m.myth.as_str(), m.reality.as_str()],
            ContentBlock::ScriptCompare(s) => {
                vec![s.wrong.as_str(), s.right.as_str(), s.reason.as_str()]
            }
            ContentBlock::Timeline(t) => t
                .items
                .iter()
                .flat_map(|p| [p.phase.as_str(), p.title.as_str(), p.description.as_str()])
                .collect(),
            ContentBlock::Table(t) => t
                .headers
                .iter()
                .chain(t.rows.iter().flatten())
                .map(String::as_str)
                .collect(),
        }
    }
}

/// A block whose discriminant is outside the known set.
///
/// Kept so the renderer can show a placeholder in its place instead of
/// dropping the rest of the article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnsupportedBlock {
    pub kind: String,
}

/// An entry of an article body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Block {
    Content(ContentBlock),
    Unsupported(UnsupportedBlock),
}

impl Block {
    /// Build a block from its data representation.
    ///
    /// `index` is the block's position in the article body and is only used
    /// for error reporting.
    pub fn from_value(index: usize, value: Value) -> Result<Self, MalformedBlockError> {
        let mut fields = match value {
            Value::Object(map) => map,
            other => {
                return Err(MalformedBlockError::new(
                    index,
                    None,
                    format!("expected a map, found {}", value_type(&other)),
                ))
            }
        };

        let tag = match fields.remove("type") {
            Some(Value::String(tag)) => tag,
            Some(other) => {
                return Err(MalformedBlockError::new(
                    index,
                    None,
                    format!("`type` must be a string, found {}", value_type(&other)),
                ))
            }
            None => {
                return Err(MalformedBlockError::new(
                    index,
                    None,
                    "missing `type` discriminant",
                ))
            }
        };

        let Some(kind) = BlockKind::parse(&tag) else {
            return Ok(Block::Unsupported(UnsupportedBlock { kind: tag }));
        };

        ContentBlock::from_fields(kind, fields)
            .map(Block::Content)
            .map_err(|e| MalformedBlockError::new(index, Some(kind), e.to_string()))
    }

    pub fn kind_name(&self) -> &str {
        match self {
            Block::Content(block) => block.kind().as_str(),
            Block::Unsupported(block) => &block.kind,
        }
    }
}

impl From<ContentBlock> for Block {
    fn from(block: ContentBlock) -> Self {
        Block::Content(block)
    }
}

impl From<UnsupportedBlock> for Block {
    fn from(block: UnsupportedBlock) -> Self {
        Block::Unsupported(block)
    }
}

impl ContentBlock {
    /// Decode the payload of a block whose kind is already known
    fn from_fields(kind: BlockKind, fields: Map<String, Value>) -> serde_json::Result<Self> {
        let payload = Value::Object(fields);
        Ok(match kind {
            BlockKind::Heading => ContentBlock::Heading(serde_json::from_value(payload)?),
            BlockKind::Paragraph => ContentBlock::Paragraph(serde_json::from_value(payload)?),
            BlockKind::List => ContentBlock::List(serde_json::from_value(payload)?),
            BlockKind::Tip => ContentBlock::Tip(serde_json::from_value(payload)?),
            BlockKind::MythBuster => ContentBlock::MythBuster(serde_json::from_value(payload)?),
            BlockKind::Checklist => ContentBlock::Checklist(serde_json::from_value(payload)?),
            BlockKind::ScriptCompare => {
                ContentBlock::ScriptCompare(serde_json::from_value(payload)?)
            }
            BlockKind::Timeline => ContentBlock::Timeline(serde_json::from_value(payload)?),
            BlockKind::Table => ContentBlock::Table(serde_json::from_value(payload)?),
        })
    }
}

fn value_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a map",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_kind_spellings() {
        assert_eq!(BlockKind::parse("myth-buster"), Some(BlockKind::MythBuster));
        assert_eq!(BlockKind::parse("mythBuster"), Some(BlockKind::MythBuster));
        assert_eq!(BlockKind::parse("MYTH_BUSTER"), Some(BlockKind::MythBuster));
        assert_eq!(BlockKind::parse("scriptCompare"), Some(BlockKind::ScriptCompare));
        assert_eq!(BlockKind::parse("table"), Some(BlockKind::Table));
        assert_eq!(BlockKind::parse("carousel"), None);
    }

    #[test]
    fn test_every_kind_round_trips_its_name() {
        for kind in BlockKind::ALL {
            assert_eq!(BlockKind::parse(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn test_from_value_myth_buster() {
        let block = Block::from_value(
            0,
            json!({"type": "mythBuster", "myth": "X is bad", "reality": "X is fine"}),
        )
        .unwrap();
        assert_eq!(
            block,
            Block::Content(ContentBlock::MythBuster(MythBuster {
                myth: "X is bad".to_string(),
                reality: "X is fine".to_string(),
            }))
        );
    }

    #[test]
    fn test_from_value_unknown_kind_is_kept() {
        let block = Block::from_value(3, json!({"type": "video", "url": "x.mp4"})).unwrap();
        assert_eq!(
            block,
            Block::Unsupported(UnsupportedBlock {
                kind: "video".to_string()
            })
        );
        assert_eq!(block.kind_name(), "video");
    }

    #[test]
    fn test_payload_of_another_kind_is_malformed() {
        // a list payload declared as a paragraph
        let err = Block::from_value(5, json!({"type": "paragraph", "items": ["a", "b"]}))
            .unwrap_err();
        assert_eq!(err.index, 5);
        assert_eq!(err.kind, Some(BlockKind::Paragraph));
        assert!(err.to_string().contains("#5"));
    }

    #[test]
    fn test_missing_field_is_malformed() {
        let err = Block::from_value(1, json!({"type": "script-compare", "wrong": "a", "right": "b"}))
            .unwrap_err();
        assert!(err.reason.contains("reason"));
    }

    #[test]
    fn test_missing_type_is_malformed() {
        let err = Block::from_value(2, json!({"content": "orphan"})).unwrap_err();
        assert_eq!(err.kind, None);
        assert!(err.reason.contains("type"));
    }

    #[test]
    fn test_non_map_block_is_malformed() {
        let err = Block::from_value(0, json!("just a string")).unwrap_err();
        assert!(err.reason.contains("a string"));
    }

    #[test]
    fn test_table_numeric_cells_read_as_text() {
        let block = Block::from_value(
            0,
            json!({
                "type": "table",
                "headers": ["Airline", 2024],
                "rows": [["Emirates", 45000], ["Qatar", 4.5], ["Etihad", true]]
            }),
        )
        .unwrap();
        assert_eq!(
            block,
            Block::Content(ContentBlock::Table(Table {
                headers: vec!["Airline".into(), "2024".into()],
                rows: vec![
                    vec!["Emirates".into(), "45000".into()],
                    vec!["Qatar".into(), "4.5".into()],
                    vec!["Etihad".into(), "true".into()],
                ],
            }))
        );
    }

    #[test]
    fn test_timeline_numeric_phase_reads_as_text() {
        let block = Block::from_value(
            1,
            json!({
                "type": "timeline",
                "items": [{"phase": 1, "title": "Apply", "description": "Online form"}]
            }),
        )
        .unwrap();
        match block {
            Block::Content(ContentBlock::Timeline(timeline)) => {
                assert_eq!(timeline.items[0].phase, "1");
            }
            other => panic!("unexpected block {:?}", other),
        }
    }

    #[test]
    fn test_table_nested_cell_is_malformed() {
        let err = Block::from_value(
            2,
            json!({"type": "table", "headers": ["A"], "rows": [[{"x": 1}]]}),
        )
        .unwrap_err();
        assert_eq!(err.kind, Some(BlockKind::Table));
    }

    #[test]
    fn test_serialize_uses_type_tag() {
        let value = serde_json::to_value(ContentBlock::Tip(Tip {
            content: "Smile".to_string(),
        }))
        .unwrap();
        assert_eq!(value, json!({"type": "tip", "content": "Smile"}));
    }
}

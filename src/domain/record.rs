//! Directory records, page cursors and listing pages
//!
//! A [`Record`] is one user or group exactly as the service returned it. The
//! tool never interprets most of its fields; they pass through export and
//! restore untouched apart from the transformations in `core::restore`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Field holding a user's login name
pub const USERNAME_FIELD: &str = "Username";

/// Field holding a group's name
pub const GROUP_NAME_FIELD: &str = "GroupName";

/// Field added by the export enrichment: names of groups the user belongs to
pub const GROUPS_FIELD: &str = "Groups";

/// Field holding a user's attribute list (`[{"Name": .., "Value": ..}]`)
pub const ATTRIBUTES_FIELD: &str = "Attributes";

/// Server-assigned user identifier; rejected by the create API
pub const SERVER_ID_ATTRIBUTE: &str = "sub";

/// One directory entry (user or group)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Creates an empty record
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Returns the value of a field
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Returns a field as a string slice, if it is a JSON string
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(Value::as_str)
    }

    /// Sets a field, returning the previous value
    pub fn insert(&mut self, field: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(field.into(), value)
    }

    /// Removes a field
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.0.remove(field)
    }

    /// Whether the record has the given field
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Attaches supplemental fields, overwriting existing ones of the same name
    pub fn merge(&mut self, fields: Map<String, Value>) {
        for (key, value) in fields {
            self.0.insert(key, value);
        }
    }

    /// Mutable access to a field
    pub fn get_mut(&mut self, field: &str) -> Option<&mut Value> {
        self.0.get_mut(field)
    }

    /// The user's `Username`
    pub fn username(&self) -> Option<&str> {
        self.get_str(USERNAME_FIELD)
    }

    /// The group's `GroupName`
    pub fn group_name(&self) -> Option<&str> {
        self.get_str(GROUP_NAME_FIELD)
    }

    /// Group names attached by the export enrichment
    ///
    /// Non-string entries are ignored.
    pub fn groups(&self) -> Vec<String> {
        self.0
            .get(GROUPS_FIELD)
            .and_then(Value::as_array)
            .map(|groups| {
                groups
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Name used when reporting on this record
    pub fn display_key(&self) -> &str {
        self.username()
            .or_else(|| self.group_name())
            .unwrap_or("<unnamed>")
    }

    /// Looks up a user attribute value by name in `Attributes`
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.0
            .get(ATTRIBUTES_FIELD)
            .and_then(Value::as_array)?
            .iter()
            .find(|attr| attr.get("Name").and_then(Value::as_str) == Some(name))
            .and_then(|attr| attr.get("Value"))
            .and_then(Value::as_str)
    }

    /// Borrows the underlying JSON object
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consumes the record, returning the JSON object
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for Record {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(format!("expected a JSON object, got {other}")),
        }
    }
}

/// Opaque, service-issued continuation token
///
/// Never parsed or modified; handed back to the service verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageCursor(String);

impl PageCursor {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PageCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One page of a cursor-paginated listing
#[derive(Debug, Clone, Default)]
pub struct Page {
    /// Records on this page
    pub records: Vec<Record>,

    /// Cursor for the next page; `None` ends the listing
    pub next_cursor: Option<PageCursor>,
}

impl Page {
    pub fn new(records: Vec<Record>, next_cursor: Option<PageCursor>) -> Self {
        Self {
            records,
            next_cursor,
        }
    }

    /// A page with no continuation
    pub fn last(records: Vec<Record>) -> Self {
        Self::new(records, None)
    }
}

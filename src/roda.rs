//! Registry of Open Data record shapes.

use serde::Serialize;

use crate::config::{
    AGGREGATE_DESCRIPTION, AGGREGATE_DOCUMENTATION, AGGREGATE_LICENSE, AGGREGATE_NAME,
    BASELINE_TAGS, CONTACT_URL, DEFAULT_MANAGED_BY, UPDATE_FREQUENCY,
};
use crate::entry::{Entry, Resource};

pub const CSV_HEADER: [&str; 8] = [
    "name",
    "contact",
    "managed_by",
    "license",
    "documentation",
    "update_frequency",
    "tags",
    "description",
];

/// A registry file for a single dataset.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SeparateRecord {
    pub name: String,
    pub description: String,
    pub documentation: String,
    pub contact: String,
    pub managed_by: String,
    pub update_frequency: String,
    pub tags: Vec<String>,
    pub license: String,
    pub resources: Vec<Resource>,
}

impl From<&Entry> for SeparateRecord {
    fn from(e: &Entry) -> Self {
        SeparateRecord {
            name: e.name.clone(),
            description: e.description.clone(),
            documentation: e.documentation.clone(),
            contact: e.contact.clone(),
            managed_by: e.managed_by.clone(),
            update_frequency: e.update_frequency.clone(),
            tags: e.tags.clone(),
            license: e.license.clone(),
            resources: e.resources.clone(),
        }
    }
}

/// One registry file listing every dataset as a resource.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AggregateRecord {
    pub name: String,
    pub description: String,
    pub documentation: String,
    pub contact: String,
    pub managed_by: String,
    pub update_frequency: String,
    pub tags: Vec<String>,
    pub license: String,
    pub resources: Vec<Resource>,
}

impl AggregateRecord {
    pub fn new() -> Self {
        AggregateRecord {
            name: AGGREGATE_NAME.to_string(),
            description: AGGREGATE_DESCRIPTION.to_string(),
            documentation: AGGREGATE_DOCUMENTATION.to_string(),
            contact: CONTACT_URL.to_string(),
            managed_by: DEFAULT_MANAGED_BY.to_string(),
            update_frequency: UPDATE_FREQUENCY.to_string(),
            tags: BASELINE_TAGS.iter().map(|t| t.to_string()).collect(),
            license: AGGREGATE_LICENSE.to_string(),
            resources: Vec::new(),
        }
    }

    /// Add the entry's resource and merge in any tags not seen yet.
    pub fn push(&mut self, entry: &Entry) {
        self.resources.push(entry.aggregate_resource());
        for tag in &entry.tags {
            if !self.tags.contains(tag) {
                self.tags.push(tag.clone());
            }
        }
    }
}

impl Default for AggregateRecord {
    fn default() -> Self {
        Self::new()
    }
}

/// Flat debug row, in `CSV_HEADER` order.
pub fn to_row(e: &Entry) -> [String; 8] {
    [
        e.name.clone(),
        e.contact.clone(),
        e.managed_by.clone(),
        e.license.clone(),
        e.documentation.clone(),
        e.update_frequency.clone(),
        e.tags.join(" "),
        e.short_description.replace(',', ""),
    ]
}

// ── Tests ──

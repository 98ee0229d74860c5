use std::fmt;

use serde::Serialize;

use crate::config::{
    BASELINE_TAGS, CONTACT_URL, DEFAULT_MANAGED_BY, DEFAULT_REGION, DEFAULT_RESOURCE_DESCRIPTION,
    DEFAULT_RESOURCE_TYPE, DEFAULT_S3_BUCKET, UPDATE_FREQUENCY,
};

/// Storage location of a dataset in the registry schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resource {
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "ARN")]
    pub arn: String,
    #[serde(rename = "Region")]
    pub region: String,
    #[serde(rename = "Type")]
    pub kind: String,
}

impl Resource {
    fn for_dataset(id: &str) -> Self {
        Resource {
            description: DEFAULT_RESOURCE_DESCRIPTION.to_string(),
            arn: format!("arn:aws:s3:::{}/{}", DEFAULT_S3_BUCKET, id),
            region: DEFAULT_REGION.to_string(),
            kind: DEFAULT_RESOURCE_TYPE.to_string(),
        }
    }
}

/// One dataset from the catalog listing, enriched from its detail page.
#[derive(Debug, Clone)]
pub struct Entry {
    pub id: String,
    pub url: String,
    pub name: String,
    pub short_description: String,
    pub description: String,
    pub license: String,
    pub tags: Vec<String>,
    pub contact: String,
    pub documentation: String,
    pub managed_by: String,
    pub update_frequency: String,
    pub resources: Vec<Resource>,
}

impl Entry {
    pub fn new(id: &str, url: &str, name: &str, short_description: &str) -> Self {
        Entry {
            id: id.to_string(),
            url: url.to_string(),
            name: name.to_string(),
            short_description: short_description.to_string(),
            description: String::new(),
            license: String::new(),
            tags: BASELINE_TAGS.iter().map(|t| t.to_string()).collect(),
            contact: CONTACT_URL.to_string(),
            documentation: url.to_string(),
            managed_by: DEFAULT_MANAGED_BY.to_string(),
            update_frequency: UPDATE_FREQUENCY.to_string(),
            resources: vec![Resource::for_dataset(id)],
        }
    }

    /// The entry's resource as listed in the combined file: the long
    /// description is dropped in favour of the listing summary.
    pub fn aggregate_resource(&self) -> Resource {
        let mut resource = self
            .resources
            .first()
            .cloned()
            .unwrap_or_else(|| Resource::for_dataset(&self.id));
        resource.description = self.short_description.clone();
        resource
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} : {}", self.name, self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_entry_defaults() {
        let e = Entry::new("mitdb", "https://physionet.org/content/mitdb/1.0.0/", "MIT-BIH", "ecg");
        assert_eq!(e.tags, vec!["aws-pds", "life sciences"]);
        assert_eq!(e.documentation, e.url);
        assert!(e.description.is_empty());
        assert!(e.license.is_empty());
        assert_eq!(e.resources.len(), 1);
        assert_eq!(e.resources[0].arn, "arn:aws:s3:::physionet-pds/mitdb");
        assert_eq!(e.resources[0].kind, "S3 Bucket");
    }

    #[test]
    fn aggregate_resource_uses_short_description() {
        let mut e = Entry::new("mitdb", "https://physionet.org/content/mitdb/1.0.0/", "MIT-BIH", "ecg");
        e.description = "long text".to_string();
        let r = e.aggregate_resource();
        assert_eq!(r.description, "ecg");
        assert_eq!(r.arn, "arn:aws:s3:::physionet-pds/mitdb");
        // The entry's own resource is left alone.
        assert_eq!(e.resources[0].description, "Project data files");
    }

    #[test]
    fn display_name_and_description() {
        let mut e = Entry::new("x", "https://physionet.org/content/x/1/", "X", "");
        e.description = "desc".to_string();
        assert_eq!(e.to_string(), "X : desc");
    }
}

//! Artifact-level `maven-metadata.xml`

use chrono::{DateTime, Utc};

use quayside_adapters::maven::escape_xml;
use quayside_core::types::ArtifactIdentity;
use quayside_core::version::VersionString;

/// Timestamp format of `<lastUpdated>`
const LAST_UPDATED_FORMAT: &str = "%Y%m%d%H%M%S";

/// Version listing of one artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MavenMetadata {
    /// Group ID
    pub group_id: String,
    /// Artifact ID
    pub artifact_id: String,
    /// Most recently deployed version of any channel
    pub latest: Option<String>,
    /// Most recently deployed release version
    pub release: Option<String>,
    /// All known versions, oldest first
    pub versions: Vec<String>,
    /// `yyyyMMddHHmmss` of the last change
    pub last_updated: Option<String>,
}

impl MavenMetadata {
    /// Empty metadata for an identity
    pub fn new(identity: &ArtifactIdentity) -> Self {
        Self {
            group_id: identity.group_id.clone(),
            artifact_id: identity.artifact_id.clone(),
            latest: None,
            release: None,
            versions: Vec::new(),
            last_updated: None,
        }
    }

    /// Parse an existing metadata document, falling back to `identity` for missing coordinates
    pub fn parse(content: &str, identity: &ArtifactIdentity) -> Self {
        let versions = element_text(content, "versions")
            .map(|block| all_elements(block, "version"))
            .unwrap_or_default();

        Self {
            group_id: element_text(content, "groupId")
                .map(unescape_xml)
                .unwrap_or_else(|| identity.group_id.clone()),
            artifact_id: element_text(content, "artifactId")
                .map(unescape_xml)
                .unwrap_or_else(|| identity.artifact_id.clone()),
            latest: element_text(content, "latest").map(unescape_xml),
            release: element_text(content, "release").map(unescape_xml),
            versions,
            last_updated: element_text(content, "lastUpdated").map(str::to_string),
        }
    }

    /// Record a newly deployed version
    pub fn add_version(&mut self, version: &VersionString, now: DateTime<Utc>) {
        let value = version.as_str().to_string();
        if !self.versions.contains(&value) {
            self.versions.push(value.clone());
        }
        if version.channel().is_release() {
            self.release = Some(value.clone());
        }
        self.latest = Some(value);
        self.last_updated = Some(now.format(LAST_UPDATED_FORMAT).to_string());
    }

    /// Render the document
    pub fn render(&self) -> String {
        let mut xml = String::new();
        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str("<metadata>\n");
        xml.push_str(&format!("  <groupId>{}</groupId>\n", escape_xml(&self.group_id)));
        xml.push_str(&format!(
            "  <artifactId>{}</artifactId>\n",
            escape_xml(&self.artifact_id)
        ));
        xml.push_str("  <versioning>\n");
        if let Some(latest) = &self.latest {
            xml.push_str(&format!("    <latest>{}</latest>\n", escape_xml(latest)));
        }
        if let Some(release) = &self.release {
            xml.push_str(&format!("    <release>{}</release>\n", escape_xml(release)));
        }
        xml.push_str("    <versions>\n");
        for version in &self.versions {
            xml.push_str(&format!("      <version>{}</version>\n", escape_xml(version)));
        }
        xml.push_str("    </versions>\n");
        if let Some(last_updated) = &self.last_updated {
            xml.push_str(&format!("    <lastUpdated>{}</lastUpdated>\n", last_updated));
        }
        xml.push_str("  </versioning>\n");
        xml.push_str("</metadata>\n");
        xml
    }
}

fn element_text<'a>(content: &'a str, element: &str) -> Option<&'a str> {
    let open = format!("<{}>", element);
    let close = format!("</{}>", element);
    let start = content.find(&open)? + open.len();
    let end = content[start..].find(&close)? + start;
    Some(content[start..end].trim())
}

fn all_elements(content: &str, element: &str) -> Vec<String> {
    let open = format!("<{}>", element);
    let close = format!("</{}>", element);
    let mut values = Vec::new();
    let mut rest = content;
    while let Some(start) = rest.find(&open) {
        let after = &rest[start + open.len()..];
        let Some(end) = after.find(&close) else {
            break;
        };
        values.push(unescape_xml(after[..end].trim()));
        rest = &after[end + close.len()..];
    }
    values
}

fn unescape_xml(value: &str) -> String {
    value
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

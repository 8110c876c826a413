//! pom.xml parsing and generation

use std::path::Path;

use quayside_core::error::{AdapterError, Result};
use quayside_core::types::ArtifactIdentity;

/// Blocks whose children must not be mistaken for project-level elements
const NESTED_BLOCKS: [&str; 14] = [
    "parent",
    "dependencyManagement",
    "dependencies",
    "build",
    "profiles",
    "reporting",
    "distributionManagement",
    "licenses",
    "developers",
    "organization",
    "scm",
    "issueManagement",
    "repositories",
    "pluginRepositories",
];

/// Parsed pom.xml file
#[derive(Debug, Clone, Default)]
pub struct PomXml {
    /// Group ID (inherited from the parent when absent)
    pub group_id: Option<String>,
    /// Artifact ID
    pub artifact_id: Option<String>,
    /// Version (inherited from the parent when absent)
    pub version: Option<String>,
    /// Packaging type (jar, war, pom, etc.)
    pub packaging: Option<String>,
    /// Project name
    pub name: Option<String>,
    /// Project description
    pub description: Option<String>,
    /// Project URL
    pub url: Option<String>,
    /// Parent POM
    pub parent: Option<Parent>,
}

/// Parent POM coordinates
#[derive(Debug, Clone)]
pub struct Parent {
    /// Group ID
    pub group_id: String,
    /// Artifact ID
    pub artifact_id: String,
    /// Version
    pub version: String,
}

impl PomXml {
    /// Load a pom.xml file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AdapterError::ManifestParseError(format!("Failed to read pom.xml: {}", e))
        })?;

        Self::parse(&content)
    }

    /// Parse pom.xml content
    pub fn parse(content: &str) -> Result<Self> {
        if !content.contains("<project") {
            return Err(AdapterError::ManifestParseError(
                "pom.xml has no <project> element".to_string(),
            )
            .into());
        }

        let parent = extract_block(content, "parent").map(|block| Parent {
            group_id: extract_element(&block, "groupId").unwrap_or_default(),
            artifact_id: extract_element(&block, "artifactId").unwrap_or_default(),
            version: extract_element(&block, "version").unwrap_or_default(),
        });

        let top_level = strip_nested_blocks(content);

        let group_id = extract_element(&top_level, "groupId")
            .or_else(|| parent.as_ref().map(|p| p.group_id.clone()));
        let version = extract_element(&top_level, "version")
            .or_else(|| parent.as_ref().map(|p| p.version.clone()));

        Ok(PomXml {
            group_id,
            artifact_id: extract_element(&top_level, "artifactId"),
            version,
            packaging: extract_element(&top_level, "packaging"),
            name: extract_element(&top_level, "name"),
            description: extract_element(&top_level, "description"),
            url: extract_element(&top_level, "url"),
            parent,
        })
    }

    /// Whether the version is the CI-friendly `${revision}` placeholder
    pub fn uses_revision_property(&self) -> bool {
        self.version.as_deref() == Some("${revision}")
    }

    /// Turn a project POM into the one published for `identity`.
    ///
    /// The document is kept as written, dependencies included. `${revision}`
    /// placeholders and the project-level version are replaced by the resolved
    /// version, and the project-level groupId is aligned with the identity.
    pub fn publishable(content: &str, identity: &ArtifactIdentity) -> Result<String> {
        let parsed = Self::parse(content)?;
        let version = identity.version.as_str();
        let mut pom = content.replace("${revision}", version);

        if !replace_top_level(&mut pom, "version", version) {
            insert_near_artifact_id(&mut pom, "version", version, false)?;
        }
        if !replace_top_level(&mut pom, "groupId", &identity.group_id)
            && parsed.group_id.as_deref() != Some(identity.group_id.as_str())
        {
            insert_near_artifact_id(&mut pom, "groupId", &identity.group_id, true)?;
        }
        Ok(pom)
    }

    /// Render a standalone POM describing a published artifact.
    ///
    /// Used when the build produces no POM of its own, so the result declares
    /// no dependencies.
    pub fn render(
        identity: &ArtifactIdentity,
        packaging: &str,
        description: Option<&str>,
        url: Option<&str>,
    ) -> String {
        let mut pom = String::new();
        pom.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        pom.push_str(
            "<project xmlns=\"http://maven.apache.org/POM/4.0.0\" \
             xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\" \
             xsi:schemaLocation=\"http://maven.apache.org/POM/4.0.0 \
             https://maven.apache.org/xsd/maven-4.0.0.xsd\">\n",
        );
        pom.push_str("  <modelVersion>4.0.0</modelVersion>\n");
        push_element(&mut pom, "groupId", &identity.group_id);
        push_element(&mut pom, "artifactId", &identity.artifact_id);
        push_element(&mut pom, "version", identity.version.as_str());
        if packaging != "jar" {
            push_element(&mut pom, "packaging", packaging);
        }
        if let Some(description) = description {
            push_element(&mut pom, "description", description);
        }
        if let Some(url) = url {
            push_element(&mut pom, "url", url);
        }
        pom.push_str("</project>\n");
        pom
    }
}

fn push_element(out: &mut String, name: &str, value: &str) {
    out.push_str(&format!("  <{name}>{}</{name}>\n", escape_xml(value)));
}

/// Escape text for use inside an XML element
pub fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Extract a simple element value
fn extract_element(content: &str, element: &str) -> Option<String> {
    let start_tag = format!("<{}>", element);
    let end_tag = format!("</{}>", element);

    let start = content.find(&start_tag)?;
    let end = content[start..].find(&end_tag)?;
    let value = content[start + start_tag.len()..start + end].trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Extract the inner text of the first block with the given name
fn extract_block(content: &str, element: &str) -> Option<String> {
    let block = find_block(content, element, 0)?;
    Some(content[block.inner_start..block.inner_end].to_string())
}

/// Byte offsets of an element in a document
#[derive(Debug, Clone, Copy)]
struct Block {
    open_start: usize,
    inner_start: usize,
    inner_end: usize,
    end: usize,
}

/// Locate the first block named `element` at or after `from`
fn find_block(content: &str, element: &str, from: usize) -> Option<Block> {
    let open = format!("<{}", element);
    let close = format!("</{}>", element);

    let mut search = from;
    while let Some(found) = content[search..].find(&open) {
        let start = search + found;
        let after = content[start + open.len()..].chars().next()?;
        // Skip longer names sharing the prefix, e.g. <dependencies> vs <dependency>
        if after == '>' || after.is_whitespace() {
            let inner_start = content[start..].find('>')? + start + 1;
            let inner_end = content[inner_start..].find(&close)? + inner_start;
            return Some(Block {
                open_start: start,
                inner_start,
                inner_end,
                end: inner_end + close.len(),
            });
        }
        search = start + open.len();
    }
    None
}

/// Spans of every nested block, which hide their children from the project level
fn nested_spans(content: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    for name in NESTED_BLOCKS {
        let mut from = 0;
        while let Some(block) = find_block(content, name, from) {
            spans.push((block.open_start, block.end));
            from = block.end;
        }
    }
    spans
}

/// First project-level occurrence of `element`
fn find_top_level(content: &str, element: &str) -> Option<Block> {
    let spans = nested_spans(content);
    let mut from = 0;
    while let Some(block) = find_block(content, element, from) {
        let nested = spans
            .iter()
            .any(|&(start, end)| block.open_start > start && block.open_start < end);
        if !nested {
            return Some(block);
        }
        from = block.end;
    }
    None
}

/// Replace the text of a project-level element; false when it is absent
fn replace_top_level(content: &mut String, element: &str, value: &str) -> bool {
    match find_top_level(content, element) {
        Some(block) => {
            content.replace_range(block.inner_start..block.inner_end, &escape_xml(value));
            true
        }
        None => false,
    }
}

/// Insert a project-level element next to `<artifactId>`
fn insert_near_artifact_id(content: &mut String, element: &str, value: &str, before: bool) -> Result<()> {
    let anchor = find_top_level(content, "artifactId").ok_or_else(|| {
        AdapterError::ManifestParseError("POM has no project-level artifactId".to_string())
    })?;
    let line_start = content[..anchor.open_start].rfind('\n').map_or(0, |i| i + 1);
    let indent: String = content[line_start..anchor.open_start]
        .chars()
        .take_while(|c| c.is_whitespace())
        .collect();
    let tag = format!("<{element}>{}</{element}>", escape_xml(value));
    if before {
        content.insert_str(anchor.open_start, &format!("{tag}\n{indent}"));
    } else {
        content.insert_str(anchor.end, &format!("\n{indent}{tag}"));
    }
    Ok(())
}

fn strip_nested_blocks(content: &str) -> String {
    let mut stripped = content.to_string();
    for block in NESTED_BLOCKS {
        while let Some(found) = find_block(&stripped, block, 0) {
            stripped.replace_range(found.open_start..found.end, "");
        }
    }
    stripped
}

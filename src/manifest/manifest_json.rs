//! manifest.json parser

use crate::manifest::traits::{ParseError, Parser};
use crate::manifest::types::VersionField;
use tracing::warn;

/// Section holding the Cloud Foundry platform settings
pub const PLATFORM_SECTION: &str = "sap.platform.cf";

/// Key of the UI5 version inside [`PLATFORM_SECTION`]
pub const VERSION_KEY: &str = "ui5VersionNumber";

/// Parser for the `sap.platform.cf/ui5VersionNumber` entry of manifest.json files
pub struct ManifestJsonParser;

impl ManifestJsonParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ManifestJsonParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for ManifestJsonParser {
    fn parse(&self, content: &str) -> Result<Option<VersionField>, ParseError> {
        let mut parser = tree_sitter::Parser::new();
        let language = tree_sitter_json::LANGUAGE;
        parser.set_language(&language.into()).map_err(|e| {
            warn!("Failed to set JSON language for tree-sitter: {}", e);
            ParseError::TreeSitter(e.to_string())
        })?;

        let tree = parser.parse(content, None).ok_or_else(|| {
            warn!("Failed to parse JSON content");
            ParseError::ParseFailed("Failed to parse JSON".to_string())
        })?;

        let root = tree.root_node();
        if root.has_error() {
            let position = first_error_position(root);
            let message = format!(
                "Invalid JSON at line {}, column {}",
                position.row + 1,
                position.column + 1
            );
            warn!("{}", message);
            return Err(ParseError::ParseFailed(message));
        }

        // Find the root object
        let Some(document) = root.child(0) else {
            return Ok(None);
        };
        if document.kind() != "object" {
            return Ok(None);
        }

        let Some(platform) = self.find_value(document, content, PLATFORM_SECTION) else {
            return Ok(None);
        };
        if platform.kind() != "object" {
            return Ok(None);
        }

        let Some(value_node) = self.find_value(platform, content, VERSION_KEY) else {
            return Ok(None);
        };
        if value_node.kind() != "string" {
            return Ok(None);
        }

        let value = self.get_string_value(value_node, content);
        if value.is_empty() {
            return Ok(None);
        }

        // Adjust for quotes - the actual version starts after the opening quote
        Ok(Some(VersionField {
            value,
            start_offset: value_node.start_byte() + 1,
            end_offset: value_node.end_byte() - 1,
        }))
    }
}

/// Start of the first error or missing node below `node`
fn first_error_position(node: tree_sitter::Node) -> tree_sitter::Point {
    if node.is_error() || node.is_missing() {
        return node.start_position();
    }
    let mut cursor = node.walk();
    let position = node
        .children(&mut cursor)
        .find(|child| child.has_error())
        .map(first_error_position);
    position.unwrap_or_else(|| node.start_position())
}

impl ManifestJsonParser {
    /// Find the value node of the pair with the given key in an object node
    fn find_value<'tree>(
        &self,
        object_node: tree_sitter::Node<'tree>,
        content: &str,
        key: &str,
    ) -> Option<tree_sitter::Node<'tree>> {
        let mut cursor = object_node.walk();

        for child in object_node.children(&mut cursor) {
            if child.kind() != "pair" {
                continue;
            }

            let Some(key_node) = child.child_by_field_name("key") else {
                continue;
            };

            if self.get_string_value(key_node, content) == key {
                return child.child_by_field_name("value");
            }
        }

        None
    }

    /// Get the string value from a string node (removes quotes)
    fn get_string_value(&self, node: tree_sitter::Node, content: &str) -> String {
        let text = &content[node.byte_range()];
        // Remove surrounding quotes
        text.trim()
            .trim_start_matches('"')
            .trim_end_matches('"')
            .to_string()
    }
}

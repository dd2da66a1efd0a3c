//! Mermaid flowchart document assembly
//!
//! The walker appends edge and node lines to a [`GraphDocument`] body; the
//! header, the root node and the `classDef` block are added once the whole
//! tree has been walked and the root's totals are known.

use std::collections::HashSet;
use std::fmt::Write;

use crate::tree::ScanConfig;
use crate::tree::utils::escape_label;

pub const CLASS_FOLDER: &str = "folder";
pub const CLASS_FILE: &str = "file";
pub const CLASS_LARGE_FILE: &str = "largeFile";
pub const CLASS_HIGHLIGHT: &str = "highlight";
pub const CLASS_COLLAPSE: &str = "collapse";

/// Node identifiers handed out during one scan.
///
/// Two different paths can sanitize to the same identifier; the second one
/// gets a `_N` suffix so both still appear in the chart.
#[derive(Debug, Default)]
pub struct NodeIds {
    used: HashSet<String>,
}

impl NodeIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `base`, or the first free `base_N` if it is taken.
    pub fn claim(&mut self, base: String) -> String {
        if self.used.insert(base.clone()) {
            return base;
        }
        (2..)
            .map(|n| format!("{}_{}", base, n))
            .find(|candidate| self.used.insert(candidate.clone()))
            .unwrap_or(base)
    }
}

/// Ordered edge and node-label lines of a flowchart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphDocument {
    body: String,
}

impl GraphDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// `from --> to`
    pub fn edge(&mut self, from: &str, to: &str) {
        let _ = writeln!(self.body, "{} --> {}", from, to);
    }

    /// `id["label"]:::class1,class2`
    pub fn node(&mut self, id: &str, label: &str, classes: &[&str]) {
        let _ = writeln!(
            self.body,
            "{}[\"{}\"]:::{}",
            id,
            escape_label(label),
            classes.join(",")
        );
    }

    /// Append another fragment after this one.
    pub fn append(&mut self, other: GraphDocument) {
        self.body.push_str(&other.body);
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.body
    }

    /// Assemble the complete chart: header, root node, body, class definitions.
    pub fn into_chart(self, root_id: &str, root_label: &str, config: &ScanConfig) -> String {
        let mut root = GraphDocument::new();
        root.node(root_id, root_label, &[CLASS_FOLDER]);

        let mut chart = String::from("graph TD\n");
        chart.push_str(&root.body);
        chart.push_str(&self.body);
        chart.push('\n');
        chart.push_str(&class_definitions(config));
        chart
    }
}

/// The `classDef` block, with the configured node colors.
pub fn class_definitions(config: &ScanConfig) -> String {
    format!(
        "classDef {CLASS_FOLDER} fill:{},stroke:#333,stroke-width:2px,color:#333,font-weight:bold;\n\
         classDef {CLASS_FILE} fill:{},stroke:#333,stroke-width:1px,color:#000;\n\
         classDef {CLASS_LARGE_FILE} fill:{},stroke:#333,stroke-width:1px,color:#000,font-weight:bold;\n\
         classDef {CLASS_HIGHLIGHT} fill:#0f0,stroke:#333,stroke-width:2px,color:#000,font-weight:bold;\n\
         classDef {CLASS_COLLAPSE} fill:#eee,stroke:#666,stroke-dasharray: 5 5,color:#999;\n",
        config.folder_color, config.file_color, config.large_file_color
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_unique_ids() {
        let mut ids = NodeIds::new();
        assert_eq!(ids.claim("root_a_txt_0".to_string()), "root_a_txt_0");
        assert_eq!(ids.claim("root_a_txt_0".to_string()), "root_a_txt_0_2");
        assert_eq!(ids.claim("root_a_txt_0".to_string()), "root_a_txt_0_3");
        assert_eq!(ids.claim("other".to_string()), "other");
    }

    #[test]
    fn test_edge_and_node_lines() {
        let mut doc = GraphDocument::new();
        doc.edge("root", "root_a_txt_0");
        doc.node("root_a_txt_0", "📄 a.txt (50 B)", &[CLASS_FILE, CLASS_HIGHLIGHT]);
        assert_eq!(
            doc.as_str(),
            "root --> root_a_txt_0\nroot_a_txt_0[\"📄 a.txt (50 B)\"]:::file,highlight\n"
        );
    }

    #[test]
    fn test_node_label_quotes_are_escaped() {
        let mut doc = GraphDocument::new();
        doc.node("n", "📄 \"q\".txt", &[CLASS_FILE]);
        assert_eq!(doc.as_str(), "n[\"📄 #quot;q#quot;.txt\"]:::file\n");
    }

    #[test]
    fn test_append_keeps_order() {
        let mut first = GraphDocument::new();
        first.edge("a", "b");
        let mut second = GraphDocument::new();
        second.edge("b", "c");
        first.append(second);
        assert_eq!(first.as_str(), "a --> b\nb --> c\n");
        assert!(!first.is_empty());
        assert!(GraphDocument::new().is_empty());
    }

    #[test]
    fn test_into_chart_layout() {
        let config = ScanConfig::default();
        let mut body = GraphDocument::new();
        body.edge("root", "root_a_txt_0");

        let chart = body.into_chart("root", "📁 root (0 folders, 1 files, 5 B)", &config);
        let lines: Vec<&str> = chart.lines().collect();
        assert_eq!(lines[0], "graph TD");
        assert_eq!(lines[1], "root[\"📁 root (0 folders, 1 files, 5 B)\"]:::folder");
        assert_eq!(lines[2], "root --> root_a_txt_0");
        assert_eq!(lines[3], "");
        assert_eq!(
            lines[4],
            "classDef folder fill:#f9f,stroke:#333,stroke-width:2px,color:#333,font-weight:bold;"
        );
        assert_eq!(
            lines[8],
            "classDef collapse fill:#eee,stroke:#666,stroke-dasharray: 5 5,color:#999;"
        );
        assert!(chart.ends_with(";\n"));
    }

    #[test]
    fn test_class_definitions_use_configured_colors() {
        let config = ScanConfig {
            folder_color: "#123".to_string(),
            file_color: "#456".to_string(),
            large_file_color: "#789".to_string(),
            ..Default::default()
        };
        let defs = class_definitions(&config);
        assert!(defs.contains("classDef folder fill:#123,"));
        assert!(defs.contains("classDef file fill:#456,"));
        assert!(defs.contains("classDef largeFile fill:#789,"));
        assert!(defs.contains("classDef highlight fill:#0f0,"));
    }
}

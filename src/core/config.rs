//! Engine configuration and canonical tables
//!
//! Two process-wide tables live here: the canonical kind-rank order used by
//! the sort/prune stage and the consolidation filters, and the default
//! per-kind output folder names used by output assignment. Both are
//! initialized once and never mutated at runtime; per-run overrides travel
//! through `ReorgOptions` instead.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tidytree_marker::MarkerKind;

/// Canonical sort order for marker kinds. A kind absent from this table is
/// pruned by the sort stage and never anchors a consolidation node.
pub const CANONICAL_KIND_ORDER: [MarkerKind; 20] = [
    MarkerKind::Interface,
    MarkerKind::Class,
    MarkerKind::Record,
    MarkerKind::Struct,
    MarkerKind::Enum,
    MarkerKind::Const,
    MarkerKind::Delegate,
    MarkerKind::Constructor,
    MarkerKind::Destructor,
    MarkerKind::Method,
    MarkerKind::Property,
    MarkerKind::Field,
    MarkerKind::Operator,
    MarkerKind::EnumValue,
    MarkerKind::FieldValue,
    MarkerKind::Event,
    MarkerKind::Getter,
    MarkerKind::Setter,
    MarkerKind::Adder,
    MarkerKind::Remover,
];

lazy_static! {
    /// Default destination folder per type kind, used when
    /// `separate_folders` is enabled and no override is configured.
    pub static ref DEFAULT_FOLDER_NAMES: HashMap<MarkerKind, &'static str> = {
        let mut names = HashMap::new();
        names.insert(MarkerKind::Interface, "Interfaces");
        names.insert(MarkerKind::Class, "Classes");
        names.insert(MarkerKind::Record, "Records");
        names.insert(MarkerKind::Struct, "Structs");
        names.insert(MarkerKind::Enum, "Enums");
        names.insert(MarkerKind::Delegate, "Delegates");
        names
    };
}

/// Sort direction for the two-key marker comparator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// Parse direction from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Some(SortDirection::Ascending),
            "desc" | "descending" => Some(SortDirection::Descending),
            _ => None,
        }
    }
}

/// Runtime configuration for filtering and output assignment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReorgOptions {
    /// Sort direction for the sort/prune stage
    #[serde(default)]
    pub sort_direction: SortDirection,

    /// Override for the canonical kind order (None = canonical table)
    #[serde(default)]
    pub kind_order: Option<Vec<MarkerKind>>,

    /// Per-kind destination folder overrides
    #[serde(default)]
    pub folder_names: HashMap<MarkerKind, String>,

    /// Write units into per-kind folders; flat into the output root otherwise
    #[serde(default = "default_separate_folders")]
    pub separate_folders: bool,

    /// File extension for emitted units (without the dot)
    #[serde(default = "default_extension")]
    pub extension: String,
}

fn default_separate_folders() -> bool {
    true
}

fn default_extension() -> String {
    "cs".to_string()
}

impl Default for ReorgOptions {
    fn default() -> Self {
        Self {
            sort_direction: SortDirection::Ascending,
            kind_order: None,
            folder_names: HashMap::new(),
            separate_folders: true,
            extension: "cs".to_string(),
        }
    }
}

impl ReorgOptions {
    /// Create options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pattern: set sort direction
    pub fn with_direction(mut self, direction: SortDirection) -> Self {
        self.sort_direction = direction;
        self
    }

    /// Builder pattern: override the canonical kind order
    pub fn with_kind_order(mut self, order: Vec<MarkerKind>) -> Self {
        self.kind_order = Some(order);
        self
    }

    /// Builder pattern: set the folder name for a kind
    pub fn with_folder(mut self, kind: MarkerKind, name: impl Into<String>) -> Self {
        self.folder_names.insert(kind, name.into());
        self
    }

    /// Builder pattern: toggle per-kind folders
    pub fn with_separate_folders(mut self, separate: bool) -> Self {
        self.separate_folders = separate;
        self
    }

    /// Builder pattern: set the output extension
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// The effective kind order: the configured override, or the canonical table
    pub fn effective_kind_order(&self) -> Vec<MarkerKind> {
        self.kind_order
            .clone()
            .unwrap_or_else(|| CANONICAL_KIND_ORDER.to_vec())
    }

    /// The destination folder for a kind, if one is configured or defaulted.
    /// Returns None when `separate_folders` is off or the kind has no folder.
    pub fn folder_for(&self, kind: MarkerKind) -> Option<String> {
        if !self.separate_folders {
            return None;
        }
        if let Some(name) = self.folder_names.get(&kind) {
            return Some(name.clone());
        }
        DEFAULT_FOLDER_NAMES.get(&kind).map(|s| s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_order_is_total() {
        // every entry distinct, so the rank comparator is total over the table
        for (i, a) in CANONICAL_KIND_ORDER.iter().enumerate() {
            for b in &CANONICAL_KIND_ORDER[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(CANONICAL_KIND_ORDER.len(), 20);
    }

    #[test]
    fn test_canonical_order_leads_with_types() {
        assert_eq!(CANONICAL_KIND_ORDER[0], MarkerKind::Interface);
        assert_eq!(CANONICAL_KIND_ORDER[1], MarkerKind::Class);
        assert_eq!(CANONICAL_KIND_ORDER[19], MarkerKind::Remover);
    }

    #[test]
    fn test_sort_direction_parse() {
        assert_eq!(SortDirection::parse("asc"), Some(SortDirection::Ascending));
        assert_eq!(SortDirection::parse("ascending"), Some(SortDirection::Ascending));
        assert_eq!(SortDirection::parse("DESC"), Some(SortDirection::Descending));
        assert_eq!(SortDirection::parse("sideways"), None);
    }

    #[test]
    fn test_options_defaults() {
        let options = ReorgOptions::default();
        assert_eq!(options.sort_direction, SortDirection::Ascending);
        assert!(options.kind_order.is_none());
        assert!(options.separate_folders);
        assert_eq!(options.extension, "cs");
    }

    #[test]
    fn test_options_builder() {
        let options = ReorgOptions::new()
            .with_direction(SortDirection::Descending)
            .with_folder(MarkerKind::Class, "Types")
            .with_separate_folders(true)
            .with_extension("txt");

        assert_eq!(options.sort_direction, SortDirection::Descending);
        assert_eq!(options.folder_for(MarkerKind::Class), Some("Types".to_string()));
        assert_eq!(options.extension, "txt");
    }

    #[test]
    fn test_folder_for_defaults() {
        let options = ReorgOptions::default();
        assert_eq!(options.folder_for(MarkerKind::Enum), Some("Enums".to_string()));
        // members have no default folder
        assert_eq!(options.folder_for(MarkerKind::Method), None);
    }

    #[test]
    fn test_folder_for_flat_mode() {
        let options = ReorgOptions::new().with_separate_folders(false);
        assert_eq!(options.folder_for(MarkerKind::Class), None);
    }

    #[test]
    fn test_effective_kind_order_override() {
        let options =
            ReorgOptions::new().with_kind_order(vec![MarkerKind::Field, MarkerKind::Method]);
        assert_eq!(
            options.effective_kind_order(),
            vec![MarkerKind::Field, MarkerKind::Method]
        );
        assert_eq!(
            ReorgOptions::default().effective_kind_order().len(),
            CANONICAL_KIND_ORDER.len()
        );
    }

    #[test]
    fn test_options_serde() {
        let options = ReorgOptions::new().with_direction(SortDirection::Descending);
        let json = serde_json::to_string(&options).unwrap();
        let parsed: ReorgOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.sort_direction, SortDirection::Descending);
        assert!(parsed.separate_folders);
    }

    #[test]
    fn test_options_serde_defaults() {
        let parsed: ReorgOptions = serde_json::from_str("{}").unwrap();
        assert!(parsed.separate_folders);
        assert_eq!(parsed.extension, "cs");
    }
}

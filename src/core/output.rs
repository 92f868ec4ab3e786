//! Output assignment
//!
//! Consumes the commit tree (consolidated + sorted) and slices it into
//! output units: one destination file per top-level declaration, each
//! carrying the preserved preamble, the declaration's namespace wrapper,
//! and the original text reconstructed from byte ranges. Same-named
//! top-level markers (partial declarations) share one unit.
//!
//! Writing is the engine's only I/O boundary. Directory creation is
//! idempotent and a failed unit is recorded and skipped, never fatal to
//! the batch.

use std::fs;
use std::path::{Path, PathBuf};

use tidytree_marker::Marker;

use crate::core::config::ReorgOptions;

/// One destination file plus its generated text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputUnit {
    /// Destination path, relative to the output root
    pub path: PathBuf,
    /// Full text of the unit
    pub text: String,
}

/// A failed write, reported per unit
#[derive(Debug, Clone)]
pub struct UnitError {
    pub path: PathBuf,
    pub message: String,
}

/// Result of writing a batch of units
#[derive(Debug, Clone, Default)]
pub struct WriteReport {
    /// Files actually written
    pub written: Vec<PathBuf>,
    /// Per-unit failures; the batch continues past them
    pub errors: Vec<UnitError>,
}

impl WriteReport {
    /// Check if every unit was written
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// The shared leading text (license header, top-of-file lines) preceding
/// the first marker, copied verbatim into every unit.
pub fn leading_text<'a>(source: &'a str, markers: &[Marker]) -> &'a str {
    let first = markers
        .iter()
        .map(|m| m.span.start)
        .min()
        .unwrap_or(source.len());
    source.get(..first).unwrap_or("")
}

/// Slice a marker's span out of the original source, clamped to the text
fn slice_span<'a>(source: &'a str, marker: &Marker) -> &'a str {
    let end = marker.span.end.min(source.len());
    let start = marker.span.start.min(end);
    source.get(start..end).unwrap_or("")
}

/// Render one unit: preamble, then members with namespace blocks opened
/// and closed around contiguous same-namespace runs.
pub fn render_unit(members: &[&Marker], source: &str, preamble: &str) -> String {
    let mut text = String::new();
    if !preamble.is_empty() {
        text.push_str(preamble);
        if !text.ends_with('\n') {
            text.push('\n');
        }
    }

    let mut open_namespace: Option<&str> = None;
    for member in members {
        let namespace = member.namespace.as_deref();
        if namespace != open_namespace {
            if open_namespace.is_some() {
                text.push_str("}\n");
            }
            if let Some(name) = namespace {
                text.push_str("namespace ");
                text.push_str(name);
                text.push_str("\n{\n");
            }
            open_namespace = namespace;
        }
        let body = slice_span(source, member);
        text.push_str(body);
        if !body.ends_with('\n') {
            text.push('\n');
        }
    }
    if open_namespace.is_some() {
        text.push_str("}\n");
    }
    text
}

fn sanitize_file_stem(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '<' | '>' | '"' | '|' | '?' | '*' => '_',
            other => other,
        })
        .collect()
}

fn unit_path(marker: &Marker, options: &ReorgOptions) -> PathBuf {
    let file_name = format!("{}.{}", sanitize_file_stem(&marker.name), options.extension);
    match options.folder_for(marker.kind) {
        Some(folder) => PathBuf::from(folder).join(file_name),
        None => PathBuf::from(file_name),
    }
}

/// Slice a filtered, sorted top-level list into output units: one unit per
/// distinct top-level declaration, same-named markers grouped together.
pub fn assign_units(
    markers: &[Marker],
    source: &str,
    preamble: &str,
    options: &ReorgOptions,
) -> Vec<OutputUnit> {
    let mut units = Vec::new();
    let mut emitted: Vec<&Marker> = Vec::new();

    for marker in markers {
        if emitted.iter().any(|done| done.structural_eq(marker)) {
            continue;
        }
        let group: Vec<&Marker> = markers
            .iter()
            .filter(|candidate| candidate.structural_eq(marker))
            .collect();
        emitted.extend(group.iter().copied());

        units.push(OutputUnit {
            path: unit_path(marker, options),
            text: render_unit(&group, source, preamble),
        });
    }
    units
}

/// Write every unit under `root`. Directory creation is create-if-absent;
/// failures are recorded per unit and the batch continues.
pub fn write_units(units: &[OutputUnit], root: &Path) -> WriteReport {
    let mut report = WriteReport::default();
    for unit in units {
        let destination = root.join(&unit.path);
        let outcome = write_one(&destination, &unit.text);
        match outcome {
            Ok(()) => report.written.push(destination),
            Err(e) => {
                eprintln!("[WARN] Failed to write {}: {}", destination.display(), e);
                report.errors.push(UnitError {
                    path: destination,
                    message: e.to_string(),
                });
            }
        }
    }
    report
}

fn write_one(destination: &Path, text: &str) -> std::io::Result<()> {
    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(destination, text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tidytree_marker::{MarkerKind, Span};

    const SOURCE: &str = "\
// License header
public class Widget { }
public enum Color { Red }
";

    fn widget() -> Marker {
        // "public class Widget { }"
        Marker::new("Widget", MarkerKind::Class, Span::new(18, 41, 2, 2))
            .with_namespace("Acme.Gadgets")
    }

    fn color() -> Marker {
        // "public enum Color { Red }"
        Marker::new("Color", MarkerKind::Enum, Span::new(42, 67, 3, 3))
            .with_namespace("Acme.Gadgets")
    }

    #[test]
    fn test_leading_text() {
        let markers = vec![widget(), color()];
        assert_eq!(leading_text(SOURCE, &markers), "// License header\n");
        assert_eq!(leading_text(SOURCE, &[]), SOURCE);
    }

    #[test]
    fn test_render_unit_wraps_namespace() {
        let marker = widget();
        let text = render_unit(&[&marker], SOURCE, "// License header\n");
        assert_eq!(
            text,
            "// License header\nnamespace Acme.Gadgets\n{\npublic class Widget { }\n}\n"
        );
    }

    #[test]
    fn test_render_unit_without_namespace() {
        let mut marker = widget();
        marker.namespace = None;
        let text = render_unit(&[&marker], SOURCE, "");
        assert_eq!(text, "public class Widget { }\n");
    }

    #[test]
    fn test_render_contiguous_namespace_run_shares_block() {
        let a = widget();
        let b = color();
        let text = render_unit(&[&a, &b], SOURCE, "");
        assert_eq!(text.matches("namespace Acme.Gadgets").count(), 1);
        assert_eq!(text.matches('}').count(), 3); // two bodies + one close
    }

    #[test]
    fn test_render_closes_before_namespace_change() {
        let a = widget();
        let mut b = color();
        b.namespace = Some("Acme.Paints".to_string());
        let text = render_unit(&[&a, &b], SOURCE, "");
        assert_eq!(text.matches("namespace ").count(), 2);
        let gadgets = text.find("Acme.Gadgets").unwrap();
        let paints = text.find("Acme.Paints").unwrap();
        let close = text[gadgets..paints].find("}\n").unwrap();
        assert!(gadgets + close < paints, "first run closed before second opens");
    }

    #[test]
    fn test_assign_units_one_per_declaration() {
        let markers = vec![widget(), color()];
        let units = assign_units(&markers, SOURCE, "", &ReorgOptions::default());
        assert_eq!(units.len(), 2);
        assert_eq!(units[0].path, PathBuf::from("Classes/Widget.cs"));
        assert_eq!(units[1].path, PathBuf::from("Enums/Color.cs"));
    }

    #[test]
    fn test_assign_units_flat_mode() {
        let options = ReorgOptions::default().with_separate_folders(false);
        let units = assign_units(&[widget()], SOURCE, "", &options);
        assert_eq!(units[0].path, PathBuf::from("Widget.cs"));
    }

    #[test]
    fn test_assign_units_groups_partials() {
        let markers = vec![widget(), color(), widget()];
        let units = assign_units(&markers, SOURCE, "", &ReorgOptions::default());
        assert_eq!(units.len(), 2, "same-named declarations share one unit");
        let widget_unit = &units[0];
        assert_eq!(widget_unit.text.matches("class Widget").count(), 2);
    }

    #[test]
    fn test_unit_path_sanitizes_name() {
        let mut odd = widget();
        odd.name = "Outer/Inner".to_string();
        let units = assign_units(&[odd], SOURCE, "", &ReorgOptions::default());
        assert_eq!(units[0].path, PathBuf::from("Classes/Outer_Inner.cs"));
    }

    #[test]
    fn test_slice_span_clamps_out_of_range() {
        let mut marker = widget();
        marker.span = Span::new(10, 10_000, 1, 1);
        let text = render_unit(&[&marker], SOURCE, "");
        assert!(text.contains("class Widget"));
    }
}

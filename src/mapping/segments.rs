//! Position-aware mapping that only rewrites whole path segments

use super::{MappingLayout, SEPARATORS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    Outside,
    AfterSourceRoot,
    AfterSubtree,
    Inside,
}

/// Map a source path by rewriting layout segments in place.
///
/// The source root becomes the output root; `main`/`test` become the
/// classes subtrees only directly below a source root; the language segment
/// is dropped only directly below such a subtree; the extension is rewritten
/// only on the final segment. Empty segments are dropped, which collapses
/// doubled separators. The first separator found in the input is used for the
/// output, and a leading separator is preserved.
pub fn map_segments(source_path: &str, layout: &MappingLayout) -> String {
    let sep = source_path
        .chars()
        .find(|c| SEPARATORS.contains(c))
        .unwrap_or('/');
    let absolute = source_path.starts_with(SEPARATORS);

    let segments: Vec<&str> = source_path
        .split(SEPARATORS)
        .filter(|s| !s.is_empty())
        .collect();
    let last = segments.len().saturating_sub(1);

    let mut out: Vec<String> = Vec::with_capacity(segments.len());
    let mut position = Position::Outside;

    for (i, segment) in segments.iter().enumerate() {
        let mapped = match position {
            Position::Outside if *segment == layout.source_root && i != last => {
                position = Position::AfterSourceRoot;
                Some(layout.output_root.clone())
            }
            Position::AfterSourceRoot if *segment == layout.main_dir => {
                position = Position::AfterSubtree;
                Some(layout.classes_dir.clone())
            }
            Position::AfterSourceRoot if *segment == layout.test_dir => {
                position = Position::AfterSubtree;
                Some(layout.test_classes_dir.clone())
            }
            Position::AfterSubtree if *segment == layout.language => {
                position = Position::Inside;
                None
            }
            Position::Outside => Some(segment.to_string()),
            _ => {
                position = Position::Inside;
                Some(segment.to_string())
            }
        };

        if let Some(mut segment) = mapped {
            if i == last && layout.is_source_path(&segment) {
                segment.truncate(segment.len() - layout.source_extension.len());
                segment.push_str(&layout.artifact_extension);
            }
            out.push(segment);
        }
    }

    let joined = out.join(&sep.to_string());
    if absolute {
        format!("{}{}", sep, joined)
    } else {
        joined
    }
}

//! Human-readable summary renderer for record diffs.

use crate::diff::model::{Diff, DiffEntry, TypeOfChange};

/// Render a Markdown summary of a [`Diff`].
///
/// The report opens with a counts table, then lists added, removed and
/// modified records in diff order. Modified records also list the properties
/// that changed. Unchanged records are only counted.
pub fn render_summary(diff: &Diff, title: &str) -> String {
    let mut out = String::new();
    let summary = diff.summary();

    out.push_str(&format!("## {title}\n\n"));

    out.push_str("| Change | Count |\n|---|---|\n");
    for kind in TypeOfChange::ALL {
        out.push_str(&format!("| {} | {} |\n", kind.label(), summary.count(kind)));
    }
    out.push_str(&format!("| TOTAL | {} |\n\n", summary.total()));

    if summary.is_unchanged() {
        out.push_str("_No changes detected._\n");
        return out;
    }

    for (kind, heading) in [
        (TypeOfChange::Added, "Added"),
        (TypeOfChange::Removed, "Removed"),
        (TypeOfChange::Modified, "Modified"),
    ] {
        if summary.count(kind) == 0 {
            continue;
        }
        out.push_str(&format!("### {heading} ({})\n\n", summary.count(kind)));
        for entry in diff.entries_of(kind) {
            out.push_str(&format!("- `{}`\n", entry.id()));
            if kind == TypeOfChange::Modified {
                push_changed_properties(&mut out, entry);
            }
        }
        out.push('\n');
    }

    out
}

fn push_changed_properties(out: &mut String, entry: &DiffEntry) {
    for (name, change) in entry.changed_properties() {
        out.push_str(&format!("  - `{name}`: {change}\n"));
    }
}

//! Stage labels derived from directory layout.
//!
//! Measurement files live at `<stage-folder>/<sub-folder>/<file>.csv`,
//! e.g. `DR48p2h/0p1k/Merged_Tick_Distribution_DR48p2h_0p1k.csv`, where the
//! stage folder starts with `DR<number>`.

use regex::Regex;
use std::cmp::Ordering;
use std::path::Path;
use std::sync::LazyLock;

static STAGE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^DR\d+").expect("stage pattern is valid"));

static DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("digit pattern is valid"));

/// Leading `DR<digits>` of a folder name, or the whole name when absent
pub fn simplify_stage_label(folder: &str) -> String {
    STAGE_PREFIX
        .find(folder)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| folder.to_string())
}

/// Name of the file's grandparent directory, empty when there is none
pub fn grandparent_folder_name(path: &Path) -> String {
    path.parent()
        .and_then(Path::parent)
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Stage label for a distribution file
pub fn stage_label_for_path(path: &Path) -> String {
    simplify_stage_label(&grandparent_folder_name(path))
}

/// First integer embedded in a label ("DR10" -> 10, "S3R" -> 3)
pub fn label_number(label: &str) -> Option<u64> {
    DIGITS.find(label).and_then(|m| m.as_str().parse().ok())
}

/// Numeric label ordering; labels without a number sort last, by text
pub fn compare_labels(a: &str, b: &str) -> Ordering {
    match (label_number(a), label_number(b)) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn suffix_after_digits_is_dropped() {
        assert_eq!(simplify_stage_label("DR48p2h"), "DR48");
        assert_eq!(simplify_stage_label("DR0"), "DR0");
        assert_eq!(simplify_stage_label("baseline"), "baseline");
        assert_eq!(simplify_stage_label("xDR3"), "xDR3");
    }

    #[test]
    fn stage_comes_from_grandparent() {
        let path = PathBuf::from("/data/DR12a/0p1k/Merged.csv");
        assert_eq!(stage_label_for_path(&path), "DR12");
        assert_eq!(grandparent_folder_name(Path::new("file.csv")), "");
    }

    #[test]
    fn numeric_ordering() {
        let mut labels = vec!["DR10", "misc", "DR2", "DR1"];
        labels.sort_by(|a, b| compare_labels(a, b));
        assert_eq!(labels, vec!["DR1", "DR2", "DR10", "misc"]);
    }
}

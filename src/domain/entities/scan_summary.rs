//! End-of-run summary produced by the output manager.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Serialize;

use super::recovered_file::Category;

/// Aggregate counters and byte totals for one category.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct CategoryTotals {
    pub count: usize,
    pub bytes: u64,
}

/// The report printed (and optionally serialised) at the end of a scan pass.
#[derive(Debug, Clone, Serialize)]
pub struct RecoveryReport {
    pub device_path: String,
    pub output_dir: String,
    pub bytes_scanned: u64,
    pub files_recovered: usize,
    pub bytes_recovered: u64,
    #[serde(serialize_with = "serialize_category_totals")]
    pub by_category: BTreeMap<Category, CategoryTotals>,
    pub warnings: Vec<String>,
    #[serde(with = "duration_secs")]
    pub elapsed: Duration,
}

impl RecoveryReport {
    pub fn summary_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "Scanned {} from {}\n",
            humansize::format_size(self.bytes_scanned, humansize::DECIMAL),
            self.device_path
        ));
        out.push_str(&format!(
            "Recovered {} files ({}) in {:.2}s\n",
            self.files_recovered,
            humansize::format_size(self.bytes_recovered, humansize::DECIMAL),
            self.elapsed.as_secs_f64()
        ));
        for (category, totals) in &self.by_category {
            out.push_str(&format!(
                "  {:<10} {:>5} files, {}\n",
                category_label(*category),
                totals.count,
                humansize::format_size(totals.bytes, humansize::DECIMAL)
            ));
        }
        if !self.warnings.is_empty() {
            out.push_str(&format!("{} warning(s) during this pass\n", self.warnings.len()));
        }
        out
    }
}

fn category_label(category: Category) -> &'static str {
    match category {
        Category::Image => "images",
        Category::Document => "documents",
        Category::Audio => "audio",
        Category::Video => "videos",
        Category::Archive => "archives",
        Category::Unknown => "others",
    }
}

// `Category` has no natural serde representation; we key the serialised map
// by its directory name instead of deriving `Ord`/`Serialize` on it directly.
impl Ord for Category {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.dir_name().cmp(other.dir_name())
    }
}
impl PartialOrd for Category {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

fn serialize_category_totals<S>(
    map: &BTreeMap<Category, CategoryTotals>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    use serde::ser::SerializeMap;
    let mut m = serializer.serialize_map(Some(map.len()))?;
    for (category, totals) in map {
        m.serialize_entry(category.dir_name(), totals)?;
    }
    m.end()
}

mod duration_secs {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_f64(d.as_secs_f64())
    }
}

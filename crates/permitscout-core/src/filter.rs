//! Keyword filtering and multi-source aggregation of permit records.
//!
//! Matching is a case-insensitive substring test over `project_type`.
//! Partial words count, so "Subfloor repair" matches the keyword `floor`.
//! Word-boundary matching would be a possible refinement.

use crate::record::PermitRecord;

/// Keywords selecting flooring-relevant permits.
pub const FLOORING_KEYWORDS: &[&str] = &["floor", "remodel", "renovation", "construction"];

/// A set of keyword alternatives, normalized for case-insensitive matching.
///
/// Keywords are trimmed and lowercased on construction. Blank entries are
/// dropped because an empty substring would match every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSet {
    keywords: Vec<String>,
}

impl KeywordSet {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for kw in keywords {
            let kw = kw.as_ref().trim().to_lowercase();
            if !kw.is_empty() && !normalized.contains(&kw) {
                normalized.push(kw);
            }
        }
        Self {
            keywords: normalized,
        }
    }

    /// The default flooring keyword set.
    pub fn flooring() -> Self {
        Self::new(FLOORING_KEYWORDS)
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(String::as_str)
    }

    /// Whether `text` contains at least one keyword, ignoring case.
    ///
    /// Empty text never matches.
    pub fn matches(&self, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }
        let haystack = text.to_lowercase();
        self.keywords.iter().any(|kw| haystack.contains(kw.as_str()))
    }
}

/// Select the records whose `project_type` matches any keyword.
///
/// Preserves input order. An empty keyword set or empty input yields an
/// empty result.
pub fn filter_records<I>(records: I, keywords: &KeywordSet) -> Vec<PermitRecord>
where
    I: IntoIterator<Item = PermitRecord>,
{
    if keywords.is_empty() {
        return Vec::new();
    }
    records
        .into_iter()
        .filter(|rec| keywords.matches(rec.project_type()))
        .collect()
}

/// Concatenate per-source record lists in source order.
///
/// Row order within each source is kept and nothing is deduplicated: the same
/// property listed by two sources yields two records.
pub fn aggregate<I>(per_source: I) -> Vec<PermitRecord>
where
    I: IntoIterator<Item = Vec<PermitRecord>>,
{
    per_source.into_iter().flatten().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(address: &str, project_type: &str) -> PermitRecord {
        PermitRecord::from_cells(&[address, "Owner", project_type, "1000", "2024-01-01", "Co"])
            .unwrap()
    }

    #[test]
    fn keeps_sample_leads() {
        let records = vec![
            rec("123 Main St", "Remodel"),
            rec("456 Ocean Dr", "New Construction"),
        ];
        let kept = filter_records(records.clone(), &KeywordSet::flooring());
        assert_eq!(kept, records);
    }

    #[test]
    fn case_insensitive_substring() {
        let records = vec![
            rec("a", "KITCHEN RENOVATION"),
            rec("b", "Subfloor repair"),
            rec("c", "Pool fence"),
            rec("d", "roof replacement"),
        ];
        let kept = filter_records(records, &KeywordSet::flooring());
        let addrs: Vec<&str> = kept.iter().map(|r| r.property_address()).collect();
        assert_eq!(addrs, vec!["a", "b"]);
    }

    #[test]
    fn result_is_subset_and_every_result_matches() {
        let keywords = KeywordSet::new(["Remodel"]);
        let records = vec![
            rec("a", "remodel"),
            rec("b", "demolition"),
            rec("c", "Bathroom REMODELING"),
        ];
        let kept = filter_records(records.clone(), &keywords);
        for r in &kept {
            assert!(records.contains(r));
            assert!(r.project_type().to_lowercase().contains("remodel"));
        }
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn empty_project_type_excluded() {
        let records = vec![rec("a", ""), rec("b", "   "), rec("c", "Remodel")];
        let kept = filter_records(records, &KeywordSet::flooring());
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].property_address(), "c");
    }

    #[test]
    fn empty_keywords_yield_empty() {
        let records = vec![rec("a", "Remodel")];
        assert!(filter_records(records.clone(), &KeywordSet::default()).is_empty());
        assert!(filter_records(records, &KeywordSet::new(["", "  "])).is_empty());
    }

    #[test]
    fn empty_input_yields_empty() {
        assert!(filter_records(Vec::new(), &KeywordSet::flooring()).is_empty());
    }

    #[test]
    fn keyword_set_normalizes_and_dedups() {
        let set = KeywordSet::new([" Floor ", "floor", "TILE"]);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["floor", "tile"]);
    }

    #[test]
    fn aggregate_preserves_source_then_row_order() {
        let a = vec![rec("a1", "x"), rec("a2", "x")];
        let b = vec![rec("b1", "x")];
        let all = aggregate(vec![a.clone(), b.clone()]);
        let expected: Vec<PermitRecord> = a.into_iter().chain(b).collect();
        assert_eq!(all, expected);
    }

    #[test]
    fn aggregate_keeps_duplicates_across_sources() {
        let a = vec![rec("123 Main St", "Remodel")];
        let all = aggregate(vec![a.clone(), a]);
        assert_eq!(all.len(), 2);
        assert_eq!(all[0], all[1]);
    }

    #[test]
    fn aggregate_of_nothing_is_empty() {
        assert!(aggregate(Vec::<Vec<PermitRecord>>::new()).is_empty());
        assert!(aggregate(vec![Vec::new(), Vec::new()]).is_empty());
    }
}

use crate::frequency::FrequencyTable;
use crate::taxonomy::{Category, KeywordList, TASK_PATTERNS, TECH_KEYWORDS};

/// Matches per technology, one table per category, in category order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TechStack {
    pub categories: Vec<(String, FrequencyTable<String>)>,
}

impl TechStack {
    pub fn category(&self, name: &str) -> Option<&FrequencyTable<String>> {
        self.categories
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, table)| table)
    }
}

/// Join texts into the single lowercase blob keywords are matched against
pub fn build_blob<'a, I>(parts: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    parts.into_iter().collect::<Vec<_>>().join(" ").to_lowercase()
}

/// Number of distinct keywords that occur anywhere in the blob.
/// Repeats of the same keyword still count once.
pub fn count_matches(blob: &str, keywords: &[&str]) -> usize {
    keywords.iter().filter(|kw| blob.contains(*kw)).count()
}

fn classify(blob: &str, labels: &[KeywordList]) -> FrequencyTable<String> {
    let mut table = FrequencyTable::new();
    for (label, keywords) in labels {
        table.add(label.to_string(), count_matches(blob, keywords));
    }
    table.ranked()
}

/// Score user texts and touched file paths against a technology taxonomy
pub fn analyze_tech_stack_with(
    taxonomy: &[Category],
    texts: &[String],
    files: &[String],
) -> TechStack {
    let blob = build_blob(texts.iter().chain(files.iter()).map(String::as_str));

    TechStack {
        categories: taxonomy
            .iter()
            .map(|(category, techs)| (category.to_string(), classify(&blob, techs)))
            .collect(),
    }
}

pub fn analyze_tech_stack(texts: &[String], files: &[String]) -> TechStack {
    analyze_tech_stack_with(TECH_KEYWORDS, texts, files)
}

/// Score user texts against task-type trigger phrases. File paths are not used.
pub fn analyze_task_types_with(patterns: &[KeywordList], texts: &[String]) -> FrequencyTable<String> {
    let blob = build_blob(texts.iter().map(String::as_str));
    classify(&blob, patterns)
}

pub fn analyze_task_types(texts: &[String]) -> FrequencyTable<String> {
    analyze_task_types_with(TASK_PATTERNS, texts)
}

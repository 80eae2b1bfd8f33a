use crate::parser::{MessageRecord, UserContent};

/// Pull user-authored text out of session records, in order.
/// A block-style message yields one string per `text` block.
pub fn extract_user_texts(records: &[MessageRecord]) -> Vec<String> {
    let mut texts = Vec::new();

    for record in records {
        if let MessageRecord::User(content) = record {
            match content {
                UserContent::Text(s) => texts.push(s.clone()),
                UserContent::Blocks(blocks) => texts.extend(blocks.iter().cloned()),
                UserContent::Empty => {}
            }
        }
    }

    texts
}

/// Paths tracked by file-history snapshots, in order. Not deduplicated.
pub fn extract_file_changes(records: &[MessageRecord]) -> Vec<String> {
    records
        .iter()
        .filter_map(|record| match record {
            MessageRecord::FileHistorySnapshot { tracked_files } => Some(tracked_files),
            _ => None,
        })
        .flatten()
        .cloned()
        .collect()
}

use crate::projects::SessionRecord;
use serde::Serialize;

/// Summary activity statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metrics {
    pub total_sessions: usize,
    /// Sum of the message counts declared by the session indexes
    pub total_messages: u64,
    pub avg_messages_per_session: f64,
    /// Mean length of user texts in characters, rounded half-to-even
    pub avg_message_length: u64,
    /// Percentage of user texts containing a question mark, one decimal
    pub question_ratio: f64,
}

fn is_question(text: &str) -> bool {
    text.contains('?') || text.contains('？')
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

pub fn calculate_metrics(sessions: &[SessionRecord], user_texts: &[String]) -> Metrics {
    let total_sessions = sessions.len();
    let total_messages: u64 = sessions.iter().map(|s| s.message_count).sum();

    let avg_messages_per_session = if total_sessions > 0 {
        total_messages as f64 / total_sessions as f64
    } else {
        0.0
    };

    let (avg_message_length, question_ratio) = if user_texts.is_empty() {
        (0, 0.0)
    } else {
        let n = user_texts.len() as f64;
        let chars: usize = user_texts.iter().map(|t| t.chars().count()).sum();
        let questions = user_texts.iter().filter(|t| is_question(t)).count();
        (
            (chars as f64 / n).round_ties_even() as u64,
            round_one_decimal(questions as f64 / n * 100.0),
        )
    };

    Metrics {
        total_sessions,
        total_messages,
        avg_messages_per_session,
        avg_message_length,
        question_ratio,
    }
}

//! Fixed prompt templates for memory summaries and self-assessment.

use recall_core::message::ConversationEntry;

/// Characters of each entry kept when history is quoted into an
/// assessment prompt.
pub const CLIP_CHARS: usize = 100;

/// Main-channel hint listing the collected URLs. `None` when there are none.
pub fn url_hint<'a>(urls: impl IntoIterator<Item = &'a str>) -> Option<String> {
    let urls: Vec<&str> = urls.into_iter().collect();
    if urls.is_empty() {
        return None;
    }
    Some(format!(
        "Consider the following URLs for context: {}",
        urls.join(", ")
    ))
}

pub fn memory_summary(user_message: &str, response: &str) -> String {
    format!(
        "Based on the following conversation, what key information should I remember?\n\n{user_message}\n{response}"
    )
}

/// JSON list of clipped `role: content...` lines.
pub fn clipped_history(entries: &[ConversationEntry]) -> serde_json::Result<String> {
    let lines: Vec<String> = entries
        .iter()
        .map(|e| e.render_clipped(CLIP_CHARS))
        .collect();
    serde_json::to_string(&lines)
}

pub fn self_analysis(clipped_history_json: &str, memory_json: &str) -> String {
    format!(
        "Previous interactions: {clipped_history_json}\nMemory: {memory_json}\n\n\
         Analyze the performance of this AI assistant application and suggest improvements in the following areas:\n\
         1. Response quality and relevance\n\
         2. Understanding of user queries\n\
         3. Use of memory for context\n\
         4. Consistency in responses\n\
         5. Overall user experience\n\n\
         Provide specific examples where possible and suggest concrete steps for improvement."
    )
}

pub fn action_items(analysis: &str) -> String {
    format!(
        "Based on the following analysis, generate 3-5 specific action items for improving the AI assistant application:\n\n{analysis}\n\nAction items:"
    )
}

pub fn implementation(action_items: &str) -> String {
    format!(
        "Based on these action items, suggest code improvements or new features to enhance the AI assistant application:\n\n{action_items}\n\nSuggested improvements:"
    )
}

pub fn quick_assessment(clipped_history_json: &str, improvements_json: &str) -> String {
    format!(
        "Recent conversations: {clipped_history_json}\nCurrent improvements: {improvements_json}\n\n\
         Briefly assess the recent performance of this AI assistant application and suggest one key area for immediate improvement."
    )
}

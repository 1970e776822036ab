//! 每日反思提示词

use crate::models::JournalEntry;

const NO_EMOTIONS: &str = "No specific emotions detected.";
const NO_CONCERNS: &str = "No specific concerns identified.";

/// 为条目构建反思提示词；原文为空时返回 None
pub fn reflection_prompt(entry: &JournalEntry) -> Option<String> {
    if entry.raw_text.trim().is_empty() {
        return None;
    }

    let emotions = if entry.emotions.is_empty() {
        NO_EMOTIONS.to_string()
    } else {
        entry
            .emotions
            .iter()
            .map(|(label, score)| format!("{} ({:.1}%)", label, score * 100.0))
            .collect::<Vec<_>>()
            .join(", ")
    };

    let concerns = if entry.core_concerns.is_empty() {
        NO_CONCERNS.to_string()
    } else {
        entry.core_concerns.join(", ")
    };

    Some(format!(
        "Based on the following journal entry, its detected emotions, and core concerns,\n\
         generate a concise (1-2 sentences), empathetic, and insightful \"Today's Reflection\" or a short, encouraging thought.\n\
         Focus on summarizing the emotional state and offering a gentle, positive perspective.\n\
         \n\
         Journal Entry: \"{}\"\n\
         Detected Emotions: {}\n\
         Core Concerns: {}\n\
         \n\
         Today's Reflection:",
        entry.raw_text, emotions, concerns
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_contains_analysis() {
        let entry = JournalEntry::new("a", "2024-04-04", "I finally finished the project.")
            .with_emotions([("joy", 0.815), ("relief", 0.2)])
            .with_concerns(["deadlines", "sleep"]);
        let prompt = reflection_prompt(&entry).unwrap();

        assert!(prompt.contains("Journal Entry: \"I finally finished the project.\""));
        assert!(prompt.contains("Detected Emotions: joy (81.5%), relief (20.0%)"));
        assert!(prompt.contains("Core Concerns: deadlines, sleep"));
        assert!(prompt.ends_with("Today's Reflection:"));
    }

    #[test]
    fn test_prompt_placeholders() {
        let entry = JournalEntry::new("a", "2024-04-04", "Quiet day.");
        let prompt = reflection_prompt(&entry).unwrap();
        assert!(prompt.contains(NO_EMOTIONS));
        assert!(prompt.contains(NO_CONCERNS));
    }

    #[test]
    fn test_blank_text_has_no_prompt() {
        assert!(reflection_prompt(&JournalEntry::new("a", "2024-04-04", "   ")).is_none());
    }
}

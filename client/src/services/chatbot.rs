//! Canned-answer assistant
//!
//! Picks one of a fixed set of answers by keyword. Input that matches no
//! topic rotates through the answers.

pub const GREETING: &str = "Hello! I'm AgriSmart Assistant. How can I help you today?";

const ANSWERS: [&str; 4] = [
    "That's a great question! Based on your soil type and weather conditions, I recommend considering crops like wheat, rice, or corn.",
    "GPS detection helps us analyze your soil composition and local weather patterns to provide accurate crop recommendations.",
    "You can view your search history by clicking on your profile icon and selecting 'Previous Searches'.",
    "Our AI model has 99.51% accuracy in crop recommendations. It analyzes NPK values, temperature, humidity, pH, and rainfall data.",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatTopic {
    Crops,
    Location,
    History,
    Accuracy,
    Unknown,
}

impl ChatTopic {
    /// Classify a question by keyword
    pub fn parse(text: &str) -> Self {
        let text = text.trim().to_lowercase();
        let has = |words: &[&str]| words.iter().any(|w| text.contains(w));

        if has(&["accuracy", "accurate", "model", "npk"]) {
            ChatTopic::Accuracy
        } else if has(&["gps", "location", "detect"]) {
            ChatTopic::Location
        } else if has(&["history", "previous", "past search"]) {
            ChatTopic::History
        } else if has(&["soil", "weather", "crop", "grow", "plant"]) {
            ChatTopic::Crops
        } else {
            ChatTopic::Unknown
        }
    }

    fn answer_index(&self) -> Option<usize> {
        match self {
            ChatTopic::Crops => Some(0),
            ChatTopic::Location => Some(1),
            ChatTopic::History => Some(2),
            ChatTopic::Accuracy => Some(3),
            ChatTopic::Unknown => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct ChatbotService {
    turn: usize,
}

impl ChatbotService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn greeting(&self) -> &'static str {
        GREETING
    }

    /// Answer a message. Blank input gets no reply.
    pub fn reply(&mut self, text: &str) -> Option<&'static str> {
        if text.trim().is_empty() {
            return None;
        }
        let index = ChatTopic::parse(text)
            .answer_index()
            .unwrap_or(self.turn % ANSWERS.len());
        self.turn += 1;
        Some(ANSWERS[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_keywords() {
        assert_eq!(ChatTopic::parse("Which crop suits black soil?"), ChatTopic::Crops);
        assert_eq!(ChatTopic::parse("how does GPS work"), ChatTopic::Location);
        assert_eq!(ChatTopic::parse("where is my history"), ChatTopic::History);
        assert_eq!(ChatTopic::parse("How accurate is it?"), ChatTopic::Accuracy);
        assert_eq!(ChatTopic::parse("hi"), ChatTopic::Unknown);
    }

    #[test]
    fn test_blank_input_ignored() {
        let mut bot = ChatbotService::new();
        assert_eq!(bot.reply("   "), None);
    }

    #[test]
    fn test_unknown_input_rotates() {
        let mut bot = ChatbotService::new();
        let first = bot.reply("hello").unwrap();
        let second = bot.reply("thanks").unwrap();
        assert_ne!(first, second);
        assert!(bot.reply("what about NPK?").unwrap().contains("99.51%"));
    }
}

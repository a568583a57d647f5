// Image prompt domain model - preset prompts, length limits, composition
use std::fmt;

pub const MAX_SELECTED_TEXT_CHARS: usize = 600;
pub const MAX_CUSTOM_PROMPT_CHARS: usize = 280;

const PRESETS: [&str; 4] = [
    "Create a highly detailed and vibrant image that captures the essence of the following description, considering all elements and nuances mentioned.\n",
    "Generate a realistic and intricate visual representation based on this prompt, ensuring to include all key details and characteristics described.\n",
    "Visualize the scene described in the following text with great attention to detail, focusing on accurately depicting the environment, characters, and any specific features mentioned.\n",
    "Illustrate the following concept as described, with a high level of detail and precision, ensuring that all aspects of the text are faithfully represented.\n",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Preset(usize),
    Custom,
}

impl MenuChoice {
    /// Parses the menu entry "1".."5".
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::Preset(0)),
            "2" => Some(MenuChoice::Preset(1)),
            "3" => Some(MenuChoice::Preset(2)),
            "4" => Some(MenuChoice::Preset(3)),
            "5" => Some(MenuChoice::Custom),
            _ => None,
        }
    }
}

pub fn preset_prompt(index: usize) -> Option<&'static str> {
    PRESETS.get(index).copied()
}

pub fn menu_text() -> String {
    let mut text = String::from(
        "Given below are some prompts to visualize the selected text, \
         you can select any of them or write your own prompt:\n",
    );
    for (i, preset) in PRESETS.iter().enumerate() {
        text.push_str(&format!("  {}. {}", i + 1, preset));
    }
    text.push_str(&format!("  {}. Write your own custom prompt\n", PRESETS.len() + 1));
    text.push_str("Your choice: ");
    text
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptRejection {
    EmptyText,
    TextTooLong { chars: usize },
    PromptTooLong { chars: usize },
}

impl fmt::Display for PromptRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromptRejection::EmptyText => write!(f, "Selected text cannot be empty."),
            PromptRejection::TextTooLong { chars } => write!(
                f,
                "Selected text cannot exceed {} characters, it has {}.",
                MAX_SELECTED_TEXT_CHARS, chars
            ),
            PromptRejection::PromptTooLong { chars } => write!(
                f,
                "Your prompt exceeds the {} character limit, it has {} characters.",
                MAX_CUSTOM_PROMPT_CHARS, chars
            ),
        }
    }
}

/// Text the user wants illustrated, non-empty and bounded in length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedText(String);

impl SelectedText {
    pub fn parse(raw: &str) -> Result<Self, PromptRejection> {
        let text = raw.trim_end_matches(['\r', '\n']);
        let chars = text.chars().count();
        if text.trim().is_empty() {
            return Err(PromptRejection::EmptyText);
        }
        if chars > MAX_SELECTED_TEXT_CHARS {
            return Err(PromptRejection::TextTooLong { chars });
        }
        Ok(Self(text.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The styling instruction placed in front of the selected text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPrompt(String);

impl UserPrompt {
    pub fn preset(index: usize) -> Option<Self> {
        preset_prompt(index).map(|p| Self(p.to_string()))
    }

    /// Terminates the prompt with ".\n" and enforces the length limit on the result.
    pub fn custom(raw: &str) -> Result<Self, PromptRejection> {
        let prompt = format!("{}.\n", raw.trim_end_matches(['\r', '\n']));
        let chars = prompt.chars().count();
        if chars > MAX_CUSTOM_PROMPT_CHARS {
            return Err(PromptRejection::PromptTooLong { chars });
        }
        Ok(Self(prompt))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub fn compose_prompt(user_prompt: &UserPrompt, text: &SelectedText) -> String {
    format!("{} Description: {}", user_prompt.as_str(), text.as_str())
}

//! Prompt-injection pattern catalog
//!
//! The catalog is a flat, data-driven list of `(category, pattern)`
//! pairs so it can grow without touching the scanning control flow.
//! Matching is case-insensitive throughout.

use std::sync::OnceLock;

use regex::Regex;

/// A category of suspicious pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Attempts to claim system/assistant authority ("system prompt", "you are now a")
    SystemPromptOverride,
    /// Attempts to override prior instructions ("ignore previous", "disregard instructions")
    InstructionInjection,
    /// Attempts to reassign the reader's role ("act as", "pretend to be")
    RoleManipulation,
    /// Known jailbreak markers ("DAN", "do anything now", "jailbreak")
    JailbreakMarker,
    /// Tags mimicking a hidden system/instruction channel (`<system>`, `[INST]`)
    HiddenInstructionTag,
    /// Verbs requesting code execution ("run this script", "eval command")
    ExecutionVerb,
    /// Hints at an encoded payload ("base64:", "decode=")
    EncodedPayloadHint,
}

impl Category {
    /// A short machine-readable label for warnings
    pub fn label(&self) -> &'static str {
        match self {
            Category::SystemPromptOverride => "system_prompt_override",
            Category::InstructionInjection => "instruction_injection",
            Category::RoleManipulation => "role_manipulation",
            Category::JailbreakMarker => "jailbreak_marker",
            Category::HiddenInstructionTag => "hidden_instruction_tag",
            Category::ExecutionVerb => "execution_verb",
            Category::EncodedPayloadHint => "encoded_payload_hint",
        }
    }
}

/// One pattern match against the scanned text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// Which catalog category matched
    pub category: Category,
    /// The exact substring that matched
    pub matched_text: String,
}

const PATTERNS: &[(Category, &str)] = &[
    (
        Category::SystemPromptOverride,
        r"system prompt|system message|you are (?:now )?a\b",
    ),
    (
        Category::InstructionInjection,
        r"ignore (?:all )?(?:previous|above)|disregard (?:all )?instructions",
    ),
    (
        Category::RoleManipulation,
        r"act as|pretend (?:to be|you are)|you must now",
    ),
    (
        Category::JailbreakMarker,
        r"\bDAN\b|do anything now|jailbreak|bypass (?:safety|restrictions)",
    ),
    (
        Category::HiddenInstructionTag,
        r"<system>|<instruction>|\[INST\]|\[/INST\]",
    ),
    (
        Category::ExecutionVerb,
        r"(?:execute|run|eval) (?:this )?(?:code|command|script)",
    ),
    (Category::EncodedPayloadHint, r"(?:base64|decode|decrypt)[:=]"),
];

fn compiled() -> &'static Vec<(Category, Regex)> {
    static CATALOG: OnceLock<Vec<(Category, Regex)>> = OnceLock::new();
    CATALOG.get_or_init(|| {
        PATTERNS
            .iter()
            .map(|(category, pattern)| {
                let regex = regex::RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .build()
                    .expect("catalog pattern must compile");
                (*category, regex)
            })
            .collect()
    })
}

/// Scan text against the full catalog, returning one finding per match
///
/// A category with more than one hit in the same text produces more
/// than one finding; the wrapper turns each into its own warning.
pub fn scan(text: &str) -> Vec<Finding> {
    let mut findings = Vec::new();
    for (category, regex) in compiled() {
        for m in regex.find_iter(text) {
            findings.push(Finding {
                category: *category,
                matched_text: m.as_str().to_string(),
            });
        }
    }
    findings
}

//! Prompt assembly for the text and image stages.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use verne_core::{ParameterSelections, ParameterValue, truncate_chars};

/// Opening line of every text prompt.
const TEXT_PREAMBLE: &str = "Write an original speculative fiction story.";
/// Opening line of every image prompt.
const IMAGE_PREAMBLE: &str = "An illustration for a speculative fiction story";

/// Word targets for the recognized length selections.
const SHORT_WORDS: u32 = 600;
const MEDIUM_WORDS: u32 = 1200;
const LONG_WORDS: u32 = 2200;

fn default_word_count() -> u32 {
    MEDIUM_WORDS
}

fn default_max_image_prompt_chars() -> usize {
    4000
}

fn default_excerpt_chars() -> usize {
    500
}

fn default_style_suffix() -> String {
    "Digital illustration, rich detail, atmospheric lighting.".to_string()
}

/// Assembles provider prompts from parameter selections.
///
/// Assembly is deterministic: the same selections, year, cues, and
/// prose always produce the same prompt text.
#[derive(Debug, Clone, Serialize, Deserialize, Getters, derive_setters::Setters)]
#[setters(prefix = "with_")]
pub struct PromptBuilder {
    /// Target word count when no length parameter is selected
    #[serde(default = "default_word_count")]
    default_word_count: u32,
    /// Longest prompt the image provider accepts
    #[serde(default = "default_max_image_prompt_chars")]
    max_image_prompt_chars: usize,
    /// Prose excerpt budget for grounding image prompts
    #[serde(default = "default_excerpt_chars")]
    excerpt_chars: usize,
    /// Style directive appended to every image prompt
    #[serde(default = "default_style_suffix")]
    style_suffix: String,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self {
            default_word_count: default_word_count(),
            max_image_prompt_chars: default_max_image_prompt_chars(),
            excerpt_chars: default_excerpt_chars(),
            style_suffix: default_style_suffix(),
        }
    }
}

impl PromptBuilder {
    /// Build the prompt for the text stage.
    ///
    /// Selections render grouped under their category headings. The
    /// closing instruction mandates the `**Title: …**` marker that
    /// title extraction looks for.
    pub fn text_prompt(
        &self,
        parameters: &ParameterSelections,
        setting_year: Option<i32>,
    ) -> String {
        let mut prompt = String::from(TEXT_PREAMBLE);
        if let Some(year) = setting_year {
            prompt.push_str(&format!(" The story is set in the year {year}."));
        }

        let block = parameter_block(parameters);
        if !block.is_empty() {
            prompt.push_str("\n\nIncorporate the following elements:\n");
            prompt.push_str(&block);
        }

        prompt.push_str(&format!(
            "\nBegin with the story title on its own line, formatted exactly as \
             **Title: Your Title Here**. Aim for roughly {} words.",
            self.target_word_count(parameters)
        ));
        prompt
    }

    /// Build the prompt for the image stage.
    ///
    /// Prefers extracted cues grounded by a prose excerpt, falls back
    /// to the excerpt alone, then to the raw selections. The result is
    /// truncated to the provider's prompt budget.
    pub fn image_prompt(
        &self,
        parameters: &ParameterSelections,
        cues: &[String],
        prose: Option<&str>,
    ) -> String {
        let mut prompt = String::from(IMAGE_PREAMBLE);

        if !cues.is_empty() {
            prompt.push_str(", depicting the following scene: ");
            prompt.push_str(&cues.join(", "));
            prompt.push('.');
            if let Some(excerpt) = self.excerpt(prose) {
                prompt.push_str(" Context: ");
                prompt.push_str(&excerpt);
            }
        } else if let Some(excerpt) = self.excerpt(prose) {
            prompt.push_str(", based on this passage: ");
            prompt.push_str(&excerpt);
        } else {
            let block = parameter_block(parameters);
            if block.is_empty() {
                prompt.push('.');
            } else {
                prompt.push_str(" with the following elements:\n");
                prompt.push_str(&block);
            }
        }

        prompt.push(' ');
        prompt.push_str(&self.style_suffix);
        truncate_chars(&prompt, self.max_image_prompt_chars)
    }

    /// Resolve the target word count from any length-like selection.
    ///
    /// A positive number is taken literally; the words `short`,
    /// `medium`, and `long` map to fixed targets. Anything else falls
    /// back to the configured default.
    pub fn target_word_count(&self, parameters: &ParameterSelections) -> u32 {
        for params in parameters.values() {
            for (id, value) in params {
                let id = id.to_ascii_lowercase();
                if id != "length" && !id.ends_with("length") {
                    continue;
                }
                if let ParameterValue::Number(n) = value
                    && n.is_finite()
                    && *n > 0.0
                {
                    return *n as u32;
                }
                if let Some(text) = value.as_text() {
                    match text.to_ascii_lowercase().as_str() {
                        "short" => return SHORT_WORDS,
                        "medium" => return MEDIUM_WORDS,
                        "long" => return LONG_WORDS,
                        _ => {}
                    }
                }
            }
        }
        self.default_word_count
    }

    /// Leading prose excerpt within the configured budget.
    fn excerpt(&self, prose: Option<&str>) -> Option<String> {
        let prose = prose?.trim();
        if prose.is_empty() {
            return None;
        }
        Some(truncate_chars(prose, self.excerpt_chars))
    }
}

/// Render selections as `category:` headings with `- name: value` lines.
///
/// Identifier separators normalize to spaces. Null selections are
/// skipped, as are categories left with nothing to say.
fn parameter_block(parameters: &ParameterSelections) -> String {
    let mut block = String::new();
    for (category, params) in parameters {
        let lines: Vec<String> = params
            .iter()
            .filter(|(_, value)| !value.is_null())
            .map(|(name, value)| format!("- {}: {}", display_name(name), value))
            .collect();
        if lines.is_empty() {
            continue;
        }
        block.push_str(&format!("{}:\n", display_name(category)));
        for line in lines {
            block.push_str(&line);
            block.push('\n');
        }
    }
    block
}

/// Turn `kebab-case` and `snake_case` identifiers into display words.
fn display_name(id: &str) -> String {
    id.replace(['-', '_'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn selections(value: serde_json::Value) -> ParameterSelections {
        serde_json::from_value(value).expect("valid selections")
    }

    #[test]
    fn text_prompt_is_deterministic() {
        let builder = PromptBuilder::default();
        let params = selections(json!({
            "science-fiction": {"tech-level": "Advanced", "setting": "Deep space"}
        }));
        assert_eq!(
            builder.text_prompt(&params, Some(2150)),
            builder.text_prompt(&params, Some(2150))
        );
    }

    #[test]
    fn year_clause_appears_only_when_supplied() {
        let builder = PromptBuilder::default();
        let params = selections(json!({}));
        let with_year = builder.text_prompt(&params, Some(2150));
        let without = builder.text_prompt(&params, None);
        assert!(with_year.contains("set in the year 2150"));
        assert!(!without.contains("set in the year"));
    }

    #[test]
    fn identifiers_render_as_display_words() {
        let builder = PromptBuilder::default();
        let params = selections(json!({
            "science-fiction": {"tech-level": "Advanced", "has_aliens": true}
        }));
        let prompt = builder.text_prompt(&params, None);
        assert!(prompt.contains("science fiction:"));
        assert!(prompt.contains("- tech level: Advanced"));
        assert!(prompt.contains("- has aliens: Yes"));
    }

    #[test]
    fn null_selections_are_skipped() {
        let builder = PromptBuilder::default();
        let params = selections(json!({
            "science-fiction": {"tech-level": null}
        }));
        let prompt = builder.text_prompt(&params, None);
        assert!(!prompt.contains("tech level"));
        assert!(!prompt.contains("science fiction:"));
    }

    #[test]
    fn named_length_sets_the_word_target() {
        let builder = PromptBuilder::default();
        let params = selections(json!({"story": {"length": "Short"}}));
        assert_eq!(builder.target_word_count(&params), 600);
        assert!(builder.text_prompt(&params, None).contains("roughly 600 words"));
    }

    #[test]
    fn numeric_length_is_taken_literally() {
        let builder = PromptBuilder::default();
        let params = selections(json!({"story": {"story-length": 1500}}));
        assert_eq!(builder.target_word_count(&params), 1500);
    }

    #[test]
    fn unrecognized_length_falls_back_to_default() {
        let builder = PromptBuilder::default().with_default_word_count(900);
        let params = selections(json!({"story": {"length": "epic", "strength": "high"}}));
        assert_eq!(builder.target_word_count(&params), 900);
    }

    #[test]
    fn image_prompt_prefers_cues_with_context() {
        let builder = PromptBuilder::default();
        let params = selections(json!({}));
        let cues = vec!["Dr. Vasquez".to_string(), "airlock".to_string()];
        let prompt = builder.image_prompt(&params, &cues, Some("Dr. Vasquez stood at the airlock."));
        assert!(prompt.contains("depicting the following scene: Dr. Vasquez, airlock."));
        assert!(prompt.contains("Context: Dr. Vasquez stood"));
        assert!(prompt.ends_with("atmospheric lighting."));
    }

    #[test]
    fn image_prompt_falls_back_to_prose_then_parameters() {
        let builder = PromptBuilder::default();
        let params = selections(json!({"mood": {"tone": "Somber"}}));
        let from_prose = builder.image_prompt(&params, &[], Some("A quiet dome at dusk."));
        assert!(from_prose.contains("based on this passage: A quiet dome at dusk."));

        let from_params = builder.image_prompt(&params, &[], None);
        assert!(from_params.contains("with the following elements:"));
        assert!(from_params.contains("- tone: Somber"));
    }

    #[test]
    fn prose_excerpt_respects_its_budget() {
        let builder = PromptBuilder::default().with_excerpt_chars(10);
        let params = selections(json!({}));
        let prompt = builder.image_prompt(&params, &[], Some("abcdefghijKLMNOPQRST"));
        assert!(prompt.contains("abcdefghij"));
        assert!(!prompt.contains("KLMNOPQRST"));
    }

    #[test]
    fn image_prompt_respects_the_provider_budget() {
        let builder = PromptBuilder::default().with_max_image_prompt_chars(60);
        let params = selections(json!({}));
        let cues: Vec<String> = (0..10).map(|i| format!("elaborate cue number {i}")).collect();
        let prompt = builder.image_prompt(&params, &cues, None);
        assert!(prompt.chars().count() <= 60);
    }
}

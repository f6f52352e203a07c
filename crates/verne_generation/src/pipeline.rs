//! Two-stage generation pipeline: prose first, then an illustration
//! grounded in the prose.

use crate::extraction::strip_title_marker;
use crate::{
    PromptBuilder, extract_title, extract_year, extract_visual_cues, filter_selections, word_count,
};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument};
use verne_core::{
    ContentDraft, ContentKind, ContentMetadata, ContentRecord, FictionMetadata, ImageBlob,
    ImageMetadata, ImageRequestBuilder, ParameterSelections, TextRequestBuilder, truncate_chars,
};
use verne_error::{GenerationError, GenerationErrorKind, VerneResult};
use verne_interface::{ContentStore, ImageModel, ParameterSource, TextModel};

/// System instruction framing every text completion.
const SYSTEM_INSTRUCTION: &str = "You are an accomplished speculative fiction author. You write \
    vivid, grounded prose and follow formatting instructions exactly.";

/// Longest image prompt excerpt recorded in metadata.
const METADATA_PROMPT_CHARS: usize = 500;

fn default_temperature() -> f32 {
    0.9
}

fn default_max_tokens() -> u32 {
    4096
}

fn default_image_size() -> String {
    "1024x1024".to_string()
}

fn default_image_quality() -> String {
    "standard".to_string()
}

/// Provider knobs for a pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize, Getters, derive_setters::Setters)]
#[setters(prefix = "with_")]
pub struct GenerationSettings {
    /// Sampling temperature for the text stage
    #[serde(default = "default_temperature")]
    temperature: f32,
    /// Completion budget for the text stage
    #[serde(default = "default_max_tokens")]
    max_tokens: u32,
    /// Dimensions requested from the image stage
    #[serde(default = "default_image_size")]
    image_size: String,
    /// Quality tier requested from the image stage
    #[serde(default = "default_image_quality")]
    image_quality: String,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            image_size: default_image_size(),
            image_quality: default_image_quality(),
        }
    }
}

/// One content-generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Kind of content to produce.
    pub kind: ContentKind,
    /// Submitted parameter selections, vetted before prompting.
    pub parameters: ParameterSelections,
    /// Narrative setting year; mined from the prose when omitted.
    pub setting_year: Option<i32>,
}

impl GenerationRequest {
    /// Create a request with no selections.
    pub fn new(kind: ContentKind) -> Self {
        Self {
            kind,
            parameters: ParameterSelections::new(),
            setting_year: None,
        }
    }

    /// Attach parameter selections.
    pub fn with_parameters(mut self, parameters: ParameterSelections) -> Self {
        self.parameters = parameters;
        self
    }

    /// Pin the narrative setting year.
    pub fn with_year(mut self, year: i32) -> Self {
        self.setting_year = Some(year);
        self
    }
}

/// Parse a requested content kind, rejecting anything outside the
/// supported set.
pub fn parse_kind(value: &str) -> VerneResult<ContentKind> {
    ContentKind::from_str(value).map_err(|_| {
        GenerationError::new(GenerationErrorKind::UnsupportedMode(value.to_string())).into()
    })
}

/// Orchestrates parameter vetting, provider calls, and persistence.
///
/// A combined run is strictly sequential: the image stage starts only
/// after the text stage succeeds, so its prompt can be grounded in the
/// finished prose. Nothing persists unless every required stage
/// succeeds.
#[derive(Clone)]
pub struct StoryPipeline {
    text_model: Arc<dyn TextModel>,
    image_model: Arc<dyn ImageModel>,
    catalog: Arc<dyn ParameterSource>,
    store: Arc<dyn ContentStore>,
    prompts: PromptBuilder,
    settings: GenerationSettings,
}

impl StoryPipeline {
    /// Assemble a pipeline with default prompt and provider settings.
    pub fn new(
        text_model: Arc<dyn TextModel>,
        image_model: Arc<dyn ImageModel>,
        catalog: Arc<dyn ParameterSource>,
        store: Arc<dyn ContentStore>,
    ) -> Self {
        Self {
            text_model,
            image_model,
            catalog,
            store,
            prompts: PromptBuilder::default(),
            settings: GenerationSettings::default(),
        }
    }

    /// Replace the prompt configuration.
    pub fn with_prompts(mut self, prompts: PromptBuilder) -> Self {
        self.prompts = prompts;
        self
    }

    /// Replace the provider settings.
    pub fn with_settings(mut self, settings: GenerationSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Run the pipeline end to end and persist the result.
    #[instrument(skip(self, request), fields(kind = %request.kind))]
    pub async fn generate(&self, request: GenerationRequest) -> VerneResult<ContentRecord> {
        let started = Instant::now();

        let filtered = filter_selections(self.catalog.as_ref(), &request.parameters).await?;
        if filtered.dropped_count() > 0 {
            info!(
                dropped = filtered.dropped_count(),
                "Rejected invalid parameter selections"
            );
        }
        let parameters = filtered.accepted;

        let mut setting_year = request.setting_year;
        let mut title = None;
        let mut body = None;
        let mut fiction_meta = None;

        if request.kind.has_body() {
            let prompt = self.prompts.text_prompt(&parameters, setting_year);
            let text_request = TextRequestBuilder::default()
                .model(self.text_model.model_name())
                .system(SYSTEM_INSTRUCTION)
                .prompt(prompt)
                .temperature(*self.settings.temperature())
                .max_tokens(*self.settings.max_tokens())
                .build()
                .map_err(|e| {
                    GenerationError::new(GenerationErrorKind::Builder(format!(
                        "text request: {}",
                        e
                    )))
                })?;
            debug!(prompt_chars = text_request.prompt.len(), "Dispatching text stage");

            let response = self.text_model.generate_text(&text_request).await?;
            let text = response.text.trim();
            if text.is_empty() {
                return Err(GenerationError::new(GenerationErrorKind::EmptyCompletion).into());
            }

            title = Some(extract_title(text, request.kind));
            if setting_year.is_none() {
                setting_year = extract_year(text);
            }
            fiction_meta = Some(FictionMetadata {
                model: response
                    .model
                    .clone()
                    .unwrap_or_else(|| self.text_model.model_name().to_string()),
                total_tokens: response.total_tokens,
                word_count: word_count(text),
            });
            body = Some(text.to_string());
        }

        let mut image = None;
        let mut image_meta = None;

        if request.kind.has_image() {
            // Ground the prompt in the scene, not the headline.
            let scene = body.as_deref().map(strip_title_marker);
            let scene = scene.as_deref();
            let cues = scene.map(extract_visual_cues).unwrap_or_default();
            let prompt = self.prompts.image_prompt(&parameters, &cues, scene);
            let image_request = ImageRequestBuilder::default()
                .model(self.image_model.model_name())
                .prompt(prompt.clone())
                .size(self.settings.image_size().clone())
                .quality(self.settings.image_quality().clone())
                .build()
                .map_err(|e| {
                    GenerationError::new(GenerationErrorKind::Builder(format!(
                        "image request: {}",
                        e
                    )))
                })?;
            debug!(
                cues = cues.len(),
                prompt_chars = prompt.len(),
                "Dispatching image stage"
            );

            let rendered = self.image_model.render_image(&image_request).await?;
            image_meta = Some(ImageMetadata {
                model: rendered
                    .model
                    .clone()
                    .unwrap_or_else(|| self.image_model.model_name().to_string()),
                prompt: truncate_chars(&prompt, METADATA_PROMPT_CHARS),
            });
            image = Some(ImageBlob::new(rendered.bytes, rendered.format));
        }

        let metadata = match (fiction_meta, image_meta) {
            (Some(fiction), Some(image)) => ContentMetadata::Combined { fiction, image },
            (Some(fiction), None) => ContentMetadata::Fiction(fiction),
            (None, Some(image)) => ContentMetadata::Image(image),
            (None, None) => ContentMetadata::default(),
        };

        let mut draft = ContentDraft::new(request.kind);
        draft.title = title;
        draft.body = body;
        draft.image = image;
        draft.parameters = parameters;
        draft.metadata = metadata;
        draft.setting_year = setting_year;

        let record = self.store.save(draft).await?;
        info!(
            id = %record.id,
            kind = %record.kind,
            duration_ms = started.elapsed().as_millis() as u64,
            "Generated content"
        );
        Ok(record)
    }
}

impl std::fmt::Debug for StoryPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoryPipeline")
            .field("text_model", &self.text_model.model_name())
            .field("image_model", &self.image_model.model_name())
            .field("prompts", &self.prompts)
            .field("settings", &self.settings)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_kind_accepts_the_supported_set() {
        assert_eq!(parse_kind("fiction").unwrap(), ContentKind::Fiction);
        assert_eq!(parse_kind("image").unwrap(), ContentKind::Image);
        assert_eq!(parse_kind("combined").unwrap(), ContentKind::Combined);
    }

    #[test]
    fn parse_kind_rejects_everything_else() {
        let err = parse_kind("music").unwrap_err();
        assert!(err.to_string().contains("music"));
        assert!(parse_kind("").is_err());
    }

    #[test]
    fn settings_deserialize_with_defaults() {
        let settings: GenerationSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(*settings.temperature(), 0.9);
        assert_eq!(*settings.max_tokens(), 4096);
        assert_eq!(settings.image_size(), "1024x1024");
    }
}

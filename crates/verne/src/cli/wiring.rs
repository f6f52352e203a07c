//! Shared construction of stores and pipelines from configuration.

use std::sync::Arc;
use verne::{
    ContentStore, GenerationSettings, OpenAiImageClient, OpenAiTextClient, PgContentStore,
    PromptBuilder, StoryPipeline, VerneConfig, VerneResult, build_pool, build_pool_with_url,
    load_catalog,
};

/// Build a content store backed by the configured database.
///
/// Falls back to the `DATABASE_URL` environment variable when the
/// configuration does not name a URL.
pub fn build_store(config: &VerneConfig) -> VerneResult<Arc<dyn ContentStore>> {
    let pool = match &config.database.url {
        Some(url) => build_pool_with_url(url)?,
        None => build_pool()?,
    };
    let store =
        PgContentStore::new(pool).with_max_body_chars(config.generation.max_body_chars);
    Ok(Arc::new(store))
}

/// Build a generation pipeline and its backing store from configuration.
pub fn build_pipeline(
    config: &VerneConfig,
) -> VerneResult<(StoryPipeline, Arc<dyn ContentStore>)> {
    let store = build_store(config)?;
    let catalog = Arc::new(load_catalog(&config.catalog)?);

    let mut text = OpenAiTextClient::new(config.text.model.clone())?;
    if let Some(base_url) = &config.text.base_url {
        text = text.with_base_url(base_url.clone());
    }

    let mut image = OpenAiImageClient::new(config.image.model.clone())?;
    if let Some(base_url) = &config.image.base_url {
        image = image.with_base_url(base_url.clone());
    }

    let settings = GenerationSettings::default()
        .with_temperature(config.text.temperature)
        .with_max_tokens(config.text.max_tokens)
        .with_image_size(config.image.size.clone())
        .with_image_quality(config.image.quality.clone());

    let prompts =
        PromptBuilder::default().with_default_word_count(config.generation.default_word_count);

    let pipeline = StoryPipeline::new(Arc::new(text), Arc::new(image), catalog, store.clone())
        .with_prompts(prompts)
        .with_settings(settings);

    Ok((pipeline, store))
}

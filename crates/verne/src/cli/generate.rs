//! Generate command handler.

use verne::{
    ConfigError, GenerationRequest, ParameterSelections, ParameterValue, VerneConfig, VerneResult,
    parse_kind,
};

use super::{GenerateArgs, build_pipeline};

/// Generate a piece of content from the command line and store it.
pub async fn handle_generate(config: &VerneConfig, args: GenerateArgs) -> VerneResult<()> {
    let kind = parse_kind(&args.kind)?;
    let parameters = parse_params(&args.params)?;

    let (pipeline, _store) = build_pipeline(config)?;

    let mut request = GenerationRequest::new(kind).with_parameters(parameters);
    if let Some(year) = args.year {
        request = request.with_year(year);
    }

    let record = pipeline.generate(request).await?;

    println!("Stored {}", record.id);
    println!("Title: {}", record.title);
    if let Some(year) = record.setting_year {
        println!("Year: {year}");
    }
    if let Some(body) = &record.body {
        println!();
        println!("{body}");
    }

    if let (Some(path), Some(image)) = (&args.output, &record.image) {
        std::fs::write(path, &image.bytes)
            .map_err(|e| ConfigError::new(format!("Failed to write {}: {e}", path.display())))?;
        println!("Wrote image to {}", path.display());
    }

    Ok(())
}

/// Parse repeated `--param CATEGORY.PARAMETER=VALUE` flags into selections.
///
/// Values parse as JSON first, so numbers, booleans, and lists come
/// through typed. Anything that is not valid JSON is kept as text.
fn parse_params(pairs: &[String]) -> VerneResult<ParameterSelections> {
    let mut selections = ParameterSelections::new();

    for pair in pairs {
        let (path, raw) = pair.split_once('=').ok_or_else(|| {
            ConfigError::new(format!(
                "Invalid --param '{pair}': expected CATEGORY.PARAMETER=VALUE"
            ))
        })?;
        let (category, parameter) = path.split_once('.').ok_or_else(|| {
            ConfigError::new(format!(
                "Invalid --param '{pair}': expected CATEGORY.PARAMETER=VALUE"
            ))
        })?;

        let value = match serde_json::from_str::<ParameterValue>(raw) {
            Ok(value) => value,
            Err(_) => ParameterValue::Text(raw.to_string()),
        };

        selections
            .entry(category.to_string())
            .or_default()
            .insert(parameter.to_string(), value);
    }

    Ok(selections)
}

#[cfg(test)]
mod tests {
    use super::parse_params;
    use verne::ParameterValue;

    #[test]
    fn params_parse_typed_values() {
        let pairs = vec![
            "genre.mood=dark".to_string(),
            "tech.level=3".to_string(),
            "flags.open_ending=true".to_string(),
            "world.biomes=[\"desert\",\"tundra\"]".to_string(),
        ];

        let selections = parse_params(&pairs).unwrap();

        assert_eq!(
            selections["genre"]["mood"],
            ParameterValue::Text("dark".to_string())
        );
        assert_eq!(selections["tech"]["level"], ParameterValue::Number(3.0));
        assert_eq!(selections["flags"]["open_ending"], ParameterValue::Bool(true));
        assert_eq!(
            selections["world"]["biomes"],
            ParameterValue::List(vec!["desert".to_string(), "tundra".to_string()])
        );
    }

    #[test]
    fn repeated_categories_merge() {
        let pairs = vec![
            "genre.mood=dark".to_string(),
            "genre.era=victorian".to_string(),
        ];

        let selections = parse_params(&pairs).unwrap();

        assert_eq!(selections.len(), 1);
        assert_eq!(selections["genre"].len(), 2);
    }

    #[test]
    fn malformed_pairs_are_rejected() {
        assert!(parse_params(&["no-equals".to_string()]).is_err());
        assert!(parse_params(&["nodot=value".to_string()]).is_err());
    }

    #[test]
    fn quoted_json_strings_stay_text() {
        let selections = parse_params(&["genre.mood=\"grim\"".to_string()]).unwrap();

        assert_eq!(
            selections["genre"]["mood"],
            ParameterValue::Text("grim".to_string())
        );
    }
}

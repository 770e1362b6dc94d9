use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use comp_forge::{Featurizer, FeaturizerConfig, MissingPolicy, Property, PropertyCatalog};

use crate::cli::DescriptorOptions;

pub fn load_catalog(path: Option<&Path>) -> Result<Arc<PropertyCatalog>> {
    let Some(path) = path else {
        return Ok(PropertyCatalog::embedded());
    };

    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog file: {}", path.display()))?;
    let catalog = PropertyCatalog::from_toml_str(&text)
        .with_context(|| format!("Invalid property catalog: {}", path.display()))?;

    Ok(Arc::new(catalog))
}

pub fn build_featurizer_config(opts: &DescriptorOptions) -> Result<FeaturizerConfig> {
    let mut config = FeaturizerConfig::for_variant(opts.variant.into());

    if let Some(keys) = &opts.properties {
        let properties = keys
            .iter()
            .map(|k| k.trim().parse::<Property>())
            .collect::<Result<Vec<_>, _>>()
            .context("Invalid --properties list")?;
        if properties.is_empty() {
            bail!("--properties must name at least one property");
        }
        config.properties = properties;
    }

    if let Some(depth) = opts.ionization_depth {
        config.ionization_depth = depth;
    }

    if opts.strict_ionization {
        config.missing_ionization = MissingPolicy::Fail;
    }

    Ok(config)
}

pub fn build_featurizer(opts: &DescriptorOptions) -> Result<Featurizer> {
    let catalog = load_catalog(opts.catalog.as_deref())?;
    let config = build_featurizer_config(opts)?;
    Ok(Featurizer::new(catalog, config))
}

//! Trace-level dump of an initialized engine

use mapwright_core::Engine;
use tracing::Level;

/// One line per setting, then Provider, PropertyCondition, type maps and converters.
pub fn describe(engine: &Engine) -> Vec<String> {
    let s = engine.settings();
    let mut lines = vec![
        format!(" SourceNameTokenizer : {}", s.source_name_tokenizer()),
        format!(" SourceNameTransformer : {}", s.source_name_transformer()),
        format!(" SourceNamingConvention : {}", s.source_naming_convention()),
        format!(
            " DestinationNameTokenizer : {}",
            s.destination_name_tokenizer()
        ),
        format!(
            " DestinationNameTransformer : {}",
            s.destination_name_transformer()
        ),
        format!(
            " DestinationNamingConvention : {}",
            s.destination_naming_convention()
        ),
        format!(" MatchingStrategy : {}", s.matching_strategy()),
        format!(" FieldAccessLevel : {}", s.field_access_level()),
        format!(" MethodAccessLevel : {}", s.method_access_level()),
        format!(" FieldMatchingEnabled : {}", s.is_field_matching_enabled()),
        format!(" AmbiguityIgnored : {}", s.is_ambiguity_ignored()),
        format!(
            " FullTypeMatchingRequired : {}",
            s.is_full_type_matching_required()
        ),
        format!(
            " ImplicitMappingEnabled : {}",
            s.is_implicit_mapping_enabled()
        ),
        format!(" SkipNullEnabled : {}", s.is_skip_null_enabled()),
        format!(
            " CollectionsMergeEnabled : {}",
            s.is_collections_merge_enabled()
        ),
        format!(
            " UseOSGiClassLoaderBridging : {}",
            s.is_use_osgi_class_loader_bridging()
        ),
        format!(" DeepCopyEnabled : {}", s.is_deep_copy_enabled()),
        format!(" Provider : {}", s.provider().map_or("none", |p| p.name())),
        format!(
            " PropertyCondition : {}",
            s.property_condition().map_or("none", |c| c.name())
        ),
        " TypeMaps :".to_string(),
    ];
    lines.extend(engine.type_maps().iter().map(|t| format!("  {t}")));
    lines.push(" Converters :".to_string());
    lines.extend(s.converters().iter().map(|c| format!("  {}", c.name())));
    lines
}

/// Emit [`describe`] at TRACE. Does nothing when TRACE is disabled.
pub fn log_configuration(engine: &Engine) {
    if !tracing::enabled!(Level::TRACE) {
        return;
    }
    tracing::trace!("Mapping engine configuration:");
    for line in describe(engine) {
        tracing::trace!("{}", line);
    }
    tracing::trace!("End of mapping engine configuration");
}

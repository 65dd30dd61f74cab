//! The ad-name keyed association consumed by [`crate::summarize`].

use std::collections::HashMap;

use adlens_core::{CreativeAttributes, MappingFile};

/// Creative attributes and display names keyed by performance `ad_name`.
///
/// An empty join means "no mapping supplied": every summary row keeps its
/// ad name as display name and has no attributes.
#[derive(Debug, Clone, Default)]
pub struct AttributeJoin {
    attributes: HashMap<String, CreativeAttributes>,
    display_names: HashMap<String, String>,
}

impl AttributeJoin {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Associate `ad_name` with a creative. A later insert for the same ad
    /// name replaces the earlier one.
    pub fn insert(&mut self, ad_name: impl Into<String>, attributes: CreativeAttributes) {
        self.attributes.insert(ad_name.into(), attributes);
    }

    pub fn set_display_name(&mut self, ad_name: impl Into<String>, display_name: impl Into<String>) {
        self.display_names.insert(ad_name.into(), display_name.into());
    }

    #[must_use]
    pub fn attributes_for(&self, ad_name: &str) -> Option<&CreativeAttributes> {
        self.attributes.get(ad_name)
    }

    /// The mapped display name, else `ad_name` itself.
    #[must_use]
    pub fn display_name_for<'a>(&'a self, ad_name: &'a str) -> &'a str {
        self.display_names
            .get(ad_name)
            .map_or(ad_name, String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty() && self.display_names.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }
}

/// Resolve a mapping file against parsed creatives.
///
/// Each entry's `video_id` is looked up among `creatives`; when several
/// creatives share an id, the first one wins. Entries naming an unknown id
/// keep their display name but join no attributes.
#[must_use]
pub fn resolve_mapping(mapping: &MappingFile, creatives: &[CreativeAttributes]) -> AttributeJoin {
    let mut by_id: HashMap<&str, &CreativeAttributes> = HashMap::new();
    for creative in creatives {
        if by_id.contains_key(creative.video_id.as_str()) {
            tracing::debug!(
                video_id = %creative.video_id,
                source_file = %creative.source_file,
                "duplicate video_id; keeping first analysis"
            );
            continue;
        }
        by_id.insert(creative.video_id.as_str(), creative);
    }

    let mut join = AttributeJoin::new();
    for entry in &mapping.creatives {
        join.set_display_name(entry.ad_name.clone(), entry.display_name());
        match by_id.get(entry.video_id.as_str()) {
            Some(creative) => join.insert(entry.ad_name.clone(), (*creative).clone()),
            None => tracing::warn!(
                ad_name = %entry.ad_name,
                video_id = %entry.video_id,
                "mapping references a video_id with no parsed analysis"
            ),
        }
    }

    tracing::debug!(
        entries = mapping.creatives.len(),
        joined = join.len(),
        "resolved creative mapping"
    );
    join
}

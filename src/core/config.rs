//! Render configuration
//!
//! Output tuning for the JSON renderer and the generated scripts, selected
//! through presets or a custom option set.

use crate::core::constants::{HELPER_NAMESPACE, LEAFLET_NAMESPACE};

#[derive(Debug, Clone, PartialEq)]
pub enum RenderProfile {
    /// Single-line JSON, suitable for inline `<script>` blocks.
    Compact,
    /// Indented JSON, easier to read in page source while debugging.
    Pretty,
    Custom(RenderOptions),
}

impl RenderProfile {
    pub fn resolve(&self) -> RenderOptions {
        match self {
            Self::Compact => RenderOptions {
                pretty: false,
                namespace: LEAFLET_NAMESPACE.to_string(),
                helper_namespace: HELPER_NAMESPACE.to_string(),
            },
            Self::Pretty => RenderOptions {
                pretty: true,
                namespace: LEAFLET_NAMESPACE.to_string(),
                helper_namespace: HELPER_NAMESPACE.to_string(),
            },
            Self::Custom(options) => options.clone(),
        }
    }
}

impl Default for RenderProfile {
    fn default() -> Self {
        Self::Compact
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub pretty: bool,
    /// Global the Leaflet library is reachable under (`L.map`, `L.tileLayer`, ...).
    pub namespace: String,
    /// Global hosting the client-side payload extractors.
    pub helper_namespace: String,
}

impl RenderOptions {
    /// Qualifies a Leaflet factory name, e.g. `tileLayer` -> `L.tileLayer`.
    pub fn factory(&self, name: &str) -> String {
        format!("{}.{}", self.namespace, name)
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderProfile::default().resolve()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_profile_presets() {
        let compact = RenderProfile::Compact.resolve();
        let pretty = RenderProfile::Pretty.resolve();

        assert!(!compact.pretty);
        assert!(pretty.pretty);
        assert_eq!(compact.namespace, "L");
        assert_eq!(compact.helper_namespace, pretty.helper_namespace);
    }

    #[test]
    fn test_custom_profile_passes_through() {
        let options = RenderOptions {
            pretty: false,
            namespace: "Leaflet".to_string(),
            helper_namespace: "Helpers".to_string(),
        };
        let resolved = RenderProfile::Custom(options.clone()).resolve();
        assert_eq!(resolved, options);
        assert_eq!(resolved.factory("marker"), "Leaflet.marker");
    }

    #[test]
    fn test_default_is_compact() {
        assert_eq!(RenderOptions::default(), RenderProfile::Compact.resolve());
    }
}

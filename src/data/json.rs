//! JSON encode/decode entry points
//!
//! Every value leaving or entering the crate passes through a
//! [`JsonRenderer`], which applies the render options and wraps serde
//! failures into [`MapError`] with the offending type name.

use crate::{
    core::config::{RenderOptions, RenderProfile},
    MapError, Result,
};
use once_cell::sync::Lazy;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::fmt::Display;

static RENDERER: Lazy<JsonRenderer> = Lazy::new(JsonRenderer::default);

/// Process-wide renderer with the default profile
pub fn renderer() -> &'static JsonRenderer {
    &RENDERER
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct JsonRenderer {
    options: RenderOptions,
}

impl JsonRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn with_profile(profile: &RenderProfile) -> Self {
        Self::new(profile.resolve())
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Renders `value` as JSON text
    ///
    /// Never emits `null`; non-finite floats, which serde_json would write as
    /// `null`, fail with [`MapError::Serialization`].
    pub fn to_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        let wrap = |source| MapError::Serialization {
            type_name: std::any::type_name::<T>(),
            source,
        };
        let tree = serde_json::to_value(value).map_err(wrap)?;
        if let Some(path) = find_null(&tree, "$") {
            return Err(wrap(serde::ser::Error::custom(format!(
                "null or non-finite value at {}",
                path
            ))));
        }
        let rendered = if self.options.pretty {
            serde_json::to_string_pretty(&tree)
        } else {
            serde_json::to_string(&tree)
        };
        rendered.map_err(wrap)
    }

    /// Parses `payload` into `T`, keeping the payload text on failure
    pub fn from_json<T: DeserializeOwned>(&self, payload: &str) -> Result<T> {
        serde_json::from_str(payload).map_err(|source| MapError::Deserialization {
            type_name: std::any::type_name::<T>(),
            payload: payload.to_string(),
            source,
        })
    }

    /// Builds a decode failure for a payload that parsed but does not fit `T`
    pub(crate) fn decode_error<T>(payload: &str, message: impl Display) -> MapError {
        MapError::Deserialization {
            type_name: std::any::type_name::<T>(),
            payload: payload.to_string(),
            source: serde::de::Error::custom(message),
        }
    }
}

fn find_null(value: &Value, path: &str) -> Option<String> {
    match value {
        Value::Null => Some(path.to_string()),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .find_map(|(index, item)| find_null(item, &format!("{}[{}]", path, index))),
        Value::Object(fields) => fields
            .iter()
            .find_map(|(key, field)| find_null(field, &format!("{}.{}", path, key))),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::{LatLng, Point};
    use std::collections::BTreeMap;

    #[test]
    fn test_compact_and_pretty_output() {
        let mut value = BTreeMap::new();
        value.insert("zoom", 13);

        let compact = JsonRenderer::default().to_json(&value).unwrap();
        assert_eq!(compact, r#"{"zoom":13}"#);

        let pretty = JsonRenderer::with_profile(&RenderProfile::Pretty)
            .to_json(&value)
            .unwrap();
        assert_eq!(pretty, "{\n  \"zoom\": 13\n}");
    }

    #[test]
    fn test_non_string_map_keys_fail_with_type_name() {
        let mut value = BTreeMap::new();
        value.insert((1, 2), "tile");

        let err = renderer().to_json(&value).unwrap_err();
        match err {
            MapError::Serialization { type_name, .. } => assert!(type_name.contains("BTreeMap")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_decode_failure_keeps_payload() {
        let err = renderer().from_json::<LatLng>("[95.0, 0.0]").unwrap_err();
        match &err {
            MapError::Deserialization { type_name, payload, .. } => {
                assert!(type_name.ends_with("LatLng"));
                assert_eq!(payload, "[95.0, 0.0]");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("[95.0, 0.0]"));
    }

    #[test]
    fn test_non_finite_floats_are_not_rendered_as_null() {
        let err = renderer().to_json(&Point::new(f64::NAN, 1.0)).unwrap_err();
        match err {
            MapError::Serialization { type_name, source } => {
                assert!(type_name.ends_with("Point"));
                assert!(source.to_string().contains("$.x"));
            }
            other => panic!("unexpected error: {other}"),
        }

        let mut value = BTreeMap::new();
        value.insert("zIndex", vec![1.0, f64::INFINITY]);
        assert!(matches!(
            renderer().to_json(&value),
            Err(MapError::Serialization { .. })
        ));
    }

    #[test]
    fn test_field_order_is_kept() {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Options {
            min_zoom: i32,
            max_zoom: i32,
            attribution: &'static str,
        }
        let options = Options {
            min_zoom: 0,
            max_zoom: 18,
            attribution: "Map data",
        };
        assert_eq!(
            renderer().to_json(&options).unwrap(),
            r#"{"minZoom":0,"maxZoom":18,"attribution":"Map data"}"#
        );
    }

    #[test]
    fn test_singleton_uses_default_profile() {
        assert_eq!(renderer().options(), &RenderOptions::default());
        assert!(std::ptr::eq(renderer(), renderer()));
    }
}

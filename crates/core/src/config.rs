use crate::error::Result;
use lightscope_api::{ApplicableTarget, FqName, Nullability};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// Names and defaults used while projecting annotations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct LightConfig {
    pub not_null_annotation: FqName,
    pub nullable_annotation: FqName,
    /// Marker re-attached to property projections regardless of its target.
    pub jvm_default_annotation: FqName,
    /// Applicable targets assumed for annotation classes without metadata.
    pub default_applicable_targets: BTreeSet<ApplicableTarget>,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            not_null_annotation: FqName::new("org.jetbrains.annotations.NotNull"),
            nullable_annotation: FqName::new("org.jetbrains.annotations.Nullable"),
            jvm_default_annotation: FqName::new("kotlin.jvm.JvmDefault"),
            default_applicable_targets: ApplicableTarget::language_default(),
        }
    }
}

impl LightConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn nullability_annotation(&self, nullability: Nullability) -> Option<&FqName> {
        match nullability {
            Nullability::NotNull => Some(&self.not_null_annotation),
            Nullability::Nullable => Some(&self.nullable_annotation),
            Nullability::Unknown => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"nullable_annotation": "androidx.annotation.Nullable"}}"#
        )
        .unwrap();

        let config = LightConfig::load(file.path()).unwrap();
        assert_eq!(config.nullable_annotation, "androidx.annotation.Nullable");
        assert_eq!(
            config.not_null_annotation,
            "org.jetbrains.annotations.NotNull"
        );
        assert!(
            config
                .default_applicable_targets
                .contains(&ApplicableTarget::Property)
        );
    }

    #[test]
    fn test_missing_config_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = LightConfig::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, crate::LightscopeError::Io(_)));
    }
}

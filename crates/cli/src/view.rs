use lightscope_api::{AnnotationAttribute, Declaration, LightDeclarationProjection, OriginKind};
use lightscope_core::{CompiledDelegate, LightAnnotation};
use tabled::Tabled;

/// One row per annotation a light element exposes.
#[derive(Tabled)]
pub struct AnnotationRow {
    pub name: String,
    pub origin: String,
    pub target: String,
    pub ordinal: String,
    pub entry: String,
    pub compiled: String,
}

impl AnnotationRow {
    pub fn from_annotation(annotation: &LightAnnotation) -> Self {
        let name = annotation
            .qualified_name()
            .map(|fq| shorten_fqn(fq.as_str()))
            .unwrap_or_else(|| "-".to_string());
        let entry = annotation
            .source_entry()
            .map(|e| location(&e.path, e.range.start_line))
            .unwrap_or_else(|| "-".to_string());

        match annotation {
            LightAnnotation::SourceEntry(ann) => Self {
                name,
                origin: "source".to_string(),
                target: ann
                    .use_site_target
                    .map(|t| format!("@{}", t.render_name()))
                    .unwrap_or_else(|| "-".to_string()),
                ordinal: ann.ordinal.to_string(),
                entry,
                compiled: match &ann.delegate {
                    CompiledDelegate::Compiled(c) => attributes(&c.attributes),
                    CompiledDelegate::NonExistent => "<missing>".to_string(),
                },
            },
            LightAnnotation::NonSource(ann) => Self {
                name,
                origin: "compiled".to_string(),
                target: "-".to_string(),
                ordinal: "-".to_string(),
                entry,
                compiled: attributes(&ann.attributes),
            },
            LightAnnotation::Nullability(ann) => Self {
                name,
                origin: "nullability".to_string(),
                target: "-".to_string(),
                ordinal: "-".to_string(),
                entry,
                compiled: format!("{:?}", ann.nullability).to_lowercase(),
            },
        }
    }
}

/// Short view of a declaration in a snapshot.
#[derive(Tabled)]
pub struct DeclarationRow {
    pub id: String,
    pub kind: String,
    pub name: String,
    pub origin: String,
    pub location: String,
}

impl DeclarationRow {
    pub fn from_declaration(declaration: &Declaration, origin: OriginKind) -> Self {
        let kind = serde_json::to_value(declaration.kind)
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_else(|| format!("{:?}", declaration.kind));
        let origin = match origin {
            OriginKind::SourceBacked => "source",
            OriginKind::Synthesized => "synthesized",
            OriginKind::Unknown => "-",
        };

        Self {
            id: declaration.id.0.to_string(),
            kind,
            name: declaration.name.clone(),
            origin: origin.to_string(),
            location: declaration
                .origin
                .as_ref()
                .map(|o| location(&o.path, o.range.start_line))
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

#[derive(Tabled)]
pub struct ProjectionRow {
    pub owner: String,
    pub projection: String,
}

impl From<LightDeclarationProjection> for ProjectionRow {
    fn from(projection: LightDeclarationProjection) -> Self {
        Self {
            owner: projection.owner.0.to_string(),
            projection: projection.kind.to_string(),
        }
    }
}

fn location(path: &str, line: usize) -> String {
    let filename = std::path::Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("-");
    format!("{}:{}", filename, line + 1)
}

fn attributes(attrs: &[AnnotationAttribute]) -> String {
    let rendered: Vec<String> = attrs
        .iter()
        .map(|attr| {
            let value = serde_json::to_string(&attr.value).unwrap_or_else(|_| "?".to_string());
            format!("{}={}", attr.name, value)
        })
        .collect();
    if rendered.is_empty() {
        "yes".to_string()
    } else {
        rendered.join(", ")
    }
}

pub fn shorten_fqn(fqn: &str) -> String {
    let parts: Vec<&str> = fqn.split('.').collect();
    if parts.len() <= 2 {
        return fqn.to_string();
    }
    let (packages, rest) = parts.split_at(parts.len() - 1);
    let abbreviated: Vec<String> = packages
        .iter()
        .map(|p| p.chars().next().map(String::from).unwrap_or_default())
        .collect();
    format!("{}.{}", abbreviated.join("."), rest.join("."))
}

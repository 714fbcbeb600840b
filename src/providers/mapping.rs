//! Response-to-record mapping driven by a [`FieldMap`].

use serde_json::Value;

use super::spec::{Field, LicenseRule, ProviderSpec, SourceRule};
use crate::{ImageRecord, Result, SearchError};

/// Creative-Commons tokens and their labels, most specific first so that
/// `by-nc-sa` is never reported as plain `by`.
const CC_LICENSES: &[(&str, &str)] = &[
    ("by-nc-sa", "CC BY-NC-SA"),
    ("by-nc-nd", "CC BY-NC-ND"),
    ("by-nc", "CC BY-NC"),
    ("by-sa", "CC BY-SA"),
    ("by-nd", "CC BY-ND"),
    ("cc0", "CC0 (Public Domain)"),
    ("pdm", "Public Domain"),
    ("by", "CC BY"),
];

const CC_DEFAULT: &str = "Creative Commons";

/// Normalizes a free-form Creative-Commons tag to a display label.
pub fn normalize_cc_license(tag: &str) -> &'static str {
    let tag = tag.to_lowercase();
    CC_LICENSES
        .iter()
        .find(|(token, _)| tag.contains(token))
        .map(|(_, label)| *label)
        .unwrap_or(CC_DEFAULT)
}

/// Maps a provider response body to image records.
///
/// A body without the result array yields no records. A body that is not
/// a JSON object, or whose result entry is not an array, is a parse error.
pub fn map_results(body: &Value, spec: &ProviderSpec) -> Result<Vec<ImageRecord>> {
    if !body.is_object() {
        return Err(SearchError::Parse(format!(
            "{}: expected a JSON object",
            spec.id
        )));
    }

    let items = match body.pointer(spec.results) {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(SearchError::Parse(format!(
                "{}: '{}' is not an array",
                spec.id, spec.results
            )))
        }
    };

    Ok(items
        .iter()
        .filter(|item| item.is_object())
        .map(|item| map_item(item, spec))
        .collect())
}

/// Maps one response item. Missing fields fall back to defaults.
pub fn map_item(item: &Value, spec: &ProviderSpec) -> ImageRecord {
    let fields = &spec.fields;
    let get = |field: &Field| resolve(field, item, spec);

    let title = get(&fields.title).unwrap_or_else(|| placeholder_title(spec));
    let image_id = get(&fields.image_id).unwrap_or_default();

    ImageRecord {
        title,
        description: get(&fields.description),
        thumbnail_url: get(&fields.thumbnail_url).unwrap_or_default(),
        regular_url: get(&fields.regular_url).unwrap_or_default(),
        raw_url: get(&fields.raw_url),
        photographer: get(&fields.photographer),
        photographer_url: get(&fields.photographer_url),
        source: source_tag(item, spec),
        source_url: get(&fields.source_url).unwrap_or_default(),
        download_url: get(&fields.download_url).unwrap_or_default(),
        license: license_label(item, spec),
        image_id,
    }
    .sanitized()
}

fn placeholder_title(spec: &ProviderSpec) -> String {
    format!("Image from {}", spec.name)
}

fn resolve(field: &Field, item: &Value, spec: &ProviderSpec) -> Option<String> {
    match field {
        Field::Null => None,
        Field::Ptr(ptr) => item.pointer(ptr).and_then(render),
        Field::Text(text) => Some(text.to_string()),
        Field::Template(template) => fill_template(template, item),
        Field::LastSegment(ptr) => item
            .pointer(ptr)
            .and_then(render)
            .and_then(|url| {
                url.trim_end_matches('/')
                    .rsplit('/')
                    .next()
                    .map(str::to_string)
            })
            .filter(|s| !s.is_empty()),
        Field::BaseUrl => Some(spec.base_url.to_string()),
        Field::Placeholder => Some(placeholder_title(spec)),
        Field::Or(alternatives) => alternatives
            .iter()
            .find_map(|field| resolve(field, item, spec)),
    }
}

/// Renders a scalar as text. Blank strings, null and containers are absent.
fn render(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn fill_template(template: &str, item: &Value) -> Option<String> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let close = after.find('}')?;
        let value = item.pointer(&after[..close]).and_then(render)?;
        out.push_str(&value);
        rest = &after[close + 1..];
    }
    out.push_str(rest);

    Some(out)
}

fn license_label(item: &Value, spec: &ProviderSpec) -> String {
    match spec.license {
        LicenseRule::Fixed(label) => label.to_string(),
        LicenseRule::Premium { flag, free, paid } => {
            let premium = item
                .pointer(flag)
                .and_then(Value::as_bool)
                .unwrap_or(false);
            let label = if premium { paid } else { free };
            label.to_string()
        }
        LicenseRule::CreativeCommons(ptr) => {
            let tag = item.pointer(ptr).and_then(Value::as_str).unwrap_or("");
            normalize_cc_license(tag).to_string()
        }
    }
}

fn source_tag(item: &Value, spec: &ProviderSpec) -> String {
    match spec.source {
        SourceRule::Provider => spec.id.to_string(),
        SourceRule::Prefixed {
            prefix,
            field,
            default,
        } => {
            let upstream = item.pointer(field).and_then(render);
            format!("{}{}", prefix, upstream.as_deref().unwrap_or(default))
        }
    }
}

//! Image reference resolution for catalog responses

use serde_json::{Map, Value};

/// Served when an image reference is neither absolute nor rooted
pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/400x600?text=No+Image";

const IMAGE_FIELDS: [&str; 2] = ["frontImage", "backImage"];

/// Resolve one image reference against the backend base URL
///
/// - `http://` / `https://` pass through unchanged
/// - `/path` is prefixed with the base URL
/// - anything else becomes [`PLACEHOLDER_IMAGE_URL`]
pub fn resolve_image_url(raw: &str, base_url: &str) -> String {
    if raw.starts_with("http://") || raw.starts_with("https://") {
        raw.to_string()
    } else if raw.starts_with('/') {
        format!("{}{}", base_url.trim_end_matches('/'), raw)
    } else {
        PLACEHOLDER_IMAGE_URL.to_string()
    }
}

/// Rewrite image fields of a dress object or array of dress objects in place
pub fn rewrite_dress_images(data: &mut Value, base_url: &str) {
    match data {
        Value::Array(items) => {
            for item in items.iter_mut() {
                if let Value::Object(obj) = item {
                    rewrite_object(obj, base_url);
                }
            }
        }
        Value::Object(obj) => rewrite_object(obj, base_url),
        _ => {}
    }
}

fn rewrite_object(obj: &mut Map<String, Value>, base_url: &str) {
    for field in IMAGE_FIELDS {
        let resolved = match obj.get(field) {
            Some(Value::String(raw)) => resolve_image_url(raw, base_url),
            _ => PLACEHOLDER_IMAGE_URL.to_string(),
        };
        obj.insert(field.to_string(), Value::String(resolved));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const BASE: &str = "http://localhost:3000/";

    #[test]
    fn test_resolve_image_url() {
        assert_eq!(
            resolve_image_url("https://cdn.example.com/a.jpg", BASE),
            "https://cdn.example.com/a.jpg"
        );
        assert_eq!(
            resolve_image_url("/uploads/a.jpg", BASE),
            "http://localhost:3000/uploads/a.jpg"
        );
        assert_eq!(resolve_image_url("a.jpg", BASE), PLACEHOLDER_IMAGE_URL);
        assert_eq!(resolve_image_url("", BASE), PLACEHOLDER_IMAGE_URL);
    }

    #[test]
    fn test_relative_web_base_keeps_rooted_path() {
        assert_eq!(resolve_image_url("/uploads/a.jpg", ""), "/uploads/a.jpg");
    }

    #[test]
    fn test_rewrite_array_and_missing_fields() {
        let mut data = json!([
            { "id": "1", "frontImage": "/f.jpg", "backImage": "http://x/b.jpg" },
            { "id": "2", "frontImage": null }
        ]);

        rewrite_dress_images(&mut data, BASE);

        assert_eq!(data[0]["frontImage"], "http://localhost:3000/f.jpg");
        assert_eq!(data[0]["backImage"], "http://x/b.jpg");
        assert_eq!(data[1]["frontImage"], PLACEHOLDER_IMAGE_URL);
        assert_eq!(data[1]["backImage"], PLACEHOLDER_IMAGE_URL);
    }

    #[test]
    fn test_rewrite_ignores_scalars() {
        let mut data = json!(null);
        rewrite_dress_images(&mut data, BASE);
        assert!(data.is_null());
    }
}

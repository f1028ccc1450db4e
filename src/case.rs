//! Key-case normalization for API payloads.
//!
//! The catalog API returns camelCase keys (`totalRecords`, `naId`). This
//! module rewrites every object key in a JSON value to snake_case while
//! leaving values, including string values that look like camelCase,
//! untouched.
//!
//! # Example
//!
//! ```rust
//! use archiwrap::case::{normalize_keys, to_snake_case};
//! use serde_json::json;
//!
//! assert_eq!(to_snake_case("totalRecords"), "total_records");
//!
//! let value = normalize_keys(json!({"naId": 1, "title": "plainString"}));
//! assert_eq!(value, json!({"na_id": 1, "title": "plainString"}));
//! ```

use serde_json::{Map, Value};

/// Converts a single key to snake_case.
///
/// - The empty string maps to itself.
/// - A string with at least one cased character and no lowercase characters
///   is lowercased without inserting underscores (`"UPPERCASE"` becomes
///   `"uppercase"`).
/// - Otherwise an underscore is inserted between each ASCII lowercase letter
///   and an immediately following ASCII uppercase letter, then the whole
///   string is lowercased. Only the first letter of an uppercase run gets a
///   boundary: `"mixedCASSE"` becomes `"mixed_casse"`.
///
/// Digits and punctuation never create boundaries.
///
/// ```rust
/// use archiwrap::case::to_snake_case;
///
/// assert_eq!(to_snake_case("camelCase"), "camel_case");
/// assert_eq!(to_snake_case("PascalCase"), "pascal_case");
/// assert_eq!(to_snake_case("UPPERCASE"), "uppercase");
/// assert_eq!(to_snake_case("already_snake"), "already_snake");
/// ```
#[must_use]
pub fn to_snake_case(s: &str) -> String {
    if s.is_empty() {
        return String::new();
    }

    if is_shouting(s) {
        return s.to_lowercase();
    }

    let mut out = String::with_capacity(s.len() + 4);
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        out.push(c);
        if c.is_ascii_lowercase() && chars.peek().is_some_and(char::is_ascii_uppercase) {
            out.push('_');
        }
    }
    out.to_lowercase()
}

// At least one cased character and none of them lowercase.
fn is_shouting(s: &str) -> bool {
    let mut has_cased = false;
    for c in s.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            has_cased = true;
        }
    }
    has_cased
}

/// Recursively rewrites every object key in `value` to snake_case.
///
/// Arrays keep their length and order with each element normalized; scalars
/// are returned unchanged. When two keys of one object collide after
/// conversion, the first key's position is kept and the last value wins.
#[must_use]
pub fn normalize_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(normalize_object(map)),
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_keys).collect()),
        scalar => scalar,
    }
}

fn normalize_object(map: Map<String, Value>) -> Map<String, Value> {
    let mut out = Map::with_capacity(map.len());
    for (key, value) in map {
        out.insert(to_snake_case(&key), normalize_keys(value));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_snake_case_conversions() {
        let cases = [
            ("camelCase", "camel_case"),
            ("PascalCase", "pascal_case"),
            ("snake_case", "snake_case"),
            ("UPPERCASE", "uppercase"),
            ("mixedCASSE", "mixed_casse"),
            ("", ""),
            ("already_snake", "already_snake"),
            ("multipleCAPS", "multiple_caps"),
        ];

        for (input, expected) in cases {
            assert_eq!(to_snake_case(input), expected, "input: {input:?}");
        }
    }

    #[test]
    fn test_all_caps_never_gets_underscores() {
        for input in ["ID", "URL", "NARA", "HTTP_STATUS", "V2API"] {
            assert_eq!(to_snake_case(input), input.to_lowercase());
        }
    }

    #[test]
    fn test_digits_and_punctuation_are_inert() {
        assert_eq!(to_snake_case("item2Name"), "item2name");
        assert_eq!(to_snake_case("record-Id"), "record-id");
        assert_eq!(to_snake_case("12345"), "12345");
        assert_eq!(to_snake_case("@id"), "@id");
        assert_eq!(to_snake_case("naId.value"), "na_id.value");
    }

    #[test]
    fn test_only_lower_to_upper_boundaries_split() {
        assert_eq!(to_snake_case("HTMLParser"), "htmlparser");
        assert_eq!(to_snake_case("getHTTPResponseCode"), "get_httpresponse_code");
        assert_eq!(to_snake_case("aBcD"), "a_bc_d");
    }

    #[test]
    fn test_non_ascii_keys_are_lowercased() {
        assert_eq!(to_snake_case("ÜBER"), "über");
        assert_eq!(to_snake_case("straßeName"), "straße_name");
    }

    #[test]
    fn test_normalize_complex_nested() {
        let input = json!({
            "topLevel": {
                "nestedObject": {
                    "deeplyNestedValue": 123
                },
                "arrayOfObjects": [
                    {"itemOne": 1},
                    {"itemTwo": 2}
                ],
                "mixedTypes": [
                    {"nestedItem": "value"},
                    123,
                    "plainString",
                    ["nestedArray"]
                ]
            }
        });

        let expected = json!({
            "top_level": {
                "nested_object": {
                    "deeply_nested_value": 123
                },
                "array_of_objects": [
                    {"item_one": 1},
                    {"item_two": 2}
                ],
                "mixed_types": [
                    {"nested_item": "value"},
                    123,
                    "plainString",
                    ["nestedArray"]
                ]
            }
        });

        assert_eq!(normalize_keys(input), expected);
    }

    #[test]
    fn test_normalize_edge_cases() {
        let cases = [
            (json!(123), json!(123)),
            (json!("string"), json!("string")),
            (json!(null), json!(null)),
            (json!(true), json!(true)),
            (json!(1.5), json!(1.5)),
            (json!({}), json!({})),
            (json!([]), json!([])),
            (
                json!(["string", {"camelCase": 123}, [{"nestedKey": "value"}]]),
                json!(["string", {"camel_case": 123}, [{"nested_key": "value"}]]),
            ),
        ];

        for (input, expected) in cases {
            assert_eq!(normalize_keys(input), expected);
        }
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let input = json!({
            "totalRecords": 2,
            "results": [{"naId": 1, "recordType": "item"}, {"naId": 2}]
        });

        let once = normalize_keys(input);
        let twice = normalize_keys(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_normalize_preserves_key_order() {
        let input = json!({"zetaKey": 1, "alphaKey": 2, "midKey": 3});
        let output = normalize_keys(input);

        let keys: Vec<&str> = output
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, ["zeta_key", "alpha_key", "mid_key"]);
    }

    #[test]
    fn test_colliding_keys_keep_first_position_and_last_value() {
        let input = json!({"fooBar": 1, "other": 2, "foo_bar": 3});
        let output = normalize_keys(input);

        let object = output.as_object().unwrap();
        let keys: Vec<&str> = object.keys().map(String::as_str).collect();
        assert_eq!(keys, ["foo_bar", "other"]);
        assert_eq!(object["foo_bar"], json!(3));
    }
}

use heck::ToPascalCase;

/// Convert an identifier from the document (`pet-store_item`, `listPets`,
/// `_pets`) into a type/member name: split on `-` and `_`, drop empty
/// segments, upper-case the first character of each segment and concatenate.
///
/// Inner casing is preserved, so names that are already PascalCase come back
/// unchanged. Characters that are invalid in a given target language are left
/// for that language's emitter to sanitize.
pub fn normalize(raw: &str) -> String {
    raw.split(['-', '_'])
        .filter(|segment| !segment.is_empty())
        .map(upper_first)
        .collect()
}

/// Candidate type name for a schema that is only identified by the path it
/// is returned from: `/pets` → `Pets`.
pub fn path_to_name(path: &str) -> String {
    normalize(&path.replace('/', "_"))
}

fn upper_first(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Derive a camelCase operation name from HTTP method + path.
///
/// Examples:
/// - `GET /users` → `listUsers`
/// - `POST /users` → `createUsers`
/// - `GET /users/{userId}` → `getUser`
/// - `PUT /users/{userId}` → `updateUser`
/// - `DELETE /users/{userId}` → `deleteUser`
/// - `GET /users/{userId}/messages` → `listUsersMessages`
pub fn route_to_name(method: &str, path: &str) -> String {
    let mut resource_parts: Vec<&str> = Vec::new();
    let mut ends_with_param = false;

    for seg in path.split('/').filter(|s| !s.is_empty()) {
        if seg.starts_with('{') && seg.ends_with('}') {
            ends_with_param = true;
        } else {
            resource_parts.push(seg);
            ends_with_param = false;
        }
    }

    let method_upper = method.to_uppercase();
    let prefix = match method_upper.as_str() {
        "GET" if ends_with_param => "get",
        "GET" => "list",
        "POST" => "create",
        "PUT" => "update",
        "DELETE" => "delete",
        "PATCH" => "patch",
        "OPTIONS" => "options",
        "HEAD" => "head",
        "TRACE" => "trace",
        _ => return method.to_lowercase(),
    };

    // Single-resource ops (trailing param) singularize the last segment.
    let mut pascal_parts = String::new();
    for (i, part) in resource_parts.iter().enumerate() {
        let is_last = i == resource_parts.len() - 1;
        let word = if is_last && ends_with_param {
            singularize(part)
        } else {
            part.to_string()
        };
        pascal_parts.push_str(&word.to_pascal_case());
    }

    format!("{prefix}{pascal_parts}")
}

/// Naive singularization: strips trailing 's' if present.
fn singularize(word: &str) -> String {
    if word.ends_with("ies") && word.len() > 3 {
        format!("{}y", &word[..word.len() - 3])
    } else if word.ends_with("ses") || word.ends_with("xes") || word.ends_with("zes") {
        word[..word.len() - 2].to_string()
    } else if word.ends_with('s') && !word.ends_with("ss") && word.len() > 1 {
        word[..word.len() - 1].to_string()
    } else {
        word.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kebab_and_snake() {
        assert_eq!(normalize("pet-store_item"), "PetStoreItem");
    }

    #[test]
    fn test_already_pascal() {
        assert_eq!(normalize("PetStoreItem"), "PetStoreItem");
    }

    #[test]
    fn test_camel_case_keeps_inner_capitals() {
        assert_eq!(normalize("listPets"), "ListPets");
    }

    #[test]
    fn test_empty_segments_dropped() {
        assert_eq!(normalize("__pet--store_"), "PetStore");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("-_-"), "");
    }

    #[test]
    fn test_idempotent() {
        for raw in ["pet-store_item", "listPets", "_pets", "a_b-c"] {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn test_path_to_name() {
        assert_eq!(path_to_name("/pets"), "Pets");
        assert_eq!(path_to_name("/store/inventory"), "StoreInventory");
    }

    #[test]
    fn test_route_to_name_list() {
        assert_eq!(route_to_name("GET", "/users"), "listUsers");
    }

    #[test]
    fn test_route_to_name_create() {
        assert_eq!(route_to_name("POST", "/users"), "createUsers");
    }

    #[test]
    fn test_route_to_name_get_single() {
        assert_eq!(route_to_name("GET", "/users/{userId}"), "getUser");
    }

    #[test]
    fn test_route_to_name_update() {
        assert_eq!(route_to_name("PUT", "/users/{userId}"), "updateUser");
    }

    #[test]
    fn test_route_to_name_delete() {
        assert_eq!(route_to_name("DELETE", "/users/{userId}"), "deleteUser");
    }

    #[test]
    fn test_route_to_name_singularizes_ies() {
        assert_eq!(route_to_name("GET", "/categories/{id}"), "getCategory");
    }

    #[test]
    fn test_route_to_name_nested_get() {
        assert_eq!(
            route_to_name("GET", "/users/{userId}/messages"),
            "listUsersMessages"
        );
    }

    #[test]
    fn test_route_to_name_root() {
        assert_eq!(route_to_name("GET", "/"), "list");
    }
}

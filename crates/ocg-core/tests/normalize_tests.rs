use ocg_core::transform::name_normalizer::{normalize, path_to_name, route_to_name};

#[test]
fn test_separators_collapse_to_same_name() {
    assert_eq!(normalize("pet-store_item"), "PetStoreItem");
    assert_eq!(normalize("PetStoreItem"), "PetStoreItem");
}

#[test]
fn test_camel_case_input() {
    assert_eq!(normalize("listPets"), "ListPets");
}

#[test]
fn test_empty_segments_dropped() {
    assert_eq!(normalize("__a--b_"), "AB");
    assert_eq!(normalize("-_-"), "");
    assert_eq!(normalize(""), "");
}

#[test]
fn test_idempotent() {
    for raw in ["pet-store_item", "listPets", "x", "in_stock"] {
        let once = normalize(raw);
        assert_eq!(normalize(&once), once);
    }
}

#[test]
fn test_path_names() {
    assert_eq!(path_to_name("/pets"), "Pets");
    assert_eq!(path_to_name("/store/inventory"), "StoreInventory");
    assert_eq!(path_to_name("/"), "");
}

#[test]
fn test_path_with_template_keeps_braces() {
    // Braces are left for the emitter's identifier sanitizer.
    assert_eq!(path_to_name("/pets/{petId}"), "Pets{petId}");
}

#[test]
fn test_route_names() {
    assert_eq!(route_to_name("GET", "/pets"), "listPets");
    assert_eq!(route_to_name("GET", "/pets/{petId}"), "getPet");
    assert_eq!(route_to_name("POST", "/pets"), "createPets");
    assert_eq!(route_to_name("DELETE", "/reports/{reportId}"), "deleteReport");
}

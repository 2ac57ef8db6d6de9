// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Bundled dealership registry tests.

use dealer_checkin::services::registry::known_coordinates;
use dealer_checkin::services::LocationRegistry;

mod common;

#[test]
fn test_bundled_registry_loads() {
    let registry = common::test_registry();
    assert_eq!(registry.len(), 22);

    let kia = registry.get("401_kia").unwrap();
    assert_eq!(kia.name, "401 Kia");
    assert_eq!(kia.address, "6435 Dixie Rd, Mississauga, ON");
}

#[test]
fn test_every_bundled_dealership_has_coordinates() {
    let registry = common::test_registry();
    for location in registry.list() {
        assert!(
            location.coordinates.is_some(),
            "{} has no coordinates",
            location.id
        );
        assert_eq!(location.coordinates, known_coordinates(&location.id));
    }
}

#[test]
fn test_parenthesized_name_slug() {
    let registry = common::test_registry();
    let location = registry.get("401_mitsubishi_dixie_mitsubishi").unwrap();
    assert_eq!(location.name, "401 Mitsubishi (Dixie Mitsubishi)");
}

#[test]
fn test_missing_file_is_an_error() {
    let result = LocationRegistry::load_from_file("data/does_not_exist.txt");
    assert!(result.is_err());
}

//! Well-known protocol identifiers shared by every space.

use crate::schema::id::Id;

pub const NAME_ATTRIBUTE: &str = "LuBWqZAu6pz54eiJS5mLv8";
pub const DESCRIPTION_ATTRIBUTE: &str = "LA1DqP5v6QAdsgLPXGF3YA";
pub const TYPES_ATTRIBUTE: &str = "Jfmby78N4BCseZinBmdVov";
pub const PROPERTIES: &str = "9zBADaYzyfzyFJvEnpkQaG";
pub const VALUE_TYPE_ATTRIBUTE: &str = "WQfdWjboZWFuTseDhG5Cw1";

pub const SCHEMA_TYPE: &str = "VdTsW1mGiy1XSooJaBBLc4";
pub const PROPERTY: &str = "GscJ2GELQjmLoaVrYyR3xm";

pub const TEXT: &str = "LckSTmjBrYAJaFcDs89am5";
pub const NUMBER: &str = "LBdMpTNyycNffsF51t2eSp";
pub const CHECKBOX: &str = "G9NpD4c7GB7nH5YU9Tesgf";
pub const URL: &str = "5xroh3gbWYbWY4HRtgc5Hc";
pub const TIME: &str = "3mswMrL91GuYTfBq29EuNE";
pub const POINT: &str = "UZBZNbA7Uhx1f8ebLi1Qj5";
pub const RELATION: &str = "AKDxovGvZaPSWnmKnSoZJY";

const ALL: &[&str] = &[
    NAME_ATTRIBUTE,
    DESCRIPTION_ATTRIBUTE,
    TYPES_ATTRIBUTE,
    PROPERTIES,
    VALUE_TYPE_ATTRIBUTE,
    SCHEMA_TYPE,
    PROPERTY,
    TEXT,
    NUMBER,
    CHECKBOX,
    URL,
    TIME,
    POINT,
    RELATION,
];

/// Whether `id` is one of the protocol's built-in identifiers.
pub fn is_system(id: &Id) -> bool {
    ALL.contains(&id.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_ids_parse() {
        for raw in ALL {
            let id: Id = raw.parse().unwrap();
            assert!(is_system(&id));
        }
    }

    #[test]
    fn test_generated_id_is_not_system() {
        assert!(!is_system(&Id::generate()));
    }
}

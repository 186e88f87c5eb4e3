//! Product classification from name and category.
//!
//! Everything here is plain substring matching over a lowercased name. The
//! predicates fold diacritics so "Jägermeister" and "JAGERMEISTER" read the same;
//! the liquor-type table does not, so "Patrón" never hits the "ron" keyword.
//! The keyword tables are ordered rule lists, not a grammar; the first match wins.

use serde::{Deserialize, Serialize};

use crate::category::ProductCategory;

/// Coarse liquor classification driving drink-pairing rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LiquorType {
    Ron,
    Tequila,
    Brandy,
    Whisky,
    Vodka,
    Ginebra,
    Mezcal,
    Cognac,
    Jagermeister,
    /// A liquor no keyword matched.
    Default,
    /// Not a liquor at all.
    None,
}

impl LiquorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LiquorType::Ron => "RON",
            LiquorType::Tequila => "TEQUILA",
            LiquorType::Brandy => "BRANDY",
            LiquorType::Whisky => "WHISKY",
            LiquorType::Vodka => "VODKA",
            LiquorType::Ginebra => "GINEBRA",
            LiquorType::Mezcal => "MEZCAL",
            LiquorType::Cognac => "COGNAC",
            LiquorType::Jagermeister => "JAGERMEISTER",
            LiquorType::Default => "DEFAULT",
            LiquorType::None => "NONE",
        }
    }
}

impl core::fmt::Display for LiquorType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered keyword table; first match wins.
const LIQUOR_KEYWORDS: &[(&str, LiquorType)] = &[
    ("ron", LiquorType::Ron),
    ("tequila", LiquorType::Tequila),
    ("brandy", LiquorType::Brandy),
    ("whisky", LiquorType::Whisky),
    ("whiskey", LiquorType::Whisky),
    ("vodka", LiquorType::Vodka),
    ("ginebra", LiquorType::Ginebra),
    ("gin", LiquorType::Ginebra),
    ("mezcal", LiquorType::Mezcal),
    ("cognac", LiquorType::Cognac),
    ("jagermeister", LiquorType::Jagermeister),
    ("jägermeister", LiquorType::Jagermeister),
];

const BOTTLE_KEYWORDS: &[&str] = &["botella", "bottle"];
const SPARKLING_KEYWORDS: &[&str] = &["champagne", "prosecco"];

/// Lowercase and strip diacritics so substring rules are accent-insensitive.
pub fn normalize(text: &str) -> String {
    text.chars()
        .flat_map(char::to_lowercase)
        .map(fold_diacritic)
        .collect()
}

fn fold_diacritic(c: char) -> char {
    match c {
        'á' | 'à' | 'ä' | 'â' | 'ã' => 'a',
        'é' | 'è' | 'ë' | 'ê' => 'e',
        'í' | 'ì' | 'ï' | 'î' => 'i',
        'ó' | 'ò' | 'ö' | 'ô' | 'õ' => 'o',
        'ú' | 'ù' | 'ü' | 'û' => 'u',
        'ñ' => 'n',
        'ç' => 'c',
        other => other,
    }
}

/// Accent- and case-insensitive substring test.
pub fn contains_normalized(haystack: &str, needle: &str) -> bool {
    normalize(haystack).contains(&normalize(needle))
}

pub fn is_liquor(category: ProductCategory) -> bool {
    category.is_liquor()
}

pub fn is_jagermeister(name: &str) -> bool {
    normalize(name).contains("jagermeister")
}

pub fn is_bottle(name: &str) -> bool {
    let name = normalize(name);
    BOTTLE_KEYWORDS.iter().any(|k| name.contains(k))
        || (name.contains("jagermeister") && name.contains("700"))
}

pub fn is_digestivo(name: &str, category: ProductCategory) -> bool {
    category == ProductCategory::Digestivos || normalize(name).contains("digestivo")
}

pub fn is_espumoso(name: &str, category: ProductCategory) -> bool {
    let name = normalize(name);
    category == ProductCategory::Espumosos || SPARKLING_KEYWORDS.iter().any(|k| name.contains(k))
}

pub fn requires_drink_selection(name: &str, category: ProductCategory) -> bool {
    is_liquor(category) && !is_digestivo(name, category) && !is_espumoso(name, category)
}

pub fn liquor_type(name: &str, category: ProductCategory) -> LiquorType {
    if !is_liquor(category) {
        return LiquorType::None;
    }
    let name = name.to_lowercase();
    LIQUOR_KEYWORDS
        .iter()
        .find(|(keyword, _)| name.contains(keyword))
        .map(|(_, kind)| *kind)
        .unwrap_or(LiquorType::Default)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LICORES: ProductCategory = ProductCategory::Licores;

    #[test]
    fn normalization_folds_accents_and_case() {
        assert_eq!(normalize("JÄGERMEISTER Limón"), "jagermeister limon");
    }

    #[test]
    fn jagermeister_is_detected_with_or_without_umlaut() {
        assert!(is_jagermeister("Jägermeister"));
        assert!(is_jagermeister("JAGERMEISTER 700ml"));
        assert_eq!(liquor_type("Jägermeister", LICORES), LiquorType::Jagermeister);
    }

    #[test]
    fn bottle_detection() {
        assert!(is_bottle("Botella Bacardi Blanco"));
        assert!(is_bottle("Absolut Bottle"));
        assert!(is_bottle("Jägermeister 700"));
        assert!(!is_bottle("Jägermeister"));
        assert!(!is_bottle("Smirnoff 700"));
    }

    #[test]
    fn digestivos_and_espumosos_do_not_take_drinks() {
        assert!(requires_drink_selection("Bacardi Blanco Ron", LICORES));
        assert!(!requires_drink_selection("Licor 43 Digestivo", LICORES));
        assert!(!requires_drink_selection("Moët Champagne", LICORES));
        assert!(!requires_drink_selection("Frangelico", ProductCategory::Digestivos));
        assert!(!requires_drink_selection("Coca Cola", ProductCategory::Refrescos));
    }

    #[test]
    fn liquor_type_follows_keyword_order() {
        assert_eq!(liquor_type("Ron Bacardi", LICORES), LiquorType::Ron);
        assert_eq!(liquor_type("Tequila Don Julio", LICORES), LiquorType::Tequila);
        assert_eq!(liquor_type("Whiskey Jack Daniels", LICORES), LiquorType::Whisky);
        assert_eq!(liquor_type("Ginebra Tanqueray", LICORES), LiquorType::Ginebra);
        assert_eq!(liquor_type("Gin Bombay", LICORES), LiquorType::Ginebra);
        assert_eq!(liquor_type("Tequila Patrón", LICORES), LiquorType::Tequila);
        assert_eq!(liquor_type("Patrón Silver", LICORES), LiquorType::Default);
        assert_eq!(liquor_type("JÄGERMEISTER", LICORES), LiquorType::Jagermeister);
        assert_eq!(liquor_type("Baileys", LICORES), LiquorType::Default);
        assert_eq!(liquor_type("Coca Cola", ProductCategory::Refrescos), LiquorType::None);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: only the liquor category ever yields a liquor type.
            #[test]
            fn non_liquors_never_classify(name in "[A-Za-zÁÉÍÓÚáéíóúÄäÑñ0-9 ]{0,60}") {
                for category in ProductCategory::all() {
                    let kind = liquor_type(&name, *category);
                    if category.is_liquor() {
                        prop_assert_ne!(kind, LiquorType::None);
                    } else {
                        prop_assert_eq!(kind, LiquorType::None);
                        prop_assert!(!requires_drink_selection(&name, *category));
                    }
                }
            }

            /// Property: normalisation is idempotent.
            #[test]
            fn normalize_is_idempotent(text in "[A-Za-zÀ-ÿ ]{0,40}") {
                let once = normalize(&text);
                prop_assert_eq!(normalize(&once), once.clone());
            }
        }
    }
}

//! Fixed drink-pairing rule table.

use serde::{Deserialize, Serialize};

use comanda_products::{LiquorType, Product};

/// Which table entry governs a product's mixers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DrinkProfile {
    Ron,
    Tequila,
    Vodka,
    Whisky,
    Jagermeister,
    Botella,
    Default,
}

impl DrinkProfile {
    /// Resolve the profile for a product that takes drinks.
    ///
    /// Jägermeister is served alone even by the bottle; other bottles get the
    /// bottle entry; liquor types without an entry of their own fall back to
    /// `Default`.
    pub fn for_product(product: &Product) -> DrinkProfile {
        match product.liquor_type() {
            LiquorType::Jagermeister => DrinkProfile::Jagermeister,
            _ if product.is_bottle() => DrinkProfile::Botella,
            other => Self::for_liquor_type(other),
        }
    }

    pub fn for_liquor_type(kind: LiquorType) -> DrinkProfile {
        match kind {
            LiquorType::Ron => DrinkProfile::Ron,
            LiquorType::Tequila => DrinkProfile::Tequila,
            LiquorType::Vodka => DrinkProfile::Vodka,
            LiquorType::Whisky => DrinkProfile::Whisky,
            LiquorType::Jagermeister => DrinkProfile::Jagermeister,
            _ => DrinkProfile::Default,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DrinkProfile::Ron => "RON",
            DrinkProfile::Tequila => "TEQUILA",
            DrinkProfile::Vodka => "VODKA",
            DrinkProfile::Whisky => "WHISKY",
            DrinkProfile::Jagermeister => "JAGERMEISTER",
            DrinkProfile::Botella => "BOTELLA",
            DrinkProfile::Default => "DEFAULT",
        }
    }
}

impl core::fmt::Display for DrinkProfile {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extra constraints some profiles carry beyond the allow-list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialRule {
    /// Served alone; any mixer is rejected.
    NoDrinks,
    /// Citrus juices are rejected.
    NoCitrus,
}

/// One row of the pairing table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrinkRule {
    pub allowed: &'static [&'static str],
    pub max_count: u32,
    pub min_count: u32,
    pub allow_multiple: bool,
    pub special: &'static [SpecialRule],
}

pub const COCA_COLA: &str = "Coca Cola";
pub const SPRITE: &str = "Sprite";
pub const AGUA_MINERAL: &str = "Agua Mineral";
pub const HIELOS: &str = "Hielos";
pub const JUGO_NARANJA: &str = "Jugo de Naranja";
pub const JUGO_ARANDANO: &str = "Jugo de Arándano";

const RON: DrinkRule = DrinkRule {
    allowed: &[COCA_COLA, SPRITE, AGUA_MINERAL, HIELOS],
    max_count: 2,
    min_count: 1,
    allow_multiple: false,
    special: &[SpecialRule::NoCitrus],
};

const TEQUILA: DrinkRule = DrinkRule {
    allowed: &[COCA_COLA, SPRITE, AGUA_MINERAL, JUGO_NARANJA, HIELOS],
    max_count: 2,
    min_count: 1,
    allow_multiple: false,
    special: &[],
};

const VODKA: DrinkRule = DrinkRule {
    allowed: &[COCA_COLA, SPRITE, JUGO_NARANJA, JUGO_ARANDANO, AGUA_MINERAL, HIELOS],
    max_count: 2,
    min_count: 1,
    allow_multiple: false,
    special: &[],
};

const WHISKY: DrinkRule = DrinkRule {
    allowed: &[COCA_COLA, SPRITE, AGUA_MINERAL, HIELOS],
    max_count: 2,
    min_count: 1,
    allow_multiple: false,
    special: &[],
};

const JAGERMEISTER: DrinkRule = DrinkRule {
    allowed: &[],
    max_count: 0,
    min_count: 0,
    allow_multiple: false,
    special: &[SpecialRule::NoDrinks],
};

const BOTELLA: DrinkRule = DrinkRule {
    allowed: &[COCA_COLA, SPRITE, AGUA_MINERAL, JUGO_NARANJA, HIELOS],
    max_count: 4,
    min_count: 2,
    allow_multiple: true,
    special: &[],
};

const DEFAULT: DrinkRule = DrinkRule {
    allowed: &[COCA_COLA, SPRITE, AGUA_MINERAL, HIELOS],
    max_count: 2,
    min_count: 1,
    allow_multiple: false,
    special: &[],
};

/// Table lookup.
pub fn rule_for(profile: DrinkProfile) -> &'static DrinkRule {
    match profile {
        DrinkProfile::Ron => &RON,
        DrinkProfile::Tequila => &TEQUILA,
        DrinkProfile::Vodka => &VODKA,
        DrinkProfile::Whisky => &WHISKY,
        DrinkProfile::Jagermeister => &JAGERMEISTER,
        DrinkProfile::Botella => &BOTELLA,
        DrinkProfile::Default => &DEFAULT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use comanda_core::Money;

    fn liquor(name: &str) -> Product {
        Product::try_from_parts(name, name, "licores", Money::from_cents(9500), "").unwrap()
    }

    #[test]
    fn profile_resolution() {
        assert_eq!(DrinkProfile::for_product(&liquor("Ron Bacardi")), DrinkProfile::Ron);
        assert_eq!(DrinkProfile::for_product(&liquor("Vodka Absolut")), DrinkProfile::Vodka);
        assert_eq!(DrinkProfile::for_product(&liquor("Brandy Torres 10")), DrinkProfile::Default);
        assert_eq!(DrinkProfile::for_product(&liquor("Botella Bacardi")), DrinkProfile::Botella);
        assert_eq!(DrinkProfile::for_product(&liquor("Jägermeister 700")), DrinkProfile::Jagermeister);
    }

    #[test]
    fn every_min_is_within_max() {
        for profile in [
            DrinkProfile::Ron,
            DrinkProfile::Tequila,
            DrinkProfile::Vodka,
            DrinkProfile::Whisky,
            DrinkProfile::Jagermeister,
            DrinkProfile::Botella,
            DrinkProfile::Default,
        ] {
            let rule = rule_for(profile);
            assert!(rule.min_count <= rule.max_count, "{profile}");
        }
    }

    #[test]
    fn served_alone_profile_allows_nothing() {
        let rule = rule_for(DrinkProfile::Jagermeister);
        assert!(rule.allowed.is_empty());
        assert_eq!(rule.special, &[SpecialRule::NoDrinks]);
    }
}

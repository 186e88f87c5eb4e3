use core::str::FromStr;

use serde::{Deserialize, Serialize};

use comanda_core::DomainError;

/// Menu category of a product. The set is fixed; the catalog cannot invent new ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    Bebidas,
    Comida,
    Licores,
    Cocteles,
    Refrescos,
    Digestivos,
    Espumosos,
    Vinos,
    Cervezas,
}

impl ProductCategory {
    const ALL: [ProductCategory; 9] = [
        ProductCategory::Bebidas,
        ProductCategory::Comida,
        ProductCategory::Licores,
        ProductCategory::Cocteles,
        ProductCategory::Refrescos,
        ProductCategory::Digestivos,
        ProductCategory::Espumosos,
        ProductCategory::Vinos,
        ProductCategory::Cervezas,
    ];

    pub fn all() -> &'static [ProductCategory] {
        &Self::ALL
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCategory::Bebidas => "bebidas",
            ProductCategory::Comida => "comida",
            ProductCategory::Licores => "licores",
            ProductCategory::Cocteles => "cocteles",
            ProductCategory::Refrescos => "refrescos",
            ProductCategory::Digestivos => "digestivos",
            ProductCategory::Espumosos => "espumosos",
            ProductCategory::Vinos => "vinos",
            ProductCategory::Cervezas => "cervezas",
        }
    }

    pub fn is_liquor(&self) -> bool {
        *self == ProductCategory::Licores
    }

    pub fn is_beverage(&self) -> bool {
        matches!(
            self,
            ProductCategory::Bebidas | ProductCategory::Refrescos | ProductCategory::Cervezas
        )
    }

    pub fn is_food(&self) -> bool {
        *self == ProductCategory::Comida
    }

    pub fn is_cocktail(&self) -> bool {
        *self == ProductCategory::Cocteles
    }
}

impl core::fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(DomainError::validation("product category cannot be empty"));
        }
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == normalized)
            .ok_or_else(|| {
                let valid: Vec<&str> = Self::ALL.iter().map(|c| c.as_str()).collect();
                DomainError::validation(format!(
                    "invalid product category: {s}. Valid categories: {}",
                    valid.join(", ")
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsing_is_trimmed_and_case_insensitive() {
        assert_eq!(" Licores ".parse::<ProductCategory>().unwrap(), ProductCategory::Licores);
        assert_eq!("CERVEZAS".parse::<ProductCategory>().unwrap(), ProductCategory::Cervezas);
    }

    #[test]
    fn unknown_category_lists_valid_ones() {
        let err = "pizzas".parse::<ProductCategory>().unwrap_err();
        match err {
            DomainError::Validation(msg) if msg.contains("licores") => {}
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn beverage_grouping() {
        assert!(ProductCategory::Refrescos.is_beverage());
        assert!(ProductCategory::Cervezas.is_beverage());
        assert!(!ProductCategory::Licores.is_beverage());
        assert!(ProductCategory::Comida.is_food());
        assert!(ProductCategory::Cocteles.is_cocktail());
    }

    #[test]
    fn every_category_round_trips_through_its_name() {
        for category in ProductCategory::all() {
            assert_eq!(category.as_str().parse::<ProductCategory>().unwrap(), *category);
        }
    }
}

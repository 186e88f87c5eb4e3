use serde::{Deserialize, Serialize};

use comanda_core::{Money, ValueObject};

pub const COOKING_TERM_NAME: &str = "Término de cocción";
pub const SPECIAL_REQUEST_NAME: &str = "Solicitud especial";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomizationKind {
    Drink,
    CookingTerm,
    SpecialRequest,
}

impl CustomizationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomizationKind::Drink => "drink",
            CustomizationKind::CookingTerm => "cooking_term",
            CustomizationKind::SpecialRequest => "special_request",
        }
    }
}

/// A modifier attached to an order line.
///
/// Ordering is only used to compare customization sets independently of the
/// order they were added in.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Customization {
    kind: CustomizationKind,
    name: String,
    value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    additional_cost: Option<Money>,
}

impl Customization {
    pub fn new(kind: CustomizationKind, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            value: value.into(),
            additional_cost: None,
        }
    }

    /// A paired drink; the value carries the number of servings.
    pub fn drink(drink_name: impl Into<String>, quantity: u32) -> Self {
        Self::new(CustomizationKind::Drink, drink_name, quantity.to_string())
    }

    pub fn cooking_term(term: impl Into<String>) -> Self {
        Self::new(CustomizationKind::CookingTerm, COOKING_TERM_NAME, term)
    }

    pub fn special_request(request: impl Into<String>) -> Self {
        Self::new(CustomizationKind::SpecialRequest, SPECIAL_REQUEST_NAME, request)
    }

    pub fn with_additional_cost(mut self, cost: Money) -> Self {
        self.additional_cost = Some(cost);
        self
    }

    pub fn kind(&self) -> CustomizationKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn additional_cost(&self) -> Option<Money> {
        self.additional_cost
    }

    pub fn is_drink(&self) -> bool {
        self.kind == CustomizationKind::Drink
    }
}

impl ValueObject for Customization {}

impl core::fmt::Display for Customization {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.name, self.value)
    }
}

/// Order-independent comparison of two customization sets.
pub fn same_customizations(a: &[Customization], b: &[Customization]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut a: Vec<&Customization> = a.iter().collect();
    let mut b: Vec<&Customization> = b.iter().collect();
    a.sort();
    b.sort();
    a == b
}

//! # Catalog Module
//!
//! Product definitions and the storefront's built-in assortment.
//!
//! ## Assortment
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Section        Product                   Kind       Price   Grind?     │
//! │  ─────────────  ────────────────────────  ─────────  ──────  ──────     │
//! │  НОВЫЙ ГОД      Адвент-календарь          Gift       3500    no         │
//! │  ЗЕРНОВОЙ КОФЕ  Эфиопия Буле Хора         Beans       850    yes        │
//! │                 Колумбия Манзана          Beans       850    yes        │
//! │                 Руанда Гашару             Beans       850    yes        │
//! │  ДРИП-ПАКЕТЫ    Эфиопия                   DripBag     130    no         │
//! │                 Коста-Рика                DripBag     130    no         │
//! │                 Гватемала                 DripBag     130    no         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Beans are the only products sold with a [`Grind`]; the grind is part of
//! the cart identity, so "Ethiopia, whole" and "Ethiopia, espresso" are two
//! separate line items.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::cart::CartKey;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Product Identity
// =============================================================================

/// Stable product reference (a URL-safe slug).
///
/// Cart identity is built from this, never from the display name, so a
/// product may be renamed without orphaning cart lines.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        ProductId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        ProductId::new(id)
    }
}

// =============================================================================
// Grind
// =============================================================================

/// How beans are ground before shipping.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS,
)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum Grind {
    /// Whole beans, not ground.
    #[default]
    Whole,
    Espresso,
    Filter,
    FrenchPress,
    Turkish,
}

impl Grind {
    /// Every grind, in the order the selector shows them.
    pub const ALL: [Grind; 5] = [
        Grind::Whole,
        Grind::Espresso,
        Grind::Filter,
        Grind::FrenchPress,
        Grind::Turkish,
    ];

    /// Wire value, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Grind::Whole => "whole",
            Grind::Espresso => "espresso",
            Grind::Filter => "filter",
            Grind::FrenchPress => "french-press",
            Grind::Turkish => "turkish",
        }
    }

    /// Customer-facing label.
    pub fn label(&self) -> &'static str {
        match self {
            Grind::Whole => "Зерно",
            Grind::Espresso => "Эспрессо",
            Grind::Filter => "Фильтр",
            Grind::FrenchPress => "Френч-пресс",
            Grind::Turkish => "Турка",
        }
    }
}

impl fmt::Display for Grind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Grind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Grind::ALL
            .into_iter()
            .find(|g| g.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::UnknownGrind(s.to_string()))
    }
}

// =============================================================================
// Product
// =============================================================================

/// What kind of item a product is. Decides whether a grind applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ProductKind {
    /// 200 g bag of beans; sold with a grind selection.
    Beans,
    /// Single-serve drip bag.
    DripBag,
    /// Seasonal gift item.
    Gift,
}

impl ProductKind {
    pub fn takes_grind(&self) -> bool {
        matches!(self, ProductKind::Beans)
    }
}

/// Storefront grid sections, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    NewYear,
    Beans,
    DripBags,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::NewYear, Section::Beans, Section::DripBags];

    pub fn title(&self) -> &'static str {
        match self {
            Section::NewYear => "НОВЫЙ ГОД",
            Section::Beans => "ЗЕРНОВОЙ КОФЕ",
            Section::DripBags => "ДРИП-ПАКЕТЫ",
        }
    }

    pub fn tagline(&self) -> &'static str {
        match self {
            Section::NewYear => "успейте заказать подарок",
            Section::Beans => "выберите помол под ваш способ приготовления",
            Section::DripBags => "удобно заваривать где угодно",
        }
    }
}

/// A sellable product.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub kind: ProductKind,
    pub section: Section,
    pub price: Money,
    /// Processing method or tagline shown under the name.
    pub subtitle: String,
    /// Pack description ("200 г", "дрип-пакет").
    pub pack: String,
    pub flavors: Vec<String>,
    pub image: String,
}

impl Product {
    /// Name as it appears on a cart line.
    ///
    /// Beans carry the grind label in parentheses, everything else keeps
    /// its plain name.
    ///
    /// ```rust
    /// use brew_core::{Catalog, Grind, ProductId};
    ///
    /// let catalog = Catalog::storefront();
    /// let beans = catalog.get(&ProductId::new("ethiopia-bule-hora")).unwrap();
    /// assert_eq!(beans.display_name(Some(Grind::Espresso)), "Эфиопия Буле Хора (Эспрессо)");
    /// ```
    pub fn display_name(&self, grind: Option<Grind>) -> String {
        match grind {
            Some(grind) => format!("{} ({})", self.name, grind.label()),
            None => self.name.clone(),
        }
    }

    /// Resolves the grind a cart line should carry.
    ///
    /// ## Rules
    /// - Beans without an explicit grind default to [`Grind::Whole`], the
    ///   selector's initial value
    /// - Non-bean products reject any grind
    pub fn resolve_grind(&self, grind: Option<Grind>) -> CoreResult<Option<Grind>> {
        match (self.kind.takes_grind(), grind) {
            (true, grind) => Ok(Some(grind.unwrap_or_default())),
            (false, None) => Ok(None),
            (false, Some(_)) => Err(CoreError::GrindNotApplicable {
                product: self.id.to_string(),
            }),
        }
    }

    pub fn cart_key(&self, grind: Option<Grind>) -> CartKey {
        CartKey::new(self.id.clone(), grind)
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// The set of products offered by the storefront.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Catalog { products }
    }

    /// The built-in assortment shown on the storefront.
    pub fn storefront() -> Self {
        let washed = "Мытая обработка";

        let mut products = vec![Product {
            id: ProductId::new("advent-calendar"),
            name: "Адвент-календарь".to_string(),
            kind: ProductKind::Gift,
            section: Section::NewYear,
            price: Money::from_units(3500),
            subtitle: "Подарок для близких".to_string(),
            pack: "Ограниченная серия".to_string(),
            flavors: Vec::new(),
            image: "advent.jpg".to_string(),
        }];

        let beans = [
            ("ethiopia-bule-hora", "Эфиопия Буле Хора", "ethiopia.jpg", ["Цитрус", "Ягоды", "Цветы"]),
            ("colombia-manzana", "Колумбия Манзана", "columbia.jpg", ["Шоколад", "Цитрус", "Карамель"]),
            ("rwanda-gasharu", "Руанда Гашару", "rwanda.jpg", ["Орех", "Шоколад", "Карамель"]),
        ];
        products.extend(beans.into_iter().map(|(id, name, image, flavors)| Product {
            id: ProductId::new(id),
            name: name.to_string(),
            kind: ProductKind::Beans,
            section: Section::Beans,
            price: Money::from_units(850),
            subtitle: washed.to_string(),
            pack: "200 г".to_string(),
            flavors: flavors.iter().map(|f| f.to_string()).collect(),
            image: image.to_string(),
        }));

        let drips = [
            ("drip-ethiopia", "Эфиопия", "dripethopia.jpg", ["Цитрус", "Ягоды", "Цветы"]),
            ("drip-costa-rica", "Коста-Рика", "dripkostarica.jpg", ["Шоколад", "Цитрус", "Карамель"]),
            ("drip-guatemala", "Гватемала", "dripguatemala.jpg", ["Орех", "Шоколад", "Карамель"]),
        ];
        products.extend(drips.into_iter().map(|(id, name, image, flavors)| Product {
            id: ProductId::new(id),
            name: name.to_string(),
            kind: ProductKind::DripBag,
            section: Section::DripBags,
            price: Money::from_units(130),
            subtitle: washed.to_string(),
            pack: "дрип-пакет".to_string(),
            flavors: flavors.iter().map(|f| f.to_string()).collect(),
            image: image.to_string(),
        }));

        Catalog::new(products)
    }

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Like [`Catalog::get`] but reports a missing product as an error.
    pub fn require(&self, id: &str) -> CoreResult<&Product> {
        self.products
            .iter()
            .find(|p| p.id.as_str() == id)
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))
    }

    /// Products of one section, in display order.
    pub fn section(&self, section: Section) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(move |p| p.section == section)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::storefront()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storefront_assortment() {
        let catalog = Catalog::storefront();
        assert_eq!(catalog.len(), 7);
        assert_eq!(catalog.section(Section::NewYear).count(), 1);
        assert_eq!(catalog.section(Section::Beans).count(), 3);
        assert_eq!(catalog.section(Section::DripBags).count(), 3);

        let advent = catalog.require("advent-calendar").unwrap();
        assert_eq!(advent.price, Money::from_units(3500));
        assert!(catalog
            .section(Section::Beans)
            .all(|p| p.price == Money::from_units(850)));
    }

    #[test]
    fn test_require_unknown_product() {
        let catalog = Catalog::storefront();
        let err = catalog.require("kenya").unwrap_err();
        assert!(matches!(err, CoreError::ProductNotFound(id) if id == "kenya"));
    }

    #[test]
    fn test_grind_parsing() {
        assert_eq!("whole".parse::<Grind>().unwrap(), Grind::Whole);
        assert_eq!("french-press".parse::<Grind>().unwrap(), Grind::FrenchPress);
        assert_eq!(" Turkish ".parse::<Grind>().unwrap(), Grind::Turkish);
        assert!("coarse".parse::<Grind>().is_err());
    }

    #[test]
    fn test_grind_serde_matches_as_str() {
        for grind in Grind::ALL {
            let json = serde_json::to_string(&grind).unwrap();
            assert_eq!(json, format!("\"{}\"", grind.as_str()));
        }
    }

    #[test]
    fn test_resolve_grind() {
        let catalog = Catalog::storefront();
        let beans = catalog.require("rwanda-gasharu").unwrap();
        let drip = catalog.require("drip-guatemala").unwrap();

        assert_eq!(beans.resolve_grind(None).unwrap(), Some(Grind::Whole));
        assert_eq!(
            beans.resolve_grind(Some(Grind::Filter)).unwrap(),
            Some(Grind::Filter)
        );
        assert_eq!(drip.resolve_grind(None).unwrap(), None);
        assert!(matches!(
            drip.resolve_grind(Some(Grind::Espresso)),
            Err(CoreError::GrindNotApplicable { .. })
        ));
    }

    #[test]
    fn test_display_name() {
        let catalog = Catalog::storefront();
        let drip = catalog.require("drip-ethiopia").unwrap();
        assert_eq!(drip.display_name(None), "Эфиопия");

        let beans = catalog.require("colombia-manzana").unwrap();
        assert_eq!(
            beans.display_name(Some(Grind::Whole)),
            "Колумбия Манзана (Зерно)"
        );
    }
}

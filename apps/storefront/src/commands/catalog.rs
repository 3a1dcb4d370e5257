//! # Catalog Commands
//!
//! The product grid, grouped by section, with the quantity each card
//! shows next to its "+" / "−" buttons.

use brew_core::{Catalog, Grind, Money, Product, ProductId, ProductKind, Section};
use serde::Serialize;
use tracing::debug;

use crate::state::CartState;

/// One product card.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub id: ProductId,
    pub name: String,
    pub kind: ProductKind,
    pub price: Money,
    pub subtitle: String,
    pub pack: String,
    pub flavors: Vec<String>,
    pub image: String,

    /// Grinds offered in the selector; empty for non-bean products.
    pub grinds: Vec<Grind>,

    /// Quantity currently in the cart.
    pub in_cart: u32,
}

impl CatalogEntry {
    fn new(product: &Product, in_cart: u32) -> Self {
        CatalogEntry {
            id: product.id.clone(),
            name: product.name.clone(),
            kind: product.kind,
            price: product.price,
            subtitle: product.subtitle.clone(),
            pack: product.pack.clone(),
            flavors: product.flavors.clone(),
            image: product.image.clone(),
            grinds: if product.kind.takes_grind() {
                Grind::ALL.to_vec()
            } else {
                Vec::new()
            },
            in_cart,
        }
    }
}

/// A titled block of the grid.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSection {
    pub section: Section,
    pub title: String,
    pub tagline: String,
    pub products: Vec<CatalogEntry>,
}

/// Lists the catalog in display order.
///
/// Bean cards report the quantity of the default-grind line, falling back
/// to any line of the same product, the same line `remove_from_cart` acts on.
pub fn list_catalog(catalog: &Catalog, cart: &CartState) -> Vec<CatalogSection> {
    debug!("list_catalog command");

    cart.with_cart(|c| {
        Section::ALL
            .into_iter()
            .map(|section| CatalogSection {
                section,
                title: section.title().to_string(),
                tagline: section.tagline().to_string(),
                products: catalog
                    .section(section)
                    .map(|product| {
                        let grind = product.resolve_grind(None).ok().flatten();
                        CatalogEntry::new(product, c.quantity_of(&product.id, grind))
                    })
                    .collect(),
            })
            .filter(|s| !s.products.is_empty())
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sections_in_display_order() {
        let sections = list_catalog(&Catalog::storefront(), &CartState::new());

        let order: Vec<Section> = sections.iter().map(|s| s.section).collect();
        assert_eq!(order, vec![Section::NewYear, Section::Beans, Section::DripBags]);
        assert_eq!(sections[1].products.len(), 3);
        assert_eq!(sections[1].products[0].grinds.len(), 5);
        assert!(sections[2].products[0].grinds.is_empty());
    }

    #[test]
    fn test_in_cart_quantities() {
        let catalog = Catalog::storefront();
        let cart = CartState::new();
        let beans = catalog.require("colombia-manzana").unwrap();
        cart.with_cart_mut(|c| {
            c.add_product(beans, Some(Grind::Filter)).unwrap();
            c.add_product(beans, Some(Grind::Filter)).unwrap();
        });

        let sections = list_catalog(&catalog, &cart);
        let colombia = sections[1]
            .products
            .iter()
            .find(|p| p.id.as_str() == "colombia-manzana")
            .unwrap();
        assert_eq!(colombia.in_cart, 2);

        let ethiopia = &sections[1].products[0];
        assert_eq!(ethiopia.in_cart, 0);
    }
}

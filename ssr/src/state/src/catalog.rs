//! Static produce catalog.
//!
//! Everything here is compiled in and never mutated. The only reader is the
//! catalog renderer, which picks a category by id and lists its items.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProductItem {
    pub id: &'static str,
    pub name: &'static str,
    /// Display string, already formatted with currency and unit.
    pub price: &'static str,
    pub description: Option<&'static str>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CategoryColor {
    Leaf,
    Sun,
    Earth,
    Berry,
    Sky,
}

impl CategoryColor {
    pub const fn badge_class(self) -> &'static str {
        match self {
            Self::Leaf => "bg-emerald-100 text-emerald-800",
            Self::Sun => "bg-amber-100 text-amber-800",
            Self::Earth => "bg-orange-100 text-orange-900",
            Self::Berry => "bg-rose-100 text-rose-800",
            Self::Sky => "bg-sky-100 text-sky-800",
        }
    }

    pub const fn tab_class(self) -> &'static str {
        match self {
            Self::Leaf => "border-emerald-600 text-emerald-700",
            Self::Sun => "border-amber-500 text-amber-700",
            Self::Earth => "border-orange-700 text-orange-800",
            Self::Berry => "border-rose-600 text-rose-700",
            Self::Sky => "border-sky-600 text-sky-700",
        }
    }
}

#[derive(Clone, Copy)]
pub struct ProductCategory {
    pub id: &'static str,
    pub title: &'static str,
    pub icon: icondata::Icon,
    pub description: &'static str,
    pub color: CategoryColor,
    pub items: &'static [ProductItem],
}

/// What the renderer shows for a category.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CategoryContent {
    Items(&'static [ProductItem]),
    ComingSoon { title: &'static str },
}

impl ProductCategory {
    pub fn content(&self) -> CategoryContent {
        if self.items.is_empty() {
            CategoryContent::ComingSoon { title: self.title }
        } else {
            CategoryContent::Items(self.items)
        }
    }
}

pub fn coming_soon_message(title: &str) -> String {
    format!("{title} are coming soon. We'll list them as soon as the next harvest is in.")
}

pub fn catalog() -> &'static [ProductCategory] {
    CATALOG
}

pub fn find_category(id: &str) -> Option<&'static ProductCategory> {
    CATALOG.iter().find(|c| c.id == id)
}

/// Resolves a tab selection, falling back to the first category for unknown ids.
pub fn selected_or_first(id: &str) -> Option<&'static ProductCategory> {
    find_category(id).or_else(|| CATALOG.first())
}

pub fn default_category_id() -> &'static str {
    CATALOG.first().map(|c| c.id).unwrap_or_default()
}

const VEGETABLES: &[ProductItem] = &[
    ProductItem {
        id: "heirloom-tomatoes",
        name: "Heirloom Tomatoes",
        price: "₹90 / kg",
        description: Some("Mixed country varieties, vine ripened."),
    },
    ProductItem {
        id: "palak",
        name: "Palak (Spinach)",
        price: "₹30 / bunch",
        description: Some("Cut the morning of delivery."),
    },
    ProductItem {
        id: "okra",
        name: "Tender Okra",
        price: "₹70 / kg",
        description: None,
    },
    ProductItem {
        id: "drumstick",
        name: "Drumsticks",
        price: "₹60 / 250 g",
        description: Some("From the farm's own moringa trees."),
    },
    ProductItem {
        id: "sweet-potato",
        name: "Sweet Potato",
        price: "₹55 / kg",
        description: None,
    },
];

const FRUITS: &[ProductItem] = &[
    ProductItem {
        id: "banana-nendran",
        name: "Nendran Bananas",
        price: "₹80 / dozen",
        description: Some("Naturally ripened, no carbide."),
    },
    ProductItem {
        id: "papaya",
        name: "Papaya",
        price: "₹50 / kg",
        description: None,
    },
    ProductItem {
        id: "guava",
        name: "Pink Guava",
        price: "₹120 / kg",
        description: Some("Seasonal, limited stock."),
    },
];

const GRAINS: &[ProductItem] = &[
    ProductItem {
        id: "red-rice",
        name: "Hand-pounded Red Rice",
        price: "₹110 / kg",
        description: Some("Single-polished, stone milled."),
    },
    ProductItem {
        id: "ragi",
        name: "Ragi (Finger Millet)",
        price: "₹85 / kg",
        description: None,
    },
    ProductItem {
        id: "toor-dal",
        name: "Toor Dal",
        price: "₹160 / kg",
        description: Some("Unpolished, sun dried."),
    },
    ProductItem {
        id: "foxtail-millet",
        name: "Foxtail Millet",
        price: "₹120 / kg",
        description: None,
    },
];

const PANTRY: &[ProductItem] = &[
    ProductItem {
        id: "wild-honey",
        name: "Wild Forest Honey",
        price: "₹450 / 500 g",
        description: Some("Raw and unfiltered, from tribal collectives."),
    },
    ProductItem {
        id: "jaggery",
        name: "Organic Jaggery",
        price: "₹120 / kg",
        description: None,
    },
    ProductItem {
        id: "coconut-oil",
        name: "Cold-pressed Coconut Oil",
        price: "₹320 / litre",
        description: Some("Wooden ghani pressed in small batches."),
    },
];

static CATALOG: &[ProductCategory] = &[
    ProductCategory {
        id: "vegetables",
        title: "Vegetables",
        icon: icondata::LuCarrot,
        description: "Seasonal greens and vegetables from partner farms within 60 km.",
        color: CategoryColor::Leaf,
        items: VEGETABLES,
    },
    ProductCategory {
        id: "fruits",
        title: "Fruits",
        icon: icondata::LuApple,
        description: "Tree-ripened fruit, picked only when it is ready.",
        color: CategoryColor::Berry,
        items: FRUITS,
    },
    ProductCategory {
        id: "grains",
        title: "Grains & Pulses",
        icon: icondata::LuWheat,
        description: "Traditional rice, millets and dals, minimally processed.",
        color: CategoryColor::Earth,
        items: GRAINS,
    },
    ProductCategory {
        id: "pantry",
        title: "Pantry Staples",
        icon: icondata::LuPackage,
        description: "Honey, jaggery and oils made the slow way.",
        color: CategoryColor::Sun,
        items: PANTRY,
    },
    ProductCategory {
        id: "dairy",
        title: "Dairy & Eggs",
        icon: icondata::LuMilk,
        description: "A2 milk, curd and free-range eggs from the cooperative.",
        color: CategoryColor::Sky,
        items: &[],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn category_ids_are_unique() {
        let ids: HashSet<_> = catalog().iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), catalog().len());
    }

    #[test]
    fn item_ids_are_unique_across_catalog() {
        let mut seen = HashSet::new();
        for item in catalog().iter().flat_map(|c| c.items) {
            assert!(seen.insert(item.id), "duplicate item id {}", item.id);
        }
    }

    #[test]
    fn empty_category_renders_coming_soon() {
        let dairy = find_category("dairy").expect("dairy category");
        assert_eq!(
            dairy.content(),
            CategoryContent::ComingSoon {
                title: "Dairy & Eggs"
            }
        );
        assert!(coming_soon_message(dairy.title).starts_with("Dairy & Eggs"));
    }

    #[test]
    fn stocked_category_lists_its_items_in_order() {
        let grains = find_category("grains").expect("grains category");
        let CategoryContent::Items(items) = grains.content() else {
            panic!("grains should have items");
        };
        let names: Vec<_> = items.iter().map(|i| i.name).collect();
        assert_eq!(
            names,
            [
                "Hand-pounded Red Rice",
                "Ragi (Finger Millet)",
                "Toor Dal",
                "Foxtail Millet"
            ]
        );
    }

    #[test]
    fn unknown_selection_falls_back_to_first_category() {
        let picked = selected_or_first("seafood").expect("non-empty catalog");
        assert_eq!(picked.id, default_category_id());
        assert_eq!(selected_or_first("fruits").map(|c| c.id), Some("fruits"));
    }
}

//! The vendor's fixed menu.
//!
//! The catalog is static, read-only input to the core: the cart copies a
//! [`MenuItem`] by value when it is added and never looks it up again.

use rust_decimal::Decimal;
use std::fmt::Display;

/// Identifier of a menu item, unique across all categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemId(pub u32);

impl Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "item_{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Tortas,
    Tacos,
    Bebidas,
    Extras,
}

impl Category {
    /// Display order of the menu tabs.
    pub const ALL: [Category; 4] = [
        Category::Tortas,
        Category::Tacos,
        Category::Bebidas,
        Category::Extras,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Category::Tortas => "Tortas",
            Category::Tacos => "Tacos",
            Category::Bebidas => "Bebidas",
            Category::Extras => "Extras",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Category::Tortas => "🥖",
            Category::Tacos => "🌮",
            Category::Bebidas => "🥤",
            Category::Extras => "🍟",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One sellable product.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuItem {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
}

impl MenuItem {
    pub fn new(
        id: u32,
        name: impl Into<String>,
        description: impl Into<String>,
        price: u32,
    ) -> Self {
        Self {
            id: ItemId(id),
            name: name.into(),
            description: description.into(),
            price: Decimal::from(price),
        }
    }

    fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.description.to_lowercase().contains(needle)
    }
}

/// Category → ordered list of items.
#[derive(Debug, Clone)]
pub struct Catalog {
    sections: Vec<(Category, Vec<MenuItem>)>,
}

impl Catalog {
    pub fn new(sections: Vec<(Category, Vec<MenuItem>)>) -> Self {
        Self { sections }
    }

    /// Items of one category, in menu order. Empty for a category with no section.
    pub fn items(&self, category: Category) -> &[MenuItem] {
        self.sections
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, items)| items.as_slice())
            .unwrap_or(&[])
    }

    /// Looks an item up by id, returning it with the category it belongs to.
    pub fn find(&self, id: ItemId) -> Option<(Category, &MenuItem)> {
        self.sections.iter().find_map(|(category, items)| {
            items
                .iter()
                .find(|item| item.id == id)
                .map(|item| (*category, item))
        })
    }

    /// Case-insensitive substring search on name or description within a category.
    pub fn search(&self, category: Category, query: &str) -> Vec<&MenuItem> {
        let needle = query.trim().to_lowercase();
        self.items(category)
            .iter()
            .filter(|item| needle.is_empty() || item.matches(&needle))
            .collect()
    }
}

/// The menu of La Calzadita.
pub fn catalog() -> Catalog {
    Catalog::new(vec![
        (
            Category::Tortas,
            vec![
                MenuItem::new(
                    1,
                    "Torta de Jamón",
                    "Jamón de pierna, queso fresco, aguacate cremoso, jitomate jugoso y mayonesa casera",
                    45,
                ),
                MenuItem::new(
                    2,
                    "Torta de Milanesa",
                    "Milanesa de res recién empanizada, queso derretido, aguacate, frijoles refritos",
                    55,
                ),
                MenuItem::new(
                    3,
                    "Torta Hawaiana",
                    "Pierna ahumada, jamón premium, salchicha, queso gratinado y piña caramelizada",
                    60,
                ),
                MenuItem::new(
                    4,
                    "Torta Cubana",
                    "La reina de las tortas: pierna, jamón, milanesa, salchicha, huevo y queso fundido",
                    65,
                ),
            ],
        ),
        (
            Category::Tacos,
            vec![
                MenuItem::new(
                    5,
                    "Tacos de Asada",
                    "3 tacos con carne asada al carbón, cebolla caramelizada, cilantro fresco",
                    50,
                ),
                MenuItem::new(
                    6,
                    "Tacos al Pastor",
                    "3 tacos al pastor con piña asada, cilantro, cebolla y nuestra salsa secreta",
                    50,
                ),
                MenuItem::new(
                    7,
                    "Tacos de Carnitas",
                    "3 tacos de carnitas estilo Michoacán, crujientes por fuera y suaves por dentro",
                    50,
                ),
                MenuItem::new(
                    8,
                    "Tacos Dorados",
                    "4 tacos dorados de papa con lechuga fresca, crema, queso añejo y salsa",
                    45,
                ),
            ],
        ),
        (
            Category::Bebidas,
            vec![
                MenuItem::new(
                    9,
                    "Agua Fresca",
                    "Horchata cremosa, Jamaica refrescante o Limón con chía",
                    20,
                ),
                MenuItem::new(10, "Refresco", "Coca-Cola, Sprite, Fanta o Mundet bien fríos", 25),
                MenuItem::new(11, "Agua Mineral", "Topo Chico o Peñafiel mineralizadas", 20),
                MenuItem::new(12, "Jugo Natural", "Naranja, zanahoria o mixto recién exprimido", 30),
            ],
        ),
        (
            Category::Extras,
            vec![
                MenuItem::new(
                    13,
                    "Papas Fritas",
                    "Porción generosa de papas crujientes recién hechas",
                    30,
                ),
                MenuItem::new(
                    14,
                    "Guacamole Casero",
                    "Guacamole fresco con aguacate Michoacano y totopos",
                    35,
                ),
                MenuItem::new(
                    15,
                    "Quesadillas",
                    "3 quesadillas de queso Oaxaca con tortilla hecha a mano",
                    40,
                ),
                MenuItem::new(
                    16,
                    "Orden de Frijoles",
                    "Frijoles refritos con queso y totopos crujientes",
                    25,
                ),
            ],
        ),
    ])
}

//! Built-in Kyiv sample locations for offline start and demos.

use crate::model::location::{Category, Coords, Location};

const SAMPLES: [(&str, &str, Category, &str, &str, f64, f64); 10] = [
    ("1", "Майдан Незалежності", Category::Other, "Головна площа України", "2024-01-01", 50.4501, 30.5234),
    ("2", "Золоті ворота", Category::Museum, "Історична пам'ятка Києва", "2024-01-02", 50.4487, 30.5131),
    ("3", "Софійський собор", Category::Museum, "Унікальна архітектурна пам'ятка", "2024-01-03", 50.4528, 30.5146),
    ("4", "Парк Шевченка", Category::Park, "Великий міський парк", "2024-01-04", 50.4481, 30.4581),
    ("5", "ЦУМ", Category::Shop, "Центральний універмаг", "2024-01-05", 50.4467, 30.5203),
    ("6", "Ресторан Канапа", Category::Food, "Українська кухня", "2024-01-06", 50.4515, 30.5147),
    ("7", "Гідропарк", Category::Park, "Острів для відпочинку", "2024-01-07", 50.4649, 30.5763),
    ("8", "Бессарабський ринок", Category::Food, "Історичний продуктовий ринок", "2024-01-08", 50.4410, 30.5194),
    ("9", "Океан Плаза", Category::Shop, "Торговельний центр", "2024-01-09", 50.4333, 30.5178),
    ("10", "Музей однієї вулиці", Category::Museum, "Унікальний музей на Андріївському узвозі", "2024-01-10", 50.4572, 30.5188),
];

pub fn sample_locations() -> Vec<Location> {
    SAMPLES
        .iter()
        .map(|&(id, name, category, description, created_at, lat, lon)| Location {
            id: id.to_string(),
            name: name.to_string(),
            category,
            description: Some(description.to_string()),
            created_at: created_at.to_string(),
            coords: Coords::new(lat, lon),
        })
        .collect()
}

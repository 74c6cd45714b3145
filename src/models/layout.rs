use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::Section;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutType {
    SeatingChart,
    GeneralAdmission,
}

impl LayoutType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SeatingChart => "seating_chart",
            Self::GeneralAdmission => "general_admission",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub label: String,
    #[serde(rename = "type")]
    pub stage_type: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

// Проход между секциями — чисто визуальный отрезок, местами не владеет
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aisle {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceCategory {
    pub id: String,
    pub name: String,
    pub color: String,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Канонический макет зала — агрегат, который уходит в персистентность.
/// `capacity` всегда пересчитывается из фактических мест (см. layout::aggregator),
/// снаружи это поле никогда не задаётся.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeatingLayout {
    pub id: String,
    #[serde(rename = "venueId")]
    pub venue_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub layout_type: LayoutType,
    pub sections: Vec<Section>,
    pub stage: Stage,
    pub aisles: Vec<Aisle>,
    pub capacity: u64,
    #[serde(rename = "viewBox")]
    pub view_box: ViewBox,
    #[serde(rename = "priceCategories", skip_serializing_if = "Option::is_none")]
    pub price_categories: Option<Vec<PriceCategory>>,
}

impl SeatingLayout {
    pub fn seat_count(&self) -> usize {
        self.sections.iter().map(|s| s.seat_count()).sum()
    }
}

// Строка списка макетов площадки (GET /api/venues/{id}/layouts)
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LayoutSummary {
    pub id: String,
    #[serde(rename = "venueId")]
    pub venue_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub layout_type: String,
    pub capacity: i64,
    pub updated_at: NaiveDateTime,
}

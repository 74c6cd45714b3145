use serde::{Deserialize, Serialize};

use super::Seat;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionType {
    Standard,
    Curved,
}

// Качественный ценовой уровень; в конкретные цены его превращает pricing-коллаборатор
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PricingTier {
    Vip,
    Premium,
    Standard,
    Economy,
}

/// Дуга кривого ряда: радиус и угловой диапазон в градусах.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowCurve {
    pub radius: f64,
    #[serde(rename = "startAngle")]
    pub start_angle: f64,
    #[serde(rename = "endAngle")]
    pub end_angle: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeatRow {
    pub label: String,
    pub seats: Vec<Seat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curve: Option<RowCurve>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub rotation: f64,
    #[serde(rename = "curveRadius", skip_serializing_if = "Option::is_none")]
    pub curve_radius: Option<f64>,
    #[serde(rename = "curveAngle", skip_serializing_if = "Option::is_none")]
    pub curve_angle: Option<f64>,
    pub rows: Vec<SeatRow>,
    pub pricing: PricingTier,
    #[serde(rename = "sectionType")]
    pub section_type: SectionType,
}

impl Section {
    pub fn seat_count(&self) -> usize {
        self.rows.iter().map(|r| r.seats.len()).sum()
    }

    /// Инвариант секции: sectionType == curved тогда и только тогда, когда
    /// заданы параметры кривизны и каждый ряд несёт дескриптор дуги.
    pub fn curvature_consistent(&self) -> bool {
        let has_params = self.curve_radius.is_some() && self.curve_angle.is_some();
        let all_rows_curved = !self.rows.is_empty() && self.rows.iter().all(|r| r.curve.is_some());
        match self.section_type {
            SectionType::Curved => has_params && all_rows_curved,
            SectionType::Standard => self.rows.iter().all(|r| r.curve.is_none()),
        }
    }
}

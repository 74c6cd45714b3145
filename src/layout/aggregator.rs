//! Сборка канонического макета: пересчёт вместимости и структурные
//! значения по умолчанию для сцены, проходов и viewBox.

use crate::geometry;
use crate::models::{
    Aisle, LayoutType, PriceCategory, SeatingLayout, Section, Stage, ViewBox,
};

const VIEW_PADDING: f64 = 50.0;
const STAGE_HEIGHT: f64 = 60.0;
const STAGE_OFFSET: f64 = 100.0;

/// Заготовка макета: идентичность плюс то, что вернул генератор или редактор.
/// Отсутствующие структурные поля дозаполняет `assemble`.
#[derive(Debug, Clone)]
pub struct LayoutDraft {
    pub id: String,
    pub venue_id: String,
    pub name: String,
    pub layout_type: LayoutType,
    pub sections: Vec<Section>,
    pub stage: Option<Stage>,
    pub aisles: Option<Vec<Aisle>>,
    pub view_box: Option<ViewBox>,
    pub price_categories: Option<Vec<PriceCategory>>,
}

/// Авторитетная вместимость: живой подсчёт мест по всем секциям.
/// Внешние числа вместимости сюда не попадают никогда.
/// Аккумулятор широкий (u64), чтобы сумма не усекалась ни на каком входе.
pub fn capacity(sections: &[Section]) -> u64 {
    sections.iter().map(|s| s.seat_count() as u64).sum()
}

// Габариты всех мест в координатах макета (якорь секции + поворот)
fn seat_bounds(sections: &[Section]) -> Option<(f64, f64, f64, f64)> {
    let mut bounds: Option<(f64, f64, f64, f64)> = None;
    for section in sections {
        for seat in section.rows.iter().flat_map(|r| r.seats.iter()) {
            let (dx, dy) = geometry::rotate_point(seat.x, seat.y, section.rotation);
            let (px, py) = (section.x + dx, section.y + dy);
            bounds = Some(match bounds {
                None => (px, py, px, py),
                Some((min_x, min_y, max_x, max_y)) => (
                    min_x.min(px),
                    min_y.min(py),
                    max_x.max(px),
                    max_y.max(py),
                ),
            });
        }
    }
    bounds
}

/// Сцена по умолчанию: прямоугольник по центру перед первым рядом.
pub fn default_stage(sections: &[Section]) -> Stage {
    let (min_x, min_y, max_x, _) = seat_bounds(sections).unwrap_or((0.0, 0.0, 600.0, 400.0));
    let span = max_x - min_x;
    let width = (span * 0.6).clamp(200.0, 600.0);
    Stage {
        label: "Stage".to_string(),
        stage_type: "stage".to_string(),
        x: min_x + (span - width) / 2.0,
        y: min_y - STAGE_OFFSET - STAGE_HEIGHT,
        width,
        height: STAGE_HEIGHT,
    }
}

/// viewBox по умолчанию: габариты всей геометрии (места + сцена) с полями.
pub fn bounding_view_box(sections: &[Section], stage: &Stage) -> ViewBox {
    let (mut min_x, mut min_y, mut max_x, mut max_y) =
        seat_bounds(sections).unwrap_or((stage.x, stage.y, stage.x + stage.width, stage.y + stage.height));

    min_x = min_x.min(stage.x);
    min_y = min_y.min(stage.y);
    max_x = max_x.max(stage.x + stage.width);
    max_y = max_y.max(stage.y + stage.height);

    ViewBox {
        x: min_x - VIEW_PADDING,
        y: min_y - VIEW_PADDING,
        width: (max_x - min_x) + 2.0 * VIEW_PADDING,
        height: (max_y - min_y) + 2.0 * VIEW_PADDING,
    }
}

/// Собирает канонический `SeatingLayout` из заготовки.
///
/// Вместимость всегда пересчитывается заново; сцена, проходы и viewBox
/// дозаполняются, чтобы в персистентность никогда не ушла запись с
/// отсутствующими обязательными полями.
pub fn assemble(draft: LayoutDraft) -> SeatingLayout {
    let stage = draft
        .stage
        .unwrap_or_else(|| default_stage(&draft.sections));
    let view_box = draft
        .view_box
        .unwrap_or_else(|| bounding_view_box(&draft.sections, &stage));
    let capacity = capacity(&draft.sections);

    SeatingLayout {
        id: draft.id,
        venue_id: draft.venue_id,
        name: draft.name,
        layout_type: draft.layout_type,
        sections: draft.sections,
        stage,
        aisles: draft.aisles.unwrap_or_default(),
        capacity,
        view_box,
        price_categories: draft.price_categories,
    }
}

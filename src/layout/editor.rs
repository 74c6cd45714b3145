//! Мост между интерактивным редактором и каноническим макетом.
//!
//! Редактор присылает частично заполненный объект; здесь — единственное
//! место, где опциональность схлопывается в строгую схему. Дальше
//! опциональных полей не видит никто: ни персистентность, ни читатели.

use serde::Deserialize;
use thiserror::Error;

use crate::generator::templates::slug;
use crate::layout::aggregator::{assemble, LayoutDraft};
use crate::models::{
    Aisle, LayoutType, PriceCategory, SeatingLayout, Section, SectionType, Stage, ViewBox,
};

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("некорректный ввод редактора: {0}")]
    MalformedInput(String),
}

/// Сырой результат редактирования: любое подмножество полей может
/// отсутствовать. `capacity` принимается, но игнорируется — авторитетную
/// вместимость считает только агрегатор.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PartialLayout {
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub layout_type: Option<LayoutType>,
    pub sections: Option<Vec<Section>>,
    pub stage: Option<Stage>,
    pub aisles: Option<Vec<Aisle>>,
    #[serde(rename = "viewBox")]
    pub view_box: Option<ViewBox>,
    #[serde(rename = "priceCategories")]
    pub price_categories: Option<Vec<PriceCategory>>,
    pub capacity: Option<u64>,
}

const DEFAULT_NAME: &str = "Untitled Layout";

/// Нормализует частичный макет в канонический вид, готовый к сохранению.
///
/// Детерминированно: одинаковый вход даёт побайтно одинаковый результат
/// (производные id, без случайности). Отсутствие `venue_id` и дубликаты
/// id мест — ошибки, они не должны тихо дойти до персистентности.
pub fn normalize(partial: PartialLayout, venue_id: &str) -> Result<SeatingLayout, EditorError> {
    if venue_id.trim().is_empty() {
        return Err(EditorError::MalformedInput(
            "venueId обязателен".to_string(),
        ));
    }

    let mut sections = partial.sections.unwrap_or_default();
    for section in &mut sections {
        repair_curvature(section);
    }
    check_unique_seat_ids(&sections)?;

    let name = match partial.name {
        Some(n) if !n.trim().is_empty() => n,
        _ => DEFAULT_NAME.to_string(),
    };
    let id = partial.id.filter(|id| !id.trim().is_empty()).unwrap_or_else(|| {
        let name_slug = slug(&name);
        if name_slug.is_empty() {
            format!("layout-{}", venue_id)
        } else {
            format!("layout-{}-{}", venue_id, name_slug)
        }
    });

    Ok(assemble(LayoutDraft {
        id,
        venue_id: venue_id.to_string(),
        name,
        layout_type: partial.layout_type.unwrap_or(LayoutType::SeatingChart),
        sections,
        stage: partial.stage,
        aisles: partial.aisles,
        view_box: partial.view_box,
        price_categories: partial.price_categories,
    }))
}

// Восстанавливает инвариант sectionType == curved <=> у всех рядов есть дуга.
// Секция, размеченная как кривая без полного набора дескрипторов,
// детерминированно приводится к прямой.
fn repair_curvature(section: &mut Section) {
    let has_params = section.curve_radius.is_some() && section.curve_angle.is_some();
    let all_rows_curved =
        !section.rows.is_empty() && section.rows.iter().all(|r| r.curve.is_some());

    if has_params && all_rows_curved {
        section.section_type = SectionType::Curved;
    } else {
        section.section_type = SectionType::Standard;
        section.curve_radius = None;
        section.curve_angle = None;
        for row in &mut section.rows {
            row.curve = None;
        }
    }
}

fn check_unique_seat_ids(sections: &[Section]) -> Result<(), EditorError> {
    let mut ids: Vec<&str> = sections
        .iter()
        .flat_map(|sec| sec.rows.iter())
        .flat_map(|row| row.seats.iter().map(|s| s.id.as_str()))
        .collect();
    ids.sort_unstable();
    for pair in ids.windows(2) {
        if pair[0] == pair[1] {
            return Err(EditorError::MalformedInput(format!(
                "дубликат id места: {}",
                pair[0]
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::templates::{generate_sections, VenueType};

    fn edited(sections: Vec<Section>) -> PartialLayout {
        PartialLayout {
            name: Some("Main Hall".to_string()),
            sections: Some(sections),
            ..PartialLayout::default()
        }
    }

    #[test]
    fn normalization_fills_every_required_field() {
        let layout = normalize(
            edited(generate_sections(VenueType::Theater, None).unwrap()),
            "venue-7",
        )
        .unwrap();

        assert_eq!(layout.id, "layout-venue-7-main-hall");
        assert_eq!(layout.venue_id, "venue-7");
        assert_eq!(layout.layout_type, LayoutType::SeatingChart);
        assert_eq!(layout.stage.stage_type, "stage");
        assert!(layout.aisles.is_empty());
        assert!(layout.capacity > 0);
    }

    #[test]
    fn normalization_is_byte_identical_on_repeat() {
        let partial = edited(generate_sections(VenueType::Club, None).unwrap());
        let a = normalize(partial.clone(), "v1").unwrap();
        let b = normalize(partial, "v1").unwrap();
        assert_eq!(
            serde_json::to_vec(&a).unwrap(),
            serde_json::to_vec(&b).unwrap()
        );
    }

    #[test]
    fn missing_venue_id_is_rejected() {
        let err = normalize(PartialLayout::default(), "  ").unwrap_err();
        assert!(matches!(err, EditorError::MalformedInput(_)));
    }

    #[test]
    fn duplicate_seat_ids_are_rejected() {
        let mut sections = generate_sections(VenueType::Generic, None).unwrap();
        let dup = sections[0].rows[0].seats[0].id.clone();
        sections[0].rows[1].seats[0].id = dup;

        let err = normalize(edited(sections), "v1").unwrap_err();
        assert!(matches!(err, EditorError::MalformedInput(_)));
    }

    #[test]
    fn supplied_capacity_is_ignored_and_recomputed() {
        let mut partial = edited(generate_sections(VenueType::Generic, None).unwrap());
        partial.capacity = Some(999_999);
        let layout = normalize(partial, "v1").unwrap();
        assert_eq!(layout.capacity, 500);
    }

    #[test]
    fn half_curved_section_is_demoted_to_standard() {
        let mut sections = generate_sections(VenueType::Theater, None).unwrap();
        // Mezzanine кривая; сломаем один ряд
        sections[1].rows[0].curve = None;

        let layout = normalize(edited(sections), "v1").unwrap();
        let mezzanine = &layout.sections[1];
        assert_eq!(mezzanine.section_type, SectionType::Standard);
        assert!(mezzanine.curve_radius.is_none());
        assert!(mezzanine.rows.iter().all(|r| r.curve.is_none()));
        assert!(mezzanine.curvature_consistent());
    }

    #[test]
    fn intact_curved_sections_stay_curved() {
        let sections = generate_sections(VenueType::Stadium, None).unwrap();
        let layout = normalize(edited(sections), "v1").unwrap();
        assert!(layout
            .sections
            .iter()
            .all(|s| s.section_type == SectionType::Curved && s.curvature_consistent()));
    }

    #[test]
    fn general_admission_keeps_its_discriminator() {
        let partial = PartialLayout {
            name: Some("Standing Room".to_string()),
            layout_type: Some(LayoutType::GeneralAdmission),
            ..PartialLayout::default()
        };
        let layout = normalize(partial, "v1").unwrap();
        assert_eq!(layout.layout_type, LayoutType::GeneralAdmission);
        assert_eq!(layout.capacity, 0);
        assert!(layout.sections.is_empty());
    }

    #[test]
    fn explicit_id_wins_over_derivation() {
        let partial = PartialLayout {
            id: Some("layout-custom".to_string()),
            ..PartialLayout::default()
        };
        let layout = normalize(partial, "v1").unwrap();
        assert_eq!(layout.id, "layout-custom");
        assert_eq!(layout.name, "Untitled Layout");
    }
}

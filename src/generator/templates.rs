use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{PricingTier, Section, SectionType};

use super::rows::{generate_rows_with, RowGeometry};
use super::GeneratorError;

/// Закрытый набор архетипов площадки. Неизвестные строки не являются
/// ошибкой — на границе запроса они сводятся к `Generic` с записью в лог.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VenueType {
    Theater,
    Arena,
    Stadium,
    Club,
    Generic,
}

impl VenueType {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "theater" | "theatre" => Some(Self::Theater),
            "arena" => Some(Self::Arena),
            "stadium" => Some(Self::Stadium),
            "club" => Some(Self::Club),
            "generic" => Some(Self::Generic),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Theater => "theater",
            Self::Arena => "arena",
            Self::Stadium => "stadium",
            Self::Club => "club",
            Self::Generic => "generic",
        }
    }
}

// Шаблон секции: буквальные якорные координаты и размеры, без решателя —
// «пригодный результат сразу» важнее точного попадания в capacity
struct SectionTemplate {
    name: &'static str,
    x: f64,
    y: f64,
    rotation: f64,
    rows: i64,
    seats_per_row: i64,
    curved: bool,
    base_radius: f64,
    arc_span: f64,
    tier: PricingTier,
}

const fn straight(
    name: &'static str,
    x: f64,
    y: f64,
    rows: i64,
    seats_per_row: i64,
    tier: PricingTier,
) -> SectionTemplate {
    SectionTemplate {
        name,
        x,
        y,
        rotation: 0.0,
        rows,
        seats_per_row,
        curved: false,
        base_radius: 0.0,
        arc_span: 0.0,
        tier,
    }
}

const fn curved(
    name: &'static str,
    x: f64,
    y: f64,
    rotation: f64,
    rows: i64,
    seats_per_row: i64,
    base_radius: f64,
    arc_span: f64,
    tier: PricingTier,
) -> SectionTemplate {
    SectionTemplate {
        name,
        x,
        y,
        rotation,
        rows,
        seats_per_row,
        curved: true,
        base_radius,
        arc_span,
        tier,
    }
}

const THEATER: &[SectionTemplate] = &[
    straight("Orchestra", 0.0, 120.0, 15, 30, PricingTier::Premium),
    curved("Mezzanine", 0.0, 700.0, 0.0, 8, 34, 420.0, 70.0, PricingTier::Standard),
    curved("Balcony", 0.0, 1050.0, 0.0, 6, 38, 640.0, 80.0, PricingTier::Economy),
];

const ARENA: &[SectionTemplate] = &[
    straight("Floor", 0.0, 150.0, 12, 30, PricingTier::Premium),
    curved("North Stand", 0.0, 650.0, 0.0, 10, 24, 380.0, 60.0, PricingTier::Standard),
    curved("South Stand", 0.0, -650.0, 180.0, 10, 24, 380.0, 60.0, PricingTier::Standard),
    curved("East Stand", 650.0, 0.0, 90.0, 10, 20, 380.0, 50.0, PricingTier::Economy),
    curved("West Stand", -650.0, 0.0, 270.0, 10, 20, 380.0, 50.0, PricingTier::Economy),
];

const STADIUM: &[SectionTemplate] = &[
    curved("Lower Bowl", 0.0, 400.0, 0.0, 25, 40, 500.0, 110.0, PricingTier::Premium),
    curved("Club Level", 0.0, 1400.0, 0.0, 8, 30, 950.0, 90.0, PricingTier::Vip),
    curved("Upper Bowl", 0.0, 1750.0, 0.0, 20, 45, 1250.0, 120.0, PricingTier::Economy),
];

const CLUB: &[SectionTemplate] = &[
    straight("Front Floor", 0.0, 80.0, 5, 12, PricingTier::Vip),
    straight("Back Floor", 0.0, 280.0, 8, 16, PricingTier::Standard),
    curved("Mezzanine", 0.0, 600.0, 0.0, 4, 20, 260.0, 70.0, PricingTier::Premium),
];

const GENERIC: &[SectionTemplate] = &[
    straight("Main Section", 0.0, 100.0, 20, 25, PricingTier::Standard),
];

fn templates(venue_type: VenueType) -> &'static [SectionTemplate] {
    match venue_type {
        VenueType::Theater => THEATER,
        VenueType::Arena => ARENA,
        VenueType::Stadium => STADIUM,
        VenueType::Club => CLUB,
        VenueType::Generic => GENERIC,
    }
}

/// Устойчивый идентификатор из человекочитаемого имени ("Main Section" -> "main-section").
pub fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_dash = true;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch.to_ascii_lowercase());
            prev_dash = false;
        } else if !prev_dash {
            out.push('-');
            prev_dash = true;
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}

/// Разворачивает архетип площадки в упорядоченный набор секций с местами.
///
/// `capacity_hint` — только совещательный вход: шаблоны статичны, а
/// авторитетную вместимость считает агрегатор по фактическим местам.
pub fn generate_sections(
    venue_type: VenueType,
    capacity_hint: Option<i64>,
) -> Result<Vec<Section>, GeneratorError> {
    if let Some(hint) = capacity_hint {
        if hint < 0 {
            return Err(GeneratorError::InvalidCapacityHint(hint));
        }
    }

    let mut sections = Vec::new();
    for tpl in templates(venue_type) {
        let section_id = slug(tpl.name);

        let geom = RowGeometry {
            base_radius: tpl.base_radius,
            arc_start: -tpl.arc_span / 2.0,
            arc_end: tpl.arc_span / 2.0,
            ..RowGeometry::default()
        };
        let mut rows = generate_rows_with(tpl.rows, tpl.seats_per_row, tpl.curved, &geom)?;

        // Префикс секции делает id мест уникальными в пределах всего макета
        for row in &mut rows {
            for seat in &mut row.seats {
                seat.id = format!("{}-{}", section_id, seat.id);
            }
        }

        sections.push(Section {
            id: section_id,
            name: tpl.name.to_string(),
            x: tpl.x,
            y: tpl.y,
            rotation: tpl.rotation,
            curve_radius: tpl.curved.then_some(tpl.base_radius),
            curve_angle: tpl.curved.then_some(tpl.arc_span),
            rows,
            pricing: tpl.tier,
            section_type: if tpl.curved {
                SectionType::Curved
            } else {
                SectionType::Standard
            },
        });
    }

    if let Some(hint) = capacity_hint {
        let yielded: usize = sections.iter().map(|s| s.seat_count()).sum();
        debug!(
            "venue template {} yielded {} seats (capacity hint was {})",
            venue_type.as_str(),
            yielded,
            hint
        );
    }

    Ok(sections)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theater_matches_the_classic_three_sections() {
        let sections = generate_sections(VenueType::Theater, None).unwrap();
        let names: Vec<_> = sections.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Orchestra", "Mezzanine", "Balcony"]);

        let orchestra = &sections[0];
        assert_eq!(orchestra.rows.len(), 15);
        assert_eq!(orchestra.seat_count(), 450);
        assert_eq!(orchestra.section_type, SectionType::Standard);
        assert!(orchestra.curve_radius.is_none());

        assert_eq!(sections[1].section_type, SectionType::Curved);
        assert_eq!(sections[2].section_type, SectionType::Curved);
    }

    #[test]
    fn generic_is_a_single_main_section() {
        let sections = generate_sections(VenueType::Generic, None).unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].name, "Main Section");
        assert_eq!(sections[0].id, "main-section");
        assert_eq!(sections[0].rows.len(), 20);
        assert_eq!(sections[0].seat_count(), 500);
        assert_eq!(sections[0].section_type, SectionType::Standard);
    }

    #[test]
    fn unknown_venue_strings_do_not_parse() {
        assert_eq!(VenueType::parse("unknown-value"), None);
        assert_eq!(VenueType::parse("THEATER"), Some(VenueType::Theater));
        assert_eq!(VenueType::parse("  stadium "), Some(VenueType::Stadium));
    }

    #[test]
    fn every_archetype_honors_the_curvature_invariant() {
        for venue in [
            VenueType::Theater,
            VenueType::Arena,
            VenueType::Stadium,
            VenueType::Club,
            VenueType::Generic,
        ] {
            let sections = generate_sections(venue, None).unwrap();
            assert!(!sections.is_empty());
            for section in &sections {
                assert!(
                    section.curvature_consistent(),
                    "{} / {} breaks the curvature invariant",
                    venue.as_str(),
                    section.name
                );
            }
        }
    }

    #[test]
    fn seat_ids_are_unique_across_sections() {
        let sections = generate_sections(VenueType::Arena, None).unwrap();
        let mut ids: Vec<_> = sections
            .iter()
            .flat_map(|sec| sec.rows.iter())
            .flat_map(|row| row.seats.iter().map(|s| s.id.clone()))
            .collect();
        let before = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), before);
    }

    #[test]
    fn negative_capacity_hint_is_malformed() {
        assert!(matches!(
            generate_sections(VenueType::Theater, Some(-5)),
            Err(GeneratorError::InvalidCapacityHint(-5))
        ));
    }

    #[test]
    fn slugs_are_stable_and_url_safe() {
        assert_eq!(slug("Main Section"), "main-section");
        assert_eq!(slug("  North   Stand "), "north-stand");
        assert_eq!(slug("Balcony"), "balcony");
    }
}

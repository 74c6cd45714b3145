use crate::geometry;
use crate::models::{RowCurve, Seat, SeatRow, SeatStatus, SeatType};

use super::GeneratorError;

/// Геометрия раскладки рядов. Значения в логических пикселях макета.
#[derive(Debug, Clone)]
pub struct RowGeometry {
    pub seat_spacing: f64,
    pub row_spacing: f64,
    /// Базовый радиус первого кривого ряда.
    pub base_radius: f64,
    /// Угловой диапазон дуги, общий для всех рядов одного вызова.
    pub arc_start: f64,
    pub arc_end: f64,
}

impl Default for RowGeometry {
    fn default() -> Self {
        Self {
            seat_spacing: 30.0,
            row_spacing: 35.0,
            base_radius: 300.0,
            arc_start: -45.0,
            arc_end: 45.0,
        }
    }
}

/// Строит упорядоченные ряды мест: `row_count` рядов по `seats_per_row` мест.
///
/// Генерация полностью детерминирована: одинаковые входы дают одинаковые
/// ряды, что позволяет идемпотентно перегенерировать макет. Нулевые размеры —
/// не ошибка, а пустая последовательность; отрицательные отклоняются до
/// какой-либо генерации.
pub fn generate_rows(
    row_count: i64,
    seats_per_row: i64,
    curved: bool,
) -> Result<Vec<SeatRow>, GeneratorError> {
    generate_rows_with(row_count, seats_per_row, curved, &RowGeometry::default())
}

pub fn generate_rows_with(
    row_count: i64,
    seats_per_row: i64,
    curved: bool,
    geom: &RowGeometry,
) -> Result<Vec<SeatRow>, GeneratorError> {
    // Отклоняем и отрицательные размеры, и то, что не помещается в u32:
    // молчаливое усечение дало бы меньше рядов, чем запрошено
    let out_of_range = |v: i64| v < 0 || v > u32::MAX as i64;
    if out_of_range(row_count) || out_of_range(seats_per_row) {
        return Err(GeneratorError::InvalidDimensions {
            rows: row_count,
            seats_per_row,
        });
    }

    let row_count = row_count as u32;
    let seats_per_row = seats_per_row as u32;

    let mut rows = Vec::with_capacity(row_count as usize);
    for r in 0..row_count {
        let label = geometry::row_label(r);

        let curve = curved.then(|| RowCurve {
            radius: geometry::curved_row_radius(geom.base_radius, r, geom.row_spacing),
            start_angle: geom.arc_start,
            end_angle: geom.arc_end,
        });

        let mut seats = Vec::with_capacity(seats_per_row as usize);
        for s in 0..seats_per_row {
            // Первое и последнее место каждого ряда — для колясок
            let wheelchair = s == 0 || s == seats_per_row - 1;
            let angle = curved
                .then(|| geometry::seat_angle(geom.arc_start, geom.arc_end, s, seats_per_row));

            seats.push(Seat {
                id: format!("{}{}", label, s + 1),
                row: label.clone(),
                number: s + 1,
                x: s as f64 * geom.seat_spacing,
                y: r as f64 * geom.row_spacing,
                angle,
                price: None,
                category: None,
                status: SeatStatus::Available,
                seat_type: if wheelchair {
                    SeatType::Wheelchair
                } else {
                    SeatType::Regular
                },
                accessible: wheelchair,
            });
        }

        rows.push(SeatRow {
            label,
            seats,
            curve,
        });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn zero_rows_is_empty_not_an_error() {
        assert!(generate_rows(0, 10, false).unwrap().is_empty());
    }

    #[test]
    fn zero_seats_yields_empty_rows() {
        let rows = generate_rows(4, 0, false).unwrap();
        assert_eq!(rows.len(), 4);
        assert!(rows.iter().all(|r| r.seats.is_empty()));
    }

    #[test]
    fn negative_dimensions_are_rejected() {
        assert!(matches!(
            generate_rows(-1, 10, false),
            Err(GeneratorError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            generate_rows(5, -3, true),
            Err(GeneratorError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn dimensions_beyond_u32_are_rejected_not_truncated() {
        let too_big = u32::MAX as i64 + 1;
        assert!(matches!(
            generate_rows(too_big, 0, false),
            Err(GeneratorError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            generate_rows(1, too_big, false),
            Err(GeneratorError::InvalidDimensions { .. })
        ));
        // граница включительно остаётся валидной по типу
        assert!(generate_rows(0, u32::MAX as i64, false).is_ok());
    }

    #[test]
    fn labels_and_coordinates_follow_the_grid() {
        let rows = generate_rows(3, 4, false).unwrap();
        assert_eq!(rows[0].label, "A");
        assert_eq!(rows[2].label, "C");

        let seat = &rows[2].seats[3];
        assert_eq!(seat.id, "C4");
        assert_eq!(seat.number, 4);
        assert_eq!(seat.x, 3.0 * 30.0);
        assert_eq!(seat.y, 2.0 * 35.0);
        assert_eq!(seat.status, SeatStatus::Available);
    }

    #[test]
    fn single_seat_row_is_accessible() {
        let rows = generate_rows(1, 1, false).unwrap();
        let seat = &rows[0].seats[0];
        assert!(seat.accessible);
        assert_eq!(seat.seat_type, SeatType::Wheelchair);
    }

    #[test]
    fn straight_rows_carry_no_curve() {
        let rows = generate_rows(5, 8, false).unwrap();
        assert!(rows.iter().all(|r| r.curve.is_none()));
        assert!(rows.iter().flat_map(|r| &r.seats).all(|s| s.angle.is_none()));
    }

    #[test]
    fn curved_rows_step_radius_linearly() {
        let rows = generate_rows(4, 6, true).unwrap();
        for (i, row) in rows.iter().enumerate() {
            let curve = row.curve.as_ref().expect("curved row without descriptor");
            assert_eq!(curve.radius, 300.0 + i as f64 * 35.0);
            assert_eq!(curve.start_angle, -45.0);
            assert_eq!(curve.end_angle, 45.0);
        }
        // углы мест покрывают дугу от края до края
        let first = &rows[0].seats[0];
        let last = &rows[0].seats[5];
        assert_eq!(first.angle, Some(-45.0));
        assert_eq!(last.angle, Some(45.0));
    }

    #[test]
    fn generation_is_deterministic() {
        let a = generate_rows(12, 20, true).unwrap();
        let b = generate_rows(12, 20, true).unwrap();
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn row_and_seat_counts_hold(rows in 0i64..60, seats in 0i64..60) {
            let generated = generate_rows(rows, seats, false).unwrap();
            prop_assert_eq!(generated.len() as i64, rows);
            for row in &generated {
                prop_assert_eq!(row.seats.len() as i64, seats);
            }
            let total: usize = generated.iter().map(|r| r.seats.len()).sum();
            prop_assert_eq!(total as i64, rows * seats);
        }

        #[test]
        fn only_row_ends_are_accessible(rows in 1i64..40, seats in 1i64..40) {
            let generated = generate_rows(rows, seats, false).unwrap();
            for row in &generated {
                for (i, seat) in row.seats.iter().enumerate() {
                    let expected = i == 0 || i == row.seats.len() - 1;
                    prop_assert_eq!(seat.accessible, expected);
                    prop_assert_eq!(seat.seat_type == SeatType::Wheelchair, expected);
                }
            }
        }

        #[test]
        fn seat_ids_are_unique_within_a_call(rows in 0i64..30, seats in 0i64..30) {
            let generated = generate_rows(rows, seats, true).unwrap();
            let mut ids: Vec<_> = generated
                .iter()
                .flat_map(|r| r.seats.iter().map(|s| s.id.clone()))
                .collect();
            let before = ids.len();
            ids.sort();
            ids.dedup();
            prop_assert_eq!(ids.len(), before);
        }
    }
}

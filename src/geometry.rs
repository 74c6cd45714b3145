//! Геометрические примитивы генерации: метки рядов, шаг радиуса для
//! кривых рядов, повороты. Чистые функции без побочных эффектов.

/// Метка ряда по индексу: 0 -> "A", 25 -> "Z".
///
/// Для индексов от 26 действует явная «табличная» политика:
/// 26 -> "AA", 27 -> "AB", 51 -> "AZ", 52 -> "BA" и так далее.
pub fn row_label(index: u32) -> String {
    let mut n = index as i64;
    let mut label = Vec::new();
    loop {
        label.push(b'A' + (n % 26) as u8);
        n = n / 26 - 1;
        if n < 0 {
            break;
        }
    }
    label.reverse();
    // label состоит только из ASCII-букв
    String::from_utf8(label).unwrap_or_default()
}

/// Радиус кривого ряда растёт линейно от базового радиуса секции.
pub fn curved_row_radius(base: f64, row_index: u32, row_spacing: f64) -> f64 {
    base + row_index as f64 * row_spacing
}

/// Поворот точки вокруг начала координат на угол в градусах.
pub fn rotate_point(x: f64, y: f64, degrees: f64) -> (f64, f64) {
    let rad = degrees.to_radians();
    let (sin, cos) = rad.sin_cos();
    (x * cos - y * sin, x * sin + y * cos)
}

/// Точка на дуге радиуса `radius` под углом `degrees` (0° — вдоль оси X).
pub fn arc_point(radius: f64, degrees: f64) -> (f64, f64) {
    let rad = degrees.to_radians();
    (radius * rad.cos(), radius * rad.sin())
}

/// Угол места с индексом `index` из `count` мест, равномерно
/// распределённых по дуге [start, end]. Единственное место садится в середину.
pub fn seat_angle(start: f64, end: f64, index: u32, count: u32) -> f64 {
    if count <= 1 {
        return (start + end) / 2.0;
    }
    start + (end - start) * index as f64 / (count - 1) as f64
}

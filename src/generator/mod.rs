//! Генерация макетов по архетипу площадки и граница запроса генерации.
//!
//! Сбои генерации не покидают эту границу: клиент всегда получает
//! корректный по форме ответ, в худшем случае пустой
//! (`sections: [], totalCapacity: 0, configuration: {}`).

pub mod rows;
pub mod templates;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};
use validator::Validate;

use crate::layout::aggregator;
use crate::models::{LayoutType, Section};

use templates::VenueType;

pub const CONFIGURATION_VERSION: &str = "1.0";

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("недопустимые размеры: {rows} рядов x {seats_per_row} мест")]
    InvalidDimensions { rows: i64, seats_per_row: i64 },
    #[error("некорректная подсказка вместимости: {0}")]
    InvalidCapacityHint(i64),
}

// Запрос генерации из админки
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenerateLayoutRequest {
    #[serde(rename = "venueName")]
    #[validate(length(min = 1))]
    pub venue_name: String,
    #[serde(rename = "venueType")]
    pub venue_type: String,
    #[validate(range(min = 0))]
    pub capacity: Option<i64>,
    #[serde(rename = "layoutType")]
    pub layout_type: Option<LayoutType>,
}

// Все поля опциональны: у пустого ответа configuration сериализуется как {}
#[derive(Debug, Default, Serialize)]
pub struct GenerationConfiguration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(rename = "generatedFor", skip_serializing_if = "Option::is_none")]
    pub generated_for: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub layout_type: Option<LayoutType>,
}

#[derive(Debug, Serialize)]
pub struct GenerateLayoutResponse {
    pub sections: Vec<Section>,
    #[serde(rename = "totalCapacity")]
    pub total_capacity: u64,
    pub configuration: GenerationConfiguration,
}

impl GenerateLayoutResponse {
    /// Пустой, но корректный по форме ответ — деградация вместо ошибки.
    pub fn empty() -> Self {
        Self {
            sections: Vec::new(),
            total_capacity: 0,
            configuration: GenerationConfiguration::default(),
        }
    }
}

/// Разворачивает запрос генерации в набор секций с итоговой вместимостью.
///
/// Неизвестный тип площадки — не ошибка: пишем notice в лог и откатываемся
/// на generic-шаблон. Любой внутренний сбой превращается в пустой ответ,
/// чтобы клиент никогда не увидел наполовину построенный макет.
pub fn generate_configuration(req: &GenerateLayoutRequest) -> GenerateLayoutResponse {
    if let Err(e) = req.validate() {
        warn!("generation request rejected by validation: {}", e);
        return GenerateLayoutResponse::empty();
    }

    let venue_type = VenueType::parse(&req.venue_type).unwrap_or_else(|| {
        info!(
            "unknown venue type '{}', falling back to generic template",
            req.venue_type
        );
        VenueType::Generic
    });

    match templates::generate_sections(venue_type, req.capacity) {
        Ok(sections) => {
            let total_capacity = aggregator::capacity(&sections);
            GenerateLayoutResponse {
                sections,
                total_capacity,
                configuration: GenerationConfiguration {
                    version: Some(CONFIGURATION_VERSION.to_string()),
                    generated_for: Some(req.venue_name.clone()),
                    layout_type: Some(req.layout_type.unwrap_or(LayoutType::SeatingChart)),
                },
            }
        }
        Err(e) => {
            warn!("layout generation failed: {}", e);
            GenerateLayoutResponse::empty()
        }
    }
}

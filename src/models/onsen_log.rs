// ============================================================================
// ONSEN LOG - Registro de visita a un onsen
// ============================================================================

use std::collections::BTreeSet;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use crate::models::onsen_image::OnsenImage;

pub const MIN_RATING: u8 = 0;
pub const MAX_RATING: u8 = 5;

pub const SPRING_TYPES: &[&str] = &[
    "単純温泉",
    "塩化物泉",
    "炭酸水素塩泉",
    "硫酸塩泉",
    "二酸化炭素泉",
    "含鉄泉",
    "酸性泉",
    "含よう素泉",
    "硫黄泉",
    "放射能泉",
    "その他",
];

pub const FEATURES: &[&str] = &[
    "露天風呂",
    "貸切風呂",
    "岩風呂",
    "檜風呂",
    "混浴",
    "日帰り入浴",
    "温泉街",
    "秘湯",
    "景色が良い",
    "食事が美味しい",
];

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct OnsenLog {
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    pub name: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub spring_type: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub features: BTreeSet<String>,
    #[serde(with = "visit_date_format")]
    pub visit_date: NaiveDate,
    #[serde(default, deserialize_with = "clamped_rating")]
    pub rating: Option<u8>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<OnsenImage>,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct OnsenLogCreateRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub spring_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    pub visit_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct OnsenLogUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spring_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visit_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Página devuelta por GET /onsen_logs
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct OnsenLogPage {
    // Obligatorio: distingue una página de un objeto cualquiera
    #[serde(deserialize_with = "null_as_default")]
    pub onsen_logs: Vec<OnsenLog>,
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
}

/// El endpoint de listado puede devolver una página o un array plano
#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum OnsenLogListBody {
    Page(OnsenLogPage),
    Bare(Vec<OnsenLog>),
}

impl OnsenLogListBody {
    pub fn into_page(self, page: u32, limit: u32) -> OnsenLogPage {
        match self {
            OnsenLogListBody::Page(mut p) => {
                if p.page == 0 {
                    p.page = page;
                }
                if p.limit == 0 {
                    p.limit = limit;
                }
                p
            }
            OnsenLogListBody::Bare(logs) => OnsenLogPage {
                total_count: logs.len() as u64,
                onsen_logs: logs,
                page,
                limit,
            },
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    VisitDate,
    Rating,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::VisitDate => "visit_date",
            SortField::Rating => "rating",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

#[derive(Clone, PartialEq, Debug, Default)]
pub struct OnsenLogFilter {
    pub keyword: Option<String>,
    pub name: Option<String>,
    pub location: Option<String>,
    pub spring_type: Option<String>,
    pub min_rating: Option<u8>,
    pub max_rating: Option<u8>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Clone, PartialEq, Debug)]
pub struct ListQuery {
    pub page: u32,
    pub limit: u32,
    pub sort_by: Option<SortField>,
    pub sort_direction: Option<SortDirection>,
    pub filter: OnsenLogFilter,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            sort_by: None,
            sort_direction: None,
            filter: OnsenLogFilter::default(),
        }
    }
}

impl ListQuery {
    /// Parámetros de query; los valores vacíos se omiten
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.limit.to_string()),
        ];
        if let Some(field) = self.sort_by {
            params.push(("sort_by".to_string(), field.as_str().to_string()));
        }
        if let Some(direction) = self.sort_direction {
            params.push(("sort_direction".to_string(), direction.as_str().to_string()));
        }

        let f = &self.filter;
        let text = [
            ("keyword", &f.keyword),
            ("name", &f.name),
            ("location", &f.location),
            ("spring_type", &f.spring_type),
        ];
        for (key, value) in text {
            if let Some(v) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
                params.push((key.to_string(), v.to_string()));
            }
        }
        if let Some(min) = f.min_rating {
            params.push(("min_rating".to_string(), min.to_string()));
        }
        if let Some(max) = f.max_rating {
            params.push(("max_rating".to_string(), max.to_string()));
        }
        if let Some(start) = f.start_date {
            params.push(("start_date".to_string(), start.format("%Y-%m-%d").to_string()));
        }
        if let Some(end) = f.end_date {
            params.push(("end_date".to_string(), end.format("%Y-%m-%d").to_string()));
        }
        params
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            ExportFormat::Json => "onsen_logs.json",
            ExportFormat::Csv => "onsen_logs.csv",
        }
    }

    pub fn default_content_type(&self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Csv => "text/csv",
        }
    }
}

/// Archivo exportado listo para descargar
#[derive(Clone, PartialEq, Debug)]
pub struct ExportedFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Clampa una valoración al rango [0,5]; entradas no numéricas → 0
pub fn clamp_rating(input: &str) -> u8 {
    match input.trim().parse::<i64>() {
        Ok(v) => v.clamp(MIN_RATING as i64, MAX_RATING as i64) as u8,
        Err(_) => match input.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => v.trunc().clamp(MIN_RATING as f64, MAX_RATING as f64) as u8,
            _ => MIN_RATING,
        },
    }
}

pub fn parse_visit_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive())
}

/// visit_date: se envía como YYYY-MM-DD, se acepta también RFC 3339
pub mod visit_date_format {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format("%Y-%m-%d").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_visit_date(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid visit_date: {}", raw)))
    }
}

fn empty_as_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn clamped_rating<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u8>, D::Error> {
    let value = Option::<i64>::deserialize(deserializer)?;
    Ok(value.map(|v| v.clamp(MIN_RATING as i64, MAX_RATING as i64) as u8))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json(visit_date: &str) -> String {
        format!(
            r#"{{
                "id": "abc",
                "user_id": "u1",
                "name": "草津温泉",
                "location": "群馬県",
                "spring_type": "酸性泉",
                "features": ["露天風呂", "温泉街", "露天風呂"],
                "visit_date": "{}",
                "rating": 4,
                "comment": "",
                "created_at": "2024-05-01T10:00:00Z",
                "updated_at": "2024-05-01T10:00:00Z",
                "images": null
            }}"#,
            visit_date
        )
    }

    #[test]
    fn visit_date_accepts_plain_and_rfc3339() {
        let plain: OnsenLog = serde_json::from_str(&sample_json("2024-04-30")).unwrap();
        let full: OnsenLog = serde_json::from_str(&sample_json("2024-04-30T00:00:00Z")).unwrap();
        assert_eq!(plain.visit_date, NaiveDate::from_ymd_opt(2024, 4, 30).unwrap());
        assert_eq!(plain.visit_date, full.visit_date);

        let out = serde_json::to_value(&plain).unwrap();
        assert_eq!(out["visit_date"], "2024-04-30");
    }

    #[test]
    fn decoding_normalizes_optional_fields() {
        let log: OnsenLog = serde_json::from_str(&sample_json("2024-04-30")).unwrap();
        assert_eq!(log.features.len(), 2);
        assert!(log.comment.is_none());
        assert!(log.images.is_empty());
        assert_eq!(log.rating, Some(4));
    }

    #[test]
    fn decoding_clamps_out_of_range_rating() {
        let json = sample_json("2024-04-30").replace("\"rating\": 4", "\"rating\": 9");
        let log: OnsenLog = serde_json::from_str(&json).unwrap();
        assert_eq!(log.rating, Some(5));
    }

    #[test]
    fn clamp_rating_bounds() {
        assert_eq!(clamp_rating("7"), 5);
        assert_eq!(clamp_rating("-2"), 0);
        assert_eq!(clamp_rating("3"), 3);
        assert_eq!(clamp_rating("4.7"), 4);
        assert_eq!(clamp_rating("abc"), 0);
        assert_eq!(clamp_rating(""), 0);
    }

    #[test]
    fn list_query_omits_empty_values() {
        let query = ListQuery {
            page: 2,
            limit: 10,
            sort_by: Some(SortField::Rating),
            sort_direction: Some(SortDirection::Asc),
            filter: OnsenLogFilter {
                keyword: Some("  ".to_string()),
                location: Some("箱根".to_string()),
                min_rating: Some(3),
                start_date: NaiveDate::from_ymd_opt(2024, 1, 1),
                ..Default::default()
            },
        };
        let params = query.to_params();
        let keys: Vec<&str> = params.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(
            keys,
            vec!["page", "limit", "sort_by", "sort_direction", "location", "min_rating", "start_date"]
        );
        assert!(params.contains(&("start_date".to_string(), "2024-01-01".to_string())));
        assert!(params.contains(&("sort_by".to_string(), "rating".to_string())));
    }

    #[test]
    fn list_body_accepts_page_or_bare_array() {
        let page: OnsenLogListBody = serde_json::from_str(
            r#"{"onsen_logs": [], "total_count": 12, "page": 2, "limit": 10}"#,
        ).unwrap();
        assert_eq!(page.into_page(1, 10).total_count, 12);

        let bare: OnsenLogListBody =
            serde_json::from_str(&format!("[{}]", sample_json("2024-04-30"))).unwrap();
        let page = bare.into_page(1, 10);
        assert_eq!(page.onsen_logs.len(), 1);
        assert_eq!(page.total_count, 1);
        assert_eq!(page.page, 1);
    }
}

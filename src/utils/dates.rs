use chrono::{Datelike, Duration, Local, NaiveDate};

use crate::utils::constants::{DATE_FORMAT, SERVER_DATE_FORMATS};

/// Fecha local de hoy
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Lunes..domingo de la semana de `reference`, desplazada `offset` semanas
pub fn week_dates(reference: NaiveDate, offset: i64) -> Vec<NaiveDate> {
    let monday = reference
        - Duration::days(reference.weekday().num_days_from_monday() as i64)
        + Duration::weeks(offset);
    (0..7).map(|day| monday + Duration::days(day)).collect()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Acepta `YYYY/MM/DD` y `YYYY-MM-DD` (según la versión del backend)
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    SERVER_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value.trim(), format).ok())
}

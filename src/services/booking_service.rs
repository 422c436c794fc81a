// ============================================================================
// BOOKING SERVICE - Semana de slots y reservas
// ============================================================================
// - get_week: respuesta compacta del API -> WeekGrid normalizado
// - book/unbook: matched_count == 0 se convierte en SlotConflict
// ============================================================================

use crate::error::{ApiError, ApiResult};
use crate::models::{BookingResult, SlotId, WeekGrid};
use crate::services::api_client::ApiClient;
use crate::services::http::{DefaultTransport, HttpTransport};
use crate::state::SessionState;
use crate::utils::constants::slot_time;
use crate::utils::dates::parse_date;

pub struct BookingService<T: HttpTransport = DefaultTransport> {
    api: ApiClient<T>,
}

impl<T: HttpTransport> Clone for BookingService<T> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
        }
    }
}

impl<T: HttpTransport> BookingService<T> {
    pub fn new(api: ApiClient<T>) -> Self {
        Self { api }
    }

    pub fn session(&self) -> &SessionState {
        self.api.session()
    }

    /// Semana a `offset` semanas de la actual (0 = actual)
    pub async fn get_week(&self, offset: i64) -> ApiResult<WeekGrid> {
        let raw = self.api.get_week(offset).await?;
        let grid = WeekGrid::from_raw(raw)?;
        log::info!(
            "📅 [BOOKING] Semana {} cargada: {} días, {} slots",
            offset,
            grid.len(),
            grid.slots().count()
        );
        Ok(grid)
    }

    pub async fn book_slot(&self, date: &str, slot_id: SlotId) -> ApiResult<BookingResult> {
        validate_target(date, slot_id)?;
        let result = self.api.book_slot(date, slot_id).await?;
        ensure_matched(result, date, slot_id)
    }

    pub async fn unbook_slot(&self, date: &str, slot_id: SlotId) -> ApiResult<BookingResult> {
        validate_target(date, slot_id)?;
        let result = self.api.unbook_slot(date, slot_id).await?;
        ensure_matched(result, date, slot_id)
    }
}

fn validate_target(date: &str, slot_id: SlotId) -> ApiResult<()> {
    if parse_date(date).is_none() {
        return Err(ApiError::Invalid(format!("Invalid date: {}", date)));
    }
    if slot_time(slot_id).is_none() {
        return Err(ApiError::Invalid(format!("Unknown slot id: {}", slot_id)));
    }
    Ok(())
}

fn ensure_matched(result: BookingResult, date: &str, slot_id: SlotId) -> ApiResult<BookingResult> {
    if result.matched() {
        return Ok(result);
    }
    log::warn!(
        "⚠️ [BOOKING] matched_count=0 para {} slot {}: el slot ya no estaba disponible",
        date,
        slot_id
    );
    Err(ApiError::SlotConflict {
        date: date.to_string(),
        slot_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Slot, SlotStatus};
    use crate::services::http::testing::MockTransport;
    use crate::services::token_storage::TokenStorageService;

    fn service() -> (BookingService<MockTransport>, MockTransport) {
        let transport = MockTransport::new();
        let session = SessionState::new(TokenStorageService::in_memory());
        let api = ApiClient::new("http://localhost:8000", transport.clone(), session);
        (BookingService::new(api), transport)
    }

    #[tokio::test]
    async fn test_get_week_normalizes_statuses() {
        let (booking, transport) = service();
        transport.respond(200, r#"{"2023/01/16": {"0": 0, "1": 2}}"#);

        let grid = booking.get_week(0).await.unwrap();

        assert_eq!(grid.len(), 1);
        assert_eq!(grid.slots().count(), 2);
        assert_eq!(
            grid.get("2023/01/16", 0),
            Some(&Slot::new("2023/01/16", 0, SlotStatus::Unavailable))
        );
        assert_eq!(
            grid.get("2023/01/16", 1),
            Some(&Slot::new("2023/01/16", 1, SlotStatus::BookedByOther))
        );
    }

    #[tokio::test]
    async fn test_get_week_accepts_slot_records() {
        let (booking, transport) = service();
        transport.respond(
            200,
            r#"{"2023/01/16": {"3": {"date": "2023/01/16", "id": 3, "status": 3}}}"#,
        );

        let grid = booking.get_week(1).await.unwrap();
        assert_eq!(
            grid.get("2023/01/16", 3).map(|s| s.status),
            Some(SlotStatus::BookedByUser)
        );
    }

    #[tokio::test]
    async fn test_book_slot_zero_matches_is_conflict() {
        let (booking, transport) = service();
        transport.respond(
            200,
            r#"{"username":"alice","full_name":"","date":"2023/01/16","slot_id":0,"matched_count":0}"#,
        );

        let err = booking.book_slot("2023/01/16", 0).await.unwrap_err();
        assert_eq!(
            err,
            ApiError::SlotConflict {
                date: "2023/01/16".to_string(),
                slot_id: 0
            }
        );
    }

    #[tokio::test]
    async fn test_unbook_slot_success() {
        let (booking, transport) = service();
        transport.respond(
            200,
            r#"{"username":"alice","full_name":"Alice","date":"2023/01/16","slot_id":4,"matched_count":1}"#,
        );

        let result = booking.unbook_slot("2023/01/16", 4).await.unwrap();
        assert_eq!(result.slot_id, 4);
        assert_eq!(
            transport.last_request().unwrap().url,
            "http://localhost:8000/booking/unbook_slot"
        );
    }

    #[tokio::test]
    async fn test_rejects_unknown_slot_or_date() {
        let (booking, transport) = service();
        assert!(matches!(
            booking.book_slot("2023/01/16", 5).await,
            Err(ApiError::Invalid(_))
        ));
        assert!(matches!(
            booking.book_slot("16-01-2023", 0).await,
            Err(ApiError::Invalid(_))
        ));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_book_slot_accepts_dash_date() {
        let (booking, transport) = service();
        transport.respond(
            200,
            r#"{"username":"alice","full_name":"","date":"2023-01-16","slot_id":1,"matched_count":1}"#,
        );

        let result = booking.book_slot("2023-01-16", 1).await.unwrap();
        assert_eq!(result.date, "2023-01-16");
        assert_eq!(transport.requests().len(), 1);
    }
}

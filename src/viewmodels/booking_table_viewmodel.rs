// ============================================================================
// BOOKING TABLE VIEWMODEL - Grid semanal + acciones de reserva
// ============================================================================
// - Con sesión: carga la semana del API
// - Sin sesión: grid placeholder (todos los slots a 0)
// - Respuestas que llegan tras un login/logout o cambio de semana se descartan
// ============================================================================

use chrono::{Datelike, NaiveDate};

use crate::error::{ApiError, ApiResult};
use crate::models::{BookingResult, Slot, SlotId, SlotStatus, WeekGrid};
use crate::services::booking_service::BookingService;
use crate::services::http::{DefaultTransport, HttpTransport};
use crate::state::{ReactiveState, SubscriptionId};
use crate::utils::constants::{slot_ids, slot_time, DAYS_OF_WEEK};
use crate::utils::dates::{parse_date, today};
use crate::viewmodels::booking_slot_viewmodel::BookingSlotViewModel;

#[derive(Clone, PartialEq, Debug)]
pub struct DayHeader {
    pub name: &'static str,
    pub date: String,
}

/// Una fila del grid: misma franja horaria para todos los días
#[derive(Clone, PartialEq, Debug)]
pub struct SlotRow {
    pub time_label: String,
    pub cells: Vec<BookingSlotViewModel>,
}

#[derive(Clone, PartialEq, Debug)]
pub struct TableModel {
    pub offset: i64,
    pub grid: WeekGrid,
    pub loading: bool,
    pub error: Option<String>,
}

impl TableModel {
    pub fn placeholder(reference: NaiveDate, offset: i64) -> Self {
        Self {
            offset,
            grid: WeekGrid::placeholder(reference, offset),
            loading: false,
            error: None,
        }
    }

    pub fn headers(&self) -> Vec<DayHeader> {
        self.grid
            .dates()
            .into_iter()
            .map(|date| {
                let name = parse_date(&date)
                    .map(|d| DAYS_OF_WEEK[d.weekday().num_days_from_monday() as usize])
                    .unwrap_or("");
                DayHeader { name, date }
            })
            .collect()
    }

    /// Filas en el orden del horario; un slot ausente se muestra no disponible
    pub fn rows(&self) -> Vec<SlotRow> {
        let dates = self.grid.dates();
        slot_ids()
            .map(|id| SlotRow {
                time_label: slot_time(id).map(|t| t.label()).unwrap_or_default(),
                cells: dates
                    .iter()
                    .map(|date| {
                        let slot = self
                            .grid
                            .get(date, id)
                            .cloned()
                            .unwrap_or_else(|| Slot::new(date, id, SlotStatus::Unavailable));
                        BookingSlotViewModel::new(slot)
                    })
                    .collect(),
            })
            .collect()
    }
}

pub struct BookingTableViewModel<T: HttpTransport = DefaultTransport> {
    booking: BookingService<T>,
    state: ReactiveState<TableModel>,
    reference: NaiveDate,
}

impl<T: HttpTransport> Clone for BookingTableViewModel<T> {
    fn clone(&self) -> Self {
        Self {
            booking: self.booking.clone(),
            state: self.state.clone(),
            reference: self.reference,
        }
    }
}

impl<T: HttpTransport + 'static> BookingTableViewModel<T> {
    pub fn new(booking: BookingService<T>) -> Self {
        Self::with_reference(booking, today())
    }

    /// `reference` es el día que define la semana 0
    pub fn with_reference(booking: BookingService<T>, reference: NaiveDate) -> Self {
        Self {
            booking,
            state: ReactiveState::new(TableModel::placeholder(reference, 0)),
            reference,
        }
    }

    pub fn state(&self) -> &ReactiveState<TableModel> {
        &self.state
    }

    pub fn model(&self) -> TableModel {
        self.state.get()
    }

    /// Sigue la sesión: con sesión llama a `on_authenticated` (normalmente
    /// lanza `refresh`), sin sesión vuelve al placeholder.
    pub fn bind_session<F>(&self, on_authenticated: F) -> SubscriptionId
    where
        F: Fn(Self) + 'static,
    {
        let vm = self.clone();
        self.booking.session().subscribe(move |session| {
            if session.is_authenticated() {
                on_authenticated(vm.clone());
            } else {
                vm.reset();
            }
        })
    }

    pub fn reset(&self) {
        let offset = self.state.get().offset;
        log::info!("🧹 [TABLE] Reset a placeholder (offset={})", offset);
        self.state.set(TableModel::placeholder(self.reference, offset));
    }

    /// Recarga la semana actual. El grid se reemplaza entero.
    pub async fn refresh(&self) {
        let session = self.booking.session();
        if !session.is_authenticated() {
            self.reset();
            return;
        }

        let epoch = session.epoch();
        let offset = self.state.get().offset;
        self.state.update(|model| {
            model.loading = true;
            model.error = None;
        });

        let result = self.booking.get_week(offset).await;

        if self.booking.session().epoch() != epoch || self.state.get().offset != offset {
            log::warn!(
                "⏭️ [TABLE] Respuesta de la semana {} descartada: la sesión o la semana cambiaron",
                offset
            );
            return;
        }

        match result {
            Ok(grid) => self.state.update(|model| {
                model.grid = grid;
                model.loading = false;
            }),
            Err(err) => {
                log::error!("❌ [TABLE] Error cargando semana {}: {}", offset, err);
                self.state.update(|model| {
                    model.loading = false;
                    model.error = Some(err.user_message());
                });
            }
        }
    }

    pub async fn next_week(&self) {
        self.go_to_offset(self.state.get().offset + 1).await;
    }

    pub async fn previous_week(&self) {
        self.go_to_offset(self.state.get().offset - 1).await;
    }

    async fn go_to_offset(&self, offset: i64) {
        self.state.set(TableModel::placeholder(self.reference, offset));
        self.refresh().await;
    }

    /// Reserva y, si el API confirma, marca el slot como propio sin recargar
    pub async fn book(&self, date: &str, slot_id: SlotId) -> ApiResult<()> {
        let epoch = self.booking.session().epoch();
        let result = self.booking.book_slot(date, slot_id).await;
        self.finish_action(result, epoch, date, slot_id, SlotStatus::BookedByUser)
            .await
    }

    pub async fn unbook(&self, date: &str, slot_id: SlotId) -> ApiResult<()> {
        let epoch = self.booking.session().epoch();
        let result = self.booking.unbook_slot(date, slot_id).await;
        self.finish_action(result, epoch, date, slot_id, SlotStatus::Available)
            .await
    }

    /// Aplica el resultado de book/unbook. Si la sesión cambió mientras la
    /// petición estaba en vuelo, el grid ya no es el de esa sesión y no se toca.
    async fn finish_action(
        &self,
        result: ApiResult<BookingResult>,
        epoch: u64,
        date: &str,
        slot_id: SlotId,
        status: SlotStatus,
    ) -> ApiResult<()> {
        if self.booking.session().epoch() != epoch {
            log::warn!(
                "⏭️ [TABLE] Resultado de {} slot {} descartado: la sesión cambió",
                date,
                slot_id
            );
            return result.map(|_| ());
        }

        match result {
            Ok(_) => {
                self.apply_status(date, slot_id, status);
                Ok(())
            }
            Err(err) => self.action_failed(err).await,
        }
    }

    fn apply_status(&self, date: &str, slot_id: SlotId, status: SlotStatus) {
        self.state.update(|model| {
            if !model.grid.set_status(date, slot_id, status) {
                log::warn!("⚠️ [TABLE] Slot {} {} no está en el grid", date, slot_id);
            }
            model.error = None;
        });
    }

    /// Un conflicto significa que la vista está desactualizada: se recarga
    async fn action_failed(&self, err: ApiError) -> ApiResult<()> {
        log::error!("❌ [TABLE] {}", err);
        if matches!(err, ApiError::SlotConflict { .. }) {
            self.refresh().await;
        }
        self.state.update(|model| model.error = Some(err.user_message()));
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Expiration, Token, User};
    use crate::services::api_client::ApiClient;
    use crate::services::http::testing::MockTransport;
    use crate::services::http::RequestBody;
    use crate::services::token_storage::TokenStorageService;
    use crate::state::SessionState;
    use std::cell::Cell;
    use std::rc::Rc;

    const WEEK: &str = r#"{"2023/01/16": {"0": 1, "1": 2, "2": 1, "3": 3, "4": 0}}"#;

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 1, 16).unwrap()
    }

    fn setup() -> (BookingTableViewModel<MockTransport>, MockTransport, SessionState) {
        let transport = MockTransport::new();
        let session = SessionState::new(TokenStorageService::in_memory());
        let api = ApiClient::new("http://localhost:8000", transport.clone(), session.clone());
        let vm = BookingTableViewModel::with_reference(BookingService::new(api), monday());
        (vm, transport, session)
    }

    fn login(session: &SessionState) {
        session
            .establish(
                User::new("alice"),
                Token::new("abc", "Bearer", Expiration::Timestamp(123)),
            )
            .unwrap();
    }

    #[test]
    fn test_placeholder_layout() {
        let model = TableModel::placeholder(monday(), 0);
        let headers = model.headers();
        assert_eq!(headers.len(), 7);
        assert_eq!(headers[0].name, "Monday");
        assert_eq!(headers[0].date, "2023/01/16");
        assert_eq!(headers[6].date, "2023/01/22");

        let rows = model.rows();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].time_label, "07:00 - 10:00");
        assert!(rows
            .iter()
            .flat_map(|r| r.cells.iter())
            .all(|c| c.slot.status == SlotStatus::Unavailable));
    }

    #[tokio::test]
    async fn test_refresh_without_session_makes_no_request() {
        let (vm, transport, _) = setup();
        vm.refresh().await;
        assert!(transport.requests().is_empty());
        assert_eq!(vm.model(), TableModel::placeholder(monday(), 0));
    }

    #[tokio::test]
    async fn test_refresh_replaces_grid() {
        let (vm, transport, session) = setup();
        login(&session);
        transport.respond(200, WEEK);

        vm.refresh().await;

        let model = vm.model();
        assert!(!model.loading);
        assert_eq!(model.error, None);
        assert_eq!(model.grid.len(), 1);
        assert_eq!(
            model.grid.get("2023/01/16", 3).map(|s| s.status),
            Some(SlotStatus::BookedByUser)
        );
    }

    #[tokio::test]
    async fn test_book_updates_locally_without_refetch() {
        let (vm, transport, session) = setup();
        login(&session);
        transport.respond(200, r#"{"2023/01/16": {"0": 1}}"#);
        vm.refresh().await;

        transport.respond(
            200,
            r#"{"username":"alice","full_name":"","date":"2023/01/16","slot_id":0,"matched_count":1}"#,
        );
        vm.book("2023/01/16", 0).await.unwrap();

        assert_eq!(
            vm.model().grid.get("2023/01/16", 0).map(|s| s.status.code()),
            Some(3)
        );
        assert_eq!(transport.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_unbook_marks_available() {
        let (vm, transport, session) = setup();
        login(&session);
        transport.respond(200, WEEK);
        vm.refresh().await;

        transport.respond(
            200,
            r#"{"username":"alice","full_name":"","date":"2023/01/16","slot_id":3,"matched_count":1}"#,
        );
        vm.unbook("2023/01/16", 3).await.unwrap();

        assert_eq!(
            vm.model().grid.get("2023/01/16", 3).map(|s| s.status),
            Some(SlotStatus::Available)
        );
    }

    #[tokio::test]
    async fn test_conflict_refetches_and_reports() {
        let (vm, transport, session) = setup();
        login(&session);
        transport.respond(200, r#"{"2023/01/16": {"0": 1}}"#);
        vm.refresh().await;

        transport.respond(
            200,
            r#"{"username":"alice","full_name":"","date":"2023/01/16","slot_id":0,"matched_count":0}"#,
        );
        transport.respond(200, r#"{"2023/01/16": {"0": 2}}"#);

        let err = vm.book("2023/01/16", 0).await.unwrap_err();

        assert!(matches!(err, ApiError::SlotConflict { .. }));
        let model = vm.model();
        assert_eq!(
            model.grid.get("2023/01/16", 0).map(|s| s.status),
            Some(SlotStatus::BookedByOther)
        );
        assert_eq!(model.error, Some(err.user_message()));
        assert_eq!(transport.requests().len(), 3);
    }

    #[tokio::test]
    async fn test_response_after_logout_is_discarded() {
        let (vm, transport, session) = setup();
        login(&session);
        let session_in_flight = session.clone();
        transport.on_send(move |_| session_in_flight.logout());
        transport.respond(200, WEEK);

        vm.refresh().await;

        // La respuesta llegó con status 200 pero la sesión ya no existe
        assert_eq!(vm.model().grid, WeekGrid::placeholder(monday(), 0));
    }

    #[tokio::test]
    async fn test_booking_after_logout_leaves_placeholder() {
        let (vm, transport, session) = setup();
        vm.bind_session(|_| {});
        login(&session);
        transport.respond(200, r#"{"2023/01/16": {"0": 1}}"#);
        vm.refresh().await;

        let session_in_flight = session.clone();
        transport.on_send(move |_| session_in_flight.logout());
        transport.respond(
            200,
            r#"{"username":"alice","full_name":"","date":"2023/01/16","slot_id":0,"matched_count":1}"#,
        );

        vm.book("2023/01/16", 0).await.unwrap();

        assert!(!session.is_authenticated());
        assert_eq!(vm.model().grid, WeekGrid::placeholder(monday(), 0));
        assert_eq!(
            vm.model().grid.get("2023/01/16", 0).map(|s| s.status),
            Some(SlotStatus::Unavailable)
        );
    }

    #[tokio::test]
    async fn test_conflict_after_logout_does_not_refetch() {
        let (vm, transport, session) = setup();
        login(&session);
        let session_in_flight = session.clone();
        transport.on_send(move |_| session_in_flight.logout());
        transport.respond(
            200,
            r#"{"username":"alice","full_name":"","date":"2023/01/16","slot_id":0,"matched_count":0}"#,
        );

        let err = vm.unbook("2023/01/16", 0).await.unwrap_err();

        assert!(matches!(err, ApiError::SlotConflict { .. }));
        assert_eq!(transport.requests().len(), 1);
        assert_eq!(vm.model().error, None);
    }

    #[tokio::test]
    async fn test_dash_formatted_dates_can_be_booked() {
        let (vm, transport, session) = setup();
        login(&session);
        transport.respond(200, r#"{"2023-01-16": {"0": 1}}"#);
        vm.refresh().await;

        let headers = vm.model().headers();
        assert_eq!(headers[0].name, "Monday");
        assert_eq!(headers[0].date, "2023-01-16");

        transport.respond(
            200,
            r#"{"username":"alice","full_name":"","date":"2023-01-16","slot_id":0,"matched_count":1}"#,
        );
        vm.book("2023-01-16", 0).await.unwrap();

        assert_eq!(transport.requests().len(), 2);
        assert_eq!(
            transport.last_request().unwrap().body,
            RequestBody::Json(r#"{"date_str":"2023-01-16","slot_id":0}"#.to_string())
        );
        assert_eq!(
            vm.model().grid.get("2023-01-16", 0).map(|s| s.status),
            Some(SlotStatus::BookedByUser)
        );
    }

    #[tokio::test]
    async fn test_week_navigation() {
        let (vm, transport, session) = setup();
        login(&session);
        transport.respond(200, r#"{"2023/01/23": {"0": 1}}"#);
        transport.respond(200, r#"{"2023/01/16": {"0": 1}}"#);

        vm.next_week().await;
        assert_eq!(vm.model().offset, 1);
        assert_eq!(vm.model().grid.dates(), vec!["2023/01/23".to_string()]);

        vm.previous_week().await;
        assert_eq!(vm.model().offset, 0);

        let queries: Vec<_> = transport
            .requests()
            .into_iter()
            .map(|r| r.query[0].1.clone())
            .collect();
        assert_eq!(queries, vec!["1", "0"]);
    }

    #[tokio::test]
    async fn test_fetch_error_is_surfaced() {
        let (vm, transport, session) = setup();
        login(&session);
        transport.respond(500, r#"{"message":"Database unavailable"}"#);

        vm.refresh().await;

        let model = vm.model();
        assert!(!model.loading);
        assert_eq!(model.error.as_deref(), Some("Database unavailable"));
    }

    #[test]
    fn test_bind_session_follows_login_and_logout() {
        let (vm, _, session) = setup();
        let refreshes = Rc::new(Cell::new(0));
        let refreshes_clone = refreshes.clone();
        vm.bind_session(move |_| refreshes_clone.set(refreshes_clone.get() + 1));
        assert_eq!(refreshes.get(), 0);

        login(&session);
        assert_eq!(refreshes.get(), 1);

        vm.state().update(|m| m.grid = WeekGrid::new());
        session.logout();
        assert_eq!(vm.model().grid, WeekGrid::placeholder(monday(), 0));
    }
}

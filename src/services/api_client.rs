// ============================================================================
// API CLIENT - SOLO COMUNICACIÓN HTTP
// ============================================================================
// Cada petición pasa por el AuthInterceptor (token + manejo de 401/403).
// NO tiene lógica de negocio.
// ============================================================================

use std::rc::Rc;

use serde::de::DeserializeOwned;

use crate::config::CONFIG;
use crate::error::ApiResult;
use crate::models::{
    BookSlotRequest, BookingResult, LoginForm, RawWeek, RegisterRequest, RegisterResponse, SlotId,
    Token, UserProfile,
};
use crate::services::auth_interceptor::AuthInterceptor;
use crate::services::http::{DefaultTransport, HttpRequest, HttpResponse, HttpTransport};
use crate::state::SessionState;

pub struct ApiClient<T: HttpTransport = DefaultTransport> {
    base_url: String,
    transport: Rc<T>,
    interceptor: AuthInterceptor,
}

// Clone manual: no exige `T: Clone`
impl<T: HttpTransport> Clone for ApiClient<T> {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            transport: self.transport.clone(),
            interceptor: self.interceptor.clone(),
        }
    }
}

impl ApiClient<DefaultTransport> {
    /// Cliente contra la URL configurada en `CONFIG`
    pub fn from_config(session: SessionState) -> Self {
        Self::new(CONFIG.api_url(), DefaultTransport::default(), session)
    }
}

impl<T: HttpTransport> ApiClient<T> {
    pub fn new(base_url: &str, transport: T, session: SessionState) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            interceptor: AuthInterceptor::new(&base_url, session),
            base_url,
            transport: Rc::new(transport),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionState {
        self.interceptor.session()
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Envía una petición ya construida, con token y manejo de errores
    pub async fn send(&self, request: HttpRequest) -> ApiResult<HttpResponse> {
        let request = self.interceptor.intercept(request);
        log::debug!("🌐 [API] {:?} {}", request.method, request.url);
        let response = self
            .transport
            .send(request)
            .await
            .map_err(|e| self.interceptor.handle_transport_error(e))?;
        self.interceptor.handle_response(response)
    }

    pub async fn send_json<R: DeserializeOwned>(&self, request: HttpRequest) -> ApiResult<R> {
        self.send(request).await?.json::<R>()
    }

    // ========================================================================
    // AUTH
    // ========================================================================

    /// `POST /auth/login` con formulario (OAuth2 password flow)
    pub async fn login(&self, form: &LoginForm) -> ApiResult<Token> {
        log::info!("🔐 [API] Login para usuario: {}", form.username);
        let request = HttpRequest::post(&self.url("/auth/login"))
            .form(form.to_pairs())
            .with_credentials();
        self.send_json(request).await
    }

    pub async fn register(&self, body: &RegisterRequest) -> ApiResult<RegisterResponse> {
        log::info!("📝 [API] Registro de usuario: {}", body.username);
        let request = HttpRequest::post(&self.url("/auth/register")).json(body)?;
        self.send_json(request).await
    }

    pub async fn current_user(&self) -> ApiResult<UserProfile> {
        self.send_json(HttpRequest::get(&self.url("/auth/users/me")))
            .await
    }

    // ========================================================================
    // BOOKING
    // ========================================================================

    /// `GET /booking/getweek?offset=N`
    pub async fn get_week(&self, offset: i64) -> ApiResult<RawWeek> {
        log::info!("📅 [API] Obteniendo semana (offset={})", offset);
        let request = HttpRequest::get(&self.url("/booking/getweek")).query("offset", offset);
        self.send_json(request).await
    }

    pub async fn book_slot(&self, date: &str, slot_id: SlotId) -> ApiResult<BookingResult> {
        log::info!("📌 [API] Reservando {} slot {}", date, slot_id);
        let request = HttpRequest::post(&self.url("/booking/book_slot"))
            .json(&BookSlotRequest::new(date, slot_id))?;
        self.send_json(request).await
    }

    pub async fn unbook_slot(&self, date: &str, slot_id: SlotId) -> ApiResult<BookingResult> {
        log::info!("🗑️ [API] Liberando {} slot {}", date, slot_id);
        let request = HttpRequest::post(&self.url("/booking/unbook_slot"))
            .json(&BookSlotRequest::new(date, slot_id))?;
        self.send_json(request).await
    }
}

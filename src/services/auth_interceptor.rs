// ============================================================================
// AUTH INTERCEPTOR - Decorador de peticiones al API
// ============================================================================
// - Añade `Authorization: <token_type> <access_token>` si hay sesión y la
//   petición va al API configurado.
// - 401/403 => logout forzado antes de devolver el error.
// - Cualquier otro error se normaliza a un único mensaje.
// ============================================================================

use crate::error::{ApiError, ApiResult};
use crate::models::ErrorBody;
use crate::services::http::{HttpRequest, HttpResponse};
use crate::state::SessionState;

#[derive(Clone)]
pub struct AuthInterceptor {
    api_url: String,
    session: SessionState,
}

impl AuthInterceptor {
    pub fn new(api_url: &str, session: SessionState) -> Self {
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// La URL apunta al API: mismo prefijo y termina ahí o sigue con `/`, `?`
    /// o `#` (evita que `https://api.x.evil` pase por `https://api.x`)
    pub fn is_api_url(&self, url: &str) -> bool {
        match url.strip_prefix(self.api_url.as_str()) {
            Some(rest) => {
                rest.is_empty() || rest.starts_with('/') || rest.starts_with('?') || rest.starts_with('#')
            }
            None => false,
        }
    }

    pub fn intercept(&self, request: HttpRequest) -> HttpRequest {
        if !self.is_api_url(&request.url) {
            return request;
        }
        match self.session.token() {
            Some(token) => request.header("Authorization", &token.authorization_value()),
            None => request,
        }
    }

    /// Respuestas no-2xx se convierten en `ApiError`
    pub fn handle_response(&self, response: HttpResponse) -> ApiResult<HttpResponse> {
        if response.ok() {
            return Ok(response);
        }

        let message = extract_error_message(&response);
        log::error!("❌ [API] HTTP {}: {}", response.status, message);

        if matches!(response.status, 401 | 403) {
            log::warn!("🔒 [API] Respuesta {}, forzando logout", response.status);
            self.session.logout();
            return Err(ApiError::Unauthorized {
                status: response.status,
                message,
            });
        }

        Err(ApiError::Http {
            status: response.status,
            message,
        })
    }

    pub fn handle_transport_error(&self, error: ApiError) -> ApiError {
        log::error!("❌ [API] Error de red: {}", error);
        error
    }
}

/// `message` o `detail` del cuerpo JSON; si no, la línea de estado
pub fn extract_error_message(response: &HttpResponse) -> String {
    serde_json::from_str::<ErrorBody>(&response.body)
        .ok()
        .and_then(|body| body.best_message())
        .unwrap_or_else(|| response.status_line())
}

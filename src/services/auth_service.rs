// ============================================================================
// AUTH SERVICE - Login / logout / registro
// ============================================================================
// El estado de sesión vive en SessionState; este servicio solo orquesta
// API + estado.
// ============================================================================

use crate::error::{ApiError, ApiResult};
use crate::models::{LoginForm, RegisterRequest, RegisterResponse, User, UserProfile};
use crate::services::api_client::ApiClient;
use crate::services::http::{DefaultTransport, HttpTransport};
use crate::state::SessionState;

pub struct AuthService<T: HttpTransport = DefaultTransport> {
    api: ApiClient<T>,
}

impl<T: HttpTransport> Clone for AuthService<T> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
        }
    }
}

impl<T: HttpTransport> AuthService<T> {
    pub fn new(api: ApiClient<T>) -> Self {
        Self { api }
    }

    pub fn session(&self) -> &SessionState {
        self.api.session()
    }

    /// `true` solo si hay usuario y token en storage
    pub fn check_status(&self) -> bool {
        self.session().check_status()
    }

    /// Login con formulario. En éxito persiste usuario + token y emite
    /// `LoggedIn`; en fallo emite `LoginFailed` con el mensaje normalizado.
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<User> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            let err = ApiError::Invalid("Username and password are required".to_string());
            self.session().report_login_failure(&err.user_message());
            return Err(err);
        }

        let form = LoginForm::new(username, password);
        match self.api.login(&form).await {
            Ok(token) => {
                let user = User::new(username);
                self.session().establish(user.clone(), token)?;
                log::info!("✅ [AUTH] Login correcto: {}", username);
                Ok(user)
            }
            Err(err) => {
                log::error!("❌ [AUTH] Login fallido para {}: {}", username, err);
                self.session().report_login_failure(&err.user_message());
                Err(err)
            }
        }
    }

    /// Solo invalidación local: el API no tiene endpoint de logout
    pub fn logout(&self) {
        self.session().logout();
    }

    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> ApiResult<RegisterResponse> {
        if username.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
            return Err(ApiError::Invalid(
                "Username, email and password are required".to_string(),
            ));
        }
        let body = RegisterRequest {
            username: username.trim().to_string(),
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let response = self.api.register(&body).await?;
        log::info!("✅ [AUTH] Usuario registrado: {}", response.id);
        Ok(response)
    }

    /// Perfil del usuario autenticado
    pub async fn me(&self) -> ApiResult<UserProfile> {
        if !self.session().is_authenticated() {
            return Err(ApiError::NotLoggedIn);
        }
        self.api.current_user().await
    }
}

// ============================================================================
// LOGIN VIEWMODEL - Formulario de login + estado de sesión para la cabecera
// ============================================================================

use crate::error::{ApiError, ApiResult};
use crate::models::User;
use crate::services::auth_service::AuthService;
use crate::services::http::{DefaultTransport, HttpTransport};
use crate::state::{ReactiveState, SessionEvent, SubscriptionId};

#[derive(Clone, PartialEq, Debug, Default)]
pub struct LoginModel {
    pub username: String,
    pub password: String,
    pub submitting: bool,
    pub error: Option<String>,
    /// Usuario con sesión activa, si la hay
    pub logged_in_as: Option<String>,
}

impl LoginModel {
    pub fn is_logged_in(&self) -> bool {
        self.logged_in_as.is_some()
    }

    pub fn can_submit(&self) -> bool {
        !self.submitting && !self.username.trim().is_empty() && !self.password.is_empty()
    }
}

pub struct LoginViewModel<T: HttpTransport = DefaultTransport> {
    auth: AuthService<T>,
    state: ReactiveState<LoginModel>,
}

impl<T: HttpTransport> Clone for LoginViewModel<T> {
    fn clone(&self) -> Self {
        Self {
            auth: self.auth.clone(),
            state: self.state.clone(),
        }
    }
}

impl<T: HttpTransport + 'static> LoginViewModel<T> {
    pub fn new(auth: AuthService<T>) -> Self {
        let initial = LoginModel {
            logged_in_as: auth.session().session().username().map(String::from),
            ..LoginModel::default()
        };
        Self {
            auth,
            state: ReactiveState::new(initial),
        }
    }

    pub fn state(&self) -> &ReactiveState<LoginModel> {
        &self.state
    }

    pub fn model(&self) -> LoginModel {
        self.state.get()
    }

    pub fn set_username(&self, value: &str) {
        self.state.update(|model| {
            model.username = value.to_string();
            model.error = None;
        });
    }

    pub fn set_password(&self, value: &str) {
        self.state.update(|model| {
            model.password = value.to_string();
            model.error = None;
        });
    }

    /// Escucha la sesión (quién está logueado) y los fallos de login
    pub fn bind_session(&self) -> (SubscriptionId, SubscriptionId) {
        let session = self.auth.session();

        let state = self.state.clone();
        let session_sub = session.subscribe(move |current| {
            let username = current.username().map(String::from);
            state.update(|model| {
                if username.is_some() {
                    model.password.clear();
                }
                model.logged_in_as = username;
            });
        });

        let state = self.state.clone();
        let events_sub = session.subscribe_events(move |event| {
            if let SessionEvent::LoginFailed { message } = event {
                state.update(|model| model.error = Some(message.clone()));
            }
        });

        (session_sub, events_sub)
    }

    pub async fn submit(&self) -> ApiResult<User> {
        let model = self.state.get();
        if model.submitting {
            return Err(ApiError::Invalid("Login already in progress".to_string()));
        }

        self.state.update(|model| {
            model.submitting = true;
            model.error = None;
        });

        let result = self.auth.login(&model.username, &model.password).await;

        self.state.update(|model| {
            model.submitting = false;
            match &result {
                Ok(_) => {
                    model.password.clear();
                    model.error = None;
                }
                Err(err) => model.error = Some(err.user_message()),
            }
        });
        result
    }

    pub fn logout(&self) {
        self.auth.logout();
        self.state.update(|model| model.error = None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::api_client::ApiClient;
    use crate::services::http::testing::MockTransport;
    use crate::services::token_storage::TokenStorageService;
    use crate::state::SessionState;

    const TOKEN: &str = r#"{"access_token":"abc","token_type":"Bearer","expiration":123}"#;

    fn setup() -> (LoginViewModel<MockTransport>, MockTransport, SessionState) {
        let transport = MockTransport::new();
        let session = SessionState::new(TokenStorageService::in_memory());
        let api = ApiClient::new("http://localhost:8000", transport.clone(), session.clone());
        let vm = LoginViewModel::new(AuthService::new(api));
        vm.bind_session();
        (vm, transport, session)
    }

    #[tokio::test]
    async fn test_submit_success() {
        let (vm, transport, session) = setup();
        transport.respond(200, TOKEN);
        vm.set_username("alice");
        vm.set_password("secret");
        assert!(vm.model().can_submit());

        let user = vm.submit().await.unwrap();

        assert_eq!(user.username, "alice");
        assert!(session.check_status());
        let model = vm.model();
        assert_eq!(model.logged_in_as.as_deref(), Some("alice"));
        assert!(model.password.is_empty());
        assert!(!model.submitting);
    }

    #[tokio::test]
    async fn test_submit_failure_shows_message() {
        let (vm, transport, _) = setup();
        transport.respond(
            401,
            r#"{"detail":"Cannot authenticate user, not found in the DB."}"#,
        );
        vm.set_username("alice");
        vm.set_password("wrong");

        assert!(vm.submit().await.is_err());

        let model = vm.model();
        assert!(!model.is_logged_in());
        assert_eq!(
            model.error.as_deref(),
            Some("Cannot authenticate user, not found in the DB.")
        );
        assert_eq!(model.password, "wrong");
    }

    #[tokio::test]
    async fn test_empty_form_rejected_locally() {
        let (vm, transport, _) = setup();
        vm.set_username("alice");
        assert!(!vm.model().can_submit());

        let err = vm.submit().await.unwrap_err();
        assert!(matches!(err, ApiError::Invalid(_)));
        assert!(vm.model().error.is_some());
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_logout_updates_model() {
        let (vm, transport, _) = setup();
        transport.respond(200, TOKEN);
        vm.set_username("alice");
        vm.set_password("secret");
        vm.submit().await.unwrap();

        vm.logout();

        assert_eq!(vm.model().logged_in_as, None);
    }

    #[test]
    fn test_restored_session_is_visible() {
        let storage = TokenStorageService::in_memory();
        storage.save_user(&User::new("bob")).unwrap();
        storage
            .save_token(&crate::models::Token::new(
                "t",
                "Bearer",
                crate::models::Expiration::Timestamp(1),
            ))
            .unwrap();
        let session = SessionState::new(storage);
        let api = ApiClient::new("http://localhost:8000", MockTransport::new(), session);
        let vm = LoginViewModel::new(AuthService::new(api));
        assert_eq!(vm.model().logged_in_as.as_deref(), Some("bob"));
    }
}

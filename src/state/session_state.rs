// ============================================================================
// SESSION STATE - Sesión actual (usuario + token) y sus eventos
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

use crate::error::ApiResult;
use crate::models::{Token, User};
use crate::services::token_storage::TokenStorageService;
use crate::state::reactivity::{EventBus, ReactiveState, SubscriptionId};

/// Valor inmutable de la sesión: usuario y token van juntos o no hay ninguno
#[derive(Clone, PartialEq, Debug, Default)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated { user: User, token: Token },
}

impl Session {
    /// Solo hay sesión si ambas partes existen
    pub fn from_parts(user: Option<User>, token: Option<Token>) -> Self {
        match (user, token) {
            (Some(user), Some(token)) => Session::Authenticated { user, token },
            _ => Session::Anonymous,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated { .. })
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            Session::Authenticated { user, .. } => Some(user),
            Session::Anonymous => None,
        }
    }

    pub fn token(&self) -> Option<&Token> {
        match self {
            Session::Authenticated { token, .. } => Some(token),
            Session::Anonymous => None,
        }
    }

    pub fn username(&self) -> Option<&str> {
        self.user().map(|u| u.username.as_str())
    }
}

/// Eventos transitorios de login/logout
#[derive(Clone, PartialEq, Debug)]
pub enum SessionEvent {
    LoggedIn { user: User, token: Token },
    LoginFailed { message: String },
    LoggedOut,
}

/// Estado de sesión compartido (los clones comparten todo)
#[derive(Clone)]
pub struct SessionState {
    storage: TokenStorageService,
    current: ReactiveState<Session>,
    events: EventBus<SessionEvent>,
    /// Se incrementa en cada login/logout; sirve para descartar respuestas
    /// que llegan después de un cambio de sesión
    epoch: Rc<Cell<u64>>,
}

impl SessionState {
    /// Crea el estado inicializado desde el storage
    pub fn new(storage: TokenStorageService) -> Self {
        let initial = Session::from_parts(storage.get_user(), storage.get_token());
        if let Some(username) = initial.username() {
            log::info!("💾 [SESSION] Sesión restaurada desde storage para {}", username);
        }
        Self {
            storage,
            current: ReactiveState::new(initial),
            events: EventBus::new(),
            epoch: Rc::new(Cell::new(0)),
        }
    }

    /// Relee usuario y token del storage; `true` solo si ambos existen
    pub fn check_status(&self) -> bool {
        let stored = Session::from_parts(self.storage.get_user(), self.storage.get_token());
        let authenticated = stored.is_authenticated();
        if self.current.set_if_changed(stored) {
            self.bump_epoch();
            log::info!("🔄 [SESSION] Sesión sincronizada con storage (auth={})", authenticated);
        }
        authenticated
    }

    pub fn session(&self) -> Session {
        self.current.get()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.get().is_authenticated()
    }

    pub fn token(&self) -> Option<Token> {
        self.current.get().token().cloned()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch.get()
    }

    /// Persiste y publica una sesión nueva tras un login correcto
    pub fn establish(&self, user: User, token: Token) -> ApiResult<()> {
        self.storage.save_user(&user)?;
        self.storage.save_token(&token)?;
        self.bump_epoch();
        self.current.set(Session::Authenticated {
            user: user.clone(),
            token: token.clone(),
        });
        log::info!("✅ [SESSION] Sesión iniciada para {}", user.username);
        self.events.emit(SessionEvent::LoggedIn { user, token });
        Ok(())
    }

    /// Invalidación local: limpia storage y memoria. Siempre termina.
    pub fn logout(&self) {
        log::info!("👋 [SESSION] Logout, limpiando storage");
        if let Err(e) = self.storage.clear() {
            log::error!("❌ [SESSION] Error limpiando storage: {}", e);
        }
        self.bump_epoch();
        self.current.set(Session::Anonymous);
        self.events.emit(SessionEvent::LoggedOut);
    }

    pub fn report_login_failure(&self, message: &str) {
        self.events.emit(SessionEvent::LoginFailed {
            message: message.to_string(),
        });
    }

    /// Suscripción al estado de sesión; recibe el valor actual de inmediato
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&Session) + 'static,
    {
        self.current.subscribe(callback)
    }

    /// Suscripción a eventos transitorios (sin reenvío)
    pub fn subscribe_events<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&SessionEvent) + 'static,
    {
        self.events.subscribe(callback)
    }

    pub fn token_storage(&self) -> &TokenStorageService {
        &self.storage
    }

    fn bump_epoch(&self) {
        self.epoch.set(self.epoch.get() + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Expiration;
    use std::cell::RefCell;

    fn token() -> Token {
        Token::new("abc", "Bearer", Expiration::Timestamp(123))
    }

    #[test]
    fn test_from_parts_requires_both() {
        assert_eq!(Session::from_parts(Some(User::new("a")), None), Session::Anonymous);
        assert_eq!(Session::from_parts(None, Some(token())), Session::Anonymous);
        assert!(Session::from_parts(Some(User::new("a")), Some(token())).is_authenticated());
    }

    #[test]
    fn test_initialized_from_storage() {
        let storage = TokenStorageService::in_memory();
        storage.save_user(&User::new("alice")).unwrap();
        storage.save_token(&token()).unwrap();

        let state = SessionState::new(storage);
        assert!(state.is_authenticated());
        assert_eq!(state.session().username(), Some("alice"));
    }

    #[test]
    fn test_user_without_token_is_logged_out() {
        let storage = TokenStorageService::in_memory();
        storage.save_user(&User::new("alice")).unwrap();
        let state = SessionState::new(storage);
        assert!(!state.check_status());
        assert_eq!(state.token(), None);
    }

    #[test]
    fn test_establish_and_logout() {
        let state = SessionState::new(TokenStorageService::in_memory());
        let events = Rc::new(RefCell::new(Vec::new()));
        let events_clone = events.clone();
        state.subscribe_events(move |e| events_clone.borrow_mut().push(e.clone()));

        state.establish(User::new("alice"), token()).unwrap();
        assert!(state.check_status());
        assert_eq!(state.epoch(), 1);

        state.logout();
        assert!(!state.check_status());
        assert_eq!(state.epoch(), 2);
        assert_eq!(state.token_storage().get_token(), None);

        assert_eq!(
            *events.borrow(),
            vec![
                SessionEvent::LoggedIn {
                    user: User::new("alice"),
                    token: token()
                },
                SessionEvent::LoggedOut,
            ]
        );
    }

    #[test]
    fn test_late_subscriber_gets_current_session() {
        let state = SessionState::new(TokenStorageService::in_memory());
        state.establish(User::new("alice"), token()).unwrap();

        let seen = Rc::new(RefCell::new(None));
        let seen_clone = seen.clone();
        state.subscribe(move |s| *seen_clone.borrow_mut() = Some(s.clone()));

        assert_eq!(
            seen.borrow().as_ref().and_then(|s| s.username().map(String::from)),
            Some("alice".to_string())
        );
    }

    #[test]
    fn test_check_status_picks_up_external_clear() {
        let state = SessionState::new(TokenStorageService::in_memory());
        state.establish(User::new("alice"), token()).unwrap();
        state.token_storage().clear().unwrap();

        assert!(!state.check_status());
        assert!(!state.is_authenticated());
        assert_eq!(state.epoch(), 2);
    }
}

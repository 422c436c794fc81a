use serde::{Deserialize, Serialize};

// ============================================================================
// TOKEN / USER - Credenciales de la sesión
// ============================================================================

/// Token bearer devuelto por `POST /auth/login`.
/// No se valida la expiración en el cliente: un token caducado solo se
/// detecta cuando el API responde 401/403.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
    pub expiration: Expiration,
}

/// La expiración llega como número (epoch) o como fecha ISO según la versión
/// del backend. Se guarda tal cual se recibió.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
#[serde(untagged)]
pub enum Expiration {
    Timestamp(i64),
    DateTime(String),
}

impl Token {
    pub fn new(access_token: &str, token_type: &str, expiration: Expiration) -> Self {
        Self {
            access_token: access_token.to_string(),
            token_type: token_type.to_string(),
            expiration,
        }
    }

    /// Valor de la cabecera `Authorization`: `<token_type> <access_token>`
    pub fn authorization_value(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }
}

/// Identidad mínima: el nombre se toma del formulario de login
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct User {
    pub username: String,
}

impl User {
    pub fn new(username: &str) -> Self {
        Self {
            username: username.to_string(),
        }
    }
}

// ============================================================================
// REQUESTS / RESPONSES de /auth
// ============================================================================

/// Credenciales enviadas como `application/x-www-form-urlencoded`
#[derive(Clone, PartialEq, Debug)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    pub fn to_pairs(&self) -> Vec<(String, String)> {
        vec![
            ("username".to_string(), self.username.clone()),
            ("password".to_string(), self.password.clone()),
        ]
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct RegisterResponse {
    #[serde(rename = "id_")]
    pub id: String,
}

/// Respuesta de `GET /auth/users/me`
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct UserProfile {
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Cuerpo de error del API. FastAPI usa `detail`, otros backends `message`.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    pub fn best_message(&self) -> Option<String> {
        if let Some(message) = self.message.as_ref().filter(|m| !m.is_empty()) {
            return Some(message.clone());
        }
        match &self.detail {
            Some(serde_json::Value::String(detail)) if !detail.is_empty() => Some(detail.clone()),
            _ => None,
        }
    }
}

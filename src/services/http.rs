// ============================================================================
// HTTP - Petición/respuesta neutrales + transporte
// ============================================================================
// Navegador: gloo-net (fetch). Nativo: reqwest.
// Los servicios solo ven `HttpTransport`, así se prueban con un transporte
// en memoria.
// ============================================================================

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{ApiError, ApiResult};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Method {
    Get,
    Post,
}

#[derive(Clone, PartialEq, Debug)]
pub enum RequestBody {
    Empty,
    Json(String),
    /// Se envía como `application/x-www-form-urlencoded`
    Form(Vec<(String, String)>),
}

#[derive(Clone, PartialEq, Debug)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
    /// Cookies cross-origin (`credentials: "include"`)
    pub with_credentials: bool,
}

impl HttpRequest {
    pub fn new(method: Method, url: &str) -> Self {
        Self {
            method,
            url: url.to_string(),
            query: Vec::new(),
            headers: Vec::new(),
            body: RequestBody::Empty,
            with_credentials: false,
        }
    }

    pub fn get(url: &str) -> Self {
        Self::new(Method::Get, url)
    }

    pub fn post(url: &str) -> Self {
        Self::new(Method::Post, url)
    }

    pub fn query(mut self, name: &str, value: impl ToString) -> Self {
        self.query.push((name.to_string(), value.to_string()));
        self
    }

    /// Añade o reemplaza una cabecera (nombre sin distinguir mayúsculas)
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers
            .retain(|(existing, _)| !existing.eq_ignore_ascii_case(name));
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn json<T: Serialize>(mut self, body: &T) -> ApiResult<Self> {
        let json = serde_json::to_string(body)
            .map_err(|e| ApiError::Parse(format!("Serialization error: {}", e)))?;
        self.body = RequestBody::Json(json);
        Ok(self)
    }

    pub fn form(mut self, pairs: Vec<(String, String)>) -> Self {
        self.body = RequestBody::Form(pairs);
        self
    }

    pub fn with_credentials(mut self) -> Self {
        self.with_credentials = true;
        self
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> ApiResult<T> {
        serde_json::from_str(&self.body).map_err(|e| ApiError::Parse(format!("Parse error: {}", e)))
    }

    /// Línea de estado, p.ej. `404 Not Found`
    pub fn status_line(&self) -> String {
        if self.status_text.is_empty() {
            self.status.to_string()
        } else {
            format!("{} {}", self.status, self.status_text)
        }
    }
}

#[allow(async_fn_in_trait)]
pub trait HttpTransport {
    async fn send(&self, request: HttpRequest) -> ApiResult<HttpResponse>;
}

#[cfg(target_arch = "wasm32")]
pub use fetch::FetchTransport;

#[cfg(target_arch = "wasm32")]
pub type DefaultTransport = FetchTransport;

#[cfg(not(target_arch = "wasm32"))]
pub use native::ReqwestTransport;

#[cfg(not(target_arch = "wasm32"))]
pub type DefaultTransport = ReqwestTransport;

#[cfg(target_arch = "wasm32")]
mod fetch {
    use gloo_net::http::Request;
    use web_sys::{RequestCredentials, UrlSearchParams};

    use super::{HttpRequest, HttpResponse, HttpTransport, Method, RequestBody};
    use crate::error::{ApiError, ApiResult};

    /// Transporte del navegador (fetch vía gloo-net)
    #[derive(Clone, Copy, Debug, Default)]
    pub struct FetchTransport;

    fn encode_form(pairs: &[(String, String)]) -> ApiResult<String> {
        let params = UrlSearchParams::new()
            .map_err(|_| ApiError::Invalid("No se pudo crear URLSearchParams".to_string()))?;
        for (name, value) in pairs {
            params.append(name, value);
        }
        Ok(String::from(params.to_string()))
    }

    impl HttpTransport for FetchTransport {
        async fn send(&self, request: HttpRequest) -> ApiResult<HttpResponse> {
            let mut builder = match request.method {
                Method::Get => Request::get(&request.url),
                Method::Post => Request::post(&request.url),
            };
            if !request.query.is_empty() {
                builder = builder.query(
                    request
                        .query
                        .iter()
                        .map(|(name, value)| (name.as_str(), value.as_str())),
                );
            }
            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }
            if request.with_credentials {
                builder = builder.credentials(RequestCredentials::Include);
            }

            let sent = match request.body {
                RequestBody::Empty => builder.send().await,
                RequestBody::Json(json) => {
                    builder
                        .header("Content-Type", "application/json")
                        .body(json)
                        .map_err(|e| ApiError::Network(format!("Request build error: {}", e)))?
                        .send()
                        .await
                }
                RequestBody::Form(pairs) => {
                    builder
                        .header("Content-Type", "application/x-www-form-urlencoded")
                        .body(encode_form(&pairs)?)
                        .map_err(|e| ApiError::Network(format!("Request build error: {}", e)))?
                        .send()
                        .await
                }
            };
            let response = sent.map_err(|e| ApiError::Network(e.to_string()))?;

            let status = response.status();
            let status_text = response.status_text();
            let body = response.text().await.unwrap_or_default();
            Ok(HttpResponse {
                status,
                status_text,
                body,
            })
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use super::{HttpRequest, HttpResponse, HttpTransport, Method, RequestBody};
    use crate::error::{ApiError, ApiResult};

    /// Transporte nativo con reqwest (herramientas y pruebas contra un API real)
    #[derive(Clone, Debug, Default)]
    pub struct ReqwestTransport {
        client: reqwest::Client,
    }

    impl ReqwestTransport {
        pub fn new(client: reqwest::Client) -> Self {
            Self { client }
        }
    }

    impl HttpTransport for ReqwestTransport {
        async fn send(&self, request: HttpRequest) -> ApiResult<HttpResponse> {
            let method = match request.method {
                Method::Get => reqwest::Method::GET,
                Method::Post => reqwest::Method::POST,
            };
            let mut builder = self.client.request(method, &request.url);
            if !request.query.is_empty() {
                builder = builder.query(&request.query);
            }
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            builder = match request.body {
                RequestBody::Empty => builder,
                RequestBody::Json(json) => builder
                    .header(reqwest::header::CONTENT_TYPE, "application/json")
                    .body(json),
                RequestBody::Form(pairs) => builder.form(&pairs),
            };

            let response = builder
                .send()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?;
            let status = response.status();
            let body = response
                .text()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?;
            Ok(HttpResponse {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                body,
            })
        }
    }
}

/// Transporte en memoria con respuestas programadas
#[cfg(test)]
pub mod testing {
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    use super::{HttpRequest, HttpResponse, HttpTransport};
    use crate::error::{ApiError, ApiResult};

    type SendHook = Rc<dyn Fn(&HttpRequest)>;

    #[derive(Clone, Default)]
    pub struct MockTransport {
        responses: Rc<RefCell<VecDeque<ApiResult<HttpResponse>>>>,
        requests: Rc<RefCell<Vec<HttpRequest>>>,
        on_send: Rc<RefCell<Option<SendHook>>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn respond(&self, status: u16, body: &str) -> &Self {
            let status_text = match status {
                200 => "OK",
                401 => "Unauthorized",
                403 => "Forbidden",
                404 => "Not Found",
                500 => "Internal Server Error",
                _ => "",
            };
            self.responses.borrow_mut().push_back(Ok(HttpResponse {
                status,
                status_text: status_text.to_string(),
                body: body.to_string(),
            }));
            self
        }

        pub fn fail(&self, message: &str) -> &Self {
            self.responses
                .borrow_mut()
                .push_back(Err(ApiError::Network(message.to_string())));
            self
        }

        /// Se ejecuta en cada envío, antes de devolver la respuesta
        /// (simula algo que ocurre mientras la petición está en vuelo)
        pub fn on_send<F: Fn(&HttpRequest) + 'static>(&self, hook: F) {
            *self.on_send.borrow_mut() = Some(Rc::new(hook));
        }

        pub fn requests(&self) -> Vec<HttpRequest> {
            self.requests.borrow().clone()
        }

        pub fn last_request(&self) -> Option<HttpRequest> {
            self.requests.borrow().last().cloned()
        }
    }

    impl HttpTransport for MockTransport {
        async fn send(&self, request: HttpRequest) -> ApiResult<HttpResponse> {
            let hook = self.on_send.borrow().clone();
            if let Some(hook) = hook {
                hook(&request);
            }
            self.requests.borrow_mut().push(request);
            self.responses
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(ApiError::Network("no scripted response".to_string())))
        }
    }
}

pub mod api_client;
pub mod auth_interceptor;
pub mod auth_service;
pub mod booking_service;
pub mod http;
pub mod token_storage;

pub use api_client::ApiClient;
pub use auth_interceptor::AuthInterceptor;
pub use auth_service::AuthService;
pub use booking_service::BookingService;
pub use http::{DefaultTransport, HttpRequest, HttpResponse, HttpTransport};
pub use token_storage::TokenStorageService;

pub mod api;
pub mod auth;
pub mod error;
pub mod navigation;
pub mod onsen_image;
pub mod onsen_log;

pub use api::Envelope;
pub use auth::{AuthResponse, LoginRequest, RefreshRequest, RegisterRequest, TokenPair};
pub use error::{codes, ApiError, ApiErrorDetail, ClientError, ServerError};
pub use navigation::{NavigationIntent, Route};
pub use onsen_image::{ImageUpload, MessageResponse, OnsenImage};
pub use onsen_log::{
    clamp_rating, parse_visit_date, ExportFormat, ExportedFile, ListQuery, OnsenLog,
    OnsenLogCreateRequest, OnsenLogFilter, OnsenLogListBody, OnsenLogPage, OnsenLogUpdateRequest,
    SortDirection, SortField, FEATURES, SPRING_TYPES,
};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    /// The request was refused because of something the client sent
    Fail,
    /// The server could not complete a valid request
    Error,
}

/// Body shared by every response: `{ status, message?, data? }`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope {
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// An [`Envelope`] paired with the HTTP status code it is sent with.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    code: StatusCode,
    body: Envelope,
}

impl ApiResponse {
    fn new(code: StatusCode, status: Status) -> Self {
        ApiResponse {
            code,
            body: Envelope {
                status,
                message: None,
                data: None,
            },
        }
    }

    pub fn success(code: StatusCode) -> Self {
        ApiResponse::new(code, Status::Success)
    }

    pub fn fail(code: StatusCode, message: impl Into<String>) -> Self {
        ApiResponse::new(code, Status::Fail).with_message(message)
    }

    pub fn error(code: StatusCode, message: impl Into<String>) -> Self {
        ApiResponse::new(code, Status::Error).with_message(message)
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.body.message = Some(message.into());
        self
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.body.data = Some(data);
        self
    }

    pub fn code(&self) -> StatusCode {
        self.code
    }

    pub fn body(&self) -> &Envelope {
        &self.body
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        (self.code, Json(self.body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_omits_absent_fields() {
        let response = ApiResponse::success(StatusCode::OK).with_data(json!({ "books": [] }));

        assert_eq!(response.code(), StatusCode::OK);
        assert_eq!(
            serde_json::to_value(response.body()).unwrap(),
            json!({ "status": "success", "data": { "books": [] } })
        );
    }

    #[test]
    fn fail_and_error_carry_messages() {
        let fail = ApiResponse::fail(StatusCode::NOT_FOUND, "Buku tidak ditemukan");
        assert_eq!(
            serde_json::to_value(fail.body()).unwrap(),
            json!({ "status": "fail", "message": "Buku tidak ditemukan" })
        );

        let error = ApiResponse::error(StatusCode::INTERNAL_SERVER_ERROR, "Buku gagal ditambahkan");
        assert_eq!(error.body().status, Status::Error);
        assert_eq!(error.code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn renders_status_code() {
        let response = ApiResponse::success(StatusCode::CREATED)
            .with_message("Buku berhasil ditambahkan")
            .into_response();

        assert_eq!(response.status(), StatusCode::CREATED);
    }
}

use std::fmt;

use super::schemas::IrType;

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
    Trace,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Put => "PUT",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Trace => "TRACE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A client method stub for one document operation.
#[derive(Debug, Clone)]
pub struct IrOperation {
    /// Normalized method base name. Empty when the operation has no
    /// `operationId` and no fallback naming is configured.
    pub name: String,
    pub method: HttpMethod,
    pub path: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub deprecated: bool,
    /// Every status key the operation declares, with or without a body.
    pub declared_statuses: Vec<String>,
    /// Every resolved response body, in document order.
    pub responses: Vec<IrResponse>,
}

impl IrOperation {
    /// The response whose body a typed client method would return: the first
    /// 2xx status with content. `default` is only used when no 2xx status is
    /// declared at all, so a bodiless success never borrows the error schema.
    /// A JSON body wins over a binary one offered for the same status.
    pub fn success_response(&self) -> Option<&IrResponse> {
        let declares_success = self.declared_statuses.iter().any(|s| is_success_status(s));
        let chosen = if declares_success {
            self.responses.iter().find(|r| r.is_success())
        } else {
            self.responses.iter().find(|r| r.status == "default")
        };
        let status = chosen?.status.as_str();
        let mut same_status = self.responses.iter().filter(|r| r.status == status);
        same_status
            .clone()
            .find(|r| matches!(r.body, IrResponseBody::Json(_)))
            .or_else(|| same_status.next())
    }
}

/// One resolved response body.
#[derive(Debug, Clone, PartialEq)]
pub struct IrResponse {
    /// Status code, `2XX`-style range, or `default`.
    pub status: String,
    pub content_type: String,
    pub body: IrResponseBody,
}

impl IrResponse {
    pub fn is_success(&self) -> bool {
        is_success_status(&self.status)
    }
}

/// `200`, `204`, `2XX` and the like.
pub fn is_success_status(status: &str) -> bool {
    status.starts_with('2')
}

/// What a response body carries.
#[derive(Debug, Clone, PartialEq)]
pub enum IrResponseBody {
    /// A JSON document of the resolved type.
    Json(IrType),
    /// Raw bytes (file download, image, ...).
    Binary,
}

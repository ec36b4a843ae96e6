//! Static error catalog shared by the REST layer and the auth middleware.

use crate::problem::Problem;
use http::StatusCode;

/// Static error definition from the catalog.
#[derive(Debug, Clone, Copy)]
pub struct ErrDef {
    pub status: u16,
    pub title: &'static str,
    pub code: &'static str,
    pub type_url: &'static str,
}

impl ErrDef {
    pub fn as_problem(&self, detail: impl Into<String>) -> Problem {
        Problem {
            type_url: self.type_url.to_owned(),
            title: self.title.to_owned(),
            status: StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            detail: detail.into(),
            code: self.code.to_owned(),
            trace_id: None,
            errors: None,
        }
    }
}

pub const BAD_REQUEST: ErrDef = ErrDef {
    status: 400,
    title: "Bad Request",
    code: "FS_BAD_REQUEST",
    type_url: "urn:frontend-settings:error:bad-request",
};

pub const UNAUTHORIZED: ErrDef = ErrDef {
    status: 401,
    title: "Unauthorized",
    code: "FS_UNAUTHORIZED",
    type_url: "urn:frontend-settings:error:unauthorized",
};

pub const FORBIDDEN: ErrDef = ErrDef {
    status: 403,
    title: "Forbidden",
    code: "FS_FORBIDDEN",
    type_url: "urn:frontend-settings:error:forbidden",
};

pub const NOT_FOUND: ErrDef = ErrDef {
    status: 404,
    title: "Not Found",
    code: "FS_NOT_FOUND",
    type_url: "urn:frontend-settings:error:not-found",
};

pub const CONFLICT: ErrDef = ErrDef {
    status: 409,
    title: "Conflict",
    code: "FS_CONFLICT",
    type_url: "urn:frontend-settings:error:conflict",
};

pub const VALIDATION: ErrDef = ErrDef {
    status: 422,
    title: "Unprocessable Entity",
    code: "FS_VALIDATION",
    type_url: "urn:frontend-settings:error:validation",
};

pub const INTERNAL: ErrDef = ErrDef {
    status: 500,
    title: "Internal Server Error",
    code: "FS_INTERNAL",
    type_url: "urn:frontend-settings:error:internal",
};

pub const UNAVAILABLE: ErrDef = ErrDef {
    status: 503,
    title: "Service Unavailable",
    code: "FS_UNAVAILABLE",
    type_url: "urn:frontend-settings:error:unavailable",
};

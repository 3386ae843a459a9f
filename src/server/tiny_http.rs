//! `tiny_http` server adapter
//!
//! Handles routing, caller identity, body parsing, and response conversion for
//! `tiny_http`. Routing itself is a pure function over method, URL, identity
//! headers and body so it can be exercised without a socket.

use serde::{Serialize, de::DeserializeOwned};
use tiny_http::{Header, Method, Request, Response, Server, StatusCode};

use crate::api::{
    self, ApiError, ApiResponse, AttachDocumentRequest, CreateVerificationRequest, FlagRequest,
    ListRequestsQuery, ProcessPhaseRequest, RegisterInstitutionRequest, RejectRequest,
};
use crate::core::models::{Actor, Role};
use crate::core::services::Workflow;

/// Header carrying the caller's role
pub const ROLE_HEADER: &str = "X-Role";

/// Header carrying the caller's institution
pub const INSTITUTION_HEADER: &str = "X-Institution-Id";

/// A routed reply, before conversion to a `tiny_http` response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// HTTP status code
    pub status: u16,
    /// JSON body
    pub body: String,
}

/// Caller identity as read from request headers
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity<'a> {
    /// Value of `X-Role`
    pub role: Option<&'a str>,
    /// Value of `X-Institution-Id`
    pub institution: Option<&'a str>,
}

// =============================================================================
// SERVER LOOP
// =============================================================================

/// Serve the API until the process is stopped
pub fn serve(workflow: &Workflow, host: &str, port: u16) -> anyhow::Result<()> {
    let addr = format!("{host}:{port}");
    let server = Server::http(&addr).map_err(|e| anyhow::anyhow!("Failed to bind {addr}: {e}"))?;
    log::info!("listening on http://{addr}/api/v1 (scorer: {})", workflow.scorer_name());

    for mut request in server.incoming_requests() {
        let reply = handle_request(workflow, &mut request);
        log::debug!("{} {} -> {}", request.method(), request.url(), reply.status);
        if let Err(e) = request.respond(to_response(reply)) {
            log::warn!("failed to send response: {e}");
        }
    }
    Ok(())
}

/// Read identity and body from a `tiny_http` request and route it
fn handle_request(workflow: &Workflow, request: &mut Request) -> Reply {
    let mut body = String::new();
    if let Err(e) = request.as_reader().read_to_string(&mut body) {
        return error_reply(&ApiError::bad_request(format!(
            "Failed to read request body: {e}"
        )));
    }

    let role = header_value(request, ROLE_HEADER);
    let institution = header_value(request, INSTITUTION_HEADER);
    let identity = Identity {
        role: role.as_deref(),
        institution: institution.as_deref(),
    };

    route(workflow, request.method(), request.url(), identity, &body)
}

fn header_value(request: &Request, name: &'static str) -> Option<String> {
    request
        .headers()
        .iter()
        .find(|h| h.field.equiv(name))
        .map(|h| h.value.as_str().to_string())
}

// =============================================================================
// ROUTING
// =============================================================================

/// Map a request onto an API handler
///
/// Supports both `/api/v1/...` and `/api/...`. Every route requires a caller
/// identity.
pub fn route(
    workflow: &Workflow,
    method: &Method,
    url: &str,
    identity: Identity<'_>,
    body: &str,
) -> Reply {
    let (path, query) = url.split_once('?').unwrap_or((url, ""));
    let api_path = path
        .strip_prefix("/api/v1")
        .or_else(|| path.strip_prefix("/api"))
        .unwrap_or(path);

    let actor = match actor_from_headers(identity) {
        Ok(actor) => actor,
        Err(e) => return error_reply(&e),
    };

    match (method, api_path) {
        (&Method::Get, "/status") => handle_result(api::get_status(workflow, &actor)),
        (&Method::Get, "/institutions") => handle_result(api::list_institutions(workflow)),
        (&Method::Post, "/institutions") => {
            with_body(body, |req: RegisterInstitutionRequest| {
                api::register_institution(workflow, &actor, &req)
            })
        },
        (&Method::Get, "/requests") => {
            handle_result(api::list_requests(workflow, &actor, &parse_query(query)))
        },
        (&Method::Post, "/requests") => with_body(body, |req: CreateVerificationRequest| {
            api::create_request(workflow, &actor, &req)
        }),
        _ => match (method, request_route(api_path)) {
            (&Method::Get, Some((id, None))) => {
                handle_result(api::get_request(workflow, &actor, id))
            },
            (&Method::Post, Some((id, Some("process")))) => {
                with_body(body, |req: ProcessPhaseRequest| {
                    api::process_phase(workflow, &actor, id, &req)
                })
            },
            (&Method::Post, Some((id, Some("reject")))) => {
                with_body(body, |req: RejectRequest| {
                    api::reject_request(workflow, &actor, id, &req)
                })
            },
            (&Method::Post, Some((id, Some("flags")))) => with_body(body, |req: FlagRequest| {
                api::flag_request(workflow, &actor, id, &req)
            }),
            (&Method::Post, Some((id, Some("documents")))) => {
                with_body(body, |req: AttachDocumentRequest| {
                    api::attach_document(workflow, &actor, id, &req)
                })
            },
            _ => not_found_reply(&format!("API endpoint not found: {method} {api_path}")),
        },
    }
}

/// Split `/requests/{id}[/{action}]` into id and action
fn request_route(api_path: &str) -> Option<(&str, Option<&str>)> {
    let rest = api_path.strip_prefix("/requests/")?;
    let (id, action) = match rest.split_once('/') {
        Some((id, action)) => (id, Some(action)),
        None => (rest, None),
    };
    if id.is_empty() || action.is_some_and(|a| a.is_empty() || a.contains('/')) {
        return None;
    }
    Some((id, action))
}

/// Build the caller from identity headers
///
/// A missing or unknown role is unauthenticated, as is an institution user
/// without an institution.
pub fn actor_from_headers(identity: Identity<'_>) -> Result<Actor, ApiError> {
    let role = identity
        .role
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .ok_or_else(|| ApiError::unauthenticated(format!("Missing {ROLE_HEADER} header")))?;
    let role = role.parse::<Role>().map_err(ApiError::unauthenticated)?;

    let actor = Actor::new(role, identity.institution.map(|i| i.trim().to_string()));
    if role == Role::InstitutionUser && actor.institution_id.is_none() {
        return Err(ApiError::unauthenticated(format!(
            "{INSTITUTION_HEADER} header is required for institution users"
        )));
    }
    Ok(actor)
}

/// Parse `status`, `requesting` and `target` from a query string
///
/// Values are taken verbatim; ids and statuses never need escaping.
fn parse_query(query: &str) -> ListRequestsQuery {
    let mut parsed = ListRequestsQuery::default();
    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let value = Some(value.to_string()).filter(|v| !v.is_empty());
        match key {
            "status" => parsed.status = value,
            "requesting" => parsed.requesting = value,
            "target" => parsed.target = value,
            _ => log::debug!("ignoring query parameter {key}"),
        }
    }
    parsed
}

// =============================================================================
// BODY PARSING
// =============================================================================

/// Parse a JSON body and hand it to a handler
fn with_body<B, T, F>(body: &str, handler: F) -> Reply
where
    B: DeserializeOwned,
    T: Serialize,
    F: FnOnce(B) -> Result<T, ApiError>,
{
    handle_result(parse_json_body(body).and_then(handler))
}

fn parse_json_body<B: DeserializeOwned>(body: &str) -> Result<B, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::bad_request(format!("Invalid JSON: {e}")))
}

// =============================================================================
// RESPONSE CONVERSION
// =============================================================================

/// Convert a handler result to a reply
fn handle_result<T: Serialize>(result: Result<T, ApiError>) -> Reply {
    match result {
        Ok(data) => json_reply(&ApiResponse::success(data), 200),
        Err(e) => error_reply(&e),
    }
}

/// Create an error reply with the error's status code
fn error_reply(error: &ApiError) -> Reply {
    if error.status_code() >= 500 {
        log::warn!("request failed: {error}");
    }
    json_reply(&ApiResponse::error(error), error.status_code())
}

/// Create a 404 reply
fn not_found_reply(message: &str) -> Reply {
    error_reply(&ApiError::not_found(message))
}

/// Serialize data to a JSON reply with status code
fn json_reply<T: Serialize>(data: &T, status: u16) -> Reply {
    let body =
        serde_json::to_string(data).unwrap_or_else(|_| r#"{"success":false}"#.to_string());
    Reply { status, body }
}

fn to_response(reply: Reply) -> Response<std::io::Cursor<Vec<u8>>> {
    let response =
        Response::from_data(reply.body.into_bytes()).with_status_code(StatusCode(reply.status));
    match Header::from_bytes("Content-Type", "application/json") {
        Ok(header) => response.with_header(header),
        Err(()) => response,
    }
}

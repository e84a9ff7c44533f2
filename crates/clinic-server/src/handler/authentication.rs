//! Login and logout handlers.
//!
//! Login is the only public route: it verifies the credentials with the
//! [`CredentialAuthenticator`] and answers with the latest live access token
//! of the account, issuing a new one when none is left. Logout deletes the
//! token the request was authenticated with.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::State;
use axum::http::StatusCode;
use clinic_postgres::PgClient;
use clinic_postgres::query::{AccessTokenRepository, AccountRepository};

use crate::extract::{AccessTokenHeader, AuthState, Json, PgPool};
use crate::handler::request::Login;
use crate::handler::response::{Data, ErrorEnvelope, LoginData, Message};
use crate::handler::{ErrorKind, PgResultExt, Result};
use crate::service::{AccessTokenService, CredentialAuthenticator, ServiceState};

/// Tracing target for authentication operations.
const TRACING_TARGET: &str = "clinic_server::handler::authentication";

/// Exchanges credentials for an access token.
#[tracing::instrument(skip_all)]
async fn login(
    State(pg_client): State<PgClient>,
    State(authenticator): State<CredentialAuthenticator>,
    State(access_tokens): State<AccessTokenService>,
    Json(request): Json<Login>,
) -> Result<(StatusCode, Json<Data<LoginData>>)> {
    let Some(credentials) = request.into_credentials() else {
        tracing::debug!(target: TRACING_TARGET, "login without complete credentials");
        return Err(ErrorKind::MissingCredentials.into_error());
    };

    tracing::trace!(
        target: TRACING_TARGET,
        db = %credentials.db,
        login = %credentials.login,
        "login attempt"
    );

    let mut conn = pg_client.get_connection().await?;

    let Some(account) = authenticator
        .authenticate(
            &mut conn,
            &credentials.db,
            &credentials.login,
            &credentials.password,
        )
        .await?
    else {
        tracing::warn!(
            target: TRACING_TARGET,
            login = %credentials.login,
            "login failed"
        );
        return Err(ErrorKind::AuthenticationFailed.with_message("Invalid credentials"));
    };

    let company = conn
        .find_company_by_id(account.company_id)
        .await
        .on_failure(ErrorKind::ServerError)?;

    let access_token = access_tokens
        .find_or_create_token(&mut conn, account.id, true)
        .await
        .on_failure(ErrorKind::ServerError)?
        .ok_or_else(|| {
            ErrorKind::ServerError
                .with_message("Failed to issue an access token")
                .with_resource("access_token")
        })?;

    tracing::info!(
        target: TRACING_TARGET,
        account_id = account.id,
        token_id = access_token.id,
        expires_at = ?access_token.expires_at,
        "login succeeded"
    );

    let data = LoginData::new(account, company, access_token.token);
    Ok((StatusCode::OK, Json(Data::new(data))))
}

fn login_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Log in")
        .description(
            "Verifies `db`, `login` and `password` and returns an access token. Send the token \
             in the `access_token` header of every other request. Tokens expire after 24 hours.",
        )
        .response::<200, Json<Data<LoginData>>>()
        .response::<400, Json<ErrorEnvelope<'static>>>()
        .response::<401, Json<ErrorEnvelope<'static>>>()
        .response::<500, Json<ErrorEnvelope<'static>>>()
}

/// Deletes the access token of the caller.
#[tracing::instrument(skip_all, fields(account_id = auth_state.account_id))]
async fn logout(
    PgPool(mut conn): PgPool,
    AuthState(auth_state): AuthState,
    access_token: AccessTokenHeader,
) -> Result<(StatusCode, Json<Message>)> {
    tracing::debug!(target: TRACING_TARGET, "logging out");

    let deleted = conn
        .delete_access_tokens_by_value(access_token.as_str())
        .await
        .on_failure(ErrorKind::LogoutError)?;

    tracing::info!(
        target: TRACING_TARGET,
        token_id = auth_state.token_id,
        deleted,
        "logged out"
    );

    Ok((StatusCode::OK, Json(Message::new("Logged out successfully"))))
}

fn logout_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Log out")
        .description("Deletes the access token sent in the `access_token` header.")
        .response::<200, Json<Message>>()
        .response::<401, Json<ErrorEnvelope<'static>>>()
        .response::<500, Json<ErrorEnvelope<'static>>>()
}

/// Returns the public login route.
pub fn public_routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route("/api/login", post_with(login, login_docs))
        .with_path_items(|item| item.tag("Authentication"))
}

/// Returns the logout route, which requires authentication.
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route("/api/logout", post_with(logout, logout_docs))
        .with_path_items(|item| item.tag("Authentication"))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::handler::test::create_test_server_with_router;
    use crate::middleware::RouterAuthExt;

    #[tokio::test]
    async fn login_requires_every_credential() -> anyhow::Result<()> {
        let server = create_test_server_with_router(|_| public_routes())?;

        let response = server
            .post("/api/login")
            .json(&json!({ "db": "clinic", "login": "admin" }))
            .await;
        response.assert_status_bad_request();

        let body: serde_json::Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "missing_credentials");
        assert_eq!(body["status"], 400);
        Ok(())
    }

    #[tokio::test]
    async fn blank_password_is_missing() -> anyhow::Result<()> {
        let server = create_test_server_with_router(|_| public_routes())?;

        let response = server
            .post("/api/login")
            .json(&json!({ "db": "clinic", "login": "admin", "password": "" }))
            .await;

        let body: serde_json::Value = response.json();
        assert_eq!(body["error"]["code"], "missing_credentials");
        Ok(())
    }

    #[tokio::test]
    async fn logout_requires_a_token() -> anyhow::Result<()> {
        let server = create_test_server_with_router(|state| routes().with_authentication(state))?;

        let response = server.post("/api/logout").await;
        response.assert_status_unauthorized();

        let body: serde_json::Value = response.json();
        assert_eq!(body["error"]["code"], "access_token_not_found");
        Ok(())
    }
}

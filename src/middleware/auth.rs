use axum::{
    extract::{FromRequestParts, Path, Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::{JwtError, TokenService};
use crate::database::{Account, AccountStore, DatabaseError};
use crate::error::ApiError;
use crate::state::AppState;

/// Why the account gate refused a request. Logged, never sent to the client.
#[derive(Debug)]
pub enum Denial {
    MissingToken,
    InvalidToken(JwtError),
    InvalidId(String),
    UnknownAccount(DatabaseError),
    NumberMismatch { account: i64, token: i64 },
}

impl std::fmt::Display for Denial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Denial::MissingToken => write!(f, "missing token header"),
            Denial::InvalidToken(e) => write!(f, "{}", e),
            Denial::InvalidId(raw) => write!(f, "invalid account id {:?}", raw),
            Denial::UnknownAccount(e) => write!(f, "account lookup failed: {}", e),
            Denial::NumberMismatch { account, token } => {
                write!(f, "token bound to account {} used for account {}", token, account)
            }
        }
    }
}

/// Guard for `/account/:id`.
///
/// Every failure is collapsed into the same 403 response so callers cannot
/// tell a missing token from a wrong account. The request reaches the
/// handler unmodified.
pub async fn account_gate(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let (mut parts, body) = request.into_parts();

    let raw_id = Path::<String>::from_request_parts(&mut parts, &state)
        .await
        .ok()
        .map(|Path(id)| id);

    match authorize(
        state.tokens(),
        state.store().as_ref(),
        state.token_header(),
        &parts.headers,
        raw_id.as_deref(),
    )
    .await
    {
        Ok(account) => {
            tracing::debug!("Account gate passed for account {} (id {})", account.number, account.id);
            Ok(next.run(Request::from_parts(parts, body)).await)
        }
        Err(denial) => {
            tracing::warn!("Account gate denied {} {}: {}", parts.method, parts.uri.path(), denial);
            Err(ApiError::permission_denied())
        }
    }
}

/// Runs the gate checks in order and stops at the first failure
pub async fn authorize(
    tokens: &TokenService,
    store: &dyn AccountStore,
    token_header: &str,
    headers: &HeaderMap,
    raw_id: Option<&str>,
) -> Result<Account, Denial> {
    let token = headers
        .get(token_header)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or(Denial::MissingToken)?;

    let claims = tokens.verify(token).map_err(Denial::InvalidToken)?;

    let raw_id = raw_id.unwrap_or_default();
    let id = raw_id
        .parse::<i32>()
        .map_err(|_| Denial::InvalidId(raw_id.to_string()))?;

    let account = store
        .get_account_by_id(id)
        .await
        .map_err(Denial::UnknownAccount)?;

    if account.number != claims.account_number {
        return Err(Denial::NumberMismatch {
            account: account.number,
            token: claims.account_number,
        });
    }

    Ok(account)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Claims;
    use crate::database::{MemoryStore, NewAccount};
    use axum::http::HeaderValue;
    use chrono::Duration;

    const HEADER: &str = "x-jwt-token";

    fn tokens() -> TokenService {
        TokenService::new("gate-secret", Duration::hours(1))
    }

    async fn store_with_account(number: i64) -> (MemoryStore, Account) {
        let store = MemoryStore::new();
        let mut account = NewAccount::with_hash("A", "B", "hash".to_string());
        account.number = number;
        let account = store.create_account(account).await.unwrap();
        (store, account)
    }

    fn headers_with(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(HEADER, HeaderValue::from_str(token).unwrap());
        headers
    }

    #[tokio::test]
    async fn allows_matching_account() {
        let (store, account) = store_with_account(1234).await;
        let token = tokens().issue(&account).unwrap();
        let id = account.id.to_string();

        let allowed = authorize(&tokens(), &store, HEADER, &headers_with(&token), Some(&id))
            .await
            .unwrap();
        assert_eq!(allowed, account);
    }

    #[tokio::test]
    async fn denies_missing_or_empty_header() {
        let (store, account) = store_with_account(1234).await;
        let id = account.id.to_string();

        let denial = authorize(&tokens(), &store, HEADER, &HeaderMap::new(), Some(&id)).await;
        assert!(matches!(denial, Err(Denial::MissingToken)));

        let denial = authorize(&tokens(), &store, HEADER, &headers_with(""), Some(&id)).await;
        assert!(matches!(denial, Err(Denial::MissingToken)));
    }

    #[tokio::test]
    async fn ignores_standard_authorization_header() {
        let (store, account) = store_with_account(1234).await;
        let token = tokens().issue(&account).unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(
            "authorization",
            HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
        );

        let denial = authorize(&tokens(), &store, HEADER, &headers, Some(&account.id.to_string())).await;
        assert!(matches!(denial, Err(Denial::MissingToken)));
    }

    #[tokio::test]
    async fn denies_garbage_token() {
        let (store, account) = store_with_account(1234).await;
        let denial = authorize(
            &tokens(),
            &store,
            HEADER,
            &headers_with("not.a.token"),
            Some(&account.id.to_string()),
        )
        .await;
        assert!(matches!(denial, Err(Denial::InvalidToken(_))));
    }

    #[tokio::test]
    async fn denies_non_numeric_id() {
        let (store, account) = store_with_account(1234).await;
        let token = tokens().issue(&account).unwrap();
        let denial = authorize(&tokens(), &store, HEADER, &headers_with(&token), Some("abc")).await;
        assert!(matches!(denial, Err(Denial::InvalidId(_))));
    }

    #[tokio::test]
    async fn denies_unknown_account() {
        let (store, account) = store_with_account(1234).await;
        let token = tokens().issue(&account).unwrap();
        let denial = authorize(&tokens(), &store, HEADER, &headers_with(&token), Some("999")).await;
        assert!(matches!(denial, Err(Denial::UnknownAccount(DatabaseError::NotFound(_)))));
    }

    #[tokio::test]
    async fn denies_token_for_other_account() {
        let (store, account) = store_with_account(1234).await;
        let token = tokens()
            .issue_claims(&Claims::new(4321, Duration::hours(1)))
            .unwrap();
        let denial = authorize(
            &tokens(),
            &store,
            HEADER,
            &headers_with(&token),
            Some(&account.id.to_string()),
        )
        .await;
        assert!(matches!(
            denial,
            Err(Denial::NumberMismatch { account: 1234, token: 4321 })
        ));
    }
}

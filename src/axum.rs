//! Axum integration for inbound payment notifications

use crate::container::{NotificationContainer, SecretPhrase};
use crate::notification::{PaymentNotification, ACKNOWLEDGEMENT_BODY};
use axum::{
    extract::{
        rejection::{FormRejection, QueryRejection},
        Form, Query, State,
    },
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Handler invoked with every notification whose signature checks out
pub type NotificationHandler = Arc<dyn Fn(PaymentNotification) + Send + Sync>;

/// Fields posted by the gateway. Missing or unreadable fields are read as
/// empty and simply fail signature validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotificationParams {
    #[serde(default)]
    pub cmd: String,
    #[serde(default)]
    pub args: String,
    #[serde(default)]
    pub sign: String,
}

#[derive(Clone)]
struct NotificationState {
    secret_phrase: SecretPhrase,
    handler: NotificationHandler,
}

impl std::fmt::Debug for NotificationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationState")
            .field("secret_phrase", &self.secret_phrase)
            .field("handler", &"<function>")
            .finish()
    }
}

/// Router answering gateway notifications on `path` (GET query or POST form).
///
/// Every call is acknowledged with 200 `OK`; only notifications with a
/// valid signature reach `handler`.
pub fn notification_router<F>(
    path: &str,
    secret_phrase: impl Into<SecretPhrase>,
    handler: F,
) -> Router
where
    F: Fn(PaymentNotification) + Send + Sync + 'static,
{
    let state = NotificationState {
        secret_phrase: secret_phrase.into(),
        handler: Arc::new(handler),
    };

    Router::new()
        .route(path, get(notification_query).post(notification_form))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn notification_query(
    State(state): State<NotificationState>,
    params: std::result::Result<Query<NotificationParams>, QueryRejection>,
) -> impl IntoResponse {
    let params = match params {
        Ok(Query(params)) => params,
        Err(rejection) => {
            warn!(error = %rejection, "Unreadable notification query");
            NotificationParams::default()
        }
    };
    handle_notification(&state, params)
}

async fn notification_form(
    State(state): State<NotificationState>,
    params: std::result::Result<Form<NotificationParams>, FormRejection>,
) -> impl IntoResponse {
    let params = match params {
        Ok(Form(params)) => params,
        Err(rejection) => {
            warn!(error = %rejection, "Unreadable notification form");
            NotificationParams::default()
        }
    };
    handle_notification(&state, params)
}

fn handle_notification(
    state: &NotificationState,
    params: NotificationParams,
) -> (StatusCode, &'static str) {
    let container = NotificationContainer::new(
        state.secret_phrase.clone(),
        params.cmd,
        params.args,
        params.sign,
    );
    let notification = PaymentNotification::new(container);

    if notification.check_sign() {
        info!(
            cmd = notification.cmd(),
            order_id = notification.order_id().unwrap_or_default(),
            "Accepted payment notification"
        );
        (state.handler)(notification);
    } else {
        warn!(cmd = notification.cmd(), "Rejected notification with invalid sign");
    }

    (StatusCode::OK, ACKNOWLEDGEMENT_BODY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::SignatureScheme;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use std::sync::Mutex;
    use tower::ServiceExt;

    fn recording_router() -> (Router, Arc<Mutex<Vec<String>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let router = notification_router("/notify", "secret", move |notification| {
            let order_id = notification.order_id().unwrap_or_default().to_string();
            sink.lock().unwrap().push(order_id);
        });
        (router, seen)
    }

    fn sign(args: &str) -> String {
        SignatureScheme::Md5.digest_hex(&format!("transactionStatusChanged{}secret", args))
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_valid_query_notification() {
        let (router, seen) = recording_router();
        let uri = format!(
            "/notify?cmd=transactionStatusChanged&args=TEST_abc&sign={}",
            sign("TEST_abc")
        );

        let response = router
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "OK");
        assert_eq!(*seen.lock().unwrap(), ["TEST_abc"]);
    }

    #[tokio::test]
    async fn test_forged_form_notification_is_acknowledged_but_dropped() {
        let (router, seen) = recording_router();
        let request = Request::post("/notify")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("cmd=transactionStatusChanged&args=TEST_abc&sign=deadbeef"))
            .unwrap();

        let response = router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "OK");
        assert!(seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_fields_are_acknowledged() {
        let (router, seen) = recording_router();
        let response = router
            .oneshot(Request::get("/notify").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_form_without_content_type_is_acknowledged() {
        let (router, seen) = recording_router();
        let body = format!(
            "cmd=transactionStatusChanged&args=TEST_abc&sign={}",
            sign("TEST_abc")
        );
        let request = Request::post("/notify").body(Body::from(body)).unwrap();

        let response = router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "OK");
        assert!(seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_query_keys_are_acknowledged() {
        let (router, seen) = recording_router();
        let response = router
            .oneshot(
                Request::get("/notify?cmd=a&cmd=b&args=x&sign=y")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "OK");
        assert!(seen.lock().unwrap().is_empty());
    }
}

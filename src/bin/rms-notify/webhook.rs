use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use razer_rms::{
    OnlineClient, mask,
    online::notify::{NotifyPayload, RefundNotifyPayload},
    transport::{ReqwestTransport, Transport},
};
use tracing::instrument;

/// Reply the gateway expects once a notification is accepted
const CALLBACK_ACK: &str = "CBTOKEN:MPSTATOK";

#[instrument(skip_all)]
async fn notify_handler<T: Transport>(
    State(client): State<OnlineClient<T>>,
    Form(notify): Form<NotifyPayload>,
) -> Response {
    tracing::trace!(
        data = %mask::secure_serializable(&notify),
        "Received payment notification"
    );
    match client.verify_notify(&notify) {
        Ok(true) => {}
        Ok(false) => {
            tracing::warn!(order_id = %notify.orderid, "Payment notification signature mismatch");
            return StatusCode::UNAUTHORIZED.into_response();
        }
        Err(e) => {
            tracing::warn!("Malformed payment notification: {e}");
            return StatusCode::BAD_REQUEST.into_response();
        }
    }
    tracing::info!(
        order_id = %notify.orderid,
        tran_id = %notify.tran_id,
        status = %notify.status,
        "Verified payment notification"
    );

    match client.echo_back(&notify).await {
        Ok(()) => CALLBACK_ACK.into_response(),
        Err(e) => {
            tracing::error!("Failed to echo payment notification back: {e}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[instrument(skip_all)]
async fn refund_notify_handler<T: Transport>(
    State(client): State<OnlineClient<T>>,
    Form(notify): Form<RefundNotifyPayload>,
) -> StatusCode {
    tracing::trace!(
        data = %mask::secure_serializable(&notify),
        "Received refund notification"
    );
    match client.verify_refund_notify(&notify) {
        Ok(true) => {
            tracing::info!(
                ref_id = %notify.ref_id,
                refund_id = %notify.refund_id,
                status = %notify.status,
                "Verified refund notification"
            );
            StatusCode::OK
        }
        Ok(false) => {
            tracing::warn!(ref_id = %notify.ref_id, "Refund notification signature mismatch");
            StatusCode::UNAUTHORIZED
        }
        Err(e) => {
            tracing::warn!("Malformed refund notification: {e}");
            StatusCode::BAD_REQUEST
        }
    }
}

pub fn router() -> axum::Router<crate::state::AppState> {
    axum::Router::new()
        .route("/notify", post(notify_handler::<ReqwestTransport>))
        .route("/refund-notify", post(refund_notify_handler::<ReqwestTransport>))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use razer_rms::{
        OnlineConfig,
        transport::{HttpRequest, HttpResponse},
    };

    use super::*;

    /// Records outgoing requests and answers each with a fixed status
    #[derive(Debug, Clone)]
    struct Recorder {
        status: u16,
        requests: Arc<Mutex<Vec<HttpRequest>>>,
    }

    impl Recorder {
        fn new(status: u16) -> Self {
            Self {
                status,
                requests: Arc::default(),
            }
        }

        fn requests(&self) -> Vec<HttpRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl Transport for Recorder {
        async fn send(&self, request: HttpRequest) -> razer_rms::Result<HttpResponse> {
            self.requests.lock().unwrap().push(request);
            Ok(HttpResponse {
                status: self.status,
                body: String::new(),
            })
        }
    }

    fn client(status: u16) -> (OnlineClient<Recorder>, Recorder) {
        let transport = Recorder::new(status);
        let config = OnlineConfig::new("M1", "V1", "S1", "https://shop.test").unwrap();
        let client = OnlineClient::with_transport(config, transport.clone()).unwrap();
        (client, transport)
    }

    fn signed_notify(client: &OnlineClient<Recorder>) -> NotifyPayload {
        let mut notify = NotifyPayload {
            nbcb: "1".into(),
            amount: "5.00".into(),
            orderid: "ORDER123".into(),
            tran_id: "T1".into(),
            domain: "M1".into(),
            status: "00".into(),
            appcode: "A1".into(),
            error_code: String::new(),
            error_desc: String::new(),
            skey: String::new(),
            currency: "MYR".into(),
            channel: "fpx_mb2u".into(),
            extra_p: None,
            paydate: "2022-01-01".into(),
        };
        notify.skey = client.notify_key(&notify).unwrap();
        notify
    }

    fn signed_refund_notify(client: &OnlineClient<Recorder>) -> RefundNotifyPayload {
        let mut notify = RefundNotifyPayload {
            refund_type: "P".into(),
            merchant_id: "M1".into(),
            ref_id: "ORDER123".into(),
            refund_id: "R1".into(),
            txn_id: "T1".into(),
            amount: "5.00".into(),
            status: "00".into(),
            signature: String::new(),
            reason: String::new(),
        };
        notify.signature = client.refund_notify_key(&notify).unwrap();
        notify
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn verified_notification_is_echoed_and_acknowledged() {
        let (client, transport) = client(200);
        let notify = signed_notify(&client);

        let response = notify_handler(State(client), Form(notify)).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, CALLBACK_ACK);
        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].url.as_str(),
            "https://pay.merchant.razer.com/RMS/API/chkstat/returnipn.php"
        );
        let body = requests[0].body.as_deref().unwrap();
        assert!(body.contains("treq=1"));
        assert!(body.contains("tranID=T1"));
    }

    #[tokio::test]
    async fn tampered_notification_is_unauthorized() {
        let (client, transport) = client(200);
        let mut notify = signed_notify(&client);
        notify.amount = "500.00".into();

        let response = notify_handler(State(client), Form(notify)).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn incomplete_notification_is_bad_request() {
        let (client, transport) = client(200);
        let mut notify = signed_notify(&client);
        notify.tran_id = String::new();

        let response = notify_handler(State(client), Form(notify)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn failed_echo_is_server_error() {
        let (client, _transport) = client(503);
        let notify = signed_notify(&client);

        let response = notify_handler(State(client), Form(notify)).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn refund_notification_outcomes() {
        let (client, _transport) = client(200);
        let notify = signed_refund_notify(&client);
        let status = refund_notify_handler(State(client.clone()), Form(notify.clone())).await;
        assert_eq!(status, StatusCode::OK);

        let mut tampered = notify.clone();
        tampered.status = "11".into();
        let status = refund_notify_handler(State(client.clone()), Form(tampered)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let mut incomplete = notify;
        incomplete.refund_id = String::new();
        let status = refund_notify_handler(State(client), Form(incomplete)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}

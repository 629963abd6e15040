use razer_rms::OnlineClient;

#[derive(Debug, Clone, axum::extract::FromRef)]
pub struct AppState {
    pub online: OnlineClient,
}

impl AppState {
    pub fn new(online: OnlineClient) -> Self {
        Self { online }
    }
}

use crate::config::Config;
use crate::export::Exporter;
use crate::mail::TransmissionService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub exporter: Exporter,
    pub transmission: TransmissionService,
}

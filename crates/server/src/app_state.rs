use std::sync::Arc;

use backend_client::InventoryBackend;

use crate::templates::TemplateRegistry;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) backend: Arc<dyn InventoryBackend>,
    pub(crate) templates: Arc<TemplateRegistry>,
    pub(crate) backend_url: String,
}

use std::sync::Arc;

use waypath_core::NavModel;

use crate::remote::RemoteProvider;

/// Shared application state: the immutable navigation model and the
/// optional remote routing provider
#[derive(Clone)]
pub struct AppState {
    pub model: Arc<NavModel>,
    pub remote: Option<Arc<RemoteProvider>>,
}

impl AppState {
    pub fn new(model: NavModel, remote: Option<RemoteProvider>) -> Self {
        Self {
            model: Arc::new(model),
            remote: remote.map(Arc::new),
        }
    }
}

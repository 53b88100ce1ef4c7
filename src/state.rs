use std::sync::Arc;

use crate::auth::TokenVerifier;
use crate::database::Store;

/// Collaborators shared by every request; cloned per request
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub verifier: Arc<TokenVerifier>,
    pub excited: bool,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, verifier: TokenVerifier) -> Self {
        Self {
            store,
            verifier: Arc::new(verifier),
            excited: false,
        }
    }

    pub fn excited(mut self, excited: bool) -> Self {
        self.excited = excited;
        self
    }
}

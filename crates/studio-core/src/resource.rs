use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use bytes::Bytes;
use uuid::Uuid;

use crate::surface::Surface;

const URL_PREFIX: &str = "blob:pocket-studio/";

/// Revocable local address of an in-memory audio payload
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectUrl(String);

impl ObjectUrl {
    fn generate() -> Self {
        Self(format!("{URL_PREFIX}{}", Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A resolved object URL together with the payload it addresses
#[derive(Debug, Clone)]
pub struct Playable {
    pub url: ObjectUrl,
    pub audio: Bytes,
}

/// Registry of live object URLs
///
/// Payloads stay alive until their URL is revoked.
#[derive(Debug, Default)]
pub struct ResourceStore {
    entries: Mutex<HashMap<ObjectUrl, Bytes>>,
}

impl ResourceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a payload under a fresh URL
    pub fn create(&self, audio: Bytes) -> ObjectUrl {
        let url = ObjectUrl::generate();
        self.lock().insert(url.clone(), audio);
        url
    }

    /// Release a payload; revoking an unknown URL is a no-op
    pub fn revoke(&self, url: &ObjectUrl) -> bool {
        self.lock().remove(url).is_some()
    }

    pub fn resolve(&self, url: &ObjectUrl) -> Option<Bytes> {
        self.lock().get(url).cloned()
    }

    /// Number of URLs not yet revoked
    pub fn live_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<ObjectUrl, Bytes>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Turns generated audio into the player source and download target
///
/// Holds at most one live URL: the previous one is revoked before a new one
/// is handed to the surface.
pub struct ResourceDecoder {
    store: Arc<ResourceStore>,
    surface: Arc<dyn Surface>,
    current: Mutex<Option<ObjectUrl>>,
}

impl ResourceDecoder {
    pub fn new(store: Arc<ResourceStore>, surface: Arc<dyn Surface>) -> Self {
        Self {
            store,
            surface,
            current: Mutex::new(None),
        }
    }

    /// Publish a payload and reveal the output area
    ///
    /// Autoplay refusal is logged and otherwise ignored.
    pub fn decode(&self, audio: Bytes) -> ObjectUrl {
        let size = audio.len();

        let url = {
            let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(previous) = current.take() {
                self.store.revoke(&previous);
                tracing::debug!(url = %previous, "revoked superseded audio");
            }

            let url = self.store.create(audio.clone());
            *current = Some(url.clone());
            url
        };

        let playable = Playable { url: url.clone(), audio };

        self.surface.set_player_source(&playable);
        self.surface.set_download_target(&playable);
        self.surface.set_output_visible(true);

        tracing::info!(url = %url, bytes = size, "audio ready");

        if let Err(e) = self.surface.play() {
            tracing::debug!(error = %e, "autoplay prevented");
        }

        url
    }

    /// URL currently assigned to the player, if any
    pub fn current_url(&self) -> Option<ObjectUrl> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

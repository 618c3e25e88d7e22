//! Platform constructors for the client core.
//!
//! Picks the [`store::CredentialStore`] the session persists into:
//! - **Web** (WASM + `web` feature): `localStorage` via [`store::LocalStorageStore`]
//! - **Native**: a JSON file under `<data_dir>/flock` via [`store::FileStore`]

use api::{
    ApiClient, ClientConfig, CommentStore, FollowStore, HttpTransport, LikeStore, PostStore,
    ProfileStore, SessionStore,
};

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type PlatformStore = store::LocalStorageStore;
#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
pub type PlatformStore = store::FileStore;

pub type Client = ApiClient<HttpTransport, PlatformStore>;

/// Create the platform credential store.
pub fn make_credentials() -> PlatformStore {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        store::LocalStorageStore::new()
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        let base = dirs::data_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("flock");
        store::FileStore::new(base)
    }
}

/// Every store the views use, sharing one client and one session.
#[derive(Clone)]
pub struct Services {
    pub session: SessionStore<HttpTransport, PlatformStore>,
    pub posts: PostStore<HttpTransport, PlatformStore>,
    pub comments: CommentStore<HttpTransport, PlatformStore>,
    pub likes: LikeStore<HttpTransport, PlatformStore>,
    pub follows: FollowStore<HttpTransport, PlatformStore>,
    pub profiles: ProfileStore<HttpTransport, PlatformStore>,
}

impl Services {
    pub fn new(config: ClientConfig) -> Self {
        let transport = HttpTransport::new(&config.api.base_url);
        let client: Client = ApiClient::new(transport, make_credentials(), config);
        Self {
            session: SessionStore::new(client.clone()),
            posts: PostStore::new(client.clone()),
            comments: CommentStore::new(client.clone()),
            likes: LikeStore::new(client.clone()),
            follows: FollowStore::new(client.clone()),
            profiles: ProfileStore::new(client),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        self.session.client().config()
    }
}

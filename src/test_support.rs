//! In-memory stand-ins for the API, toast and modal seams.

use crate::api::*;
use crate::components::{ModalHost, ModalId, ModalKind, Toast, ToastSink};
use crate::error::ApiError;
use async_trait::async_trait;
use std::cell::{Cell, RefCell};

#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    GetUserPlaylists {
        user_name: String,
        auth_token: Option<String>,
        query: PlaylistQuery,
    },
    AddPlaylistItems {
        auth_token: String,
        playlist_mbid: String,
        tracks: Vec<JspfTrack>,
    },
    CreatePlaylist {
        auth_token: String,
        playlist: JspfPlaylist,
    },
}

pub enum Reply<T> {
    Ok(T),
    Fail(u16, &'static str),
}

impl<T: Clone> Reply<T> {
    fn get(&self) -> Result<T, ApiError> {
        match self {
            Self::Ok(value) => Ok(value.clone()),
            Self::Fail(status, message) => Err(ApiError::Status {
                status: *status,
                message: message.to_string(),
            }),
        }
    }
}

pub struct FakeApi {
    pub calls: RefCell<Vec<ApiCall>>,
    pub playlists: Reply<UserPlaylistsResponse>,
    pub add_status: Reply<u16>,
    pub created_mbid: Reply<String>,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            playlists: Reply::Ok(UserPlaylistsResponse::default()),
            add_status: Reply::Ok(200),
            created_mbid: Reply::Ok("new-playlist".to_string()),
        }
    }
}

impl FakeApi {
    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.borrow().clone()
    }
}

#[async_trait(?Send)]
impl PlaylistApi for FakeApi {
    async fn get_user_playlists(
        &self,
        user_name: &str,
        auth_token: Option<&str>,
        query: PlaylistQuery,
    ) -> Result<UserPlaylistsResponse, ApiError> {
        self.calls.borrow_mut().push(ApiCall::GetUserPlaylists {
            user_name: user_name.to_string(),
            auth_token: auth_token.map(str::to_string),
            query,
        });
        self.playlists.get()
    }

    async fn add_playlist_items(
        &self,
        auth_token: &str,
        playlist_mbid: &str,
        tracks: &[JspfTrack],
    ) -> Result<u16, ApiError> {
        self.calls.borrow_mut().push(ApiCall::AddPlaylistItems {
            auth_token: auth_token.to_string(),
            playlist_mbid: playlist_mbid.to_string(),
            tracks: tracks.to_vec(),
        });
        self.add_status.get()
    }

    async fn create_playlist(
        &self,
        auth_token: &str,
        playlist: &JspfPlaylist,
    ) -> Result<String, ApiError> {
        self.calls.borrow_mut().push(ApiCall::CreatePlaylist {
            auth_token: auth_token.to_string(),
            playlist: playlist.clone(),
        });
        self.created_mbid.get()
    }
}

#[derive(Default)]
pub struct RecordingToasts(pub RefCell<Vec<Toast>>);

impl RecordingToasts {
    pub fn all(&self) -> Vec<Toast> {
        self.0.borrow().clone()
    }
}

impl ToastSink for RecordingToasts {
    fn push(&self, toast: Toast) {
        self.0.borrow_mut().push(toast);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ModalEvent {
    Shown(ModalKind),
    Closed(ModalId),
}

#[derive(Default)]
pub struct RecordingModals {
    pub events: RefCell<Vec<ModalEvent>>,
    next: Cell<u64>,
}

impl RecordingModals {
    pub fn events(&self) -> Vec<ModalEvent> {
        self.events.borrow().clone()
    }
}

impl ModalHost for RecordingModals {
    fn show(&self, kind: ModalKind) -> ModalId {
        self.events.borrow_mut().push(ModalEvent::Shown(kind));
        let next = self.next.get() + 100;
        self.next.set(next);
        ModalId::for_tests(next)
    }

    fn close(&self, id: ModalId) {
        self.events.borrow_mut().push(ModalEvent::Closed(id));
    }
}

pub fn user(token: Option<&str>) -> CurrentUser {
    CurrentUser {
        id: Some(1),
        name: "rob".to_string(),
        auth_token: token.map(str::to_string),
    }
}

pub fn playlist(title: &str, mbid: Option<&str>) -> JspfObject {
    JspfObject {
        playlist: JspfPlaylist {
            title: title.to_string(),
            identifier: mbid.map(|mbid| format!("{PLAYLIST_URI_PREFIX}{mbid}")),
            ..Default::default()
        },
    }
}

pub fn listen() -> TrackDescriptor {
    TrackDescriptor::Listen(Listen {
        listened_at: Some(1_700_000_000),
        user_name: Some("rob".to_string()),
        track_metadata: TrackMetadata {
            artist_name: "Portishead".to_string(),
            track_name: "Roads".to_string(),
            release_name: Some("Dummy".to_string()),
            additional_info: Some(AdditionalInfo {
                recording_mbid: Some("rec-1".to_string()),
                ..Default::default()
            }),
            mbid_mapping: None,
        },
    })
}

/// Let `dom` run its tasks, effects and re-renders for `ms` milliseconds.
#[cfg(not(target_arch = "wasm32"))]
pub async fn run_dom_for(dom: &mut dioxus::prelude::VirtualDom, ms: u64) {
    let _ = tokio::time::timeout(std::time::Duration::from_millis(ms), async {
        loop {
            dom.wait_for_work().await;
            dom.render_immediate(&mut dioxus::core::NoOpMutations);
        }
    })
    .await;
}

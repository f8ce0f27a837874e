//! Loading, adding, and hand-off steps behind the add-to-playlist dialog.

use crate::api::*;
use crate::components::{ModalHost, ModalId, ModalKind, Toast, ToastSink};
use crate::error::AddToPlaylistError;
use crate::playlist_cache::{CacheRead, PlaylistCache};
use crate::session_store::SessionStore;
use tracing::{debug, error, info, warn};

pub const LOAD_PLAYLISTS_ERROR_TOAST: &str = "load-playlists-error";
pub const ADD_TRACK_SUCCESS_TOAST: &str = "success-add-track-to-playlist";
pub const ADD_TRACK_ERROR_TOAST: &str = "error-add-track-to-playlist";

/// The playlist entry a user clicked.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaylistTarget {
    pub title: String,
    pub identifier: Option<String>,
}

impl From<&JspfPlaylist> for PlaylistTarget {
    fn from(playlist: &JspfPlaylist) -> Self {
        Self {
            title: playlist.title.clone(),
            identifier: playlist.identifier().map(str::to_string),
        }
    }
}

/// Playlists already fetched this session, if the cached copy is readable.
pub fn cached_playlists(store: &dyn SessionStore) -> Option<Vec<JspfObject>> {
    match PlaylistCache::new(store).read() {
        CacheRead::Hit(playlists) => {
            debug!(count = playlists.len(), "Using cached playlists");
            Some(playlists)
        }
        CacheRead::Corrupt(err) => {
            warn!("Ignoring unreadable cached playlists: {err}");
            None
        }
        CacheRead::Miss => None,
    }
}

/// Fetch the user's own playlists and mirror them into the session cache.
///
/// Anonymous users get an empty list without a request. Failures are shown
/// as a toast and also yield an empty list.
pub async fn fetch_playlists(
    api: &dyn PlaylistApi,
    store: &dyn SessionStore,
    user: Option<&CurrentUser>,
    page_size: u32,
    toasts: &dyn ToastSink,
) -> Vec<JspfObject> {
    let Some((user, token)) = user.and_then(|user| user.auth_token().map(|token| (user, token)))
    else {
        return Vec::new();
    };

    match api
        .get_user_playlists(&user.name, Some(token), PlaylistQuery::owned(page_size))
        .await
    {
        Ok(response) => {
            if let Err(err) = PlaylistCache::new(store).write(&response.playlists) {
                warn!("Could not cache playlists: {err}");
            }
            response.playlists
        }
        Err(err) => {
            error!("Failed to load playlists: {err}");
            toasts.push(Toast::error(
                LOAD_PLAYLISTS_ERROR_TOAST,
                "Error loading playlists",
                err.to_string(),
            ));
            Vec::new()
        }
    }
}

/// The session cache when it holds a readable list, otherwise a fetch.
pub async fn load_playlists(
    api: &dyn PlaylistApi,
    store: &dyn SessionStore,
    user: Option<&CurrentUser>,
    page_size: u32,
    toasts: &dyn ToastSink,
) -> Vec<JspfObject> {
    match cached_playlists(store) {
        Some(playlists) => playlists,
        None => fetch_playlists(api, store, user, page_size, toasts).await,
    }
}

/// Send `track` to the playlist behind `target`, returning the JSPF track that was added.
pub async fn submit_track(
    api: &dyn PlaylistApi,
    user: Option<&CurrentUser>,
    track: &TrackDescriptor,
    target: &PlaylistTarget,
) -> Result<JspfTrack, AddToPlaylistError> {
    let token = user
        .and_then(CurrentUser::auth_token)
        .ok_or(AddToPlaylistError::Unauthenticated)?;
    let jspf_track = track.to_jspf_track();
    let identifier = target
        .identifier
        .as_deref()
        .filter(|identifier| !identifier.trim().is_empty())
        .ok_or_else(|| AddToPlaylistError::MissingIdentifier {
            playlist_title: target.title.clone(),
        })?;

    let status = api
        .add_playlist_items(
            token,
            playlist_mbid(identifier),
            std::slice::from_ref(&jspf_track),
        )
        .await?;
    if status != 200 {
        return Err(AddToPlaylistError::UnexpectedStatus(status));
    }
    Ok(jspf_track)
}

/// Click handler body: add the track and report the outcome as a toast.
pub async fn add_to_playlist(
    api: &dyn PlaylistApi,
    user: Option<&CurrentUser>,
    track: &TrackDescriptor,
    target: &PlaylistTarget,
    toasts: &dyn ToastSink,
) {
    match submit_track(api, user, track, target).await {
        Ok(added) => {
            info!(track = %added.title, playlist = %target.title, "Added track to playlist");
            let mut toast = Toast::success(
                ADD_TRACK_SUCCESS_TOAST,
                "Added track",
                format!(
                    "Successfully added {} to playlist {}",
                    added.title, target.title
                ),
            );
            if let Some(identifier) = target.identifier.as_deref() {
                toast = toast.with_link(identifier, target.title.clone());
            }
            toasts.push(toast);
        }
        Err(err) => {
            warn!(playlist = %target.title, "Could not add track to playlist: {err}");
            toasts.push(Toast::error(
                ADD_TRACK_ERROR_TOAST,
                "Error adding track to playlist",
                format!("Could not add track to playlist:\n{err}"),
            ));
        }
    }
}

/// Open the create-playlist modal seeded with `track`, then close `current`.
pub fn open_create_playlist(track: &TrackDescriptor, current: ModalId, modals: &dyn ModalHost) {
    modals.show(ModalKind::CreateOrEditPlaylist {
        initial_tracks: vec![track.to_jspf_track()],
    });
    modals.close(current);
}

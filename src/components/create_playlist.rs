//! Modal for creating a playlist seeded with one or more tracks.

use crate::api::*;
use crate::components::{Icon, ModalHost, ModalId, ModalRegistry, Toast, ToastSink, Toaster};
use crate::config::AppConfig;
use crate::error::CreatePlaylistError;
use chrono::{SecondsFormat, Utc};
use dioxus::prelude::*;
use serde_json::json;
use tracing::{info, warn};

pub const CREATE_PLAYLIST_SUCCESS_TOAST: &str = "create-playlist-success";
pub const CREATE_PLAYLIST_ERROR_TOAST: &str = "create-playlist-error";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlaylistDraft {
    pub title: String,
    pub description: String,
    pub is_public: bool,
}

impl PlaylistDraft {
    pub fn to_jspf(&self, creator: &str, tracks: &[JspfTrack]) -> JspfPlaylist {
        let description = self.description.trim();
        JspfPlaylist {
            title: self.title.trim().to_string(),
            identifier: None,
            creator: Some(creator.to_string()).filter(|c| !c.is_empty()),
            date: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, false)),
            annotation: (!description.is_empty()).then(|| description.to_string()),
            track: tracks.to_vec(),
            extension: Some(json!({
                (JSPF_PLAYLIST_EXTENSION): {
                    "public": self.is_public,
                    "collaborators": [],
                }
            })),
        }
    }
}

/// Create the playlist, returning its MBID.
pub async fn submit_playlist(
    api: &dyn PlaylistApi,
    user: Option<&CurrentUser>,
    draft: &PlaylistDraft,
    tracks: &[JspfTrack],
) -> Result<String, CreatePlaylistError> {
    let user = user.ok_or(CreatePlaylistError::Unauthenticated)?;
    let token = user
        .auth_token()
        .ok_or(CreatePlaylistError::Unauthenticated)?;
    if draft.title.trim().is_empty() {
        return Err(CreatePlaylistError::EmptyTitle);
    }
    let playlist = draft.to_jspf(&user.name, tracks);
    Ok(api.create_playlist(token, &playlist).await?)
}

/// Submit handler body. Returns the new playlist's MBID on success.
pub async fn create_playlist(
    api: &dyn PlaylistApi,
    user: Option<&CurrentUser>,
    draft: &PlaylistDraft,
    tracks: &[JspfTrack],
    toasts: &dyn ToastSink,
) -> Option<String> {
    match submit_playlist(api, user, draft, tracks).await {
        Ok(mbid) => {
            let title = draft.title.trim();
            info!(playlist = %mbid, "Created playlist {title}");
            toasts.push(
                Toast::success(
                    CREATE_PLAYLIST_SUCCESS_TOAST,
                    "Created playlist",
                    format!("Created new playlist {title}"),
                )
                .with_link(format!("{PLAYLIST_URI_PREFIX}{mbid}"), title.to_string()),
            );
            Some(mbid)
        }
        Err(err) => {
            warn!("Could not create playlist: {err}");
            toasts.push(Toast::error(
                CREATE_PLAYLIST_ERROR_TOAST,
                "Error creating playlist",
                err.to_string(),
            ));
            None
        }
    }
}

#[component]
pub fn CreatePlaylistModal(modal_id: ModalId, visible: bool, initial_tracks: Vec<JspfTrack>) -> Element {
    let config = use_context::<AppConfig>();
    let api = use_context::<ApiHandle>();
    let toaster = use_context::<Toaster>();
    let modals = use_context::<ModalRegistry>();

    let mut title = use_signal(String::new);
    let mut description = use_signal(String::new);
    let mut is_public = use_signal(|| true);
    let mut is_processing = use_signal(|| false);

    let on_submit = {
        let api = api.clone();
        let user = config.current_user.clone();
        let tracks = initial_tracks.clone();
        move |_| {
            if is_processing() {
                return;
            }
            is_processing.set(true);
            let draft = PlaylistDraft {
                title: title(),
                description: description(),
                is_public: is_public(),
            };
            let api = api.clone();
            let user = user.clone();
            let tracks = tracks.clone();
            spawn(async move {
                let created =
                    create_playlist(api.client(), user.as_ref(), &draft, &tracks, &toaster).await;
                is_processing.set(false);
                if created.is_some() {
                    modals.close(modal_id);
                }
            });
        }
    };

    let on_close = move |_| modals.close(modal_id);

    rsx! {
        div {
            class: if visible { "fixed inset-0 z-[96] flex items-end md:items-center justify-center bg-black/60 backdrop-blur-sm px-3 pb-20 md:pb-0 pt-3 md:pt-0 transition-opacity duration-500 opacity-100" } else { "fixed inset-0 z-[96] flex items-end md:items-center justify-center bg-black/60 backdrop-blur-sm px-3 pb-20 md:pb-0 pt-3 md:pt-0 transition-opacity duration-500 opacity-0 pointer-events-none" },
            id: "CreateOrEditPlaylistModal",
            role: "dialog",
            div { class: "w-full md:max-w-xl max-h-[82vh] overflow-y-auto bg-zinc-900/95 border border-zinc-800 rounded-2xl shadow-2xl p-5 space-y-5",
                div { class: "flex items-center justify-between gap-3",
                    h2 { class: "flex items-center gap-2 text-lg font-semibold text-white",
                        Icon {
                            name: "file-plus".to_string(),
                            class: "w-5 h-5".to_string(),
                        }
                        "Create playlist"
                    }
                    button {
                        class: "p-2 rounded-lg text-zinc-400 hover:text-white hover:bg-zinc-800 transition-colors",
                        aria_label: "Close",
                        onclick: on_close,
                        Icon { name: "x".to_string(), class: "w-5 h-5".to_string() }
                    }
                }

                div { class: "space-y-3",
                    input {
                        class: "w-full px-3 py-2 rounded-lg bg-zinc-900/50 border border-zinc-800 text-white placeholder:text-zinc-600 focus:outline-none focus:border-emerald-500/50 focus:ring-2 focus:ring-emerald-500/20",
                        placeholder: "Playlist name",
                        value: title,
                        oninput: move |e| title.set(e.value()),
                    }
                    textarea {
                        class: "w-full px-3 py-2 rounded-lg bg-zinc-900/50 border border-zinc-800 text-white placeholder:text-zinc-600 focus:outline-none focus:border-emerald-500/50 focus:ring-2 focus:ring-emerald-500/20",
                        placeholder: "Description (optional)",
                        rows: "3",
                        value: description,
                        oninput: move |e| description.set(e.value()),
                    }
                    label { class: "flex items-center gap-2 text-sm text-zinc-300",
                        input {
                            r#type: "checkbox",
                            checked: is_public(),
                            onchange: move |e| is_public.set(e.checked()),
                        }
                        "Public playlist"
                    }
                }

                if !initial_tracks.is_empty() {
                    div { class: "space-y-2",
                        p { class: "text-xs uppercase tracking-wide text-zinc-500", "Tracks" }
                        for track in initial_tracks.iter() {
                            div {
                                key: "{track.identifier}",
                                class: "flex items-center gap-3 px-3 py-2 rounded-xl bg-zinc-900/50 border border-zinc-800 text-sm text-zinc-300",
                                Icon {
                                    name: "music".to_string(),
                                    class: "w-4 h-4 text-zinc-500".to_string(),
                                }
                                div { class: "min-w-0",
                                    div { class: "font-medium truncate", "{track.title}" }
                                    p { class: "text-xs text-zinc-500 truncate", "{track.creator}" }
                                }
                            }
                        }
                    }
                }

                div { class: "flex justify-end gap-2 pt-2 border-t border-zinc-800",
                    button {
                        class: "px-4 py-2 rounded-lg bg-zinc-800 text-white hover:bg-zinc-700 transition-colors",
                        r#type: "button",
                        onclick: on_close,
                        "Cancel"
                    }
                    button {
                        class: if is_processing() { "px-4 py-2 rounded-lg bg-emerald-500/60 text-white cursor-not-allowed flex items-center gap-2" } else { "px-4 py-2 rounded-lg bg-emerald-500 text-white hover:bg-emerald-400 transition-colors flex items-center gap-2" },
                        r#type: "button",
                        disabled: is_processing(),
                        onclick: on_submit,
                        if is_processing() {
                            Icon {
                                name: "loader".to_string(),
                                class: "w-4 h-4".to_string(),
                            }
                            "Working..."
                        } else {
                            "Create"
                        }
                    }
                }
            }
        }
    }
}

//! The "Add to playlist" dialog.

mod workflow;

pub use workflow::*;

use crate::api::*;
use crate::components::{Icon, ModalHost, ModalId, ModalRegistry, Toaster};
use crate::config::AppConfig;
use crate::session_store::SessionHandle;
use dioxus::core::spawn_forever;
use dioxus::prelude::*;

#[component]
pub fn AddToPlaylistModal(modal_id: ModalId, visible: bool, track: TrackDescriptor) -> Element {
    let config = use_context::<AppConfig>();
    let api = use_context::<ApiHandle>();
    let session = use_context::<SessionHandle>();
    let toaster = use_context::<Toaster>();
    let modals = use_context::<ModalRegistry>();

    // None until the cached or fetched list is known.
    let mut playlists = use_signal(|| None::<Vec<JspfObject>>);

    {
        let api = api.clone();
        let session = session.clone();
        let user = config.current_user.clone();
        let page_size = config.playlist_page_size;
        use_effect(move || {
            let api = api.clone();
            let session = session.clone();
            let user = user.clone();
            spawn(async move {
                let loaded = load_playlists(
                    api.client(),
                    session.store(),
                    user.as_ref(),
                    page_size,
                    &toaster,
                )
                .await;
                playlists.set(Some(loaded));
            });
        });
    }

    let make_add_to_playlist = {
        let api = api.clone();
        let user = config.current_user.clone();
        let track = track.clone();

        move |target: PlaylistTarget| {
            let api = api.clone();
            let user = user.clone();
            let track = track.clone();

            move |_| {
                let api = api.clone();
                let user = user.clone();
                let track = track.clone();
                let target = target.clone();
                // Keeps running if the dialog is closed mid-request.
                spawn_forever(async move {
                    add_to_playlist(api.client(), user.as_ref(), &track, &target, &toaster).await;
                });
            }
        }
    };

    let on_create_playlist = {
        let track = track.clone();
        move |_| open_create_playlist(&track, modal_id, &modals)
    };

    let on_close = move |_| modals.close(modal_id);

    let loading = playlists.read().is_none() && config.auth_token().is_some();
    let available = playlists().unwrap_or_default();
    let track_name = track.title().to_string();

    rsx! {
        div {
            class: if visible { "fixed inset-0 z-[95] flex items-end md:items-center justify-center bg-black/60 backdrop-blur-sm px-3 pb-20 md:pb-0 pt-3 md:pt-0 transition-opacity duration-500 opacity-100" } else { "fixed inset-0 z-[95] flex items-end md:items-center justify-center bg-black/60 backdrop-blur-sm px-3 pb-20 md:pb-0 pt-3 md:pt-0 transition-opacity duration-500 opacity-0 pointer-events-none" },
            id: "AddToPlaylistModal",
            role: "dialog",
            aria_labelledby: "AddToPlaylistLabel",
            div {
                class: "w-full md:max-w-xl max-h-[82vh] overflow-y-auto bg-zinc-900/95 border border-zinc-800 rounded-2xl shadow-2xl p-5 space-y-5",
                role: "document",
                div { class: "flex items-center justify-between gap-3",
                    h2 {
                        class: "flex-1 flex items-center justify-center gap-2 text-lg font-semibold text-white",
                        id: "AddToPlaylistLabel",
                        Icon {
                            name: "plus-circle".to_string(),
                            class: "w-5 h-5".to_string(),
                        }
                        "Add to playlist"
                    }
                    button {
                        class: "p-2 rounded-lg text-zinc-400 hover:text-white hover:bg-zinc-800 transition-colors",
                        aria_label: "Close",
                        onclick: on_close,
                        Icon { name: "x".to_string(), class: "w-5 h-5".to_string() }
                    }
                }

                div { class: "space-y-3",
                    p { class: "text-sm text-zinc-400",
                        "Add the track "
                        i { class: "text-zinc-200", "{track_name}" }
                        " to one or more of your playlists below:"
                    }
                    div { class: "max-h-[50vh] overflow-y-auto space-y-2 pr-1",
                        button {
                            class: "w-full px-3 py-2 rounded-xl bg-sky-500/10 border border-sky-500/40 text-sky-200 hover:bg-sky-500/20 text-left text-sm transition-colors flex items-center gap-3",
                            r#type: "button",
                            onclick: on_create_playlist,
                            Icon {
                                name: "file-plus".to_string(),
                                class: "w-4 h-4".to_string(),
                            }
                            "Create new playlist"
                        }
                        if loading {
                            div { class: "flex items-center gap-2 text-sm text-zinc-400 px-1",
                                Icon {
                                    name: "loader".to_string(),
                                    class: "w-4 h-4".to_string(),
                                }
                                "Loading playlists..."
                            }
                        }
                        for (index, object) in available.into_iter().enumerate() {
                            button {
                                key: "{index}",
                                class: "w-full px-3 py-2 rounded-xl bg-zinc-900/50 border border-zinc-800 hover:border-emerald-500/60 hover:text-white text-left text-sm text-zinc-300 transition-colors flex items-center gap-3",
                                r#type: "button",
                                name: "{object.playlist.title}",
                                "data-playlist-identifier": object.playlist.identifier().unwrap_or_default().to_string(),
                                onclick: make_add_to_playlist(PlaylistTarget::from(&object.playlist)),
                                Icon {
                                    name: "playlist".to_string(),
                                    class: "w-4 h-4 text-zinc-500".to_string(),
                                }
                                span { class: "truncate", "{object.playlist.title}" }
                            }
                        }
                    }
                }

                div { class: "flex justify-end pt-2 border-t border-zinc-800",
                    button {
                        class: "px-4 py-2 rounded-lg bg-zinc-800 text-white hover:bg-zinc-700 transition-colors",
                        r#type: "button",
                        onclick: on_close,
                        "Close"
                    }
                }
            }
        }
    }
}

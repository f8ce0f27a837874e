use crate::api::models::*;
use crate::error::ApiError;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use tracing::{debug, warn};

static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);

pub const DEFAULT_API_URL: &str = "https://api.listenbrainz.org/1";

/// Paging and filter options for a user's playlist listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaylistQuery {
    pub offset: u32,
    pub count: u32,
    pub created_for: bool,
    pub collaborator: bool,
}

impl PlaylistQuery {
    /// The user's own playlists, first page.
    pub fn owned(count: u32) -> Self {
        Self {
            offset: 0,
            count,
            created_for: false,
            collaborator: false,
        }
    }
}

/// Playlist operations the UI needs from the backend.
#[async_trait(?Send)]
pub trait PlaylistApi {
    async fn get_user_playlists(
        &self,
        user_name: &str,
        auth_token: Option<&str>,
        query: PlaylistQuery,
    ) -> Result<UserPlaylistsResponse, ApiError>;

    /// Append tracks to a playlist, returning the status of an accepted call.
    /// Rejections carry the server's error message.
    async fn add_playlist_items(
        &self,
        auth_token: &str,
        playlist_mbid: &str,
        tracks: &[JspfTrack],
    ) -> Result<u16, ApiError>;

    /// Create a playlist, returning its MBID.
    async fn create_playlist(
        &self,
        auth_token: &str,
        playlist: &JspfPlaylist,
    ) -> Result<String, ApiError>;
}

/// Cloneable handle so a client can be provided through context.
#[derive(Clone)]
pub struct ApiHandle(pub Rc<dyn PlaylistApi>);

impl ApiHandle {
    pub fn new(api: impl PlaylistApi + 'static) -> Self {
        Self(Rc::new(api))
    }

    pub fn client(&self) -> &dyn PlaylistApi {
        self.0.as_ref()
    }
}

#[derive(Serialize)]
struct PlaylistEnvelope<'a> {
    playlist: &'a JspfPlaylist,
}

#[derive(Serialize)]
struct TrackList<'a> {
    track: &'a [JspfTrack],
}

#[derive(Serialize)]
struct TrackListEnvelope<'a> {
    playlist: TrackList<'a>,
}

#[derive(Deserialize)]
struct CreatePlaylistResponse {
    playlist_mbid: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    error: Option<String>,
}

pub struct ListenBrainzClient {
    api_url: String,
}

impl ListenBrainzClient {
    pub fn new(api_url: impl Into<String>) -> Self {
        let api_url = api_url.into();
        let api_url = if api_url.trim().is_empty() {
            DEFAULT_API_URL.to_string()
        } else {
            api_url.trim_end_matches('/').to_string()
        };
        Self { api_url }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn build_url(&self, segments: &[&str]) -> String {
        let mut url = self.api_url.clone();
        for segment in segments {
            url.push('/');
            url.push_str(segment);
        }
        url
    }

    fn authorized(
        request: reqwest::RequestBuilder,
        auth_token: Option<&str>,
    ) -> reqwest::RequestBuilder {
        match auth_token {
            Some(token) => request.header("Authorization", format!("Token {token}")),
            None => request,
        }
    }

    async fn status_error(response: reqwest::Response) -> ApiError {
        let status = response.status();
        let message = response
            .json::<ErrorResponse>()
            .await
            .ok()
            .and_then(|body| body.error)
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string()
            });
        ApiError::Status {
            status: status.as_u16(),
            message,
        }
    }
}

#[async_trait(?Send)]
impl PlaylistApi for ListenBrainzClient {
    async fn get_user_playlists(
        &self,
        user_name: &str,
        auth_token: Option<&str>,
        query: PlaylistQuery,
    ) -> Result<UserPlaylistsResponse, ApiError> {
        let user = urlencoding::encode(user_name);
        let mut segments = vec!["user", user.as_ref(), "playlists"];
        if query.created_for {
            segments.push("createdfor");
        }
        if query.collaborator {
            segments.push("collaborator");
        }
        let url = format!(
            "{}?offset={}&count={}",
            self.build_url(&segments),
            query.offset,
            query.count
        );
        debug!(url = %url, "Fetching user playlists");

        let response = Self::authorized(HTTP_CLIENT.get(&url), auth_token)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::status_error(response).await);
        }

        response
            .json::<UserPlaylistsResponse>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    async fn add_playlist_items(
        &self,
        auth_token: &str,
        playlist_mbid: &str,
        tracks: &[JspfTrack],
    ) -> Result<u16, ApiError> {
        let mbid = urlencoding::encode(playlist_mbid);
        let url = self.build_url(&["playlist", mbid.as_ref(), "item", "add"]);
        debug!(url = %url, tracks = tracks.len(), "Adding playlist items");

        let body = TrackListEnvelope {
            playlist: TrackList { track: tracks },
        };
        let response = Self::authorized(HTTP_CLIENT.post(&url), Some(auth_token))
            .json(&body)
            .send()
            .await?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            warn!(status, playlist = playlist_mbid, "Add playlist items rejected");
            return Err(Self::status_error(response).await);
        }
        Ok(status)
    }

    async fn create_playlist(
        &self,
        auth_token: &str,
        playlist: &JspfPlaylist,
    ) -> Result<String, ApiError> {
        let url = self.build_url(&["playlist", "create"]);
        debug!(url = %url, title = %playlist.title, "Creating playlist");

        let response = Self::authorized(HTTP_CLIENT.post(&url), Some(auth_token))
            .json(&PlaylistEnvelope { playlist })
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::status_error(response).await);
        }

        let created: CreatePlaylistResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;
        Ok(created.playlist_mbid)
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample_track() -> JspfTrack {
        JspfTrack {
            id: Some("rec-1".to_string()),
            identifier: "https://musicbrainz.org/recording/rec-1".to_string(),
            title: "Roads".to_string(),
            creator: "Portishead".to_string(),
            album: None,
            duration: None,
            extension: None,
        }
    }

    #[test]
    fn new_normalizes_api_url() {
        assert_eq!(
            ListenBrainzClient::new("http://localhost:8100/1/").api_url(),
            "http://localhost:8100/1"
        );
        assert_eq!(ListenBrainzClient::new("  ").api_url(), DEFAULT_API_URL);
    }

    #[tokio::test]
    async fn get_user_playlists_sends_paging_and_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user/rob/playlists"))
            .and(query_param("offset", "0"))
            .and(query_param("count", "25"))
            .and(header("Authorization", "Token secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "playlist_count": 1,
                "count": 25,
                "offset": 0,
                "playlists": [{
                    "playlist": {
                        "title": "Late night",
                        "identifier": "https://listenbrainz.org/playlist/aa-bb",
                        "track": []
                    }
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = ListenBrainzClient::new(server.uri());
        let response = client
            .get_user_playlists("rob", Some("secret"), PlaylistQuery::owned(25))
            .await
            .unwrap();

        assert_eq!(response.playlists.len(), 1);
        assert_eq!(response.playlists[0].playlist.title, "Late night");
    }

    #[tokio::test]
    async fn get_user_playlists_uses_collaborator_route() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user/rob/playlists/collaborator"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "playlists": [] })))
            .expect(1)
            .mount(&server)
            .await;

        let client = ListenBrainzClient::new(server.uri());
        let query = PlaylistQuery {
            collaborator: true,
            ..PlaylistQuery::owned(10)
        };
        let response = client.get_user_playlists("rob", None, query).await.unwrap();
        assert!(response.playlists.is_empty());
    }

    #[tokio::test]
    async fn get_user_playlists_surfaces_server_error_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user/ghost/playlists"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "code": 404,
                "error": "Cannot find user: ghost"
            })))
            .mount(&server)
            .await;

        let client = ListenBrainzClient::new(server.uri());
        let err = client
            .get_user_playlists("ghost", None, PlaylistQuery::owned(25))
            .await
            .unwrap_err();

        match err {
            ApiError::Status { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Cannot find user: ghost");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn add_playlist_items_posts_track_envelope() {
        let server = MockServer::start().await;
        let track = sample_track();
        Mock::given(method("POST"))
            .and(path("/playlist/aa-bb/item/add"))
            .and(header("Authorization", "Token secret"))
            .and(body_json(json!({
                "playlist": { "track": [serde_json::to_value(&track).unwrap()] }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
            .expect(1)
            .mount(&server)
            .await;

        let client = ListenBrainzClient::new(server.uri());
        let status = client
            .add_playlist_items("secret", "aa-bb", &[track])
            .await
            .unwrap();
        assert_eq!(status, 200);
    }

    #[tokio::test]
    async fn add_playlist_items_rejection_keeps_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/playlist/aa-bb/item/add"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "code": 403,
                "error": "You are not allowed to edit this playlist."
            })))
            .mount(&server)
            .await;

        let client = ListenBrainzClient::new(server.uri());
        let err = client
            .add_playlist_items("secret", "aa-bb", &[sample_track()])
            .await
            .unwrap_err();

        match err {
            ApiError::Status { status, message } => {
                assert_eq!(status, 403);
                assert_eq!(message, "You are not allowed to edit this playlist.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn add_playlist_items_passes_other_success_statuses_through() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/playlist/aa-bb/item/add"))
            .respond_with(ResponseTemplate::new(202))
            .mount(&server)
            .await;

        let client = ListenBrainzClient::new(server.uri());
        let status = client
            .add_playlist_items("secret", "aa-bb", &[sample_track()])
            .await
            .unwrap();
        assert_eq!(status, 202);
    }

    #[tokio::test]
    async fn create_playlist_returns_new_mbid() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/playlist/create"))
            .and(header("Authorization", "Token secret"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "status": "ok", "playlist_mbid": "new-mbid" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = ListenBrainzClient::new(server.uri());
        let playlist = JspfPlaylist {
            title: "Fresh".to_string(),
            track: vec![sample_track()],
            ..Default::default()
        };
        let mbid = client.create_playlist("secret", &playlist).await.unwrap();
        assert_eq!(mbid, "new-mbid");
    }
}

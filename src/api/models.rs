use serde::{Deserialize, Serialize};

pub const PLAYLIST_URI_PREFIX: &str = "https://listenbrainz.org/playlist/";
pub const PLAYLIST_TRACK_URI_PREFIX: &str = "https://musicbrainz.org/recording/";
pub const JSPF_PLAYLIST_EXTENSION: &str = "https://musicbrainz.org/doc/jspf#playlist";

/// The logged-in user as handed to the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CurrentUser {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub auth_token: Option<String>,
}

impl CurrentUser {
    /// Token usable for authenticated calls; empty tokens count as absent.
    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref().filter(|token| !token.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AdditionalInfo {
    #[serde(default)]
    pub recording_mbid: Option<String>,
    #[serde(default)]
    pub release_mbid: Option<String>,
    #[serde(default)]
    pub duration_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MbidMapping {
    #[serde(default)]
    pub recording_mbid: Option<String>,
    #[serde(default)]
    pub release_mbid: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TrackMetadata {
    #[serde(default)]
    pub artist_name: String,
    #[serde(default)]
    pub track_name: String,
    #[serde(default)]
    pub release_name: Option<String>,
    #[serde(default)]
    pub additional_info: Option<AdditionalInfo>,
    #[serde(default)]
    pub mbid_mapping: Option<MbidMapping>,
}

/// A record of a track the user has played.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Listen {
    #[serde(default)]
    pub listened_at: Option<i64>,
    #[serde(default)]
    pub user_name: Option<String>,
    pub track_metadata: TrackMetadata,
}

impl Listen {
    pub fn recording_mbid(&self) -> Option<&str> {
        let metadata = &self.track_metadata;
        metadata
            .additional_info
            .as_ref()
            .and_then(|info| info.recording_mbid.as_deref())
            .or_else(|| {
                metadata
                    .mbid_mapping
                    .as_ref()
                    .and_then(|mapping| mapping.recording_mbid.as_deref())
            })
            .filter(|mbid| !mbid.is_empty())
    }

    /// Convert this listen into the JSPF track shape the playlist API accepts.
    pub fn to_jspf_track(&self) -> JspfTrack {
        let mbid = self.recording_mbid().unwrap_or_default();
        JspfTrack {
            id: Some(mbid.to_string()),
            identifier: format!("{PLAYLIST_TRACK_URI_PREFIX}{mbid}"),
            title: self.track_metadata.track_name.clone(),
            creator: self.track_metadata.artist_name.clone(),
            album: self.track_metadata.release_name.clone(),
            duration: None,
            extension: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct JspfTrack {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub identifier: String,
    pub title: String,
    #[serde(default)]
    pub creator: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct JspfPlaylist {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
    #[serde(default)]
    pub track: Vec<JspfTrack>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<serde_json::Value>,
}

impl JspfPlaylist {
    /// Identifier usable as a submission target; blank identifiers count as absent.
    pub fn identifier(&self) -> Option<&str> {
        self.identifier
            .as_deref()
            .filter(|identifier| !identifier.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct JspfObject {
    pub playlist: JspfPlaylist,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct UserPlaylistsResponse {
    #[serde(default)]
    pub playlists: Vec<JspfObject>,
    #[serde(default)]
    pub playlist_count: u32,
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub offset: u32,
}

/// A track handed to the add dialog, in whichever shape the caller had it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TrackDescriptor {
    Jspf(JspfTrack),
    Listen(Listen),
}

impl TrackDescriptor {
    pub fn to_jspf_track(&self) -> JspfTrack {
        match self {
            Self::Jspf(track) => track.clone(),
            Self::Listen(listen) => listen.to_jspf_track(),
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Jspf(track) => &track.title,
            Self::Listen(listen) => &listen.track_metadata.track_name,
        }
    }

    pub fn artist(&self) -> &str {
        match self {
            Self::Jspf(track) => &track.creator,
            Self::Listen(listen) => &listen.track_metadata.artist_name,
        }
    }
}

impl From<Listen> for TrackDescriptor {
    fn from(listen: Listen) -> Self {
        Self::Listen(listen)
    }
}

impl From<JspfTrack> for TrackDescriptor {
    fn from(track: JspfTrack) -> Self {
        Self::Jspf(track)
    }
}

/// Strip the playlist URI prefix, leaving the raw playlist MBID.
pub fn playlist_mbid(identifier: &str) -> &str {
    identifier
        .strip_prefix(PLAYLIST_URI_PREFIX)
        .unwrap_or(identifier)
}

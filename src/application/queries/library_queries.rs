//! Library Queries

/// 可列出的库内容
///
/// 这些列表是家庭系统级的，任意一台音箱都能回答，
/// 查询时使用第一台已发现的音箱。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibraryKind {
    Favorites,
    Playlists,
    RadioStations,
    PlaylistTracks(String),
}

impl LibraryKind {
    pub fn action(&self) -> &'static str {
        match self {
            Self::Favorites => "list_favs",
            Self::Playlists => "list_playlists",
            Self::RadioStations => "favourite_radio_stations",
            Self::PlaylistTracks(_) => "list_playlist_tracks",
        }
    }

    pub fn args(&self) -> Vec<String> {
        match self {
            Self::PlaylistTracks(playlist) => vec![playlist.clone()],
            _ => Vec::new(),
        }
    }
}

/// 列出库内容
#[derive(Debug, Clone)]
pub struct ListLibrary {
    pub kind: LibraryKind,
}

/// 列出分组
#[derive(Debug, Clone)]
pub struct ListGroups;

/// 获取播放队列
#[derive(Debug, Clone)]
pub struct GetQueue {
    pub speaker: String,
}

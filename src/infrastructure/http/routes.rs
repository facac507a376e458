//! HTTP Routes
//!
//! API Endpoints（均位于 /api/sonos 下，除 /api/ping）:
//! - /status                                 GET     命令服务器状态
//! - /start | /stop | /restart               POST    命令服务器生命周期
//! - /speakers                               GET     已发现的音箱
//! - /rediscover                             POST    重新发现音箱
//! - /speakers/:name                         GET     音箱状态快照
//! - /command                                POST    执行任意命令
//! - /speakers/:name/{playpause,next,previous,mute,seek/:position,volume/:volume}
//! - /groups, /speakers/:name/{group/:coordinator,ungroup,party,ungroup-all,group-volume/:volume,transfer/:target}
//! - /speakers/:name/{shuffle,repeat,crossfade,sleep}[/:value]
//! - /favorites, /playlists, /playlists/:playlist/tracks, /radio-stations
//! - /speakers/:name/{play-favorite/:favorite,play-favorite-number/:number,play-radio/:station}
//! - /speakers/:name/queue[...]

use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .nest("/sonos", sonos_routes())
}

/// Sonos 路由
fn sonos_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(server_routes())
        .merge(speaker_routes())
        .merge(playback_routes())
        .merge(grouping_routes())
        .merge(settings_routes())
        .merge(library_routes())
        .merge(queue_routes())
}

/// 命令服务器路由
fn server_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/status", get(handlers::server_status))
        .route("/start", post(handlers::start_server))
        .route("/stop", post(handlers::stop_server))
        .route("/restart", post(handlers::restart_server))
}

/// 音箱发现与通用命令路由
fn speaker_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/speakers", get(handlers::list_speakers))
        .route("/rediscover", post(handlers::rediscover_speakers))
        .route("/speakers/:name", get(handlers::speaker_info))
        .route("/command", post(handlers::execute_command))
}

/// 播放控制路由
fn playback_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/speakers/:name/playpause", post(handlers::play_pause))
        .route("/speakers/:name/volume", get(handlers::get_volume))
        .route("/speakers/:name/volume/:volume", post(handlers::set_volume))
        .route("/speakers/:name/mute", post(handlers::toggle_mute))
        .route("/speakers/:name/track", get(handlers::current_track))
        .route("/speakers/:name/next", post(handlers::next_track))
        .route("/speakers/:name/previous", post(handlers::previous_track))
        .route("/speakers/:name/seek/:position", post(handlers::seek))
}

/// 分组路由
fn grouping_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/groups", get(handlers::list_groups))
        .route("/speakers/:name/group/:coordinator", post(handlers::group_speaker))
        .route("/speakers/:name/ungroup", post(handlers::ungroup_speaker))
        .route("/speakers/:name/party", post(handlers::party_mode))
        .route("/speakers/:name/ungroup-all", post(handlers::ungroup_all))
        .route("/speakers/:name/group-volume/:volume", post(handlers::set_group_volume))
        .route("/speakers/:name/transfer/:target", post(handlers::transfer_playback))
}

/// 播放设置路由
fn settings_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/speakers/:name/shuffle", get(handlers::get_shuffle))
        .route("/speakers/:name/shuffle/:value", post(handlers::set_shuffle))
        .route("/speakers/:name/repeat", get(handlers::get_repeat))
        .route("/speakers/:name/repeat/:value", post(handlers::set_repeat))
        .route("/speakers/:name/crossfade", get(handlers::get_crossfade))
        .route("/speakers/:name/crossfade/:value", post(handlers::set_crossfade))
        .route(
            "/speakers/:name/sleep",
            get(handlers::get_sleep_timer).delete(handlers::cancel_sleep_timer),
        )
        .route("/speakers/:name/sleep/:value", post(handlers::set_sleep_timer))
}

/// 音乐库路由
fn library_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/favorites", get(handlers::list_favorites))
        .route("/playlists", get(handlers::list_playlists))
        .route("/playlists/:playlist/tracks", get(handlers::list_playlist_tracks))
        .route("/radio-stations", get(handlers::list_radio_stations))
        .route("/speakers/:name/play-favorite/:favorite", post(handlers::play_favorite))
        .route(
            "/speakers/:name/play-favorite-number/:number",
            post(handlers::play_favorite_number),
        )
        .route("/speakers/:name/play-radio/:station", post(handlers::play_radio_station))
}

/// 播放队列路由
fn queue_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/speakers/:name/queue",
            get(handlers::get_queue).delete(handlers::clear_queue),
        )
        .route("/speakers/:name/queue/length", get(handlers::queue_length))
        .route("/speakers/:name/queue/position", get(handlers::queue_position))
        .route("/speakers/:name/queue/play", post(handlers::play_queue))
        .route("/speakers/:name/queue/play/:track", post(handlers::play_from_queue))
        .route("/speakers/:name/queue/:track", delete(handlers::remove_from_queue))
        .route(
            "/speakers/:name/queue/add-favorite/:favorite",
            post(handlers::add_favorite_to_queue),
        )
        .route(
            "/speakers/:name/queue/add-playlist/:playlist",
            post(handlers::add_playlist_to_queue),
        )
        .route("/speakers/:name/queue/add-sharelink", post(handlers::add_sharelink_to_queue))
        .route("/speakers/:name/queue/save/:playlist", post(handlers::save_queue))
}

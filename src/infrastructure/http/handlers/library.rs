//! Library Handlers - 收藏、播放列表、电台

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use super::{run, CommandResponse};
use crate::application::{ExecuteCommand, LibraryKind, LibraryListing, ListLibrary};
use crate::infrastructure::http::dto::ApiResponse;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

type ListingResponse = Result<Json<ApiResponse<LibraryListing>>, ApiError>;

async fn list(state: &AppState, kind: LibraryKind) -> ListingResponse {
    let listing = state.list_library_handler.handle(ListLibrary { kind }).await?;
    Ok(Json(ApiResponse::success(listing)))
}

pub async fn list_favorites(State(state): State<Arc<AppState>>) -> ListingResponse {
    list(&state, LibraryKind::Favorites).await
}

pub async fn list_playlists(State(state): State<Arc<AppState>>) -> ListingResponse {
    list(&state, LibraryKind::Playlists).await
}

pub async fn list_playlist_tracks(
    State(state): State<Arc<AppState>>,
    Path(playlist): Path<String>,
) -> ListingResponse {
    list(&state, LibraryKind::PlaylistTracks(playlist)).await
}

pub async fn list_radio_stations(State(state): State<Arc<AppState>>) -> ListingResponse {
    list(&state, LibraryKind::RadioStations).await
}

pub async fn play_favorite(
    State(state): State<Arc<AppState>>,
    Path((name, favorite)): Path<(String, String)>,
) -> CommandResponse {
    run(&state, ExecuteCommand::new(name, "play_favourite").arg(favorite)).await
}

pub async fn play_favorite_number(
    State(state): State<Arc<AppState>>,
    Path((name, number)): Path<(String, u32)>,
) -> CommandResponse {
    run(
        &state,
        ExecuteCommand::new(name, "play_favourite_number").arg(number.to_string()),
    )
    .await
}

pub async fn play_radio_station(
    State(state): State<Arc<AppState>>,
    Path((name, station)): Path<(String, String)>,
) -> CommandResponse {
    run(
        &state,
        ExecuteCommand::new(name, "play_favourite_radio_station").arg(station),
    )
    .await
}

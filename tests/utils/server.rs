use aniwatch::{AniWatch, Anime, Episode};
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const ANIME_ID: u64 = 42;
pub const RELATION_ID: u64 = 7;
pub const SESSION_COOKIE: &str = "SESSION=abc123";

/// An instance which sends api actions to `<server>/api` and uses the server as site root.
pub fn client(server: &MockServer) -> AniWatch {
    AniWatch::builder()
        .api_url(format!("{}/api", server.uri()))
        .site_root(server.uri())
        .cookie("SESSION", "abc123")
        .build()
        .unwrap()
}

/// Mounts a response for a single api action. `matching` must contain the `action` and may
/// contain further body fields the request must have.
pub async fn mount_action(server: &MockServer, matching: Value, response: Value) {
    Mock::given(method("POST"))
        .and(path("/api"))
        .and(body_partial_json(matching))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(server)
        .await
}

pub fn anime_json(id: u64) -> Value {
    json!({
        "detail_id": id,
        "title": format!("Anime {id}"),
        "description": "",
        "cover": "",
        "type": "TV",
        "relation_id": RELATION_ID.to_string(),
        "genre": [{"id": 1, "name": "Action"}],
        "tags": null,
        "episode_max": "12",
        "hasNudity": 0,
        "broadcast_start": "1672531200",
    })
}

pub async fn mount_anime(server: &MockServer, id: u64) {
    mount_action(
        server,
        json!({"action": "getAnime", "detail_id": id.to_string()}),
        json!({ "anime": anime_json(id) }),
    )
    .await
}

pub async fn mount_episodes(server: &MockServer) {
    mount_action(
        server,
        json!({"action": "getEpisodes", "detail_id": ANIME_ID.to_string()}),
        json!({
            "episodes": [
                {"ep_id": 1001, "number": 1, "title": "First", "lang": ["en-US", "de-DE"], "filler": 0},
                {"ep_id": "1002", "number": "2", "title": "Second", "lang": "en-US", "filler": 1},
            ]
        }),
    )
    .await
}

/// Mounts the `watchAnime` action of episode 1001 which delivers the given quality sources.
pub async fn mount_sources(server: &MockServer, sources: Value) {
    mount_action(
        server,
        json!({"action": "watchAnime", "ep_id": 1001}),
        json!({
            "lang": [{"lang": "en-US", "name": "English", "dub": true}],
            "stream": {"sources": sources},
        }),
    )
    .await
}

pub async fn anime(server: &MockServer) -> Anime {
    mount_anime(server, ANIME_ID).await;
    Anime::from_id(&client(server), ANIME_ID).await.unwrap()
}

/// Episode 1 of anime [`ANIME_ID`].
pub async fn episode(server: &MockServer) -> Episode {
    mount_episodes(server).await;
    let episodes = anime(server).await.episodes().await.unwrap();
    episodes.by_number(1).unwrap().clone()
}

pub async fn mount_bytes(server: &MockServer, url_path: &str, body: Vec<u8>) {
    Mock::given(method("GET"))
        .and(path(url_path))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body))
        .mount(server)
        .await
}

/// A media playlist. Every entry is a segment uri, entries starting with `#` are written as they
/// are (e.g. key tags).
pub fn playlist(entries: &[&str]) -> String {
    let mut playlist = "#EXTM3U\n#EXT-X-VERSION:3\n#EXT-X-TARGETDURATION:10\n#EXT-X-MEDIA-SEQUENCE:0\n"
        .to_string();
    for entry in entries {
        if entry.starts_with('#') {
            playlist.push_str(&format!("{entry}\n"))
        } else {
            playlist.push_str(&format!("#EXTINF:10.0,\n{entry}\n"))
        }
    }
    playlist.push_str("#EXT-X-ENDLIST\n");
    playlist
}

use crate::utils::server::*;
use aniwatch::error::Error;
use aniwatch::{Anime, EpisodeCache, Locale};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod utils;

#[tokio::test]
async fn anime_from_id() {
    let server = MockServer::start().await;
    mount_anime(&server, ANIME_ID).await;

    let anime = client(&server).anime_from_id(ANIME_ID).await;
    assert_result!(anime);

    let anime = anime.unwrap();
    assert_eq!(anime.id, ANIME_ID);
    assert_eq!(anime.title, "Anime 42");
    assert_eq!(anime.relation_id, Some(RELATION_ID));
    assert_eq!(anime.episode_max, Some(12));
    assert_eq!(anime.has_nudity, Some(false));
    assert_eq!(anime.genre[0].name, "Action");
    assert!(anime.tags.is_empty());
    assert_eq!(anime.broadcast_start.unwrap().timestamp(), 1672531200)
}

#[tokio::test]
async fn anime_episodes() {
    let server = MockServer::start().await;
    mount_episodes(&server).await;

    let episodes = anime(&server).await.episodes().await;
    assert_result!(episodes);

    let episodes = episodes.unwrap();
    assert_eq!(episodes.len(), 2);
    assert!(episodes.iter().all(|e| e.anime_id == ANIME_ID));
    assert_eq!(episodes.by_number(2).unwrap().id, 1002);
    assert_eq!(episodes.last().unwrap().title, "Second");
    assert_eq!(episodes[0].lang, vec!["en-US", "de-DE"]);
    assert_eq!(episodes[1].lang, vec!["en-US"]);
    assert_eq!(episodes[1].filler, Some(true))
}

#[tokio::test]
async fn episode_referer() {
    let server = MockServer::start().await;
    let episode = episode(&server).await;

    assert_eq!(
        episode.referer(),
        format!("{}/anime/{ANIME_ID}/1", server.uri())
    )
}

#[tokio::test]
async fn aniwatch_episode() {
    let server = MockServer::start().await;
    mount_sources(
        &server,
        json!({"HD": "https://cdn.example.com/hd.m3u8", "SD": "https://cdn.example.com/sd.m3u8"}),
    )
    .await;
    let episode = episode(&server).await;

    let aniwatch_episode = episode.aniwatch_episode(Locale::en_US).await;
    assert_result!(aniwatch_episode);

    let aniwatch_episode = aniwatch_episode.unwrap();
    assert_eq!(aniwatch_episode.episode_id, 1001);
    assert_eq!(aniwatch_episode.languages[0].locale, Locale::en_US);
    assert_eq!(aniwatch_episode.languages[0].dub, Some(true));
    assert_eq!(aniwatch_episode.stream.qualities(), vec!["HD", "SD"])
}

#[tokio::test]
async fn episode_mark_as_watched() {
    let server = MockServer::start().await;
    mount_action(
        &server,
        json!({
            "controller": "Profile",
            "action": "markAsWatched",
            "detail_id": ANIME_ID.to_string(),
            "episode_id": 1001,
        }),
        json!({"success": true}),
    )
    .await;
    let episode = episode(&server).await;

    let result = episode.mark_as_watched().await;
    assert_result!(result);
    assert!(result.unwrap())
}

#[tokio::test]
async fn anime_list_actions() {
    let server = MockServer::start().await;
    for action in [
        "markAsCompleted",
        "markAsPlannedToWatch",
        "markAsOnHold",
        "markAsDropped",
        "markAsWatching",
        "removeAnime",
    ] {
        mount_action(
            &server,
            json!({"controller": "Profile", "action": action, "detail_id": ANIME_ID.to_string()}),
            json!({"success": true}),
        )
        .await
    }
    let anime = anime(&server).await;

    assert!(anime.mark_as_completed().await.unwrap());
    assert!(anime.mark_as_plan_to_watch().await.unwrap());
    assert!(anime.mark_as_on_hold().await.unwrap());
    assert!(anime.mark_as_dropped().await.unwrap());
    assert!(anime.mark_as_watching().await.unwrap());
    assert!(anime.remove_from_list().await.unwrap())
}

#[tokio::test]
async fn anime_rate() {
    let server = MockServer::start().await;
    mount_action(
        &server,
        json!({"action": "rateAnime", "detail_id": ANIME_ID.to_string(), "rating": 8}),
        json!({"success": true}),
    )
    .await;
    let anime = anime(&server).await;

    let result = anime.rate(8).await;
    assert_result!(result);
    assert!(result.unwrap())
}

#[tokio::test]
async fn anime_relations() {
    let server = MockServer::start().await;
    mount_anime(&server, 43).await;
    mount_action(
        &server,
        json!({"action": "getRelation", "relation_id": RELATION_ID}),
        json!({
            "relation": {
                "relation_id": RELATION_ID,
                "title": "Franchise",
                "entries": [
                    {"detail_id": 42, "title": "Anime 42", "type": "Original"},
                    {"detail_id": "43", "title": "Anime 43", "type": "Sequel"},
                ]
            }
        }),
    )
    .await;
    let anime = anime(&server).await;

    let relation = anime.relations().await;
    assert_result!(relation);

    let relation = relation.unwrap().unwrap();
    assert_eq!(relation.id, Some(RELATION_ID));
    assert_eq!(relation.entries.len(), 2);
    assert_eq!(relation.entries[1].relation_type, "Sequel");

    // entries must be able to request further data on their own
    let sequel = relation.entries[1].anime().await;
    assert_result!(sequel);
    assert_eq!(sequel.unwrap().id, 43)
}

#[tokio::test]
async fn anime_without_relation() {
    let server = MockServer::start().await;
    let mut anime_json = anime_json(ANIME_ID);
    anime_json["relation_id"] = json!(null);
    mount_action(
        &server,
        json!({"action": "getAnime"}),
        json!({ "anime": anime_json }),
    )
    .await;

    let anime = Anime::from_id(&client(&server), ANIME_ID).await.unwrap();
    assert!(anime.relations().await.unwrap().is_none())
}

#[tokio::test]
async fn anime_recommendations() {
    let server = MockServer::start().await;
    mount_anime(&server, 44).await;
    mount_action(
        &server,
        json!({"action": "getRecommendations", "detail_id": ANIME_ID.to_string()}),
        json!({
            "entries": [{"detail_id": 44, "title": "Anime 44", "votes": "13", "voted": 0}]
        }),
    )
    .await;
    let anime = anime(&server).await;

    let recommendations = anime.recommendations().await;
    assert_result!(recommendations);

    let recommendations = recommendations.unwrap();
    assert_eq!(recommendations[0].votes, Some(13));
    assert_eq!(recommendations[0].voted, Some(false));
    assert_eq!(recommendations[0].anime().await.unwrap().id, 44)
}

#[tokio::test]
async fn anime_chronicle() {
    let server = MockServer::start().await;
    mount_action(
        &server,
        json!({"action": "getChronicle", "detail_id": ANIME_ID.to_string(), "page": 1}),
        json!({
            "chronicle": [
                {"chronicle_id": 5, "detail_id": 42, "anime_title": "Anime 42", "ep_id": 1001, "episode_number": 1, "date": 1672531200}
            ]
        }),
    )
    .await;
    let anime = anime(&server).await;

    let chronicle = anime.chronicle(1).await;
    assert_result!(chronicle);

    let chronicle = chronicle.unwrap();
    assert_eq!(chronicle[0].episode_id, Some(1001));
    assert_eq!(chronicle[0].date.unwrap().timestamp(), 1672531200)
}

#[tokio::test]
async fn anime_add_recommendation() {
    let server = MockServer::start().await;
    mount_action(
        &server,
        json!({"action": "addRecommendation", "detail_id": ANIME_ID.to_string(), "recommendation": "44"}),
        json!({"success": true, "message": "added"}),
    )
    .await;
    let anime = anime(&server).await;

    let result = anime.add_recommendation(44).await;
    assert_result!(result);
    assert_eq!(result.unwrap()["message"], "added")
}

#[tokio::test]
async fn api_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = Anime::from_id(&client(&server), ANIME_ID).await;
    assert!(
        matches!(result, Err(Error::Request { status: Some(status), .. }) if status.as_u16() == 500),
        "{result:?}"
    )
}

#[tokio::test]
async fn api_response_without_result_key() {
    let server = MockServer::start().await;
    mount_action(&server, json!({"action": "getAnime"}), json!({"error": "not found"})).await;

    let result = Anime::from_id(&client(&server), ANIME_ID).await;
    assert!(matches!(result, Err(Error::Decode { .. })), "{result:?}")
}

#[tokio::test]
async fn episode_cache_requests_once() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api"))
        .and(body_partial_json(json!({"action": "getEpisodes"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "episodes": [{"ep_id": 1001, "number": 1}]
        })))
        .expect(2)
        .mount(&server)
        .await;
    let anime = anime(&server).await;
    let mut cache = EpisodeCache::new();

    assert_eq!(cache.episodes(&anime).await.unwrap().len(), 1);
    assert_eq!(cache.episodes(&anime).await.unwrap().len(), 1);
    assert_eq!(cache.len(), 1);

    // invalidating forces the second request
    cache.invalidate(ANIME_ID);
    assert_result!(cache.episodes(&anime).await)
}

mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

async fn setup_trip(
    client: &reqwest::Client,
    base_url: &str,
    token: &str,
) -> Result<(i64, i64)> {
    let res = client
        .post(format!("{}/trips", base_url))
        .bearer_auth(token)
        .json(&json!({
            "title": common::unique("Trip"),
            "city": "Lisbon",
            "start_date": "2024-09-01",
            "end_date": "2024-09-02",
        }))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::CREATED, "trip create failed");
    let trip_id = res.json::<Value>().await?["data"]["id"]
        .as_i64()
        .expect("trip id");

    let res = client
        .get(format!("{}/days", base_url))
        .bearer_auth(token)
        .send()
        .await?;
    let body = res.json::<Value>().await?;
    let day_id = body["data"]
        .as_array()
        .expect("days")
        .iter()
        .find(|day| day["trip"]["id"] == trip_id)
        .and_then(|day| day["id"].as_i64())
        .expect("a day");

    Ok((trip_id, day_id))
}

#[tokio::test]
async fn strangers_cannot_touch_someone_elses_itinerary() -> Result<()> {
    let Some(server) = common::try_server().await? else {
        return Ok(());
    };
    let client = reqwest::Client::new();
    let (owner_token, _, _) = common::register_user(&client, &server.base_url, "it_owner").await?;
    let (stranger_token, _, _) =
        common::register_user(&client, &server.base_url, "stranger").await?;
    let (trip_id, day_id) = setup_trip(&client, &server.base_url, &owner_token).await?;

    // Day creation on a trip you don't collaborate on is forbidden, and no day appears
    let res = client
        .post(format!("{}/days", server.base_url))
        .bearer_auth(&stranger_token)
        .json(&json!({ "trip": trip_id, "date": "2024-09-05" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = client
        .get(format!("{}/days", server.base_url))
        .bearer_auth(&owner_token)
        .send()
        .await?;
    let body = res.json::<Value>().await?;
    let count = body["data"]
        .as_array()
        .expect("days")
        .iter()
        .filter(|day| day["trip"]["id"] == trip_id)
        .count();
    assert_eq!(count, 2, "stranger's forbidden create must not add a day");

    // Same for events, event retrieval and day retrieval
    let res = client
        .post(format!("{}/events", server.base_url))
        .bearer_auth(&stranger_token)
        .json(&json!({
            "day": day_id,
            "title": "Crash the party",
            "start_time": "20:00",
            "end_time": "23:00",
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = client
        .get(format!("{}/days/{}", server.base_url, day_id))
        .bearer_auth(&stranger_token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // The stranger's scoped listings stay empty
    let res = client
        .get(format!("{}/events", server.base_url))
        .bearer_auth(&stranger_token)
        .send()
        .await?;
    let body = res.json::<Value>().await?;
    assert_eq!(body["data"], json!([]));

    Ok(())
}

#[tokio::test]
async fn collaborators_manage_days_and_events() -> Result<()> {
    let Some(server) = common::try_server().await? else {
        return Ok(());
    };
    let client = reqwest::Client::new();
    let (owner_token, _, _) = common::register_user(&client, &server.base_url, "collab_o").await?;
    let (friend_token, friend_id, _) =
        common::register_user(&client, &server.base_url, "collab_f").await?;
    let (trip_id, day_id) = setup_trip(&client, &server.base_url, &owner_token).await?;

    // Owner invites the friend
    let res = client
        .post(format!("{}/usertrips", server.base_url))
        .bearer_auth(&owner_token)
        .json(&json!({ "user": friend_id, "trip": trip_id }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    // Inviting twice is a conflict
    let res = client
        .post(format!("{}/usertrips", server.base_url))
        .bearer_auth(&owner_token)
        .json(&json!({ "user": friend_id, "trip": trip_id }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    // The friend can now add an extra day...
    let res = client
        .post(format!("{}/days", server.base_url))
        .bearer_auth(&friend_token)
        .json(&json!({ "trip": trip_id, "date": "2024-09-03" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    // ...but not a duplicate date
    let res = client
        .post(format!("{}/days", server.base_url))
        .bearer_auth(&friend_token)
        .json(&json!({ "trip": trip_id, "date": "2024-09-03" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    // And can schedule a categorized event on the owner's day
    let res = client
        .post(format!("{}/categories", server.base_url))
        .bearer_auth(&friend_token)
        .json(&json!({ "name": common::unique("Sightseeing") }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let category_id = res.json::<Value>().await?["data"]["id"]
        .as_i64()
        .expect("category id");

    let res = client
        .post(format!("{}/events", server.base_url))
        .bearer_auth(&friend_token)
        .json(&json!({
            "day": day_id,
            "title": "Tram 28",
            "location": "Baixa",
            "start_time": "09:30",
            "end_time": "11:00",
            "category": category_id,
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body = res.json::<Value>().await?;
    let event_id = body["data"]["id"].as_i64().expect("event id");
    assert_eq!(body["data"]["day"]["id"], day_id);
    assert_eq!(body["data"]["category"]["id"], category_id);
    assert_eq!(body["data"]["start_time"], "09:30:00");

    // Partial event update keeps unspecified fields
    let res = client
        .put(format!("{}/events/{}", server.base_url, event_id))
        .bearer_auth(&owner_token)
        .json(&json!({ "end_time": "11:30" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["data"]["title"], "Tram 28");
    assert_eq!(body["data"]["end_time"], "11:30:00");

    Ok(())
}

#[tokio::test]
async fn deleting_a_day_cascades_its_events() -> Result<()> {
    let Some(server) = common::try_server().await? else {
        return Ok(());
    };
    let client = reqwest::Client::new();
    let (token, _, _) = common::register_user(&client, &server.base_url, "cascade").await?;
    let (_, day_id) = setup_trip(&client, &server.base_url, &token).await?;

    let res = client
        .post(format!("{}/events", server.base_url))
        .bearer_auth(&token)
        .json(&json!({
            "day": day_id,
            "title": "Doomed plan",
            "start_time": "14:00",
            "end_time": "15:00",
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let event_id = res.json::<Value>().await?["data"]["id"]
        .as_i64()
        .expect("event id");

    let res = client
        .delete(format!("{}/days/{}", server.base_url, day_id))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client
        .get(format!("{}/events/{}", server.base_url, event_id))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn category_crud_round_trip() -> Result<()> {
    let Some(server) = common::try_server().await? else {
        return Ok(());
    };
    let client = reqwest::Client::new();
    let (token, _, _) = common::register_user(&client, &server.base_url, "cat").await?;

    // Anonymous creation is rejected
    let res = client
        .post(format!("{}/categories", server.base_url))
        .json(&json!({ "name": "Nope" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let name = common::unique("Food");
    let res = client
        .post(format!("{}/categories", server.base_url))
        .bearer_auth(&token)
        .json(&json!({ "name": name }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let category_id = res.json::<Value>().await?["data"]["id"]
        .as_i64()
        .expect("category id");

    // Categories are public reads
    let res = client
        .get(format!("{}/categories/{}", server.base_url, category_id))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?["data"]["name"], name);

    let res = client
        .put(format!("{}/categories/{}", server.base_url, category_id))
        .bearer_auth(&token)
        .json(&json!({ "name": "Renamed" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .delete(format!("{}/categories/{}", server.base_url, category_id))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client
        .get(format!("{}/categories/{}", server.base_url, category_id))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    Ok(())
}

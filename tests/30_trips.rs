mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

async fn create_trip(
    client: &reqwest::Client,
    base_url: &str,
    token: &str,
    start_date: &str,
    end_date: &str,
) -> Result<Value> {
    let res = client
        .post(format!("{}/trips", base_url))
        .bearer_auth(token)
        .json(&json!({
            "title": common::unique("Trip"),
            "city": "New York",
            "start_date": start_date,
            "end_date": end_date,
        }))
        .send()
        .await?;
    anyhow::ensure!(
        res.status() == StatusCode::CREATED,
        "trip create failed with {}",
        res.status()
    );
    Ok(res.json::<Value>().await?["data"].clone())
}

/// Dates of the trip's days, sorted, via the scoped /days listing
async fn day_dates(
    client: &reqwest::Client,
    base_url: &str,
    token: &str,
    trip_id: i64,
) -> Result<Vec<String>> {
    let res = client
        .get(format!("{}/days", base_url))
        .bearer_auth(token)
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::OK, "days list failed");
    let body = res.json::<Value>().await?;
    let mut dates: Vec<String> = body["data"]
        .as_array()
        .expect("days array")
        .iter()
        .filter(|day| day["trip"]["id"] == trip_id)
        .map(|day| day["date"].as_str().expect("date").to_string())
        .collect();
    dates.sort();
    Ok(dates)
}

#[tokio::test]
async fn creating_a_trip_generates_its_days_and_membership() -> Result<()> {
    let Some(server) = common::try_server().await? else {
        return Ok(());
    };
    let client = reqwest::Client::new();
    let (token, user_id, _) = common::register_user(&client, &server.base_url, "trip").await?;

    let trip = create_trip(&client, &server.base_url, &token, "2024-05-01", "2024-05-03").await?;
    let trip_id = trip["id"].as_i64().expect("trip id");
    assert_eq!(trip["creator"], user_id);

    // One day per date in the inclusive range
    let dates = day_dates(&client, &server.base_url, &token, trip_id).await?;
    assert_eq!(dates, vec!["2024-05-01", "2024-05-02", "2024-05-03"]);

    // The creator is auto-enrolled as a collaborator
    let res = client
        .get(format!("{}/usertrips", server.base_url))
        .bearer_auth(&token)
        .send()
        .await?;
    let body = res.json::<Value>().await?;
    let enrolled = body["data"]
        .as_array()
        .expect("usertrips array")
        .iter()
        .any(|ut| ut["trip"]["id"] == trip_id && ut["user"]["id"] == user_id);
    assert!(enrolled, "creator missing from usertrips: {}", body);

    Ok(())
}

#[tokio::test]
async fn shrinking_a_trip_deletes_out_of_range_days_and_their_events() -> Result<()> {
    let Some(server) = common::try_server().await? else {
        return Ok(());
    };
    let client = reqwest::Client::new();
    let (token, _, _) = common::register_user(&client, &server.base_url, "shrink").await?;

    let trip = create_trip(&client, &server.base_url, &token, "2024-05-01", "2024-05-03").await?;
    let trip_id = trip["id"].as_i64().expect("trip id");

    // Find the day for 05-03 and give it an event
    let res = client
        .get(format!("{}/days", server.base_url))
        .bearer_auth(&token)
        .send()
        .await?;
    let body = res.json::<Value>().await?;
    let last_day_id = body["data"]
        .as_array()
        .expect("days")
        .iter()
        .find(|day| day["trip"]["id"] == trip_id && day["date"] == "2024-05-03")
        .and_then(|day| day["id"].as_i64())
        .expect("day for 2024-05-03");

    let res = client
        .post(format!("{}/events", server.base_url))
        .bearer_auth(&token)
        .json(&json!({
            "day": last_day_id,
            "title": "Farewell dinner",
            "start_time": "19:00",
            "end_time": "21:00",
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let event_id = res.json::<Value>().await?["data"]["id"]
        .as_i64()
        .expect("event id");

    // Shrink the range: 05-03 falls out
    let res = client
        .put(format!("{}/trips/{}", server.base_url, trip_id))
        .bearer_auth(&token)
        .json(&json!({ "end_date": "2024-05-02" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let dates = day_dates(&client, &server.base_url, &token, trip_id).await?;
    assert_eq!(dates, vec!["2024-05-01", "2024-05-02"]);

    // The orphaned day's event cascaded away with it
    let res = client
        .get(format!("{}/events/{}", server.base_url, event_id))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn extending_a_trip_adds_only_new_days_and_keeps_events() -> Result<()> {
    let Some(server) = common::try_server().await? else {
        return Ok(());
    };
    let client = reqwest::Client::new();
    let (token, _, _) = common::register_user(&client, &server.base_url, "extend").await?;

    let trip = create_trip(&client, &server.base_url, &token, "2024-05-01", "2024-05-02").await?;
    let trip_id = trip["id"].as_i64().expect("trip id");

    // Event on an existing in-range day
    let res = client
        .get(format!("{}/days", server.base_url))
        .bearer_auth(&token)
        .send()
        .await?;
    let body = res.json::<Value>().await?;
    let first_day_id = body["data"]
        .as_array()
        .expect("days")
        .iter()
        .find(|day| day["trip"]["id"] == trip_id && day["date"] == "2024-05-01")
        .and_then(|day| day["id"].as_i64())
        .expect("day for 2024-05-01");

    let res = client
        .post(format!("{}/events", server.base_url))
        .bearer_auth(&token)
        .json(&json!({
            "day": first_day_id,
            "title": "Museum visit",
            "location": "MoMA",
            "start_time": "10:00",
            "end_time": "12:00",
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let event_id = res.json::<Value>().await?["data"]["id"]
        .as_i64()
        .expect("event id");

    let res = client
        .put(format!("{}/trips/{}", server.base_url, trip_id))
        .bearer_auth(&token)
        .json(&json!({ "end_date": "2024-05-04" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let dates = day_dates(&client, &server.base_url, &token, trip_id).await?;
    assert_eq!(
        dates,
        vec!["2024-05-01", "2024-05-02", "2024-05-03", "2024-05-04"]
    );

    // The untouched day kept its event
    let res = client
        .get(format!("{}/events/{}", server.base_url, event_id))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["data"]["day"]["id"], first_day_id);

    Ok(())
}

#[tokio::test]
async fn same_range_update_twice_is_idempotent() -> Result<()> {
    let Some(server) = common::try_server().await? else {
        return Ok(());
    };
    let client = reqwest::Client::new();
    let (token, _, _) = common::register_user(&client, &server.base_url, "idem").await?;

    let trip = create_trip(&client, &server.base_url, &token, "2024-06-10", "2024-06-12").await?;
    let trip_id = trip["id"].as_i64().expect("trip id");

    for _ in 0..2 {
        let res = client
            .put(format!("{}/trips/{}", server.base_url, trip_id))
            .bearer_auth(&token)
            .json(&json!({ "start_date": "2024-06-10", "end_date": "2024-06-12" }))
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::OK);
    }

    let dates = day_dates(&client, &server.base_url, &token, trip_id).await?;
    assert_eq!(dates, vec!["2024-06-10", "2024-06-11", "2024-06-12"]);

    Ok(())
}

#[tokio::test]
async fn single_day_trip_has_exactly_one_day() -> Result<()> {
    let Some(server) = common::try_server().await? else {
        return Ok(());
    };
    let client = reqwest::Client::new();
    let (token, _, _) = common::register_user(&client, &server.base_url, "single").await?;

    let trip = create_trip(&client, &server.base_url, &token, "2024-07-01", "2024-07-03").await?;
    let trip_id = trip["id"].as_i64().expect("trip id");

    // Collapse to a single day
    let res = client
        .put(format!("{}/trips/{}", server.base_url, trip_id))
        .bearer_auth(&token)
        .json(&json!({ "start_date": "2024-07-02", "end_date": "2024-07-02" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let dates = day_dates(&client, &server.base_url, &token, trip_id).await?;
    assert_eq!(dates, vec!["2024-07-02"]);

    Ok(())
}

#[tokio::test]
async fn inverted_range_is_rejected_without_mutation() -> Result<()> {
    let Some(server) = common::try_server().await? else {
        return Ok(());
    };
    let client = reqwest::Client::new();
    let (token, _, _) = common::register_user(&client, &server.base_url, "invert").await?;

    // Creation with start after end never persists a trip
    let res = client
        .post(format!("{}/trips", server.base_url))
        .bearer_auth(&token)
        .json(&json!({
            "title": "Backwards",
            "city": "Nowhere",
            "start_date": "2024-05-10",
            "end_date": "2024-05-01",
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Updates with an inverted range leave the day set untouched
    let trip = create_trip(&client, &server.base_url, &token, "2024-05-01", "2024-05-03").await?;
    let trip_id = trip["id"].as_i64().expect("trip id");

    let res = client
        .put(format!("{}/trips/{}", server.base_url, trip_id))
        .bearer_auth(&token)
        .json(&json!({ "start_date": "2024-05-20" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let dates = day_dates(&client, &server.base_url, &token, trip_id).await?;
    assert_eq!(dates, vec!["2024-05-01", "2024-05-02", "2024-05-03"]);

    Ok(())
}

#[tokio::test]
async fn trip_writes_require_authentication_and_ownership() -> Result<()> {
    let Some(server) = common::try_server().await? else {
        return Ok(());
    };
    let client = reqwest::Client::new();

    // Anonymous create is a 401
    let res = client
        .post(format!("{}/trips", server.base_url))
        .json(&json!({
            "title": "Anon",
            "city": "Ghost town",
            "start_date": "2024-05-01",
            "end_date": "2024-05-02",
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    // Anonymous list is empty, not an error
    let res = client.get(format!("{}/trips", server.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["data"], json!([]));

    // A non-creator cannot edit or delete someone else's trip
    let (owner_token, _, _) = common::register_user(&client, &server.base_url, "owner").await?;
    let (other_token, _, _) = common::register_user(&client, &server.base_url, "other").await?;
    let trip =
        create_trip(&client, &server.base_url, &owner_token, "2024-05-01", "2024-05-02").await?;
    let trip_id = trip["id"].as_i64().expect("trip id");

    let res = client
        .put(format!("{}/trips/{}", server.base_url, trip_id))
        .bearer_auth(&other_token)
        .json(&json!({ "title": "Hijacked" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = client
        .delete(format!("{}/trips/{}", server.base_url, trip_id))
        .bearer_auth(&other_token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // The creator can delete; days and memberships cascade
    let res = client
        .delete(format!("{}/trips/{}", server.base_url, trip_id))
        .bearer_auth(&owner_token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let dates = day_dates(&client, &server.base_url, &owner_token, trip_id).await?;
    assert!(dates.is_empty());

    Ok(())
}

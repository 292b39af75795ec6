mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};
use sqlx::PgPool;

#[sqlx::test]
async fn test_create_kitten_sets_owner_from_token(pool: PgPool) {
    let user = common::create_user(&pool, "user1", false).await;
    let other = common::create_user(&pool, "user2", false).await;
    let breed = common::create_breed(&pool, "Сиамская").await;
    let server = common::make_server(pool.clone());

    let response = server
        .post("/api/kittens")
        .add_header("Authorization", common::bearer(&user))
        .json(&json!({
            "breed": breed,
            "color": "Белый",
            "age": 3,
            "description": "Спокойный",
            "owner": other.id
        }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let json = response.json::<Value>();
    assert_eq!(json["breed"], breed);
    assert_eq!(json["color"], "Белый");
    assert_eq!(json["age"], 3);
    assert!(json.get("owner").is_none());

    let owner_id: i64 = sqlx::query_scalar("SELECT owner_id FROM kittens WHERE id = $1")
        .bind(json["id"].as_i64().unwrap())
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(owner_id, user.id);
}

#[sqlx::test]
async fn test_create_kitten_defaults_age(pool: PgPool) {
    let user = common::create_user(&pool, "user1", false).await;
    let breed = common::create_breed(&pool, "Сиамская").await;
    let server = common::make_server(pool);

    let response = server
        .post("/api/kittens")
        .add_header("Authorization", common::bearer(&user))
        .json(&json!({"breed": breed, "color": "Рыжий", "description": "Игривый"}))
        .await;

    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.json::<Value>()["age"], 1);
}

#[sqlx::test]
async fn test_create_kitten_requires_authentication(pool: PgPool) {
    let breed = common::create_breed(&pool, "Сиамская").await;
    let server = common::make_server(pool.clone());

    let response = server
        .post("/api/kittens")
        .json(&json!({"breed": breed, "color": "Белый", "description": "Спокойный"}))
        .await;

    response.assert_status_unauthorized();
    assert_eq!(common::count_rows(&pool, "kittens").await, 0);
}

#[sqlx::test]
async fn test_create_kitten_reports_every_missing_field(pool: PgPool) {
    let user = common::create_user(&pool, "user1", false).await;
    let server = common::make_server(pool);

    let response = server
        .post("/api/kittens")
        .add_header("Authorization", common::bearer(&user))
        .json(&json!({"age": 0}))
        .await;

    response.assert_status_bad_request();

    let details = &response.json::<Value>()["error"]["details"];
    for field in ["breed", "color", "description", "age"] {
        assert!(details[field].is_array(), "missing error for {field}");
    }
}

#[sqlx::test]
async fn test_create_kitten_with_unknown_breed(pool: PgPool) {
    let user = common::create_user(&pool, "user1", false).await;
    let server = common::make_server(pool);

    let response = server
        .post("/api/kittens")
        .add_header("Authorization", common::bearer(&user))
        .json(&json!({"breed": 999, "color": "Белый", "description": "Спокойный"}))
        .await;

    response.assert_status_bad_request();

    let json = response.json::<Value>();
    assert_eq!(
        json["error"]["details"]["breed"][0],
        "Invalid pk \"999\" - object does not exist."
    );
}

#[sqlx::test]
async fn test_create_kitten_with_malformed_json(pool: PgPool) {
    let user = common::create_user(&pool, "user1", false).await;
    let server = common::make_server(pool);

    let response = server
        .post("/api/kittens")
        .add_header("Authorization", common::bearer(&user))
        .add_header("Content-Type", "application/json")
        .text("{not json")
        .await;

    response.assert_status_bad_request();
}

#[sqlx::test]
async fn test_list_kittens_without_ratings(pool: PgPool) {
    let user = common::create_user(&pool, "user1", false).await;
    let breed = common::create_breed(&pool, "Сиамская").await;
    common::create_kitten(&pool, breed, user.id, "Белый", 2).await;
    let server = common::make_server(pool);

    let response = server.get("/api/kittens").await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(json["count"], 1);

    let kitten = &json["results"][0];
    assert_eq!(kitten["breed"]["name"], "Сиамская");
    assert_eq!(kitten["owner"], "user1");
    assert!(kitten["average_rating"].is_null());
}

#[sqlx::test]
async fn test_list_kittens_filters(pool: PgPool) {
    let user = common::create_user(&pool, "user1", false).await;
    let siamese = common::create_breed(&pool, "Сиамская").await;
    let british = common::create_breed(&pool, "Британская").await;
    common::create_kitten(&pool, siamese, user.id, "Белый", 2).await;
    common::create_kitten(&pool, siamese, user.id, "Рыжий", 4).await;
    common::create_kitten(&pool, british, user.id, "Белый", 4).await;
    let server = common::make_server(pool);

    let by_breed = server
        .get("/api/kittens")
        .add_query_param("breed", siamese)
        .await
        .json::<Value>();
    assert_eq!(by_breed["count"], 2);

    let by_color = server
        .get("/api/kittens")
        .add_query_param("color", "Белый")
        .await
        .json::<Value>();
    assert_eq!(by_color["count"], 2);

    let combined = server
        .get("/api/kittens")
        .add_query_param("color", "Белый")
        .add_query_param("age", 4)
        .await
        .json::<Value>();
    assert_eq!(combined["count"], 1);
    assert_eq!(combined["results"][0]["breed"]["name"], "Британская");

    server
        .get("/api/kittens?breed=abc")
        .await
        .assert_status_bad_request();
}

#[sqlx::test]
async fn test_list_kittens_page_beyond_end(pool: PgPool) {
    let user = common::create_user(&pool, "user1", false).await;
    let breed = common::create_breed(&pool, "Сиамская").await;
    common::create_kitten(&pool, breed, user.id, "Белый", 2).await;
    let server = common::make_server(pool);

    server.get("/api/kittens?page=2").await.assert_status_not_found();
}

#[sqlx::test]
async fn test_get_kitten_detail_includes_ratings(pool: PgPool) {
    let owner = common::create_user(&pool, "owner", false).await;
    let rater1 = common::create_user(&pool, "rater1", false).await;
    let rater2 = common::create_user(&pool, "rater2", false).await;
    let breed = common::create_breed(&pool, "Сиамская").await;
    let kitten = common::create_kitten(&pool, breed, owner.id, "Белый", 2).await;
    common::create_rating(&pool, kitten, rater1.id, 3).await;
    common::create_rating(&pool, kitten, rater2.id, 5).await;
    let server = common::make_server(pool);

    let response = server.get(&format!("/api/kittens/{kitten}")).await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(json["id"], kitten);
    assert_eq!(json["average_rating"], 4.0);
    assert_eq!(
        json["ratings"],
        json!([
            {"user": "rater2", "rating": 5},
            {"user": "rater1", "rating": 3}
        ])
    );
}

#[sqlx::test]
async fn test_get_missing_kitten(pool: PgPool) {
    let server = common::make_server(pool);

    let response = server.get("/api/kittens/42").await;

    response.assert_status_not_found();
    assert_eq!(response.json::<Value>()["error"]["code"], "not_found");
}

#[sqlx::test]
async fn test_invalid_token_on_read(pool: PgPool) {
    let server = common::make_server(pool);

    server
        .get("/api/kittens")
        .add_header("Authorization", "Bearer garbage")
        .await
        .assert_status_unauthorized();
}

#[sqlx::test]
async fn test_non_owner_cannot_modify(pool: PgPool) {
    let owner = common::create_user(&pool, "owner", false).await;
    let stranger = common::create_user(&pool, "stranger", false).await;
    let breed = common::create_breed(&pool, "Сиамская").await;
    let kitten = common::create_kitten(&pool, breed, owner.id, "Белый", 2).await;
    let server = common::make_server(pool);
    let path = format!("/api/kittens/{kitten}");

    server
        .patch(&path)
        .add_header("Authorization", common::bearer(&stranger))
        .json(&json!({"color": "Чёрный"}))
        .await
        .assert_status_forbidden();

    server
        .put(&path)
        .add_header("Authorization", common::bearer(&stranger))
        .json(&json!({"breed": breed, "color": "Чёрный", "description": "x"}))
        .await
        .assert_status_forbidden();

    server
        .delete(&path)
        .add_header("Authorization", common::bearer(&stranger))
        .await
        .assert_status_forbidden();

    server
        .patch(&path)
        .json(&json!({"color": "Чёрный"}))
        .await
        .assert_status_unauthorized();
}

#[sqlx::test]
async fn test_permission_is_checked_before_body(pool: PgPool) {
    let owner = common::create_user(&pool, "owner", false).await;
    let stranger = common::create_user(&pool, "stranger", false).await;
    let breed = common::create_breed(&pool, "Сиамская").await;
    let kitten = common::create_kitten(&pool, breed, owner.id, "Белый", 2).await;
    let server = common::make_server(pool);

    server
        .patch(&format!("/api/kittens/{kitten}"))
        .add_header("Authorization", common::bearer(&stranger))
        .json(&json!({"age": 9999}))
        .await
        .assert_status_forbidden();
}

#[sqlx::test]
async fn test_owner_patches_kitten(pool: PgPool) {
    let owner = common::create_user(&pool, "owner", false).await;
    let breed = common::create_breed(&pool, "Сиамская").await;
    let kitten = common::create_kitten(&pool, breed, owner.id, "Белый", 2).await;
    let server = common::make_server(pool);

    let response = server
        .patch(&format!("/api/kittens/{kitten}"))
        .add_header("Authorization", common::bearer(&owner))
        .json(&json!({"color": "Чёрный"}))
        .await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(json["color"], "Чёрный");
    assert_eq!(json["age"], 2);
    assert_eq!(json["breed"], breed);
}

#[sqlx::test]
async fn test_put_requires_full_body(pool: PgPool) {
    let owner = common::create_user(&pool, "owner", false).await;
    let breed = common::create_breed(&pool, "Сиамская").await;
    let kitten = common::create_kitten(&pool, breed, owner.id, "Белый", 2).await;
    let server = common::make_server(pool);

    let response = server
        .put(&format!("/api/kittens/{kitten}"))
        .add_header("Authorization", common::bearer(&owner))
        .json(&json!({"color": "Чёрный"}))
        .await;

    response.assert_status_bad_request();

    let details = &response.json::<Value>()["error"]["details"];
    assert!(details["breed"].is_array());
    assert!(details["description"].is_array());
}

#[sqlx::test]
async fn test_admin_replaces_foreign_kitten(pool: PgPool) {
    let owner = common::create_user(&pool, "owner", false).await;
    let admin = common::create_user(&pool, "admin", true).await;
    let breed = common::create_breed(&pool, "Сиамская").await;
    let other_breed = common::create_breed(&pool, "Британская").await;
    let kitten = common::create_kitten(&pool, breed, owner.id, "Белый", 7).await;
    let server = common::make_server(pool.clone());

    let response = server
        .put(&format!("/api/kittens/{kitten}"))
        .add_header("Authorization", common::bearer(&admin))
        .json(&json!({
            "breed": other_breed,
            "color": "Серый",
            "description": "Новое описание"
        }))
        .await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(json["breed"], other_breed);
    assert_eq!(json["color"], "Серый");
    assert_eq!(json["age"], 1);

    let owner_id: i64 = sqlx::query_scalar("SELECT owner_id FROM kittens WHERE id = $1")
        .bind(kitten)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(owner_id, owner.id);
}

#[sqlx::test]
async fn test_update_missing_kitten(pool: PgPool) {
    let user = common::create_user(&pool, "user1", false).await;
    let server = common::make_server(pool);

    server
        .patch("/api/kittens/42")
        .add_header("Authorization", common::bearer(&user))
        .json(&json!({"color": "Чёрный"}))
        .await
        .assert_status_not_found();
}

#[sqlx::test]
async fn test_owner_deletes_kitten(pool: PgPool) {
    let owner = common::create_user(&pool, "owner", false).await;
    let rater = common::create_user(&pool, "rater", false).await;
    let breed = common::create_breed(&pool, "Сиамская").await;
    let kitten = common::create_kitten(&pool, breed, owner.id, "Белый", 2).await;
    common::create_rating(&pool, kitten, rater.id, 4).await;
    let server = common::make_server(pool.clone());
    let path = format!("/api/kittens/{kitten}");

    let response = server
        .delete(&path)
        .add_header("Authorization", common::bearer(&owner))
        .await;

    response.assert_status(StatusCode::NO_CONTENT);

    server.get(&path).await.assert_status_not_found();
    assert_eq!(common::count_rows(&pool, "ratings").await, 0);
}

#[sqlx::test]
async fn test_admin_deletes_foreign_kitten(pool: PgPool) {
    let owner = common::create_user(&pool, "owner", false).await;
    let admin = common::create_user(&pool, "admin", true).await;
    let breed = common::create_breed(&pool, "Сиамская").await;
    let kitten = common::create_kitten(&pool, breed, owner.id, "Белый", 2).await;
    let server = common::make_server(pool.clone());
    let path = format!("/api/kittens/{kitten}");

    server
        .delete(&path)
        .add_header("Authorization", common::bearer(&admin))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    server.get(&path).await.assert_status_not_found();
    assert_eq!(common::count_rows(&pool, "kittens").await, 0);
}

#[sqlx::test]
async fn test_nul_characters_are_rejected(pool: PgPool) {
    let user = common::create_user(&pool, "user1", false).await;
    let breed = common::create_breed(&pool, "Сиамская").await;
    let server = common::make_server(pool.clone());

    let response = server
        .post("/api/kittens")
        .add_header("Authorization", common::bearer(&user))
        .json(&json!({"breed": breed, "color": "Се\u{0}рый", "description": "Спокойный"}))
        .await;

    response.assert_status_bad_request();
    assert_eq!(
        response.json::<Value>()["error"]["details"]["color"][0],
        "Null characters are not allowed."
    );
    assert_eq!(common::count_rows(&pool, "kittens").await, 0);

    let response = server.get("/api/kittens?color=a%00b").await;

    response.assert_status_bad_request();
    assert!(response.json::<Value>()["error"]["details"]["color"].is_array());
}

#[sqlx::test]
async fn test_wrong_field_types_are_reported_per_field(pool: PgPool) {
    let user = common::create_user(&pool, "user1", false).await;
    let server = common::make_server(pool);

    let response = server
        .post("/api/kittens")
        .add_header("Authorization", common::bearer(&user))
        .json(&json!({"breed": "abc", "color": "", "age": 0}))
        .await;

    response.assert_status_bad_request();

    let details = &response.json::<Value>()["error"]["details"];
    assert_eq!(details["breed"], json!(["A valid integer is required."]));
    for field in ["color", "age", "description"] {
        assert!(details[field].is_array(), "missing error for {field}");
    }
    assert!(details.get("body").is_none());
}

#[sqlx::test]
async fn test_trailing_slashes_are_accepted(pool: PgPool) {
    let user = common::create_user(&pool, "user1", false).await;
    let breed = common::create_breed(&pool, "Сиамская").await;
    let server = common::make_server(pool);

    let response = server
        .post("/api/kittens/")
        .add_header("Authorization", common::bearer(&user))
        .json(&json!({"breed": breed, "color": "Белый", "description": "Спокойный"}))
        .await;

    response.assert_status(StatusCode::CREATED);
    let kitten = response.json::<Value>()["id"].as_i64().unwrap();

    server.get("/api/kittens/").await.assert_status_ok();
    server
        .get(&format!("/api/kittens/{kitten}/"))
        .await
        .assert_status_ok();
    server
        .post(&format!("/api/kittens/{kitten}/rate/"))
        .add_header("Authorization", common::bearer(&user))
        .json(&json!({"rating": 5}))
        .await
        .assert_status(StatusCode::CREATED);
}

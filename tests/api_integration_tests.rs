//! CRUD, pagination, and auth behavior of the ancillary endpoints.

mod helpers;

use axum::http::StatusCode;
use helpers::{
    body_json, create_test_recipe, create_test_user, send, send_json, setup_test_app,
};
use serde_json::json;

#[tokio::test]
async fn ingredient_crud_round_trip() -> anyhow::Result<()> {
    let (app, pool) = setup_test_app().await?;
    let user = create_test_user(&pool, "alice").await?;

    let response = send_json(
        &app,
        "POST",
        "/ingredients",
        user,
        json!({"name": "Flour", "measurement_unit": "g"}),
    )
    .await?;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await?;
    let id = created["id"].as_i64().unwrap();

    let response = send(&app, "GET", &format!("/ingredients/{id}"), user).await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await?["name"], "Flour");

    let response = send_json(
        &app,
        "PUT",
        &format!("/ingredients/{id}"),
        user,
        json!({"name": "Wheat flour", "measurement_unit": "g"}),
    )
    .await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await?["name"], "Wheat flour");

    let response = send(&app, "DELETE", &format!("/ingredients/{id}"), user).await?;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&app, "GET", &format!("/ingredients/{id}"), user).await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn ingredient_create_rejects_empty_name() -> anyhow::Result<()> {
    let (app, pool) = setup_test_app().await?;
    let user = create_test_user(&pool, "alice").await?;

    let response = send_json(
        &app,
        "POST",
        "/ingredients",
        user,
        json!({"name": "", "measurement_unit": "g"}),
    )
    .await?;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    Ok(())
}

#[tokio::test]
async fn recipe_create_returns_detail_with_ingredients() -> anyhow::Result<()> {
    let (app, pool) = setup_test_app().await?;
    let user = create_test_user(&pool, "alice").await?;
    let flour = helpers::create_test_ingredient(&pool, "Flour", "g").await?;

    let response = send_json(
        &app,
        "POST",
        "/recipes",
        user,
        json!({
            "name": "Pancakes",
            "text": "Mix and fry.",
            "cooking_time": 20,
            "ingredients": [{"ingredient_id": flour, "amount": 200.0}]
        }),
    )
    .await?;
    assert_eq!(response.status(), StatusCode::CREATED);

    let detail = body_json(response).await?;
    assert_eq!(detail["author_id"], user);
    assert_eq!(detail["ingredients"][0]["name"], "Flour");
    assert_eq!(detail["ingredients"][0]["amount"], 200.0);

    Ok(())
}

#[tokio::test]
async fn recipe_list_is_paginated() -> anyhow::Result<()> {
    let (app, pool) = setup_test_app().await?;
    let user = create_test_user(&pool, "alice").await?;

    for n in 0..8 {
        create_test_recipe(&pool, user, &format!("Recipe {n}")).await?;
    }

    let response = send(&app, "GET", "/recipes?page=2&limit=6", user).await?;
    assert_eq!(response.status(), StatusCode::OK);

    let page = body_json(response).await?;
    assert_eq!(page["count"], 8);
    assert_eq!(page["results"].as_array().unwrap().len(), 2);

    Ok(())
}

#[tokio::test]
async fn recipe_mutation_is_author_only() -> anyhow::Result<()> {
    let (app, pool) = setup_test_app().await?;
    let alice = create_test_user(&pool, "alice").await?;
    let bob = create_test_user(&pool, "bob").await?;
    let recipe = create_test_recipe(&pool, alice, "Soup").await?;

    let response = send(&app, "DELETE", &format!("/recipes/{recipe}"), bob).await?;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = send(&app, "DELETE", &format!("/recipes/{recipe}"), alice).await?;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    Ok(())
}

#[tokio::test]
async fn follow_subscribe_is_idempotent() -> anyhow::Result<()> {
    let (app, pool) = setup_test_app().await?;
    let alice = create_test_user(&pool, "alice").await?;
    let bob = create_test_user(&pool, "bob").await?;

    let first = send(&app, "GET", &format!("/follows/{bob}/subscribe"), alice).await?;
    assert_eq!(first.status(), StatusCode::OK);
    let first = body_json(first).await?;

    let second = send(&app, "GET", &format!("/follows/{bob}/subscribe"), alice).await?;
    let second = body_json(second).await?;
    assert_eq!(first["id"], second["id"], "subscribe is get-or-create");

    let response = send(&app, "GET", "/follows", alice).await?;
    let page = body_json(response).await?;
    assert_eq!(page["count"], 1);

    Ok(())
}

#[tokio::test]
async fn unsubscribe_returns_message_and_removes_the_follow() -> anyhow::Result<()> {
    let (app, pool) = setup_test_app().await?;
    let alice = create_test_user(&pool, "alice").await?;
    let bob = create_test_user(&pool, "bob").await?;

    send(&app, "GET", &format!("/follows/{bob}/subscribe"), alice).await?;

    let response = send(&app, "DELETE", &format!("/follows/{bob}/unsubscribe"), alice).await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await?["message"],
        "Вы отписались от пользователя!"
    );

    let response = send(&app, "DELETE", &format!("/follows/{bob}/unsubscribe"), alice).await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn favorites_add_list_remove() -> anyhow::Result<()> {
    let (app, pool) = setup_test_app().await?;
    let user = create_test_user(&pool, "alice").await?;
    let recipe = create_test_recipe(&pool, user, "Soup").await?;

    let response = send(&app, "GET", &format!("/favorites/{recipe}/add"), user).await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await?["recipe_id"], recipe);

    let response = send(&app, "GET", "/favorites", user).await?;
    assert_eq!(body_json(response).await?.as_array().unwrap().len(), 1);

    let response = send(&app, "DELETE", &format!("/favorites/{recipe}/del"), user).await?;
    assert_eq!(
        body_json(response).await?["message"],
        "Рецепт удален из избранного!"
    );

    let response = send(&app, "GET", "/favorites", user).await?;
    assert!(body_json(response).await?.as_array().unwrap().is_empty());

    Ok(())
}

#[tokio::test]
async fn token_for_deleted_user_is_rejected() -> anyhow::Result<()> {
    let (app, pool) = setup_test_app().await?;
    let user = create_test_user(&pool, "alice").await?;

    sqlx::query("DELETE FROM users WHERE id = ?1")
        .bind(user)
        .execute(&pool)
        .await?;

    let response = send(&app, "GET", "/recipes", user).await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

//! End-to-end API tests
//!
//! These tests drive the full router against the in-memory store:
//! - Registration and login
//! - Bearer token checks on protected endpoints
//! - Role checks, validation and conflict detection on every mutation
//! - Reservation with implicit dog creation

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use club_canin_api::api;
use club_canin_api::auth::jwt::{create_token, Claims};
use club_canin_api::domain::user::Role;
use club_canin_api::testing::InMemoryStore;
use serde_json::{json, Value};
use tower::util::ServiceExt; // for oneshot

const SECRET: &str = "integration-test-secret";
const COST: u32 = 4;

/// Setup test application backed by a fresh store
fn setup_app() -> (InMemoryStore, Router) {
    let store = InMemoryStore::new();
    let app = api::router(store.app_state(SECRET, COST));
    (store, app)
}

/// Send one request and return status and raw body
async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_string(&json).unwrap())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

fn json_of(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap()
}

/// Seed an account with the given role and log in through the API
async fn login_as(store: &InMemoryStore, app: &Router, email: &str, role: Role) -> (i64, String) {
    let id = store.seed_user(email, "motdepasse", role, COST);
    let (status, body) = send(
        app,
        "POST",
        "/connexion",
        None,
        Some(json!({ "email": email, "password": "motdepasse" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    (id, String::from_utf8(body).unwrap())
}

fn registration(email: &str) -> Value {
    json!({
        "nom": "Martin",
        "prenom": "Julie",
        "nom_utilisateur": "jmartin",
        "email": email,
        "password": "croquettes42"
    })
}

fn course(nom: &str, duree: i32, nom_type: &str) -> Value {
    json!({ "nom": nom, "duree_cours": duree, "nom_type": nom_type })
}

#[tokio::test]
async fn test_index_and_health() {
    let (_, app) = setup_app();

    let (status, body) = send(&app, "GET", "/", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8(body).unwrap().contains("<h1>"));

    let (status, body) = send(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&body[..], b"OK");
}

#[tokio::test]
async fn test_register_returns_profile_without_password() {
    let (store, app) = setup_app();

    let (status, body) = send(
        &app,
        "POST",
        "/inscription",
        None,
        Some(registration("julie@club.fr")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let json = json_of(&body);
    assert!(json["id_utilisateur"].is_i64());
    assert_eq!(json["email"], "julie@club.fr");
    assert_eq!(json["nom_role"], "member");
    assert!(json.get("password").is_none());
    assert!(json.get("mot_de_passe").is_none());

    let stored = store.password_hash_of("julie@club.fr").unwrap();
    assert_ne!(stored, "croquettes42");
}

#[tokio::test]
async fn test_register_twice_conflicts() {
    let (store, app) = setup_app();

    let (status, _) = send(&app, "POST", "/inscription", None, Some(registration("twice@club.fr"))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) =
        send(&app, "POST", "/inscription", None, Some(registration("twice@club.fr"))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body.is_empty());
    assert_eq!(store.user_count(), 1);
}

#[tokio::test]
async fn test_register_email_conflict_ignores_case() {
    let (store, app) = setup_app();

    let (status, _) = send(&app, "POST", "/inscription", None, Some(registration("julie@club.fr"))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) =
        send(&app, "POST", "/inscription", None, Some(registration("Julie@Club.fr"))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body.is_empty());
    assert_eq!(store.user_count(), 1);
}

#[tokio::test]
async fn test_register_rejects_invalid_input() {
    let (store, app) = setup_app();

    let mut missing_email = registration("x@club.fr");
    missing_email.as_object_mut().unwrap().remove("email");
    let (status, _) = send(&app, "POST", "/inscription", None, Some(missing_email)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut long_name = registration("y@club.fr");
    long_name["nom"] = json!("N".repeat(21));
    let (status, _) = send(&app, "POST", "/inscription", None, Some(long_name)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(store.user_count(), 0);
}

#[tokio::test]
async fn test_register_and_login_flow() {
    let (_, app) = setup_app();

    send(&app, "POST", "/inscription", None, Some(registration("flow@club.fr"))).await;

    let (status, body) = send(
        &app,
        "POST",
        "/connexion",
        None,
        Some(json!({ "email": "flow@club.fr", "password": "croquettes42" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let token = String::from_utf8(body).unwrap();
    let claims = club_canin_api::auth::jwt::verify_token(&token, SECRET).unwrap();
    assert_eq!(claims.sub, "flow@club.fr");
    assert_eq!(claims.role, Role::Member);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let (store, app) = setup_app();
    store.seed_user("known@club.fr", "right", Role::Member, COST);

    let (wrong_status, wrong_body) = send(
        &app,
        "POST",
        "/connexion",
        None,
        Some(json!({ "email": "known@club.fr", "password": "wrong" })),
    )
    .await;
    let (unknown_status, unknown_body) = send(
        &app,
        "POST",
        "/connexion",
        None,
        Some(json!({ "email": "nobody@club.fr", "password": "right" })),
    )
    .await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_body, unknown_body);
}

#[tokio::test]
async fn test_protected_endpoint_requires_authentication() {
    let (store, app) = setup_app();

    let (status, body) = send(&app, "POST", "/cours", None, Some(course("Agility 1", 60, "Agility"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.is_empty());

    let (status, _) = send(
        &app,
        "POST",
        "/cours",
        Some("not.a.token"),
        Some(course("Agility 1", 60, "Agility")),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let forged = create_token(
        &Claims {
            sub: "coach@club.fr".into(),
            role: Role::Coach,
            id: 1,
        },
        "some-other-secret",
    )
    .unwrap();
    let (status, _) = send(&app, "POST", "/cours", Some(&forged), Some(course("Agility 1", 60, "Agility"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    assert_eq!(store.course_count(), 0);
}

#[tokio::test]
async fn test_member_is_forbidden_on_course_mutations() {
    let (store, app) = setup_app();
    let (_, coach) = login_as(&store, &app, "coach@club.fr", Role::Coach).await;
    let (_, member) = login_as(&store, &app, "member@club.fr", Role::Member).await;

    let (_, body) = send(&app, "POST", "/cours", Some(&coach), Some(course("Rappel", 45, "Éducation"))).await;
    let id = json_of(&body)["id_cours"].as_i64().unwrap();

    let (status, _) = send(&app, "POST", "/cours", Some(&member), Some(course("Pistage", 90, "Flair"))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let uri = format!("/cours/{}", id);
    let (status, _) = send(&app, "PUT", &uri, Some(&member), Some(course("Rappel 2", 45, "Éducation"))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, "DELETE", &uri, Some(&member), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    assert_eq!(store.course_count(), 1);
}

#[tokio::test]
async fn test_coach_and_admin_manage_courses() {
    let (store, app) = setup_app();
    let (coach_id, coach) = login_as(&store, &app, "coach@club.fr", Role::Coach).await;
    let (_, admin) = login_as(&store, &app, "admin@club.fr", Role::Admin).await;

    let (status, body) = send(&app, "POST", "/cours", Some(&coach), Some(course("Chiots", 30, "Éducation"))).await;
    assert_eq!(status, StatusCode::CREATED);
    let created = json_of(&body);
    assert_eq!(created["nom"], "Chiots");
    assert_eq!(created["nom_type"], "Éducation");

    let (status, _) = send(&app, "POST", "/cours", Some(&admin), Some(course("Flyball", 60, "Sport"))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, "GET", "/cours/liste", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let list = json_of(&body);
    assert_eq!(list.as_array().unwrap().len(), 2);
    assert_eq!(list[0]["nom_cours"], "Chiots");
    assert_eq!(list[0]["id_utilisateur"], coach_id);

    let uri = format!("/cours/{}", created["id_cours"]);
    let (status, body) = send(&app, "GET", &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_of(&body)["duree_cours"], 30);
}

#[tokio::test]
async fn test_course_validation() {
    let (store, app) = setup_app();
    let (_, coach) = login_as(&store, &app, "coach@club.fr", Role::Coach).await;

    let cases = [
        json!({ "duree_cours": 30, "nom_type": "Éducation" }),
        json!({ "nom": "", "duree_cours": 30, "nom_type": "Éducation" }),
        json!({ "nom": "A".repeat(21), "duree_cours": 30, "nom_type": "Éducation" }),
        json!({ "nom": "Chiots", "nom_type": "Éducation" }),
        json!({ "nom": "Chiots", "duree_cours": 0, "nom_type": "Éducation" }),
        json!({ "nom": "Chiots", "duree_cours": 30 }),
        json!({ "nom": "Chiots", "duree_cours": 30, "nom_type": "T".repeat(51) }),
    ];

    for payload in cases {
        let (status, _) = send(&app, "POST", "/cours", Some(&coach), Some(payload.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload: {}", payload);
    }

    let (status, _) = send(&app, "POST", "/cours", Some(&coach), Some(course("A".repeat(20).as_str(), 30, &"T".repeat(50)))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(store.course_count(), 1);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let (store, app) = setup_app();
    let (_, coach) = login_as(&store, &app, "coach@club.fr", Role::Coach).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/cours")
                .header("authorization", format!("Bearer {}", coach))
                .header("content-type", "application/json")
                .body(Body::from("{ not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_duplicate_course_name_conflicts() {
    let (store, app) = setup_app();
    let (_, coach) = login_as(&store, &app, "coach@club.fr", Role::Coach).await;

    send(&app, "POST", "/cours", Some(&coach), Some(course("Obéissance", 60, "Éducation"))).await;
    let (status, _) = send(&app, "POST", "/cours", Some(&coach), Some(course("Obéissance", 90, "Sport"))).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(store.course_count(), 1);
}

#[tokio::test]
async fn test_course_types_are_reused_by_name() {
    let (store, app) = setup_app();
    let (_, coach) = login_as(&store, &app, "coach@club.fr", Role::Coach).await;

    let (_, first) = send(&app, "POST", "/cours", Some(&coach), Some(course("Agility 1", 60, "Agility"))).await;
    assert_eq!(store.type_count(), 1);

    let (_, second) = send(&app, "POST", "/cours", Some(&coach), Some(course("Agility 2", 60, "Agility"))).await;
    assert_eq!(store.type_count(), 1);
    assert_eq!(json_of(&first)["id_type"], json_of(&second)["id_type"]);
}

#[tokio::test]
async fn test_updating_duration_keeps_name_and_type() {
    let (store, app) = setup_app();
    let (_, coach) = login_as(&store, &app, "coach@club.fr", Role::Coach).await;

    let (_, body) = send(&app, "POST", "/cours", Some(&coach), Some(course("Chiots", 30, "Éducation"))).await;
    let before = json_of(&body);
    let uri = format!("/cours/{}", before["id_cours"]);

    let (status, body) = send(&app, "PUT", &uri, Some(&coach), Some(course("Chiots", 45, "Éducation"))).await;
    assert_eq!(status, StatusCode::OK);
    let after = json_of(&body);

    assert_eq!(after["duree_cours"], 45);
    assert_eq!(after["nom"], before["nom"]);
    assert_eq!(after["id_type"], before["id_type"]);
    assert_eq!(store.type_count(), 1);

    // Omitted type keeps the current one
    let (status, body) = send(
        &app,
        "PUT",
        &uri,
        Some(&coach),
        Some(json!({ "nom": "Chiots", "duree_cours": 50 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_of(&body)["id_type"], before["id_type"]);
}

#[tokio::test]
async fn test_update_course_conflicts_and_missing() {
    let (store, app) = setup_app();
    let (_, coach) = login_as(&store, &app, "coach@club.fr", Role::Coach).await;

    send(&app, "POST", "/cours", Some(&coach), Some(course("Chiots", 30, "Éducation"))).await;
    let (_, body) = send(&app, "POST", "/cours", Some(&coach), Some(course("Adultes", 60, "Éducation"))).await;
    let uri = format!("/cours/{}", json_of(&body)["id_cours"]);

    let (status, _) = send(&app, "PUT", &uri, Some(&coach), Some(course("Chiots", 60, "Éducation"))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Renaming a course to its own name is not a conflict
    let (status, _) = send(&app, "PUT", &uri, Some(&coach), Some(course("Adultes", 75, "Éducation"))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "PUT", "/cours/9999", Some(&coach), Some(course("Fantôme", 60, "Éducation"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_course() {
    let (store, app) = setup_app();
    let (_, coach) = login_as(&store, &app, "coach@club.fr", Role::Coach).await;

    let (status, _) = send(&app, "DELETE", "/cours/9999", Some(&coach), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&app, "POST", "/cours", Some(&coach), Some(course("Chiots", 30, "Éducation"))).await;
    let uri = format!("/cours/{}", json_of(&body)["id_cours"]);

    let (status, body) = send(&app, "DELETE", &uri, Some(&coach), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());

    let (status, _) = send(&app, "GET", &uri, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(store.course_count(), 0);
}

#[tokio::test]
async fn test_reservation_creates_default_dog_once() {
    let (store, app) = setup_app();
    let (_, coach) = login_as(&store, &app, "coach@club.fr", Role::Coach).await;
    let (member_id, member) = login_as(&store, &app, "member@club.fr", Role::Member).await;

    let (_, body) = send(&app, "POST", "/cours", Some(&coach), Some(course("Chiots", 30, "Éducation"))).await;
    let id_cours = json_of(&body)["id_cours"].as_i64().unwrap();
    assert!(store.dogs_of(member_id).is_empty());

    let (status, body) = send(&app, "POST", "/reservations", Some(&member), Some(json!({ "id_cours": id_cours }))).await;
    assert_eq!(status, StatusCode::CREATED);

    let dogs = store.dogs_of(member_id);
    assert_eq!(dogs.len(), 1);
    assert_eq!(dogs[0].name, "Mon premier chien");
    assert_eq!(json_of(&body)["id_chien"], dogs[0].id);
    assert_eq!(store.reservation_count(), 1);

    let (status, _) = send(&app, "POST", "/reservations", Some(&member), Some(json!({ "id_cours": id_cours }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(store.dogs_of(member_id).len(), 1);
    assert_eq!(store.reservation_count(), 1);
}

#[tokio::test]
async fn test_reservation_validation() {
    let (store, app) = setup_app();
    let (member_id, member) = login_as(&store, &app, "member@club.fr", Role::Member).await;

    let (status, _) = send(&app, "POST", "/reservations", Some(&member), Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "POST", "/reservations", Some(&member), Some(json!({ "id_cours": 777 }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "POST", "/reservations", None, Some(json!({ "id_cours": 1 }))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    assert!(store.dogs_of(member_id).is_empty());
    assert_eq!(store.reservation_count(), 0);
}

#[tokio::test]
async fn test_user_listing_and_lookup() {
    let (store, app) = setup_app();
    let (status, body) = send(&app, "POST", "/inscription", None, Some(registration("liste@club.fr"))).await;
    assert_eq!(status, StatusCode::OK);
    let id = json_of(&body)["id_utilisateur"].as_i64().unwrap();

    let (status, body) = send(&app, "GET", "/utilisateurs/liste", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let rows = json_of(&body);
    assert_eq!(rows.as_array().unwrap().len(), 1);
    assert!(rows[0]["mot_de_passe"].as_str().unwrap().starts_with("$2"));

    let (status, body) = send(&app, "GET", &format!("/utilisateur/{}", id), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_of(&body)["email"], "liste@club.fr");

    let (status, _) = send(&app, "GET", "/utilisateur/4242", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(store.user_count(), 1);
}

#[tokio::test]
async fn test_staff_create_and_update_users() {
    let (store, app) = setup_app();
    let (_, coach) = login_as(&store, &app, "coach@club.fr", Role::Coach).await;
    let (_, member) = login_as(&store, &app, "member@club.fr", Role::Member).await;

    let (status, _) = send(&app, "POST", "/utilisateur", Some(&member), Some(registration("new@club.fr"))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&app, "POST", "/utilisateur", Some(&coach), Some(registration("new@club.fr"))).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = json_of(&body)["id_utilisateur"].as_i64().unwrap();

    let (status, _) = send(&app, "POST", "/utilisateur", Some(&coach), Some(registration("new@club.fr"))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let mut promote = registration("new@club.fr");
    promote["role"] = json!("admin");
    let (status, _) = send(&app, "POST", "/utilisateur", Some(&coach), Some(promote.clone())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let uri = format!("/utilisateur/{}", id);
    let mut changes = registration("renamed@club.fr");
    changes["nom"] = json!("Dupont");
    changes.as_object_mut().unwrap().remove("password");
    let (status, body) = send(&app, "PUT", &uri, Some(&coach), Some(changes)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_of(&body)["nom"], "Dupont");
    assert_eq!(json_of(&body)["email"], "renamed@club.fr");

    // Password kept when omitted
    let (status, _) = send(
        &app,
        "POST",
        "/connexion",
        None,
        Some(json!({ "email": "renamed@club.fr", "password": "croquettes42" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "PUT", &uri, Some(&coach), Some(registration("coach@club.fr"))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(&app, "PUT", &uri, Some(&member), Some(registration("x@club.fr"))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let mut invalid = registration("renamed@club.fr");
    invalid["email"] = json!("no-at-sign");
    let (status, _) = send(&app, "PUT", &uri, Some(&coach), Some(invalid)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_only_admin_updates_admin_accounts() {
    let (store, app) = setup_app();
    let (_, coach) = login_as(&store, &app, "coach@club.fr", Role::Coach).await;
    let (admin_id, admin) = login_as(&store, &app, "admin@club.fr", Role::Admin).await;
    let admin_uri = format!("/utilisateur/{}", admin_id);

    // A coach cannot take over an admin by resetting the password
    let mut takeover = registration("admin@club.fr");
    takeover["password"] = json!("pris-en-main");
    let (status, body) = send(&app, "PUT", &admin_uri, Some(&coach), Some(takeover)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body.is_empty());

    let (status, _) = send(
        &app,
        "POST",
        "/connexion",
        None,
        Some(json!({ "email": "admin@club.fr", "password": "pris-en-main" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Nor demote one
    let mut demote = registration("admin@club.fr");
    demote["role"] = json!("member");
    demote.as_object_mut().unwrap().remove("password");
    let (status, _) = send(&app, "PUT", &admin_uri, Some(&coach), Some(demote.clone())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&app, "GET", &admin_uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_of(&body)["nom_role"], "admin");

    // The stored credentials still work
    let (status, _) = send(
        &app,
        "POST",
        "/connexion",
        None,
        Some(json!({ "email": "admin@club.fr", "password": "motdepasse" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // An admin may update another admin
    let other_id = store.seed_user("admin2@club.fr", "motdepasse", Role::Admin, COST);
    let mut changes = registration("admin2@club.fr");
    changes["role"] = json!("coach");
    let (status, body) = send(
        &app,
        "PUT",
        &format!("/utilisateur/{}", other_id),
        Some(&admin),
        Some(changes),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_of(&body)["nom_role"], "coach");

    let (status, _) = send(&app, "PUT", "/utilisateur/9999", Some(&coach), Some(registration("x@club.fr"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_user_authorization() {
    let (store, app) = setup_app();
    let (coach_id, coach) = login_as(&store, &app, "coach@club.fr", Role::Coach).await;
    let (member_id, member) = login_as(&store, &app, "member@club.fr", Role::Member).await;
    let (_, admin) = login_as(&store, &app, "admin@club.fr", Role::Admin).await;

    let member_uri = format!("/utilisateur/{}", member_id);
    let coach_uri = format!("/utilisateur/{}", coach_id);

    // Members cannot delete, not even themselves
    let (status, _) = send(&app, "DELETE", &member_uri, Some(&member), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Coaches can only delete their own account
    let (status, _) = send(&app, "DELETE", &member_uri, Some(&coach), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, "DELETE", &member_uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "DELETE", &member_uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", &coach_uri, Some(&coach), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    assert_eq!(store.user_count(), 1);
}

#[tokio::test]
async fn test_non_numeric_id_is_bare_not_found() {
    let (store, app) = setup_app();
    let (_, coach) = login_as(&store, &app, "coach@club.fr", Role::Coach).await;
    let (_, admin) = login_as(&store, &app, "admin@club.fr", Role::Admin).await;

    let (status, body) = send(&app, "GET", "/cours/abc", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_empty());

    let (status, body) = send(&app, "PUT", "/cours/abc", Some(&coach), Some(course("Chiots", 30, "Éducation"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_empty());

    let (status, body) = send(&app, "DELETE", "/cours/abc", Some(&coach), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_empty());

    let (status, body) = send(&app, "GET", "/utilisateur/abc", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_empty());

    let (status, body) = send(&app, "PUT", "/utilisateur/abc", Some(&admin), Some(registration("x@club.fr"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_empty());

    let (status, body) = send(&app, "DELETE", "/utilisateur/abc", Some(&admin), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_empty());
    assert_eq!(store.course_count(), 0);
}

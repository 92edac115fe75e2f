mod common;

use axum::http::StatusCode;
use common::{World, get, jwt_config, token};
use rollcall_auth::create_access_token;
use rollcall_config::JwtConfig;
use rollcall_models::{Role, SchoolId, UserId};

// ============ Authentication ============

#[tokio::test]
async fn test_health_needs_no_token() {
    let world = World::seed().await;
    let (status, body) = get(world.app(), "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let world = World::seed().await;
    let (status, body) = get(world.app(), "/api/access/me", None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_non_bearer_scheme_is_unauthorized() {
    let world = World::seed().await;
    let request = axum::http::Request::builder()
        .uri("/api/access/me")
        .header("Authorization", "Basic dXNlcjpwYXNz")
        .body(axum::body::Body::empty())
        .unwrap();

    let response = tower::ServiceExt::oneshot(world.app(), request)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_forged_token_is_unauthorized() {
    let world = World::seed().await;
    let forged = create_access_token(
        world.admin_a,
        Role::SchoolAdmin,
        None,
        &JwtConfig {
            secret: "someone-else".to_string(),
            ..jwt_config()
        },
    )
    .unwrap();

    let (status, _) = get(world.app(), "/api/access/me", Some(&forged)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_token_is_unauthorized() {
    let world = World::seed().await;
    let expired = create_access_token(
        world.admin_a,
        Role::SchoolAdmin,
        None,
        &JwtConfig {
            access_token_expiry: -3600,
            ..jwt_config()
        },
    )
    .unwrap();

    let (status, _) = get(world.app(), "/api/access/me", Some(&expired)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// ============ Identity resolution ============

#[tokio::test]
async fn test_staff_token_without_profile_is_forbidden() {
    let world = World::seed().await;
    let ghost = UserId::new();
    let ghost_token = token(ghost, Role::Teacher, Some(world.school_a));

    let (status, body) = get(world.app(), "/api/access/me", Some(&ghost_token)).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(!body.to_string().contains(&ghost.to_string()));
}

#[tokio::test]
async fn test_role_without_matching_profile_is_forbidden() {
    let world = World::seed().await;
    // The teacher has a teacher profile, not a school admin one.
    let escalated = token(world.teacher_a, Role::SchoolAdmin, Some(world.school_a));

    let (status, _) = get(world.app(), "/api/access/me", Some(&escalated)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_parent_token_without_profile_is_forbidden() {
    let world = World::seed().await;
    let stranger = token(UserId::new(), Role::Parent, None);

    let (status, _) = get(world.app(), "/api/access/me", Some(&stranger)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_identity_uses_profile_school_over_stale_claim() {
    let world = World::seed().await;
    let stale = token(world.admin_a, Role::SchoolAdmin, Some(world.school_c));

    let (status, body) = get(world.app(), "/api/access/me", Some(&stale)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "school_admin");
    assert_eq!(body["school_id"], world.school_a.to_string());
}

#[tokio::test]
async fn test_super_admin_identity_has_no_school() {
    let world = World::seed().await;
    let admin = token(world.super_admin, Role::SuperAdmin, Some(world.school_b));

    let (status, body) = get(world.app(), "/api/access/me", Some(&admin)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "super_admin");
    assert!(body["school_id"].is_null());
}

// ============ Parent schools ============

#[tokio::test]
async fn test_parent_sees_schools_of_linked_children() {
    let world = World::seed().await;
    let parent = token(world.parent, Role::Parent, Some(world.school_c));

    let (status, body) = get(world.app(), "/api/access/me/schools", Some(&parent)).await;

    assert_eq!(status, StatusCode::OK);
    let mut schools: Vec<String> = body["school_ids"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s.as_str().unwrap().to_string())
        .collect();
    schools.sort();
    let mut expected = vec![world.school_a.to_string(), world.school_b.to_string()];
    expected.sort();
    assert_eq!(schools, expected);
}

#[tokio::test]
async fn test_own_schools_is_parent_only() {
    let world = World::seed().await;
    let teacher = token(world.teacher_a, Role::Teacher, None);

    let (status, _) = get(world.app(), "/api/access/me/schools", Some(&teacher)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_parent_schools_lookup_is_super_admin_only() {
    let world = World::seed().await;
    let uri = format!("/api/access/parents/{}/schools", world.parent);

    for (subject, role) in [
        (world.admin_a, Role::SchoolAdmin),
        (world.principal_b, Role::Principal),
        (world.teacher_a, Role::Teacher),
        (world.parent, Role::Parent),
    ] {
        let (status, _) = get(world.app(), &uri, Some(&token(subject, role, None))).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{} must be rejected", role);
    }

    let admin = token(world.super_admin, Role::SuperAdmin, None);
    let (status, body) = get(world.app(), &uri, Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["school_ids"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_parent_schools_lookup_requires_token() {
    let world = World::seed().await;
    let uri = format!("/api/access/parents/{}/schools", world.parent);

    let (status, _) = get(world.app(), &uri, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unknown_parent_has_no_schools() {
    let world = World::seed().await;
    let admin = token(world.super_admin, Role::SuperAdmin, None);
    let uri = format!("/api/access/parents/{}/schools", UserId::new());

    let (status, body) = get(world.app(), &uri, Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["school_ids"].as_array().unwrap().is_empty());
}

// ============ Filters ============

#[tokio::test]
async fn test_filter_preview_per_role() {
    let world = World::seed().await;

    let admin = token(world.admin_a, Role::SchoolAdmin, None);
    let (status, body) = get(world.app(), "/api/access/filters/students", Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["kind"], "student");
    assert_eq!(body["predicate"]["type"], "school_equals");
    assert_eq!(body["predicate"]["school_id"], world.school_a.to_string());

    let teacher = token(world.teacher_a, Role::Teacher, None);
    let (_, body) = get(world.app(), "/api/access/filters/classes", Some(&teacher)).await;
    assert_eq!(body["predicate"]["type"], "teacher_scoped");
    let (_, body) = get(world.app(), "/api/access/filters/events", Some(&teacher)).await;
    assert_eq!(body["predicate"]["type"], "school_equals");

    let parent = token(world.parent, Role::Parent, None);
    let (_, body) = get(world.app(), "/api/access/filters/student", Some(&parent)).await;
    assert_eq!(body["predicate"]["type"], "parent_scoped");

    let super_admin = token(world.super_admin, Role::SuperAdmin, None);
    let (_, body) = get(world.app(), "/api/access/filters/events", Some(&super_admin)).await;
    assert_eq!(body["predicate"]["type"], "unrestricted");
}

#[tokio::test]
async fn test_unknown_kind_is_bad_request() {
    let world = World::seed().await;
    let admin = token(world.admin_a, Role::SchoolAdmin, None);

    let (status, _) = get(world.app(), "/api/access/filters/invoices", Some(&admin)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ============ Instance checks ============

#[tokio::test]
async fn test_school_admin_instance_checks() {
    let world = World::seed().await;
    let admin = token(world.admin_a, Role::SchoolAdmin, Some(world.school_c));

    let own = format!("/api/access/students/{}", world.student_a3);
    let (status, body) = get(world.app(), &own, Some(&admin)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    // The stale school claim must not open school C.
    let foreign = format!("/api/access/students/{}", world.student_c);
    let (status, _) = get(world.app(), &foreign, Some(&admin)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_out_of_scope_and_missing_look_the_same() {
    let world = World::seed().await;
    let principal = token(world.principal_b, Role::Principal, None);

    let foreign = format!("/api/access/classes/{}", world.class_a1);
    let missing = format!("/api/access/classes/{}", SchoolId::new());

    let (foreign_status, foreign_body) = get(world.app(), &foreign, Some(&principal)).await;
    let (missing_status, missing_body) = get(world.app(), &missing, Some(&principal)).await;

    assert_eq!(foreign_status, StatusCode::NOT_FOUND);
    assert_eq!(missing_status, StatusCode::NOT_FOUND);
    assert_eq!(foreign_body, missing_body);
}

#[tokio::test]
async fn test_teacher_instance_checks() {
    let world = World::seed().await;
    let teacher = token(world.teacher_a, Role::Teacher, None);

    for allowed in [
        format!("/api/access/classes/{}", world.class_a1),
        format!("/api/access/classes/{}", world.class_a2),
        format!("/api/access/students/{}", world.child_a),
        format!("/api/access/students/{}", world.student_a2),
        format!("/api/access/events/{}", world.event_a),
    ] {
        let (status, _) = get(world.app(), &allowed, Some(&teacher)).await;
        assert_eq!(status, StatusCode::NO_CONTENT, "{}", allowed);
    }

    for denied in [
        format!("/api/access/classes/{}", world.class_a3),
        format!("/api/access/students/{}", world.student_a3),
        format!("/api/access/events/{}", world.event_b),
    ] {
        let (status, _) = get(world.app(), &denied, Some(&teacher)).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", denied);
    }
}

#[tokio::test]
async fn test_parent_instance_checks() {
    let world = World::seed().await;
    let parent = token(world.parent, Role::Parent, Some(world.school_c));

    for allowed in [
        format!("/api/access/students/{}", world.child_a),
        format!("/api/access/students/{}", world.child_b),
        format!("/api/access/events/{}", world.event_a),
        format!("/api/access/events/{}", world.event_b),
    ] {
        let (status, _) = get(world.app(), &allowed, Some(&parent)).await;
        assert_eq!(status, StatusCode::NO_CONTENT, "{}", allowed);
    }

    for denied in [
        format!("/api/access/students/{}", world.student_a2),
        format!("/api/access/events/{}", world.event_c),
    ] {
        let (status, _) = get(world.app(), &denied, Some(&parent)).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", denied);
    }
}

#[tokio::test]
async fn test_super_admin_reaches_every_school() {
    let world = World::seed().await;
    let admin = token(world.super_admin, Role::SuperAdmin, None);

    for id in [world.event_a, world.event_b, world.event_c] {
        let uri = format!("/api/access/events/{}", id);
        let (status, _) = get(world.app(), &uri, Some(&admin)).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }
}

// ============ Docs ============

#[tokio::test]
async fn test_openapi_document_lists_access_routes() {
    let world = World::seed().await;
    let (status, body) = get(world.app(), "/api-docs/openapi.json", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/access/me"].is_object());
    assert!(body["paths"]["/api/search"].is_object());
}

#[tokio::test]
async fn test_malformed_ids_are_json_bad_requests() {
    let world = World::seed().await;
    let admin = token(world.super_admin, Role::SuperAdmin, None);

    for uri in [
        "/api/access/students/not-a-uuid",
        "/api/access/parents/not-a-uuid/schools",
    ] {
        let (status, body) = get(world.app(), uri, Some(&admin)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert!(body["error"].is_string(), "{}", uri);
    }
}

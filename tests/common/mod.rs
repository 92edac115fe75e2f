use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use rollcall::router::init_router;
use rollcall::state::AppState;
use rollcall_access::InMemoryStore;
use rollcall_auth::create_access_token;
use rollcall_config::JwtConfig;
use rollcall_models::{
    ClassId, LinkKind, ResourceId, ResourceKind, Role, SchoolId, StudentId, UserId,
};
use serde_json::Value;
use tower::ServiceExt;

pub fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret".to_string(),
        access_token_expiry: 3600,
    }
}

/// Three schools with staff, classes, students and school-wide records.
///
/// - School A: admin, teacher (supervises `class_a1`, teaches a lesson in
///   `class_a2`), an unrelated `class_a3`
/// - School B: principal, one class
/// - School C: admin, one class, nobody linked to the parent
/// - The parent has one child in A and one in B
#[allow(dead_code)]
pub struct World {
    pub store: Arc<InMemoryStore>,
    pub school_a: SchoolId,
    pub school_b: SchoolId,
    pub school_c: SchoolId,
    pub super_admin: UserId,
    pub admin_a: UserId,
    pub principal_b: UserId,
    pub admin_c: UserId,
    pub teacher_a: UserId,
    pub parent: UserId,
    pub class_a1: ClassId,
    pub class_a2: ClassId,
    pub class_a3: ClassId,
    pub class_b: ClassId,
    pub class_c: ClassId,
    pub child_a: StudentId,
    pub child_b: StudentId,
    pub student_a2: StudentId,
    pub student_a3: StudentId,
    pub student_c: StudentId,
    pub event_a: ResourceId,
    pub event_b: ResourceId,
    pub event_c: ResourceId,
}

#[allow(dead_code)]
impl World {
    pub async fn seed() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let (school_a, school_b, school_c) = (SchoolId::new(), SchoolId::new(), SchoolId::new());

        let super_admin = UserId::new();
        let admin_a = UserId::new();
        let principal_b = UserId::new();
        let admin_c = UserId::new();
        let teacher_a = UserId::new();
        let parent = UserId::new();

        store.add_staff(admin_a, Role::SchoolAdmin, school_a).await;
        store.add_staff(principal_b, Role::Principal, school_b).await;
        store.add_staff(admin_c, Role::SchoolAdmin, school_c).await;
        store.add_staff(teacher_a, Role::Teacher, school_a).await;
        store.add_parent(parent).await;

        let class_a1 = store.add_class(school_a, Some(teacher_a), "Form 1A").await;
        let class_a2 = store.add_class(school_a, None, "Form 2A").await;
        let class_a3 = store.add_class(school_a, None, "Form 3A").await;
        let class_b = store.add_class(school_b, None, "Form 1B").await;
        let class_c = store.add_class(school_c, None, "Form 1C").await;
        store
            .add_lesson(school_a, class_a2, teacher_a, "Algebra, Form 2A")
            .await;

        let child_a = store.add_student(school_a, Some(class_a1), "Ada Obi").await;
        let child_b = store.add_student(school_b, Some(class_b), "Bola Obi").await;
        let student_a2 = store
            .add_student(school_a, Some(class_a2), "Chidi Eze")
            .await;
        let student_a3 = store.add_student(school_a, Some(class_a3), "Dayo Ade").await;
        let student_c = store
            .add_student(school_c, Some(class_c), "Emeka Uba")
            .await;
        store.link_parent(child_a, parent, LinkKind::Primary).await;
        store.link_parent(child_b, parent, LinkKind::Guardian).await;

        let event_a = store
            .add_resource(ResourceKind::Event, school_a, None, "Sports Day")
            .await;
        let event_b = store
            .add_resource(ResourceKind::Event, school_b, None, "Sports Day")
            .await;
        let event_c = store
            .add_resource(ResourceKind::Event, school_c, None, "Sports Day")
            .await;

        Self {
            store,
            school_a,
            school_b,
            school_c,
            super_admin,
            admin_a,
            principal_b,
            admin_c,
            teacher_a,
            parent,
            class_a1,
            class_a2,
            class_a3,
            class_b,
            class_c,
            child_a,
            child_b,
            student_a2,
            student_a3,
            student_c,
            event_a,
            event_b,
            event_c,
        }
    }

    pub fn app(&self) -> Router {
        init_router(AppState::in_memory(self.store.clone(), jwt_config()), None)
    }
}

#[allow(dead_code)]
pub fn token(subject: UserId, role: Role, school_id: Option<SchoolId>) -> String {
    create_access_token(subject, role, school_id, &jwt_config()).unwrap()
}

/// Sends a GET and returns the status with the parsed body (`Null` when empty).
#[allow(dead_code)]
pub async fn get(app: Router, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    let response = app
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            panic!(
                "Non-JSON body for {}. Status: {}, Body: {:?}",
                uri,
                status,
                String::from_utf8_lossy(&bytes)
            )
        })
    };
    (status, body)
}

/// IDs of the rows in a list or search response.
#[allow(dead_code)]
pub fn ids(rows: &Value) -> Vec<String> {
    rows.as_array()
        .unwrap_or_else(|| panic!("expected an array, got {}", rows))
        .iter()
        .map(|row| row["id"].as_str().unwrap().to_string())
        .collect()
}

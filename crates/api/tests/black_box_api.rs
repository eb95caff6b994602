use std::sync::Arc;

use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::StatusCode;
use serde_json::json;

use colegio_auth::{Role, SESSION_TTL_SECS, SessionClaims};
use colegio_core::RecordId;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(jwt_secret: &str) -> Self {
        // Same router as prod over the seeded dataset, on an ephemeral port.
        let db = Arc::new(colegio_store::seed::seeded());
        let app = colegio_api::app::build_app(jwt_secret, db);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn login(client: &reqwest::Client, base_url: &str, email: &str, password: &str) -> String {
    let res = client
        .post(format!("{}/auth/login", base_url))
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK, "login as {email}");
    let body: serde_json::Value = res.json().await.unwrap();
    body["token"].as_str().unwrap().to_string()
}

fn decode_claims(jwt_secret: &str, token: &str) -> SessionClaims {
    let mut validation = jsonwebtoken::Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    jsonwebtoken::decode::<SessionClaims>(
        token,
        &jsonwebtoken::DecodingKey::from_secret(jwt_secret.as_bytes()),
        &validation,
    )
    .expect("decode jwt")
    .claims
}

#[tokio::test]
async fn auth_required_for_protected_endpoints() {
    let srv = TestServer::spawn("test-secret").await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/students", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .get(format!("{}/auth/me", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    // The health probe stays public.
    let res = client
        .get(format!("{}/health", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn login_validates_fields_and_credentials() {
    let srv = TestServer::spawn("test-secret").await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/auth/login", srv.base_url))
        .json(&json!({ "email": "admin@colegio.com" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client
        .post(format!("{}/auth/login", srv.base_url))
        .json(&json!({ "email": "admin@colegio.com", "password": "wrong" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .post(format!("{}/auth/login", srv.base_url))
        .json(&json!({ "email": "nobody@colegio.com", "password": "123456" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn seeded_admin_gets_an_admin_token_that_opens_teachers() {
    let jwt_secret = "test-secret";
    let srv = TestServer::spawn(jwt_secret).await;
    let client = reqwest::Client::new();

    let token = login(&client, &srv.base_url, "admin@colegio.com", "123456").await;
    let claims = decode_claims(jwt_secret, &token);
    assert!(claims.role.is_admin());
    assert_eq!(claims.exp - claims.iat, SESSION_TTL_SECS);

    let res = client
        .get(format!("{}/teachers", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let teachers: serde_json::Value = res.json().await.unwrap();
    assert!(teachers.as_array().unwrap().len() >= 2);

    let res = client
        .get(format!("{}/teachers", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn auth_me_echoes_the_session_identity() {
    let srv = TestServer::spawn("test-secret").await;
    let client = reqwest::Client::new();

    let token = login(
        &client,
        &srv.base_url,
        "maria.torres@ieprimaria.com",
        "docente123",
    )
    .await;
    let res = client
        .get(format!("{}/auth/me", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["user"]["role"], "DOCENTE");
    assert_eq!(body["user"]["teacherDni"], "40302010");
}

#[tokio::test]
async fn docente_may_write_grades_but_only_read_the_roster() {
    let srv = TestServer::spawn("test-secret").await;
    let client = reqwest::Client::new();

    let token = login(
        &client,
        &srv.base_url,
        "maria.torres@ieprimaria.com",
        "docente123",
    )
    .await;

    // POST /students is forbidden for teachers.
    let res = client
        .post(format!("{}/students", srv.base_url))
        .bearer_auth(&token)
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // Reading the roster resources is allowed.
    for resource in ["students", "courses", "schedules", "enrollments"] {
        let res = client
            .get(format!("{}/{}", srv.base_url, resource))
            .bearer_auth(&token)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK, "GET /{resource}");
    }

    // Teachers and users stay closed, even for reads.
    for resource in ["teachers", "users"] {
        let res = client
            .get(format!("{}/{}", srv.base_url, resource))
            .bearer_auth(&token)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::FORBIDDEN, "GET /{resource}");
    }

    // Grades accept any method.
    let res = client
        .post(format!("{}/grades", srv.base_url))
        .bearer_auth(&token)
        .json(&json!({
            "studentDni": "21212121",
            "courseId": "matematica",
            "term": 2,
            "evaluation": 1,
            "score": 17.5
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn expired_tokens_are_rejected() {
    let jwt_secret = "test-secret";
    let srv = TestServer::spawn(jwt_secret).await;
    let client = reqwest::Client::new();

    let now = chrono::Utc::now().timestamp();
    let claims = SessionClaims {
        sub: RecordId::new(),
        email: "admin@colegio.com".to_string(),
        role: Role::admin(),
        name: "Admin".to_string(),
        teacher_dni: None,
        iat: now - 2 * SESSION_TTL_SECS,
        exp: now - SESSION_TTL_SECS,
    };
    let token = jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_bytes()),
    )
    .unwrap();

    let res = client
        .get(format!("{}/students", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn creating_a_teacher_mirrors_a_user_and_deleting_cascades() {
    let srv = TestServer::spawn("test-secret").await;
    let client = reqwest::Client::new();

    let admin = login(&client, &srv.base_url, "admin@colegio.com", "123456").await;

    let res = client
        .post(format!("{}/teachers", srv.base_url))
        .bearer_auth(&admin)
        .json(&json!({
            "dni": "60708090",
            "name": "Carla",
            "lastname": "Nunez",
            "email": "carla.nunez@ieprimaria.com",
            "sex": "F",
            "birthdate": "1990-04-02",
            "specialty": "Idiomas",
            "grade": 2,
            "section": "B",
            "role": "DOCENTE",
            "status": "ACTIVO"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    // The mirrored user exists and logs in with password = DNI.
    let res = client
        .get(format!("{}/users?teacherDni=60708090", srv.base_url))
        .bearer_auth(&admin)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let users: serde_json::Value = res.json().await.unwrap();
    assert_eq!(users.as_array().unwrap().len(), 1);
    assert_eq!(users[0]["role"], "DOCENTE");

    let teacher_token = login(
        &client,
        &srv.base_url,
        "carla.nunez@ieprimaria.com",
        "60708090",
    )
    .await;
    assert!(!teacher_token.is_empty());

    // Delete by natural key; the mirrored user goes with the teacher.
    let res = client
        .delete(format!("{}/teachers/dni/60708090", srv.base_url))
        .bearer_auth(&admin)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client
        .get(format!("{}/users?teacherDni=60708090", srv.base_url))
        .bearer_auth(&admin)
        .send()
        .await
        .unwrap();
    let users: serde_json::Value = res.json().await.unwrap();
    assert!(users.as_array().unwrap().is_empty());

    let res = client
        .post(format!("{}/auth/login", srv.base_url))
        .json(&json!({ "email": "carla.nunez@ieprimaria.com", "password": "60708090" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn averages_skip_empty_terms_and_classify_against_the_threshold() {
    let srv = TestServer::spawn("test-secret").await;
    let client = reqwest::Client::new();

    let admin = login(&client, &srv.base_url, "admin@colegio.com", "123456").await;

    let res = client
        .post(format!("{}/students", srv.base_url))
        .bearer_auth(&admin)
        .json(&json!({
            "dni": "77777777",
            "name": "Diego",
            "lastname": "Paredes",
            "email": "apoderado.diego@example.com",
            "sex": "M",
            "birthdate": "2014-09-09",
            "age": 11,
            "level": "Primaria",
            "grade": 5,
            "section": "A",
            "shift": "MANANA",
            "status": "ACTIVO"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = client
        .post(format!("{}/schedules", srv.base_url))
        .bearer_auth(&admin)
        .json(&json!({
            "teacherDni": "40302010",
            "shift": "MANANA",
            "grade": 5,
            "section": "A",
            "courses": ["matematica"]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let schedule: serde_json::Value = res.json().await.unwrap();

    let res = client
        .post(format!("{}/enrollments", srv.base_url))
        .bearer_auth(&admin)
        .json(&json!({
            "scheduleId": schedule["id"],
            "studentDni": "77777777"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    for (term, evaluation, score) in [(1, 1, 12.0), (1, 2, 14.0), (3, 1, 10.0)] {
        let res = client
            .post(format!("{}/grades", srv.base_url))
            .bearer_auth(&admin)
            .json(&json!({
                "studentDni": "77777777",
                "courseId": "matematica",
                "term": term,
                "evaluation": evaluation,
                "score": score
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    let res = client
        .get(format!("{}/reports/averages?grade=5", srv.base_url))
        .bearer_auth(&admin)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let rows: serde_json::Value = res.json().await.unwrap();
    let row = rows
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["studentDni"] == "77777777")
        .expect("row for the new student");

    assert_eq!(row["term1"], 13.0);
    assert_eq!(row["term2"], serde_json::Value::Null);
    assert_eq!(row["term3"], 10.0);
    assert_eq!(row["finalAvg"], 11.5);
    assert_eq!(row["status"], "DESAPROBADO");
}

#[tokio::test]
async fn reports_are_scoped_to_the_teachers_own_students() {
    let srv = TestServer::spawn("test-secret").await;
    let client = reqwest::Client::new();

    let token = login(
        &client,
        &srv.base_url,
        "maria.torres@ieprimaria.com",
        "docente123",
    )
    .await;

    let res = client
        .get(format!("{}/reports/averages", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let rows: serde_json::Value = res.json().await.unwrap();
    let dnis: Vec<&str> = rows
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["studentDni"].as_str().unwrap())
        .collect();

    // Seeded: only 21212121 and 31313131 are enrolled in Maria's schedule.
    assert_eq!(dnis.len(), 2);
    assert!(dnis.contains(&"21212121"));
    assert!(dnis.contains(&"31313131"));

    // Her transcript view filters out other teachers' courses.
    let res = client
        .get(format!("{}/reports/transcript/21212121", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let transcript: serde_json::Value = res.json().await.unwrap();
    assert!(
        transcript["rows"]
            .as_array()
            .unwrap()
            .iter()
            .all(|r| r["courseId"] != "educacion-fisica")
    );

    let res = client
        .get(format!("{}/reports/dashboard", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let stats: serde_json::Value = res.json().await.unwrap();
    assert_eq!(stats["activeStudents"], 2);
}

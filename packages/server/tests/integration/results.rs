use serde_json::json;

use crate::common::{TestApp, routes};

#[tokio::test]
async fn create_result_reports_percentage() {
    let app = TestApp::spawn().await;
    let student = app.create_student("R001", "Alice", "10A").await;

    let res = app
        .post(
            routes::RESULTS,
            &json!({
                "student_id": student,
                "subject": "Math",
                "marks_obtained": 45,
                "total_marks": "50",
                "semester": "S1",
            }),
        )
        .await;
    assert_eq!(res.status, 201, "{}", res.text);
    assert_eq!(res.body["student_id"], student);
    assert_eq!(res.body["marks_obtained"], "45.00");
    assert_eq!(res.body["total_marks"], "50.00");
    assert_eq!(res.body["percentage"], "90.00");
}

#[tokio::test]
async fn list_results_is_flat() {
    let app = TestApp::spawn().await;
    let alice = app.create_student("R001", "Alice", "10A").await;
    let bob = app.create_student("R002", "Bob", "10B").await;
    app.create_result(alice, "Math", "45", "50", "S1").await;
    app.create_result(bob, "Math", "20", "50", "S1").await;

    let res = app.get(routes::RESULTS).await;
    assert_eq!(res.status, 200);
    let list = res.body.as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["student_id"], alice);
    assert_eq!(list[1]["student_id"], bob);
    assert_eq!(list[1]["percentage"], "40.00");
}

#[tokio::test]
async fn create_result_validation() {
    let app = TestApp::spawn().await;
    let student = app.create_student("R001", "Alice", "10A").await;

    let zero_total = json!({
        "student_id": student, "subject": "Math",
        "marks_obtained": "10", "total_marks": "0", "semester": "S1",
    });
    let res = app.post(routes::RESULTS, &zero_total).await;
    assert_eq!(res.status, 400);
    assert_eq!(res.body["message"], "total_marks must be greater than zero");

    let too_large = json!({
        "student_id": student, "subject": "Math",
        "marks_obtained": "1000", "total_marks": "50", "semester": "S1",
    });
    let res = app.post(routes::RESULTS, &too_large).await;
    assert_eq!(res.status, 400);
    assert_eq!(res.body["message"], "marks_obtained must be at most 999.99");

    let not_a_number = json!({
        "student_id": student, "subject": "Math",
        "marks_obtained": "lots", "total_marks": "50", "semester": "S1",
    });
    let res = app.post(routes::RESULTS, &not_a_number).await;
    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn create_result_for_unknown_student_is_404() {
    let app = TestApp::spawn().await;

    let res = app
        .post(
            routes::RESULTS,
            &json!({
                "student_id": 4242, "subject": "Math",
                "marks_obtained": "10", "total_marks": "50", "semester": "S1",
            }),
        )
        .await;
    assert_eq!(res.status, 404);
}

#[tokio::test]
async fn duplicate_result_key_conflicts() {
    let app = TestApp::spawn().await;
    let student = app.create_student("R001", "Alice", "10A").await;
    app.create_result(student, "Math", "45", "50", "S1").await;

    let res = app
        .post(
            routes::RESULTS,
            &json!({
                "student_id": student, "subject": "Math",
                "marks_obtained": "30", "total_marks": "50", "semester": "S1",
            }),
        )
        .await;
    assert_eq!(res.status, 409);
    assert_eq!(res.body["code"], "CONFLICT");
}

#[tokio::test]
async fn update_and_delete_result() {
    let app = TestApp::spawn().await;
    let student = app.create_student("R001", "Alice", "10A").await;
    let id = app.create_result(student, "Math", "45", "50", "S1").await;

    let res = app
        .put(
            &routes::result(id),
            &json!({
                "subject": "Math",
                "marks_obtained": "12.345",
                "total_marks": "20",
                "semester": "S2",
            }),
        )
        .await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["marks_obtained"], "12.35");
    assert_eq!(res.body["semester"], "S2");
    assert_eq!(res.body["percentage"], "61.75");
    assert_eq!(res.body["student_id"], student);

    let res = app.get(&routes::result(id)).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["semester"], "S2");

    let res = app.delete(&routes::result(id)).await;
    assert_eq!(res.status, 204);

    assert_eq!(app.get(&routes::result(id)).await.status, 404);
    assert_eq!(app.delete(&routes::result(id)).await.status, 404);
}

#[tokio::test]
async fn update_result_onto_existing_key_conflicts() {
    let app = TestApp::spawn().await;
    let student = app.create_student("R001", "Alice", "10A").await;
    app.create_result(student, "Math", "45", "50", "S1").await;
    let art = app.create_result(student, "Art", "30", "50", "S1").await;

    let res = app
        .put(
            &routes::result(art),
            &json!({
                "subject": "Math", "marks_obtained": "30",
                "total_marks": "50", "semester": "S1",
            }),
        )
        .await;
    assert_eq!(res.status, 409);
}

#[tokio::test]
async fn zero_total_in_storage_reads_as_null_percentage() {
    use marksheet::entity::result;
    use rust_decimal::Decimal;
    use sea_orm::{ActiveModelTrait, EntityTrait, Set};

    let app = TestApp::spawn().await;
    let student = app.create_student("R001", "Alice", "10A").await;
    let id = app.create_result(student, "Math", "45", "50", "S1").await;

    let model = result::Entity::find_by_id(id)
        .one(&app.db)
        .await
        .unwrap()
        .unwrap();
    let mut active: result::ActiveModel = model.into();
    active.total_marks = Set(Decimal::ZERO);
    active.update(&app.db).await.expect("force zero total");

    let res = app.get(&routes::result(id)).await;
    assert_eq!(res.status, 200);
    assert!(res.body["percentage"].is_null());
}

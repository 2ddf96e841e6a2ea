use marksheet::config::ImportConfig;

use crate::common::{TestApp, build_xlsx, routes};

const STUDENTS_CSV: &str = "roll_number,name,class_name\nR001,Alice,10A\nR002,Bob,10B\n";

#[tokio::test]
async fn import_students_from_csv() {
    let app = TestApp::spawn().await;

    let res = app
        .upload(routes::STUDENTS_IMPORT, "students.csv", STUDENTS_CSV.into())
        .await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["message"], "Successfully imported 2 students.");
    assert_eq!(res.body["imported"], 2);
    assert_eq!(res.body["failed"], 0);
    assert_eq!(res.body["errors"], serde_json::json!([]));

    let list = app.get(routes::STUDENTS).await;
    assert_eq!(list.body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn reimporting_students_updates_in_place() {
    let app = TestApp::spawn().await;
    let id = app.create_student("R001", "Alice", "10A").await;

    let res = app
        .upload(
            routes::STUDENTS_IMPORT,
            "students.csv",
            "roll_number,name,class_name\nR001,Alicia,11A\n".into(),
        )
        .await;
    assert_eq!(res.status, 200, "{}", res.text);

    let list = app.get(routes::STUDENTS).await;
    let list = list.body.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["id"], id);
    assert_eq!(list[0]["name"], "Alicia");
    assert_eq!(list[0]["class_name"], "11A");
}

#[tokio::test]
async fn import_students_from_xlsx() {
    let app = TestApp::spawn().await;
    let data = build_xlsx(&[
        &["roll_number", "name", "class_name"],
        &["101", "Alice", "10A"],
        &["102", "Bob", "10B"],
    ]);

    let res = app
        .upload(routes::STUDENTS_IMPORT, "students.xlsx", data)
        .await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["imported"], 2);

    let list = app.get(routes::STUDENTS).await;
    assert_eq!(list.body[0]["roll_number"], "101");
}

#[tokio::test]
async fn missing_column_rejects_whole_file() {
    let app = TestApp::spawn().await;

    let res = app
        .upload(
            routes::STUDENTS_IMPORT,
            "students.csv",
            "roll_number,name\nR001,Alice\n".into(),
        )
        .await;
    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "MISSING_COLUMNS");
    assert_eq!(res.body["message"], "Missing required columns: class_name");

    let list = app.get(routes::STUDENTS).await;
    assert!(list.body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn unsupported_extension_is_rejected() {
    let app = TestApp::spawn().await;

    let res = app
        .upload(routes::STUDENTS_IMPORT, "students.txt", STUDENTS_CSV.into())
        .await;
    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "UNSUPPORTED_FORMAT");
    assert_eq!(
        res.body["message"],
        "Unsupported file format. Please upload a CSV or Excel file."
    );
}

#[tokio::test]
async fn corrupt_workbook_is_a_processing_error() {
    let app = TestApp::spawn().await;

    let res = app
        .upload(routes::RESULTS_IMPORT, "results.xlsx", b"not a workbook".to_vec())
        .await;
    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "PROCESSING_ERROR");
    assert!(
        res.body["message"]
            .as_str()
            .unwrap()
            .starts_with("Error processing file: ")
    );
}

#[tokio::test]
async fn unreadable_xls_is_a_processing_error() {
    let app = TestApp::spawn().await;

    let res = app
        .upload(routes::STUDENTS_IMPORT, "students.xls", STUDENTS_CSV.into())
        .await;
    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "PROCESSING_ERROR");
}

#[tokio::test]
async fn row_numbers_count_blank_records() {
    let app = TestApp::spawn().await;

    let csv = "roll_number,name,class_name\nR1,Alice,10A\n,,\nR3,,10C\n";
    let res = app
        .upload(routes::STUDENTS_IMPORT, "students.csv", csv.into())
        .await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["failed"], 1);
    assert_eq!(res.body["errors"][0]["row"], 4);
}

#[tokio::test]
async fn upload_without_file_field_is_rejected() {
    let app = TestApp::spawn().await;

    let res = app
        .upload_as(
            routes::STUDENTS_IMPORT,
            "attachment",
            "students.csv",
            STUDENTS_CSV.into(),
        )
        .await;
    assert_eq!(res.status, 400);
    assert_eq!(res.body["message"], "No file uploaded");

    let res = app
        .post(routes::STUDENTS_IMPORT, &serde_json::json!({}))
        .await;
    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "NO_FILE");
}

#[tokio::test]
async fn import_endpoints_only_accept_post() {
    let app = TestApp::spawn().await;

    for path in [routes::STUDENTS_IMPORT, routes::RESULTS_IMPORT] {
        let res = app.get(path).await;
        assert_eq!(res.status, 405, "GET {path}");
        assert_eq!(res.body["message"], "Method not allowed");
    }
}

#[tokio::test]
async fn import_results_with_unknown_student() {
    let app = TestApp::spawn().await;
    app.create_student("R001", "Alice", "10A").await;

    let csv = "student_roll_number,subject,marks_obtained,total_marks,semester\n\
               R001,Math,45,50,S1\n\
               R999,Math,40,50,S1\n";
    let res = app
        .upload(routes::RESULTS_IMPORT, "results.csv", csv.into())
        .await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(
        res.body["message"],
        "Successfully imported 1 results. Failed to import 1 results."
    );
    assert_eq!(res.body["errors"][0]["row"], 3);
    assert_eq!(
        res.body["errors"][0]["message"],
        "Student with roll number R999 not found"
    );

    let results = app.get(routes::RESULTS).await;
    let results = results.body.as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["percentage"], "90.00");
}

#[tokio::test]
async fn reimporting_results_overwrites_marks() {
    let app = TestApp::spawn().await;
    app.create_student("R001", "Alice", "10A").await;

    let first = "student_roll_number,subject,marks_obtained,total_marks,semester\nR001,Math,45,50,S1\n";
    let second = "semester,subject,student_roll_number,total_marks,marks_obtained\nS1,Math,R001,60,48\n";

    app.upload(routes::RESULTS_IMPORT, "results.csv", first.into())
        .await;
    let res = app
        .upload(routes::RESULTS_IMPORT, "results.csv", second.into())
        .await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["imported"], 1);

    let results = app.get(routes::RESULTS).await;
    let results = results.body.as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["marks_obtained"], "48.00");
    assert_eq!(results[0]["total_marks"], "60.00");
    assert_eq!(results[0]["percentage"], "80.00");
}

#[tokio::test]
async fn import_results_from_xlsx_with_row_errors() {
    let app = TestApp::spawn().await;
    app.create_student("101", "Alice", "10A").await;

    let data = build_xlsx(&[
        &["student_roll_number", "subject", "marks_obtained", "total_marks", "semester"],
        &["101", "Math", "45.5", "50", "S1"],
        &["101", "Art", "10", "0", "S1"],
        &["101", "Music", "abc", "50", "S1"],
    ]);
    let res = app
        .upload(routes::RESULTS_IMPORT, "results.xlsx", data)
        .await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["imported"], 1);
    assert_eq!(res.body["failed"], 2);
    assert_eq!(res.body["errors"][0]["row"], 3);
    assert_eq!(
        res.body["errors"][0]["message"],
        "total_marks must be greater than zero"
    );
    assert_eq!(res.body["errors"][1]["row"], 4);

    let results = app.get(routes::RESULTS).await;
    assert_eq!(results.body[0]["marks_obtained"], "45.50");
    assert_eq!(results.body[0]["percentage"], "91.00");
}

#[tokio::test]
async fn oversized_upload_is_rejected() {
    let app = TestApp::spawn_with(ImportConfig {
        max_upload_bytes: 1024,
    })
    .await;

    let mut csv = String::from("roll_number,name,class_name\n");
    for i in 0..200 {
        csv.push_str(&format!("R{i:04},Student {i},10A\n"));
    }
    let res = app
        .upload(routes::STUDENTS_IMPORT, "students.csv", csv.into_bytes())
        .await;
    assert_ne!(res.status, 200);

    let list = app.get(routes::STUDENTS).await;
    assert!(list.body.as_array().unwrap().is_empty());
}

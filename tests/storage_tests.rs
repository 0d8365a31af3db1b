mod common;

use common::{seed_grade, seed_student, spawn_file_store, spawn_store, student_request};
use school_registry::errors::StoreError;
use school_registry::models::{
    PaginationQuery, SortOrder,
    grades::{
        entities::DeletePolicy,
        requests::{CreateGradeRequest, GradeListQuery, GradeSortField, UpdateGradeRequest},
    },
    students::requests::{StudentListQuery, StudentSortField, UpdateStudentRequest},
};

#[tokio::test]
async fn test_grade_lifecycle_scenario() {
    let store = spawn_store().await;

    let grade = seed_grade(&store, "Grade 5").await;
    let student = seed_student(&store, "ab1", grade.id).await;

    // 被引用的年级不能删除
    let err = store
        .delete_grade(grade.id, DeletePolicy::Restrict)
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Integrity(_)));
    assert_eq!(err.code(), "E003");

    store.delete_student(student.id).await.unwrap();

    let deletion = store
        .delete_grade(grade.id, DeletePolicy::Restrict)
        .await
        .unwrap();
    assert_eq!(deletion.grade_id, grade.id);
    assert_eq!(deletion.students_removed, 0);

    let err = store.get_grade(grade.id).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
}

#[tokio::test]
async fn test_cascade_delete_removes_students() {
    let store = spawn_store().await;

    let grade = seed_grade(&store, "Grade 6").await;
    let other = seed_grade(&store, "Grade 7").await;
    let a = seed_student(&store, "cascade_a", grade.id).await;
    seed_student(&store, "cascade_b", grade.id).await;
    let kept = seed_student(&store, "kept_c", other.id).await;

    assert_eq!(store.count_students_in_grade(grade.id).await.unwrap(), 2);

    let deletion = store
        .delete_grade(grade.id, DeletePolicy::Cascade)
        .await
        .unwrap();
    assert_eq!(deletion.students_removed, 2);

    assert!(matches!(
        store.get_student(a.id).await.unwrap_err(),
        StoreError::NotFound(_)
    ));
    assert_eq!(store.get_student(kept.id).await.unwrap().grade_id, other.id);
}

#[tokio::test]
async fn test_delete_missing_grade_is_not_found() {
    let store = spawn_store().await;

    let err = store
        .delete_grade(404, DeletePolicy::Cascade)
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));

    let err = store.count_students_in_grade(404).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
}

#[tokio::test]
async fn test_create_then_get_round_trip() {
    let store = spawn_store().await;

    let grade = store
        .create_grade(CreateGradeRequest {
            name: "Grade 3".to_string(),
            level: Some("primary".to_string()),
            description: Some("Third year".to_string()),
        })
        .await
        .unwrap();
    assert!(grade.id > 0);
    assert_eq!(store.get_grade(grade.id).await.unwrap(), grade);

    let created = seed_student(&store, "jane.doe", grade.id).await;
    let fetched = store.get_student(created.id).await.unwrap();

    assert_eq!(fetched, created);
    assert_eq!(fetched.full_name, "Student jane.doe");
    assert_eq!(fetched.level, "5");
    assert_eq!(fetched.gender, "female");
    assert!(fetched.is_active);

    let relation = fetched.grade_relation.expect("grade projection");
    assert_eq!(relation.id, grade.id);
    assert_eq!(relation.name, "Grade 3");
    assert_eq!(relation.level.as_deref(), Some("primary"));

    let by_name = store.get_student_by_username("jane.doe").await.unwrap();
    assert_eq!(by_name.id, created.id);
}

#[tokio::test]
async fn test_password_hash_not_serialized() {
    let store = spawn_store().await;
    let grade = seed_grade(&store, "Grade 1").await;
    let student = seed_student(&store, "secretive", grade.id).await;

    let json = serde_json::to_value(&student).unwrap();
    assert!(json.get("password_hash").is_none());
    assert!(json.get("grade_relation").is_some());
}

#[tokio::test]
async fn test_duplicate_student_username_is_validation() {
    let store = spawn_store().await;
    let grade = seed_grade(&store, "Grade 5").await;
    seed_student(&store, "ab1", grade.id).await;

    let err = store
        .create_student(student_request("ab1", grade.id))
        .await
        .unwrap_err();
    assert_eq!(err, StoreError::validation("username: already exists"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_duplicate_creates_yield_one_success() {
    // 多连接文件库，写入在不同连接上竞争
    let (store, _dir) = spawn_file_store(4).await;
    let grade = seed_grade(&store, "Grade 5").await;

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let store = store.clone();
            let req = student_request("racer", grade.id);
            tokio::spawn(async move { store.create_student(req).await })
        })
        .collect();

    let mut outcomes = Vec::new();
    for handle in handles {
        outcomes.push(handle.await.unwrap());
    }

    assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
    let duplicate = StoreError::validation("username: already exists");
    assert!(
        outcomes
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(|e| *e == duplicate)
    );

    let listed = store
        .list_students(StudentListQuery {
            search: Some("racer".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
}

#[tokio::test]
async fn test_update_student_username_collision_is_validation() {
    let store = spawn_store().await;
    let grade = seed_grade(&store, "Grade 5").await;
    seed_student(&store, "abc", grade.id).await;
    let bcd = seed_student(&store, "bcd", grade.id).await;

    let err = store
        .update_student(
            bcd.id,
            UpdateStudentRequest {
                username: Some("abc".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err, StoreError::validation("username: already exists"));

    // 失败的更新不留下任何修改
    assert_eq!(store.get_student(bcd.id).await.unwrap(), bcd);
}

#[tokio::test]
async fn test_update_keeps_id_and_created_at() {
    let store = spawn_store().await;
    let grade = seed_grade(&store, "Grade 5").await;
    let before = seed_student(&store, "renamed", grade.id).await;

    let after = store
        .update_student(
            before.id,
            UpdateStudentRequest {
                full_name: Some("Renamed Student".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(after.id, before.id);
    assert_eq!(after.created_at, before.created_at);
    assert!(after.updated_at >= before.updated_at);
    assert_eq!(after.full_name, "Renamed Student");

    let grade_after = store
        .update_grade(
            grade.id,
            UpdateGradeRequest {
                description: Some("Fifth year".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(grade_after.id, grade.id);
    assert_eq!(grade_after.created_at, grade.created_at);
    assert!(grade_after.updated_at >= grade.updated_at);
}

#[tokio::test]
async fn test_student_with_unknown_grade_is_validation() {
    let store = spawn_store().await;

    let err = store
        .create_student(student_request("orphan", 999))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
    assert!(err.message().starts_with("grade_id:"));
}

#[tokio::test]
async fn test_student_field_validation() {
    let store = spawn_store().await;
    let grade = seed_grade(&store, "Grade 5").await;

    let mut req = student_request("blank_name", grade.id);
    req.full_name = "   ".to_string();
    let err = store.create_student(req).await.unwrap_err();
    assert_eq!(err, StoreError::validation("full_name: must not be empty"));

    let err = store
        .create_student(student_request("no spaces allowed", grade.id))
        .await
        .unwrap_err();
    assert!(err.message().starts_with("username:"));

    let err = store
        .create_grade(CreateGradeRequest::named(""))
        .await
        .unwrap_err();
    assert!(err.message().starts_with("name:"));
}

#[tokio::test]
async fn test_get_absent_records_is_not_found() {
    let store = spawn_store().await;

    assert!(matches!(
        store.get_grade(1).await.unwrap_err(),
        StoreError::NotFound(_)
    ));
    assert!(matches!(
        store.get_student(1).await.unwrap_err(),
        StoreError::NotFound(_)
    ));
    assert!(matches!(
        store.get_student_by_username("ghost").await.unwrap_err(),
        StoreError::NotFound(_)
    ));
    assert!(matches!(
        store.delete_student(1).await.unwrap_err(),
        StoreError::NotFound(_)
    ));
    assert!(matches!(
        store
            .update_grade(1, UpdateGradeRequest::default())
            .await
            .unwrap_err(),
        StoreError::NotFound(_)
    ));
}

#[tokio::test]
async fn test_update_student_moves_grade() {
    let store = spawn_store().await;
    let from = seed_grade(&store, "Grade 5").await;
    let to = seed_grade(&store, "Grade 6").await;
    let student = seed_student(&store, "mover", from.id).await;

    let updated = store
        .update_student(
            student.id,
            UpdateStudentRequest {
                grade_id: Some(to.id),
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.grade_id, to.id);
    assert_eq!(updated.grade_relation.unwrap().name, "Grade 6");
    assert!(!updated.is_active);
    assert_eq!(updated.username, "mover");

    let err = store
        .update_student(
            student.id,
            UpdateStudentRequest {
                grade_id: Some(12345),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(err.message().starts_with("grade_id:"));

    let err = store
        .update_student(9999, UpdateStudentRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
}

#[tokio::test]
async fn test_list_students_filters_and_pagination() {
    let store = spawn_store().await;
    let five = seed_grade(&store, "Grade 5").await;
    let six = seed_grade(&store, "Grade 6").await;
    for name in ["carol", "alice", "bob"] {
        seed_student(&store, name, five.id).await;
    }
    seed_student(&store, "dave", six.id).await;

    let in_five = store
        .list_students(StudentListQuery {
            grade_id: Some(five.id),
            sort_by: Some(StudentSortField::Username),
            ..Default::default()
        })
        .await
        .unwrap();
    let names: Vec<_> = in_five.iter().map(|s| s.username.as_str()).collect();
    assert_eq!(names, ["alice", "bob", "carol"]);

    let page = store
        .list_students(StudentListQuery {
            sort_by: Some(StudentSortField::Username),
            order: Some(SortOrder::Desc),
            pagination: PaginationQuery::new(2, 2),
            ..Default::default()
        })
        .await
        .unwrap();
    let names: Vec<_> = page.iter().map(|s| s.username.as_str()).collect();
    assert_eq!(names, ["bob", "alice"]);

    let searched = store
        .list_students(StudentListQuery {
            search: Some("dav".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(searched.len(), 1);
    assert_eq!(searched[0].grade_relation.as_ref().unwrap().id, six.id);
}

#[tokio::test]
async fn test_list_search_treats_wildcards_literally() {
    let store = spawn_store().await;
    seed_grade(&store, "Grade 5").await;
    seed_grade(&store, "100% Club").await;

    let grades = store
        .list_grades(GradeListQuery {
            search: Some("%".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(grades.len(), 1);
    assert_eq!(grades[0].name, "100% Club");
}

#[tokio::test]
async fn test_update_grade_and_sort() {
    let store = spawn_store().await;
    let b = seed_grade(&store, "B grade").await;
    seed_grade(&store, "A grade").await;

    let updated = store
        .update_grade(
            b.id,
            UpdateGradeRequest {
                level: Some("secondary".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "B grade");
    assert_eq!(updated.level.as_deref(), Some("secondary"));
    assert!(updated.updated_at >= b.updated_at);

    let sorted = store
        .list_grades(GradeListQuery {
            sort_by: Some(GradeSortField::Name),
            ..Default::default()
        })
        .await
        .unwrap();
    let names: Vec<_> = sorted.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, ["A grade", "B grade"]);

    let secondary = store
        .list_grades(GradeListQuery {
            level: Some("secondary".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(secondary.len(), 1);
}

#[tokio::test]
async fn test_close_releases_store() {
    let store = spawn_store().await;
    seed_grade(&store, "Grade 5").await;
    store.close().await.unwrap();
}

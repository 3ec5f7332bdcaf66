use rollcall_core::db::open_db_in_memory;
use rollcall_core::{
    CourseService, CourseServiceError, CourseValidationError, SqliteCourseRepository,
    ValidationError,
};

#[test]
fn create_assigns_store_ids_and_reads_back() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteCourseRepository::new(&mut conn);
    let mut service = CourseService::new(repo);

    let math = service
        .create_course("Math101", Some("intro".to_string()))
        .unwrap();
    assert_eq!(math.id, 1);

    let loaded = service.get_course(math.id).unwrap().unwrap();
    assert_eq!(loaded, math);
    assert_eq!(loaded.description.as_deref(), Some("intro"));
}

#[test]
fn description_is_optional() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteCourseRepository::new(&mut conn);
    let mut service = CourseService::new(repo);

    let course = service.create_course("Physics201", None).unwrap();
    let loaded = service.get_course(course.id).unwrap().unwrap();
    assert_eq!(loaded.description, None);
}

#[test]
fn course_names_need_not_be_unique() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteCourseRepository::new(&mut conn);
    let mut service = CourseService::new(repo);

    let first = service.create_course("Math101", None).unwrap();
    let second = service.create_course("Math101", None).unwrap();
    assert_ne!(first.id, second.id);
    assert_eq!(service.list_courses().unwrap().len(), 2);
}

#[test]
fn create_rejects_invalid_input_before_store_access() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteCourseRepository::new(&mut conn);
    let mut service = CourseService::new(repo);

    let err = service.create_course("", None).unwrap_err();
    assert!(matches!(
        err,
        CourseServiceError::InvalidInput(ValidationError::Course(
            CourseValidationError::NameRequired
        ))
    ));

    let long = "x".repeat(1001);
    let err = service.create_course("Math101", Some(long)).unwrap_err();
    assert!(matches!(
        err,
        CourseServiceError::InvalidInput(ValidationError::Course(
            CourseValidationError::DescriptionTooLong(1001)
        ))
    ));

    assert!(service.list_courses().unwrap().is_empty());
}

#[test]
fn update_rewrites_name_and_description() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteCourseRepository::new(&mut conn);
    let mut service = CourseService::new(repo);

    let math = service
        .create_course("Math101", Some("intro".to_string()))
        .unwrap();
    let updated = service
        .update_course(math.id, "Math102", Some("algebra".to_string()))
        .unwrap();
    assert_eq!(updated.id, math.id);

    let loaded = service.get_course(math.id).unwrap().unwrap();
    assert_eq!(loaded.name, "Math102");
    assert_eq!(loaded.description.as_deref(), Some("algebra"));
}

#[test]
fn update_missing_course_returns_not_found() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteCourseRepository::new(&mut conn);
    let mut service = CourseService::new(repo);

    let err = service.update_course(42, "Ghost", None).unwrap_err();
    assert!(matches!(err, CourseServiceError::NotFound(42)));
}

#[test]
fn get_missing_course_returns_none() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteCourseRepository::new(&mut conn);
    let service = CourseService::new(repo);

    assert_eq!(service.get_course(42).unwrap(), None);
}

#[test]
fn delete_removes_record() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteCourseRepository::new(&mut conn);
    let mut service = CourseService::new(repo);

    let math = service.create_course("Math101", None).unwrap();
    service.delete_course(math.id).unwrap();

    assert_eq!(service.get_course(math.id).unwrap(), None);
    assert!(!service.course_exists(math.id).unwrap());
}

#[test]
fn delete_missing_course_returns_not_found() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteCourseRepository::new(&mut conn);
    let mut service = CourseService::new(repo);

    let err = service.delete_course(42).unwrap_err();
    assert!(matches!(err, CourseServiceError::NotFound(42)));
}

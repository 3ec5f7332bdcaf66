use rollcall_core::db::open_db_in_memory;
use rollcall_core::{
    SqliteStudentRepository, StudentService, StudentServiceError, StudentValidationError,
    ValidationError,
};

#[test]
fn create_assigns_store_ids_and_reads_back() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteStudentRepository::new(&mut conn);
    let mut service = StudentService::new(repo);

    let alice = service.create_student("Alice", "a@x.com").unwrap();
    let bob = service.create_student("Bob", "b@x.com").unwrap();
    assert_eq!(alice.id, 1);
    assert_eq!(bob.id, 2);

    let loaded = service.get_student(alice.id).unwrap().unwrap();
    assert_eq!(loaded, alice);
    assert_eq!(loaded.name, "Alice");
    assert_eq!(loaded.email, "a@x.com");
}

#[test]
fn create_duplicate_email_fails() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteStudentRepository::new(&mut conn);
    let mut service = StudentService::new(repo);

    service.create_student("Bob", "b@x.com").unwrap();
    let err = service.create_student("Carl", "b@x.com").unwrap_err();
    assert!(matches!(err, StudentServiceError::DuplicateEmail(email) if email == "b@x.com"));

    // The loser's failed insert must not leave a record behind.
    assert_eq!(service.list_students().unwrap().len(), 1);
}

#[test]
fn duplicate_email_check_is_case_insensitive() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteStudentRepository::new(&mut conn);
    let mut service = StudentService::new(repo);

    service.create_student("Bob", "Bob@X.com").unwrap();
    let err = service.create_student("Carl", "bob@x.com").unwrap_err();
    assert!(matches!(err, StudentServiceError::DuplicateEmail(_)));
}

#[test]
fn create_rejects_invalid_input_before_store_access() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteStudentRepository::new(&mut conn);
    let mut service = StudentService::new(repo);

    let err = service.create_student("A", "a@x.com").unwrap_err();
    assert!(matches!(
        err,
        StudentServiceError::InvalidInput(ValidationError::Student(
            StudentValidationError::NameLength(1)
        ))
    ));

    let err = service.create_student("Alice", "not-an-email").unwrap_err();
    assert!(matches!(
        err,
        StudentServiceError::InvalidInput(ValidationError::Student(
            StudentValidationError::EmailSyntax(_)
        ))
    ));

    assert!(service.list_students().unwrap().is_empty());
}

#[test]
fn update_rewrites_name_and_email() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteStudentRepository::new(&mut conn);
    let mut service = StudentService::new(repo);

    let alice = service.create_student("Alice", "a@x.com").unwrap();
    let updated = service
        .update_student(alice.id, "Alice Cooper", "alice@x.com")
        .unwrap();
    assert_eq!(updated.id, alice.id);
    assert_eq!(updated.name, "Alice Cooper");
    assert_eq!(updated.email, "alice@x.com");

    let loaded = service.get_student(alice.id).unwrap().unwrap();
    assert_eq!(loaded, updated);
}

#[test]
fn update_with_unchanged_email_succeeds() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteStudentRepository::new(&mut conn);
    let mut service = StudentService::new(repo);

    let alice = service.create_student("Alice", "a@x.com").unwrap();
    let updated = service
        .update_student(alice.id, "Alice Cooper", "a@x.com")
        .unwrap();
    assert_eq!(updated.email, "a@x.com");
}

#[test]
fn update_to_email_held_by_other_student_fails() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteStudentRepository::new(&mut conn);
    let mut service = StudentService::new(repo);

    service.create_student("Alice", "a@x.com").unwrap();
    let bob = service.create_student("Bob", "b@x.com").unwrap();

    let err = service.update_student(bob.id, "Bob", "a@x.com").unwrap_err();
    assert!(matches!(err, StudentServiceError::DuplicateEmail(email) if email == "a@x.com"));

    // Failed update must leave the record untouched.
    let loaded = service.get_student(bob.id).unwrap().unwrap();
    assert_eq!(loaded.email, "b@x.com");
}

#[test]
fn update_missing_student_returns_not_found() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteStudentRepository::new(&mut conn);
    let mut service = StudentService::new(repo);

    let err = service.update_student(42, "Ghost", "g@x.com").unwrap_err();
    assert!(matches!(err, StudentServiceError::NotFound(42)));
}

#[test]
fn get_missing_student_returns_none() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteStudentRepository::new(&mut conn);
    let service = StudentService::new(repo);

    assert_eq!(service.get_student(42).unwrap(), None);
}

#[test]
fn delete_removes_record() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteStudentRepository::new(&mut conn);
    let mut service = StudentService::new(repo);

    let alice = service.create_student("Alice", "a@x.com").unwrap();
    service.delete_student(alice.id).unwrap();

    assert_eq!(service.get_student(alice.id).unwrap(), None);
    assert!(!service.student_exists(alice.id).unwrap());
}

#[test]
fn delete_missing_student_returns_not_found() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteStudentRepository::new(&mut conn);
    let mut service = StudentService::new(repo);

    let err = service.delete_student(42).unwrap_err();
    assert!(matches!(err, StudentServiceError::NotFound(42)));
}

#[test]
fn repository_looks_up_students_by_email_case_insensitively() {
    use rollcall_core::{StudentDraft, StudentRepository};

    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteStudentRepository::new(&mut conn);

    let alice = repo
        .insert_student(&StudentDraft::new("Alice", "a@x.com"))
        .unwrap();

    assert!(repo.exists_by_email("A@X.com").unwrap());
    assert!(!repo.exists_by_email("missing@x.com").unwrap());
    let found = repo.find_by_email("A@X.com").unwrap().unwrap();
    assert_eq!(found, alice);
    assert_eq!(repo.find_by_email("missing@x.com").unwrap(), None);
}

#[test]
fn list_returns_full_snapshot() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteStudentRepository::new(&mut conn);
    let mut service = StudentService::new(repo);

    let alice = service.create_student("Alice", "a@x.com").unwrap();
    let bob = service.create_student("Bob", "b@x.com").unwrap();

    let listed = service.list_students().unwrap();
    assert_eq!(listed, vec![alice, bob]);
}

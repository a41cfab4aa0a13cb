use person_core::{
    Gender, InMemoryPersonRepository, Person, PersonRepository, PersonService, PersonServiceError,
    RepoError, RepoResult, GENDER_REQUIRED, NAME_REQUIRED,
};
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Insert(Person),
    Update(Person),
    Delete(String),
    Get(String),
}

/// Echoes inputs back and records every call it receives.
#[derive(Default)]
struct RecordingRepository {
    calls: Mutex<Vec<Call>>,
    missing: bool,
}

impl RecordingRepository {
    fn missing() -> Self {
        Self {
            missing: true,
            ..Self::default()
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl PersonRepository for RecordingRepository {
    fn insert(&self, person: &Person) -> RepoResult<Person> {
        self.record(Call::Insert(person.clone()));
        Ok(person.clone())
    }

    fn update(&self, person: &Person) -> RepoResult<()> {
        self.record(Call::Update(person.clone()));
        Ok(())
    }

    fn delete(&self, name: &str) -> RepoResult<()> {
        self.record(Call::Delete(name.to_string()));
        Ok(())
    }

    fn get(&self, name: &str) -> RepoResult<Person> {
        self.record(Call::Get(name.to_string()));
        if self.missing {
            return Err(RepoError::NotFound(name.to_string()));
        }
        Ok(Person::with_fields(name, 30, Gender::F))
    }
}

fn recording_service() -> PersonService<RecordingRepository> {
    PersonService::new(RecordingRepository::default())
}

fn assert_validation_failure(err: PersonServiceError, expected: &[&str]) {
    let expected_message = expected.join(";");
    assert_eq!(err.to_string(), expected_message);
    match err {
        PersonServiceError::Validation(validation) => {
            assert_eq!(validation.errors(), expected);
            assert_eq!(validation.to_string(), expected_message);
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
}

#[test]
fn insert_valid_person_reaches_repository_once() {
    let service = recording_service();
    let person = Person::with_fields("Name", 21, Gender::M);

    let stored = service.insert(Some(&person)).unwrap();

    assert_eq!(stored, person);
    assert_eq!(service.repository().calls(), vec![Call::Insert(person)]);
}

#[test]
fn insert_absent_person_reports_both_errors_in_order() {
    let service = recording_service();

    let err = service.insert(None).unwrap_err();

    assert_validation_failure(err, &[NAME_REQUIRED, GENDER_REQUIRED]);
    assert!(service.repository().calls().is_empty());
}

#[test]
fn insert_without_name_reports_name_only() {
    let service = recording_service();
    let mut person = Person::new();
    person.gender = Some(Gender::M);

    let err = service.insert(Some(&person)).unwrap_err();

    assert_validation_failure(err, &["Name is required"]);
    assert!(service.repository().calls().is_empty());
}

#[test]
fn insert_rejects_invalid_field_combinations() {
    let cases: [(Option<&str>, Option<Gender>, &[&str]); 5] = [
        (None, Some(Gender::M), &[NAME_REQUIRED]),
        (Some(" "), Some(Gender::M), &[NAME_REQUIRED]),
        (Some(""), Some(Gender::F), &[NAME_REQUIRED]),
        (Some("Name"), None, &[GENDER_REQUIRED]),
        (Some("  "), None, &[NAME_REQUIRED, GENDER_REQUIRED]),
    ];

    for (name, gender, expected) in cases {
        let service = recording_service();
        let person = Person {
            name: name.map(str::to_string),
            age: Some(21),
            gender,
        };

        let err = service.insert(Some(&person)).unwrap_err();

        assert_validation_failure(err, expected);
        assert!(service.repository().calls().is_empty());
    }
}

#[test]
fn insert_accepts_any_age() {
    let service = recording_service();
    for age in [Some(0), Some(-5), Some(i32::MAX), None] {
        let mut person = Person::with_fields("Name", 0, Gender::F);
        person.age = age;
        service.insert(Some(&person)).unwrap();
    }
    assert_eq!(service.repository().calls().len(), 4);
}

#[test]
fn repeated_insert_validates_the_same_way() {
    let service = recording_service();
    let person = Person::with_fields("Name", 21, Gender::M);

    service.insert(Some(&person)).unwrap();
    service.insert(Some(&person)).unwrap();

    assert_eq!(
        service.repository().calls(),
        vec![Call::Insert(person.clone()), Call::Insert(person)]
    );
}

#[test]
fn corrected_input_succeeds_after_failure() {
    let service = recording_service();
    let mut person = Person::with_fields(" ", 21, Gender::M);
    person.gender = None;

    let err = service.insert(Some(&person)).unwrap_err();
    assert_validation_failure(err, &[NAME_REQUIRED, GENDER_REQUIRED]);

    person.name = Some("Name".to_string());
    person.gender = Some(Gender::M);
    service.insert(Some(&person)).unwrap();

    assert_eq!(service.repository().calls(), vec![Call::Insert(person)]);
}

#[test]
fn update_checks_name_only_and_delegates() {
    let service = recording_service();
    let mut person = Person::new();
    person.name = Some("Ali".to_string());

    service.update(&person).unwrap();

    assert_eq!(service.repository().calls(), vec![Call::Update(person)]);
}

#[test]
fn update_without_name_is_rejected() {
    let service = recording_service();
    let mut person = Person::with_fields("Amir", 21, Gender::M);
    service.insert(Some(&person)).unwrap();

    person.name = None;
    let err = service.update(&person).unwrap_err();

    assert_validation_failure(err, &[NAME_REQUIRED]);
    let calls = service.repository().calls();
    assert_eq!(calls.len(), 1);
    assert!(matches!(calls[0], Call::Insert(_)));
}

#[test]
fn delete_rejects_blank_and_absent_names() {
    let service = recording_service();

    for name in [Some(""), Some("   "), None] {
        let err = service.delete(name).unwrap_err();
        assert_validation_failure(err, &[NAME_REQUIRED]);
    }

    assert!(service.repository().calls().is_empty());
}

#[test]
fn delete_delegates_valid_name() {
    let service = recording_service();

    service.delete(Some("Amir")).unwrap();

    assert_eq!(
        service.repository().calls(),
        vec![Call::Delete("Amir".to_string())]
    );
}

#[test]
fn get_rejects_blank_and_absent_names() {
    let service = recording_service();

    for name in [Some(""), Some(" "), None] {
        let err = service.get(name).unwrap_err();
        assert_validation_failure(err, &[NAME_REQUIRED]);
    }

    assert!(service.repository().calls().is_empty());
}

#[test]
fn get_returns_repository_result() {
    let service = recording_service();

    let person = service.get(Some("Ada")).unwrap();

    assert_eq!(person, Person::with_fields("Ada", 30, Gender::F));
    assert_eq!(
        service.repository().calls(),
        vec![Call::Get("Ada".to_string())]
    );
}

#[test]
fn repository_errors_pass_through_unchanged() {
    let service = PersonService::new(RecordingRepository::missing());

    let err = service.get(Some("Ghost")).unwrap_err();

    assert!(err.validation_errors().is_none());
    assert_eq!(err.to_string(), "person not found: Ghost");
    assert!(matches!(
        err,
        PersonServiceError::Repo(RepoError::NotFound(name)) if name == "Ghost"
    ));
}

#[test]
fn service_over_in_memory_repository_runs_full_lifecycle() {
    let service = PersonService::new(InMemoryPersonRepository::new());
    let mut person = Person::with_fields("Amir", 21, Gender::M);

    service.insert(Some(&person)).unwrap();
    person.age = Some(22);
    service.update(&person).unwrap();
    assert_eq!(service.get(Some("Amir")).unwrap().age, Some(22));

    let duplicate = service.insert(Some(&person)).unwrap_err();
    assert!(matches!(
        duplicate,
        PersonServiceError::Repo(RepoError::Conflict(_))
    ));

    service.delete(Some("Amir")).unwrap();
    let missing = service.get(Some("Amir")).unwrap_err();
    assert!(matches!(
        missing,
        PersonServiceError::Repo(RepoError::NotFound(_))
    ));
    assert!(service.repository().is_empty());
}

#[test]
fn service_can_be_shared_across_threads() {
    let service = Arc::new(PersonService::new(InMemoryPersonRepository::new()));

    let handles: Vec<_> = (0..8)
        .map(|index| {
            let service = Arc::clone(&service);
            thread::spawn(move || {
                let person = Person::with_fields(format!("person-{index}"), index, Gender::F);
                service.insert(Some(&person)).unwrap();
                assert!(service.insert(None).is_err());
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(service.repository().len(), 8);
}

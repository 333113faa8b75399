//! Integration tests for collections and optional values.

use std::cell::Cell;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use constrain::{Configuration, ConstraintRegistry, Path, Validatable, Validator};

#[test]
fn test_elements_are_indexed_under_the_collection() {
    let validate = Validator::<Vec<i32>>::new(|v| {
        v.each(|element| {
            element.constrain(|n| *n >= 0)?.explain(|| "negative");
            Ok(())
        })
    })
    .with_configuration(Configuration::builder().root_path(["numbers"]).build());

    let violations = validate
        .validate(vec![1, -2, 3, -4])
        .into_result()
        .unwrap_err()
        .into_violations();
    let paths: Vec<_> = violations.iter().map(|v| v.path().clone()).collect();
    assert_eq!(paths, vec![Path::from(["numbers", "1"]), Path::from(["numbers", "3"])]);
}

#[test]
fn test_iteration_is_lazy() {
    let registry = ConstraintRegistry::new(Configuration::default());
    let values = vec![10, 20, 30];
    let validatable = Validatable::root(&values, &registry);
    let visited = Cell::new(0);

    let mut elements = validatable.iter().inspect(|_| visited.set(visited.get() + 1));
    assert_eq!(visited.get(), 0);

    let first = elements.next().unwrap();
    assert_eq!(visited.get(), 1);
    assert_eq!(*first.value(), 10);
    assert_eq!(first.path(), Path::from(["0"]));
}

#[test]
fn test_iter_some_on_none_is_empty() {
    let registry = ConstraintRegistry::new(Configuration::default());
    let values: Option<Vec<i32>> = None;
    let validatable = Validatable::named(&values, "items", &registry);

    assert_eq!(validatable.iter_some().count(), 0);
}

#[test]
fn test_iter_some_on_present_collection() {
    let registry = ConstraintRegistry::new(Configuration::default());
    let values = Some(vec!["a", "b"]);
    let validatable = Validatable::named(&values, "items", &registry);

    let paths: Vec<_> = validatable.iter_some().map(|element| element.path()).collect();
    assert_eq!(paths, vec![Path::from(["items", "0"]), Path::from(["items", "1"])]);
}

#[test]
fn test_optional_block_not_run_for_none() {
    #[derive(Debug)]
    struct Settings {
        timeout: Option<u32>,
    }

    let executed = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&executed);
    let validate = Validator::<Settings>::new(move |v| {
        if let Some(timeout) = v.field("timeout", |s| &s.timeout).some() {
            flag.store(true, Ordering::SeqCst);
            timeout.constrain(|t| *t > 0)?.explain(|| "timeout must be positive");
        }
        Ok(())
    });

    assert!(validate.validate(Settings { timeout: None }).is_success());
    assert!(!executed.load(Ordering::SeqCst));

    let result = validate.validate(Settings { timeout: Some(0) });
    assert_eq!(
        result.violations().unwrap().first().unwrap().path(),
        &Path::from(["timeout"])
    );
    assert!(executed.load(Ordering::SeqCst));
}

#[test]
fn test_each_stops_at_first_violation_when_fail_fast() {
    let validate = Validator::<Vec<i32>>::new(|v| {
        v.each(|element| {
            element.constrain(|n| *n > 0)?;
            Ok(())
        })
    })
    .with_configuration(Configuration::builder().fail_on_first_violation(true).build());

    let violations = validate
        .validate(vec![0, 0, 0])
        .into_result()
        .unwrap_err()
        .into_violations();
    assert_eq!(violations.len(), 1);
    assert_eq!(violations.first().unwrap().path(), &Path::from(["0"]));
}

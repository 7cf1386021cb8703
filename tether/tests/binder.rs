//! Tests for binder lifecycle, propagation and validation.

use tether::binder::{Binder, BinderConfig};
use tether::error::BinderError;
use tether::field::{Checkbox, Field, NumberField, TextField};
use tether::state::State;
use tether::validation::{ValidationResult, always_pass, rules};

#[derive(Debug, Clone, Default, PartialEq)]
struct Person {
    first_name: String,
    age: i64,
    subscribed: bool,
}

fn person(first_name: &str) -> State<Person> {
    State::new(Person {
        first_name: first_name.to_string(),
        ..Default::default()
    })
}

fn first_name(p: &State<Person>) -> String {
    p.read(|p| p.first_name.clone())
}

fn bind_name(binder: &Binder<Person>, field: &TextField) {
    binder.bind_field(
        field,
        |p: &Person| p.first_name.clone(),
        |p: &mut Person, v| p.first_name = v,
    );
}

#[test]
fn test_field_value_updated_on_bean_bind() {
    let binder = Binder::new();
    let name = TextField::new();
    let p = person("Johannes");

    binder
        .for_field(&name)
        .bind(|p: &Person| p.first_name.clone(), |p: &mut Person, v| {
            p.first_name = v
        });
    binder.bind(&p);

    assert_eq!(name.value(), "Johannes");
}

#[test]
fn test_field_value_updated_if_bean_already_bound() {
    let binder = Binder::new();
    let name = TextField::new();
    let p = person("Johannes");

    binder.bind(&p);
    bind_name(&binder, &name);

    assert_eq!(name.value(), "Johannes");
    name.set_value("Artur");
    assert_eq!(first_name(&p), "Artur");
}

#[test]
fn test_bean_returns_bound_bean_or_nothing() {
    let binder = Binder::<Person>::new();
    let p = person("Johannes");

    assert!(binder.bean().is_none());
    binder.bind(&p);
    assert!(binder.bean().is_some_and(|b| b.ptr_eq(&p)));
    binder.unbind();
    assert!(binder.bean().is_none());
}

#[test]
fn test_field_value_saved_to_property_on_change() {
    let binder = Binder::new();
    let name = TextField::new();
    let p = person("Johannes");
    bind_name(&binder, &name);
    binder.bind(&p);

    name.set_value("Henri");

    assert_eq!(first_name(&p), "Henri");
}

#[test]
fn test_field_value_not_saved_after_unbind() {
    let binder = Binder::new();
    let name = TextField::new();
    let p = person("Johannes");
    bind_name(&binder, &name);
    binder.bind(&p);

    name.set_value("Henri");
    binder.unbind();
    name.set_value("Aleksi");

    assert_eq!(first_name(&p), "Henri");
    assert_eq!(name.value(), "Aleksi");
}

#[test]
fn test_read_only_binding_ignores_value_change() {
    let binder = Binder::new();
    let name = TextField::new();
    let p = person("Johannes");

    let binding = binder.bind_field_read_only(&name, |p: &Person| p.first_name.clone());
    binder.bind(&p);
    name.set_value("Artur");

    assert!(binding.is_read_only());
    assert_eq!(name.value(), "Artur");
    assert_eq!(first_name(&p), "Johannes");
}

#[test]
fn test_bind_to_another_bean_stops_updating_original_bean() {
    let binder = Binder::new();
    let name = TextField::new();
    let p = person("Johannes");
    bind_name(&binder, &name);
    binder.bind(&p);
    name.set_value("Leif");

    let p2 = person("Marlon");
    binder.bind(&p2);
    assert_eq!(name.value(), "Marlon");
    assert_eq!(first_name(&p), "Leif");
    assert!(binder.bean().is_some_and(|b| b.ptr_eq(&p2)));

    name.set_value("Ilia");
    assert_eq!(first_name(&p2), "Ilia");
    assert_eq!(first_name(&p), "Leif");
}

#[test]
fn test_bind_does_not_write_back_loaded_value() {
    let binder = Binder::new();
    let name = TextField::new();
    let p = person("  padded  ");
    binder
        .for_field(&name)
        .with_validator(rules::trimmed())
        .bind(|p: &Person| p.first_name.clone(), |p: &mut Person, v| {
            p.first_name = v
        });

    p.clear_dirty();
    binder.bind(&p);

    assert_eq!(name.value(), "  padded  ");
    assert_eq!(first_name(&p), "  padded  ");
    assert!(!p.is_dirty());
}

#[test]
fn test_transformed_value_is_written() {
    let binder = Binder::new();
    let name = TextField::new();
    let p = person("Johannes");
    binder
        .for_field(&name)
        .with_validator(rules::trimmed())
        .bind(|p: &Person| p.first_name.clone(), |p: &mut Person, v| {
            p.first_name = v
        });
    binder.bind(&p);

    name.set_value("  Henri ");

    assert_eq!(first_name(&p), "Henri");
}

#[test]
fn test_save_unbound_no_changes() {
    let binder = Binder::<Person>::new();
    let p = State::new(Person {
        age: 10,
        ..Default::default()
    });

    binder.save(&p);

    assert_eq!(p.read(|p| p.age), 10);
    assert!(!p.is_dirty());
}

#[test]
fn test_save_bound_bean_is_updated() {
    let binder = Binder::new();
    let name = TextField::new();
    bind_name(&binder, &name);

    name.set_value("bar");
    let p = person("foo");
    binder.save(&p);

    assert_eq!(first_name(&p), "bar");
    assert!(binder.bean().is_none());
}

#[test]
fn test_save_does_not_touch_bound_bean() {
    let binder = Binder::new();
    let name = TextField::new();
    let p = person("Johannes");
    bind_name(&binder, &name);
    binder.bind(&p);
    name.set_value("Henri");

    let copy = person("");
    binder.save(&copy);

    assert_eq!(first_name(&copy), "Henri");
    assert!(binder.bean().is_some_and(|b| b.ptr_eq(&p)));
}

#[test]
fn test_save_skips_read_only_bindings() {
    let binder = Binder::new();
    let name = TextField::new();
    binder.bind_field_read_only(&name, |p: &Person| p.first_name.clone());

    name.set_value("bar");
    let p = person("foo");
    binder.save(&p);

    assert_eq!(first_name(&p), "foo");
}

#[test]
fn test_load_bound_field_value_is_updated() {
    let binder = Binder::new();
    let name = TextField::new();
    bind_name(&binder, &name);

    binder.load(&person("bar"));

    assert_eq!(name.value(), "bar");
    assert!(binder.bean().is_none());
}

#[test]
fn test_load_unbound_no_changes() {
    let binder = Binder::<Person>::new();
    let name = TextField::new();

    binder.load(&person("bar"));

    assert_eq!(name.value(), "");
}

#[test]
fn test_load_keeps_bound_bean_for_writes() {
    let binder = Binder::new();
    let name = TextField::new();
    let p = person("Johannes");
    let other = person("Other");
    bind_name(&binder, &name);
    binder.bind(&p);

    binder.load(&other);
    assert_eq!(name.value(), "Other");

    name.set_value("Edited");
    assert_eq!(first_name(&p), "Edited");
    assert_eq!(first_name(&other), "Other");
}

#[test]
fn test_reload_requires_bound_bean() {
    let binder = Binder::<Person>::with_config(BinderConfig::new("person-form"));
    let err = binder.reload().unwrap_err();
    assert!(matches!(err, BinderError::NotBound("person-form")));
}

#[test]
fn test_reload_picks_up_external_changes() {
    let binder = Binder::new();
    let name = TextField::new();
    let p = person("Johannes");
    bind_name(&binder, &name);
    binder.bind(&p);

    p.update(|p| p.first_name = "Changed elsewhere".into());
    assert_eq!(name.value(), "Johannes");

    binder.reload().unwrap();
    assert_eq!(name.value(), "Changed elsewhere");
}

#[test]
fn test_validate_not_bound_no_errors() {
    let binder = Binder::<Person>::new();
    assert!(binder.validate().is_empty());
    assert!(binder.is_valid());
    assert!(binder.is_empty());
}

#[test]
fn test_bound_validators_are_ok_no_errors() {
    let binder = Binder::new();
    let name = TextField::new();
    binder
        .for_field(&name)
        .with_validator(always_pass())
        .bind(|p: &Person| p.first_name.clone(), |p: &mut Person, v| {
            p.first_name = v
        });

    name.set_error("");
    let errors = binder.validate();

    assert!(errors.is_empty());
    assert!(name.error().is_none());
}

#[test]
fn test_bound_validators_fail_first_message_wins() {
    let binder = Binder::new();
    let name = TextField::new();
    let binding = binder.for_field(&name);
    let binding = binding.with_validator(always_pass());
    let binding = binding.with_validator(|_: String| -> ValidationResult<String> {
        ValidationResult::error("foo")
    });
    let binding = binding.with_predicate(|_| false, "bar");
    binding.bind(|p: &Person| p.first_name.clone(), |p: &mut Person, v| {
        p.first_name = v
    });

    let errors = binder.validate();

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message(), "foo");
    assert_eq!(errors[0].field_id(), name.field_id());
    assert_eq!(name.error().as_deref(), Some("foo"));
}

#[test]
fn test_second_validator_rejecting_everything_is_reported() {
    let binder = Binder::new();
    let name = TextField::new();
    binder
        .for_field(&name)
        .with_predicate(|v: &String| v.len() < 100, "foo")
        .with_predicate(|_| false, "bar")
        .bind(|p: &Person| p.first_name.clone(), |p: &mut Person, v| {
            p.first_name = v
        });
    binder.bind(&person("Johannes"));

    binder.validate();
    let errors = binder.validate();

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message(), "bar");
}

#[test]
fn test_validate_reports_in_registration_order_and_keeps_going() {
    let binder = Binder::new();
    let name = TextField::new();
    let age = NumberField::new();
    let subscribed = Checkbox::new();

    binder
        .for_field(&name)
        .with_validator(rules::required("name required"))
        .bind(|p: &Person| p.first_name.clone(), |p: &mut Person, v| {
            p.first_name = v
        });
    binder
        .for_field(&age)
        .with_validator(rules::in_range(0, 150, "age out of range"))
        .bind(|p: &Person| Some(p.age), |p: &mut Person, v| {
            p.age = v.unwrap_or_default()
        });
    binder
        .for_field(&subscribed)
        .with_validator(rules::checked("must subscribe"))
        .bind(|p: &Person| p.subscribed, |p: &mut Person, v| p.subscribed = v);

    age.set_value(Some(200));
    let errors = binder.validate();

    let messages: Vec<&str> = errors.iter().map(|e| e.message()).collect();
    assert_eq!(messages, ["name required", "age out of range", "must subscribe"]);
    assert_eq!(binder.len(), 3);

    name.set_value("Ada");
    age.set_value(Some(36));
    subscribed.set_value(true);
    assert!(binder.validate().is_empty());
    assert!(!name.has_error());
    assert!(!age.has_error());
    assert!(!subscribed.has_error());
}

#[test]
fn test_validate_reads_live_field_value() {
    let binder = Binder::new();
    let name = TextField::new();
    binder
        .for_field(&name)
        .with_validator(rules::min_length(3, "too short"))
        .bind(|p: &Person| p.first_name.clone(), |p: &mut Person, v| {
            p.first_name = v
        });

    name.set_value("Al");
    assert_eq!(binder.validate().len(), 1);
    name.set_value("Alan");
    assert!(binder.validate().is_empty());
}

#[test]
fn test_invalid_edit_is_not_written_and_shows_error() {
    let binder = Binder::new();
    let name = TextField::new();
    let p = person("Johannes");
    binder
        .for_field(&name)
        .with_validator(rules::required("required"))
        .with_validator(rules::max_length(5, "max 5"))
        .bind(|p: &Person| p.first_name.clone(), |p: &mut Person, v| {
            p.first_name = v
        });
    binder.bind(&p);

    name.set_value("Bartholomew");
    assert_eq!(first_name(&p), "Johannes");
    assert_eq!(name.error().as_deref(), Some("max 5"));

    name.set_value("Bart");
    assert_eq!(first_name(&p), "Bart");
    assert!(name.error().is_none());
}

#[test]
fn test_binding_validate_updates_error_display() {
    let binder = Binder::<Person>::new();
    let name = TextField::new();
    let binding = binder
        .for_field(&name)
        .with_validator(rules::required("required"))
        .bind_read_only(|p: &Person| p.first_name.clone());

    assert_eq!(binding.validate(), ValidationResult::Error("required".into()));
    assert_eq!(name.error().as_deref(), Some("required"));

    name.set_value("x");
    assert_eq!(binding.validate(), ValidationResult::Ok("x".to_string()));
    assert!(name.error().is_none());
    assert_eq!(binding.field().field_id(), name.field_id());
}

#[test]
fn test_save_if_valid_writes_nothing_on_failure() {
    let binder = Binder::new();
    let name = TextField::new();
    let age = NumberField::new();
    binder.bind_field(
        &name,
        |p: &Person| p.first_name.clone(),
        |p: &mut Person, v| p.first_name = v,
    );
    binder
        .for_field(&age)
        .with_validator(rules::present("age required"))
        .bind(|p: &Person| Some(p.age), |p: &mut Person, v| {
            p.age = v.unwrap_or_default()
        });

    name.set_value("Grace");
    let target = person("unchanged");
    let err = binder.save_if_valid(&target).unwrap_err();

    match err {
        BinderError::Validation(errors) => {
            assert_eq!(errors.len(), 1);
            assert_eq!(errors.first().map(|e| e.message()), Some("age required"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(first_name(&target), "unchanged");
    assert!(!target.is_dirty());
}

#[test]
fn test_save_if_valid_writes_validated_values() {
    let binder = Binder::new();
    let name = TextField::new();
    binder
        .for_field(&name)
        .with_validator(rules::trimmed())
        .with_validator(rules::required("required"))
        .bind(|p: &Person| p.first_name.clone(), |p: &mut Person, v| {
            p.first_name = v
        });

    name.set_value("  Grace  ");
    let target = person("");
    binder.save_if_valid(&target).unwrap();

    assert_eq!(first_name(&target), "Grace");
    assert_eq!(name.value(), "  Grace  ");
}

#[test]
fn test_buffered_policy_defers_writes_until_save() {
    let binder = Binder::with_config(BinderConfig::new("buffered").buffered());
    let name = TextField::new();
    let p = person("Johannes");
    binder
        .for_field(&name)
        .with_validator(rules::required("required"))
        .bind(|p: &Person| p.first_name.clone(), |p: &mut Person, v| {
            p.first_name = v
        });
    binder.bind(&p);

    name.set_value("");
    assert_eq!(name.error().as_deref(), Some("required"));
    name.set_value("Henri");
    assert_eq!(first_name(&p), "Johannes");

    binder.save_if_valid(&p).unwrap();
    assert_eq!(first_name(&p), "Henri");
}

#[test]
fn test_binder_clones_share_state() {
    let binder = Binder::new();
    let name = TextField::new();
    bind_name(&binder, &name);

    let clone = binder.clone();
    let p = person("Johannes");
    clone.bind(&p);

    assert_eq!(binder.len(), 1);
    assert!(binder.bean().is_some_and(|b| b.ptr_eq(&p)));
    assert_eq!(name.value(), "Johannes");
}

#[test]
fn test_dropping_binder_detaches_listeners() {
    let name = TextField::new();
    let p = person("Johannes");
    {
        let binder = Binder::new();
        bind_name(&binder, &name);
        binder.bind(&p);
    }

    name.set_value("After drop");
    assert_eq!(first_name(&p), "Johannes");
}

#[test]
fn test_number_field_parse_error_does_not_reach_bean() {
    let binder = Binder::new();
    let age = NumberField::new();
    let p = State::new(Person {
        age: 30,
        ..Default::default()
    });
    binder.bind_field(&age, |p: &Person| Some(p.age), |p: &mut Person, v| {
        p.age = v.unwrap_or_default()
    });
    binder.bind(&p);
    assert_eq!(age.text(), "30");

    age.set_text("thirty-one");
    assert_eq!(p.read(|p| p.age), 30);
    assert!(age.has_error());

    age.set_text("31");
    assert_eq!(p.read(|p| p.age), 31);
    assert!(!age.has_error());
}

#[test]
fn test_unparsable_number_fails_validation_and_blocks_save() {
    let binder = Binder::new();
    let age = NumberField::new();
    let p = State::new(Person {
        age: 30,
        ..Default::default()
    });
    binder.bind_field(&age, |p: &Person| Some(p.age), |p: &mut Person, v| {
        p.age = v.unwrap_or_default()
    });
    binder.bind(&p);

    age.set_text("thirty-one");
    let errors = binder.validate();

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message(), "Please enter a whole number");
    assert_eq!(errors[0].field_id(), age.field_id());
    assert!(age.has_error());
    assert!(!binder.is_valid());

    let target = State::new(Person {
        age: 99,
        ..Default::default()
    });
    assert!(matches!(
        binder.save_if_valid(&target),
        Err(BinderError::Validation(_))
    ));
    assert_eq!(target.read(|p| p.age), 99);
    assert!(!target.is_dirty());

    age.set_text("31");
    assert!(binder.validate().is_empty());
    assert!(!age.has_error());
}

#[test]
fn test_value_normalized_during_load_reaches_bean() {
    let binder = Binder::new();
    let name = TextField::new();
    let handle = name.clone();
    name.add_value_change_listener(std::sync::Arc::new(
        move |e: &tether::field::ValueChangeEvent<String>| {
            let upper = e.value.to_uppercase();
            if upper != e.value {
                handle.set_value(upper);
            }
        },
    ));
    bind_name(&binder, &name);

    let p = person("johannes");
    binder.bind(&p);

    assert_eq!(name.value(), "JOHANNES");
    assert_eq!(first_name(&p), "JOHANNES");

    name.set_value("henri");
    assert_eq!(name.value(), "HENRI");
    assert_eq!(first_name(&p), "HENRI");
}

#[test]
fn test_unchanged_load_still_does_not_write_back() {
    let binder = Binder::new();
    let name = TextField::new();
    bind_name(&binder, &name);

    let p = person("Johannes");
    binder.bind(&p);

    assert_eq!(name.value(), "Johannes");
    assert!(!p.is_dirty());
}

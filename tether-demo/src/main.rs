//! Scripted form session against a bound `Person`.
//!
//! Simulates a user filling in a sign-up form: each step edits a field the
//! way a host would, then prints the bean and any field errors. The log is
//! written to `tether-demo.log`.

use std::error::Error;
use std::fs::File;

use log::info;
use simplelog::{Config, LevelFilter, WriteLogger};
use tether::prelude::*;

#[derive(Debug, Clone, Default)]
struct Person {
    first_name: String,
    email: String,
    age: i64,
    newsletter: bool,
}

struct SignupForm {
    binder: Binder<Person>,
    first_name: TextField,
    email: TextField,
    age: NumberField,
    newsletter: Checkbox,
}

impl SignupForm {
    fn new() -> Result<Self, BinderError> {
        let binder = Binder::with_config(BinderConfig::new("signup"));
        let form = Self {
            binder,
            first_name: TextField::with_placeholder("First name"),
            email: TextField::with_placeholder("Email"),
            age: NumberField::new().with_parse_error("Age must be a whole number"),
            newsletter: Checkbox::with_label("Send me the newsletter"),
        };

        form.binder
            .for_field(&form.first_name)
            .with_validator(rules::trimmed())
            .with_validator(rules::required("First name is required"))
            .with_validator(rules::pattern(r"^\p{L}[\p{L} '-]*$", "Letters only")?)
            .bind(|p: &Person| p.first_name.clone(), |p: &mut Person, v| {
                p.first_name = v
            });
        form.binder
            .for_field(&form.email)
            .with_validator(rules::required("Email is required"))
            .with_validator(rules::email("Please enter a valid email"))
            .bind(|p: &Person| p.email.clone(), |p: &mut Person, v| p.email = v);
        form.binder
            .for_field(&form.age)
            .with_validator(rules::present("Age is required"))
            .with_validator(rules::in_range(13, 130, "You must be at least 13"))
            .bind(|p: &Person| Some(p.age), |p: &mut Person, v| {
                p.age = v.unwrap_or_default()
            });
        form.binder.bind_field(
            &form.newsletter,
            |p: &Person| p.newsletter,
            |p: &mut Person, v| p.newsletter = v,
        );

        Ok(form)
    }

    fn report(&self, step: &str, bean: &State<Person>) {
        println!("== {step}");
        println!("   bean: {:?}", bean.get());
        let fields = [
            ("first_name", self.first_name.error()),
            ("email", self.email.error()),
            ("age", self.age.error()),
            ("newsletter", self.newsletter.error()),
        ];
        for (name, error) in fields {
            if let Some(error) = error {
                println!("   {name}: {error}");
            }
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let log_file = File::create("tether-demo.log")?;
    WriteLogger::init(LevelFilter::Trace, Config::default(), log_file)?;

    let form = SignupForm::new()?;
    let person = State::new(Person {
        first_name: "Johannes".into(),
        email: "johannes@example.com".into(),
        age: 41,
        newsletter: false,
    });

    form.binder.bind(&person);
    form.report("bound", &person);

    form.first_name.set_value("  Henri ");
    form.age.set_text("forty");
    form.report("edited name, mistyped age", &person);

    form.age.set_text("9");
    form.email.set_value("henri@");
    form.report("age too low, broken email", &person);

    let errors = form.binder.validate();
    info!("validate() returned {} errors", errors.len());
    for error in &errors {
        println!("   invalid {}: {}", error.field_id(), error.message());
    }

    let draft = State::new(Person::default());
    if let Err(e) = form.binder.save_if_valid(&draft) {
        println!("   save rejected: {e}");
    }

    form.age.set_text("42");
    form.email.set_value("henri@example.com");
    form.newsletter.toggle();
    form.binder.save_if_valid(&draft)?;
    form.report("fixed and saved to draft", &draft);

    form.binder.unbind();
    form.first_name.set_value("Aleksi");
    form.report("after unbind", &person);

    Ok(())
}

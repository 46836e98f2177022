use arbiter::prelude::*;
use arbiter::{Formatters, Value};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

struct Account {
    username: String,
    email: String,
    age: u32,
    balance: f64,
    roles: Vec<String>,
}

impl Validate for Account {
    fn rules(v: &mut Validator<'_, '_, Self>) {
        v.property("username", |a| &a.username)
            .is_not_blank()
            .has_size(Some(3), Some(32))
            .is_letter_or_digit();
        v.property("email", |a| &a.email).is_email();
        v.property("age", |a| &a.age).is_between(18, 130);
        v.property("balance", |a| &a.balance)
            .is_positive_or_zero()
            .has_decimal_digits(None, Some(2));
        v.property("roles", |a| &a.roles)
            .is_not_empty()
            .contains_any(["admin".to_string(), "user".to_string()]);
    }
}

fn valid_account() -> Account {
    Account {
        username: "john123".to_string(),
        email: "john@example.com".to_string(),
        age: 30,
        balance: 1520.75,
        roles: vec!["user".to_string()],
    }
}

fn invalid_account() -> Account {
    Account {
        username: "j!".to_string(),
        email: "john".to_string(),
        age: 12,
        balance: -3.125,
        roles: Vec::new(),
    }
}

fn bench_email_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("email_validation");

    let valid_emails = vec![
        "user@example.com".to_string(),
        "test.user+tag@domain.co.uk".to_string(),
        "admin@subdomain.example.com".to_string(),
    ];

    let invalid_emails = vec![
        "invalid-email".to_string(),
        "@example.com".to_string(),
        "user@".to_string(),
    ];

    group.bench_function("valid_emails", |b| {
        b.iter(|| {
            for email in &valid_emails {
                validate(black_box(email), |v| {
                    v.property("email", |e| e).is_email();
                })
                .unwrap();
            }
        })
    });

    group.bench_function("invalid_emails", |b| {
        b.iter(|| {
            for email in &invalid_emails {
                let _ = validate(black_box(email), |v| {
                    v.property("email", |e| e).is_email();
                });
            }
        })
    });

    group.finish();
}

fn bench_object_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("object_validation");

    let valid = valid_account();
    let invalid = invalid_account();

    group.bench_function("valid_object", |b| {
        b.iter(|| black_box(&valid).validate())
    });

    group.bench_function("invalid_object", |b| {
        b.iter(|| black_box(&invalid).validate())
    });

    group.finish();
}

fn bench_message_mapping(c: &mut Criterion) {
    let mut group = c.benchmark_group("message_mapping");

    let failure = match invalid_account().validate() {
        Err(failure) => failure,
        Ok(()) => unreachable!("account is invalid"),
    };
    let context = I18nContext::builtin();

    for locale in [Locale::root(), Locale::en(), Locale::pt_br()] {
        group.bench_function(format!("messages_{}", locale), |b| {
            b.iter(|| failure.messages(context, DEFAULT_BASE_NAME, black_box(&locale)))
        });
    }

    group.finish();
}

fn bench_formatters(c: &mut Criterion) {
    let mut group = c.benchmark_group("formatters");

    let context = I18nContext::builtin();
    let bundle = context.bundle(DEFAULT_BASE_NAME, &Locale::pt_br());
    let formatters = Formatters::builtin();

    let number = 1_234_567.891.to_value();
    let collection = Value::Collection((0..16).map(|i| i.to_value()).collect());

    group.bench_function("number", |b| {
        b.iter(|| formatters.format(black_box(&number), &bundle))
    });

    group.bench_function("collection", |b| {
        b.iter(|| formatters.format(black_box(&collection), &bundle))
    });

    group.finish();
}

fn bench_http_response(c: &mut Criterion) {
    let mut group = c.benchmark_group("http_response");

    let failure = match invalid_account().validate() {
        Err(failure) => failure,
        Ok(()) => unreachable!("account is invalid"),
    };
    let handler = ValidationExceptionHandler::new(ValidationConfig::default());

    group.bench_function("handle_422", |b| {
        b.iter(|| handler.handle(&failure, black_box(Some("pt-BR,pt;q=0.9,en;q=0.8"))))
    });

    group.finish();
}

criterion_group!(
    validation_benches,
    bench_email_validation,
    bench_object_validation,
    bench_message_mapping,
    bench_formatters,
    bench_http_response,
);

criterion_main!(validation_benches);

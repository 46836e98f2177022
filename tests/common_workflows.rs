//! Integration tests for common Arbiter workflows.
//!
//! These tests verify that the most common use cases work correctly.

use arbiter::prelude::*;
use arbiter::{Catalog, Formatters, ValueKind, constraints, enum_value, from_fn};
use chrono::NaiveDate;
use regex::Regex;

// =============================================================================
// Fixtures
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
enum Plan {
    Free,
    Pro,
    Enterprise,
}

enum_value!(Plan { Free, Pro, Enterprise });

struct Dependent {
    name: String,
    age: u8,
}

struct Customer {
    name: String,
    email: Option<String>,
    plan: Plan,
    seats: i64,
    discount: f64,
    since: NaiveDate,
    active: bool,
    phone: String,
    dependents: Vec<Dependent>,
}

impl Validate for Dependent {
    fn rules(v: &mut Validator<'_, '_, Self>) {
        v.property("name", |d| &d.name).is_not_blank();
        v.property("age", |d| &d.age).is_less_than(18);
    }
}

impl Validate for Customer {
    fn rules(v: &mut Validator<'_, '_, Self>) {
        v.property("name", |c| &c.name).is_not_blank().has_size(Some(2), Some(40));
        v.optional("email", |c| c.email.as_ref()).is_email();
        v.property("plan", |c| &c.plan).is_not_equal_to(Plan::Enterprise);
        v.property("seats", |c| &c.seats).is_positive();
        v.property("discount", |c| &c.discount)
            .is_positive_or_zero()
            .has_decimal_digits(None, Some(2));
        v.property("since", |c| &c.since)
            .is_greater_than_or_equal_to(NaiveDate::from_ymd_opt(2000, 1, 1).unwrap());
        v.property("active", |c| &c.active).is_true();
        v.property("phone", |c| &c.phone)
            .matches(&Regex::new(r"\d{3}-\d{4}").unwrap());
        v.valid_each("dependents", |c| &c.dependents);
    }
}

fn customer() -> Customer {
    Customer {
        name: "Beatriz".to_string(),
        email: None,
        plan: Plan::Pro,
        seats: 5,
        discount: 0.15,
        since: NaiveDate::from_ymd_opt(2019, 3, 1).unwrap(),
        active: true,
        phone: "555-0100".to_string(),
        dependents: vec![Dependent {
            name: "Caio".to_string(),
            age: 9,
        }],
    }
}

// =============================================================================
// Validation Workflow Tests
// =============================================================================

#[test]
fn test_valid_object_passes() {
    assert!(customer().validate().is_ok());

    let mut c = customer();
    c.plan = Plan::Free;
    c.email = Some("bia@example.com".to_string());
    assert!(c.validate().is_ok());
}

#[test]
fn test_every_violation_is_collected() {
    let mut c = customer();
    c.seats = 0;
    c.discount = 0.125;
    c.active = false;
    c.phone = "5550100".to_string();
    c.dependents.push(Dependent {
        name: " ".to_string(),
        age: 30,
    });

    let failure = c.validate().unwrap_err();
    let found: Vec<_> = failure
        .constraint_violations()
        .iter()
        .map(|v| (v.property.as_str(), v.constraint.name()))
        .collect();

    assert_eq!(
        found,
        vec![
            ("seats", "Positive"),
            ("discount", "DecimalDigits"),
            ("active", "True"),
            ("phone", "Matches"),
            ("dependents[1].name", "NotBlank"),
            ("dependents[1].age", "Less"),
        ]
    );
    assert_eq!(failure.get_property_violations("dependents[1].age").len(), 1);
}

#[test]
fn test_absent_optional_values_pass() {
    let mut c = customer();
    c.email = None;
    assert!(c.validate().is_ok());

    c.email = Some("nope".to_string());
    let failure = c.validate().unwrap_err();
    assert_eq!(failure.properties(), vec!["email"]);
}

#[test]
fn test_validation_failure_is_an_error() {
    fn register(c: &Customer) -> Result<(), Box<dyn std::error::Error>> {
        c.validate()?;
        Ok(())
    }

    let mut c = customer();
    c.seats = -1;
    let err = register(&c).unwrap_err();
    assert!(err.to_string().starts_with("Validation failed with 1 violation"));
}

// =============================================================================
// Message Workflow Tests
// =============================================================================

#[test]
fn test_messages_per_locale() {
    let mut c = customer();
    c.plan = Plan::Enterprise;
    c.since = NaiveDate::from_ymd_opt(1999, 12, 31).unwrap();
    let failure = c.validate().unwrap_err();

    let en = failure
        .messages(I18nContext::builtin(), DEFAULT_BASE_NAME, &Locale::en())
        .unwrap();
    assert_eq!(en[0].message, "Must not be equal to Enterprise");
    assert_eq!(en[1].message, "Must be greater than or equal to 01/01/2000");

    let pt = failure
        .messages(I18nContext::builtin(), DEFAULT_BASE_NAME, &Locale::pt_br())
        .unwrap();
    assert_eq!(pt[0].message, "Não deve ser igual a Enterprise");
    assert_eq!(pt[1].message, "Deve ser maior ou igual a 01/01/2000");
}

#[test]
fn test_map_to_message_preserves_order() {
    let mut c = customer();
    c.name = String::new();
    c.seats = 0;
    c.active = false;
    let failure = c.validate().unwrap_err();

    let properties: Vec<_> = arbiter::map_to_message(
        &failure,
        I18nContext::builtin(),
        DEFAULT_BASE_NAME,
        &Locale::pt_br(),
    )
    .map(|m| m.unwrap().property)
    .collect();

    assert_eq!(properties, vec!["name", "name", "seats", "active"]);
}

#[test]
fn test_localized_collection_separator() {
    let resources = arbiter::Resources::new()
        .with(
            "app/messages",
            &Locale::en(),
            Catalog::new().with("arbiter.formatters.ArrayFormatter.separator", " / "),
        )
        .with(
            "app/messages",
            &Locale::pt_br(),
            Catalog::new().with("arbiter.formatters.ArrayFormatter.separator", "; "),
        );
    let context = I18nContext::with_resources(&resources);
    let values = arbiter::Value::Collection(vec![1.to_value(), 2.to_value(), 3.to_value()]);

    let en = context.format_value(&values, "app/messages", &Locale::en());
    let pt = context.format_value(&values, "app/messages", &Locale::pt_br());
    assert_eq!(en, "1 / 2 / 3");
    assert_eq!(pt, "1; 2; 3");
}

#[test]
fn test_custom_constraint_with_application_messages() {
    let resources = arbiter::Resources::new().with(
        "billing/messages",
        &Locale::root(),
        Catalog::new().with("billing.SeatLimit", "At most {limit} seats on the {plan} plan"),
    );
    let formatters = Formatters::new().register(
        ValueKind::Enum,
        from_fn(|value, _, _| format!("«{}»", value)),
    );
    let context = I18nContext::with_resources(&resources).with_formatters(formatters);

    let mut c = customer();
    c.plan = Plan::Free;
    c.seats = 3;
    let failure = arbiter::validate(&c, |v| {
        let limit = if v.object().plan == Plan::Free { 1 } else { 50 };
        let plan = v.object().plan;
        v.property("seats", |c| &c.seats).validate(
            Constraint::new("SeatLimit")
                .with_message_key("billing.SeatLimit")
                .with_param("limit", limit)
                .with_param("plan", plan),
            |seats| seats.is_none_or(|s| *s <= limit),
        );
    })
    .unwrap_err();

    let messages = failure
        .messages(&context, "billing/messages", &"es-MX".parse().unwrap())
        .unwrap();
    assert_eq!(messages[0].message, "At most 1 seats on the «Free» plan");
    assert_eq!(messages[0].constraint, failure.constraint_violations()[0].constraint);
}

#[test]
fn test_missing_message_is_reported() {
    let value = 1;
    let failure = arbiter::validate(&value, |v| {
        v.property("value", |n| n)
            .validate(constraints::null().with_message_key("nowhere.message"), |_| false);
    })
    .unwrap_err();

    let err = failure
        .messages(I18nContext::builtin(), DEFAULT_BASE_NAME, &Locale::en())
        .unwrap_err();
    assert_eq!(err.missing_key(), Some("nowhere.message"));
}

// =============================================================================
// HTTP Workflow Tests
// =============================================================================

#[test]
fn test_failure_to_422_response() {
    let mut c = customer();
    c.seats = 0;
    c.active = false;
    let failure = c.validate().unwrap_err();

    let handler = ValidationExceptionHandler::new(ValidationConfig::default());
    let req = HttpRequest::new("POST", "/customers").with_header("Accept-Language", "pt-BR");
    let response = handler.handle_request(&failure, &req).unwrap();

    assert_eq!(response.status, 422);
    let body: serde_json::Value = response.json().unwrap();
    assert_eq!(body["errors"].as_array().unwrap().len(), 2);
    assert_eq!(body["errors"][0]["message"], "Deve ser positivo");
    assert_eq!(body["errors"][0]["value"], 0);
    assert_eq!(body["errors"][1]["property"], "active");
    assert_eq!(body["errors"][1]["value"], false);
}

#[test]
fn test_validate_or_respond_through_facade() {
    fn update(customer: Customer, req: &HttpRequest) -> Result<HttpResponse, HttpResponse> {
        let handler = ValidationExceptionHandler::default();
        arbiter::http::validate_or_respond!(customer, handler, req);
        Ok(HttpResponse::ok())
    }

    let req = HttpRequest::new("PUT", "/customers/1").with_header("Accept-Language", "en");
    assert_eq!(update(customer(), &req).unwrap().status, 200);

    let mut c = customer();
    c.name = "B".to_string();
    let response = update(c, &req).unwrap_err();
    assert_eq!(response.status, 422);

    let body: serde_json::Value = response.json().unwrap();
    assert_eq!(body["errors"][0]["message"], "Size must be between 2 and 40");
}

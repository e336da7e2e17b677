//! Conversions between Cognito SDK types and [`Record`]s
//!
//! Records use the same field names as the service's own JSON so that an
//! export file reads like a `ListUsers` / `ListGroups` response.

use crate::domain::{DirectoryError, Record, ATTRIBUTES_FIELD, GROUP_NAME_FIELD, USERNAME_FIELD};
use aws_sdk_cognitoidentityprovider::primitives::{DateTime, DateTimeFormat};
use aws_sdk_cognitoidentityprovider::types::{AttributeType, GroupType, UserType};
use serde_json::{json, Value};

fn format_date(date: Option<&DateTime>) -> Option<Value> {
    date.and_then(|d| d.fmt(DateTimeFormat::DateTime).ok())
        .map(Value::String)
}

fn insert_opt(record: &mut Record, field: &str, value: Option<Value>) {
    if let Some(value) = value {
        record.insert(field, value);
    }
}

/// Converts a listed or created user into a record
pub fn user_to_record(user: &UserType) -> Record {
    let mut record = Record::new();

    insert_opt(
        &mut record,
        USERNAME_FIELD,
        user.username().map(|u| Value::String(u.to_string())),
    );

    let attributes: Vec<Value> = user
        .attributes()
        .iter()
        .map(|attr| match attr.value() {
            Some(value) => json!({ "Name": attr.name(), "Value": value }),
            None => json!({ "Name": attr.name() }),
        })
        .collect();
    record.insert(ATTRIBUTES_FIELD, Value::Array(attributes));

    insert_opt(&mut record, "UserCreateDate", format_date(user.user_create_date()));
    insert_opt(
        &mut record,
        "UserLastModifiedDate",
        format_date(user.user_last_modified_date()),
    );
    record.insert("Enabled", Value::Bool(user.enabled()));
    insert_opt(
        &mut record,
        "UserStatus",
        user.user_status()
            .map(|s| Value::String(s.as_str().to_string())),
    );

    let mfa_options: Vec<Value> = user
        .mfa_options()
        .iter()
        .map(|opt| {
            let mut entry = serde_json::Map::new();
            if let Some(medium) = opt.delivery_medium() {
                entry.insert(
                    "DeliveryMedium".to_string(),
                    Value::String(medium.as_str().to_string()),
                );
            }
            if let Some(name) = opt.attribute_name() {
                entry.insert("AttributeName".to_string(), Value::String(name.to_string()));
            }
            Value::Object(entry)
        })
        .collect();
    if !mfa_options.is_empty() {
        record.insert("MFAOptions", Value::Array(mfa_options));
    }

    record
}

/// Converts a listed or created group into a record
pub fn group_to_record(group: &GroupType) -> Record {
    let mut record = Record::new();

    let text = |value: Option<&str>| value.map(|v| Value::String(v.to_string()));

    insert_opt(&mut record, GROUP_NAME_FIELD, text(group.group_name()));
    insert_opt(&mut record, "UserPoolId", text(group.user_pool_id()));
    insert_opt(&mut record, "Description", text(group.description()));
    insert_opt(&mut record, "RoleArn", text(group.role_arn()));
    insert_opt(&mut record, "Precedence", group.precedence().map(Value::from));
    insert_opt(&mut record, "LastModifiedDate", format_date(group.last_modified_date()));
    insert_opt(&mut record, "CreationDate", format_date(group.creation_date()));

    record
}

/// Builds the attribute list for `AdminCreateUser` from a record's `Attributes`
///
/// # Errors
///
/// Returns `InvalidRecord` when `Attributes` is not an array of `{Name, Value}` objects
pub fn record_attributes(record: &Record) -> Result<Vec<AttributeType>, DirectoryError> {
    let Some(raw) = record.get(ATTRIBUTES_FIELD) else {
        return Ok(Vec::new());
    };

    let entries = raw.as_array().ok_or_else(|| {
        DirectoryError::InvalidRecord(format!(
            "{}: Attributes must be an array",
            record.display_key()
        ))
    })?;

    entries
        .iter()
        .map(|entry| {
            let name = entry.get("Name").and_then(Value::as_str).ok_or_else(|| {
                DirectoryError::InvalidRecord(format!(
                    "{}: attribute without a Name",
                    record.display_key()
                ))
            })?;
            AttributeType::builder()
                .name(name)
                .set_value(entry.get("Value").and_then(Value::as_str).map(str::to_string))
                .build()
                .map_err(|e| DirectoryError::InvalidRecord(e.to_string()))
        })
        .collect()
}

/// Writable fields of a group record: description, role ARN, precedence
pub fn group_fields(record: &Record) -> (Option<String>, Option<String>, Option<i32>) {
    let description = record.get_str("Description").map(str::to_string);
    let role_arn = record.get_str("RoleArn").map(str::to_string);
    let precedence = record
        .get("Precedence")
        .and_then(Value::as_i64)
        .and_then(|p| i32::try_from(p).ok());
    (description, role_arn, precedence)
}

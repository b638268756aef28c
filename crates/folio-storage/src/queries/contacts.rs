// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Contact insert and read operations.

use chrono::{DateTime, Utc};
use folio_core::types::{timestamp, ContactId, ContactRecord, Fields, NewContact};
use folio_core::FolioError;
use rusqlite::params;

use crate::database::{map_tr_err, Database};

/// Insert a contact and return its freshly generated id.
pub async fn insert_contact(db: &Database, contact: &NewContact) -> Result<ContactId, FolioError> {
    let id = uuid::Uuid::new_v4().to_string();
    let fields = serde_json::to_string(&contact.fields).map_err(FolioError::storage)?;
    let created_at = timestamp(contact.created_at);
    let updated_at = timestamp(contact.updated_at);

    let row_id = id.clone();
    db.connection()
        .call(move |conn| -> Result<(), rusqlite::Error> {
            conn.execute(
                "INSERT INTO contacts (id, fields, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![row_id, fields, created_at, updated_at],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

    Ok(ContactId(id))
}

/// Get a contact by id.
pub async fn get_contact(db: &Database, id: &ContactId) -> Result<Option<ContactRecord>, FolioError> {
    let id = id.0.clone();
    db.connection()
        .call(move |conn| -> Result<Option<ContactRecord>, rusqlite::Error> {
            let mut stmt = conn.prepare(
                "SELECT id, fields, created_at, updated_at FROM contacts WHERE id = ?1",
            )?;
            match stmt.query_row(params![id], row_to_record) {
                Ok(record) => Ok(Some(record)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(map_tr_err)
}

/// List contacts, newest first. `None` returns every record.
pub async fn list_contacts(
    db: &Database,
    limit: Option<i64>,
) -> Result<Vec<ContactRecord>, FolioError> {
    // SQLite treats a negative LIMIT as unbounded.
    let limit = limit.unwrap_or(-1);
    db.connection()
        .call(move |conn| -> Result<Vec<ContactRecord>, rusqlite::Error> {
            let mut stmt = conn.prepare(
                "SELECT id, fields, created_at, updated_at FROM contacts
                 ORDER BY created_at DESC, rowid DESC LIMIT ?1",
            )?;
            let rows = stmt.query_map(params![limit], row_to_record)?;
            rows.collect()
        })
        .await
        .map_err(map_tr_err)
}

fn row_to_record(row: &rusqlite::Row<'_>) -> Result<ContactRecord, rusqlite::Error> {
    let id: String = row.get(0)?;
    let fields: String = row.get(1)?;
    let created_at: String = row.get(2)?;
    let updated_at: String = row.get(3)?;

    let fields: Fields = serde_json::from_str(&fields).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(ContactRecord {
        id: ContactId(id),
        fields,
        created_at: parse_timestamp(2, &created_at)?,
        updated_at: parse_timestamp(3, &updated_at)?,
    })
}

fn parse_timestamp(column: usize, value: &str) -> Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                column,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn contact(name: &str, at: DateTime<Utc>) -> NewContact {
        let mut fields = Fields::new();
        fields.insert("name".to_string(), json!(name));
        fields.insert("budget".to_string(), json!(1200));
        NewContact::stamped(fields, at)
    }

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_767_225_600 + secs, 0).unwrap()
    }

    #[tokio::test]
    async fn insert_then_get_round_trips_fields() {
        let db = Database::open(":memory:", false).await.unwrap();
        let new = contact("Ada", at(0));

        let id = insert_contact(&db, &new).await.unwrap();
        assert!(uuid::Uuid::parse_str(&id.0).is_ok(), "id should be a UUID");

        let record = get_contact(&db, &id).await.unwrap().unwrap();
        assert_eq!(record.id, id);
        assert_eq!(record.fields, new.fields);
        assert_eq!(record.created_at, new.created_at);
        assert_eq!(record.updated_at, new.updated_at);
    }

    #[tokio::test]
    async fn get_missing_contact_returns_none() {
        let db = Database::open(":memory:", false).await.unwrap();
        let missing = get_contact(&db, &ContactId("nope".into())).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn field_order_survives_storage() {
        let db = Database::open(":memory:", false).await.unwrap();
        let mut fields = Fields::new();
        for key in ["zeta", "alpha", "mid"] {
            fields.insert(key.to_string(), json!(key));
        }
        let id = insert_contact(&db, &NewContact::stamped(fields, at(0)))
            .await
            .unwrap();

        let record = get_contact(&db, &id).await.unwrap().unwrap();
        let keys: Vec<&str> = record.fields.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[tokio::test]
    async fn list_returns_newest_first_and_honours_limit() {
        let db = Database::open(":memory:", false).await.unwrap();
        insert_contact(&db, &contact("first", at(0))).await.unwrap();
        insert_contact(&db, &contact("second", at(10))).await.unwrap();
        insert_contact(&db, &contact("third", at(20))).await.unwrap();

        let all = list_contacts(&db, None).await.unwrap();
        let names: Vec<&str> = all
            .iter()
            .map(|r| r.fields["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["third", "second", "first"]);

        let limited = list_contacts(&db, Some(2)).await.unwrap();
        assert_eq!(limited.len(), 2);
        assert_eq!(limited[0].fields["name"], json!("third"));
    }
}
